use std::fmt;

/// A cell coordinate on the board. Column grows to the right, row grows upward
/// (row 0 is the bottom row, where tiles come to rest).
///
/// Coordinates are signed so that neighbour lookups such as `column - 1` can
/// step off the board and come back as [`Cell::Absent`](crate::systems::board::Cell)
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub column: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(column: i32, row: i32) -> Self {
        Position { column, row }
    }

    /// Shift by a (column, row) delta.
    pub fn offset(self, d_column: i32, d_row: i32) -> Self {
        Position::new(self.column + d_column, self.row + d_row)
    }

    /// Manhattan distance between two cells.
    pub fn distance(self, other: Position) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// True if the cells share an edge: exactly one axis differs, by exactly one.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Index into the tile palette. Two tiles match when their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKind(pub u8);

impl TileKind {
    /// Single-character label used by board dumps and layouts: `A`, `B`, ...
    pub fn glyph(self) -> char {
        if self.0 < 26 {
            (b'A' + self.0) as char
        } else {
            '#'
        }
    }

    /// Inverse of [`TileKind::glyph`].
    pub fn from_glyph(c: char) -> Option<TileKind> {
        match c {
            'A'..='Z' => Some(TileKind(c as u8 - b'A')),
            _ => None,
        }
    }
}

/// Collision partition used by the free-fall settle strategy.
///
/// `Shared` is the resting layer: its members never collide with each other,
/// only with the ground. `Column(c)` members collide with each other and with
/// the ground, so a column falls as a stack without touching its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum LayerGroup {
    #[default]
    Shared,
    Column(u16),
}

impl LayerGroup {
    /// Whether bodies in `self` and `other` interact.
    pub fn collides_with(self, other: LayerGroup) -> bool {
        match (self, other) {
            (LayerGroup::Column(a), LayerGroup::Column(b)) => a == b,
            _ => false,
        }
    }
}

/// Session defaults.
pub const DEFAULT_GRID_DIMENSION: usize = 8;
pub const DEFAULT_PALETTE_SIZE: u8 = 5;
pub const DEFAULT_STARTING_MOVES: u32 = 20;
pub const DEFAULT_SWAP_DURATION: f32 = 0.5;

/// Smallest palette that can still produce a solvable board.
pub const MIN_PALETTE_SIZE: u8 = 3;

/// A run must be at least this long to be removed.
pub const MIN_RUN_LENGTH: usize = 3;

/// Audio cues a host may play in response to simulation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SoundCue {
    Select = 0,
    Move = 1,
    Pop = 2,
    GameOver = 3,
    NoMatch = 4,
}
