use std::collections::HashSet;
use std::fmt;

use crate::components::{Position, TileKind};
use crate::error::{CascadeError, MoveViolation};
use crate::grid::{Grid, Tile, TileId};
use crate::systems::matcher::{self, MatchSet};

/// Source of randomness for tile kinds. Injected so sessions can be replayed.
pub trait RandomSource {
    /// A number in [0, upper_bound). `upper_bound` is never zero.
    fn next_int(&mut self, upper_bound: u32) -> u32;
}

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        // Avoid zero state
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }
}

/// Replays a fixed list of values, wrapping around at the end.
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        SequenceRng { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRng {
    fn next_int(&mut self, upper_bound: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v % upper_bound
    }
}

/// Result of a bounds-agnostic cell lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Occupied(&'a Tile),
    /// In bounds but holding no tile (only observable mid-settle).
    Empty,
    /// Off the board.
    Absent,
}

impl<'a> Cell<'a> {
    pub fn tile(self) -> Option<&'a Tile> {
        match self {
            Cell::Occupied(t) => Some(t),
            _ => None,
        }
    }

    pub fn kind(self) -> Option<TileKind> {
        self.tile().map(|t| t.kind)
    }
}

/// The play field: a square grid of tile entities plus the palette and the
/// random source used to create them. Owns tile lifecycles.
pub struct Board {
    grid: Grid,
    palette_size: u8,
    rng: Box<dyn RandomSource>,
    next_id: u64,
}

impl Board {
    /// Fill a fresh board so that no tile completes a run of three with the two
    /// tiles to its left or the two below it.
    pub fn initialize(
        dimension: usize,
        palette_size: u8,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, CascadeError> {
        let mut board = Board::empty(dimension, palette_size, rng)?;

        for row in 0..dimension as i32 {
            for column in 0..dimension as i32 {
                let p = Position::new(column, row);
                let mut candidates: Vec<TileKind> = (0..palette_size).map(TileKind).collect();

                for (near, far) in [(p.offset(-1, 0), p.offset(-2, 0)), (p.offset(0, -1), p.offset(0, -2))] {
                    let near = board.grid.kind_at(near);
                    if near.is_some() && near == board.grid.kind_at(far) {
                        candidates.retain(|k| Some(*k) != near);
                    }
                }

                // Tiny palettes can exclude every kind; accept a run rather than fail.
                if candidates.is_empty() {
                    log::debug!("no run-free kind for {}, drawing from full palette", p);
                    candidates = (0..palette_size).map(TileKind).collect();
                }

                let pick = board.rng.next_int(candidates.len() as u32) as usize % candidates.len();
                let kind = candidates[pick];
                board.place_new(p, kind);
            }
        }

        log::debug!("board initialized: {}x{}, palette {}", dimension, dimension, palette_size);
        Ok(board)
    }

    /// Build a board from glyph rows listed top row first (`'A'` is kind 0).
    /// Every row must be `dimension` glyphs long and every kind inside the palette.
    pub fn from_layout(
        rows: &[&str],
        palette_size: u8,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, CascadeError> {
        let dimension = rows.len();
        let mut board = Board::empty(dimension, palette_size, rng)?;

        for (i, line) in rows.iter().enumerate() {
            let row = (dimension - 1 - i) as i32;
            let glyphs: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.len() != dimension {
                return Err(CascadeError::InvalidConfiguration(format!(
                    "layout row {} has {} cells, expected {}",
                    i,
                    glyphs.len(),
                    dimension
                )));
            }
            for (column, glyph) in glyphs.into_iter().enumerate() {
                let kind = TileKind::from_glyph(glyph)
                    .filter(|k| k.0 < palette_size)
                    .ok_or_else(|| {
                        CascadeError::InvalidConfiguration(format!(
                            "layout glyph {:?} is not in a palette of {}",
                            glyph, palette_size
                        ))
                    })?;
                board.place_new(Position::new(column as i32, row), kind);
            }
        }

        Ok(board)
    }

    fn empty(
        dimension: usize,
        palette_size: u8,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, CascadeError> {
        if palette_size == 0 {
            return Err(CascadeError::InvalidConfiguration("palette is empty".into()));
        }
        if dimension == 0 {
            return Err(CascadeError::InvalidConfiguration("grid dimension is zero".into()));
        }
        Ok(Board {
            grid: Grid::new(dimension),
            palette_size,
            rng,
            next_id: 0,
        })
    }

    pub fn dimension(&self) -> usize {
        self.grid.dimension
    }

    pub fn palette_size(&self) -> u8 {
        self.palette_size
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Bounds-agnostic lookup: off-board coordinates are `Absent`, not an error.
    pub fn tile_at(&self, p: Position) -> Cell<'_> {
        if !self.grid.in_bounds(p) {
            return Cell::Absent;
        }
        match self.grid.get(p) {
            Some(t) => Cell::Occupied(t),
            None => Cell::Empty,
        }
    }

    /// Check a swap request without touching the board.
    pub fn validate_swap(&self, a: Position, b: Position) -> Result<(), CascadeError> {
        let reason = if !self.grid.in_bounds(a) || !self.grid.in_bounds(b) {
            Some(MoveViolation::OutOfBounds)
        } else if !a.is_adjacent(b) {
            Some(MoveViolation::NotAdjacent)
        } else {
            None
        };
        match reason {
            Some(reason) => Err(CascadeError::InvalidMove { from: a, to: b, reason }),
            None => Ok(()),
        }
    }

    /// Exchange the tile identities of two adjacent cells. Invalid requests are a no-op.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), CascadeError> {
        self.validate_swap(a, b)?;
        self.grid.swap_cells(a, b);
        Ok(())
    }

    /// Destroy every tile in the set, leaving its cell empty. Fails without
    /// removing anything if a listed tile is not where the set says it is.
    pub fn remove_all(&mut self, set: &MatchSet) -> Result<Vec<Tile>, CascadeError> {
        for matched in set.iter() {
            let found = self.grid.get(matched.position).map(|t| t.id);
            if found != Some(matched.id) {
                return Err(self.inconsistency(format!(
                    "tile {:?} expected at {} for removal, found {:?}",
                    matched.id, matched.position, found
                )));
            }
        }
        Ok(set
            .iter()
            .filter_map(|matched| self.grid.take(matched.position))
            .collect())
    }

    /// Draw a kind uniformly from the full palette.
    pub fn random_kind(&mut self) -> TileKind {
        let bound = self.palette_size as u32;
        TileKind((self.rng.next_int(bound) % bound) as u8)
    }

    /// Create a new tile with a random kind in the empty cell `p`.
    pub fn spawn(&mut self, p: Position) -> Result<TileId, CascadeError> {
        if !self.grid.in_bounds(p) {
            return Err(self.inconsistency(format!("spawn outside the board at {}", p)));
        }
        if let Some(t) = self.grid.get(p) {
            return Err(self.inconsistency(format!(
                "spawn into occupied cell {} (holds {:?})",
                p, t.id
            )));
        }
        let kind = self.random_kind();
        Ok(self.place_new(p, kind))
    }

    fn place_new(&mut self, p: Position, kind: TileKind) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.grid.put(p, Tile::new(id, kind, p));
        id
    }

    /// Slide the tiles of one column down over its holes, keeping their order.
    /// Returns the now-empty cells at the top of the column, bottom to top.
    pub fn compact_column(&mut self, column: usize) -> Vec<Position> {
        let cells: Vec<Position> = self.grid.column_cells(column).collect();
        let survivors: Vec<Tile> = cells.iter().filter_map(|&p| self.grid.take(p)).collect();
        let filled = survivors.len();
        for (tile, &p) in survivors.into_iter().zip(cells.iter()) {
            self.grid.put(p, tile);
        }
        cells[filled..].to_vec()
    }

    /// Run the match detector over the current layout.
    pub fn find_matches(&self) -> MatchSet {
        matcher::find_matches(&self.grid)
    }

    /// Verify that every cell holds exactly one tile whose stored position is
    /// that cell, and that no identity appears twice.
    pub fn check_consistency(&self) -> Result<(), CascadeError> {
        let mut seen = HashSet::with_capacity(self.dimension() * self.dimension());
        for p in self.grid.cells() {
            match self.grid.get(p) {
                None => return Err(self.inconsistency(format!("cell {} is empty", p))),
                Some(t) if t.position != p => {
                    return Err(self.inconsistency(format!(
                        "tile {:?} in cell {} believes it is at {}",
                        t.id, p, t.position
                    )))
                }
                Some(t) => {
                    if !seen.insert(t.id) {
                        return Err(self.inconsistency(format!("tile {:?} appears twice", t.id)));
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn inconsistency(&self, detail: String) -> CascadeError {
        CascadeError::InconsistentBoardState {
            detail,
            dump: self.to_string(),
        }
    }
}

/// One line per row, top row first; `.` marks an empty cell.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.kinds_by_row() {
            let line: String = row
                .iter()
                .map(|k| k.map(TileKind::glyph).unwrap_or('.'))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("dimension", &self.dimension())
            .field("palette_size", &self.palette_size)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
