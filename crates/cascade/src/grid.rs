use glam::Vec2;

use crate::components::{LayerGroup, Position, TileKind};

/// Unique identity of a tile entity for the lifetime of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

/// A single tile entity on the board.
///
/// `position` is the authoritative logical cell. `visual`, `velocity`, `layer`
/// and `frozen` only matter while a settle or swap tween is in flight; at the
/// end of every operation `visual` equals `position`, the velocity is zero and
/// the tile is back in the shared resting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub position: Position,
    pub visual: Vec2,
    pub velocity: Vec2,
    pub layer: LayerGroup,
    /// Vertical movement locked. Only unfrozen tiles are integrated by the physics step.
    pub frozen: bool,
}

impl Tile {
    pub fn new(id: TileId, kind: TileKind, position: Position) -> Self {
        Tile {
            id,
            kind,
            position,
            visual: cell_center(position),
            velocity: Vec2::ZERO,
            layer: LayerGroup::Shared,
            frozen: true,
        }
    }

    /// Put the tile back at rest on its logical cell.
    pub fn snap_to_cell(&mut self) {
        self.visual = cell_center(self.position);
        self.velocity = Vec2::ZERO;
        self.layer = LayerGroup::Shared;
        self.frozen = true;
    }

    /// True if no in-flight state remains on the tile.
    pub fn is_at_rest(&self) -> bool {
        self.visual == cell_center(self.position)
            && self.velocity == Vec2::ZERO
            && self.layer == LayerGroup::Shared
            && self.frozen
    }
}

/// Visual coordinate of a cell, in cell units (one tile is 1.0 wide).
#[inline]
pub fn cell_center(p: Position) -> Vec2 {
    Vec2::new(p.column as f32, p.row as f32)
}

/// Square board storage. Column-major layout: index = column * dimension + row.
/// `None` means an empty cell.
#[derive(Debug, Clone)]
pub struct Grid {
    pub dimension: usize,
    tiles: Vec<Option<Tile>>,
}

impl Grid {
    pub fn new(dimension: usize) -> Self {
        Grid {
            dimension,
            tiles: vec![None; dimension * dimension],
        }
    }

    #[inline]
    pub fn in_bounds(&self, p: Position) -> bool {
        p.column >= 0
            && p.row >= 0
            && (p.column as usize) < self.dimension
            && (p.row as usize) < self.dimension
    }

    #[inline]
    fn idx(&self, p: Position) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.column as usize * self.dimension + p.row as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: Position) -> Option<&Tile> {
        self.idx(p).and_then(|i| self.tiles[i].as_ref())
    }

    pub fn get_mut(&mut self, p: Position) -> Option<&mut Tile> {
        let i = self.idx(p)?;
        self.tiles[i].as_mut()
    }

    /// Kind of the tile at `p`; `None` for empty or off-board cells.
    pub fn kind_at(&self, p: Position) -> Option<TileKind> {
        self.get(p).map(|t| t.kind)
    }

    /// Store a tile at `p`, returning whatever was there. The tile's logical
    /// position is rewritten to `p`. Off-board writes are dropped and returned.
    pub fn put(&mut self, p: Position, mut tile: Tile) -> Option<Tile> {
        match self.idx(p) {
            Some(i) => {
                tile.position = p;
                self.tiles[i].replace(tile)
            }
            None => Some(tile),
        }
    }

    /// Remove and return the tile at `p`, leaving the cell empty.
    pub fn take(&mut self, p: Position) -> Option<Tile> {
        let i = self.idx(p)?;
        self.tiles[i].take()
    }

    /// Exchange the contents of two cells and fix up their logical positions.
    pub fn swap_cells(&mut self, a: Position, b: Position) {
        if let (Some(ia), Some(ib)) = (self.idx(a), self.idx(b)) {
            self.tiles.swap(ia, ib);
            if let Some(t) = self.tiles[ia].as_mut() {
                t.position = a;
            }
            if let Some(t) = self.tiles[ib].as_mut() {
                t.position = b;
            }
        }
    }

    /// Cell positions of one column, bottom to top.
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = Position> {
        (0..self.dimension).map(move |row| Position::new(column as i32, row as i32))
    }

    /// All cell positions in row-major order (row 0 first, left to right).
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let n = self.dimension;
        (0..n).flat_map(move |row| (0..n).map(move |col| Position::new(col as i32, row as i32)))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut().flatten()
    }

    pub fn empty_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_none()).count()
    }

    /// Kinds laid out as rows, top row first. Empty cells are `None`.
    pub fn kinds_by_row(&self) -> Vec<Vec<Option<TileKind>>> {
        (0..self.dimension)
            .rev()
            .map(|row| {
                (0..self.dimension)
                    .map(|col| self.kind_at(Position::new(col as i32, row as i32)))
                    .collect()
            })
            .collect()
    }
}
