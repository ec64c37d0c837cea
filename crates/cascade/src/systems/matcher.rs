use std::collections::BTreeMap;

use crate::components::{Position, TileKind, MIN_RUN_LENGTH};
use crate::grid::{Grid, TileId};

/// A tile slated for removal, captured at detection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedTile {
    pub id: TileId,
    pub kind: TileKind,
    pub position: Position,
}

/// Tiles to remove in one pass. A tile sitting in both a horizontal and a
/// vertical run appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    tiles: BTreeMap<Position, MatchedTile>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Score delta for the pass.
    pub fn tile_count(&self) -> u32 {
        self.tiles.len() as u32
    }

    pub fn contains(&self, p: Position) -> bool {
        self.tiles.contains_key(&p)
    }

    /// Matched tiles ordered by position.
    pub fn iter(&self) -> impl Iterator<Item = &MatchedTile> {
        self.tiles.values()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.tiles.keys().copied().collect()
    }

    fn insert(&mut self, grid: &Grid, p: Position) {
        if let Some(tile) = grid.get(p) {
            self.tiles.entry(p).or_insert(MatchedTile {
                id: tile.id,
                kind: tile.kind,
                position: p,
            });
        }
    }
}

/// Collect every tile that belongs to a run of three or more equal kinds along a
/// row or a column. One linear pass per row and per column; empty cells break runs.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let n = grid.dimension as i32;
    let mut set = MatchSet::default();

    for row in 0..n {
        scan_line(grid, &mut set, (0..n).map(|col| Position::new(col, row)));
    }
    for col in 0..n {
        scan_line(grid, &mut set, (0..n).map(|row| Position::new(col, row)));
    }

    set
}

fn scan_line(grid: &Grid, set: &mut MatchSet, line: impl Iterator<Item = Position>) {
    let mut run: Vec<Position> = Vec::new();
    let mut run_kind: Option<TileKind> = None;

    for p in line {
        let kind = grid.kind_at(p);
        if kind.is_some() && kind == run_kind {
            run.push(p);
            continue;
        }
        flush_run(grid, set, &run);
        run.clear();
        run_kind = kind;
        if kind.is_some() {
            run.push(p);
        }
    }
    flush_run(grid, set, &run);
}

fn flush_run(grid: &Grid, set: &mut MatchSet, run: &[Position]) {
    if run.len() >= MIN_RUN_LENGTH {
        for &p in run {
            set.insert(grid, p);
        }
    }
}
