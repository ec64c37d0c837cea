use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::{LayerGroup, Position};
use crate::error::CascadeError;
use crate::grid::{cell_center, Grid, Tile};
use crate::systems::board::Board;
use crate::systems::physics;

/// How holes left by removed tiles are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleStrategy {
    /// Slide tiles down and spawn replacements in one synchronous pass.
    #[default]
    Compaction,
    /// Let tiles fall under simulated gravity, column by column, across ticks.
    FreeFall,
}

/// Predicate deciding when the free-fall simulation has come to rest.
pub type StabilityCheck = fn(&Grid) -> bool;

/// Visual distance from its cell a tile may end a fall at before it counts as lost.
const LANDING_TOLERANCE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStatus {
    Pending,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallStage {
    /// Survivors fall into the holes.
    Collapsing,
    /// Replacements fall in from above the board.
    Filling,
}

/// State owned by one free-fall settle call: which columns were partitioned
/// and how far the fall has progressed. Dropped when the call completes.
#[derive(Clone)]
pub struct SettleContext {
    columns: Vec<usize>,
    stage: FallStage,
    steps: u32,
    is_stable: StabilityCheck,
}

impl fmt::Debug for SettleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettleContext")
            .field("columns", &self.columns)
            .field("stage", &self.stage)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl SettleContext {
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }
}

/// One in-flight settle. Compaction finishes inside [`SettleTask::start`];
/// free-fall yields `Pending` from [`SettleTask::step`] until both falls rest.
#[derive(Debug, Clone)]
pub enum SettleTask {
    Done,
    FreeFall(SettleContext),
}

impl SettleTask {
    pub fn start(strategy: SettleStrategy, board: &mut Board) -> Result<SettleTask, CascadeError> {
        Self::start_with(strategy, board, physics::is_stable)
    }

    /// Start a settle with a custom rest predicate for the free-fall strategy.
    pub fn start_with(
        strategy: SettleStrategy,
        board: &mut Board,
        is_stable: StabilityCheck,
    ) -> Result<SettleTask, CascadeError> {
        match strategy {
            SettleStrategy::Compaction => {
                compact(board)?;
                Ok(SettleTask::Done)
            }
            SettleStrategy::FreeFall => Ok(begin_free_fall(board, is_stable)),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SettleTask::Done)
    }

    /// Advance by `dt` seconds. Returns `Complete` once the board is full and at rest.
    pub fn step(&mut self, board: &mut Board, dt: f32) -> Result<SettleStatus, CascadeError> {
        let ctx = match self {
            SettleTask::Done => return Ok(SettleStatus::Complete),
            SettleTask::FreeFall(ctx) => ctx,
        };

        physics::step(board.grid_mut(), dt);
        ctx.steps += 1;
        if !(ctx.is_stable)(board.grid()) {
            return Ok(SettleStatus::Pending);
        }

        match ctx.stage {
            FallStage::Collapsing => {
                for &column in &ctx.columns {
                    reindex_column(board, column)?;
                    spawn_above(board, column)?;
                }
                ctx.stage = FallStage::Filling;
                log::debug!(
                    "free fall: columns {:?} collapsed after {} steps, filling",
                    ctx.columns,
                    ctx.steps
                );
                Ok(SettleStatus::Pending)
            }
            FallStage::Filling => {
                finish_free_fall(board)?;
                log::debug!("free fall: settled after {} steps", ctx.steps);
                *self = SettleTask::Done;
                Ok(SettleStatus::Complete)
            }
        }
    }
}

/// Compaction strategy: per column, slide survivors to the bottom and spawn
/// fresh tiles into the cells left at the top.
pub fn compact(board: &mut Board) -> Result<(), CascadeError> {
    for column in 0..board.dimension() {
        for p in board.compact_column(column) {
            board.spawn(p)?;
        }
    }
    for tile in board.grid_mut().tiles_mut() {
        tile.snap_to_cell();
    }
    Ok(())
}

fn column_has_hole(grid: &Grid, column: usize) -> bool {
    grid.column_cells(column).any(|p| grid.get(p).is_none())
}

/// Partition each holed column into its own collision layer and unfreeze
/// every tile with a hole somewhere beneath it.
fn begin_free_fall(board: &mut Board, is_stable: StabilityCheck) -> SettleTask {
    let columns: Vec<usize> = (0..board.dimension())
        .filter(|&c| column_has_hole(board.grid(), c))
        .collect();

    if columns.is_empty() {
        return SettleTask::Done;
    }

    let grid = board.grid_mut();
    for &column in &columns {
        let cells: Vec<Position> = grid.column_cells(column).collect();
        let mut hole_below = false;
        for p in cells {
            match grid.get_mut(p) {
                None => hole_below = true,
                Some(tile) => {
                    tile.layer = LayerGroup::Column(column as u16);
                    tile.frozen = !hole_below;
                }
            }
        }
    }

    log::debug!("free fall: partitioned columns {:?}", columns);
    SettleTask::FreeFall(SettleContext {
        columns,
        stage: FallStage::Collapsing,
        steps: 0,
        is_stable,
    })
}

/// Reassign logical rows in one column by landed height, lowest first.
fn reindex_column(board: &mut Board, column: usize) -> Result<(), CascadeError> {
    let grid = board.grid_mut();
    let cells: Vec<Position> = grid.column_cells(column).collect();
    let mut landed: Vec<Tile> = cells.iter().filter_map(|&p| grid.take(p)).collect();
    landed.sort_by(|a, b| a.visual.y.total_cmp(&b.visual.y));

    let mut displaced = None;
    for (tile, &p) in landed.into_iter().zip(cells.iter()) {
        if let Some(other) = grid.put(p, tile) {
            displaced = Some(other.id);
        }
    }
    if let Some(id) = displaced {
        return Err(board.inconsistency(format!(
            "reindexing column {} displaced tile {:?}",
            column, id
        )));
    }
    Ok(())
}

/// Spawn replacements for the empty top cells, stacked just above the board
/// and free to fall in the column's layer.
fn spawn_above(board: &mut Board, column: usize) -> Result<(), CascadeError> {
    let top = board.dimension() as f32;
    let empties: Vec<Position> = board
        .grid()
        .column_cells(column)
        .filter(|&p| board.grid().get(p).is_none())
        .collect();

    for (i, p) in empties.into_iter().enumerate() {
        board.spawn(p)?;
        if let Some(tile) = board.grid_mut().get_mut(p) {
            tile.visual.y = top + i as f32;
            tile.layer = LayerGroup::Column(column as u16);
            tile.frozen = false;
        }
    }
    Ok(())
}

/// Check every tile landed on its own cell, then return all of them to the
/// shared resting layer.
fn finish_free_fall(board: &mut Board) -> Result<(), CascadeError> {
    let stray = board
        .grid()
        .tiles()
        .find(|t| t.visual.distance(cell_center(t.position)) > LANDING_TOLERANCE)
        .map(|t| (t.id, t.position, t.visual));
    if let Some((id, position, visual)) = stray {
        return Err(board.inconsistency(format!(
            "tile {:?} came to rest at {} but belongs to {}",
            id, visual, position
        )));
    }

    for tile in board.grid_mut().tiles_mut() {
        tile.snap_to_cell();
    }
    Ok(())
}
