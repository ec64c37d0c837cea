use crate::components::Position;
use crate::grid::Grid;
use crate::systems::matcher;

/// Evaluates every adjacent swap on a scratch copy of the grid and reports the
/// one that would clear the most tiles on its first pass.
pub struct MoveAdvisor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedSwap {
    pub from: Position,
    pub to: Position,
    /// Tiles the swap would remove before any cascade.
    pub tile_count: u32,
}

impl MoveAdvisor {
    /// Best first-pass swap, or `None` if no swap makes a match.
    /// Ties go to the swap found first, scanning row-major from the bottom.
    pub fn best_swap(grid: &Grid) -> Option<SuggestedSwap> {
        let mut sim = grid.clone();
        let mut best: Option<SuggestedSwap> = None;

        for from in grid.cells() {
            for to in [from.offset(1, 0), from.offset(0, 1)] {
                if !sim.in_bounds(to) {
                    continue;
                }
                sim.swap_cells(from, to);
                let tile_count = matcher::find_matches(&sim).tile_count();
                sim.swap_cells(from, to);

                if tile_count > best.map_or(0, |b| b.tile_count) {
                    best = Some(SuggestedSwap { from, to, tile_count });
                }
            }
        }

        best
    }

    /// Whether any swap at all would make a match.
    pub fn has_any_move(grid: &Grid) -> bool {
        let mut sim = grid.clone();
        for from in grid.cells() {
            for to in [from.offset(1, 0), from.offset(0, 1)] {
                if !sim.in_bounds(to) {
                    continue;
                }
                sim.swap_cells(from, to);
                let found = !matcher::find_matches(&sim).is_empty();
                sim.swap_cells(from, to);
                if found {
                    return true;
                }
            }
        }
        false
    }
}
