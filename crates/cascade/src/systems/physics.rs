//! Vertical free-fall integrator used by the free-fall settle strategy.
//!
//! Bodies are tiles in cell units: a tile is 1.0 tall and rests either on the
//! ground (y = 0) or on top of the tile below it *in a colliding layer*.
//! Tiles in the shared layer only ever meet the ground.

use std::cmp::Ordering;

use crate::components::LayerGroup;
use crate::grid::{Grid, Tile};

/// Downward acceleration, cells per second squared.
pub const GRAVITY: f32 = 40.0;
/// Fraction of velocity lost per step.
pub const FRICTION: f32 = 0.005;
/// Longest time slice integrated in one step. Larger `dt` values are clamped.
pub const MAX_STEP: f32 = 1.0 / 30.0;
/// Velocity and gap below which a body counts as resting.
pub const REST_EPSILON: f32 = 1e-3;

const GROUND: f32 = 0.0;
const TILE_HEIGHT: f32 = 1.0;

fn stacking_order(a: &Tile, b: &Tile) -> Ordering {
    a.layer
        .cmp(&b.layer)
        .then(a.visual.y.total_cmp(&b.visual.y))
}

/// Where a body in `layer` comes to rest, given the body processed just before it.
fn floor_for(layer: LayerGroup, below: Option<(LayerGroup, f32)>) -> f32 {
    match below {
        Some((below_layer, top)) if below_layer.collides_with(layer) => top,
        _ => GROUND,
    }
}

fn is_resting(tile: &Tile, floor: f32) -> bool {
    tile.velocity.y.abs() < REST_EPSILON && (tile.visual.y - floor).abs() < REST_EPSILON
}

/// Advance every unfrozen tile by `dt` seconds: gravity, friction, then
/// collision against the floor of its layer. Frozen tiles do not move but still
/// act as a floor for the tiles stacked above them.
pub fn step(grid: &mut Grid, dt: f32) {
    if !(dt > 0.0) {
        return;
    }
    let dt = dt.min(MAX_STEP);

    let mut bodies: Vec<&mut Tile> = grid.tiles_mut().collect();
    bodies.sort_by(|a, b| stacking_order(a, b));

    let mut below: Option<(LayerGroup, f32)> = None;
    for body in bodies {
        let floor = floor_for(body.layer, below);
        if !body.frozen {
            body.velocity.y -= GRAVITY * dt;
            body.velocity.y *= 1.0 - FRICTION;
            body.visual.y += body.velocity.y * dt;
            if body.visual.y <= floor {
                body.visual.y = floor;
                body.velocity.y = 0.0;
            }
        }
        below = Some((body.layer, body.visual.y + TILE_HEIGHT));
    }
}

/// True once every unfrozen tile sits on its floor with no residual velocity.
pub fn is_stable(grid: &Grid) -> bool {
    let mut bodies: Vec<&Tile> = grid.tiles().collect();
    bodies.sort_by(|a, b| stacking_order(a, b));

    let mut below: Option<(LayerGroup, f32)> = None;
    for body in bodies {
        let floor = floor_for(body.layer, below);
        if !body.frozen && !is_resting(body, floor) {
            return false;
        }
        below = Some((body.layer, body.visual.y + TILE_HEIGHT));
    }
    true
}
