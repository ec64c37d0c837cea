use glam::Vec2;

use crate::components::Position;
use crate::grid::cell_center;

/// Swap tween: the two tiles slide linearly into each other's cells.
/// The board itself is only changed once the tween completes.
#[derive(Debug, Clone)]
pub struct SwapAnim {
    pub from: Position,
    pub to: Position,
    pub progress: f32, // 0.0 -> 1.0
    pub duration: f32, // seconds
}

impl SwapAnim {
    pub fn new(from: Position, to: Position, duration: f32) -> Self {
        SwapAnim {
            from,
            to,
            progress: if duration > 0.0 { 0.0 } else { 1.0 },
            duration,
        }
    }

    /// Advance the tween. Returns `false` once it has finished.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.duration > 0.0 && dt > 0.0 {
            self.progress = (self.progress + dt / self.duration).min(1.0);
        }
        !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Current visual position of the tile that sits at `cell`, if it is one
    /// of the two being swapped.
    pub fn visual_for(&self, cell: Position) -> Option<Vec2> {
        let a = cell_center(self.from);
        let b = cell_center(self.to);
        if cell == self.from {
            Some(a.lerp(b, self.progress))
        } else if cell == self.to {
            Some(b.lerp(a, self.progress))
        } else {
            None
        }
    }
}
