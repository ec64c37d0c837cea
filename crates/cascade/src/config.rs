use serde::{Deserialize, Serialize};

use crate::components::{
    DEFAULT_GRID_DIMENSION, DEFAULT_PALETTE_SIZE, DEFAULT_STARTING_MOVES, DEFAULT_SWAP_DURATION,
    MIN_PALETTE_SIZE,
};
use crate::error::CascadeError;
use crate::systems::settle::SettleStrategy;

/// Board side length above which a grid stops being a sensible play field.
const MAX_GRID_DIMENSION: usize = 64;

/// Session parameters supplied at start. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_dimension: usize,
    /// Number of distinct tile kinds.
    pub palette_size: u8,
    pub starting_moves: u32,
    pub settle_strategy: SettleStrategy,
    /// Seconds the swap tween runs before the swap is evaluated. Zero swaps instantly.
    pub swap_duration: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_dimension: DEFAULT_GRID_DIMENSION,
            palette_size: DEFAULT_PALETTE_SIZE,
            starting_moves: DEFAULT_STARTING_MOVES,
            settle_strategy: SettleStrategy::Compaction,
            swap_duration: DEFAULT_SWAP_DURATION,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, CascadeError> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| CascadeError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// A config that resolves every swap synchronously: no tween, compaction settle.
    pub fn synchronous(grid_dimension: usize, palette_size: u8, starting_moves: u32) -> Self {
        GameConfig {
            grid_dimension,
            palette_size,
            starting_moves,
            settle_strategy: SettleStrategy::Compaction,
            swap_duration: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), CascadeError> {
        if self.grid_dimension == 0 || self.grid_dimension > MAX_GRID_DIMENSION {
            return Err(CascadeError::InvalidConfiguration(format!(
                "grid_dimension must be in 1..={}, got {}",
                MAX_GRID_DIMENSION, self.grid_dimension
            )));
        }
        if self.palette_size < MIN_PALETTE_SIZE {
            return Err(CascadeError::InvalidConfiguration(format!(
                "palette_size must be at least {}, got {}",
                MIN_PALETTE_SIZE, self.palette_size
            )));
        }
        self.validate_rules()
    }

    /// Checks that do not depend on how the board is generated. Used on its own
    /// when a session adopts a board built from an explicit layout.
    pub fn validate_rules(&self) -> Result<(), CascadeError> {
        if self.starting_moves == 0 {
            return Err(CascadeError::InvalidConfiguration(
                "starting_moves must be positive".into(),
            ));
        }
        if !self.swap_duration.is_finite() || self.swap_duration < 0.0 {
            return Err(CascadeError::InvalidConfiguration(format!(
                "swap_duration must be a non-negative number of seconds, got {}",
                self.swap_duration
            )));
        }
        Ok(())
    }

    /// True when a full swap-to-settle cycle completes without any tick.
    pub fn is_synchronous(&self) -> bool {
        self.swap_duration == 0.0 && self.settle_strategy == SettleStrategy::Compaction
    }
}
