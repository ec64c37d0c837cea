pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod highscore;
pub mod state;
pub mod systems;

#[cfg(target_arch = "wasm32")]
pub mod bridge;

pub use components::{Position, SoundCue, TileKind};
pub use config::GameConfig;
pub use error::{CascadeError, MoveViolation, StoreError};
pub use events::{EventLog, GameEvent, NullPresenter, Presenter};
pub use highscore::{HighScoreStore, JsonFileHighScoreStore, MemoryHighScoreStore};
pub use state::{ComboController, GamePhase, GameState, SwapRequest, TileInstance};
pub use systems::advisor::{MoveAdvisor, SuggestedSwap};
pub use systems::board::{Board, Cell, RandomSource, Rng, SequenceRng};
pub use systems::matcher::{MatchSet, MatchedTile};
pub use systems::selection::{Selection, SelectionOutcome};
pub use systems::settle::SettleStrategy;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cascade-sim initialized");
}
