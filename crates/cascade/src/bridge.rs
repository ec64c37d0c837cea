use wasm_bindgen::prelude::*;

use crate::components::Position;
use crate::config::GameConfig;
use crate::events::EventLog;
use crate::highscore::MemoryHighScoreStore;
use crate::state::ComboController;
use crate::systems::board::Rng;
use crate::systems::selection::Selection;

/// One game session, owned by the host page.
#[wasm_bindgen]
pub struct CascadeGame {
    controller: ComboController<EventLog, MemoryHighScoreStore>,
    selection: Selection,
    sound_events: Vec<u8>,
}

#[wasm_bindgen]
impl CascadeGame {
    /// `config_json` may be empty for the default config. `high_score` is the
    /// value the host has persisted; read it back with `high_score()` at game over.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, config_json: &str, high_score: u32) -> Result<CascadeGame, JsError> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)?
        };
        let controller = ComboController::new(
            config,
            Box::new(Rng::new(seed as u64)),
            EventLog::new(),
            MemoryHighScoreStore::with_high_score(high_score),
        )?;
        log::info!("cascade-sim: game created with seed {}", seed as u64);
        Ok(CascadeGame {
            controller,
            selection: Selection::new(),
            sound_events: Vec::new(),
        })
    }

    pub fn tick(&mut self, dt: f32) -> Result<(), JsError> {
        self.controller.tick(dt)?;
        self.collect_sounds();
        Ok(())
    }

    /// Tap a cell. Returns true if the tap was taken up.
    pub fn select(&mut self, column: i32, row: i32) -> Result<bool, JsError> {
        let outcome = self
            .selection
            .on_tile_selected(Position::new(column, row), &mut self.controller)?;
        if let Some(cue) = outcome.sound_cue() {
            self.sound_events.push(cue as u8);
        }
        self.collect_sounds();
        Ok(outcome.sound_cue().is_some())
    }

    fn collect_sounds(&mut self) {
        for event in self.controller.presenter_mut().drain() {
            if let Some(cue) = event.sound_cue() {
                self.sound_events.push(cue as u8);
            }
        }
    }

    /// Forget queued sound cues once the host has played them.
    pub fn clear_sound_events(&mut self) {
        self.sound_events.clear();
    }

    pub fn score(&self) -> u32 {
        self.controller.score()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.controller.moves_remaining()
    }

    pub fn high_score(&self) -> u32 {
        self.controller.high_score()
    }

    /// 0 = idle, 1 = swapping, 2 = resolving, 3 = game over, 4 = aborted.
    pub fn phase(&self) -> u8 {
        self.controller.phase() as u8
    }

    pub fn is_input_locked(&self) -> bool {
        self.controller.is_input_locked()
    }

    pub fn grid_dimension(&self) -> u32 {
        self.controller.board().dimension() as u32
    }

    /// Pointer to the tile instance buffer (x, y, kind, flags; 16 bytes each).
    pub fn instances_ptr(&self) -> *const u8 {
        self.controller.instance_bytes().as_ptr()
    }

    pub fn instances_len(&self) -> u32 {
        self.controller.instances().len() as u32
    }

    /// Pointer to queued sound cues (one u8 per cue).
    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_events.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_events.len() as u32
    }

    /// Text dump of the board, top row first.
    pub fn board_dump(&self) -> String {
        self.controller.board().to_string()
    }
}
