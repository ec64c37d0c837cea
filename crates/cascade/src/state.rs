use bytemuck::{Pod, Zeroable};

use crate::components::Position;
use crate::config::GameConfig;
use crate::error::CascadeError;
use crate::events::{GameEvent, Presenter};
use crate::highscore::HighScoreStore;
use crate::systems::animation::SwapAnim;
use crate::systems::board::{Board, RandomSource};
use crate::systems::matcher::MatchSet;
use crate::systems::settle::{SettleStatus, SettleTask};

/// Controller phases. `Aborted` is entered only after an inconsistent board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GamePhase {
    Idle = 0,
    Swapping = 1,
    Resolving = 2,
    GameOver = 3,
    Aborted = 4,
}

/// Score and move budget for one board session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Never decreases.
    pub score: u32,
    pub moves_remaining: u32,
    /// True while a swap, settle or combo is in flight.
    pub is_input_locked: bool,
    pub is_game_over: bool,
}

/// What happened to a swap request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRequest {
    /// The swap was taken up. With a synchronous config it has already resolved.
    Started,
    /// Dropped because input is locked or the game is over. Nothing changed.
    Ignored,
}

/// Per-tile data for a host renderer. 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TileInstance {
    pub x: f32,
    pub y: f32,
    pub kind: u32,
    pub flags: u32, // bit 0 = visible, bit 1 = animating
}

pub const FLAG_VISIBLE: u32 = 1 << 0;
pub const FLAG_ANIMATING: u32 = 1 << 1;

/// Drives swap -> match -> remove -> settle -> re-match until the board is
/// stable, one cycle at a time. Owns the board for the whole session; swap
/// requests that arrive mid-cycle are dropped, never queued.
pub struct ComboController<P: Presenter, H: HighScoreStore> {
    board: Board,
    config: GameConfig,
    phase: GamePhase,
    state: GameState,
    high_score: u32,
    swap: Option<SwapAnim>,
    settle: Option<SettleTask>,
    combo_passes: u32,
    presenter: P,
    store: H,
    instances: Vec<TileInstance>,
}

impl<P: Presenter, H: HighScoreStore> ComboController<P, H> {
    /// Start a session on a freshly generated board.
    pub fn new(
        config: GameConfig,
        rng: Box<dyn RandomSource>,
        presenter: P,
        store: H,
    ) -> Result<Self, CascadeError> {
        config.validate()?;
        let board = Board::initialize(config.grid_dimension, config.palette_size, rng)?;
        Ok(Self::assemble(board, config, presenter, store))
    }

    /// Start a session on a board built elsewhere (for example from a layout).
    /// The board's dimension and palette override the ones in `config`.
    pub fn with_board(
        board: Board,
        mut config: GameConfig,
        presenter: P,
        store: H,
    ) -> Result<Self, CascadeError> {
        config.validate_rules()?;
        board.check_consistency()?;
        config.grid_dimension = board.dimension();
        config.palette_size = board.palette_size();
        Ok(Self::assemble(board, config, presenter, store))
    }

    fn assemble(board: Board, config: GameConfig, presenter: P, mut store: H) -> Self {
        let high_score = store.load().unwrap_or_else(|e| {
            log::warn!("could not read high score, starting from 0: {}", e);
            0
        });
        let capacity = board.dimension() * board.dimension();
        let mut controller = ComboController {
            state: GameState {
                score: 0,
                moves_remaining: config.starting_moves,
                is_input_locked: false,
                is_game_over: false,
            },
            board,
            config,
            phase: GamePhase::Idle,
            high_score,
            swap: None,
            settle: None,
            combo_passes: 0,
            presenter,
            store,
            instances: Vec::with_capacity(capacity),
        };
        controller.rebuild_instances();
        log::info!(
            "session started: {}x{} board, palette {}, {} moves, {:?} settle{}, high score {}",
            controller.config.grid_dimension,
            controller.config.grid_dimension,
            controller.config.palette_size,
            controller.config.starting_moves,
            controller.config.settle_strategy,
            if controller.config.is_synchronous() { " (synchronous)" } else { "" },
            controller.high_score
        );
        controller
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.state.moves_remaining
    }

    pub fn is_input_locked(&self) -> bool {
        self.state.is_input_locked
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over
    }

    /// High score read at session start, raised if this session beat it.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Match passes in the current (or last) combo.
    pub fn combo_passes(&self) -> u32 {
        self.combo_passes
    }

    /// The settle currently in flight, if any.
    pub fn settle_task(&self) -> Option<&SettleTask> {
        self.settle.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    /// Whether a swap request would currently be taken up.
    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Idle && !self.state.is_input_locked && !self.state.is_game_over
    }

    /// Ask for two adjacent tiles to be swapped.
    ///
    /// Malformed requests return `InvalidMove` and change nothing. Requests
    /// made while a cycle is in flight or after game over are `Ignored`.
    pub fn request_swap(&mut self, from: Position, to: Position) -> Result<SwapRequest, CascadeError> {
        if self.phase == GamePhase::Aborted {
            return Err(CascadeError::SessionAborted);
        }
        if !self.accepts_input() {
            log::debug!("swap {} -> {} dropped in phase {:?}", from, to, self.phase);
            return Ok(SwapRequest::Ignored);
        }
        if let Err(e) = self.board.validate_swap(from, to) {
            log::warn!("{}", e);
            return Err(e);
        }

        self.state.is_input_locked = true;
        self.phase = GamePhase::Swapping;
        self.presenter.present(GameEvent::SwapStarted { from, to });

        let anim = SwapAnim::new(from, to, self.config.swap_duration);
        let finished = anim.is_finished();
        self.swap = Some(anim);
        if finished {
            let result = self.finish_swap();
            self.guard(result)?;
        }
        self.rebuild_instances();
        Ok(SwapRequest::Started)
    }

    /// Advance the in-flight cycle by `dt` seconds. A no-op while idle or over.
    /// A negative or non-finite `dt` advances nothing.
    pub fn tick(&mut self, dt: f32) -> Result<(), CascadeError> {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("ignoring tick with dt {}", dt);
            0.0
        };
        let result = match self.phase {
            GamePhase::Idle | GamePhase::GameOver => Ok(()),
            GamePhase::Aborted => return Err(CascadeError::SessionAborted),
            GamePhase::Swapping => {
                let finished = match self.swap.as_mut() {
                    Some(anim) => !anim.tick(dt),
                    None => true,
                };
                if finished {
                    self.finish_swap()
                } else {
                    Ok(())
                }
            }
            GamePhase::Resolving => self.step_resolving(dt),
        };
        self.guard(result)?;
        self.rebuild_instances();
        Ok(())
    }

    /// Tick with a fixed `dt` until input unlocks. Returns the ticks taken;
    /// stops early after `max_ticks` with input still locked.
    pub fn run_until_idle(&mut self, dt: f32, max_ticks: usize) -> Result<usize, CascadeError> {
        let mut ticks = 0;
        while self.state.is_input_locked && ticks < max_ticks {
            self.tick(dt)?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Turn an internal failure into a dead session.
    fn guard<T>(&mut self, result: Result<T, CascadeError>) -> Result<T, CascadeError> {
        if let Err(e) = &result {
            log::error!("aborting session: {}", e);
            self.phase = GamePhase::Aborted;
            self.state.is_input_locked = true;
            self.swap = None;
            self.settle = None;
        }
        result
    }

    /// The swap tween has finished: apply the swap, then keep or revert it.
    fn finish_swap(&mut self) -> Result<(), CascadeError> {
        let anim = match self.swap.take() {
            Some(a) => a,
            None => {
                return Err(self.board.inconsistency("swap phase without a swap in flight".into()))
            }
        };
        let (from, to) = (anim.from, anim.to);

        self.board.swap(from, to)?;
        let matches = self.board.find_matches();

        if matches.is_empty() {
            self.board.swap(from, to)?;
            log::debug!("swap {} -> {} made no match, reverted", from, to);
            self.presenter.present(GameEvent::TileSwapped {
                from,
                to,
                accepted: false,
            });
            self.phase = GamePhase::Idle;
            self.state.is_input_locked = false;
            return Ok(());
        }

        self.state.moves_remaining = self.state.moves_remaining.saturating_sub(1);
        log::debug!(
            "swap {} -> {} accepted, {} moves left",
            from,
            to,
            self.state.moves_remaining
        );
        self.presenter.present(GameEvent::TileSwapped {
            from,
            to,
            accepted: true,
        });
        self.presenter
            .present(GameEvent::MovesChanged(self.state.moves_remaining));

        self.phase = GamePhase::Resolving;
        self.combo_passes = 0;
        self.remove_and_settle(matches)?;
        self.step_resolving(0.0)
    }

    fn remove_and_settle(&mut self, matches: MatchSet) -> Result<(), CascadeError> {
        self.combo_passes += 1;
        let removed = self.board.remove_all(&matches)?;
        self.state.score += removed.len() as u32;
        log::debug!(
            "combo pass {}: removed {} tiles, score {}",
            self.combo_passes,
            removed.len(),
            self.state.score
        );
        self.presenter
            .present(GameEvent::TilesRemoved(matches.positions()));
        self.presenter.present(GameEvent::ScoreChanged(self.state.score));

        self.presenter.present(GameEvent::SettleStarted);
        self.settle = Some(SettleTask::start(
            self.config.settle_strategy,
            &mut self.board,
        )?);
        Ok(())
    }

    /// Step the current settle; whenever one completes, re-match and either
    /// start the next pass or end the cycle. Yields while a settle is pending.
    fn step_resolving(&mut self, dt: f32) -> Result<(), CascadeError> {
        loop {
            let status = match self.settle.as_mut() {
                Some(task) => task.step(&mut self.board, dt)?,
                None => SettleStatus::Complete,
            };
            if status == SettleStatus::Pending {
                return Ok(());
            }

            self.settle = None;
            self.board.check_consistency()?;
            self.presenter.present(GameEvent::SettleCompleted);

            let matches = self.board.find_matches();
            if matches.is_empty() {
                self.finish_cycle();
                return Ok(());
            }

            self.remove_and_settle(matches)?;
            if !self.settle.as_ref().map_or(true, SettleTask::is_complete) {
                return Ok(());
            }
        }
    }

    fn finish_cycle(&mut self) {
        self.state.is_input_locked = false;

        if self.state.moves_remaining > 0 {
            self.phase = GamePhase::Idle;
            return;
        }

        self.phase = GamePhase::GameOver;
        self.state.is_game_over = true;

        let final_score = self.state.score;
        let new_record = final_score > self.high_score;
        if new_record {
            self.high_score = final_score;
            if let Err(e) = self.store.save(final_score) {
                log::warn!("could not persist high score {}: {}", final_score, e);
            }
        }
        log::info!(
            "game over: score {}, high score {}{}",
            final_score,
            self.high_score,
            if new_record { " (new record)" } else { "" }
        );
        self.presenter.present(GameEvent::GameOver {
            final_score,
            high_score: self.high_score,
            new_record,
        });
    }

    /// Rebuild the instance buffer from the board and any swap tween.
    fn rebuild_instances(&mut self) {
        self.instances.clear();
        let grid = self.board.grid();
        for p in grid.cells() {
            if let Some(tile) = grid.get(p) {
                let tweened = self.swap.as_ref().and_then(|anim| anim.visual_for(p));
                let visual = tweened.unwrap_or(tile.visual);
                let mut flags = FLAG_VISIBLE;
                if tweened.is_some() || !tile.is_at_rest() {
                    flags |= FLAG_ANIMATING;
                }
                self.instances.push(TileInstance {
                    x: visual.x,
                    y: visual.y,
                    kind: tile.kind.0 as u32,
                    flags,
                });
            }
        }
    }

    /// Per-tile render data, row-major from the bottom row.
    pub fn instances(&self) -> &[TileInstance] {
        &self.instances
    }

    /// The instance buffer as raw bytes for hosts that upload it directly.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use crate::highscore::MemoryHighScoreStore;
    use crate::systems::board::{Rng, SequenceRng};
    use crate::systems::settle::SettleStrategy;
    use pretty_assertions::assert_eq;

    type Controller = ComboController<EventLog, MemoryHighScoreStore>;

    // Palette 2, no runs. Swapping (0,1) with (0,2) completes row 1 (BBB);
    // the spawns after that pass (B, A, B) leave the board stable.
    const ONE_MATCH: [&str; 3] = ["BAB", "ABB", "ABA"];

    fn controller(rows: &[&str], spawns: Vec<u32>, config: GameConfig) -> Controller {
        let board = Board::from_layout(rows, 2, Box::new(SequenceRng::new(spawns))).unwrap();
        ComboController::with_board(board, config, EventLog::new(), MemoryHighScoreStore::default())
            .unwrap()
    }

    fn sync_config(moves: u32) -> GameConfig {
        GameConfig::synchronous(3, 2, moves)
    }

    #[test]
    fn starts_idle_with_full_budget() {
        let c = Controller::new(
            GameConfig::default(),
            Box::new(Rng::new(7)),
            EventLog::new(),
            MemoryHighScoreStore::default(),
        )
        .unwrap();
        assert_eq!(c.phase(), GamePhase::Idle);
        assert_eq!(c.score(), 0);
        assert_eq!(c.moves_remaining(), GameConfig::default().starting_moves);
        assert_eq!(c.instances().len(), 64);
        assert_eq!(c.instance_bytes().len(), 64 * 16);
        assert_eq!(std::mem::size_of::<TileInstance>(), 16);
        // Row-major from the bottom: the ninth instance is column 0 of row 1.
        let ninth = c.instances()[8];
        assert_eq!((ninth.x, ninth.y), (0.0, 1.0));
        assert_eq!(ninth.flags, FLAG_VISIBLE);
    }

    #[test]
    fn new_rejects_bad_config() {
        let config = GameConfig {
            palette_size: 2,
            ..GameConfig::default()
        };
        let result = Controller::new(
            config,
            Box::new(Rng::new(7)),
            EventLog::new(),
            MemoryHighScoreStore::default(),
        );
        assert!(matches!(result, Err(CascadeError::InvalidConfiguration(_))));
    }

    #[test]
    fn accepted_swap_scores_and_costs_a_move() {
        let mut c = controller(&ONE_MATCH, vec![1, 0, 1], sync_config(5));
        let outcome = c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert_eq!(outcome, SwapRequest::Started);
        assert_eq!(c.score(), 3);
        assert_eq!(c.moves_remaining(), 4);
        assert_eq!(c.phase(), GamePhase::Idle);
        assert!(!c.is_input_locked());
        assert_eq!(c.combo_passes(), 1);
        assert_eq!(c.board().to_string(), "BAB\nAAB\nABA\n");
    }

    #[test]
    fn accepted_swap_emits_events_in_order() {
        let mut c = controller(&ONE_MATCH, vec![1, 0, 1], sync_config(5));
        c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();
        let from = Position::new(0, 1);
        let to = Position::new(0, 2);
        assert_eq!(
            c.presenter_mut().drain(),
            vec![
                GameEvent::SwapStarted { from, to },
                GameEvent::TileSwapped { from, to, accepted: true },
                GameEvent::MovesChanged(4),
                GameEvent::TilesRemoved(vec![
                    Position::new(0, 1),
                    Position::new(1, 1),
                    Position::new(2, 1)
                ]),
                GameEvent::ScoreChanged(3),
                GameEvent::SettleStarted,
                GameEvent::SettleCompleted,
            ]
        );
    }

    #[test]
    fn rejected_swap_reverts_and_keeps_moves() {
        let mut c = controller(&ONE_MATCH, vec![0], sync_config(5));
        let before = c.board().to_string();
        c.request_swap(Position::new(0, 0), Position::new(1, 0)).unwrap();
        assert_eq!(c.board().to_string(), before);
        assert_eq!(c.moves_remaining(), 5);
        assert_eq!(c.score(), 0);
        assert_eq!(c.phase(), GamePhase::Idle);
        assert!(c.presenter().events().contains(&GameEvent::TileSwapped {
            from: Position::new(0, 0),
            to: Position::new(1, 0),
            accepted: false
        }));
    }

    #[test]
    fn invalid_requests_are_refused_without_mutation() {
        let mut c = controller(&ONE_MATCH, vec![0], sync_config(5));
        let before = c.board().to_string();
        assert!(matches!(
            c.request_swap(Position::new(0, 0), Position::new(1, 1)),
            Err(CascadeError::InvalidMove { .. })
        ));
        assert!(matches!(
            c.request_swap(Position::new(2, 2), Position::new(3, 2)),
            Err(CascadeError::InvalidMove { .. })
        ));
        assert_eq!(c.board().to_string(), before);
        assert_eq!(c.phase(), GamePhase::Idle);
        assert!(c.presenter().events().is_empty());
    }

    #[test]
    fn last_move_ends_the_game_and_records_high_score() {
        let mut c = controller(&ONE_MATCH, vec![1, 0, 1], sync_config(1));
        c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert_eq!(c.phase(), GamePhase::GameOver);
        assert!(c.is_game_over());
        assert_eq!(c.moves_remaining(), 0);
        assert_eq!(c.high_score(), 3);
        assert_eq!(c.store().high_score(), 3);
        assert_eq!(
            c.presenter().events().last(),
            Some(&GameEvent::GameOver {
                final_score: 3,
                high_score: 3,
                new_record: true
            })
        );

        let after = c.board().to_string();
        let outcome = c.request_swap(Position::new(0, 0), Position::new(1, 0)).unwrap();
        assert_eq!(outcome, SwapRequest::Ignored);
        assert_eq!(c.board().to_string(), after);
    }

    #[test]
    fn high_score_is_written_only_on_improvement() {
        let board = Board::from_layout(&ONE_MATCH, 2, Box::new(SequenceRng::new(vec![1, 0, 1]))).unwrap();
        let mut c = ComboController::with_board(
            board,
            sync_config(1),
            EventLog::new(),
            MemoryHighScoreStore::with_high_score(50),
        )
        .unwrap();
        c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert!(c.is_game_over());
        assert_eq!(c.store().saves(), 0);
        assert_eq!(c.high_score(), 50);
    }

    #[test]
    fn swap_tween_locks_input_until_it_ends() {
        let config = GameConfig {
            swap_duration: 0.5,
            ..sync_config(5)
        };
        let mut c = controller(&ONE_MATCH, vec![1, 0, 1], config);
        c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert_eq!(c.phase(), GamePhase::Swapping);
        assert!(c.is_input_locked());
        assert!(c.instances().iter().any(|i| i.flags & FLAG_ANIMATING != 0));

        let before = c.board().to_string();
        let outcome = c.request_swap(Position::new(1, 0), Position::new(2, 0)).unwrap();
        assert_eq!(outcome, SwapRequest::Ignored);
        assert_eq!(c.board().to_string(), before);
        assert_eq!(c.moves_remaining(), 5);

        c.tick(0.25).unwrap();
        assert_eq!(c.phase(), GamePhase::Swapping);
        c.tick(0.25).unwrap();
        assert_eq!(c.phase(), GamePhase::Idle);
        assert_eq!(c.score(), 3);
        assert!(c.instances().iter().all(|i| i.flags == FLAG_VISIBLE));
    }

    #[test]
    fn free_fall_session_resolves_over_ticks() {
        let config = GameConfig {
            settle_strategy: SettleStrategy::FreeFall,
            ..sync_config(5)
        };
        let mut c = controller(&ONE_MATCH, vec![1, 0, 1], config);
        c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert_eq!(c.phase(), GamePhase::Resolving);
        assert!(c.is_input_locked());
        assert!(c.settle_task().is_some());

        let ticks = c.run_until_idle(1.0 / 60.0, 2_000).unwrap();
        assert!(ticks > 1);
        assert_eq!(c.phase(), GamePhase::Idle);
        assert_eq!(c.score(), 3);
        assert_eq!(c.board().to_string(), "BAB\nAAB\nABA\n");
        assert!(c.board().grid().tiles().all(|t| t.is_at_rest()));
    }

    #[test]
    fn bad_dt_does_not_wedge_a_free_fall() {
        let config = GameConfig {
            settle_strategy: SettleStrategy::FreeFall,
            ..sync_config(5)
        };
        let mut c = controller(&ONE_MATCH, vec![1, 0, 1], config);
        c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert_eq!(c.phase(), GamePhase::Resolving);

        c.tick(f32::NAN).unwrap();
        c.tick(-1.0).unwrap();
        c.tick(f32::INFINITY).unwrap();
        assert!(c.board().grid().tiles().all(|t| t.visual.y.is_finite()));

        c.run_until_idle(1.0 / 60.0, 2_000).unwrap();
        assert_eq!(c.phase(), GamePhase::Idle);
        assert_eq!(c.board().to_string(), "BAB\nAAB\nABA\n");
    }

    #[test]
    fn inconsistent_board_aborts_the_session() {
        let config = GameConfig {
            swap_duration: 0.5,
            ..sync_config(5)
        };
        let mut c = controller(&ONE_MATCH, vec![1, 0, 1], config);
        c.request_swap(Position::new(0, 1), Position::new(0, 2)).unwrap();

        // Two cells now claim the same identity; the swap itself is unaffected.
        let dup = c.board.grid().get(Position::new(0, 0)).unwrap().id;
        c.board.grid_mut().get_mut(Position::new(2, 2)).unwrap().id = dup;

        let err = c.tick(0.5).unwrap_err();
        match err {
            CascadeError::InconsistentBoardState { detail, dump } => {
                assert!(detail.contains("twice"), "{}", detail);
                assert_eq!(dump.lines().count(), 3);
            }
            other => panic!("expected inconsistency, got {:?}", other),
        }
        assert_eq!(c.phase(), GamePhase::Aborted);
        assert!(c.is_input_locked());
        assert!(!c.accepts_input());
        assert!(c.settle_task().is_none());

        assert_eq!(c.tick(1.0 / 60.0), Err(CascadeError::SessionAborted));
        assert_eq!(
            c.request_swap(Position::new(0, 0), Position::new(1, 0)),
            Err(CascadeError::SessionAborted)
        );
        assert_eq!(c.run_until_idle(1.0 / 60.0, 10), Err(CascadeError::SessionAborted));
    }

    #[test]
    fn tick_while_idle_changes_nothing() {
        let mut c = controller(&ONE_MATCH, vec![0], sync_config(5));
        let before = c.board().to_string();
        c.tick(1.0).unwrap();
        assert_eq!(c.board().to_string(), before);
        assert_eq!(c.phase(), GamePhase::Idle);
    }

    #[test]
    fn with_board_rejects_incomplete_board() {
        let mut board = Board::from_layout(&ONE_MATCH, 2, Box::new(Rng::new(1))).unwrap();
        board.grid_mut().take(Position::new(1, 1));
        let result = ComboController::with_board(
            board,
            sync_config(5),
            EventLog::new(),
            MemoryHighScoreStore::default(),
        );
        assert!(matches!(
            result,
            Err(CascadeError::InconsistentBoardState { .. })
        ));
    }
}
