use crate::components::{Position, SoundCue};

/// Observable state changes emitted by the combo controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A structurally valid swap was accepted for evaluation and its tween began.
    SwapStarted { from: Position, to: Position },
    /// The swap was evaluated. `accepted == false` means it was reverted.
    TileSwapped {
        from: Position,
        to: Position,
        accepted: bool,
    },
    ScoreChanged(u32),
    MovesChanged(u32),
    TilesRemoved(Vec<Position>),
    SettleStarted,
    SettleCompleted,
    GameOver {
        final_score: u32,
        high_score: u32,
        new_record: bool,
    },
}

impl GameEvent {
    /// The audio cue a host would play for this event, if any.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::SwapStarted { .. } => Some(SoundCue::Move),
            GameEvent::TileSwapped { accepted: false, .. } => Some(SoundCue::NoMatch),
            GameEvent::TilesRemoved(_) => Some(SoundCue::Pop),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}

/// Receives controller events. Implementations own rendering, animation and
/// audio, and never touch the board.
pub trait Presenter {
    fn present(&mut self, event: GameEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _event: GameEvent) {}
}

/// Buffers events until the host drains them.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Presenter for EventLog {
    fn present(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_follow_events() {
        let p = Position::new(0, 0);
        let q = Position::new(1, 0);
        assert_eq!(
            GameEvent::SwapStarted { from: p, to: q }.sound_cue(),
            Some(SoundCue::Move)
        );
        assert_eq!(
            GameEvent::TileSwapped { from: p, to: q, accepted: false }.sound_cue(),
            Some(SoundCue::NoMatch)
        );
        assert_eq!(
            GameEvent::TileSwapped { from: p, to: q, accepted: true }.sound_cue(),
            None
        );
        assert_eq!(GameEvent::ScoreChanged(3).sound_cue(), None);
    }

    #[test]
    fn event_log_drains() {
        let mut log = EventLog::new();
        log.present(GameEvent::SettleStarted);
        log.present(GameEvent::SettleCompleted);
        assert_eq!(log.events().len(), 2);
        let drained = log.drain();
        assert_eq!(drained, vec![GameEvent::SettleStarted, GameEvent::SettleCompleted]);
        assert!(log.events().is_empty());
    }
}
