use crate::components::{Position, SoundCue};
use crate::error::CascadeError;
use crate::events::Presenter;
use crate::highscore::HighScoreStore;
use crate::state::{ComboController, SwapRequest};

/// Whatever a selection can be routed into. Implemented by the controller.
pub trait SwapTarget {
    fn accepts_input(&self) -> bool;
    fn contains(&self, p: Position) -> bool;
    fn request_swap(&mut self, from: Position, to: Position) -> Result<SwapRequest, CascadeError>;
}

impl<P: Presenter, H: HighScoreStore> SwapTarget for ComboController<P, H> {
    fn accepts_input(&self) -> bool {
        ComboController::accepts_input(self)
    }

    fn contains(&self, p: Position) -> bool {
        self.board().grid().in_bounds(p)
    }

    fn request_swap(&mut self, from: Position, to: Position) -> Result<SwapRequest, CascadeError> {
        ComboController::request_swap(self, from, to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Dropped: input locked, game over, or off the board.
    Ignored,
    /// Now the pending tile.
    Selected(Position),
    /// Second tile was adjacent to the pending one; a swap was requested.
    SwapRequested {
        from: Position,
        to: Position,
        request: SwapRequest,
    },
}

impl SelectionOutcome {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            SelectionOutcome::Ignored => None,
            _ => Some(SoundCue::Select),
        }
    }
}

/// Two-tap input: the first tap marks a tile, a second tap on an adjacent tile
/// swaps the pair. Any other second tap moves the mark.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pending: Option<Position>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<Position> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn on_tile_selected<T: SwapTarget>(
        &mut self,
        p: Position,
        target: &mut T,
    ) -> Result<SelectionOutcome, CascadeError> {
        if !target.accepts_input() || !target.contains(p) {
            return Ok(SelectionOutcome::Ignored);
        }

        match self.pending {
            Some(from) if from.is_adjacent(p) => {
                self.pending = None;
                let request = target.request_swap(from, p)?;
                Ok(SelectionOutcome::SwapRequested { from, to: p, request })
            }
            _ => {
                self.pending = Some(p);
                Ok(SelectionOutcome::Selected(p))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        locked: bool,
        requests: Vec<(Position, Position)>,
    }

    impl SwapTarget for Recorder {
        fn accepts_input(&self) -> bool {
            !self.locked
        }

        fn contains(&self, p: Position) -> bool {
            (0..4).contains(&p.column) && (0..4).contains(&p.row)
        }

        fn request_swap(&mut self, from: Position, to: Position) -> Result<SwapRequest, CascadeError> {
            self.requests.push((from, to));
            Ok(SwapRequest::Started)
        }
    }

    #[test]
    fn adjacent_second_tap_requests_swap() {
        let mut target = Recorder::default();
        let mut sel = Selection::new();
        let a = Position::new(1, 1);
        let b = Position::new(1, 2);
        assert_eq!(sel.on_tile_selected(a, &mut target).unwrap(), SelectionOutcome::Selected(a));
        assert_eq!(
            sel.on_tile_selected(b, &mut target).unwrap(),
            SelectionOutcome::SwapRequested {
                from: a,
                to: b,
                request: SwapRequest::Started
            }
        );
        assert_eq!(target.requests, vec![(a, b)]);
        assert_eq!(sel.pending(), None);
    }

    #[test]
    fn far_second_tap_moves_the_mark() {
        let mut target = Recorder::default();
        let mut sel = Selection::new();
        sel.on_tile_selected(Position::new(0, 0), &mut target).unwrap();
        let outcome = sel.on_tile_selected(Position::new(2, 2), &mut target).unwrap();
        assert_eq!(outcome, SelectionOutcome::Selected(Position::new(2, 2)));
        assert!(target.requests.is_empty());
    }

    #[test]
    fn same_tile_stays_selected() {
        let mut target = Recorder::default();
        let mut sel = Selection::new();
        let p = Position::new(3, 3);
        sel.on_tile_selected(p, &mut target).unwrap();
        sel.on_tile_selected(p, &mut target).unwrap();
        assert_eq!(sel.pending(), Some(p));
        assert!(target.requests.is_empty());
    }

    #[test]
    fn locked_or_off_board_taps_are_ignored() {
        let mut target = Recorder::default();
        let mut sel = Selection::new();
        let off = sel.on_tile_selected(Position::new(4, 0), &mut target).unwrap();
        assert_eq!(off, SelectionOutcome::Ignored);
        assert_eq!(off.sound_cue(), None);

        sel.on_tile_selected(Position::new(0, 0), &mut target).unwrap();
        target.locked = true;
        let locked = sel.on_tile_selected(Position::new(1, 0), &mut target).unwrap();
        assert_eq!(locked, SelectionOutcome::Ignored);
        assert_eq!(sel.pending(), Some(Position::new(0, 0)));
        assert!(target.requests.is_empty());
    }
}
