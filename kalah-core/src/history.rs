//! Move history, post-game review and replay
//!
//! History is append-only and stores a full snapshot per move, so review is
//! a lookup rather than a re-simulation. Replay re-derives a game from its
//! sequence of source pits and is used to check recorded snapshots.

use crate::board::Player;
use crate::error::{HistoryError, MoveRejection};
use crate::rules::validate_and_apply;
use crate::state::{BoardState, Snapshot};
use serde::{Deserialize, Serialize};

/// Special rule triggered by a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialEvent {
    ExtraTurn,
    Capture { stones_captured: u8 },
}

/// One applied move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mover: Player,
    pub pit: usize,
    pub stones_moved: u8,
    /// Board and side to move right after sowing and capture
    pub snapshot: Snapshot,
    pub special_event: Option<SpecialEvent>,
}

// ============================================================================
// REVIEW
// ============================================================================

/// `InvalidHistoryIndex` reason while the game is still being played
pub const GAME_IN_PROGRESS: &str = "game still in progress";

/// `InvalidHistoryIndex` reason for an index past the last move
pub const OUT_OF_RANGE: &str = "out of range";

/// Board as it stood just after move `index`. Only available once the game
/// is over.
pub fn review(state: &BoardState, index: usize) -> Result<Snapshot, HistoryError> {
    if !state.is_game_over() {
        return Err(HistoryError::InvalidHistoryIndex {
            index,
            reason: GAME_IN_PROGRESS,
        });
    }

    state
        .history()
        .get(index)
        .map(|record| record.snapshot)
        .ok_or(HistoryError::InvalidHistoryIndex {
            index,
            reason: OUT_OF_RANGE,
        })
}

impl BoardState {
    /// See [`review`]
    pub fn review(&self, index: usize) -> Result<Snapshot, HistoryError> {
        review(self, index)
    }
}

/// Read-only cursor for stepping through a finished game
#[derive(Clone, Debug)]
pub struct HistoryCursor<'a> {
    state: &'a BoardState,
    index: usize,
}

impl<'a> HistoryCursor<'a> {
    /// Cursor on the final recorded move
    pub fn new(state: &'a BoardState) -> Result<Self, HistoryError> {
        let last = state.history().len().saturating_sub(1);
        review(state, last)?;
        Ok(Self { state, index: last })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.state.history().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.history().is_empty()
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.len()
    }

    pub fn record(&self) -> &'a MoveRecord {
        &self.state.history()[self.index]
    }

    pub fn snapshot(&self) -> Snapshot {
        self.record().snapshot
    }

    pub fn backward(&mut self) -> Option<Snapshot> {
        if self.at_start() {
            return None;
        }
        self.index -= 1;
        Some(self.snapshot())
    }

    pub fn forward(&mut self) -> Option<Snapshot> {
        if self.at_end() {
            return None;
        }
        self.index += 1;
        Some(self.snapshot())
    }

    pub fn goto(&mut self, index: usize) -> Result<Snapshot, HistoryError> {
        let snapshot = review(self.state, index)?;
        self.index = index;
        Ok(snapshot)
    }
}

// ============================================================================
// REPLAY
// ============================================================================

/// Play `moves` (source pits, in order) on top of `start`
pub fn replay(start: BoardState, moves: &[usize]) -> Result<BoardState, MoveRejection> {
    moves.iter().try_fold(start, |state, &pit| {
        validate_and_apply(&state, pit).map(|(next, _)| next)
    })
}

/// A recorded move whose snapshot disagrees with a fresh replay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayMismatch {
    pub index: usize,
    pub recorded: Snapshot,
    pub replayed: Option<Snapshot>,
}

/// Re-play a state's history from its origin and compare every snapshot
pub fn verify(state: &BoardState) -> Result<(), ReplayMismatch> {
    let origin = state.origin();
    let mut current = BoardState::from_position(
        origin.pits,
        origin.current_player,
        state.mode(),
        state.stones_per_pit(),
    );

    for (index, record) in state.history().iter().enumerate() {
        let replayed = validate_and_apply(&current, record.pit).ok();
        let mismatch = |replayed: Option<Snapshot>| ReplayMismatch {
            index,
            recorded: record.snapshot,
            replayed,
        };

        match replayed {
            Some((next, _)) => {
                let replayed_record = &next.history()[index];
                if replayed_record != record {
                    return Err(mismatch(Some(replayed_record.snapshot)));
                }
                current = next;
            }
            None => return Err(mismatch(None)),
        }
    }

    if current.pits() != state.pits() || current.result() != state.result() {
        return Err(ReplayMismatch {
            index: state.history().len(),
            recorded: state.snapshot(),
            replayed: Some(current.snapshot()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameMode;

    /// Short game ending with Player 1's side empty
    fn finished_game() -> BoardState {
        let pits = [0, 0, 0, 0, 2, 1, 29, 3, 2, 1, 0, 4, 1, 29];
        let start = BoardState::from_position(pits, Player::Player1, GameMode::PlayerVsPlayer, 6);
        // 5 -> store (extra turn), 4 -> 5, store
        replay(start, &[5, 4, 5]).unwrap()
    }

    #[test]
    fn test_finished_fixture() {
        let state = finished_game();
        assert!(state.is_game_over());
        assert_eq!(state.history().len(), 3);
    }

    #[test]
    fn test_review_requires_game_over() {
        let state = BoardState::new(GameMode::PlayerVsPlayer);
        let (state, _) = state.apply_move(2).unwrap();
        assert_eq!(
            state.review(0),
            Err(HistoryError::InvalidHistoryIndex {
                index: 0,
                reason: GAME_IN_PROGRESS
            })
        );
    }

    #[test]
    fn test_review_returns_snapshot() {
        let state = finished_game();
        let first = state.review(0).unwrap();
        assert_eq!(first, state.history()[0].snapshot);
        assert_eq!(first.current_player, Player::Player1);
        assert_eq!(first.pits[5], 0);

        assert!(matches!(
            state.review(3),
            Err(HistoryError::InvalidHistoryIndex { index: 3, .. })
        ));
    }

    #[test]
    fn test_review_does_not_mutate() {
        let state = finished_game();
        let before = state.clone();
        let _ = state.review(1);
        assert_eq!(state, before);
    }

    #[test]
    fn test_cursor_navigation() {
        let state = finished_game();
        let mut cursor = HistoryCursor::new(&state).unwrap();
        assert_eq!(cursor.index(), 2);
        assert!(cursor.at_end());
        assert!(cursor.forward().is_none());

        assert_eq!(cursor.backward(), Some(state.history()[1].snapshot));
        assert_eq!(cursor.backward(), Some(state.history()[0].snapshot));
        assert!(cursor.at_start());
        assert!(cursor.backward().is_none());

        assert_eq!(cursor.goto(2).unwrap(), state.history()[2].snapshot);
        assert!(cursor.goto(7).is_err());
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_cursor_refused_mid_game() {
        let state = BoardState::new(GameMode::PlayerVsPlayer);
        assert!(HistoryCursor::new(&state).is_err());
    }

    #[test]
    fn test_replay_stops_at_rejection() {
        let start = BoardState::new(GameMode::PlayerVsPlayer);
        // 0 earns an extra turn, so 0 again is an empty pit
        assert_eq!(
            replay(start, &[0, 0]).unwrap_err(),
            MoveRejection::EmptyPit { pit: 0 }
        );
    }

    #[test]
    fn test_verify_accepts_real_history() {
        let start = BoardState::new(GameMode::PlayerVsPlayer);
        let state = replay(start, &[0, 3, 9, 1]).unwrap();
        assert_eq!(verify(&state), Ok(()));
        assert_eq!(verify(&finished_game()), Ok(()));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let start = BoardState::new(GameMode::PlayerVsPlayer);
        let mut state = replay(start, &[0, 3]).unwrap();
        state.history[1].snapshot.pits[0] = 9;

        let mismatch = verify(&state).unwrap_err();
        assert_eq!(mismatch.index, 1);
    }
}
