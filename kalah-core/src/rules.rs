//! Rules engine: move validation, sowing, special rules and end of game
//!
//! Every transition here is a pure function of its input. `validate_and_apply`
//! never touches the state it is given; it returns a new one.

use crate::board::{next_pit, opposite_pit, side_stones, total_stones, Pits, Player};
use crate::error::MoveRejection;
use crate::history::{MoveRecord, SpecialEvent};
use crate::state::{BoardState, Capture, GameResult, Snapshot, Winner};
use serde::{Deserialize, Serialize};

// ============================================================================
// OUTCOME TYPES
// ============================================================================

/// Stones swept into the stores when one side runs dry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sweep {
    pub player1_swept: u16,
    pub player2_swept: u16,
    pub winner: Winner,
}

/// Everything a renderer needs to animate one move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub mover: Player,
    pub pit: usize,
    pub stones_moved: u8,
    /// Landing positions in sowing order, one entry per stone
    pub sown: Vec<usize>,
    pub last_pit: usize,
    pub special_event: Option<SpecialEvent>,
    pub capture: Option<Capture>,
    pub next_player: Player,
    pub sweep: Option<Sweep>,
}

/// Result of a move on a bare snapshot, for search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotMove {
    pub snapshot: Snapshot,
    pub special_event: Option<SpecialEvent>,
    pub finished: Option<Winner>,
}

/// Raw effect of sowing one pit
#[derive(Clone, Copy, Debug)]
struct Sown {
    stones_moved: u8,
    last_pit: usize,
    special_event: Option<SpecialEvent>,
    capture: Option<Capture>,
    next_player: Player,
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check the preconditions for playing `pit`, in order
pub fn validate(state: &BoardState, pit: usize) -> Result<(), MoveRejection> {
    if state.is_game_over() {
        return Err(MoveRejection::GameAlreadyOver);
    }

    let mover = state.current_player();
    if !mover.owns_pit(pit) {
        return Err(MoveRejection::NotOwnedByMover { pit, mover });
    }

    if state.pits[pit] == 0 {
        return Err(MoveRejection::EmptyPit { pit });
    }

    Ok(())
}

// ============================================================================
// APPLY MOVE
// ============================================================================

/// Validate and play `pit` for the player to move.
///
/// On success returns the successor state (history extended by one record,
/// end of game resolved) and a description of the move.
pub fn validate_and_apply(
    state: &BoardState,
    pit: usize,
) -> Result<(BoardState, MoveOutcome), MoveRejection> {
    validate(state, pit)?;

    let mover = state.current_player();
    let stones = state.pits[pit];

    let mut next = state.clone();
    let sown = sow(&mut next.pits, mover, pit);
    debug_assert_eq!(
        total_stones(&next.pits),
        state.expected_total(),
        "sowing broke stone conservation"
    );

    next.current_player = sown.next_player;
    next.last_capture = sown.capture;
    next.history.push(MoveRecord {
        mover,
        pit,
        stones_moved: sown.stones_moved,
        snapshot: next.snapshot(),
        special_event: sown.special_event,
    });

    let sweep = detect_end_game(&mut next);

    let outcome = MoveOutcome {
        mover,
        pit,
        stones_moved: stones,
        sown: sowing_path(pit, mover, stones),
        last_pit: sown.last_pit,
        special_event: sown.special_event,
        capture: sown.capture,
        next_player: sown.next_player,
        sweep,
    };

    Ok((next, outcome))
}

impl BoardState {
    /// Apply move, return new state. See [`validate_and_apply`].
    pub fn apply_move(&self, pit: usize) -> Result<(BoardState, MoveOutcome), MoveRejection> {
        validate_and_apply(self, pit)
    }

    /// Drop the capture highlight once it has been shown
    pub(crate) fn clear_capture(&mut self) {
        self.last_capture = None;
    }
}

/// End the game if either side has no stones left.
///
/// Each player's remaining stones go straight into their own store. Returns
/// the sweep that happened, or `None` if the game continues or was already
/// over.
pub fn detect_end_game(state: &mut BoardState) -> Option<Sweep> {
    if state.is_game_over() {
        return None;
    }

    let sweep = sweep_if_finished(&mut state.pits)?;
    debug_assert_eq!(
        total_stones(&state.pits),
        state.expected_total(),
        "sweep broke stone conservation"
    );

    state.result = GameResult::Finished(sweep.winner);
    state.last_capture = None;
    Some(sweep)
}

/// Play a legal pit on a snapshot, without history. Returns `None` for an
/// illegal pit.
pub fn play_snapshot(snapshot: &Snapshot, pit: usize) -> Option<SnapshotMove> {
    let mover = snapshot.current_player;
    if !mover.owns_pit(pit) || snapshot.pits[pit] == 0 {
        return None;
    }

    let mut pits = snapshot.pits;
    let sown = sow(&mut pits, mover, pit);
    let finished = sweep_if_finished(&mut pits).map(|s| s.winner);

    Some(SnapshotMove {
        snapshot: Snapshot {
            pits,
            current_player: sown.next_player,
        },
        special_event: sown.special_event,
        finished,
    })
}

/// Landing positions for `stones` sown out of `pit` by `mover`
pub fn sowing_path(pit: usize, mover: Player, stones: u8) -> Vec<usize> {
    let mut path = Vec::with_capacity(stones as usize);
    let mut current = pit;
    for _ in 0..stones {
        current = next_pit(current, mover);
        path.push(current);
    }
    path
}

// ============================================================================
// SOWING AND SPECIAL RULES
// ============================================================================

fn sow(pits: &mut Pits, mover: Player, pit: usize) -> Sown {
    let stones = pits[pit];
    pits[pit] = 0;

    let mut current = pit;
    for _ in 0..stones {
        current = next_pit(current, mover);
        pits[current] += 1;
    }

    let store = mover.store();

    // Extra turn takes priority; no capture check
    if current == store {
        return Sown {
            stones_moved: stones,
            last_pit: current,
            special_event: Some(SpecialEvent::ExtraTurn),
            capture: None,
            next_player: mover,
        };
    }

    let mut special_event = None;
    let mut capture = None;

    if mover.owns_pit(current) && pits[current] == 1 {
        let opposite = opposite_pit(current);
        if pits[opposite] > 0 {
            let captured = pits[opposite] + 1;
            pits[opposite] = 0;
            pits[current] = 0;
            pits[store] += captured;

            special_event = Some(SpecialEvent::Capture {
                stones_captured: captured,
            });
            capture = Some(Capture {
                source_pit: current,
                opposite_pit: opposite,
                store_pit: store,
            });
        }
    }

    Sown {
        stones_moved: stones,
        last_pit: current,
        special_event,
        capture,
        next_player: mover.opponent(),
    }
}

fn sweep_if_finished(pits: &mut Pits) -> Option<Sweep> {
    let player1_swept = side_stones(pits, Player::Player1);
    let player2_swept = side_stones(pits, Player::Player2);

    if player1_swept != 0 && player2_swept != 0 {
        return None;
    }

    for player in [Player::Player1, Player::Player2] {
        let remaining: u8 = player.pits().map(|p| std::mem::take(&mut pits[p])).sum();
        pits[player.store()] += remaining;
    }

    let score1 = pits[Player::Player1.store()];
    let score2 = pits[Player::Player2.store()];
    let winner = if score1 > score2 {
        Winner::Player1
    } else if score2 > score1 {
        Winner::Player2
    } else {
        Winner::Draw
    };

    Some(Sweep {
        player1_swept,
        player2_swept,
        winner,
    })
}

// ============================================================================
// TESTS
// ============================================================================
