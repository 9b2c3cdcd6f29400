//! Position evaluation

use crate::board::Player;
use crate::state::{Snapshot, Winner};
use serde::{Deserialize, Serialize};

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Weight for the store difference
    pub store_weight: f32,
    /// Weight for stones still on each side of the board
    pub side_weight: f32,
    /// Weight for pits that would sow exactly into the store
    pub extra_turn_weight: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            store_weight: 1.0,
            side_weight: 0.25,
            extra_turn_weight: 0.5,
        }
    }
}

/// Win value (effectively infinite)
pub const WIN_VALUE: f32 = 100000.0;

/// Evaluate position from the perspective of the player to move
pub fn evaluate(snapshot: &Snapshot, heuristics: &Heuristics) -> f32 {
    let current = snapshot.current_player;
    let opponent = current.opponent();

    let store_diff = snapshot.store(current) as f32 - snapshot.store(opponent) as f32;
    let side_diff = side_total(snapshot, current) - side_total(snapshot, opponent);
    let extra_diff = extra_turn_pits(snapshot, current) as f32
        - extra_turn_pits(snapshot, opponent) as f32;

    heuristics.store_weight * store_diff
        + heuristics.side_weight * side_diff
        + heuristics.extra_turn_weight * extra_diff
}

/// Score for a finished game from `perspective`'s point of view.
/// Wins found at higher remaining depth (sooner) score higher.
pub fn evaluate_terminal(winner: Winner, perspective: Player, depth: i32) -> f32 {
    let won = match (winner, perspective) {
        (Winner::Draw, _) => return 0.0,
        (Winner::Player1, Player::Player1) | (Winner::Player2, Player::Player2) => true,
        _ => false,
    };

    if won {
        WIN_VALUE + depth as f32
    } else {
        -WIN_VALUE - depth as f32
    }
}

/// Pits whose stone count reaches the owner's store exactly
pub fn extra_turn_pits(snapshot: &Snapshot, player: Player) -> usize {
    let store = player.store();
    player
        .pits()
        .filter(|&p| snapshot.pits[p] as usize == store - p)
        .count()
}

fn side_total(snapshot: &Snapshot, player: Player) -> f32 {
    player.pits().map(|p| snapshot.pits[p] as f32).sum()
}
