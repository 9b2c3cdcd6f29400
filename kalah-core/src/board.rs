//! Pit topology for the standard 6-pit Kalah board

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Total positions on the board (12 pits + 2 stores)
pub const NUM_PITS: usize = 14;

/// Sowing pits per player
pub const PITS_PER_SIDE: usize = 6;

/// Player 1 store (Kalah)
pub const PLAYER1_STORE: usize = 6;

/// Player 2 store (Kalah)
pub const PLAYER2_STORE: usize = 13;

/// Stones placed in every sowing pit at game start
pub const DEFAULT_STONES_PER_PIT: u8 = 6;

/// Largest starting count. Twelve pits of 20 (240) still fit one `u8` pit.
pub const MAX_STONES_PER_PIT: u8 = 20;

/// Stone counts for all 14 positions, indexed 0-13
pub type Pits = [u8; NUM_PITS];

/// Player to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1 = 0,
    Player2 = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Index of this player's store
    pub fn store(self) -> usize {
        match self {
            Player::Player1 => PLAYER1_STORE,
            Player::Player2 => PLAYER2_STORE,
        }
    }

    /// This player's six sowing pits
    pub fn pits(self) -> RangeInclusive<usize> {
        match self {
            Player::Player1 => 0..=5,
            Player::Player2 => 7..=12,
        }
    }

    /// True if `pit` is one of this player's sowing pits (stores excluded)
    pub fn owns_pit(self, pit: usize) -> bool {
        self.pits().contains(&pit)
    }
}

/// Pit directly across the board. Opposite pairs sum to 12.
pub fn opposite_pit(pit: usize) -> usize {
    debug_assert!(pit != PLAYER1_STORE && pit < PLAYER2_STORE, "stores have no opposite");
    2 * PITS_PER_SIDE - pit
}

/// Next landing position when `mover` sows out of `pit`.
/// Skips the opponent's store, never the mover's own.
pub fn next_pit(pit: usize, mover: Player) -> usize {
    let next = (pit + 1) % NUM_PITS;
    if next == mover.opponent().store() {
        (next + 1) % NUM_PITS
    } else {
        next
    }
}

/// Initial layout: `stones_per_pit` in every sowing pit, empty stores
pub fn initial_pits(stones_per_pit: u8) -> Pits {
    let mut pits = [stones_per_pit; NUM_PITS];
    pits[PLAYER1_STORE] = 0;
    pits[PLAYER2_STORE] = 0;
    pits
}

/// Sum of all positions on the board
pub fn total_stones(pits: &Pits) -> u16 {
    pits.iter().map(|&s| s as u16).sum()
}

/// Stones left in a player's six sowing pits
pub fn side_stones(pits: &Pits, player: Player) -> u16 {
    player.pits().map(|p| pits[p] as u16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership() {
        assert!(Player::Player1.owns_pit(0));
        assert!(Player::Player1.owns_pit(5));
        assert!(!Player::Player1.owns_pit(6)); // store is not a source
        assert!(!Player::Player1.owns_pit(8));
        assert!(Player::Player2.owns_pit(7));
        assert!(Player::Player2.owns_pit(12));
        assert!(!Player::Player2.owns_pit(13));
    }

    #[test]
    fn test_opposite_pairs() {
        assert_eq!(opposite_pit(0), 12);
        assert_eq!(opposite_pit(5), 7);
        assert_eq!(opposite_pit(7), 5);
        assert_eq!(opposite_pit(12), 0);
        for pit in Player::Player1.pits() {
            assert!(Player::Player2.owns_pit(opposite_pit(pit)));
        }
    }

    #[test]
    fn test_next_pit_skips_opponent_store() {
        assert_eq!(next_pit(5, Player::Player1), 6);
        assert_eq!(next_pit(12, Player::Player1), 0); // 13 skipped
        assert_eq!(next_pit(12, Player::Player2), 13);
        assert_eq!(next_pit(5, Player::Player2), 7); // 6 skipped
        assert_eq!(next_pit(13, Player::Player2), 0);
    }

    #[test]
    fn test_initial_layout() {
        let pits = initial_pits(DEFAULT_STONES_PER_PIT);
        assert_eq!(total_stones(&pits), 72);
        assert_eq!(pits[PLAYER1_STORE], 0);
        assert_eq!(pits[PLAYER2_STORE], 0);
        assert_eq!(side_stones(&pits, Player::Player1), 36);
        assert_eq!(side_stones(&pits, Player::Player2), 36);
    }
}
