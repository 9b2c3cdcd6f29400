//! Board state and read-only queries
//!
//! Fields are only written by the rules engine (`crate::rules`). Everything
//! public here is a query.

use crate::board::{
    initial_pits, side_stones, total_stones, Pits, Player, DEFAULT_STONES_PER_PIT,
    MAX_STONES_PER_PIT, PITS_PER_SIDE,
};
use crate::history::MoveRecord;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Who the second seat belongs to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    PlayerVsPlayer,
    PlayerVsAi,
}

/// Final outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player1,
    Player2,
    Draw,
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Finished(Winner),
}

/// Positions involved in the most recent capture (for highlighting)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub source_pit: usize,
    pub opposite_pit: usize,
    pub store_pit: usize,
}

/// Pits plus side to move. The unit of history and of move-provider input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub pits: Pits,
    pub current_player: Player,
}

impl Snapshot {
    /// Non-empty sowing pits of the player to move
    pub fn legal_pits(&self) -> Vec<usize> {
        self.current_player
            .pits()
            .filter(|&p| self.pits[p] > 0)
            .collect()
    }

    pub fn store(&self, player: Player) -> u8 {
        self.pits[player.store()]
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Authoritative game state (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub(crate) pits: Pits,
    pub(crate) current_player: Player,
    pub(crate) result: GameResult,
    pub(crate) mode: GameMode,
    pub(crate) stones_per_pit: u8,
    pub(crate) last_capture: Option<Capture>,
    /// Position the history starts from
    pub(crate) origin: Snapshot,
    pub(crate) history: Vec<MoveRecord>,
}

impl BoardState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game with the standard six stones per pit
    pub fn new(mode: GameMode) -> Self {
        Self::with_stones(mode, DEFAULT_STONES_PER_PIT)
    }

    /// Fresh game, Player 1 to move
    pub fn with_stones(mode: GameMode, stones_per_pit: u8) -> Self {
        Self::from_position(initial_pits(stones_per_pit), Player::Player1, mode, stones_per_pit)
    }

    /// Start from an arbitrary mid-game position.
    ///
    /// # Panics
    ///
    /// If `stones_per_pit` is outside `1..=MAX_STONES_PER_PIT`, or the stones
    /// on the board do not add up to `2 * 6 * stones_per_pit`. Both are
    /// programming errors, never a consequence of live input.
    pub fn from_position(
        pits: Pits,
        current_player: Player,
        mode: GameMode,
        stones_per_pit: u8,
    ) -> Self {
        assert!(
            (1..=MAX_STONES_PER_PIT).contains(&stones_per_pit),
            "stones_per_pit must be between 1 and {}, got {}",
            MAX_STONES_PER_PIT,
            stones_per_pit
        );
        let expected = expected_total(stones_per_pit);
        assert_eq!(
            total_stones(&pits),
            expected,
            "board holds {} stones, expected {}",
            total_stones(&pits),
            expected
        );

        Self {
            pits,
            current_player,
            result: GameResult::Ongoing,
            mode,
            stones_per_pit,
            last_capture: None,
            origin: Snapshot {
                pits,
                current_player,
            },
            history: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn pits(&self) -> &Pits {
        &self.pits
    }

    /// Stones in a single pit or store
    pub fn stones(&self, pit: usize) -> u8 {
        self.pits.get(pit).copied().unwrap_or(0)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    /// Winner, once the game is over
    pub fn winner(&self) -> Option<Winner> {
        match self.result {
            GameResult::Finished(w) => Some(w),
            GameResult::Ongoing => None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn stones_per_pit(&self) -> u8 {
        self.stones_per_pit
    }

    pub fn last_capture(&self) -> Option<Capture> {
        self.last_capture
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Position the recorded history was played from
    pub fn origin(&self) -> Snapshot {
        self.origin
    }

    /// Score held in a player's store
    pub fn store(&self, player: Player) -> u8 {
        self.pits[player.store()]
    }

    /// Stones left in a player's sowing pits
    pub fn side_stones(&self, player: Player) -> u16 {
        side_stones(&self.pits, player)
    }

    /// Store plus remaining pit stones
    pub fn stones_controlled(&self, player: Player) -> u16 {
        self.store(player) as u16 + self.side_stones(player)
    }

    pub fn total_stones(&self) -> u16 {
        total_stones(&self.pits)
    }

    /// Total that must hold for the entire game
    pub fn expected_total(&self) -> u16 {
        expected_total(self.stones_per_pit)
    }

    /// Non-empty sowing pits of the player to move; empty once the game is over
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_game_over() {
            return vec![];
        }
        self.snapshot().legal_pits()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pits: self.pits,
            current_player: self.current_player,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

fn expected_total(stones_per_pit: u8) -> u16 {
    2 * PITS_PER_SIDE as u16 * stones_per_pit as u16
}
