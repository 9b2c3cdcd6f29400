//! Move-provider contract
//!
//! A provider is handed a snapshot and a difficulty tier and answers with one
//! of the mover's non-empty pits, or `None` when it sees no legal move. The
//! engine never trusts the answer; see `GameSession::play_ai`.

use crate::state::Snapshot;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier requested from a provider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Search settings a tier maps to for the bundled alpha-beta provider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchProfile {
    pub depth: u32,
    pub noise_scale: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn profile(self) -> SearchProfile {
        match self {
            // Beginner: one ply, evaluation drowned in noise
            Difficulty::Easy => SearchProfile {
                depth: 1,
                noise_scale: 6.0,
            },
            Difficulty::Medium => SearchProfile {
                depth: 4,
                noise_scale: 0.5,
            },
            Difficulty::Hard => SearchProfile {
                depth: 7,
                noise_scale: 0.0,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Anything that can pick a move for the side to play
pub trait MoveProvider: Send + Sync {
    fn choose_move(&mut self, snapshot: &Snapshot, difficulty: Difficulty) -> Option<usize>;

    fn name(&self) -> &str;
}

/// Uniformly random legal pit
pub struct RandomProvider {
    rng: ChaCha8Rng,
}

impl RandomProvider {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MoveProvider for RandomProvider {
    fn choose_move(&mut self, snapshot: &Snapshot, _difficulty: Difficulty) -> Option<usize> {
        snapshot.legal_pits().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{initial_pits, Player};

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("grandmaster".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn test_profiles_get_stronger() {
        let easy = Difficulty::Easy.profile();
        let medium = Difficulty::Medium.profile();
        let hard = Difficulty::Hard.profile();
        assert!(easy.depth < medium.depth && medium.depth < hard.depth);
        assert!(easy.noise_scale > hard.noise_scale);
    }

    #[test]
    fn test_random_provider_is_legal() {
        let mut pits = initial_pits(6);
        pits[8] = 0;
        pits[13] = 6;
        let snapshot = Snapshot {
            pits,
            current_player: Player::Player2,
        };

        let mut provider = RandomProvider::with_seed(7);
        for _ in 0..50 {
            let pit = provider.choose_move(&snapshot, Difficulty::Easy).unwrap();
            assert!(snapshot.legal_pits().contains(&pit));
        }
    }

    #[test]
    fn test_random_provider_no_move() {
        let mut pits = [0u8; 14];
        pits[6] = 36;
        pits[13] = 36;
        let snapshot = Snapshot {
            pits,
            current_player: Player::Player1,
        };
        assert_eq!(RandomProvider::with_seed(1).choose_move(&snapshot, Difficulty::Hard), None);
    }
}
