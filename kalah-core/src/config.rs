//! GameConfig - settings fixed at game start

pub use crate::board::MAX_STONES_PER_PIT;

use crate::board::DEFAULT_STONES_PER_PIT;
use crate::provider::Difficulty;
use crate::state::{BoardState, GameMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Game setup
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub stones_per_pit: u8,
    pub mode: GameMode,
    /// Tier requested from the move provider in `PlayerVsAi` games
    pub difficulty: Difficulty,
    /// Seed for the provider and for substitute moves; `None` picks one
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn player_vs_player() -> Self {
        Self::default()
    }

    pub fn player_vs_ai(difficulty: Difficulty) -> Self {
        Self {
            mode: GameMode::PlayerVsAi,
            difficulty,
            ..Self::default()
        }
    }

    /// Check ranges. Called by `load`; callers building configs by hand
    /// should call it too, since `new_state` panics on an invalid count.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.stones_per_pit == 0 || self.stones_per_pit > MAX_STONES_PER_PIT {
            anyhow::bail!(
                "stones_per_pit must be between 1 and {}, got {}",
                MAX_STONES_PER_PIT,
                self.stones_per_pit
            );
        }
        Ok(())
    }

    /// Fresh board for this configuration
    pub fn new_state(&self) -> BoardState {
        BoardState::with_stones(self.mode, self.stones_per_pit)
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stones_per_pit: DEFAULT_STONES_PER_PIT,
            mode: GameMode::PlayerVsPlayer,
            difficulty: Difficulty::Medium,
            seed: None,
        }
    }
}
