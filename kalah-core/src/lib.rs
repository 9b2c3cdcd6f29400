//! Kalah Core - Rules engine and AI
//!
//! This crate provides the game logic for six-pit Kalah:
//! - Board layout (14 pits, two stores) and sowing geometry
//! - Move validation, sowing, captures and extra turns
//! - End-game sweep and winner detection
//! - Move history with post-game review and replay
//! - Move providers, including a CPU-based alpha-beta AI
//! - A game session driver that sanitizes provider answers

pub mod board;
pub mod error;
pub mod state;
pub mod rules;
pub mod history;
pub mod eval;
pub mod provider;
pub mod ai;
pub mod config;
pub mod session;

// Re-exports for convenient access
pub use board::{opposite_pit, Pits, Player, NUM_PITS, PITS_PER_SIDE, PLAYER1_STORE, PLAYER2_STORE};
pub use error::{HistoryError, MoveRejection, SessionError};
pub use state::{BoardState, Capture, GameMode, GameResult, Snapshot, Winner};
pub use rules::{detect_end_game, play_snapshot, validate_and_apply, MoveOutcome, Sweep};
pub use history::{replay, review, verify, HistoryCursor, MoveRecord, ReplayMismatch, SpecialEvent};
pub use eval::{evaluate, Heuristics, WIN_VALUE};
pub use provider::{Difficulty, MoveProvider, RandomProvider};
pub use ai::AlphaBetaAI;
pub use config::GameConfig;
pub use session::{play_out, AiMove, GameSession};
