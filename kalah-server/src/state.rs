//! Server state management
//!
//! The server hosts a single game session at a time. Every request takes the
//! lock, so moves from concurrent requests are applied one after another.

use crate::error::ApiError;
use kalah_core::GameSession;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Server-wide shared state
pub struct ServerState {
    pub game: RwLock<Option<GameSession>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            game: RwLock::new(None),
        }
    }

    pub fn read_game(&self) -> Result<RwLockReadGuard<'_, Option<GameSession>>, ApiError> {
        self.game.read().map_err(|_| ApiError::LockPoisoned)
    }

    pub fn write_game(&self) -> Result<RwLockWriteGuard<'_, Option<GameSession>>, ApiError> {
        self.game.write().map_err(|_| ApiError::LockPoisoned)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
