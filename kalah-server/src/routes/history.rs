//! History review endpoints
//!
//! The move list is always readable; stepping to a snapshot is only allowed
//! once the game is over.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{extract::State, Json};
use kalah_core::{HistoryCursor, MoveRecord, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct HistoryResponse {
    pub game_over: bool,
    pub total_moves: usize,
    pub moves: Vec<MoveRecord>,
}

/// Full move list
pub async fn get_history(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let game = state.read_game()?;
    let session = game.as_ref().ok_or(ApiError::NoGame)?;
    let board = session.state();

    Ok(Json(HistoryResponse {
        game_over: board.is_game_over(),
        total_moves: board.history().len(),
        moves: board.history().to_vec(),
    }))
}

#[derive(Deserialize)]
pub struct GotoRequest {
    pub index: usize,
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub index: usize,
    pub total_moves: usize,
    pub at_start: bool,
    pub at_end: bool,
    pub record: MoveRecord,
    pub snapshot: Snapshot,
}

/// Board as it stood right after move `index`
pub async fn history_goto(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<GotoRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let game = state.read_game()?;
    let session = game.as_ref().ok_or(ApiError::NoGame)?;

    let mut cursor = HistoryCursor::new(session.state())?;
    let snapshot = cursor.goto(req.index)?;

    Ok(Json(ReviewResponse {
        index: cursor.index(),
        total_moves: cursor.len(),
        at_start: cursor.at_start(),
        at_end: cursor.at_end(),
        record: cursor.record().clone(),
        snapshot,
    }))
}
