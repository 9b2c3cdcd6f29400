//! Game API endpoints
//!
//! Start a game, apply human and AI moves, and read the live board.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{extract::State, Json};
use kalah_core::{
    Capture, Difficulty, GameConfig, GameMode, GameResult, GameSession, MoveOutcome, Pits,
    Player, Winner,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct GameStateResponse {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub pits: Pits,
    pub stores: [u8; 2],
    pub current_player: Player,
    pub result: GameResult,
    pub winner: Option<Winner>,
    pub game_over: bool,
    pub legal_pits: Vec<usize>,
    pub ai_turn: bool,
    pub last_capture: Option<Capture>,
    pub move_count: usize,
}

impl GameStateResponse {
    pub(crate) fn describe(session: &GameSession) -> Self {
        let state = session.state();
        Self {
            mode: state.mode(),
            difficulty: session.config().difficulty,
            pits: *state.pits(),
            stores: [state.store(Player::Player1), state.store(Player::Player2)],
            current_player: state.current_player(),
            result: state.result(),
            winner: state.winner(),
            game_over: state.is_game_over(),
            legal_pits: state.legal_moves(),
            ai_turn: session.is_ai_turn(),
            last_capture: state.last_capture(),
            move_count: state.history().len(),
        }
    }
}

#[derive(Deserialize)]
pub struct StartGameRequest {
    #[serde(default)]
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub stones_per_pit: Option<u8>,
    pub seed: Option<u64>,
}

/// Start a new game, replacing any game in progress
pub async fn start_game(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<StartGameRequest>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let defaults = GameConfig::default();
    let config = GameConfig {
        mode: req.mode,
        difficulty: req.difficulty.unwrap_or(defaults.difficulty),
        stones_per_pit: req.stones_per_pit.unwrap_or(defaults.stones_per_pit),
        seed: req.seed,
    };
    config
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let session = GameSession::new(config);
    let response = GameStateResponse::describe(&session);
    *state.write_game()? = Some(session);

    Ok(Json(response))
}

/// Current board
pub async fn get_game_state(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let game = state.read_game()?;
    let session = game.as_ref().ok_or(ApiError::NoGame)?;
    Ok(Json(GameStateResponse::describe(session)))
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub pit: usize,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub outcome: MoveOutcome,
    pub state: GameStateResponse,
}

/// Apply a human move
pub async fn make_player_move(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let mut game = state.write_game()?;
    let session = game.as_mut().ok_or(ApiError::NoGame)?;

    let outcome = session.play(req.pit)?;
    Ok(Json(MoveResponse {
        outcome,
        state: GameStateResponse::describe(session),
    }))
}

#[derive(Serialize)]
pub struct AiMoveResponse {
    pub requested: Option<usize>,
    pub pit: usize,
    pub substituted: bool,
    pub outcome: MoveOutcome,
    pub state: GameStateResponse,
}

/// Ask the move provider for Player 2's move.
///
/// The search runs on the blocking pool; the game lock is held until the
/// move is applied.
pub async fn make_ai_move(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<AiMoveResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || play_ai_move(&state))
        .await
        .map_err(|e| ApiError::TaskFailed(e.to_string()))??;

    Ok(Json(response))
}

fn play_ai_move(state: &ServerState) -> Result<AiMoveResponse, ApiError> {
    let mut game = state.write_game()?;
    let session = game.as_mut().ok_or(ApiError::NoGame)?;

    let ai = session.play_ai()?;
    tracing::info!(
        "AI played pit {}{}",
        ai.pit,
        if ai.substituted { " (substituted)" } else { "" }
    );

    Ok(AiMoveResponse {
        requested: ai.requested,
        pit: ai.pit,
        substituted: ai.substituted,
        outcome: ai.outcome,
        state: GameStateResponse::describe(session),
    })
}

/// Drop the capture highlight once the front end has shown it
pub async fn clear_capture(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let mut game = state.write_game()?;
    let session = game.as_mut().ok_or(ApiError::NoGame)?;
    session.acknowledge_capture();
    Ok(Json(GameStateResponse::describe(session)))
}
