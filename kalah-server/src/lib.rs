//! Kalah Server - HTTP API for a browser front end
//!
//! This crate provides the web backend:
//! - REST API for one interactive game session
//! - AI moves through the session's move provider
//! - Post-game history review
//! - Static file serving for the front end

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            static_dir: "web".to_string(),
        }
    }
}

/// One API endpoint, for listings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiRoute {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
}

/// Every route `create_router` mounts under `/api`
pub const API_ROUTES: &[ApiRoute] = &[
    ApiRoute { method: "GET", path: "/api/status", summary: "server status and version" },
    ApiRoute { method: "GET", path: "/api/board", summary: "pit layout, stores, opposite pairs" },
    ApiRoute { method: "POST", path: "/api/game/start", summary: "start a game {mode, difficulty, stones_per_pit, seed}" },
    ApiRoute { method: "GET", path: "/api/game/state", summary: "board, legal pits, whose turn" },
    ApiRoute { method: "POST", path: "/api/game/move", summary: "human move {pit}" },
    ApiRoute { method: "POST", path: "/api/game/ai-move", summary: "let the AI play Player 2" },
    ApiRoute { method: "POST", path: "/api/game/clear-capture", summary: "drop the capture highlight" },
    ApiRoute { method: "GET", path: "/api/history", summary: "recorded moves" },
    ApiRoute { method: "POST", path: "/api/history/goto", summary: "board after move {index}, finished games only" },
];

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board topology
        .route("/api/board", get(routes::board::get_board))
        // Game API
        .route("/api/game/start", post(routes::game::start_game))
        .route("/api/game/state", get(routes::game::get_game_state))
        .route("/api/game/move", post(routes::game::make_player_move))
        .route("/api/game/ai-move", post(routes::game::make_ai_move))
        .route("/api/game/clear-capture", post(routes::game::clear_capture))
        // History API
        .route("/api/history", get(routes::history::get_history))
        .route("/api/history/goto", post(routes::history::history_goto))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new());
    let router = create_router(&config, state);

    tracing::info!("Kalah server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
