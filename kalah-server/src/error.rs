//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kalah_core::{history, HistoryError, MoveRejection, SessionError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no game in progress")]
    NoGame,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{0}")]
    BadRequest(String),

    #[error("server state lock poisoned")]
    LockPoisoned,

    #[error("AI move task failed: {0}")]
    TaskFailed(String),
}

impl From<MoveRejection> for ApiError {
    fn from(rejection: MoveRejection) -> Self {
        ApiError::Session(rejection.into())
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        ApiError::Session(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoGame => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::LockPoisoned | ApiError::TaskFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Session(err) => match err {
                SessionError::Rejected(MoveRejection::NotOwnedByMover { .. })
                | SessionError::Rejected(MoveRejection::EmptyPit { .. }) => StatusCode::BAD_REQUEST,
                SessionError::History(HistoryError::InvalidHistoryIndex { reason, .. })
                    if *reason == history::OUT_OF_RANGE =>
                {
                    StatusCode::NOT_FOUND
                }
                _ => StatusCode::CONFLICT,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Request refused: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
