use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::ApiResponse;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("week {0} not found")]
    WeekNotFound(u32),

    #[error("week {0} is not locked yet")]
    WeekNotLocked(u32),

    #[error("week {0} is locked")]
    WeekLocked(u32),

    #[error("game {0} not found")]
    GameNotFound(u32),

    #[error("invalid pick: {0}")]
    InvalidPick(String),
}

pub type Result<T> = std::result::Result<T, PoolError>;

impl PoolError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PoolError::WeekNotFound(_) | PoolError::GameNotFound(_) => StatusCode::NOT_FOUND,
            PoolError::WeekNotLocked(_) | PoolError::WeekLocked(_) => StatusCode::CONFLICT,
            PoolError::InvalidPick(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PoolError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PoolError::WeekNotFound(3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PoolError::WeekNotLocked(3).status_code(), StatusCode::CONFLICT);
        assert_eq!(PoolError::InvalidPick("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PoolError::Config("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(PoolError::WeekNotLocked(7).to_string(), "week 7 is not locked yet");
    }
}
