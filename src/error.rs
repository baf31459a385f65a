use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

use crate::ledger::LedgerError;

impl From<sqlx::Error> for EcoHotelError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<::config::ConfigError> for EcoHotelError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum EcoHotelError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Ledger error: {0}")]
    LedgerError(#[from] LedgerError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, EcoHotelError>;

impl IntoResponse for EcoHotelError {
    fn into_response(self) -> Response {
        match self {
            Self::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "result": "failure", "errors": { "__all__": [msg] } })),
            )
                .into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": msg }))).into_response()
            }
            other => {
                // Recording faults are not distinguished from any other server fault.
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_is_wrapped_transparently() {
        let err: EcoHotelError = LedgerError::Rpc {
            code: -32000,
            message: "insufficient funds for gas * price + value".to_string(),
        }
        .into();
        assert!(err.to_string().contains("insufficient funds"));
    }

    #[test]
    fn test_status_codes() {
        let resp = EcoHotelError::ValidationError("bad".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = EcoHotelError::NotFound("hotel 9".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = EcoHotelError::DatabaseError("locked".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
