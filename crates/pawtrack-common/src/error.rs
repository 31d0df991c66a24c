//! Centralized error types for PawTrack.
//!
//! Uses `thiserror` for ergonomic error definitions and provides HTTP-friendly
//! error variants that are rendered through the standard API envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;

/// Core application error type used across all PawTrack services.
#[derive(Debug, thiserror::Error)]
pub enum PawtrackError {
    // === Auth errors ===
    #[error("Unable to log in with provided credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Authentication required")]
    Unauthorized,

    // === Resource errors ===
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{resource} already exists")]
    AlreadyExists { resource: String },

    #[error("{message}")]
    Conflict { message: String },

    // === Validation errors ===
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Validation failure with per-field detail, surfaced in the envelope's
    /// `errors` map the way clients expect from form submissions.
    #[error("Validation failed")]
    FieldErrors { errors: BTreeMap<String, Vec<String>> },

    // === Permission errors ===
    #[error("You do not have permission to perform this action")]
    Forbidden,

    // === Infrastructure errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error body — the failure half of the API envelope.
#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    message: String,
    error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl PawtrackError {
    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::TokenExpired | Self::InvalidToken | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists { .. } | Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Validation { .. } | Self::FieldErrors { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code string for programmatic handling by clients.
    pub fn error_code(&self) -> &str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Conflict { .. } => "CONFLICT",
            Self::Validation { .. } | Self::FieldErrors { .. } => "VALIDATION_ERROR",
            Self::Forbidden => "PERMISSION_DENIED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for PawtrackError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't leak internal details to clients
        let message = match &self {
            PawtrackError::Database(e) => {
                tracing::error!("Database error: {e}");
                "An internal server error occurred".to_string()
            }
            PawtrackError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        };

        let errors = if let PawtrackError::FieldErrors { errors } = &self {
            Some(errors.clone())
        } else {
            None
        };

        let body = ErrorEnvelope {
            success: false,
            message,
            error_code: self.error_code().to_string(),
            errors,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience type alias for Results using PawtrackError.
pub type PawtrackResult<T> = Result<T, PawtrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PawtrackError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(PawtrackError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            PawtrackError::NotFound { resource: "Pet".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PawtrackError::AlreadyExists { resource: "Email".into() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PawtrackError::Validation { message: "bad".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_field_errors_map_to_bad_request() {
        let err = PawtrackError::FieldErrors {
            errors: BTreeMap::from([("email".to_string(), vec!["Enter a valid email address".to_string()])]),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_internal_errors_do_not_leak() {
        let err = PawtrackError::Internal(anyhow::anyhow!("secret connection string"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
