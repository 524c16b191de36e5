//! Unified error handling with Sentry integration.
//!
//! Every route handler returns `Result<T, AppError>`. This is the only place
//! errors are turned into status codes and response bodies: business-rule
//! refusals keep their message, everything else becomes an opaque failure
//! that is captured to Sentry first.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::registration::RegistrationError;

/// Application-level error type for the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Registration was refused or failed.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Request input is malformed.
    #[error("{0}")]
    Validation(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Registration(RegistrationError::Store(_))
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Registration(err) => match err {
                RegistrationError::DuplicateRegistration | RegistrationError::CapacityExceeded => {
                    StatusCode::BAD_REQUEST
                }
                RegistrationError::EventNotFound => StatusCode::NOT_FOUND,
                RegistrationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
