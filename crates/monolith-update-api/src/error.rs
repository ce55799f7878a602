// monolith-update-api/src/error.rs
// ============================================================================
// Module: API Error Taxonomy
// Description: Boundary errors mapped onto HTTP statuses and error bodies.
// Purpose: Keep the three client-visible failure classes in one place.
// Dependencies: axum, serde, thiserror
// ============================================================================

//! ## Overview
//! The API surfaces three failure classes: validation failures rejected
//! before the catalog is touched, not-found outcomes for unknown records or
//! missing files, and internal failures from the catalog backend. Every
//! class serializes as an `{"error": ...}` body; the message text is the
//! only distinction a caller sees between a missing record and a missing
//! file on disk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use thiserror::Error;

use crate::access_log::RequestOutcome;

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Client-visible API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required query parameter is missing or blank.
    #[error("{0}")]
    Validation(String),
    /// The requested record, artifact, or file does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The catalog backend failed.
    #[error("catalog unavailable: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the access-log outcome label for this error.
    #[must_use]
    pub const fn outcome(&self) -> RequestOutcome {
        match self {
            Self::Validation(_) => RequestOutcome::InvalidParams,
            Self::NotFound(_) => RequestOutcome::NotFound,
            Self::Internal(_) => RequestOutcome::Failed,
        }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body shape shared by every failure response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Human-readable error message.
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Validation(message) | Self::NotFound(message) => message.clone(),
            // Backend detail stays out of the client body.
            Self::Internal(_) => "Service temporarily unavailable.".to_string(),
        };
        let status = self.status();
        (
            status,
            axum::Json(ErrorBody {
                error: message,
            }),
        )
            .into_response()
    }
}
