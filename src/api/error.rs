//! Mapping of crate errors onto HTTP responses.
//!
//! Every error body has the shape `{"error": "<message>"}`.

use crate::errors::{Error, Result};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl Error {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::CalculationNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::CalculationNotFound { .. } => "Calculation not found".to_string(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            error!("Request failed: {self}");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Unwraps a JSON body, turning a malformed body into a 400 validation error.
pub fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Error::validation("body", rejection.body_text()))
}

/// Parses a path id, turning anything that is not an integer into a 400 validation error.
pub fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::validation("id", format!("'{raw}' is not a calculation id")))
}
