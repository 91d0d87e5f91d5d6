// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the gateway's HTTP API.
//!
//! Handlers are grouped by surface: [`health`] for the liveness probe,
//! [`chat`] and [`quote`] for the public session endpoints, [`catalog`]
//! for the public read-only catalog, and [`admin`] for the
//! token-protected management API.

pub mod admin;
pub mod catalog;
pub mod chat;
pub mod health;
pub mod quote;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sunlead_core::SunleadError;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wraps a domain error so it can be returned straight from a handler.
///
/// The HTTP status is derived from the error variant: validation
/// failures are the caller's fault (422), store failures mean the
/// backend is unavailable (502), lookups that found nothing are 404,
/// and anything else is a 500.
#[derive(Debug)]
pub struct ApiError(pub SunleadError);

impl From<SunleadError> for ApiError {
    fn from(err: SunleadError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SunleadError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            SunleadError::Store { .. } => StatusCode::BAD_GATEWAY,
            SunleadError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::warn!(status = %status.as_u16(), error = %self.0, "request failed");
        }
        let body = ErrorResponse {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Shorthand for the 404 returned when a session or record id is unknown.
pub(crate) fn not_found(what: &'static str, id: &str) -> ApiError {
    ApiError(SunleadError::NotFound {
        what,
        id: id.to_string(),
    })
}
