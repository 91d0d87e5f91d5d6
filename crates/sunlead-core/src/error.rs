// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Sunlead workspace.

use thiserror::Error;

use crate::types::FieldId;

/// The primary error type used across the store traits, the flow engine,
/// and the gateway.
#[derive(Debug, Error)]
pub enum SunleadError {
    /// A step or submission gate found required fields missing or blank.
    /// Local and recoverable; never reaches the lead store.
    #[error("{} required", join_fields(.missing))]
    Validation { missing: Vec<FieldId> },

    /// The lead store rejected or failed an operation. The message is
    /// shown to the user as-is, so keep it free of internal detail.
    #[error("store error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP gateway errors (bind failure, serialization, shutdown).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A record was looked up by id and does not exist.
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SunleadError {
    /// Shorthand for a [`SunleadError::Store`] without an underlying source.
    pub fn store(message: impl Into<String>) -> Self {
        SunleadError::Store {
            message: message.into(),
            source: None,
        }
    }

    /// The text a visitor should see for this failure.
    ///
    /// Store failures surface the store's own message verbatim; validation
    /// failures surface the missing-field list. Everything else falls back
    /// to the Display form.
    pub fn user_message(&self) -> String {
        match self {
            SunleadError::Store { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether retrying the same operation can succeed. Every failure in
    /// the capture flow is retryable; only config errors are terminal.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SunleadError::Config(_))
    }
}

fn join_fields(missing: &[FieldId]) -> String {
    missing
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
