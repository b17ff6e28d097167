//! Error types for filter construction and request execution
//!
//! Filter errors are raised synchronously at construction or serialization
//! time, before any network call. Transport errors from `reqwest` pass
//! through uninterpreted.

use serde::Deserialize;
use thiserror::Error;

/// Errors from the filter-expression core.
///
/// These represent caller programming errors, not transient conditions;
/// there is no retry or recovery path.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Operand type or shape is incompatible with the chosen operator
    #[error("operator `{operator}` requires {expected}, got {found}")]
    InvalidOperand {
        operator: &'static str,
        expected: &'static str,
        found: String,
    },

    /// Internal expression invariant broken (empty and/or group)
    ///
    /// Unreachable through the combinator API; surfaced instead of
    /// emitting a malformed query string the server would reject with a
    /// confusing remote error.
    #[error("cannot serialize expression: {reason}")]
    UnserializableExpression { reason: &'static str },

    /// A wire token that does not map to any known operator
    #[error("unknown operator token: `{0}`")]
    UnknownOperator(String),
}

/// Error document returned by PostgREST for failed requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub code: Option<String>,
    pub hint: Option<String>,
    pub details: Option<String>,
}

/// Unified error type for client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Filter construction or serialization error
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Transport error, passed through from `reqwest` untouched
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client configuration error (base URL, headers, transport setup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-2xx response carrying a PostgREST error document
    #[error("PostgREST error {status}: {}", .response.message.as_deref().unwrap_or("no message"))]
    Api {
        status: reqwest::StatusCode,
        response: ErrorResponse,
    },
}
