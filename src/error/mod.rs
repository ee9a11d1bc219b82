//! Error types for the production data API.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From`
//! conversions. Driver failures are classified into the three kinds the
//! dashboard distinguishes (missing driver, dead link, bad credentials) plus
//! a generic fallback carrying the raw driver text.

use std::borrow::Cow;
use thiserror::Error;

/// Top-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database failures, classified per the rules in [`classify_driver_error`].
///
/// The ODBC driver reports failures as SQLSTATE codes plus a human-readable
/// message; both appear in the rendered error text, so classification works
/// off a single string.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(
        "IBM i Access ODBC driver is not installed or not discoverable. \
         Install it from IBM before starting the service. ({0})"
    )]
    DriverMissing(String),

    #[error(
        "Cannot reach the AS/400 system. Check the network path and \
         connection settings. ({0})"
    )]
    LinkFailure(String),

    #[error("The AS/400 rejected the supplied user/password. ({0})")]
    AuthFailure(String),

    #[error("Database error: {0}")]
    Other(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingField(Cow<'static, str>),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: Cow<'static, str>,
        message: Cow<'static, str>,
    },
}

/// Result type alias for [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Result type alias for [`DbError`].
pub type DbResult<T> = std::result::Result<T, DbError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    DriverMissing,
    LinkFailure,
    AuthFailure,
}

/// Ordered `(pattern, kind)` table evaluated against the raw failure text.
///
/// SQLSTATE codes come first; the prose variants cover drivers that render
/// diagnostics without the state code.
const FAILURE_PATTERNS: [(&str, FailureKind); 6] = [
    ("IM002", FailureKind::DriverMissing),
    ("Data source name not found", FailureKind::DriverMissing),
    ("08S01", FailureKind::LinkFailure),
    ("Communication link failure", FailureKind::LinkFailure),
    ("28000", FailureKind::AuthFailure),
    ("Invalid authorization", FailureKind::AuthFailure),
];

/// Classifies a raw ODBC failure message into a [`DbError`].
///
/// Unrecognized failures (query syntax, schema drift, anything else) fall
/// through to [`DbError::Other`] with the raw text preserved.
pub fn classify_driver_error(message: &str) -> DbError {
    for (pattern, kind) in FAILURE_PATTERNS {
        if message.contains(pattern) {
            return match kind {
                FailureKind::DriverMissing => DbError::DriverMissing(message.to_string()),
                FailureKind::LinkFailure => DbError::LinkFailure(message.to_string()),
                FailureKind::AuthFailure => DbError::AuthFailure(message.to_string()),
            };
        }
    }
    DbError::Other(message.to_string())
}
