//! Transport-neutral error response shared with calling layers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error payload a calling layer can render in its own transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Error codes emitted by the authentication engine
pub mod error_codes {
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_BLACKLISTED: &str = "TOKEN_BLACKLISTED";
    pub const REFRESH_TOKEN_INVALID: &str = "REFRESH_TOKEN_INVALID";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const USER_INACTIVE: &str = "USER_INACTIVE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNSUPPORTED: &str = "UNSUPPORTED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Conversion into [`ErrorResponse`]
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
