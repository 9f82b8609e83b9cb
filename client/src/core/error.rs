//! # Common Error Types
//!
//! Consolidated error handling for the finance client.
//!
//! ## Error Categories
//!
//! - [`ApiError`]: one failed remote call, normalized to a status and a
//!   user-facing message
//! - [`AppError`]: everything a caller of the library can see (API failures,
//!   form validation, token storage, configuration, invalid state)
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use moneyrepo_client::core::error::AppError;
//!
//! fn validate_amount(amount: f64) -> Result<f64, AppError> {
//!     if amount <= 0.0 {
//!         return Err(AppError::Validation("Amount must be positive".to_string()));
//!     }
//!     Ok(amount)
//! }
//! ```

use thiserror::Error;

use crate::services::auth::StorageError;

/// A failed API call.
///
/// Every variant maps to one row of the gateway's error policy. Use
/// [`ApiError::status`] and the `Display` output as the normalized
/// `{status, message}` pair shown to users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// 401. The gateway has already logged the user out when this is returned.
    #[error("Unauthorized: Your session has expired. Please log in again.")]
    Unauthorized,

    /// 403
    #[error("Forbidden: You do not have permission to access this resource.")]
    Forbidden,

    /// 404 on a write operation (reads turn 404 into an empty result)
    #[error("Not Found: The requested resource could not be found.")]
    NotFound,

    /// 500
    #[error("Internal Server Error: Please try again later.")]
    Server,

    /// Any other unsuccessful status, with the server's message or the reason phrase
    #[error("Error {status}: {message}")]
    Status { status: u16, message: String },

    /// Unsuccessful status whose message is already user-facing (login, registration)
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for an unsuccessful HTTP status.
    ///
    /// `server_message` is the `message` field of the JSON error body, if any;
    /// `reason` is the canonical reason phrase of the status.
    pub fn from_status(status: u16, reason: Option<&str>, server_message: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            500 => ApiError::Server,
            _ => ApiError::Status {
                status,
                message: server_message
                    .filter(|m| !m.trim().is_empty())
                    .or_else(|| reason.map(str::to_string))
                    .unwrap_or_else(|| "Unknown error".to_string()),
            },
        }
    }

    /// HTTP status of the failure, `None` when no response was received
    /// or the response could not be decoded.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) => None,
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::Server => Some(500),
            ApiError::Status { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
        }
    }

    /// `true` for the 401 case that forces a logout
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Form or argument validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation not allowed in the current state (e.g. double submit)
    #[error("State error: {0}")]
    State(String),

    /// Token persistence failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
