//! Shared error type across breakwatch crates.

use thiserror::Error;

/// Stable error codes exposed to operators and HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Blank breaker name or otherwise malformed call.
    InvalidArgument,
    /// A breaker with the same name is already registered.
    DuplicateRegistration,
    /// Configuration could not be parsed or failed validation.
    BadConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidArgument => "INVALID_ARGUMENT",
            ClientCode::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BreakwatchError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum BreakwatchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("circuit breaker already registered: {name}")]
    DuplicateRegistration { name: String },
    #[error("bad config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl BreakwatchError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BreakwatchError::InvalidArgument(_) => ClientCode::InvalidArgument,
            BreakwatchError::DuplicateRegistration { .. } => ClientCode::DuplicateRegistration,
            BreakwatchError::Config(_) => ClientCode::BadConfig,
            BreakwatchError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            BreakwatchError::Internal(_) => ClientCode::Internal,
        }
    }
}
