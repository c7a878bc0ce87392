//! Error types for the chat relay.

use thiserror::Error;

/// Common error type for the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O error (binding the listener, opening the log file, reading config).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A client frame that could not be decoded into a command.
    ///
    /// These never reach the client; the transport logs and drops them.
    #[error("malformed frame: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        RelayError::Decode(e.to_string())
    }
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
