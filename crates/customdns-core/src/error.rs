//! Error types for customdns
//!
//! Two kinds of failure come back from the remote service: the request
//! could not complete ([`Error::Transport`]) or it completed with a response
//! that is not what the API promises ([`Error::Protocol`]). Neither is
//! retried here; both travel to the caller unchanged.

use thiserror::Error;

/// Result type alias for customdns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for customdns
#[derive(Error, Debug)]
pub enum Error {
    /// The network call could not complete (DNS failure, refused, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but is not in the expected shape
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid desired state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the remote service could not be reached
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the remote service answered with something unexpected
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

/// A body that does not parse as JSON is a protocol violation
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(format!("invalid JSON: {}", err))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_are_protocol_errors() {
        let err: Error = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(err.is_protocol());
        assert!(!err.is_transport());
    }

    #[test]
    fn display_includes_kind() {
        assert_eq!(
            Error::transport("connection refused").to_string(),
            "Transport error: connection refused"
        );
        assert_eq!(
            Error::protocol("missing field `data`").to_string(),
            "Protocol error: missing field `data`"
        );
    }

    #[test]
    fn anyhow_converts_to_other() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert!(matches!(err, Error::Other(ref m) if m == "boom"));
    }
}
