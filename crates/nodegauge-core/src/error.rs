//! Shared error type across nodegauge crates.

use thiserror::Error;

/// Stable error kinds (used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A gauge with this name already exists.
    DuplicateName,
    /// Name does not follow the metric-name grammar.
    InvalidName,
    /// Configuration could not be parsed or validated.
    InvalidConfig,
    /// Listener could not be bound.
    BindFailed,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DuplicateName => "DUPLICATE_NAME",
            ErrorKind::InvalidName => "INVALID_NAME",
            ErrorKind::InvalidConfig => "INVALID_CONFIG",
            ErrorKind::BindFailed => "BIND_FAILED",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, NodeGaugeError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum NodeGaugeError {
    #[error("duplicate metric name: {0}")]
    DuplicateName(String),
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl NodeGaugeError {
    /// Map to a stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NodeGaugeError::DuplicateName(_) => ErrorKind::DuplicateName,
            NodeGaugeError::InvalidName(_) => ErrorKind::InvalidName,
            NodeGaugeError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            NodeGaugeError::Bind { .. } => ErrorKind::BindFailed,
            NodeGaugeError::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_keeps_address_and_kind() {
        let err = NodeGaugeError::Bind {
            addr: "127.0.0.1:7081".into(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert_eq!(err.kind().as_str(), "BIND_FAILED");
        assert!(err.to_string().starts_with("failed to bind 127.0.0.1:7081"));
    }
}
