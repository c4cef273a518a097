//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Form Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ─────────────────────────────────────────────────────────────
    // Remote Service Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Backend unreachable: {message}")]
    Network { message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Backend returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Request payload too large")]
    PayloadTooLarge,

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Unexpected backend response: {message}")]
    Protocol { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },
}

/// Coarse classification of an [`Error`], cheap to copy into messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Timeout,
    Server,
    PayloadTooLarge,
    Auth,
    Protocol,
    Config,
    Internal,
}

/// Cloneable summary of a failed remote call, carried in TEA messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl RemoteFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True when the backend could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        self.kind == ErrorKind::Network
    }
}

impl From<&Error> for RemoteFailure {
    fn from(err: &Error) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<Error> for RemoteFailure {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Network { .. } => ErrorKind::Network,
            Error::Timeout => ErrorKind::Timeout,
            Error::Server { .. } => ErrorKind::Server,
            Error::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            Error::Auth { .. } => ErrorKind::Auth,
            Error::Protocol { .. } | Error::Json(_) => ErrorKind::Protocol,
            Error::Config { .. } => ErrorKind::Config,
            Error::Io(_) | Error::TerminalInit(_) | Error::ChannelSend { .. } => {
                ErrorKind::Internal
            }
        }
    }

    /// Whether a retry of the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Network { .. } | Error::Timeout => true,
            Error::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::server(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Backend returned 502: Bad Gateway");

        let err = Error::network("connection refused");
        assert!(err.to_string().contains("unreachable"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(Error::network("x").kind(), ErrorKind::Network);
        assert_eq!(Error::Timeout.kind(), ErrorKind::Timeout);
        assert_eq!(Error::server(500, "x").kind(), ErrorKind::Server);
        assert_eq!(Error::PayloadTooLarge.kind(), ErrorKind::PayloadTooLarge);
        assert_eq!(Error::auth("wrong code").kind(), ErrorKind::Auth);
        assert_eq!(Error::validation("empty").kind(), ErrorKind::Validation);
        assert_eq!(Error::protocol("bad json").kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_error_is_transient() {
        assert!(Error::network("down").is_transient());
        assert!(Error::Timeout.is_transient());
        assert!(Error::server(503, "busy").is_transient());
        assert!(!Error::server(404, "missing").is_transient());
        assert!(!Error::PayloadTooLarge.is_transient());
        assert!(!Error::protocol("garbage").is_transient());
    }

    #[test]
    fn test_remote_failure_from_error() {
        let failure = RemoteFailure::from(Error::network("connection refused"));
        assert!(failure.is_unreachable());
        assert!(failure.message.contains("connection refused"));

        let failure = RemoteFailure::from(Error::Timeout);
        assert!(!failure.is_unreachable());
        assert_eq!(failure.kind, ErrorKind::Timeout);
    }

    #[test]
    fn test_error_constructors() {
        assert_eq!(Error::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(Error::config("x").kind(), ErrorKind::Config);
        assert_eq!(Error::auth("x").kind(), ErrorKind::Auth);
        assert_eq!(Error::channel_send("x").kind(), ErrorKind::Internal);
    }
}
