//! Error types for zbctl-rs operations.
//!
//! This module provides the error hierarchy using `thiserror` for argument
//! validation, request construction, remote dispatch, and output rendering.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for zbctl-rs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for a command invocation.
#[derive(Error, Debug)]
pub enum Error {
    /// Local argument or request construction errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Output mode resolution and rendering errors.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// Errors from the remote gateway call.
    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),

    /// Connection configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

impl Error {
    /// Returns the process exit code for this error class.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Command(_) => 2,
            Self::Config { .. }
            | Self::Output(OutputError::UnknownOutputMode { .. })
            | Self::Output(OutputError::DuplicateOutputMode { .. }) => 3,
            Self::Remote(_) => 4,
            Self::Output(OutputError::Render(_)) => 5,
        }
    }
}

/// Errors raised before any network activity.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A positional or flag value failed local syntactic validation.
    #[error("invalid argument {name} '{value}': {reason}")]
    InvalidArgument {
        /// Name of the argument.
        name: String,
        /// The rejected value as given.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Validated inputs could not be assembled into a request.
    #[error("failed to build request: {0}")]
    RequestConstruction(String),
}

/// Errors from output-mode resolution and rendering.
#[derive(Error, Debug)]
pub enum OutputError {
    /// No renderer registered under the requested mode.
    #[error("cannot find proper printer for {mode} output (known: {known})")]
    UnknownOutputMode {
        /// The requested mode.
        mode: String,
        /// Comma-separated list of registered modes.
        known: String,
    },

    /// A renderer was registered twice for the same mode.
    #[error("output mode {mode} is already registered")]
    DuplicateOutputMode {
        /// The duplicated mode.
        mode: String,
    },

    /// The result could not be serialized or written.
    #[error("render error: {0}")]
    Render(String),
}

/// Errors from a dispatched gateway request.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The request could not be delivered or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("gateway rejected request with status {status}: {detail}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Problem detail or raw body.
        detail: String,
    },

    /// The fixed deadline elapsed before the gateway answered.
    #[error("deadline of {}ms exceeded", .after.as_millis())]
    DeadlineExceeded {
        /// The deadline that elapsed.
        after: Duration,
    },
}

impl From<std::io::Error> for OutputError {
    fn from(err: std::io::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_json::Error> for OutputError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timeout: {err}"))
        } else if err.is_connect() {
            Self::Transport(format!("connection error: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_names_value() {
        let err = CommandError::InvalidArgument {
            name: "key".to_string(),
            value: "notanumber".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid argument key 'notanumber': invalid digit found in string"
        );
    }

    #[test]
    fn test_unknown_output_mode_display() {
        let err = OutputError::UnknownOutputMode {
            mode: "xml".to_string(),
            known: "human, json".to_string(),
        };
        assert!(err.to_string().contains("xml"));
        assert!(err.to_string().contains("human, json"));
    }

    #[test]
    fn test_deadline_display() {
        let err = RemoteError::DeadlineExceeded {
            after: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "deadline of 10000ms exceeded");
    }

    #[test]
    fn test_rejected_display() {
        let err = RemoteError::Rejected {
            status: 404,
            detail: "job 42 not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("job 42 not found"));
    }

    #[test]
    fn test_exit_codes_are_nonzero_and_distinct() {
        let errors: Vec<Error> = vec![
            CommandError::RequestConstruction("bad".to_string()).into(),
            OutputError::UnknownOutputMode {
                mode: "xml".to_string(),
                known: String::new(),
            }
            .into(),
            RemoteError::Transport("down".to_string()).into(),
            OutputError::Render("bad".to_string()).into(),
        ];
        let codes: Vec<u8> = errors.iter().map(Error::exit_code).collect();
        assert_eq!(codes, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config {
            message: "bad address".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error: bad address");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: OutputError = io_err.into();
        assert!(matches!(err, OutputError::Render(_)));
    }

    #[test]
    fn test_from_serde_json_error_to_output_error() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: Error = OutputError::from(json_err).into();
        assert!(matches!(err, Error::Output(OutputError::Render(_))));
    }
}
