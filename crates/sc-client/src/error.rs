//! Error types for the sc-client crate.
//!
//! This module provides the [`ClientError`] type for everything that can go
//! wrong between a user action and a rendered result, and [`ErrorKind`], the
//! coarse classification the UI reacts to.

use std::process::ExitStatus;

use camino::Utf8PathBuf;
use reqwest::StatusCode;
use sc_core::{ConfigError, Operation};
use url::Url;

/// Prompt shown when no file was selected.
pub const MISSING_FILE_PROMPT: &str = "Please select a file first.";

/// Prompt shown when no column name was entered.
pub const MISSING_COLUMN_PROMPT: &str = "Please enter a column name.";

/// Input the user has to supply before a request can be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingInput {
    /// No file, or an empty one.
    File,
    /// No column name.
    Column,
}

impl MissingInput {
    /// Returns the prompt asking the user for this input.
    #[inline]
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::File => MISSING_FILE_PROMPT,
            Self::Column => MISSING_COLUMN_PROMPT,
        }
    }
}

/// How the UI should treat a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Nothing was sent; prompt the user.
    UserInputMissing,
    /// The server explained the failure; show its message verbatim.
    ServerReported,
    /// The request failed in a way the user can't act on; show a fallback.
    TransportFailure,
    /// A newer request for the same operation replaced this one.
    Cancelled,
}

/// Errors returned by [`StatsClient`](crate::StatsClient) operations.
///
/// # Error Recovery Strategy
///
/// None of these are retried. Each maps to one [`ErrorKind`] and carries the
/// text to put in front of the user via [`user_message`](Self::user_message).
///
/// # Examples
///
/// ```
/// use sc_client::{ClientError, ErrorKind, MissingInput};
///
/// let err = ClientError::MissingInput(MissingInput::Column);
/// assert_eq!(err.kind(), ErrorKind::UserInputMissing);
/// assert_eq!(err.user_message(), "Please enter a column name.");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Required input was not supplied.
    #[error("missing input: {}", _0.prompt())]
    MissingInput(MissingInput),

    /// The server answered with an explicit error message.
    #[error("{operation} rejected by server: {message}")]
    ServerReported {
        /// The failed operation.
        operation: Operation,
        /// Message from the response body.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("{operation} request failed with HTTP {status}")]
    Status {
        /// The failed operation.
        operation: Operation,
        /// Status code of the response.
        status: StatusCode,
    },

    /// The request did not complete.
    #[error("{operation} request failed: {source}")]
    Transport {
        /// The failed operation.
        operation: Operation,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    #[error("{operation} request timed out")]
    TimedOut {
        /// The failed operation.
        operation: Operation,
    },

    /// The response body was not the expected JSON.
    #[error("{operation} response could not be decoded: {source}")]
    Decode {
        /// The failed operation.
        operation: Operation,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The request was aborted before it finished.
    #[error("{operation} request cancelled")]
    Cancelled {
        /// The cancelled operation.
        operation: Operation,
    },

    /// The file to upload could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path of the file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The box-plot URL could not be opened.
    #[error("failed to open {url}: {source}")]
    Navigate {
        /// The URL that was being opened.
        url: Url,
        /// The underlying navigation error.
        #[source]
        source: NavigateError,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The client configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Creates a new [`ClientError::ServerReported`] error.
    #[inline]
    pub fn server_reported(operation: Operation, message: impl Into<String>) -> Self {
        Self::ServerReported {
            operation,
            message: message.into(),
        }
    }

    /// Classifies a `reqwest` error, separating timeouts from other failures.
    pub fn transport(operation: Operation, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::TimedOut { operation }
        } else {
            Self::Transport { operation, source }
        }
    }

    /// Creates a new [`ClientError::ReadFile`] error.
    #[inline]
    pub fn read_file(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Returns how the UI should treat this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput(_) => ErrorKind::UserInputMissing,
            Self::ServerReported { .. } => ErrorKind::ServerReported,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Status { .. }
            | Self::Transport { .. }
            | Self::TimedOut { .. }
            | Self::Decode { .. }
            | Self::Navigate { .. }
            | Self::ReadFile { .. }
            | Self::Build(_)
            | Self::Config(_) => ErrorKind::TransportFailure,
        }
    }

    /// Returns the operation this error belongs to, if any.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::ServerReported { operation, .. }
            | Self::Status { operation, .. }
            | Self::Transport { operation, .. }
            | Self::TimedOut { operation }
            | Self::Decode { operation, .. }
            | Self::Cancelled { operation } => Some(*operation),
            Self::Navigate { .. } => Some(Operation::BoxPlot),
            Self::MissingInput(_) | Self::ReadFile { .. } | Self::Build(_) | Self::Config(_) => {
                None
            }
        }
    }

    /// Returns the text to show the user.
    ///
    /// Prompts and server messages are returned as is. Transport failures get
    /// the operation's generic fallback, since their cause can't be acted on.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput(input) => input.prompt().to_owned(),
            Self::ServerReported { message, .. } => message.clone(),
            Self::ReadFile { path, .. } => format!("Could not read {path}."),
            Self::Navigate { url, .. } => format!("Could not open {url}."),
            other => other
                .operation()
                .map_or_else(|| other.to_string(), |op| op.fallback_message().to_owned()),
        }
    }
}

/// Errors raised by a [`Navigator`](crate::Navigator).
#[derive(Debug, thiserror::Error)]
pub enum NavigateError {
    /// No program is configured or available to open URLs.
    #[error("no program available to open URLs")]
    NoProgram,

    /// The program could not be started.
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// Program that was started.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure.
    #[error("{program} exited with {status}")]
    Exit {
        /// Program that was started.
        program: String,
        /// Its exit status.
        status: ExitStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_input_prompts() {
        let err = ClientError::MissingInput(MissingInput::File);
        assert_eq!(err.kind(), ErrorKind::UserInputMissing);
        assert_eq!(err.user_message(), "Please select a file first.");
        assert!(err.operation().is_none());
    }

    #[test]
    fn test_server_reported_is_verbatim() {
        let err = ClientError::server_reported(Operation::Dispersion, "column not found");
        assert_eq!(err.kind(), ErrorKind::ServerReported);
        assert_eq!(err.user_message(), "column not found");
        assert_eq!(err.operation(), Some(Operation::Dispersion));
    }

    #[test]
    fn test_status_uses_fallback() {
        let err = ClientError::Status {
            operation: Operation::Dispersion,
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(
            err.user_message(),
            "Failed to calculate. Make sure the API is running and the column name is correct."
        );
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_decode_uses_fallback() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ClientError::Decode {
            operation: Operation::Upload,
            source,
        };
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(err.user_message(), "File upload failed.");
    }

    #[test]
    fn test_cancelled_kind() {
        let err = ClientError::Cancelled {
            operation: Operation::BoxPlot,
        };
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_navigate_message() {
        let err = ClientError::Navigate {
            url: Url::parse("http://127.0.0.1:5001/boxplot?column=age").unwrap(),
            source: NavigateError::NoProgram,
        };
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(err.operation(), Some(Operation::BoxPlot));
        assert_eq!(
            err.user_message(),
            "Could not open http://127.0.0.1:5001/boxplot?column=age."
        );
    }

    #[test]
    fn test_read_file_message() {
        let err = ClientError::read_file(
            "data/missing.csv",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(err.user_message(), "Could not read data/missing.csv.");
        assert!(err.to_string().contains("no such file"));
    }
}
