//! Upload response types.

use serde::{Deserialize, Serialize};

use super::status::StatusLine;

/// Message the service returns when an upload is accepted.
///
/// The service has no structured success flag, so this exact text is the
/// contract. A reworded server message reads as a failure.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// Body of an `/upload` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Message to show the user.
    pub message: String,

    /// Structured outcome, when the server sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Whether the service accepted an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    /// The file was stored.
    Accepted,
    /// The service answered but did not store the file.
    Rejected,
}

/// Interpreted result of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Server message, verbatim.
    pub message: String,
    /// Accepted or rejected.
    pub status: UploadStatus,
}

impl UploadResponse {
    /// Interprets the response against the success sentinel.
    ///
    /// The `success` flag decides when present; otherwise the message must
    /// equal `sentinel` exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use sc_core::{UploadResponse, UploadStatus, UPLOAD_SUCCESS_MESSAGE};
    ///
    /// let response = UploadResponse {
    ///     message: "File uploaded successfully".to_owned(),
    ///     success: None,
    /// };
    /// assert_eq!(response.outcome(UPLOAD_SUCCESS_MESSAGE).status, UploadStatus::Accepted);
    /// ```
    #[must_use]
    pub fn outcome(self, sentinel: &str) -> UploadOutcome {
        let accepted = self.success.unwrap_or(self.message == sentinel);
        UploadOutcome {
            message: self.message,
            status: if accepted {
                UploadStatus::Accepted
            } else {
                UploadStatus::Rejected
            },
        }
    }
}

impl UploadOutcome {
    /// Returns `true` if the upload was accepted.
    #[inline]
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self.status, UploadStatus::Accepted)
    }

    /// Returns the status line for this outcome.
    #[must_use]
    pub fn status_line(&self) -> StatusLine {
        if self.is_accepted() {
            StatusLine::affirmative(self.message.as_str())
        } else {
            StatusLine::negative(self.message.as_str())
        }
    }
}
