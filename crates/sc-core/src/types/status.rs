//! Status indicator types.

use serde::{Deserialize, Serialize};

/// Semantic color of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// The action succeeded (rendered green).
    Affirmative,
    /// The action failed (rendered red).
    Negative,
}

impl StatusTone {
    /// Returns `true` for [`Affirmative`](Self::Affirmative).
    #[inline]
    #[must_use]
    pub const fn is_affirmative(self) -> bool {
        matches!(self, Self::Affirmative)
    }
}

/// Text and tone shown in the upload status region.
///
/// # Examples
///
/// ```
/// use sc_core::{StatusLine, StatusTone};
///
/// let line = StatusLine::negative("File upload failed.");
/// assert_eq!(line.tone, StatusTone::Negative);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusLine {
    /// Message to display.
    pub text: String,
    /// Color of the message.
    pub tone: StatusTone,
}

impl StatusLine {
    /// Creates an affirmative status line.
    pub fn affirmative(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Affirmative,
        }
    }

    /// Creates a negative status line.
    pub fn negative(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Negative,
        }
    }
}
