//! Client operations.

use std::fmt;

/// One of the requests the client can make.
///
/// Used to label log records and to pick the fallback message shown when a
/// transport failure leaves nothing more specific to say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Multipart file upload.
    Upload,
    /// Dispersion statistics for a column.
    Dispersion,
    /// Box-plot resource for a column.
    BoxPlot,
    /// Reachability check.
    Ping,
}

impl Operation {
    /// Returns a short lowercase label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Dispersion => "dispersion",
            Self::BoxPlot => "boxplot",
            Self::Ping => "ping",
        }
    }

    /// Returns the generic message for a failure whose cause can't be shown.
    ///
    /// # Examples
    ///
    /// ```
    /// use sc_core::Operation;
    ///
    /// assert_eq!(Operation::Upload.fallback_message(), "File upload failed.");
    /// ```
    #[inline]
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Upload => "File upload failed.",
            Self::Dispersion => {
                "Failed to calculate. Make sure the API is running and the column name is correct."
            }
            Self::BoxPlot => "Failed to load the box plot.",
            Self::Ping => "The statistics API is not reachable.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
