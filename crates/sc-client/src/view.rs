//! Render targets for operation outcomes.
//!
//! The client never touches a screen directly. Whatever presents results
//! (a terminal, a GUI, a test recorder) implements [`StatsView`], and
//! whatever can display a URL implements [`Navigator`].

use sc_core::StatusLine;
use url::Url;

use crate::error::NavigateError;

/// Regions of the UI that operation outcomes are written to.
///
/// Uploads write to the status region; dispersion results write to the
/// results region. Prompts and alerts interrupt the user.
pub trait StatsView {
    /// Asks the user for input that was missing. Nothing was sent.
    fn prompt(&self, message: &str);

    /// Replaces the upload status indicator.
    fn show_upload_status(&self, status: &StatusLine);

    /// Replaces the dispersion results with the rendered lines.
    fn show_dispersion(&self, lines: &[String]);

    /// Reports a failed request.
    fn alert(&self, message: &str);
}

/// Displays a resource by URL, the way following a link would.
pub trait Navigator {
    /// Navigates to `url`.
    fn navigate(&self, url: &Url) -> Result<(), NavigateError>;
}

impl<T: StatsView + ?Sized> StatsView for &T {
    fn prompt(&self, message: &str) {
        (**self).prompt(message);
    }

    fn show_upload_status(&self, status: &StatusLine) {
        (**self).show_upload_status(status);
    }

    fn show_dispersion(&self, lines: &[String]) {
        (**self).show_dispersion(lines);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        (**self).navigate(url)
    }
}
