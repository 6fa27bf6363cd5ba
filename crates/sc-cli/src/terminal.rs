//! Terminal rendering of operation outcomes.

use std::io::Write;

use crossterm::style::Stylize;
use parking_lot::Mutex;
use sc_client::StatsView;
use sc_core::{StatusLine, StatusTone};

/// A [`StatsView`] that writes results to one stream and interruptions to another.
///
/// Dispersion lines and the upload status go to `out`; prompts and alerts go
/// to `err`. The status line is green or red when colors are enabled.
pub struct TerminalView<O, E> {
    out: Mutex<O>,
    err: Mutex<E>,
    color: bool,
}

impl<O: Write, E: Write> TerminalView<O, E> {
    /// Creates a view over the given streams.
    pub fn new(out: O, err: E, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
            color,
        }
    }

    fn paint_status(&self, status: &StatusLine) -> String {
        if !self.color {
            return status.text.clone();
        }
        match status.tone {
            StatusTone::Affirmative => status.text.as_str().green().to_string(),
            StatusTone::Negative => status.text.as_str().red().to_string(),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

impl TerminalView<std::io::Stdout, std::io::Stderr> {
    /// Creates a view over the process stdout and stderr.
    pub fn stdio(color: bool) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), color)
    }
}

// Write failures on the terminal are not actionable here.
impl<O: Write, E: Write> StatsView for TerminalView<O, E> {
    fn prompt(&self, message: &str) {
        let text = if self.color {
            message.yellow().to_string()
        } else {
            message.to_owned()
        };
        let _ = writeln!(self.err.lock(), "{text}");
    }

    fn show_upload_status(&self, status: &StatusLine) {
        let text = self.paint_status(status);
        let _ = writeln!(self.out.lock(), "{text}");
    }

    fn show_dispersion(&self, lines: &[String]) {
        let mut out = self.out.lock();
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
    }

    fn alert(&self, message: &str) {
        let text = if self.color {
            message.red().bold().to_string()
        } else {
            message.to_owned()
        };
        let _ = writeln!(self.err.lock(), "{text}");
    }
}
