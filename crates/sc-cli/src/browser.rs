//! Navigators that hand a URL to something able to display it.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use parking_lot::Mutex;
use sc_client::{NavigateError, Navigator};
use tracing::debug;
use url::Url;

/// A program plus leading arguments, parsed from a command string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenerCommand {
    program: String,
    args: Vec<String>,
}

fn parse_opener_command(command: &str) -> Option<OpenerCommand> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?.to_owned();
    let args = parts.map(str::to_owned).collect();
    Some(OpenerCommand { program, args })
}

/// The platform's default URL opener.
fn platform_opener() -> OpenerCommand {
    if cfg!(target_os = "macos") {
        OpenerCommand {
            program: "open".to_owned(),
            args: Vec::new(),
        }
    } else if cfg!(windows) {
        OpenerCommand {
            program: "cmd".to_owned(),
            args: vec!["/C".to_owned(), "start".to_owned(), "\"\"".to_owned()],
        }
    } else {
        OpenerCommand {
            program: "xdg-open".to_owned(),
            args: Vec::new(),
        }
    }
}

/// Opens URLs with a browser or the platform opener.
///
/// The program is taken from `--browser`, then `$BROWSER`, then the platform
/// default (`open`, `start`, or `xdg-open`).
#[derive(Debug, Clone)]
pub struct SystemNavigator {
    opener: Option<OpenerCommand>,
}

impl SystemNavigator {
    /// Resolves the opener from an explicit command or the environment.
    pub fn resolve(browser: Option<&str>) -> Self {
        let configured = browser
            .map(str::to_owned)
            .or_else(|| env::var("BROWSER").ok())
            .filter(|command| !command.trim().is_empty());

        let opener = match configured {
            Some(command) => parse_opener_command(&command),
            None => Some(platform_opener()),
        };
        Self { opener }
    }
}

impl Navigator for SystemNavigator {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        let opener = self.opener.as_ref().ok_or(NavigateError::NoProgram)?;
        debug!(program = %opener.program, %url, "Launching opener");

        let status = Command::new(&opener.program)
            .args(&opener.args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .status()
            .map_err(|source| NavigateError::Launch {
                program: opener.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(NavigateError::Exit {
                program: opener.program.clone(),
                status,
            })
        }
    }
}

/// Writes the URL instead of opening it.
pub struct PrintNavigator<W> {
    out: Mutex<W>,
}

impl<W: Write> PrintNavigator<W> {
    /// Creates a navigator that prints to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write> Navigator for PrintNavigator<W> {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        writeln!(self.out.lock(), "{url}").map_err(|source| NavigateError::Launch {
            program: "stdout".to_owned(),
            source,
        })
    }
}

/// Either of the navigators, picked at runtime.
pub enum CliNavigator {
    /// Open in a browser.
    System(SystemNavigator),
    /// Print to stdout.
    Print(PrintNavigator<std::io::Stdout>),
}

impl Navigator for CliNavigator {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        match self {
            Self::System(navigator) => navigator.navigate(url),
            Self::Print(navigator) => navigator.navigate(url),
        }
    }
}
