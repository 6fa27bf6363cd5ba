//! CLI entry point for the dispersion statistics client.
//!
//! This binary talks to a running statistics API: it uploads a dataset,
//! prints the dispersion of a column, and opens the server-rendered box plot.
//!
//! # Usage
//!
//! ```bash
//! stats-client [OPTIONS] <COMMAND>
//!
//! # Upload a CSV file
//! stats-client upload data.csv
//!
//! # Print standard deviation, variance, range and IQR of a column
//! stats-client dispersion age
//!
//! # Open the box plot in a browser (or save it)
//! stats-client boxplot age
//! stats-client boxplot age --output age.html
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod browser;
mod terminal;

use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use sc_client::{StatsApp, StatsClient};
use sc_core::{Config, QueryEncoding};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::browser::{CliNavigator, PrintNavigator, SystemNavigator};
use crate::terminal::TerminalView;

type App = StatsApp<TerminalView<std::io::Stdout, std::io::Stderr>, CliNavigator>;

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Client for a dispersion statistics API.
///
/// Uploads a dataset and asks the service for the standard deviation,
/// variance, range, and interquartile range of a column, or for its box plot.
#[derive(Parser)]
#[command(name = "stats-client", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the statistics API.
    ///
    /// Defaults to `http://127.0.0.1:5001` if not specified.
    #[arg(long, global = true, env = "STATS_CLIENT_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true, env = "STATS_CLIENT_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// JSON configuration file.
    #[arg(long, global = true, env = "STATS_CLIENT_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Send column names without percent-encoding.
    #[arg(long, global = true)]
    raw_query: bool,

    /// Program used to open the box plot (overrides $BROWSER).
    #[arg(long, global = true)]
    browser: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Upload a dataset to the service.
    Upload {
        /// File to upload.
        file: Option<Utf8PathBuf>,
    },

    /// Print dispersion statistics for a column.
    Dispersion {
        /// Column name.
        column: Option<String>,
    },

    /// Open the box plot of a column.
    Boxplot {
        /// Column name.
        column: Option<String>,

        /// Save the box plot to a file instead of opening it.
        #[arg(short, long, conflicts_with = "print_url")]
        output: Option<Utf8PathBuf>,

        /// Print the box plot URL instead of opening it.
        #[arg(long)]
        print_url: bool,
    },

    /// Check that the service is reachable.
    Ping,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so that
/// command output stays clean. HTTP internals are filtered to `warn`.
fn init_tracing(verbose: bool, use_ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!(
            "{level},hyper=warn,hyper_util=warn,reqwest=warn,h2=warn,rustls=warn"
        ))
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional config file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the file can't be loaded or the result is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load {}: {}", path, e))?,
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.api.timeout_ms = timeout_ms;
    }
    if cli.raw_query {
        config.api.query_encoding = QueryEncoding::Raw;
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
    Ok(config)
}

/// Creates the app for a command.
fn create_app(config: &Config, cli: &Cli, print_url: bool, color: bool) -> color_eyre::Result<App> {
    let client = StatsClient::new(config)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create client: {}", e))?;

    let navigator = if print_url {
        CliNavigator::Print(PrintNavigator::new(std::io::stdout()))
    } else {
        CliNavigator::System(SystemNavigator::resolve(cli.browser.as_deref()))
    };

    Ok(StatsApp::new(client, TerminalView::stdio(color), navigator))
}

/// Cancels every in-flight request on Ctrl-C.
fn cancel_on_interrupt(app: &App) {
    let token = app.client().cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling requests");
            token.cancel();
        }
    });
}

const fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Uploads a file and prints the status line.
async fn run_upload(app: &App, file: Option<&Utf8PathBuf>) -> ExitCode {
    info!(file = ?file, "Uploading");
    let result = app.upload_file(file.map(Utf8PathBuf::as_path)).await;
    exit_code(result.is_ok_and(|outcome| outcome.is_accepted()))
}

/// Prints the dispersion statistics of a column.
async fn run_dispersion(app: &App, column: &str) -> ExitCode {
    exit_code(app.fetch_dispersion(column).await.is_ok())
}

/// Opens, prints, or saves the box plot of a column.
async fn run_boxplot(
    app: &App,
    column: &str,
    output: Option<&Utf8PathBuf>,
) -> color_eyre::Result<ExitCode> {
    let Some(output) = output else {
        return Ok(exit_code(app.open_box_plot(column).is_ok()));
    };

    let Ok(bytes) = app.download_box_plot(column).await else {
        return Ok(ExitCode::FAILURE);
    };
    tokio::fs::write(output.as_std_path(), &bytes).await?;
    info!(path = %output, size = bytes.len(), "Box plot written");
    Ok(ExitCode::SUCCESS)
}

/// Checks that the service answers.
async fn run_ping(app: &App) -> color_eyre::Result<ExitCode> {
    let stdout = std::io::stdout();
    match app.client().ping().await {
        Ok(status) => {
            writeln!(
                stdout.lock(),
                "{} is reachable ({status})",
                app.client().endpoints().root()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let stderr = std::io::stderr();
            writeln!(stderr.lock(), "{}", err.user_message())?;
            warn!(error = %err, "Ping failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    init_tracing(cli.verbose, color);

    // 4. Build the client
    let config = build_config(&cli)?;
    let print_url = matches!(cli.command, Commands::Boxplot { print_url: true, .. });
    let app = create_app(&config, &cli, print_url, color && std::io::stdout().is_terminal())?;
    cancel_on_interrupt(&app);

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Upload { file } => Ok(run_upload(&app, file.as_ref()).await),
        Commands::Dispersion { column } => {
            Ok(run_dispersion(&app, column.as_deref().unwrap_or_default()).await)
        }
        Commands::Boxplot { column, output, .. } => {
            run_boxplot(&app, column.as_deref().unwrap_or_default(), output.as_ref()).await
        }
        Commands::Ping => run_ping(&app).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_config_overrides() {
        let cli = Cli::parse_from([
            "stats-client",
            "--base-url",
            "http://stats.local:8080",
            "--timeout-ms",
            "1500",
            "--raw-query",
            "dispersion",
            "age",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.api.base_url, "http://stats.local:8080");
        assert_eq!(config.api.timeout_ms, 1500);
        assert_eq!(config.api.query_encoding, QueryEncoding::Raw);
    }

    #[test]
    fn test_build_config_rejects_zero_timeout() {
        let cli = Cli::parse_from(["stats-client", "--timeout-ms", "0", "ping"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_missing_arguments_parse() {
        let cli = Cli::parse_from(["stats-client", "dispersion"]);
        assert!(matches!(cli.command, Commands::Dispersion { column: None }));

        let cli = Cli::parse_from(["stats-client", "upload"]);
        assert!(matches!(cli.command, Commands::Upload { file: None }));
    }

    #[test]
    fn test_output_conflicts_with_print_url() {
        let result = Cli::try_parse_from([
            "stats-client",
            "boxplot",
            "age",
            "--output",
            "age.html",
            "--print-url",
        ]);
        assert!(result.is_err());
    }
}
