//! Async client for the dispersion statistics API.
//!
//! The service stores an uploaded dataset and computes measures of spread for
//! a named column. This crate covers the client side only:
//!
//! - [`StatsClient`] issues the HTTP requests (upload, dispersion, box plot)
//! - [`Endpoints`] builds the request URLs from the configured base
//! - [`RequestSlot`] gives each operation last-request-wins cancellation
//! - [`StatsView`] and [`Navigator`] are the seams a UI plugs into
//! - [`StatsApp`] binds operation outcomes to those seams
//!
//! # Crate Dependencies
//!
//! ```text
//! sc-cli ──► sc-client ──► sc-core
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use sc_client::{NavigateError, Navigator, StatsApp, StatsClient, StatsView};
//! use sc_core::{Config, StatusLine};
//! use url::Url;
//!
//! struct Stdout;
//!
//! impl StatsView for Stdout {
//!     fn prompt(&self, message: &str) { println!("? {message}"); }
//!     fn show_upload_status(&self, status: &StatusLine) { println!("{}", status.text); }
//!     fn show_dispersion(&self, lines: &[String]) { println!("{}", lines.join("\n")); }
//!     fn alert(&self, message: &str) { eprintln!("! {message}"); }
//! }
//!
//! struct PrintUrl;
//!
//! impl Navigator for PrintUrl {
//!     fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
//!         println!("{url}");
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<(), sc_client::ClientError> {
//! let app = StatsApp::new(StatsClient::new(&Config::default())?, Stdout, PrintUrl);
//! app.fetch_dispersion("age").await?;
//! app.open_box_plot("age")?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod app;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod payload;
pub mod slot;
pub mod view;

pub use app::StatsApp;
pub use client::{StatsClient, UPLOAD_FIELD};
pub use endpoint::Endpoints;
pub use error::{
    ClientError, ErrorKind, MISSING_COLUMN_PROMPT, MISSING_FILE_PROMPT, MissingInput,
    NavigateError,
};
pub use payload::FilePayload;
pub use slot::RequestSlot;
pub use view::{Navigator, StatsView};
