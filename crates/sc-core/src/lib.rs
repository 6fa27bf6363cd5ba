//! Core types, errors, and configuration for the stats-client workspace.
//!
//! This crate provides the foundational types shared by the client and the CLI:
//!
//! - [`ConfigError`] for configuration loading and validation failures
//! - [`Config`] and its sections ([`ApiConfig`], [`UploadConfig`])
//! - Domain types ([`Dispersion`], [`UploadResponse`], [`StatusLine`], [`Operation`])
//!
//! Nothing in here talks to the network. The HTTP side lives in `sc-client`.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiConfig, Config, QueryEncoding, UploadConfig};
pub use error::ConfigError;
pub use types::{
    Dispersion, DispersionField, DispersionResponse, Operation, StatusLine, StatusTone,
    UPLOAD_SUCCESS_MESSAGE, UploadOutcome, UploadResponse, UploadStatus,
};
