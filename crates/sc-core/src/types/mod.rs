//! Domain types for the stats client.
//!
//! # Module Organization
//!
//! - [`dispersion`] - Dispersion statistics and their rendered form
//! - [`operation`] - The client operations and their fallback messages
//! - [`status`] - The status indicator shown after an upload
//! - [`upload`] - Upload responses and the success sentinel
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use sc_core::{Dispersion, Operation, StatusLine, UploadResponse};
//! ```

mod dispersion;
mod operation;
mod status;
mod upload;

pub use dispersion::{Dispersion, DispersionField, DispersionResponse};
pub use operation::Operation;
pub use status::{StatusLine, StatusTone};
pub use upload::{UPLOAD_SUCCESS_MESSAGE, UploadOutcome, UploadResponse, UploadStatus};
