//! Async HTTP client for the dispersion statistics API.
//!
//! [`StatsClient`] owns one `reqwest` connection pool and one
//! [`RequestSlot`] per operation. Every request is bounded by the configured
//! timeout and can be cancelled, either by a newer request for the same
//! operation or through the client-wide [`CancellationToken`].
//!
//! # Usage
//!
//! ```no_run
//! use sc_client::StatsClient;
//! use sc_core::Config;
//!
//! # async fn example() -> Result<(), sc_client::ClientError> {
//! let client = StatsClient::new(&Config::default())?;
//! let dispersion = client.fetch_dispersion("age").await?;
//! for line in dispersion.lines() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use sc_core::{Config, Dispersion, DispersionResponse, Operation, UploadOutcome, UploadResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::endpoint::Endpoints;
use crate::error::{ClientError, MissingInput};
use crate::payload::FilePayload;
use crate::slot::RequestSlot;

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Client for the statistics API.
///
/// All methods take `&self`; the client can be shared between tasks.
/// Different operations never interfere with each other, while a second call
/// of the same operation cancels the first (last-request-wins).
#[derive(Debug)]
pub struct StatsClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    success_message: String,
    shutdown: CancellationToken,
    upload_slot: RequestSlot,
    dispersion_slot: RequestSlot,
    box_plot_slot: RequestSlot,
    ping_slot: RequestSlot,
}

impl StatsClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        config.validate()?;
        let endpoints = Endpoints::from_config(&config.api)?;

        let http = reqwest::Client::builder()
            .timeout(config.api.timeout())
            .connect_timeout(config.api.connect_timeout())
            .user_agent(config.api.user_agent.as_str())
            .build()
            .map_err(ClientError::Build)?;

        debug!(base_url = %endpoints.root(), timeout_ms = config.api.timeout_ms, "Created stats client");

        Ok(Self {
            http,
            endpoints,
            success_message: config.upload.success_message.clone(),
            shutdown: CancellationToken::new(),
            upload_slot: RequestSlot::new(),
            dispersion_slot: RequestSlot::new(),
            box_plot_slot: RequestSlot::new(),
            ping_slot: RequestSlot::new(),
        })
    }

    /// Returns the resolved endpoints.
    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the token that aborts every in-flight request when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Aborts every in-flight request.
    ///
    /// Requests started afterwards are cancelled immediately.
    pub fn cancel_all(&self) {
        self.shutdown.cancel();
    }

    /// Aborts the in-flight request of one operation, if any.
    pub fn cancel(&self, operation: Operation) {
        self.slot(operation).cancel();
    }

    /// Uploads a file as multipart form field `file`.
    ///
    /// A well-formed JSON reply always yields an [`UploadOutcome`], accepted or
    /// not. Transport failures and non-JSON replies are errors.
    pub async fn upload(&self, payload: FilePayload) -> Result<UploadOutcome, ClientError> {
        const OP: Operation = Operation::Upload;

        if payload.is_empty() {
            return Err(ClientError::MissingInput(MissingInput::File));
        }

        let mime = payload.mime_type();
        let (file_name, bytes) = payload.into_parts();
        info!(file = %file_name, size = bytes.len(), "Uploading file");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ClientError::transport(OP, e))?;
        let request = self
            .http
            .post(self.endpoints.upload().clone())
            .multipart(Form::new().part(UPLOAD_FIELD, part));

        self.guarded(OP, async {
            let (status, body) = self.send(OP, request).await?;

            // A rejection may come back as 4xx with a JSON message; surface it.
            match serde_json::from_slice::<UploadResponse>(&body) {
                Ok(response) => {
                    let outcome = response.outcome(&self.success_message);
                    info!(%status, accepted = outcome.is_accepted(), "Upload answered");
                    Ok(outcome)
                }
                Err(_) if !status.is_success() => {
                    warn!(%status, "Upload failed");
                    Err(ClientError::Status {
                        operation: OP,
                        status,
                    })
                }
                Err(source) => Err(ClientError::Decode {
                    operation: OP,
                    source,
                }),
            }
        })
        .await
    }

    /// Fetches dispersion statistics for a column.
    ///
    /// A non-2xx status is a failure regardless of the body. A 2xx body with
    /// an `error` field becomes [`ClientError::ServerReported`].
    pub async fn fetch_dispersion(&self, column: &str) -> Result<Dispersion, ClientError> {
        const OP: Operation = Operation::Dispersion;

        require_column(column)?;
        let url = self.endpoints.calculate(column);
        info!(column, "Fetching dispersion");

        self.guarded(OP, async {
            let (status, body) = self.send(OP, self.http.get(url)).await?;
            if !status.is_success() {
                warn!(column, %status, "Dispersion request failed");
                return Err(ClientError::Status {
                    operation: OP,
                    status,
                });
            }

            let response: DispersionResponse =
                serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
                    operation: OP,
                    source,
                })?;

            response.into_result().map_err(|message| {
                warn!(column, %message, "Server reported an error");
                ClientError::server_reported(OP, message)
            })
        })
        .await
    }

    /// Returns the URL of the box-plot resource for a column.
    ///
    /// No request is made; the caller navigates to the URL.
    pub fn box_plot_url(&self, column: &str) -> Result<Url, ClientError> {
        require_column(column)?;
        Ok(self.endpoints.box_plot(column))
    }

    /// Downloads the box-plot resource for a column.
    pub async fn download_box_plot(&self, column: &str) -> Result<Vec<u8>, ClientError> {
        const OP: Operation = Operation::BoxPlot;

        let url = self.box_plot_url(column)?;
        info!(column, "Downloading box plot");

        self.guarded(OP, async {
            let (status, body) = self.send(OP, self.http.get(url)).await?;
            if !status.is_success() {
                warn!(column, %status, "Box plot request failed");
                return Err(ClientError::Status {
                    operation: OP,
                    status,
                });
            }
            Ok(body)
        })
        .await
    }

    /// Checks that the service root answers with a success status.
    pub async fn ping(&self) -> Result<StatusCode, ClientError> {
        const OP: Operation = Operation::Ping;

        let url = self.endpoints.root().clone();
        self.guarded(OP, async {
            let (status, _) = self.send(OP, self.http.get(url)).await?;
            if status.is_success() {
                Ok(status)
            } else {
                Err(ClientError::Status {
                    operation: OP,
                    status,
                })
            }
        })
        .await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    const fn slot(&self, operation: Operation) -> &RequestSlot {
        match operation {
            Operation::Upload => &self.upload_slot,
            Operation::Dispersion => &self.dispersion_slot,
            Operation::BoxPlot => &self.box_plot_slot,
            Operation::Ping => &self.ping_slot,
        }
    }

    /// Runs `request` in the operation's slot, racing it against cancellation.
    async fn guarded<T, F>(&self, operation: Operation, request: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let token = self.slot(operation).begin(&self.shutdown);

        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!(%operation, "Request cancelled");
                Err(ClientError::Cancelled { operation })
            }
            result = request => result,
        }
    }

    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(operation, e))?;
        let status = response.status();
        debug!(%operation, %status, "Response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(operation, e))?;
        Ok((status, body.to_vec()))
    }
}

/// Rejects an empty column name. Anything else, blanks included, is sent.
fn require_column(column: &str) -> Result<(), ClientError> {
    if column.is_empty() {
        Err(ClientError::MissingInput(MissingInput::Column))
    } else {
        Ok(())
    }
}
