//! Binding of client operations to a view.
//!
//! [`StatsApp`] is what a UI calls when the user submits the upload form or
//! presses one of the column buttons. It runs the request and writes the
//! outcome to the right region of the [`StatsView`]:
//!
//! | Outcome | Upload | Dispersion | Box plot |
//! |---|---|---|---|
//! | missing input | prompt | prompt | prompt |
//! | success | green status | four lines | navigate |
//! | server-reported | red status (server text) | alert (server text) | - |
//! | transport failure | red status (fallback) | alert (fallback) | alert |
//! | cancelled | nothing | nothing | nothing |

use camino::Utf8Path;
use sc_core::{Dispersion, StatusLine, UploadOutcome};
use tracing::debug;
use url::Url;

use crate::client::StatsClient;
use crate::error::{ClientError, ErrorKind, MissingInput};
use crate::payload::FilePayload;
use crate::view::{Navigator, StatsView};

/// A [`StatsClient`] wired to a view and a navigator.
///
/// Every method returns the operation result after rendering it, so callers
/// can decide on exit codes without rendering anything themselves.
#[derive(Debug)]
pub struct StatsApp<V, N> {
    client: StatsClient,
    view: V,
    navigator: N,
}

impl<V: StatsView, N: Navigator> StatsApp<V, N> {
    /// Creates an app from its parts.
    pub const fn new(client: StatsClient, view: V, navigator: N) -> Self {
        Self {
            client,
            view,
            navigator,
        }
    }

    /// Returns the underlying client.
    #[inline]
    #[must_use]
    pub const fn client(&self) -> &StatsClient {
        &self.client
    }

    /// Returns the view.
    #[inline]
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Uploads the selected file, if any, and updates the status indicator.
    pub async fn upload(&self, payload: Option<FilePayload>) -> Result<UploadOutcome, ClientError> {
        let result = match payload {
            Some(payload) => self.client.upload(payload).await,
            None => Err(ClientError::MissingInput(MissingInput::File)),
        };
        self.render_upload(result)
    }

    /// Reads the file at `path`, if given, and uploads it.
    pub async fn upload_file(&self, path: Option<&Utf8Path>) -> Result<UploadOutcome, ClientError> {
        let payload = match path {
            Some(path) => match FilePayload::read(path).await {
                Ok(payload) => Some(payload),
                Err(err) => return self.render_upload(Err(err)),
            },
            None => None,
        };
        self.upload(payload).await
    }

    /// Fetches and renders dispersion statistics for a column.
    pub async fn fetch_dispersion(&self, column: &str) -> Result<Dispersion, ClientError> {
        match self.client.fetch_dispersion(column).await {
            Ok(dispersion) => {
                self.view.show_dispersion(&dispersion.lines());
                Ok(dispersion)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Navigates to the box-plot resource for a column.
    pub fn open_box_plot(&self, column: &str) -> Result<Url, ClientError> {
        let result = self.client.box_plot_url(column).and_then(|url| {
            debug!(%url, "Navigating to box plot");
            match self.navigator.navigate(&url) {
                Ok(()) => Ok(url),
                Err(source) => Err(ClientError::Navigate { url, source }),
            }
        });

        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    /// Downloads the box-plot resource for a column.
    pub async fn download_box_plot(&self, column: &str) -> Result<Vec<u8>, ClientError> {
        let result = self.client.download_box_plot(column).await;
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    fn render_upload(
        &self,
        result: Result<UploadOutcome, ClientError>,
    ) -> Result<UploadOutcome, ClientError> {
        match &result {
            Ok(outcome) => self.view.show_upload_status(&outcome.status_line()),
            Err(err) => match err.kind() {
                ErrorKind::UserInputMissing => self.view.prompt(&err.user_message()),
                ErrorKind::Cancelled => debug!("Upload superseded"),
                ErrorKind::ServerReported | ErrorKind::TransportFailure => self
                    .view
                    .show_upload_status(&StatusLine::negative(err.user_message())),
            },
        }
        result
    }

    fn report(&self, err: &ClientError) {
        match err.kind() {
            ErrorKind::UserInputMissing => self.view.prompt(&err.user_message()),
            ErrorKind::Cancelled => debug!(error = %err, "Request superseded"),
            ErrorKind::ServerReported | ErrorKind::TransportFailure => {
                self.view.alert(&err.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::NavigateError;
    use parking_lot::Mutex;
    use sc_core::{Config, StatusTone};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Rendered {
        Prompt(String),
        Status(StatusLine),
        Dispersion(Vec<String>),
        Alert(String),
    }

    #[derive(Debug, Default)]
    struct RecordingView {
        events: Mutex<Vec<Rendered>>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<Rendered> {
            self.events.lock().clone()
        }
    }

    impl StatsView for RecordingView {
        fn prompt(&self, message: &str) {
            self.events.lock().push(Rendered::Prompt(message.to_owned()));
        }

        fn show_upload_status(&self, status: &StatusLine) {
            self.events.lock().push(Rendered::Status(status.clone()));
        }

        fn show_dispersion(&self, lines: &[String]) {
            self.events.lock().push(Rendered::Dispersion(lines.to_vec()));
        }

        fn alert(&self, message: &str) {
            self.events.lock().push(Rendered::Alert(message.to_owned()));
        }
    }

    #[derive(Debug, Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
            if self.fail {
                return Err(NavigateError::NoProgram);
            }
            self.visited.lock().push(url.to_string());
            Ok(())
        }
    }

    fn app_for(server: &MockServer) -> StatsApp<RecordingView, RecordingNavigator> {
        let mut config = Config::default();
        config.api.base_url = server.uri();
        StatsApp::new(
            StatsClient::new(&config).unwrap(),
            RecordingView::default(),
            RecordingNavigator::default(),
        )
    }

    async fn request_count(server: &MockServer) -> usize {
        server.received_requests().await.map_or(0, |r| r.len())
    }

    #[tokio::test]
    async fn test_missing_inputs_prompt_without_requests() {
        let server = MockServer::start().await;
        let app = app_for(&server);

        assert!(app.upload(None).await.is_err());
        assert!(app.upload_file(None).await.is_err());
        assert!(app.fetch_dispersion("").await.is_err());
        assert!(app.open_box_plot("").is_err());

        assert_eq!(
            app.view().events(),
            vec![
                Rendered::Prompt("Please select a file first.".to_owned()),
                Rendered::Prompt("Please select a file first.".to_owned()),
                Rendered::Prompt("Please enter a column name.".to_owned()),
                Rendered::Prompt("Please enter a column name.".to_owned()),
            ]
        );
        assert!(app.navigator.visited.lock().is_empty());
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_upload_status_follows_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "File uploaded successfully"})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "File uploaded!"})),
            )
            .mount(&server)
            .await;

        let app = app_for(&server);
        let payload = FilePayload::new("data.csv", b"age\n30".to_vec());
        app.upload(Some(payload.clone())).await.unwrap();
        app.upload(Some(payload)).await.unwrap();

        assert_eq!(
            app.view().events(),
            vec![
                Rendered::Status(StatusLine {
                    text: "File uploaded successfully".to_owned(),
                    tone: StatusTone::Affirmative,
                }),
                Rendered::Status(StatusLine {
                    text: "File uploaded!".to_owned(),
                    tone: StatusTone::Negative,
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_transport_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = app_for(&server);
        assert!(app
            .upload(Some(FilePayload::new("data.csv", b"x".to_vec())))
            .await
            .is_err());
        assert_eq!(
            app.view().events(),
            vec![Rendered::Status(StatusLine::negative("File upload failed."))]
        );
    }

    #[tokio::test]
    async fn test_upload_file_read_error() {
        let server = MockServer::start().await;
        let app = app_for(&server);

        let err = app
            .upload_file(Some(Utf8Path::new("/no/such/data.csv")))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ReadFile { .. }));
        assert_eq!(
            app.view().events(),
            vec![Rendered::Status(StatusLine::negative(
                "Could not read /no/such/data.csv."
            ))]
        );
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_dispersion_renders_four_lines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calculate"))
            .and(query_param("column", "age"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "standard_deviation": 2.5,
                "variance": 6.25,
                "range": 10,
                "interquartile_range": 4
            })))
            .mount(&server)
            .await;

        let app = app_for(&server);
        app.fetch_dispersion("age").await.unwrap();

        let events = app.view().events();
        let [Rendered::Dispersion(lines)] = events.as_slice() else {
            panic!("expected one dispersion render, got {events:?}");
        };
        insta::assert_snapshot!(lines.join("\n"), @r"
        Standard Deviation: 2.50
        Variance: 6.25
        Range: 10.00
        Interquartile Range: 4.00
        ");
    }

    #[tokio::test]
    async fn test_dispersion_404_alerts_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calculate"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let app = app_for(&server);
        assert!(app.fetch_dispersion("nonexistent").await.is_err());
        assert_eq!(
            app.view().events(),
            vec![Rendered::Alert(
                "Failed to calculate. Make sure the API is running and the column name is correct."
                    .to_owned()
            )]
        );
    }

    #[tokio::test]
    async fn test_dispersion_server_error_alerts_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calculate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "column not found"})),
            )
            .mount(&server)
            .await;

        let app = app_for(&server);
        assert!(app.fetch_dispersion("badcol").await.is_err());
        assert_eq!(
            app.view().events(),
            vec![Rendered::Alert("column not found".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_dispersion_empty_error_alerts_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calculate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": ""})))
            .mount(&server)
            .await;

        let app = app_for(&server);
        let err = app.fetch_dispersion("age").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
        assert_eq!(
            app.view().events(),
            vec![Rendered::Alert(
                "Failed to calculate. Make sure the API is running and the column name is correct."
                    .to_owned()
            )]
        );
    }

    #[tokio::test]
    async fn test_superseded_dispersion_renders_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calculate"))
            .and(query_param("column", "slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/calculate"))
            .and(query_param("column", "fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "standard_deviation": 1.0,
                "variance": 1.0,
                "range": 3.0,
                "interquartile_range": 2.0
            })))
            .mount(&server)
            .await;

        let app = app_for(&server);
        let (slow, fast) = tokio::join!(app.fetch_dispersion("slow"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            app.fetch_dispersion("fast").await
        });

        assert_eq!(slow.unwrap_err().kind(), ErrorKind::Cancelled);
        assert!(fast.is_ok());
        assert_eq!(
            app.view().events(),
            vec![Rendered::Dispersion(vec![
                "Standard Deviation: 1.00".to_owned(),
                "Variance: 1.00".to_owned(),
                "Range: 3.00".to_owned(),
                "Interquartile Range: 2.00".to_owned(),
            ])]
        );
    }

    #[tokio::test]
    async fn test_open_box_plot_navigates() {
        let server = MockServer::start().await;
        let app = app_for(&server);

        let url = app.open_box_plot("age").unwrap();
        let expected = format!("{}/boxplot?column=age", server.uri());
        assert_eq!(url.as_str(), expected);
        assert_eq!(*app.navigator.visited.lock(), vec![expected]);
        assert!(app.view().events().is_empty());
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_open_box_plot_navigation_failure_alerts() {
        let server = MockServer::start().await;
        let mut config = Config::default();
        config.api.base_url = server.uri();
        let app = StatsApp::new(
            StatsClient::new(&config).unwrap(),
            RecordingView::default(),
            RecordingNavigator {
                fail: true,
                ..RecordingNavigator::default()
            },
        );

        let err = app.open_box_plot("age").unwrap_err();
        assert!(matches!(err, ClientError::Navigate { .. }));
        assert_eq!(
            app.view().events(),
            vec![Rendered::Alert(format!(
                "Could not open {}/boxplot?column=age.",
                server.uri()
            ))]
        );
    }
}
