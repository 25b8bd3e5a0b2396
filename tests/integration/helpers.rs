//! Shared test helpers for integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use docpdf_converter::{ConversionError, ConversionJob, ConversionReport, DocumentConverter};
use docpdf_core::config::AppConfig;
use docpdf_service::StagingArea;

/// Bytes the fake converter writes as its PDF.
pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n% fake converter output\n%%EOF\n";

/// What the fake converter does when invoked.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Write [`FAKE_PDF`] to the output path and succeed.
    Succeed,
    /// Fail as if the process exited non-zero with this stderr.
    ExitWithError(String),
    /// Succeed without writing anything.
    NoOutput,
}

/// A recorded invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The job as handed to the converter.
    pub job: ConversionJob,
    /// Whether the staged input existed during the call.
    pub input_existed: bool,
}

/// In-process stand-in for the external converter.
#[derive(Debug)]
pub struct FakeConverter {
    behavior: Behavior,
    invocations: Mutex<Vec<Invocation>>,
}

impl FakeConverter {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            invocations: Mutex::new(Vec::new()),
        })
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().expect("lock").clone()
    }
}

#[async_trait]
impl DocumentConverter for FakeConverter {
    fn name(&self) -> &str {
        "fake"
    }

    async fn convert(&self, job: &ConversionJob) -> Result<ConversionReport, ConversionError> {
        self.invocations.lock().expect("lock").push(Invocation {
            job: job.clone(),
            input_existed: job.input_path.exists(),
        });

        match &self.behavior {
            Behavior::Succeed => {
                tokio::fs::write(&job.output_path, FAKE_PDF).await?;
                Ok(ConversionReport {
                    output_path: job.output_path.clone(),
                    output_size: FAKE_PDF.len() as u64,
                    duration_ms: 1,
                    stdout: String::new(),
                })
            }
            Behavior::ExitWithError(stderr) => Err(ConversionError::ProcessExecutionFailed {
                code: Some(1),
                stderr: stderr.clone(),
            }),
            Behavior::NoOutput => Err(ConversionError::NoOutputProduced {
                path: job.output_path.clone(),
            }),
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config, staging dirs pointing into a temp dir
    pub config: AppConfig,
    _temp: TempDir,
}

impl TestApp {
    /// App backed by `converter` with default configuration.
    pub async fn new(converter: Arc<dyn DocumentConverter>) -> Self {
        Self::with_config(converter, |_| {}).await
    }

    /// App backed by `converter`, with `configure` applied to the config.
    pub async fn with_config(
        converter: Arc<dyn DocumentConverter>,
        configure: impl FnOnce(&mut AppConfig),
    ) -> Self {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.staging.upload_dir = temp.path().join("uploads").to_string_lossy().to_string();
        config.staging.output_dir = temp.path().join("output").to_string_lossy().to_string();
        config.reaper.enabled = false;
        configure(&mut config);

        StagingArea::from_config(&config.staging)
            .ensure_directories()
            .await
            .expect("Failed to create staging dirs");

        let router = docpdf_api::build_app(docpdf_api::app::build_state(config.clone(), converter));

        Self {
            router,
            config,
            _temp: temp,
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.staging.upload_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.staging.output_dir)
    }

    /// POST a multipart form to `/api/convert`.
    pub async fn convert(&self, form: MultipartForm) -> TestResponse {
        let (content_type, body) = form.build();
        let req = Request::builder()
            .method("POST")
            .uri("/api/convert")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// GET `path`.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send an arbitrary request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Body parsed as JSON, `Null` when it is not JSON
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Minimal multipart/form-data body builder.
#[derive(Debug, Default)]
pub struct MultipartForm {
    parts: Vec<(String, Option<String>, Vec<u8>)>,
}

const BOUNDARY: &str = "----docpdf-test-boundary";

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file part.
    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.parts
            .push((name.to_string(), Some(file_name.to_string()), data.to_vec()));
        self
    }

    /// Add a text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts
            .push((name.to_string(), None, value.as_bytes().to_vec()));
        self
    }

    /// The `Content-Type` header value and the encoded body.
    pub fn build(self) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, file_name, data) in self.parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file_name) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(&data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        (format!("multipart/form-data; boundary={BOUNDARY}"), body)
    }
}

/// Names of the entries in `dir`.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
        .collect()
}
