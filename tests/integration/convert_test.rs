//! Integration tests for `POST /api/convert`.

use axum::body::Body;
use http::{Request, StatusCode, header};

use crate::helpers::{Behavior, FakeConverter, MultipartForm, TestApp, dir_entries};

const DOCX: &[u8] = b"PK\x03\x04 fake docx body";

#[tokio::test]
async fn test_convert_letter_landscape_without_optimize() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::new(converter.clone()).await;

    let response = app
        .convert(
            MultipartForm::new()
                .file("file", "report.docx", DOCX)
                .text("pageSize", "Letter")
                .text("orientation", "Landscape")
                .text("preserveFormatting", "true")
                .text("optimizePDF", "false"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["filename"], "report.pdf");

    let invocations = converter.invocations();
    assert_eq!(invocations.len(), 1);
    let job = &invocations[0].job;
    assert!(invocations[0].input_existed);

    let args = job.to_args();
    assert_eq!(&args[0], "--input");
    assert_eq!(&args[2], "--output");
    assert_eq!(
        &args[4..],
        ["--page-size", "Letter", "--orientation", "Landscape", "--preserve-formatting"]
    );

    let output_name = job
        .output_path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("output name");
    assert!(output_name.ends_with("_report.pdf"));
    assert_eq!(
        response.body["downloadUrl"],
        format!("/api/download/{output_name}")
    );
    let id = output_name.trim_end_matches("_report.pdf");
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let input_name = job
        .input_path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("input name");
    assert_eq!(input_name, format!("{id}_report.docx"));
}

#[tokio::test]
async fn test_convert_defaults_when_fields_absent() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::new(converter.clone()).await;

    let response = app
        .convert(MultipartForm::new().file("file", "memo.doc", DOCX))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let options = &converter.invocations()[0].job.options;
    assert_eq!(options.page_size, "A4");
    assert_eq!(options.orientation, "Portrait");
    assert!(options.preserve_formatting);
    assert!(options.optimize_pdf);
}

#[tokio::test]
async fn test_boolean_fields_are_true_only_for_literal_true() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::new(converter.clone()).await;

    app.convert(
        MultipartForm::new()
            .file("file", "memo.docx", DOCX)
            .text("preserveFormatting", "yes")
            .text("optimizePDF", "TRUE"),
    )
    .await;

    let options = &converter.invocations()[0].job.options;
    assert!(!options.preserve_formatting);
    assert!(!options.optimize_pdf);
}

#[tokio::test]
async fn test_staged_input_removed_after_success() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    let response = app
        .convert(MultipartForm::new().file("file", "report.docx", DOCX))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(dir_entries(&app.upload_dir()).is_empty());
    assert_eq!(dir_entries(&app.output_dir()).len(), 1);
}

#[tokio::test]
async fn test_unsupported_extensions_rejected_without_staging() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::new(converter.clone()).await;

    for name in ["report.pdf", "report.txt", "report", "report.docx.exe"] {
        let response = app
            .convert(MultipartForm::new().file("file", name, DOCX))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{name}");
        assert_eq!(response.error(), Some("Invalid file type"));
    }

    assert!(converter.invocations().is_empty());
    assert!(dir_entries(&app.upload_dir()).is_empty());
    assert!(dir_entries(&app.output_dir()).is_empty());
}

#[tokio::test]
async fn test_uppercase_extension_accepted() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    let response = app
        .convert(MultipartForm::new().file("file", "REPORT.DOCX", DOCX))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["filename"], "REPORT.pdf");
}

#[tokio::test]
async fn test_missing_file_part() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::new(converter.clone()).await;

    let response = app
        .convert(MultipartForm::new().text("pageSize", "A4"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, serde_json::json!({ "error": "No file uploaded" }));
    assert!(converter.invocations().is_empty());
}

#[tokio::test]
async fn test_file_field_without_filename_counts_as_missing() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    let response = app
        .convert(MultipartForm::new().text("file", "not a file"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("No file uploaded"));
}

#[tokio::test]
async fn test_empty_filename() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::new(converter.clone()).await;

    let response = app
        .convert(MultipartForm::new().file("file", "", DOCX))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("No selected file"));
    assert!(converter.invocations().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_counts_as_missing_file() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/convert")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("request"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("No file uploaded"));
}

#[tokio::test]
async fn test_traversal_filename_is_sanitized() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::new(converter.clone()).await;

    let response = app
        .convert(MultipartForm::new().file("file", "../../etc/passwd.docx", DOCX))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let filename = response.body["filename"].as_str().expect("filename");
    assert!(filename.ends_with("passwd.pdf"), "{filename}");
    assert!(!filename.contains('/'));
    assert!(!filename.contains(".."));

    let job = &converter.invocations()[0].job;
    assert_eq!(job.input_path.parent(), Some(app.upload_dir().as_path()));
    assert_eq!(job.output_path.parent(), Some(app.output_dir().as_path()));
}

#[tokio::test]
async fn test_process_failure_returns_stderr() {
    let converter = FakeConverter::new(Behavior::ExitWithError(
        "Conversion failed: document is password protected".to_string(),
    ));
    let app = TestApp::new(converter.clone()).await;

    let response = app
        .convert(MultipartForm::new().file("file", "secret.docx", DOCX))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = response.error().expect("error message");
    assert!(error.contains("document is password protected"), "{error}");
    assert_eq!(converter.invocations().len(), 1);
    assert!(dir_entries(&app.upload_dir()).is_empty());
    assert!(dir_entries(&app.output_dir()).is_empty());
}

#[tokio::test]
async fn test_missing_output_has_distinct_message() {
    let converter = FakeConverter::new(Behavior::NoOutput);
    let app = TestApp::new(converter.clone()).await;

    let response = app
        .convert(MultipartForm::new().file("file", "report.docx", DOCX))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.error(),
        Some("Conversion failed - no output file created")
    );
    assert_eq!(converter.invocations().len(), 1);
    assert!(dir_entries(&app.upload_dir()).is_empty());
}

#[tokio::test]
async fn test_upload_over_limit_is_413() {
    let converter = FakeConverter::new(Behavior::Succeed);
    let app = TestApp::with_config(converter.clone(), |config| {
        config.staging.max_upload_size_bytes = 1024;
    })
    .await;

    let big = vec![b'x'; 4096];
    let response = app
        .convert(MultipartForm::new().file("file", "big.docx", &big))
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.error().is_some());
    assert!(converter.invocations().is_empty());
    assert!(dir_entries(&app.upload_dir()).is_empty());
}
