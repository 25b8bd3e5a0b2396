//! Integration tests for `GET /api/download/{reference}`.

use http::{StatusCode, header};

use crate::helpers::{Behavior, FAKE_PDF, FakeConverter, MultipartForm, TestApp, dir_entries};

async fn convert_report(app: &TestApp) -> String {
    let response = app
        .convert(MultipartForm::new().file("file", "report.docx", b"PK docx"))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body["downloadUrl"]
        .as_str()
        .expect("downloadUrl")
        .to_string()
}

#[tokio::test]
async fn test_download_twice_serves_once() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;
    let url = convert_report(&app).await;

    let first = app.get(&url).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.bytes, FAKE_PDF);
    assert_eq!(first.header(header::CONTENT_TYPE), Some("application/pdf"));
    assert_eq!(
        first.header(header::CONTENT_DISPOSITION),
        Some("attachment; filename=\"report.pdf\"")
    );
    let expected_length = FAKE_PDF.len().to_string();
    assert_eq!(
        first.header(header::CONTENT_LENGTH),
        Some(expected_length.as_str())
    );

    let second = app.get(&url).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.body, serde_json::json!({ "error": "File not found" }));

    assert!(dir_entries(&app.output_dir()).is_empty());
}

#[tokio::test]
async fn test_unknown_reference_is_404() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    let response = app
        .get(&format!("/api/download/{}_report.pdf", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("File not found"));
}

#[tokio::test]
async fn test_malformed_references_are_404() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    for path in [
        "/api/download/report.pdf",
        "/api/download/not-a-uuid_report.pdf",
        "/api/download/..%2F..%2FCargo.toml",
        "/api/download/00000000-0000-0000-0000-000000000000_..%2Fuploads%2Fx.docx",
    ] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.error(), Some("File not found"), "{path}");
    }
}

#[tokio::test]
async fn test_download_does_not_reach_staged_inputs() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    let id = uuid::Uuid::new_v4();
    std::fs::write(app.upload_dir().join(format!("{id}_report.docx")), b"PK").expect("write");

    let response = app.get(&format!("/api/download/{id}_report.docx")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(dir_entries(&app.upload_dir()).len(), 1);
}

#[tokio::test]
async fn test_concurrent_downloads_serve_exactly_one() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;
    let url = convert_report(&app).await;

    let (a, b, c) = tokio::join!(app.get(&url), app.get(&url), app.get(&url));
    let statuses = [a.status, b.status, c.status];

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::NOT_FOUND)
            .count(),
        2
    );
}

#[tokio::test]
async fn test_long_filename_is_downloadable() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;
    let name = format!("{}.docx", "a".repeat(198));

    let response = app
        .convert(MultipartForm::new().file("file", &name, b"PK docx"))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let filename = response.body["filename"].as_str().expect("filename");
    assert!(filename.len() <= 200);
    assert!(filename.ends_with(".pdf"));

    let url = response.body["downloadUrl"].as_str().expect("downloadUrl");
    let download = app.get(url).await;
    assert_eq!(download.status, StatusCode::OK, "{:?}", download.body);
    assert_eq!(download.bytes, FAKE_PDF);
}

#[tokio::test]
async fn test_accented_filename_is_transliterated() {
    let app = TestApp::new(FakeConverter::new(Behavior::Succeed)).await;

    let response = app
        .convert(MultipartForm::new().file("file", "Übersicht résumé.docx", b"PK docx"))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["filename"], "Ubersicht_resume.pdf");

    let url = response.body["downloadUrl"].as_str().expect("downloadUrl");
    let download = app.get(url).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(
        download.header(header::CONTENT_DISPOSITION),
        Some("attachment; filename=\"Ubersicht_resume.pdf\"")
    );
}
