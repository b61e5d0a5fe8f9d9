// crab-admin/tests/upload.rs
// Object storage uploader against a mocked storage endpoint

use std::io::Write;
use std::path::PathBuf;

use crab_admin::{ClientConfig, ClientError, HttpImageUploader, ImageUploader, PRODUCT_IMAGE_FOLDER};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

fn uploader(server: &MockServer) -> HttpImageUploader {
    ClientConfig::new("http://backend.invalid")
        .with_storage_url(format!("{}/storage", server.uri()))
        .with_token("admin-token")
        .build_uploader()
        .unwrap()
}

#[tokio::test]
async fn test_upload_returns_urls_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/Products"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": "https://cdn.example.com/Products/x.png" })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = vec![
        write_file(&dir, "front.png", b"\x89PNG fake"),
        write_file(&dir, "back.JPG", b"\xFF\xD8 fake"),
    ];

    let urls = uploader(&server)
        .upload_images(&files, PRODUCT_IMAGE_FOLDER)
        .await
        .unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls.iter().all(|u| u.starts_with("https://cdn.example.com/")));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn test_unsupported_format_rejected_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = vec![write_file(&dir, "notes.txt", b"hello")];

    let err = uploader(&server)
        .upload_images(&files, PRODUCT_IMAGE_FOLDER)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Upload(ref m) if m.contains("Unsupported format")));
}

#[tokio::test]
async fn test_empty_and_missing_files() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let empty = vec![write_file(&dir, "empty.png", b"")];
    let err = uploader(&server)
        .upload_images(&empty, PRODUCT_IMAGE_FOLDER)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Upload(_)));

    let missing = vec![dir.path().join("gone.png")];
    let err = uploader(&server)
        .upload_images(&missing, PRODUCT_IMAGE_FOLDER)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Io(_)));
}

#[tokio::test]
async fn test_storage_error_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/Products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = vec![write_file(&dir, "front.webp", b"RIFF fake")];

    let err = uploader(&server)
        .upload_images(&files, PRODUCT_IMAGE_FOLDER)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Upload(ref m) if m.contains("503") && m.contains("maintenance")));
}
