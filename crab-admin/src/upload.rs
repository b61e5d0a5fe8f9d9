//! Image upload to object storage
//!
//! POST {storage_url}/{folder} — multipart `file` part → `{ url }`
//!
//! Object names are random UUIDs keeping the original extension.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Storage folder for product images
pub const PRODUCT_IMAGE_FOLDER: &str = "Products";

/// Maximum file size (20MB)
const MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Uploads local image files and returns their public URLs in input order
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload_images(&self, files: &[PathBuf], folder: &str) -> ClientResult<Vec<String>>;
}

/// Upload response
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Object storage uploader over HTTP
#[derive(Debug, Clone)]
pub struct HttpImageUploader {
    client: Client,
    storage_url: String,
    token: Option<String>,
}

impl HttpImageUploader {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            storage_url: config.storage_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    async fn upload_one(&self, path: &Path, folder: &str) -> ClientResult<String> {
        let ext = image_extension(path)?;

        let size = tokio::fs::metadata(path).await?.len();
        if size == 0 {
            return Err(ClientError::Upload(format!("Empty file: {}", path.display())));
        }
        if size > MAX_FILE_SIZE {
            return Err(ClientError::Upload(format!(
                "File too large: {} bytes (max {})",
                size, MAX_FILE_SIZE
            )));
        }

        let data = tokio::fs::read(path).await?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let object_name = format!("{}.{}", Uuid::new_v4(), ext);
        let part = Part::bytes(data)
            .file_name(object_name.clone())
            .mime_str(mime.as_ref())?;

        let url = format!("{}/{}", self.storage_url, folder);
        let mut req = self.client.post(&url).multipart(Form::new().part("file", part));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ClientError::Upload(format!("{status}: {text}")));
        }
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        tracing::debug!(file = %path.display(), object = %object_name, url = %body.url, "Image uploaded");
        Ok(body.url)
    }
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    async fn upload_images(&self, files: &[PathBuf], folder: &str) -> ClientResult<Vec<String>> {
        tracing::info!(count = files.len(), folder, "Uploading images");
        try_join_all(files.iter().map(|path| self.upload_one(path, folder))).await
    }
}

/// Lowercased extension of a supported image file
fn image_extension(path: &Path) -> ClientResult<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(ClientError::Upload(format!(
            "Unsupported format: {ext}. Supported: png, jpg, jpeg, webp"
        )));
    }
    Ok(ext)
}
