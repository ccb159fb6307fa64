//! Cloudinary-backed media store.
//!
//! Uses Cloudinary's unsigned upload API: a multipart POST to
//! `{base}/{cloud_name}/auto/upload` with an `upload_preset`. The `auto`
//! resource type lets one endpoint accept both audio and images.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use slambook_core::defaults::{
    DEFAULT_CLOUDINARY_BASE_URL, ENV_CLOUDINARY_BASE_URL, ENV_CLOUDINARY_CLOUD_NAME,
    ENV_CLOUDINARY_UPLOAD_PRESET, MEDIA_FOLDER, MEDIA_UPLOAD_TIMEOUT_SECS,
};
use slambook_core::{Error, Result};

use crate::{extension_for, MediaKind, MediaStore};

/// Media store delegating to Cloudinary.
pub struct CloudinaryStore {
    base_url: String,
    cloud_name: String,
    upload_preset: String,
    folder: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl CloudinaryStore {
    pub fn new(base_url: String, cloud_name: String, upload_preset: String) -> Self {
        Self {
            base_url,
            cloud_name,
            upload_preset,
            folder: MEDIA_FOLDER.to_string(),
            client: reqwest::Client::new(),
            timeout_secs: MEDIA_UPLOAD_TIMEOUT_SECS,
        }
    }

    /// Create from environment variables.
    /// Returns None if CLOUDINARY_CLOUD_NAME is not set.
    pub fn from_env() -> Option<Self> {
        let cloud_name = std::env::var(ENV_CLOUDINARY_CLOUD_NAME).ok()?;
        if cloud_name.is_empty() {
            return None;
        }
        let upload_preset = std::env::var(ENV_CLOUDINARY_UPLOAD_PRESET).unwrap_or_default();
        let base_url = std::env::var(ENV_CLOUDINARY_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_CLOUDINARY_BASE_URL.to_string());
        Some(Self::new(base_url, cloud_name, upload_preset))
    }
}

/// Cloudinary upload API response (fields we consume).
#[derive(Deserialize)]
struct CloudinaryResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn upload(&self, kind: MediaKind, data: Vec<u8>, content_type: &str) -> Result<String> {
        let url = format!("{}/{}/auto/upload", self.base_url, self.cloud_name);
        let size = data.len();

        let file_part = reqwest::multipart::Part::bytes(data)
            .file_name(format!("{}.{}", kind.as_str(), extension_for(content_type)))
            .mime_str(content_type)
            .map_err(|e| Error::MediaUpload(format!("Failed to create multipart: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", self.folder.clone());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .send()
            .await
            .map_err(|e| Error::MediaUpload(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::MediaUpload(format!(
                "Cloudinary returned {}: {}",
                status, body
            )));
        }

        let result: CloudinaryResponse = response
            .json()
            .await
            .map_err(|e| Error::MediaUpload(format!("Failed to parse upload response: {}", e)))?;

        // An unresolvable URL is a hard failure; an entry must never be
        // saved pointing at media that cannot be fetched back.
        let public_url = result
            .secure_url
            .or(result.url)
            .filter(|u| u.starts_with("http"));

        match public_url {
            Some(u) => {
                info!(
                    subsystem = "media",
                    component = "cloudinary",
                    op = "upload",
                    media_kind = kind.as_str(),
                    upload_bytes = size,
                    "Attachment stored"
                );
                Ok(u)
            }
            None => {
                warn!(
                    subsystem = "media",
                    component = "cloudinary",
                    media_kind = kind.as_str(),
                    "Upload response carried no usable URL"
                );
                Err(Error::MediaUpload(
                    "Storage backend returned no usable URL for the attachment".to_string(),
                ))
            }
        }
    }
}
