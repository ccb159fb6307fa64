//! Media store used when no storage backend is configured.

use async_trait::async_trait;

use slambook_core::{Error, Result};

use crate::{MediaKind, MediaStore};

/// Rejects every upload.
///
/// Installed when no Cloudinary credentials are present so that
/// attachment-bearing submissions fail loudly instead of persisting
/// entries whose media URLs point nowhere. Text-only submissions are
/// unaffected; the store is only consulted when a file part arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMediaStore;

#[async_trait]
impl MediaStore for DisabledMediaStore {
    async fn upload(&self, kind: MediaKind, _data: Vec<u8>, _content_type: &str) -> Result<String> {
        Err(Error::MediaUpload(format!(
            "Media storage is not configured; cannot accept {} attachments",
            kind.as_str()
        )))
    }
}
