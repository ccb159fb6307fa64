//! Mock media store for deterministic testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use slambook_core::{Error, Result};

use crate::{MediaKind, MediaStore};

/// One recorded upload call.
#[derive(Debug, Clone)]
pub struct MockUpload {
    pub kind: MediaKind,
    pub size: usize,
    pub content_type: String,
}

/// In-memory media store that returns deterministic URLs and records
/// every call.
#[derive(Clone, Default)]
pub struct MockMediaStore {
    uploads: Arc<Mutex<Vec<MockUpload>>>,
    fail: bool,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload fail, for exercising the abort path.
    pub fn failing() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Calls recorded so far.
    pub fn uploads(&self) -> Vec<MockUpload> {
        self.uploads.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, kind: MediaKind, data: Vec<u8>, content_type: &str) -> Result<String> {
        if self.fail {
            return Err(Error::MediaUpload("mock upload failure".to_string()));
        }

        let mut uploads = self.uploads.lock().expect("mock lock poisoned");
        let n = uploads.len();
        uploads.push(MockUpload {
            kind,
            size: data.len(),
            content_type: content_type.to_string(),
        });

        Ok(format!("https://media.test/{}-{}", kind.as_str(), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_absolute_urls_and_records_calls() {
        let store = MockMediaStore::new();
        let url = store
            .upload(MediaKind::Audio, vec![1, 2, 3], "audio/webm")
            .await
            .unwrap();
        assert_eq!(url, "https://media.test/audio-0");

        let url = store
            .upload(MediaKind::Doodle, vec![4], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "https://media.test/doodle-1");

        let uploads = store.uploads();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].size, 3);
        assert_eq!(uploads[1].content_type, "image/png");
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let store = MockMediaStore::failing();
        let err = store
            .upload(MediaKind::Audio, vec![], "audio/webm")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MediaUpload(_)));
    }
}
