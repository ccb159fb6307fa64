//! # slambook-media
//!
//! Media intake for slambook attachments.
//!
//! An entry submission may carry at most one voice clip and one doodle
//! image. Binary payloads are handed to a [`MediaStore`], which delegates
//! storage to an external object host and returns a public URL for
//! embedding in the entry. The store is an injected capability so the
//! entry path stays testable with [`mock::MockMediaStore`].

pub mod cloudinary;
pub mod disabled;
pub mod mock;

use async_trait::async_trait;

use slambook_core::Result;

pub use cloudinary::CloudinaryStore;
pub use disabled::DisabledMediaStore;
pub use mock::MockMediaStore;

/// Kind of attachment being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Voice recording.
    Audio,
    /// Drawn signature/doodle image.
    Doodle,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Doodle => "doodle",
        }
    }
}

/// Capability that stores a binary attachment and returns a public URL.
///
/// Failure must abort entry creation: an entry is never persisted with a
/// missing or partial media URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload one attachment and return its public absolute URL.
    async fn upload(&self, kind: MediaKind, data: Vec<u8>, content_type: &str) -> Result<String>;
}

/// File extension for a payload's MIME type, used for upload filenames.
pub(crate) fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" => "wav",
        "audio/ogg" => "ogg",
        "audio/webm" => "webm",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_as_str() {
        assert_eq!(MediaKind::Audio.as_str(), "audio");
        assert_eq!(MediaKind::Doodle.as_str(), "doodle");
    }

    #[test]
    fn test_extension_for_known_types() {
        assert_eq!(extension_for("audio/webm"), "webm");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("application/octet-stream"), "bin");
    }
}
