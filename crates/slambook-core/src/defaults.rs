//! Centralized default constants for the slambook service.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates should reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// SLUGS
// =============================================================================

/// Maximum length of a generated slug before suffixing.
pub const SLUG_MAX_LEN: usize = 50;

/// Number of random bytes used for the fallback slug (hex-encoded, so the
/// resulting identifier is twice this many characters).
pub const SLUG_FALLBACK_BYTES: usize = 8;

// =============================================================================
// BOOK VALIDATION
// =============================================================================

/// Maximum book title length after HTML stripping.
pub const TITLE_MAX_LEN: usize = 100;

/// Minimum PIN length after trimming.
pub const PIN_MIN_LEN: usize = 4;

/// Maximum PIN length after trimming.
pub const PIN_MAX_LEN: usize = 20;

// =============================================================================
// ENTRY VALIDATION
// =============================================================================

/// Maximum length of the contributor name.
pub const FRIEND_NAME_MAX_LEN: usize = 80;

/// Maximum length of the free-text message.
pub const MESSAGE_MAX_LEN: usize = 1000;

// =============================================================================
// LEGACY MIGRATION
// =============================================================================

/// Slug of the synthetic book that adopts pre-migration entries.
pub const DEFAULT_BOOK_SLUG: &str = "default-book";

/// Title of the synthetic default book.
pub const DEFAULT_BOOK_TITLE: &str = "My Memories";

/// PIN assigned to the default book. Owners are expected to create a new
/// book with a PIN of their own after migrating.
pub const DEFAULT_BOOK_PIN: &str = "1234";

// =============================================================================
// MEDIA STORAGE
// =============================================================================

/// Cloudinary API base URL.
pub const DEFAULT_CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Remote folder attachments are stored under.
pub const MEDIA_FOLDER: &str = "memoir-slam-book";

/// Upload request timeout in seconds.
pub const MEDIA_UPLOAD_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_CLOUDINARY_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
pub const ENV_CLOUDINARY_UPLOAD_PRESET: &str = "CLOUDINARY_UPLOAD_PRESET";
pub const ENV_CLOUDINARY_BASE_URL: &str = "CLOUDINARY_BASE_URL";

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 5000;

/// Request body size cap. Voice notes dominate; 25 MB leaves ample room
/// for a doodle PNG plus an audio clip in one multipart submission.
pub const MAX_REQUEST_BODY_BYTES: usize = 25 * 1024 * 1024;
