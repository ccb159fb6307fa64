//! Structured logging field name constants for the slambook service.
//!
//! All crates use these constants for consistent structured logging fields
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated per request. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "media"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "books", "entries", "pool", "cloudinary"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create_book", "verify_pin", "create_entry", "upload"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Book UUID being operated on.
pub const BOOK_ID: &str = "book_id";

/// Book slug named in the request path.
pub const BOOK_SLUG: &str = "slug";

/// Entry UUID being operated on.
pub const ENTRY_ID: &str = "entry_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a listing.
pub const RESULT_COUNT: &str = "result_count";

/// Byte size of an uploaded attachment.
pub const UPLOAD_BYTES: &str = "upload_bytes";

/// Kind of attachment being uploaded ("audio" or "doodle").
pub const MEDIA_KIND: &str = "media_kind";
