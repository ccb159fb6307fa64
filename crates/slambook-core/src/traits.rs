//! Repository traits for the slambook domain.
//!
//! These define the seams between the HTTP layer and persistence,
//! enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Book, Entry, NewEntry};

/// Repository for book creation and lookup.
///
/// Books are created once and never updated or deleted; there is no write
/// path beyond `create`.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Validate title and PIN, assign a unique slug, and persist the book.
    ///
    /// Fails with `Error::Validation` on constraint violations and
    /// `Error::Conflict` if the storage-level slug uniqueness backstop
    /// trips at insert time.
    async fn create(&self, title: &str, pin: &str) -> Result<Book>;

    /// Public lookup by slug.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Book>>;

    /// Whether a slug is already taken.
    async fn slug_exists(&self, slug: &str) -> Result<bool>;

    /// Exact count of entries referencing the book, or `None` if the slug
    /// is unknown.
    async fn entry_count(&self, slug: &str) -> Result<Option<i64>>;

    /// Resolve a book and check the presented PIN against its stored hash.
    ///
    /// Fails with `Error::NotFound` for unknown slugs and
    /// `Error::Unauthorized` on mismatch.
    async fn verify_pin(&self, slug: &str, pin: &str) -> Result<Book>;
}

/// Repository for entry creation and listing. Entries are append-only.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Persist a validated entry, stamping its creation time.
    async fn create(&self, entry: NewEntry) -> Result<Entry>;

    /// Entries belonging to a book, newest first.
    async fn list_for_book(&self, book_id: Uuid) -> Result<Vec<Entry>>;

    /// All entries regardless of book, newest first (legacy single-book
    /// listing).
    async fn list_all(&self) -> Result<Vec<Entry>>;
}
