//! # slambook-db
//!
//! PostgreSQL database layer for the slambook service.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for books and entries
//! - The legacy single-book → multi-book data migration
//!
//! ## Example
//!
//! ```rust,ignore
//! use slambook_db::Database;
//! use slambook_core::BookRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/slambook").await?;
//!
//!     let book = db.books.create("My 2024 Memories", "1234").await?;
//!     println!("Share link slug: {}", book.slug);
//!     Ok(())
//! }
//! ```

pub mod books;
pub mod entries;
pub mod pool;

// Test fixtures for integration tests.
// Always compiled so integration tests (in tests/) can use them.
pub mod test_fixtures;

// Re-export core types
pub use slambook_core::*;

// Re-export repository implementations
pub use books::PgBookRepository;
pub use entries::PgEntryRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use slambook_core::defaults::{DEFAULT_BOOK_PIN, DEFAULT_BOOK_SLUG, DEFAULT_BOOK_TITLE};

/// Summary of a legacy data migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyMigrationReport {
    /// Slug of the book that adopted the orphaned entries.
    pub default_book_slug: String,
    /// Whether the default book was created by this run.
    pub created_default_book: bool,
    /// Number of entries claimed.
    pub entries_migrated: u64,
}

/// Main database handle bundling the connection pool and repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Book repository for creation and lookup.
    pub books: std::sync::Arc<PgBookRepository>,
    /// Entry repository for creation and listing.
    pub entries: std::sync::Arc<PgEntryRepository>,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            books: std::sync::Arc::new(PgBookRepository::new(pool.clone())),
            entries: std::sync::Arc::new(PgEntryRepository::new(pool.clone())),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Ok(Self::new(create_pool(database_url).await?))
    }

    /// Connect with custom pool configuration.
    pub async fn connect_with_config(database_url: &str, config: PoolConfig) -> Result<Self> {
        Ok(Self::new(create_pool_with_config(database_url, config).await?))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }

    /// Adopt entries that predate the multi-book feature.
    ///
    /// Entries with a NULL `book_id` are claimed by the default book
    /// (created on first need with a well-known slug and PIN). Runs in a
    /// single transaction and is idempotent: a second run finds nothing
    /// to claim.
    pub async fn migrate_legacy_entries(&self) -> Result<LegacyMigrationReport> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let orphaned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM entry WHERE book_id IS NULL")
                .fetch_one(&mut *tx)
                .await
                .map_err(Error::Database)?;

        if orphaned == 0 {
            return Ok(LegacyMigrationReport {
                default_book_slug: DEFAULT_BOOK_SLUG.to_string(),
                created_default_book: false,
                entries_migrated: 0,
            });
        }

        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM book WHERE slug = $1")
            .bind(DEFAULT_BOOK_SLUG)
            .fetch_optional(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let (book_id, created) = match existing {
            Some(id) => (id, false),
            None => {
                let id = Uuid::now_v7();
                sqlx::query(
                    "INSERT INTO book (id, title, slug, pin_hash, created_at_utc)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(id)
                .bind(DEFAULT_BOOK_TITLE)
                .bind(DEFAULT_BOOK_SLUG)
                .bind(hash_pin(DEFAULT_BOOK_PIN)?)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
                (id, true)
            }
        };

        let updated = sqlx::query("UPDATE entry SET book_id = $1 WHERE book_id IS NULL")
            .bind(book_id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?
            .rows_affected();

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "migration",
            op = "migrate_legacy_entries",
            book_id = %book_id,
            entries_migrated = updated,
            created_default_book = created,
            "Legacy entries adopted by default book"
        );

        Ok(LegacyMigrationReport {
            default_book_slug: DEFAULT_BOOK_SLUG.to_string(),
            created_default_book: created,
            entries_migrated: updated,
        })
    }

    /// Lightweight connectivity check for health endpoints.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
