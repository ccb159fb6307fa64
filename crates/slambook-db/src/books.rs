//! Book repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};
use uuid::Uuid;

use slambook_core::{
    generate_slug, hash_pin, slug_with_counter, validate_book_input, verify_pin, Book,
    BookRepository, Error, Result,
};

/// PostgreSQL implementation of BookRepository.
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    /// Create a new PgBookRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find a free slug for a title: the base candidate, then `base-1`,
    /// `base-2`, ... The loop is unbounded but terminates because counters
    /// are never reused; the unique index on `book.slug` backstops any
    /// race with a concurrent creator.
    async fn create_unique_slug(&self, title: &str) -> Result<String> {
        let base = generate_slug(title);
        let mut candidate = base.clone();
        let mut counter = 1u32;

        while self.slug_exists(&candidate).await? {
            candidate = slug_with_counter(&base, counter);
            counter += 1;
        }

        debug!(
            subsystem = "db",
            component = "books",
            op = "create_unique_slug",
            slug = %candidate,
            retries = counter - 1,
            "Resolved unique slug"
        );
        Ok(candidate)
    }

    fn row_to_book(row: &PgRow) -> Book {
        Book {
            id: row.get("id"),
            title: row.get("title"),
            slug: row.get("slug"),
            pin_hash: row.get("pin_hash"),
            created_at: row.get("created_at_utc"),
        }
    }

    /// Insert a fully prepared book row.
    ///
    /// The unique index on `book.slug` is the last line of defense against
    /// a concurrent creator winning the same slug between the existence
    /// check and this insert; that failure maps to `Error::Conflict`.
    pub async fn insert_with_slug(&self, title: &str, slug: &str, pin_hash: &str) -> Result<Book> {
        let id = Uuid::now_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO book (id, title, slug, pin_hash, created_at_utc)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(title)
        .bind(slug)
        .bind(pin_hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_slug_conflict(&e) {
                Error::Conflict(
                    "A book with this title already exists. Please try a different title."
                        .to_string(),
                )
            } else {
                Error::Database(e)
            }
        })?;

        info!(
            subsystem = "db",
            component = "books",
            op = "create_book",
            book_id = %id,
            slug = %slug,
            "Book created"
        );

        Ok(Book {
            id,
            title: title.to_string(),
            slug: slug.to_string(),
            pin_hash: pin_hash.to_string(),
            created_at: now,
        })
    }
}

/// Whether an insert failure is the slug uniqueness backstop tripping.
fn is_slug_conflict(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| {
            db.constraint() == Some("book_slug_unique")
                || db.message().contains("duplicate key")
        })
        .unwrap_or(false)
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, title: &str, pin: &str) -> Result<Book> {
        let input = validate_book_input(title, pin)?;
        let slug = self.create_unique_slug(&input.title).await?;
        let pin_hash = hash_pin(&input.pin)?;

        self.insert_with_slug(&input.title, &slug, &pin_hash).await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            "SELECT id, title, slug, pin_hash, created_at_utc FROM book WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(Self::row_to_book))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS one FROM book WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.is_some())
    }

    async fn entry_count(&self, slug: &str) -> Result<Option<i64>> {
        let Some(book) = self.get_by_slug(slug).await? else {
            return Ok(None);
        };

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entry WHERE book_id = $1")
            .bind(book.id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(Some(count))
    }

    async fn verify_pin(&self, slug: &str, pin: &str) -> Result<Book> {
        let book = self
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| Error::NotFound("Book not found.".to_string()))?;

        if !verify_pin(pin, &book.pin_hash)? {
            return Err(Error::Unauthorized("Invalid PIN.".to_string()));
        }

        Ok(book)
    }
}
