//! Entry repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::info;
use uuid::Uuid;

use slambook_core::{Entry, EntryRepository, Error, Mood, NewEntry, Result};

/// PostgreSQL implementation of EntryRepository.
pub struct PgEntryRepository {
    pool: Pool<Postgres>,
}

impl PgEntryRepository {
    /// Create a new PgEntryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &PgRow) -> Entry {
        let mood: String = row.get("mood");
        Entry {
            id: row.get("id"),
            book_id: row.get("book_id"),
            friend_name: row.get("friend_name"),
            nickname: row.get("nickname"),
            first_memory: row.get("first_memory"),
            favourite_thing: row.get("favourite_thing"),
            one_word: row.get("one_word"),
            wish: row.get("wish"),
            best_memory: row.get("best_memory"),
            what_makes_me_laugh: row.get("what_makes_me_laugh"),
            favorite_hero: row.get("favorite_hero"),
            favorite_song: row.get("favorite_song"),
            favorite_singer: row.get("favorite_singer"),
            favorite_movie: row.get("favorite_movie"),
            favorite_food: row.get("favorite_food"),
            favorite_color: row.get("favorite_color"),
            dream_destination: row.get("dream_destination"),
            future_prediction: row.get("future_prediction"),
            message: row.get("message"),
            audio_url: row.get("audio_url"),
            doodle_url: row.get("doodle_url"),
            // Rows written before the mood column existed read back as
            // whatever the column default is; normalize either way.
            mood: Mood::from_input(Some(mood.as_str())),
            created_at: row.get("created_at_utc"),
        }
    }
}

const ENTRY_COLUMNS: &str = "id, book_id, friend_name, nickname, first_memory, favourite_thing, \
     one_word, wish, best_memory, what_makes_me_laugh, favorite_hero, favorite_song, \
     favorite_singer, favorite_movie, favorite_food, favorite_color, dream_destination, \
     future_prediction, message, audio_url, doodle_url, mood, created_at_utc";

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn create(&self, entry: NewEntry) -> Result<Entry> {
        let id = Uuid::now_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO entry (id, book_id, friend_name, nickname, first_memory, \
             favourite_thing, one_word, wish, best_memory, what_makes_me_laugh, \
             favorite_hero, favorite_song, favorite_singer, favorite_movie, favorite_food, \
             favorite_color, dream_destination, future_prediction, message, audio_url, \
             doodle_url, mood, created_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21, $22, $23)",
        )
        .bind(id)
        .bind(entry.book_id)
        .bind(&entry.friend_name)
        .bind(&entry.nickname)
        .bind(&entry.first_memory)
        .bind(&entry.favourite_thing)
        .bind(&entry.one_word)
        .bind(&entry.wish)
        .bind(&entry.best_memory)
        .bind(&entry.what_makes_me_laugh)
        .bind(&entry.favorite_hero)
        .bind(&entry.favorite_song)
        .bind(&entry.favorite_singer)
        .bind(&entry.favorite_movie)
        .bind(&entry.favorite_food)
        .bind(&entry.favorite_color)
        .bind(&entry.dream_destination)
        .bind(&entry.future_prediction)
        .bind(&entry.message)
        .bind(&entry.audio_url)
        .bind(&entry.doodle_url)
        .bind(entry.mood.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "entries",
            op = "create_entry",
            entry_id = %id,
            book_id = ?entry.book_id,
            has_audio = entry.audio_url.is_some(),
            has_doodle = entry.doodle_url.is_some(),
            "Entry created"
        );

        Ok(Entry {
            id,
            book_id: entry.book_id,
            friend_name: entry.friend_name,
            nickname: entry.nickname,
            first_memory: entry.first_memory,
            favourite_thing: entry.favourite_thing,
            one_word: entry.one_word,
            wish: entry.wish,
            best_memory: entry.best_memory,
            what_makes_me_laugh: entry.what_makes_me_laugh,
            favorite_hero: entry.favorite_hero,
            favorite_song: entry.favorite_song,
            favorite_singer: entry.favorite_singer,
            favorite_movie: entry.favorite_movie,
            favorite_food: entry.favorite_food,
            favorite_color: entry.favorite_color,
            dream_destination: entry.dream_destination,
            future_prediction: entry.future_prediction,
            message: entry.message,
            audio_url: entry.audio_url,
            doodle_url: entry.doodle_url,
            mood: entry.mood,
            created_at: now,
        })
    }

    async fn list_for_book(&self, book_id: Uuid) -> Result<Vec<Entry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM entry WHERE book_id = $1 ORDER BY created_at_utc DESC",
            ENTRY_COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(Self::row_to_entry).collect())
    }

    async fn list_all(&self) -> Result<Vec<Entry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM entry ORDER BY created_at_utc DESC",
            ENTRY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(Self::row_to_entry).collect())
    }
}
