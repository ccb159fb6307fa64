//! Core data models for the slambook service.
//!
//! Wire field names are camelCase to preserve the contract existing web
//! clients speak (`friendName`, `audioUrl`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{
    FRIEND_NAME_MAX_LEN, MESSAGE_MAX_LEN, PIN_MAX_LEN, PIN_MIN_LEN, TITLE_MAX_LEN,
};
use crate::error::{Error, Result};
use crate::sanitize::{clean_opt, clean_text};

// =============================================================================
// MOOD
// =============================================================================

/// Emotional tone tag for an entry, used only for presentation styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Nostalgic,
    Funny,
    Heartfelt,
    Adventurous,
    #[default]
    Classic,
}

impl Mood {
    /// Normalize free-form input. Absent or unrecognized values coerce to
    /// [`Mood::Classic`]; this never fails.
    pub fn from_input(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("nostalgic") => Mood::Nostalgic,
            Some("funny") => Mood::Funny,
            Some("heartfelt") => Mood::Heartfelt,
            Some("adventurous") => Mood::Adventurous,
            _ => Mood::Classic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Nostalgic => "nostalgic",
            Mood::Funny => "funny",
            Mood::Heartfelt => "heartfelt",
            Mood::Adventurous => "adventurous",
            Mood::Classic => "classic",
        }
    }
}

// =============================================================================
// BOOK
// =============================================================================

/// A named, PIN-protected container of entries, identified externally by
/// its slug.
///
/// The PIN hash never serializes; the public projection of a book is
/// exactly `{id, title, slug, createdAt}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a book.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub pin: String,
}

/// Title and PIN after boundary validation, ready to persist.
#[derive(Debug, Clone)]
pub struct ValidatedBookInput {
    pub title: String,
    pub pin: String,
}

/// Validate a raw title and PIN per the creation contract.
///
/// The title is HTML-stripped and must be 1..=100 characters afterwards;
/// the PIN is trimmed and must be 4..=20 characters. The PIN is otherwise
/// taken verbatim (case-sensitive). All caps count characters, not bytes,
/// so accented and non-Latin titles get the full allowance.
pub fn validate_book_input(title: &str, pin: &str) -> Result<ValidatedBookInput> {
    let title = clean_text(title);
    let pin = pin.trim().to_string();

    if title.is_empty() || pin.is_empty() {
        return Err(Error::Validation(
            "Both title and PIN are required.".to_string(),
        ));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(Error::Validation(format!(
            "Title is too long. Keep it under {} characters.",
            TITLE_MAX_LEN
        )));
    }
    let pin_chars = pin.chars().count();
    if pin_chars < PIN_MIN_LEN || pin_chars > PIN_MAX_LEN {
        return Err(Error::Validation(format!(
            "PIN must be between {} and {} characters.",
            PIN_MIN_LEN, PIN_MAX_LEN
        )));
    }

    Ok(ValidatedBookInput { title, pin })
}

// =============================================================================
// ENTRY
// =============================================================================

/// One contributor's memory submission within a book.
///
/// `book_id` is `None` only for legacy rows created before the multi-book
/// feature; those belong to the synthetic default book after migration.
/// Optional fields serialize as explicit nulls; existing clients key on
/// field presence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub book_id: Option<Uuid>,
    pub friend_name: String,
    pub nickname: Option<String>,
    // Personal & emotional
    pub first_memory: Option<String>,
    pub favourite_thing: Option<String>,
    pub one_word: Option<String>,
    pub wish: Option<String>,
    pub best_memory: Option<String>,
    pub what_makes_me_laugh: Option<String>,
    // Favorites
    pub favorite_hero: Option<String>,
    pub favorite_song: Option<String>,
    pub favorite_singer: Option<String>,
    pub favorite_movie: Option<String>,
    pub favorite_food: Option<String>,
    pub favorite_color: Option<String>,
    // Dreams & future
    pub dream_destination: Option<String>,
    pub future_prediction: Option<String>,
    // Final message
    pub message: String,
    pub audio_url: Option<String>,
    pub doodle_url: Option<String>,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// A legacy entry predates the structured thematic fields: everything
    /// it has to say lives inside `message`, encoded with the ad-hoc
    /// `Label: content` grammar (see [`crate::legacy`]).
    pub fn is_legacy(&self) -> bool {
        self.nickname.is_none()
            && self.first_memory.is_none()
            && self.favourite_thing.is_none()
            && self.one_word.is_none()
            && self.wish.is_none()
            && self.best_memory.is_none()
            && self.what_makes_me_laugh.is_none()
            && self.favorite_hero.is_none()
            && self.favorite_song.is_none()
            && self.favorite_singer.is_none()
            && self.favorite_movie.is_none()
            && self.favorite_food.is_none()
            && self.favorite_color.is_none()
            && self.dream_destination.is_none()
            && self.future_prediction.is_none()
    }
}

/// Raw entry submission as it arrives from a form or JSON body, before any
/// cleanup. All fields optional so multipart handlers can fill it
/// incrementally.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub friend_name: Option<String>,
    pub nickname: Option<String>,
    pub first_memory: Option<String>,
    pub favourite_thing: Option<String>,
    pub one_word: Option<String>,
    pub wish: Option<String>,
    pub best_memory: Option<String>,
    pub what_makes_me_laugh: Option<String>,
    pub favorite_hero: Option<String>,
    pub favorite_song: Option<String>,
    pub favorite_singer: Option<String>,
    pub favorite_movie: Option<String>,
    pub favorite_food: Option<String>,
    pub favorite_color: Option<String>,
    pub dream_destination: Option<String>,
    pub future_prediction: Option<String>,
    pub message: Option<String>,
    pub mood: Option<String>,
}

impl EntryDraft {
    /// Set a field by its wire name. Unknown names are ignored so stale
    /// clients can keep submitting forms with extra fields.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "friendName" => self.friend_name = Some(value),
            "nickname" => self.nickname = Some(value),
            "firstMemory" => self.first_memory = Some(value),
            "favouriteThing" => self.favourite_thing = Some(value),
            "oneWord" => self.one_word = Some(value),
            "wish" => self.wish = Some(value),
            "bestMemory" => self.best_memory = Some(value),
            "whatMakesMeLaugh" => self.what_makes_me_laugh = Some(value),
            "favoriteHero" => self.favorite_hero = Some(value),
            "favoriteSong" => self.favorite_song = Some(value),
            "favoriteSinger" => self.favorite_singer = Some(value),
            "favoriteMovie" => self.favorite_movie = Some(value),
            "favoriteFood" => self.favorite_food = Some(value),
            "favoriteColor" => self.favorite_color = Some(value),
            "dreamDestination" => self.dream_destination = Some(value),
            "futurePrediction" => self.future_prediction = Some(value),
            "message" => self.message = Some(value),
            "mood" => self.mood = Some(value),
            _ => {}
        }
    }

    /// Clean, validate, and normalize the draft into a persistable entry.
    ///
    /// Every text field is trimmed and HTML-stripped; `friendName` and
    /// `message` must be non-empty afterwards; each field enforces its
    /// individual length cap; the mood coerces to `classic` when absent or
    /// unrecognized. Media URLs are attached as already resolved by the
    /// media store (or `None`).
    pub fn sanitize(
        self,
        book_id: Option<Uuid>,
        audio_url: Option<String>,
        doodle_url: Option<String>,
    ) -> Result<NewEntry> {
        let friend_name = clean_text(self.friend_name.as_deref().unwrap_or(""));
        let message = clean_text(self.message.as_deref().unwrap_or(""));

        if friend_name.is_empty() || message.is_empty() {
            return Err(Error::Validation(
                "Both name and message are required.".to_string(),
            ));
        }
        if friend_name.chars().count() > FRIEND_NAME_MAX_LEN {
            return Err(Error::Validation(format!(
                "Name is a bit too long. Keep it under {} characters.",
                FRIEND_NAME_MAX_LEN
            )));
        }
        if message.chars().count() > MESSAGE_MAX_LEN {
            return Err(Error::Validation(format!(
                "Message is too long. Keep it under {} characters.",
                MESSAGE_MAX_LEN
            )));
        }

        let mood = Mood::from_input(self.mood.as_deref());

        Ok(NewEntry {
            book_id,
            friend_name,
            nickname: capped("nickname", self.nickname, 80)?,
            first_memory: capped("firstMemory", self.first_memory, 500)?,
            favourite_thing: capped("favouriteThing", self.favourite_thing, 500)?,
            one_word: capped("oneWord", self.one_word, 100)?,
            wish: capped("wish", self.wish, 300)?,
            best_memory: capped("bestMemory", self.best_memory, 500)?,
            what_makes_me_laugh: capped("whatMakesMeLaugh", self.what_makes_me_laugh, 500)?,
            favorite_hero: capped("favoriteHero", self.favorite_hero, 100)?,
            favorite_song: capped("favoriteSong", self.favorite_song, 200)?,
            favorite_singer: capped("favoriteSinger", self.favorite_singer, 200)?,
            favorite_movie: capped("favoriteMovie", self.favorite_movie, 200)?,
            favorite_food: capped("favoriteFood", self.favorite_food, 100)?,
            favorite_color: capped("favoriteColor", self.favorite_color, 50)?,
            dream_destination: capped("dreamDestination", self.dream_destination, 200)?,
            future_prediction: capped("futurePrediction", self.future_prediction, 300)?,
            message,
            audio_url,
            doodle_url,
            mood,
        })
    }
}

/// Clean an optional field and enforce its length cap in characters.
fn capped(field: &str, value: Option<String>, max: usize) -> Result<Option<String>> {
    match clean_opt(value.as_deref()) {
        Some(v) if v.chars().count() > max => Err(Error::Validation(format!(
            "{} is too long. Keep it under {} characters.",
            field, max
        ))),
        other => Ok(other),
    }
}

/// A validated, cleaned entry ready for insertion.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub book_id: Option<Uuid>,
    pub friend_name: String,
    pub nickname: Option<String>,
    pub first_memory: Option<String>,
    pub favourite_thing: Option<String>,
    pub one_word: Option<String>,
    pub wish: Option<String>,
    pub best_memory: Option<String>,
    pub what_makes_me_laugh: Option<String>,
    pub favorite_hero: Option<String>,
    pub favorite_song: Option<String>,
    pub favorite_singer: Option<String>,
    pub favorite_movie: Option<String>,
    pub favorite_food: Option<String>,
    pub favorite_color: Option<String>,
    pub dream_destination: Option<String>,
    pub future_prediction: Option<String>,
    pub message: String,
    pub audio_url: Option<String>,
    pub doodle_url: Option<String>,
    pub mood: Mood,
}
