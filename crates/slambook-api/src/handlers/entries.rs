//! Entry HTTP handlers: PIN-guarded listing and multipart submission.
//!
//! Submission is intentionally not PIN-gated: anyone holding the share
//! link may contribute. The PIN protects reading, not writing.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use slambook_core::{Book, BookRepository, EntryDraft, EntryRepository};
use slambook_media::{MediaKind, MediaStore};

use crate::{ApiError, AppState};

/// Header carrying the book PIN on listing requests.
const PIN_HEADER: &str = "x-book-pin";

/// Query fallback for clients that cannot set headers.
#[derive(Debug, Default, Deserialize)]
pub struct PinQuery {
    pub pin: Option<String>,
}

/// Resolve a book and check the presented PIN before any entry listing.
///
/// Stateless and re-executed per request; there is no session or token.
async fn require_pin(
    state: &AppState,
    slug: &str,
    headers: &HeaderMap,
    query: &PinQuery,
) -> Result<Book, ApiError> {
    let header_pin = headers
        .get(PIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let pin = header_pin.or_else(|| query.pin.clone());
    let Some(pin) = pin.filter(|p| !p.trim().is_empty()) else {
        return Err(ApiError::Unauthorized(
            "PIN is required. Please provide it in the X-Book-Pin header or the pin query parameter."
                .to_string(),
        ));
    };

    Ok(state.db.books.verify_pin(slug, &pin).await?)
}

/// List a book's entries, newest first. PIN-guarded.
#[utoipa::path(get, path = "/api/books/{slug}/entries", tag = "Entries",
    responses((status = 200, description = "Entries, newest first")))]
pub async fn list_book_entries(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PinQuery>,
    headers: HeaderMap,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let book = require_pin(&state, &slug, &headers, &query).await?;
    let entries = state.db.entries.list_for_book(book.id).await?;

    info!(
        subsystem = "api",
        component = "entries",
        op = "list_entries",
        book_id = %book.id,
        result_count = entries.len(),
        "Entries listed"
    );

    Ok(Json(entries))
}

/// Add an entry to a book. Multipart body: text fields plus optional
/// `audio` and `doodle` files.
#[utoipa::path(post, path = "/api/books/{slug}/entries", tag = "Entries",
    responses((status = 201, description = "Entry created")))]
pub async fn create_book_entry(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let book = state
        .db
        .books
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found.".to_string()))?;

    submit_entry(&state, Some(book), multipart).await
}

/// List all entries regardless of book (legacy single-book mode).
#[utoipa::path(get, path = "/api/slam", tag = "Entries",
    responses((status = 200, description = "All entries, newest first")))]
pub async fn list_legacy_entries(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let entries = state.db.entries.list_all().await?;
    Ok(Json(entries))
}

/// Add an entry without book association (legacy single-book mode).
#[utoipa::path(post, path = "/api/slam", tag = "Entries",
    responses((status = 201, description = "Entry created")))]
pub async fn create_legacy_entry(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    submit_entry(&state, None, multipart).await
}

/// One uploaded file from the multipart form.
struct FilePart {
    data: Vec<u8>,
    content_type: String,
}

/// Shared submission path: read the multipart form, push attachments to
/// the media store, validate, persist.
///
/// Attachment upload happens before persistence and aborts the whole
/// submission on failure; an entry never lands with a missing media URL.
async fn submit_entry(
    state: &AppState,
    book: Option<Book>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<slambook_core::Entry>), ApiError> {
    let (draft, audio, doodle) = read_submission(multipart).await?;

    let audio_url = upload_attachment(state.media.as_ref(), MediaKind::Audio, audio).await?;
    let doodle_url = upload_attachment(state.media.as_ref(), MediaKind::Doodle, doodle).await?;

    let book_id = book.as_ref().map(|b| b.id);
    let new_entry = draft.sanitize(book_id, audio_url, doodle_url)?;
    let entry = state.db.entries.create(new_entry).await?;

    info!(
        subsystem = "api",
        component = "entries",
        op = "create_entry",
        entry_id = %entry.id,
        book_id = ?book_id,
        has_audio = entry.audio_url.is_some(),
        has_doodle = entry.doodle_url.is_some(),
        "Entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Read the multipart form into a draft plus optional attachments.
///
/// Unknown fields are ignored; text fields fill the draft by wire name.
async fn read_submission(
    mut multipart: Multipart,
) -> Result<(EntryDraft, Option<FilePart>, Option<FilePart>), ApiError> {
    let mut draft = EntryDraft::default();
    let mut audio: Option<FilePart> = None;
    let mut doodle: Option<FilePart> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "audio" | "doodle" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec();
                if data.is_empty() {
                    continue;
                }
                let part = FilePart { data, content_type };
                if name == "audio" {
                    audio = Some(part);
                } else {
                    doodle = Some(part);
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
                draft.set_field(&name, value);
            }
        }
    }

    Ok((draft, audio, doodle))
}

/// Push one attachment to the media store, if present.
async fn upload_attachment(
    media: &dyn MediaStore,
    kind: MediaKind,
    part: Option<FilePart>,
) -> Result<Option<String>, ApiError> {
    let Some(part) = part else {
        return Ok(None);
    };

    info!(
        subsystem = "api",
        component = "entries",
        op = "upload",
        media_kind = kind.as_str(),
        upload_bytes = part.data.len(),
        "Uploading attachment"
    );

    let url = media.upload(kind, part.data, &part.content_type).await?;
    Ok(Some(url))
}
