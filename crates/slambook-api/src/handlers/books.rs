//! Book HTTP handlers: creation, lookup, PIN verification, entry count.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use slambook_core::{BookRepository, CreateBookRequest};

use crate::{ApiError, AppState};

/// Create a new book.
///
/// Validates title and PIN, assigns a unique slug derived from the title,
/// and returns the public projection. The PIN is stored hashed and never
/// echoed back.
///
/// # Returns
/// - 201 Created with `{id, title, slug, createdAt}`
/// - 400 Bad Request on validation failure
/// - 409 Conflict if the slug uniqueness backstop trips
#[utoipa::path(post, path = "/api/books", tag = "Books",
    responses((status = 201, description = "Book created")))]
pub async fn create_book(
    State(state): State<AppState>,
    Json(req): Json<CreateBookRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let book = state.db.books.create(&req.title, &req.pin).await?;

    info!(
        subsystem = "api",
        component = "books",
        op = "create_book",
        book_id = %book.id,
        slug = %book.slug,
        "Book created"
    );

    Ok((StatusCode::CREATED, Json(book)))
}

/// Request body for PIN verification.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub pin: Option<String>,
}

/// Verify the PIN for a book.
///
/// # Returns
/// - 200 OK with `{success: true, book}` on match
/// - 400 Bad Request if no PIN was supplied
/// - 404 Not Found for an unknown slug
/// - 401 Unauthorized on mismatch
#[utoipa::path(post, path = "/api/books/{slug}/login", tag = "Books",
    responses((status = 200, description = "PIN verified")))]
pub async fn login_book(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let pin = match req.pin.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => return Err(ApiError::BadRequest("PIN is required.".to_string())),
    };

    let book = state.db.books.verify_pin(&slug, &pin).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "book": book,
    })))
}

/// Get public book info by slug. Never includes PIN material.
#[utoipa::path(get, path = "/api/books/{slug}", tag = "Books",
    responses((status = 200, description = "Book info")))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let book = state
        .db
        .books
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found.".to_string()))?;

    Ok(Json(book))
}

/// Get the number of entries in a book (public, used for the "Nth person
/// to sign" affordance).
#[utoipa::path(get, path = "/api/books/{slug}/count", tag = "Books",
    responses((status = 200, description = "Entry count")))]
pub async fn get_entry_count(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let count = state
        .db
        .books
        .entry_count(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found.".to_string()))?;

    Ok(Json(serde_json::json!({
        "count": count,
        "slug": slug,
    })))
}
