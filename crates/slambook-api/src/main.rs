//! slambook-api - HTTP API server for the slambook service

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use uuid::Uuid;

use slambook_core::defaults::{DEFAULT_HOST, DEFAULT_PORT, MAX_REQUEST_BODY_BYTES};
use slambook_db::Database;
use slambook_media::{CloudinaryStore, DisabledMediaStore, MediaStore};

use handlers::{
    books::{create_book, get_book, get_entry_count, login_book},
    entries::{create_book_entry, create_legacy_entry, list_book_entries, list_legacy_entries},
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically and line
/// up with log timestamps when chasing a misbehaving submission.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    db: Database,
    /// Injected media storage capability. Entry submission uploads
    /// attachments through this before anything is persisted.
    media: Arc<dyn MediaStore>,
}

/// OpenAPI documentation served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slambook API",
        version = "0.3.0",
        description = "Guestbook-style memory books: create a PIN-protected book, share the link, collect entries"
    ),
    paths(
        handlers::books::create_book,
        handlers::books::login_book,
        handlers::books::get_book,
        handlers::books::get_entry_count,
        handlers::entries::list_book_entries,
        handlers::entries::create_book_entry,
        handlers::entries::list_legacy_entries,
        handlers::entries::create_legacy_entry,
    ),
    tags(
        (name = "Books", description = "Book creation, lookup, and PIN verification"),
        (name = "Entries", description = "Memory entry submission and listing"),
        (name = "System", description = "Health checks")
    )
)]
struct ApiDoc;

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// HTTP-facing error with a status code per the service error taxonomy.
pub(crate) enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    MediaUpload(String),
    Internal(slambook_core::Error),
}

impl From<slambook_core::Error> for ApiError {
    fn from(err: slambook_core::Error) -> Self {
        use slambook_core::Error;
        match err {
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::Conflict(msg) => ApiError::Conflict(msg),
            Error::MediaUpload(msg) => ApiError::MediaUpload(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::MediaUpload(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(err) => {
                // Storage failures stay in the logs; callers get a
                // generic message.
                tracing::error!(subsystem = "api", error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// SYSTEM HANDLERS
// =============================================================================

/// Health probe: verifies database connectivity, not just liveness.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))),
        Err(err) => {
            tracing::error!(subsystem = "api", error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "degraded" })),
            )
        }
    }
}

/// Serve the generated OpenAPI document.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Fallback for unknown routes; keeps error bodies JSON end to end.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route not found" })),
    )
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Parse allowed origins from the comma-separated `ALLOWED_ORIGINS`
/// environment variable. Defaults cover local client development.
fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

// =============================================================================
// ROUTER
// =============================================================================

fn build_router(state: AppState) -> Router {
    Router::new()
        // System
        .route("/api/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        // Books
        .route("/api/books", post(create_book))
        .route("/api/books/:slug", get(get_book))
        .route("/api/books/:slug/login", post(login_book))
        .route("/api/books/:slug/count", get(get_entry_count))
        // Entries (reading is PIN-guarded, writing is link-guarded)
        .route(
            "/api/books/:slug/entries",
            get(list_book_entries).post(create_book_entry),
        )
        // Legacy single-book surface
        .route(
            "/api/slam",
            get(list_legacy_entries).post(create_legacy_entry),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            let origins = parse_allowed_origins();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([
                    header::CONTENT_TYPE,
                    HeaderName::from_static("x-book-pin"),
                ])
        })
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_logging();

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/slambook".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| DEFAULT_PORT.to_string())
        .parse()
        .unwrap_or(DEFAULT_PORT);

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    db.migrate().await?;
    info!("Database connected");

    // Media storage. Without Cloudinary credentials, attachment-bearing
    // submissions fail with 502 rather than persisting entries whose
    // media URLs point at nothing; text-only submissions still work.
    let media: Arc<dyn MediaStore> = match CloudinaryStore::from_env() {
        Some(store) => {
            info!(subsystem = "media", component = "cloudinary", "Cloudinary media store configured");
            Arc::new(store)
        }
        None => {
            tracing::warn!(
                subsystem = "media",
                "CLOUDINARY_CLOUD_NAME not set; attachments will be rejected"
            );
            Arc::new(DisabledMediaStore)
        }
    };

    let state = AppState { db, media };
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - standard env filter (default: "slambook_api=debug,tower_http=debug")
fn init_logging() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slambook_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("slambook-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Keep the guard alive for the process lifetime so buffered log
        // lines flush on shutdown.
        std::mem::forget(guard);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        let mut layer = tracing_subscriber::fmt::layer();
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        registry.with(layer).init();
    }

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );
}
