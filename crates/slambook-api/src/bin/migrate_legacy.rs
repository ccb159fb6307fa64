//! One-shot migration: adopt entries that predate the multi-book feature.
//!
//! Run once after deploying the multi-book schema. Entries without a book
//! reference are claimed by a default book (slug `default-book`,
//! PIN `1234`); owners should create a proper book of their own afterward.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slambook_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slambook_migrate=info,slambook_db=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/slambook".to_string());

    let db = Database::connect(&database_url).await?;
    db.migrate().await?;

    let report = db.migrate_legacy_entries().await?;

    if report.entries_migrated == 0 {
        info!("No migration needed - all entries already have a book");
        return Ok(());
    }

    info!(
        entries_migrated = report.entries_migrated,
        default_book_slug = %report.default_book_slug,
        "Migration completed"
    );

    if report.created_default_book {
        warn!(
            "Default book PIN is \"1234\" - create a new book and change it"
        );
    }

    Ok(())
}
