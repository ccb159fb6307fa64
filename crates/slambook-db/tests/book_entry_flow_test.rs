//! Integration tests for the book/entry persistence layer.
//!
//! These require a running PostgreSQL instance (see
//! `test_fixtures::DEFAULT_TEST_DATABASE_URL`) and are ignored by default;
//! run them with `cargo test -- --ignored`.

use slambook_db::test_fixtures::TestDatabase;
use slambook_db::{BookRepository, EntryDraft, EntryRepository, Error, Mood};

fn draft(name: &str, message: &str) -> EntryDraft {
    EntryDraft {
        friend_name: Some(name.to_string()),
        message: Some(message.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_book_assigns_expected_slug() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let book = db.books.create("My 2024 Memories", "1234").await.unwrap();
    assert_eq!(book.slug, "my-2024-memories");
    assert_eq!(book.title, "My 2024 Memories");
    assert_ne!(book.pin_hash, "1234"); // never stored in the clear

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_same_title_gets_monotonic_suffixes() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let a = db.books.create("Trip", "1234").await.unwrap();
    let b = db.books.create("Trip", "1234").await.unwrap();
    let c = db.books.create("Trip", "1234").await.unwrap();

    assert_eq!(a.slug, "trip");
    assert_eq!(b.slug, "trip-1");
    assert_eq!(c.slug, "trip-2");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_duplicate_slug_insert_maps_to_conflict() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    // Two creators racing for the same slug: the existence check passes
    // for both, the unique index lets only one insert through.
    let first = db
        .books
        .insert_with_slug("Trip", "trip", "$argon2id$fake")
        .await
        .unwrap();
    assert_eq!(first.slug, "trip");

    let second = db
        .books
        .insert_with_slug("Trip", "trip", "$argon2id$fake")
        .await;
    assert!(matches!(second, Err(Error::Conflict(_))));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_verify_pin_trims_and_is_exact() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let book = db.books.create("Pin Book", "1234").await.unwrap();

    // Presented PIN is trimmed before comparison.
    let ok = db.books.verify_pin(&book.slug, " 1234 ").await.unwrap();
    assert_eq!(ok.id, book.id);

    // Wrong PIN is Unauthorized, unknown slug is NotFound.
    assert!(matches!(
        db.books.verify_pin(&book.slug, "1235").await,
        Err(Error::Unauthorized(_))
    ));
    assert!(matches!(
        db.books.verify_pin("no-such-book", "1234").await,
        Err(Error::NotFound(_))
    ));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_entry_roundtrip_and_count() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let book = db.books.create("Entry Book", "1234").await.unwrap();

    let new_entry = draft("Sam", "hi")
        .sanitize(Some(book.id), None, None)
        .unwrap();
    let entry = db.entries.create(new_entry).await.unwrap();

    assert_eq!(entry.friend_name, "Sam");
    assert_eq!(entry.mood, Mood::Classic);
    assert_eq!(entry.audio_url, None);
    assert_eq!(entry.doodle_url, None);

    let listed = db.entries.list_for_book(book.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, entry.id);

    let count = db.books.entry_count(&book.slug).await.unwrap();
    assert_eq!(count, Some(1));
    assert_eq!(db.books.entry_count("unknown").await.unwrap(), None);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_entries_list_newest_first() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let book = db.books.create("Ordered Book", "1234").await.unwrap();
    for i in 0..3 {
        let e = draft(&format!("Friend {}", i), "hello")
            .sanitize(Some(book.id), None, None)
            .unwrap();
        db.entries.create(e).await.unwrap();
    }

    let listed = db.entries.list_for_book(book.id).await.unwrap();
    assert_eq!(listed.len(), 3);
    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_mood_persists_through_storage() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let book = db.books.create("Mood Book", "1234").await.unwrap();
    let mut d = draft("Sam", "hi");
    d.mood = Some("funny".to_string());
    let entry = db
        .entries
        .create(d.sanitize(Some(book.id), None, None).unwrap())
        .await
        .unwrap();

    let listed = db.entries.list_for_book(book.id).await.unwrap();
    assert_eq!(entry.mood, Mood::Funny);
    assert_eq!(listed[0].mood, Mood::Funny);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_legacy_migration_adopts_orphaned_entries() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    // Legacy entries carry no book reference.
    for name in ["Old Friend", "Older Friend"] {
        let e = draft(name, "from the before times")
            .sanitize(None, None, None)
            .unwrap();
        db.entries.create(e).await.unwrap();
    }

    let report = db.migrate_legacy_entries().await.unwrap();
    assert!(report.created_default_book);
    assert_eq!(report.entries_migrated, 2);
    assert_eq!(report.default_book_slug, "default-book");

    // Default book answers to the well-known PIN.
    let book = db.books.verify_pin("default-book", "1234").await.unwrap();
    assert_eq!(db.entries.list_for_book(book.id).await.unwrap().len(), 2);

    // Idempotent: nothing left to claim.
    let again = db.migrate_legacy_entries().await.unwrap();
    assert_eq!(again.entries_migrated, 0);
    assert!(!again.created_default_book);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_list_all_spans_books_and_legacy_rows() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let book = db.books.create("Mixed Book", "1234").await.unwrap();
    db.entries
        .create(draft("A", "x").sanitize(Some(book.id), None, None).unwrap())
        .await
        .unwrap();
    db.entries
        .create(draft("B", "y").sanitize(None, None, None).unwrap())
        .await
        .unwrap();

    let all = db.entries.list_all().await.unwrap();
    assert_eq!(all.len(), 2);

    test_db.cleanup().await;
}
