//! # slambook-core
//!
//! Core types, traits, and validation for the slambook service.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the other slambook crates depend on: the book/entry
//! models and their boundary validation, slug generation, PIN hashing,
//! the legacy message parser, and the shared error taxonomy.

pub mod defaults;
pub mod error;
pub mod legacy;
pub mod logging;
pub mod models;
pub mod pin;
pub mod sanitize;
pub mod slug;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use legacy::{parse_message, Favorite, LegacySection};
pub use models::{
    validate_book_input, Book, CreateBookRequest, Entry, EntryDraft, Mood, NewEntry,
    ValidatedBookInput,
};
pub use pin::{hash_pin, verify_pin};
pub use sanitize::{clean_opt, clean_text};
pub use slug::{generate_slug, is_valid_slug, random_slug, slug_with_counter};
pub use traits::{BookRepository, EntryRepository};
