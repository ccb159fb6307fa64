//! Slug generation for book share links.
//!
//! A slug is derived deterministically from the human title; uniqueness
//! against existing books is the repository's job (see
//! `BookRepository::create`), with the database unique index as the final
//! backstop against concurrent creation.

use rand::RngCore;

use crate::defaults::{SLUG_FALLBACK_BYTES, SLUG_MAX_LEN};

/// Derive a URL-safe slug candidate from a title.
///
/// Lowercases, collapses every run of non-alphanumeric characters to a
/// single hyphen, trims leading/trailing hyphens, and truncates to
/// [`SLUG_MAX_LEN`]. Titles that strip to nothing (all symbols, non-Latin
/// scripts) fall back to a random hex identifier so the result is never
/// empty.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if slug.len() >= SLUG_MAX_LEN {
                break;
            }
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            if slug.len() >= SLUG_MAX_LEN {
                break;
            }
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        return random_slug();
    }

    slug
}

/// Candidate slug for the Nth collision retry: `base-1`, `base-2`, ...
pub fn slug_with_counter(base: &str, counter: u32) -> String {
    format!("{}-{}", base, counter)
}

/// Random hex identifier used when a title yields no slug material.
///
/// Uses the OS CSPRNG so two unresolvable titles practically never collide.
pub fn random_slug() -> String {
    let mut bytes = [0u8; SLUG_FALLBACK_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Whether a string is a well-formed slug (lowercase alphanumerics and
/// hyphens only, non-empty).
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
