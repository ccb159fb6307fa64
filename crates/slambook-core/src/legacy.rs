//! Read-time parser for pre-migration message blobs.
//!
//! Before entries gained structured thematic fields, contributors' answers
//! were flattened into the `message` text with an ad-hoc grammar:
//! sections separated by blank lines, each either a plain paragraph or a
//! `Label: content` pair, plus a special `Favorites` section holding
//! ` • `-delimited `Key: value` pairs.
//!
//! This grammar exists only here. The write path never produces it and
//! the data model never depends on it; consumers call [`parse_message`]
//! lazily when they need structured access to a legacy entry.

use serde::Serialize;

/// Delimiter between favorites inside a `Favorites` section.
const FAVORITE_SEPARATOR: &str = " • ";

/// One `Key: value` pair from a legacy `Favorites` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub key: String,
    pub value: String,
}

/// One parsed section of a legacy message blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LegacySection {
    /// A `Label: content` section.
    Labeled { label: String, content: String },
    /// The `Favorites` section, split into key/value pairs.
    Favorites { favorites: Vec<Favorite> },
    /// A plain paragraph with no label.
    Paragraph { text: String },
}

/// Parse a legacy message blob into its sections.
///
/// Pure and infallible: malformed input degrades to plain paragraphs
/// rather than erroring, since these blobs were written by hand.
pub fn parse_message(message: &str) -> Vec<LegacySection> {
    message
        .split("\n\n")
        .map(str::trim)
        .filter(|section| !section.is_empty())
        .map(parse_section)
        .collect()
}

fn parse_section(section: &str) -> LegacySection {
    let Some((label, content)) = section.split_once(':') else {
        return LegacySection::Paragraph {
            text: section.to_string(),
        };
    };

    let label = label.trim();
    let content = content.trim();

    if label == "Favorites" {
        return LegacySection::Favorites {
            favorites: parse_favorites(content),
        };
    }

    LegacySection::Labeled {
        label: label.to_string(),
        content: content.to_string(),
    }
}

fn parse_favorites(content: &str) -> Vec<Favorite> {
    content
        .split(FAVORITE_SEPARATOR)
        .filter_map(|pair| {
            let (key, value) = pair.split_once(':')?;
            Some(Favorite {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}
