//! HTTP handlers for the slambook API.

pub mod books;
pub mod entries;
