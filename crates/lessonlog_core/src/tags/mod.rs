//! Tag model derived from raw entry tag strings.
//!
//! # Responsibility
//! - Normalize comma-separated tag input for display.
//! - Collect the unique tag vocabulary over a set of entries.
//! - Decide filter membership for the list view.
//!
//! # Invariants
//! - Tags are never stored separately; they are derived on every read.
//! - All operations are total; blank filters mean "no filter".

pub mod tag_set;

pub use tag_set::{filter_entries, matches_tag, normalize_tag, normalize_tags, unique_tags};
