//! Domain model for logged lessons.
//!
//! # Responsibility
//! - Define the canonical entry record read by rendering and tag logic.
//! - Keep validation rules next to the data they guard.
//!
//! # Invariants
//! - Every persisted entry has a non-blank title and body.
//! - Tags are stored raw; the normalized view is derived at read time.

pub mod entry;
