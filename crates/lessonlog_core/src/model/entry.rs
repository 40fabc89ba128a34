//! Entry domain model.
//!
//! # Responsibility
//! - Define the persisted lesson record and its write-side input shape.
//! - Validate title/body presence before any persistence path runs.
//!
//! # Invariants
//! - `title` and `body` are never blank for a valid entry.
//! - `tags` keeps the raw comma-separated input; it is never rewritten.
//! - `learned_on` is a calendar date serialized as `YYYY-MM-DD`.

use crate::tags::normalize_tags;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by storage.
pub type EntryId = i64;

/// Validation failures for entry write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    BlankTitle,
    BlankBody,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title can't be blank"),
            Self::BlankBody => write!(f, "body can't be blank"),
        }
    }
}

impl Error for EntryValidationError {}

/// One logged lesson as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    /// Free text; rendered through `render::render_body` for display.
    pub body: String,
    /// Raw comma-separated tag string, possibly empty.
    pub tags: String,
    pub learned_on: NaiveDate,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Entry {
    /// Returns the normalized tag list for display.
    pub fn tag_list(&self) -> Vec<String> {
        normalize_tags(Some(self.tags.as_str()))
    }
}

/// Write-side input for create/update use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: String,
    pub learned_on: NaiveDate,
}

impl NewEntry {
    /// Creates an entry input learned today (local date).
    pub fn new(title: impl Into<String>, body: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: tags.into(),
            learned_on: chrono::Local::now().date_naive(),
        }
    }

    /// Overrides the learned-on date.
    pub fn learned_on(mut self, date: NaiveDate) -> Self {
        self.learned_on = date;
        self
    }

    /// Checks presence rules shared by create and update.
    ///
    /// # Errors
    /// - `BlankTitle` when `title` is empty or whitespace only.
    /// - `BlankBody` when `body` is empty or whitespace only.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.title.trim().is_empty() {
            return Err(EntryValidationError::BlankTitle);
        }
        if self.body.trim().is_empty() {
            return Err(EntryValidationError::BlankBody);
        }
        Ok(())
    }
}
