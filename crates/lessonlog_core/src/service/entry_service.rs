//! Entry use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/bulk-delete APIs for lessons.
//! - Build the list view model: filtered entries plus the tag vocabulary.
//! - Render entry bodies for display.
//!
//! # Invariants
//! - Listing keeps repository order (`created_at DESC, id DESC`).
//! - `all_tags` is computed over every entry, not only the filtered ones.
//! - Blank filters behave exactly like an absent filter.

use crate::model::entry::{Entry, EntryId, EntryValidationError, NewEntry};
use crate::render::render_body;
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};
use crate::tags::{filter_entries, unique_tags};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for entry use-cases.
#[derive(Debug)]
pub enum EntryServiceError {
    /// Input failed presence rules.
    Validation(EntryValidationError),
    /// Target entry does not exist.
    NotFound(EntryId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for EntryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid entry: {err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent entry state: {details}"),
        }
    }
}

impl Error for EntryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EntryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<EntryValidationError> for EntryServiceError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type ServiceResult<T> = Result<T, EntryServiceError>;

/// List view model: what the index page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListing {
    /// Entries passing the filter, newest first.
    pub entries: Vec<Entry>,
    /// Sorted tag vocabulary over all stored entries.
    pub all_tags: Vec<String>,
    /// The filter actually applied; `None` when absent or blank.
    pub active_filter: Option<String>,
}

impl EntryListing {
    /// Whether a filter was applied and nothing matched.
    pub fn is_filtered_empty(&self) -> bool {
        self.active_filter.is_some() && self.entries.is_empty()
    }
}

/// Display projection for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub entry: Entry,
    /// Normalized tags in first-occurrence order.
    pub tags: Vec<String>,
    /// Safe HTML fragment; embed without further escaping.
    pub body_html: String,
}

/// Builds the display projection for one entry.
pub fn render_entry(entry: &Entry) -> RenderedEntry {
    RenderedEntry {
        entry: entry.clone(),
        tags: entry.tag_list(),
        body_html: render_body(&entry.body),
    }
}

/// Entry service facade over repository implementations.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new entry, returning the stored record.
    pub fn create_entry(&self, input: &NewEntry) -> ServiceResult<Entry> {
        input.validate()?;
        let id = self.repo.create_entry(input)?;
        info!("event=entry_create module=service status=ok entry_id={id}");
        self.repo
            .get_entry(id)?
            .ok_or(EntryServiceError::InconsistentState(
                "created entry not found in read-back",
            ))
    }

    /// Replaces an existing entry's fields.
    pub fn update_entry(&self, id: EntryId, input: &NewEntry) -> ServiceResult<Entry> {
        input.validate()?;
        self.repo.update_entry(id, input)?;
        info!("event=entry_update module=service status=ok entry_id={id}");
        self.repo
            .get_entry(id)?
            .ok_or(EntryServiceError::InconsistentState(
                "updated entry not found in read-back",
            ))
    }

    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        self.repo.get_entry(id)
    }

    pub fn find_by_title(&self, title: &str) -> RepoResult<Option<Entry>> {
        self.repo.find_by_title(title)
    }

    /// Lists entries with an optional substring tag filter.
    pub fn list_entries(&self, filter: Option<&str>) -> ServiceResult<EntryListing> {
        let all = self.repo.list_entries()?;
        let active_filter = filter
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string);
        let entries = filter_entries(&all, active_filter.as_deref());
        let all_tags = unique_tags(&all);

        info!(
            "event=entries_list module=service status=ok total={} shown={} filtered={}",
            all.len(),
            entries.len(),
            active_filter.is_some()
        );
        Ok(EntryListing {
            entries,
            all_tags,
            active_filter,
        })
    }

    /// Deletes the listed entries; unknown ids are skipped.
    ///
    /// Returns the number of entries actually removed.
    pub fn delete_entries(&self, ids: &[EntryId]) -> ServiceResult<usize> {
        let deleted = self.repo.delete_entries(ids)?;
        if deleted < ids.len() {
            warn!(
                "event=entries_delete module=service status=partial requested={} deleted={}",
                ids.len(),
                deleted
            );
        }
        Ok(deleted)
    }
}

/// Formats the bulk-delete outcome message, e.g. `2 entries deleted successfully.`
pub fn delete_summary(deleted: usize) -> String {
    let noun = if deleted == 1 { "entry" } else { "entries" };
    format!("{deleted} {noun} deleted successfully.")
}
