//! Core logic for the lesson log.
//! Rendering, tag handling and persistence rules all live here; front-ends
//! only call into it.

pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod seed;
pub mod service;
pub mod tags;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::entry::{Entry, EntryId, EntryValidationError, NewEntry};
pub use render::{escape_html, render_body, KEYWORD_LABELS};
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use seed::{import_seed, parse_seed_file, SeedEntry, SeedError, SeedReport, SkippedSeed};
pub use service::entry_service::{
    delete_summary, render_entry, EntryListing, EntryService, EntryServiceError, RenderedEntry,
    ServiceResult,
};
pub use tags::{filter_entries, matches_tag, normalize_tag, normalize_tags, unique_tags};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
