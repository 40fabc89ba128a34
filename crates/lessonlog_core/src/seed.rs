//! Seed data import.
//!
//! # Responsibility
//! - Parse JSON seed files into entry inputs.
//! - Import them idempotently, keyed by title.
//!
//! # Invariants
//! - An existing entry with the same title is never modified.
//! - A bad record is skipped and reported; it never aborts the import.

use crate::model::entry::NewEntry;
use crate::repo::entry_repo::{EntryRepository, RepoError};
use crate::service::entry_service::{EntryService, EntryServiceError};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One record of a seed file. `learned_on` is kept as text so a bad date
/// only skips that record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub title: String,
    pub learned_on: String,
    pub body: String,
    #[serde(default)]
    pub tags: String,
}

/// Seed-level failure.
#[derive(Debug)]
pub enum SeedError {
    /// Seed file is not a JSON array of seed records.
    Parse(serde_json::Error),
    /// Storage failed while importing.
    Service(EntryServiceError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid seed file: {err}"),
            Self::Service(err) => write!(f, "seed import failed: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<EntryServiceError> for SeedError {
    fn from(value: EntryServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Service(value.into())
    }
}

/// A record left out of the import, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSeed {
    pub title: String,
    pub reason: String,
}

/// Outcome counts of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub existing: usize,
    pub skipped: Vec<SkippedSeed>,
}

/// Parses a seed file body.
pub fn parse_seed_file(json: &str) -> Result<Vec<SeedEntry>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Imports seed records, creating only titles not already stored.
///
/// # Errors
/// - `Service` on storage failures. Validation failures and unparseable
///   dates are reported in `SeedReport::skipped` instead.
pub fn import_seed<R: EntryRepository>(
    service: &EntryService<R>,
    seeds: &[SeedEntry],
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for seed in seeds {
        let learned_on = match NaiveDate::parse_from_str(seed.learned_on.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                warn!("event=seed_skip module=seed reason=invalid_date");
                report.skipped.push(SkippedSeed {
                    title: seed.title.clone(),
                    reason: format!("invalid date `{}`", seed.learned_on),
                });
                continue;
            }
        };

        if service.find_by_title(&seed.title)?.is_some() {
            report.existing += 1;
            continue;
        }

        let input = NewEntry {
            title: seed.title.clone(),
            body: seed.body.trim().to_string(),
            tags: seed.tags.clone(),
            learned_on,
        };
        match service.create_entry(&input) {
            Ok(_) => report.created += 1,
            Err(EntryServiceError::Validation(err)) => {
                warn!("event=seed_skip module=seed reason=validation");
                report.skipped.push(SkippedSeed {
                    title: seed.title.clone(),
                    reason: err.to_string(),
                });
            }
            Err(other) => return Err(other.into()),
        }
    }

    info!(
        "event=seed_import module=seed status=ok created={} existing={} skipped={}",
        report.created,
        report.existing,
        report.skipped.len()
    );
    Ok(report)
}
