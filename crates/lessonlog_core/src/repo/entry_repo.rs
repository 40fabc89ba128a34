//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/get/list/bulk-delete over `entries`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewEntry::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Listing order is `created_at DESC, id DESC`.

use crate::db::DbError;
use crate::model::entry::{Entry, EntryId, EntryValidationError, NewEntry};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    title,
    body,
    tags,
    learned_on,
    created_at,
    updated_at
FROM entries";

const LEARNED_ON_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for entry storage.
pub trait EntryRepository {
    /// Inserts one entry and returns its storage id.
    fn create_entry(&self, input: &NewEntry) -> RepoResult<EntryId>;
    /// Replaces title/body/tags/date of an existing entry.
    fn update_entry(&self, id: EntryId, input: &NewEntry) -> RepoResult<()>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// Finds the first entry with exactly this title.
    fn find_by_title(&self, title: &str) -> RepoResult<Option<Entry>>;
    /// Lists every entry, newest first.
    fn list_entries(&self) -> RepoResult<Vec<Entry>>;
    /// Deletes the listed ids, ignoring unknown ones; returns rows removed.
    fn delete_entries(&self, ids: &[EntryId]) -> RepoResult<usize>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `InvalidData` when the `entries` table is missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'entries'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::InvalidData(
                "missing required table `entries`; was the connection migrated?".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, input: &NewEntry) -> RepoResult<EntryId> {
        input.validate()?;

        self.conn.execute(
            "INSERT INTO entries (title, body, tags, learned_on, created_at, updated_at)
             VALUES (
                ?1, ?2, ?3, ?4,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000)
             );",
            params![
                input.title.as_str(),
                input.body.as_str(),
                input.tags.as_str(),
                format_learned_on(input.learned_on),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_entry(&self, id: EntryId, input: &NewEntry) -> RepoResult<()> {
        input.validate()?;

        let changed = self.conn.execute(
            "UPDATE entries
             SET
                title = ?1,
                body = ?2,
                tags = ?3,
                learned_on = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                input.title.as_str(),
                input.body.as_str(),
                input.tags.as_str(),
                format_learned_on(input.learned_on),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_entry_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_by_title(&self, title: &str) -> RepoResult<Option<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL} WHERE title = ?1 ORDER BY id ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([title])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_entry_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_entries(&self) -> RepoResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL} ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        Ok(entries)
    }

    fn delete_entries(&self, ids: &[EntryId]) -> RepoResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let deleted = self.conn.execute(
            &format!("DELETE FROM entries WHERE id IN ({placeholders});"),
            params_from_iter(ids.iter()),
        )?;

        info!(
            "event=entries_delete module=repo status=ok requested={} deleted={}",
            ids.len(),
            deleted
        );
        Ok(deleted)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let id: EntryId = row.get("id")?;
    let learned_on_text: String = row.get("learned_on")?;
    let learned_on = NaiveDate::parse_from_str(&learned_on_text, LEARNED_ON_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid learned_on value `{learned_on_text}` for entry {id}"
        ))
    })?;

    Ok(Entry {
        id,
        title: row.get("title")?,
        body: row.get("body")?,
        tags: row.get("tags")?,
        learned_on,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn format_learned_on(date: NaiveDate) -> String {
    date.format(LEARNED_ON_FORMAT).to_string()
}
