//! `lessonlog` command-line entry point.
//!
//! # Responsibility
//! - Resolve flags/env into logging and database setup.
//! - Dispatch subcommands to core services.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use lessonlog_core::db::open_db;
use lessonlog_core::{default_log_level, init_logging, EntryService, SqliteEntryRepository};
use log::error;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("event=cli_exit module=cli status=error error={err}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.unwrap_or_else(default_log_level);
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let db = cli.db.as_path();
    match cli.command {
        Command::Render { file } => commands::render(file.as_deref()),
        Command::Add(args) => with_service(db, |service| commands::add(service, args)),
        Command::Edit(args) => with_service(db, |service| commands::edit(service, args)),
        Command::Show { id, html } => {
            with_service(db, |service| commands::show(service, id, html))
        }
        Command::List { tag } => {
            with_service(db, |service| commands::list(service, tag.as_deref()))
        }
        Command::Tags => with_service(db, |service| commands::tags(service)),
        Command::Delete { ids } => with_service(db, |service| commands::delete(service, &ids)),
        Command::Seed { file } => with_service(db, |service| commands::seed(service, &file)),
    }
}

fn with_service(
    db: &Path,
    action: impl FnOnce(&EntryService<SqliteEntryRepository<'_>>) -> Result<()>,
) -> Result<()> {
    let conn =
        open_db(db).with_context(|| format!("failed to open database `{}`", db.display()))?;
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn)?);
    action(&service)
}
