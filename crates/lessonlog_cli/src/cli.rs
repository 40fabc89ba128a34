//! Command-line surface.
//!
//! Every global option falls back to a `LESSONLOG_*` environment variable.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use lessonlog_core::{EntryId, LogLevel};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lessonlog", version, about = "Personal log of lessons learned")]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "LESSONLOG_DB", default_value = "lessonlog.sqlite3", global = true)]
    pub db: PathBuf,

    /// Absolute directory for rolling log files. File logging is off when unset.
    #[arg(long, env = "LESSONLOG_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error. Defaults to debug in debug builds, info otherwise.
    #[arg(long, env = "LESSONLOG_LOG_LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log a new lesson.
    Add(AddArgs),
    /// Replace fields of an existing lesson.
    Edit(EditArgs),
    /// Print one lesson.
    Show {
        id: EntryId,
        /// Print the rendered HTML body instead of the raw text.
        #[arg(long)]
        html: bool,
    },
    /// List lessons, newest first.
    List {
        /// Keep lessons whose tags contain this text (case-insensitive).
        #[arg(long)]
        tag: Option<String>,
    },
    /// Print every tag in use, sorted.
    Tags,
    /// Delete lessons by id; unknown ids are ignored.
    Delete {
        #[arg(required = true)]
        ids: Vec<EntryId>,
    },
    /// Render a body (file or stdin) to HTML.
    Render { file: Option<PathBuf> },
    /// Import lessons from a JSON seed file, skipping existing titles.
    Seed { file: PathBuf },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    /// Body text; use `-` to read it from stdin.
    #[arg(long)]
    pub body: String,
    /// Comma-separated tags.
    #[arg(long, default_value = "")]
    pub tags: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub learned_on: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: EntryId,
    #[arg(long)]
    pub title: Option<String>,
    /// Body text; use `-` to read it from stdin.
    #[arg(long)]
    pub body: Option<String>,
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub learned_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_accepts_tag_filter() {
        let cli = Cli::parse_from(["lessonlog", "list", "--tag", "ruby"]);
        match cli.command {
            Command::List { tag } => assert_eq!(tag.as_deref(), Some("ruby")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_parses_learned_on_date() {
        let cli = Cli::parse_from([
            "lessonlog",
            "add",
            "--title",
            "t",
            "--body",
            "b",
            "--learned-on",
            "2024-04-12",
        ]);
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.learned_on.unwrap().to_string(), "2024-04-12");
                assert_eq!(args.tags, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn delete_requires_ids() {
        assert!(Cli::try_parse_from(["lessonlog", "delete"]).is_err());
    }
}
