//! Subcommand handlers over the core services.

use crate::cli::{AddArgs, EditArgs};
use anyhow::{bail, Context, Result};
use lessonlog_core::{
    delete_summary, import_seed, parse_seed_file, render_body, render_entry, Entry, EntryId,
    EntryRepository, EntryService, NewEntry,
};
use std::io::Read;
use std::path::Path;

pub fn add<R: EntryRepository>(service: &EntryService<R>, args: AddArgs) -> Result<()> {
    let mut input = NewEntry::new(args.title, read_body_arg(args.body)?, args.tags);
    if let Some(date) = args.learned_on {
        input = input.learned_on(date);
    }
    let entry = service.create_entry(&input)?;
    println!("Lesson logged successfully (id {}).", entry.id);
    Ok(())
}

pub fn edit<R: EntryRepository>(service: &EntryService<R>, args: EditArgs) -> Result<()> {
    let Some(current) = service.get_entry(args.id)? else {
        bail!("entry not found: {}", args.id);
    };
    let input = NewEntry {
        title: args.title.unwrap_or(current.title),
        body: match args.body {
            Some(body) => read_body_arg(body)?,
            None => current.body,
        },
        tags: args.tags.unwrap_or(current.tags),
        learned_on: args.learned_on.unwrap_or(current.learned_on),
    };
    let entry = service.update_entry(args.id, &input)?;
    println!("Lesson {} updated.", entry.id);
    Ok(())
}

pub fn show<R: EntryRepository>(service: &EntryService<R>, id: EntryId, html: bool) -> Result<()> {
    let Some(entry) = service.get_entry(id)? else {
        bail!("entry not found: {id}");
    };
    let rendered = render_entry(&entry);
    println!("{} ({})", entry.title, entry.learned_on);
    if !rendered.tags.is_empty() {
        println!("tags: {}", rendered.tags.join(", "));
    }
    println!();
    if html {
        println!("{}", rendered.body_html);
    } else {
        println!("{}", entry.body);
    }
    Ok(())
}

pub fn list<R: EntryRepository>(service: &EntryService<R>, tag: Option<&str>) -> Result<()> {
    let listing = service.list_entries(tag)?;
    println!("Filter by Tag: {}", listing.all_tags.join(" "));
    if let Some(filter) = listing.active_filter.as_deref() {
        println!("Filtering by `{filter}` (omit --tag to clear filter)");
    }
    println!();

    if listing.is_filtered_empty() {
        println!("No entries found matching your filter.");
        return Ok(());
    }
    if listing.entries.is_empty() {
        println!("No entries logged yet.");
        return Ok(());
    }
    for entry in &listing.entries {
        println!("{}", summary_line(entry));
    }
    Ok(())
}

pub fn tags<R: EntryRepository>(service: &EntryService<R>) -> Result<()> {
    for tag in service.list_entries(None)?.all_tags {
        println!("{tag}");
    }
    Ok(())
}

pub fn delete<R: EntryRepository>(service: &EntryService<R>, ids: &[EntryId]) -> Result<()> {
    let deleted = service.delete_entries(ids)?;
    println!("{}", delete_summary(deleted));
    Ok(())
}

pub fn render(file: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?,
        None => read_stdin()?,
    };
    println!("{}", render_body(&text));
    Ok(())
}

pub fn seed<R: EntryRepository>(service: &EntryService<R>, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read seed file `{}`", file.display()))?;
    let seeds = parse_seed_file(&json)?;
    let report = import_seed(service, &seeds)?;
    println!(
        "Seeded {} new, {} already present, {} skipped.",
        report.created,
        report.existing,
        report.skipped.len()
    );
    for skipped in &report.skipped {
        println!("  skipped `{}`: {}", skipped.title, skipped.reason);
    }
    Ok(())
}

fn summary_line(entry: &Entry) -> String {
    let tags = entry.tag_list();
    if tags.is_empty() {
        format!("#{:<5} {}  {}", entry.id, entry.learned_on, entry.title)
    } else {
        format!(
            "#{:<5} {}  {}  [{}]",
            entry.id,
            entry.learned_on,
            entry.title,
            tags.join(", ")
        )
    }
}

fn read_body_arg(body: String) -> Result<String> {
    if body == "-" {
        read_stdin()
    } else {
        Ok(body)
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}
