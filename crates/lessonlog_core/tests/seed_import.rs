use lessonlog_core::db::open_db_in_memory;
use lessonlog_core::{import_seed, parse_seed_file, EntryService, SeedEntry, SqliteEntryRepository};

fn seed(title: &str, learned_on: &str, body: &str) -> SeedEntry {
    SeedEntry {
        title: title.to_string(),
        learned_on: learned_on.to_string(),
        body: body.to_string(),
        tags: "seed, Import".to_string(),
    }
}

#[test]
fn import_is_idempotent_by_title() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let seeds = vec![
        seed("One", "2024-04-08", "  Context: first\n"),
        seed("Two", "2024-04-09", "Learning: second"),
    ];

    let first = import_seed(&service, &seeds).unwrap();
    assert_eq!(first.created, 2);
    assert_eq!(first.existing, 0);
    assert!(first.skipped.is_empty());

    let second = import_seed(&service, &seeds).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.existing, 2);

    let stored = service.find_by_title("One").unwrap().unwrap();
    assert_eq!(stored.body, "Context: first");
    assert_eq!(stored.learned_on.to_string(), "2024-04-08");
    assert_eq!(service.list_entries(None).unwrap().entries.len(), 2);
}

#[test]
fn bad_records_are_skipped_and_reported() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let seeds = vec![
        seed("Bad date", "April eighth", "Learning: x"),
        seed("Empty body", "2024-04-08", "   "),
        seed("Good", "2024-04-08", "Learning: y"),
    ];

    let report = import_seed(&service, &seeds).unwrap();
    assert_eq!(report.created, 1);
    let skipped: Vec<_> = report.skipped.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(skipped, vec!["Bad date", "Empty body"]);
    assert!(report.skipped[0].reason.contains("April eighth"));
}

#[test]
fn bundled_seed_file_parses_and_imports() {
    let json = include_str!("../../../data/seed.json");
    let seeds = parse_seed_file(json).unwrap();
    assert!(!seeds.is_empty());

    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let report = import_seed(&service, &seeds).unwrap();
    assert_eq!(report.created, seeds.len());

    let listing = service.list_entries(Some("rails")).unwrap();
    assert!(!listing.entries.is_empty());
    assert!(listing.all_tags.windows(2).all(|pair| pair[0] < pair[1]));
}
