//! Tag normalization, extraction and filtering.
//!
//! # Invariants
//! - `normalize_tags` is idempotent and keeps first-occurrence order.
//! - `unique_tags` output is sorted lexicographically.
//! - `matches_tag` is a case-insensitive substring test over the raw tag
//!   string, not a whole-tag comparison: `"ab"` matches an entry tagged
//!   `"crab"`.

use crate::model::entry::Entry;
use std::collections::HashSet;

/// Normalizes one tag value: trimmed, lower-cased, `None` when blank.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Splits a raw comma-separated tag string into normalized, deduplicated
/// tags in first-occurrence order.
pub fn normalize_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    dedupe_in_order(raw.split(',').filter_map(normalize_tag))
}

/// Returns every tag used by `entries`, deduplicated and sorted.
pub fn unique_tags(entries: &[Entry]) -> Vec<String> {
    let mut tags = dedupe_in_order(
        entries
            .iter()
            .flat_map(|entry| normalize_tags(Some(entry.tags.as_str()))),
    );
    tags.sort();
    tags
}

/// Returns whether the entry's raw tag string contains `filter`,
/// ignoring case.
pub fn matches_tag(entry: &Entry, filter: &str) -> bool {
    entry
        .tags
        .to_lowercase()
        .contains(filter.to_lowercase().as_str())
}

/// Keeps the entries matching `filter`, preserving order.
///
/// An absent, empty or whitespace-only filter returns every entry.
pub fn filter_entries(entries: &[Entry], filter: Option<&str>) -> Vec<Entry> {
    match filter.filter(|value| !value.trim().is_empty()) {
        Some(tag) => entries
            .iter()
            .filter(|entry| matches_tag(entry, tag))
            .cloned()
            .collect(),
        None => entries.to_vec(),
    }
}

fn dedupe_in_order(tags: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.filter(|tag| seen.insert(tag.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_entries, matches_tag, normalize_tag, normalize_tags, unique_tags};
    use crate::model::entry::Entry;
    use chrono::NaiveDate;

    fn entry_with_tags(id: i64, tags: &str) -> Entry {
        Entry {
            id,
            title: format!("entry {id}"),
            body: "body".to_string(),
            tags: tags.to_string(),
            learned_on: NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn ids(entries: &[Entry]) -> Vec<i64> {
        entries.iter().map(|entry| entry.id).collect()
    }

    #[test]
    fn normalize_tag_trims_and_lowercases() {
        assert_eq!(normalize_tag("  RuSt "), Some("rust".to_string()));
        assert_eq!(normalize_tag(" \t"), None);
    }

    #[test]
    fn normalize_tags_dedupes_in_first_occurrence_order() {
        assert_eq!(normalize_tags(Some("Ruby, ruby , RAILS")), vec!["ruby", "rails"]);
    }

    #[test]
    fn normalize_tags_handles_empty_and_absent_input() {
        assert!(normalize_tags(None).is_empty());
        assert!(normalize_tags(Some("")).is_empty());
        assert!(normalize_tags(Some(" , ,, ")).is_empty());
    }

    #[test]
    fn normalize_tags_is_idempotent() {
        for raw in ["Ruby, ruby , RAILS", ",a,,B, a ,b,", "", "Ünïcode, ünÏCODE"] {
            let once = normalize_tags(Some(raw));
            let twice = normalize_tags(Some(once.join(",").as_str()));
            assert_eq!(once, twice, "input: {raw:?}");
            assert!(once.iter().all(|tag| !tag.is_empty()));
        }
    }

    #[test]
    fn unique_tags_sorts_after_dedupe() {
        let entries = vec![entry_with_tags(1, "ruby,rails"), entry_with_tags(2, "css,web")];
        assert_eq!(unique_tags(&entries), vec!["css", "rails", "ruby", "web"]);
    }

    #[test]
    fn unique_tags_merges_case_variants_across_entries() {
        let entries = vec![entry_with_tags(1, "Web, CSS"), entry_with_tags(2, "web,")];
        assert_eq!(unique_tags(&entries), vec!["css", "web"]);
    }

    #[test]
    fn matches_tag_uses_case_insensitive_substring() {
        assert!(matches_tag(&entry_with_tags(1, "ruby, basics"), "ruby"));
        assert!(matches_tag(&entry_with_tags(1, "Ruby, basics"), "RUBY"));
        assert!(!matches_tag(&entry_with_tags(1, "css, web"), "ruby"));
    }

    #[test]
    fn matches_tag_accepts_partial_tag_text() {
        assert!(matches_tag(&entry_with_tags(1, "crab"), "ab"));
    }

    #[test]
    fn filter_entries_without_filter_returns_all_in_order() {
        let entries = vec![entry_with_tags(3, "a"), entry_with_tags(1, "b")];
        assert_eq!(ids(&filter_entries(&entries, None)), vec![3, 1]);
        assert_eq!(ids(&filter_entries(&entries, Some(""))), vec![3, 1]);
        assert_eq!(ids(&filter_entries(&entries, Some("  "))), vec![3, 1]);
    }

    #[test]
    fn filter_entries_keeps_relative_order() {
        let entries = vec![
            entry_with_tags(1, "ruby, basics"),
            entry_with_tags(2, "rails, ruby, web"),
            entry_with_tags(3, "css, web"),
        ];
        assert_eq!(ids(&filter_entries(&entries, Some("ruby"))), vec![1, 2]);
        assert_eq!(ids(&filter_entries(&entries, Some("web"))), vec![2, 3]);
        assert!(filter_entries(&entries, Some("nonexistent")).is_empty());
    }
}
