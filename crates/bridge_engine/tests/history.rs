use std::fs;

use bridge_engine::{CopyHistory, MAX_ENTRIES};
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use pretty_assertions::assert_eq;

fn at(second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 2)
        .and_then(|d| d.and_hms_micro_opt(3, 4, second, 500))
        .unwrap()
}

#[test]
fn entries_are_newest_first_and_persisted() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("copy_history.json");

    let mut history = CopyHistory::open(&path);
    assert!(history.entries().is_empty());
    history.add("first prompt", "", at(1)).unwrap();
    history.add("second\nprompt", "", at(2)).unwrap();

    let reopened = CopyHistory::open(&path);
    let entries = reopened.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].content, "second\nprompt");
    assert_eq!(entries[0].preview, "second prompt");
    assert_eq!(entries[0].timestamp, "2026-01-02T03:04:02.000500");
    assert_eq!(reopened.content(1), Some("first prompt"));
    assert_eq!(reopened.content(2), None);
}

#[test]
fn history_is_capped() {
    let tmp = tempfile::tempdir().unwrap();
    let mut history = CopyHistory::open(tmp.path().join("h.json"));
    for i in 0..(MAX_ENTRIES + 5) {
        history.add(&format!("prompt {i}"), "", at(0)).unwrap();
    }
    assert_eq!(history.entries().len(), MAX_ENTRIES);
    assert_eq!(history.content(0), Some("prompt 54"));
}

#[test]
fn prefix_is_removed_from_preview_only() {
    let tmp = tempfile::tempdir().unwrap();
    let mut history = CopyHistory::open(tmp.path().join("h.json"));
    history
        .add("Report follows.\r\n\r\nAll tests pass", "Report follows.", at(0))
        .unwrap();

    let entry = &history.entries()[0];
    assert_eq!(entry.preview, "All tests pass");
    assert_eq!(entry.content, "Report follows.\r\n\r\nAll tests pass");
}

#[test]
fn delete_ignores_out_of_range() {
    let tmp = tempfile::tempdir().unwrap();
    let mut history = CopyHistory::open(tmp.path().join("h.json"));
    history.add("a", "", at(0)).unwrap();
    history.add("b", "", at(1)).unwrap();

    assert!(!history.delete(7).unwrap());
    assert!(history.delete(0).unwrap());
    assert_eq!(history.content(0), Some("a"));
    assert_eq!(CopyHistory::open(history.path()).entries().len(), 1);
}

#[test]
fn corrupt_file_starts_empty_and_foreign_keys_survive() {
    let tmp = tempfile::tempdir().unwrap();
    let corrupt = tmp.path().join("corrupt.json");
    fs::write(&corrupt, "{ not json").unwrap();
    assert!(CopyHistory::open(&corrupt).entries().is_empty());

    let shared = tmp.path().join("shared.json");
    fs::write(
        &shared,
        "\u{FEFF}{\"gpt_to_cc\": [], \"cc_to_gpt\": [{\"timestamp\": \"t\", \"preview\": \"p\", \"content\": \"c\"}]}",
    )
    .unwrap();
    let mut history = CopyHistory::open(&shared);
    history.add("new", "", at(0)).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&shared).unwrap()).unwrap();
    assert_eq!(saved["cc_to_gpt"][0]["content"], "c");
    assert_eq!(saved["gpt_to_cc"][0]["content"], "new");
}
