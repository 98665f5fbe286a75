// Tests for `registrar advisors`

use std::fs;

use serde_json::json;

use crate::common::{loaded_project, run, stdout, university_export};

#[test]
fn test_advisors_match_after_load() {
    let dir = loaded_project(&university_export());
    let out = run(dir.path(), &["advisors"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("Advisor pairs match."));
}

#[test]
fn test_advisors_resolve_aliases() {
    let dir = loaded_project(&university_export());
    let mut aliased = university_export();
    aliased["advisor"] = json!([
        {"instructor_id": "10101", "student_id": "12345"},
        {"I_ID": "22222", "S_ID": "00128"}
    ]);
    fs::write(dir.path().join("app.json"), aliased.to_string()).unwrap();
    let out = run(dir.path(), &["advisors"]);
    assert_eq!(out.status.code(), Some(0), "{}", stdout(&out));
}

#[test]
fn test_advisors_mismatch() {
    let dir = loaded_project(&university_export());
    let mut changed = university_export();
    changed["advisor"] = json!([{"i_ID": "10101", "s_ID": "12345"}]);
    fs::write(dir.path().join("app.json"), changed.to_string()).unwrap();
    let out = run(dir.path(), &["advisors"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Only in database (1):\n  (22222, 00128)\n"));
}

#[test]
fn test_advisors_writes_mismatch_csv() {
    let dir = loaded_project(&university_export());
    let mut changed = university_export();
    changed["advisor"] = json!([
        {"i_ID": "10101", "s_ID": "12345"},
        {"i_ID": "10101", "s_ID": "00128"}
    ]);
    fs::write(dir.path().join("app.json"), changed.to_string()).unwrap();
    let out = run(dir.path(), &["advisors", "--csv", "mismatch"]);
    assert_eq!(out.status.code(), Some(1));

    let export_only = fs::read_to_string(dir.path().join("mismatch/advisor_only_in_export.csv")).unwrap();
    assert_eq!(export_only, "i_id,s_id\n10101,00128\n");
    let database_only =
        fs::read_to_string(dir.path().join("mismatch/advisor_only_in_database.csv")).unwrap();
    assert_eq!(database_only, "i_id,s_id\n22222,00128\n");
}

#[test]
fn test_advisors_csv_skipped_when_pairs_match() {
    let dir = loaded_project(&university_export());
    let out = run(dir.path(), &["advisors", "--csv", "mismatch"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(!dir.path().join("mismatch").exists());
}
