// Tests for `registrar check`

use std::fs;

use serde_json::json;

use crate::common::{loaded_project, project_with_export, run, stderr, stdout, university_export};

#[test]
fn test_check_clean_after_load() {
    let dir = loaded_project(&university_export());
    let out = run(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(0), "{}", stdout(&out));
    let text = stdout(&out);
    assert!(text.contains("ROW COUNTS (export vs database)"));
    assert!(text.contains("- takes: export=4 | database=4 -> OK"));
    assert!(text.ends_with("Integrity check clean (plaintext schema).\n"));
}

#[test]
fn test_check_detects_changed_export() {
    let dir = loaded_project(&university_export());
    let mut changed = university_export();
    changed["takes"].as_array_mut().unwrap().pop();
    fs::write(dir.path().join("app.json"), changed.to_string()).unwrap();

    let out = run(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("- takes: export=3 | database=4 -> MISMATCH"));
}

#[test]
fn test_check_reports_orphans() {
    let mut export = university_export();
    export["takes"].as_array_mut().unwrap().push(json!({
        "ID": "77777", "course_id": "PHY-101", "sec_id": "1", "semester": "Fall", "year": 2017
    }));
    let dir = loaded_project(&export);
    let out = run(dir.path(), &["check", "--json"]);
    assert_eq!(out.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let orphans: Vec<_> = report["orphans"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|o| !o["orphans"].as_array().unwrap().is_empty())
        .collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0]["table"], "takes");
    assert_eq!(orphans[0]["parent"], "student");
    assert_eq!(orphans[0]["orphans"], json!([["77777"]]));
}

#[test]
fn test_check_without_database() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Run `registrar load` first"));
}
