// Tests for `registrar scan`

use std::fs;

use serde_json::json;

use crate::common::{loaded_project, project_with_export, run, stderr, stdout, university_export};

#[test]
fn test_scan_reports_duplicate_course() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["scan", "12345"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("Found 3 record(s) for student 12345:"), "{text}");
    assert!(text.contains("Duplicate course registrations:\n  CS-101: 2 times\n"));
}

#[test]
fn test_scan_unknown_student() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["scan", "99999"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "No records found for student 99999.\n");
}

#[test]
fn test_scan_student_without_duplicates() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["scan", "00128"]);
    assert!(stdout(&out).contains("No duplicate course registrations."));
}

#[test]
fn test_scan_json_output() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["scan", "12345", "--json"]);
    assert_eq!(out.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["command"], "scan");
    assert_eq!(value["matched"].as_array().unwrap().len(), 3);
    assert_eq!(value["duplicates"], json!([{"course_id": "CS-101", "count": 2}]));
}

#[test]
fn test_scan_student_from_config() {
    let (dir, _) = project_with_export(&university_export());
    fs::create_dir_all(dir.path().join(".registrar")).unwrap();
    fs::write(
        dir.path().join(".registrar/registrar.json"),
        r#"{"scan": {"student_id": "12345"}}"#,
    )
    .unwrap();
    let out = run(dir.path(), &["scan"]);
    assert!(stdout(&out).contains("for student 12345"));
}

#[test]
fn test_scan_export_flag() {
    let (dir, path) = project_with_export(&university_export());
    let moved = dir.path().join("registrar-export.json");
    fs::rename(&path, &moved).unwrap();
    let out = run(dir.path(), &["scan", "12345", "--export", "registrar-export.json"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
}

#[test]
fn test_scan_from_database() {
    let dir = loaded_project(&university_export());
    let out = run(dir.path(), &["scan", "12345", "--db"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    assert!(stdout(&out).contains("CS-101: 2 times"));
}

#[test]
fn test_scan_ambiguous_student_field_fails() {
    let (dir, _) = project_with_export(&json!({
        "takes": [{"s_ID": "12345", "course_id": "CS-101"}]
    }));
    let out = run(dir.path(), &["scan", "12345"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("registrar scan:"));
    assert!(stderr(&out).contains("s_ID"));
}
