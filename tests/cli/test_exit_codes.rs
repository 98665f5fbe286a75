// Tests for CLI exit code behavior

use serde_json::json;

use crate::common::{project_with_export, run, stderr, university_export};

#[test]
/// Exit code 0 when duplicates are found without --strict.
fn test_exit_code_0_duplicates_not_strict() {
    let (dir, _) = project_with_export(&university_export());
    assert_eq!(run(dir.path(), &["scan", "12345"]).status.code(), Some(0));
}

#[test]
/// Exit code 1 when duplicates are found with --strict.
fn test_exit_code_1_strict_duplicates() {
    let (dir, _) = project_with_export(&university_export());
    assert_eq!(run(dir.path(), &["scan", "12345", "--strict"]).status.code(), Some(1));
}

#[test]
fn test_exit_code_0_strict_clean() {
    let (dir, _) = project_with_export(&university_export());
    assert_eq!(run(dir.path(), &["scan", "00128", "--strict"]).status.code(), Some(0));
}

#[test]
/// Exit code 2 when the export does not exist.
fn test_exit_code_2_missing_export() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = run(dir.path(), &["scan", "12345"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).starts_with("registrar scan:"));
}

#[test]
fn test_exit_code_2_malformed_export() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("app.json"), "{not json").unwrap();
    assert_eq!(run(dir.path(), &["scan", "12345"]).status.code(), Some(2));
}

#[test]
fn test_exit_code_2_missing_takes() {
    let (dir, _) = project_with_export(&json!({"student": []}));
    let out = run(dir.path(), &["scan", "12345"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("takes"));
}

#[test]
fn test_exit_code_2_no_student_id() {
    let (dir, _) = project_with_export(&university_export());
    assert_eq!(run(dir.path(), &["scan"]).status.code(), Some(2));
}

#[test]
fn test_exit_code_2_unknown_shell() {
    let dir = tempfile::TempDir::new().unwrap();
    assert_eq!(run(dir.path(), &["completion", "tcsh"]).status.code(), Some(2));
}

#[test]
fn test_completion_bash() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = run(dir.path(), &["completion", "bash"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("registrar"));
}
