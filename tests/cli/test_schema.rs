// Tests for `registrar schema`

use crate::common::{run, stdout};

#[test]
fn test_schema_plaintext() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = run(dir.path(), &["schema"]);
    assert_eq!(out.status.code(), Some(0));
    let ddl = stdout(&out);
    assert_eq!(ddl.matches("CREATE TABLE IF NOT EXISTS").count(), 11);
    assert!(ddl.contains("grade TEXT"));
    assert!(!ddl.contains("grade_ct"));
    // Parents are created before children.
    assert!(ddl.find("CREATE TABLE IF NOT EXISTS department").unwrap()
        < ddl.find("CREATE TABLE IF NOT EXISTS course").unwrap());
}

#[test]
fn test_schema_sealed() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = run(dir.path(), &["schema", "--sealed"]);
    let ddl = stdout(&out);
    assert!(ddl.contains("grade_ct BLOB"));
    assert!(ddl.contains("grade_iv BLOB"));
    assert!(ddl.contains("salary_ct BLOB"));
}

#[test]
fn test_schema_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = run(dir.path(), &["schema", "--sealed", "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["revision"], "sealed");
    assert!(value["ddl"].as_str().unwrap().contains("CREATE TABLE"));
}
