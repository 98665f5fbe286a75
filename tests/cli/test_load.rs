// Tests for `registrar load`

use serde_json::json;

use crate::common::{loaded_project, project_with_export, run, stderr, stdout, university_export};

#[test]
fn test_load_creates_database() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["load"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    assert!(dir.path().join(".registrar/registrar.db").exists());
    let text = stdout(&out);
    assert!(text.starts_with("Loaded 20 row(s) into"), "{text}");
    assert!(text.contains("  takes: 4\n"));
    assert!(text.contains("foreign keys not enforced"));
}

#[test]
fn test_load_refuses_to_replace_without_yes() {
    let dir = loaded_project(&university_export());
    let out = run(dir.path(), &["load"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("pass --yes"));
}

#[test]
fn test_load_replaces_with_yes() {
    let dir = loaded_project(&university_export());
    let out = run(dir.path(), &["load", "--yes", "--json"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let takes = value["summary"]["tables"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["table"] == "takes")
        .unwrap()
        .clone();
    assert_eq!(takes["rows"], 4);

    // Rows were replaced, not appended.
    let check = run(dir.path(), &["check"]);
    assert_eq!(check.status.code(), Some(0), "{}", stdout(&check));
}

#[test]
fn test_load_enforce_fk_rejects_orphan() {
    let mut export = university_export();
    export["advisor"]
        .as_array_mut()
        .unwrap()
        .push(json!({"i_ID": "404", "s_ID": "12345"}));
    let (dir, _) = project_with_export(&export);
    let out = run(dir.path(), &["load", "--enforce-fk"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("advisor"));
}

#[test]
fn test_load_custom_database_path() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["load", "--database", "out/uni.db"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    assert!(dir.path().join("out/uni.db").exists());
}

#[test]
fn test_failed_reload_keeps_previous_rows() {
    let dir = loaded_project(&university_export());
    let mut broken = university_export();
    broken["advisor"]
        .as_array_mut()
        .unwrap()
        .push(json!({"i_ID": "404", "s_ID": "12345"}));
    std::fs::write(dir.path().join("app.json"), broken.to_string()).unwrap();

    let out = run(dir.path(), &["load", "--yes", "--enforce-fk"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("FOREIGN KEY"), "{}", stderr(&out));

    let scan = run(dir.path(), &["scan", "12345", "--db"]);
    assert_eq!(scan.status.code(), Some(0), "{}", stderr(&scan));
    assert!(stdout(&scan).contains("CS-101: 2 times"), "{}", stdout(&scan));
}
