// Tests for `registrar profile`

use serde_json::json;

use crate::common::{project_with_export, run, stdout, university_export};

#[test]
fn test_profile_known_collections() {
    let (dir, _) = project_with_export(&university_export());
    let out = run(dir.path(), &["profile", "--json"]);
    assert_eq!(out.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let tables = report["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 8);
    let student = tables.iter().find(|t| t["table"] == "student").unwrap();
    assert_eq!(student["primary_key"]["field"], "ID");
    assert_eq!(student["records"], 2);
}

#[test]
fn test_profile_human_output() {
    let (dir, _) = project_with_export(&json!({
        "course": [
            {"course_id": "CS-101", "credits": 4, "tags": ["core"]},
            {"course_id": "CS-190", "credits": 3, "tags": []}
        ]
    }));
    let out = run(dir.path(), &["profile"]);
    let text = stdout(&out);
    assert!(text.contains("course (2 records)"));
    assert!(text.contains("primary key: course_id\n"));
    assert!(text.contains("  credits: BIGINT"));
    assert!(text.contains("child table course_tags_items <- tags (array)"));
}
