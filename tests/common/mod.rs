//! Shared test helpers for registrar integration tests.
//!
//! Import from any integration test file with:
//!   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

/// Get path to compiled registrar binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn registrar_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("registrar");
    if path.exists() {
        return path;
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = workspace.join("target/debug/registrar");
    if fallback.exists() {
        return fallback;
    }
    let status = Command::new("cargo")
        .args(["build", "-p", "registrar-cli"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build registrar");
    assert!(status.success(), "Failed to build registrar binary");
    fallback
}

/// Run registrar in `dir` with a clean environment for its own variables.
#[allow(dead_code)]
pub fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(registrar_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("REGISTRAR_EXPORT")
        .env_remove("REGISTRAR_DATABASE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run registrar")
}

#[allow(dead_code)]
pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[allow(dead_code)]
pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

/// A small university export. Student 12345 takes CS-101 twice.
#[allow(dead_code)]
pub fn university_export() -> Value {
    json!({
        "department": [
            {"dept_name": "Comp. Sci.", "building": "Taylor", "budget": 100000},
            {"dept_name": "Physics", "building": "Watson", "budget": 70000}
        ],
        "course": [
            {"course_id": "CS-101", "title": "Intro. to Computer Science", "dept_name": "Comp. Sci.", "credits": 4},
            {"course_id": "CS-190", "title": "Game Design", "dept_name": "Comp. Sci.", "credits": 4},
            {"course_id": "PHY-101", "title": "Physical Principles", "dept_name": "Physics", "credits": 4}
        ],
        "instructor": [
            {"ID": "10101", "name": "Srinivasan", "dept_name": "Comp. Sci.", "salary": 65000},
            {"ID": "22222", "name": "Einstein", "dept_name": "Physics", "salary": 95000}
        ],
        "student": [
            {"ID": "00128", "name": "Zhang", "dept_name": "Comp. Sci.", "tot_cred": 102},
            {"ID": "12345", "name": "Shankar", "dept_name": "Comp. Sci.", "tot_cred": 32}
        ],
        "section": [
            {"course_id": "CS-101", "sec_id": "1", "semester": "Fall", "year": 2017},
            {"course_id": "CS-101", "sec_id": "2", "semester": "Spring", "year": 2018},
            {"course_id": "CS-190", "sec_id": "1", "semester": "Spring", "year": 2017},
            {"course_id": "PHY-101", "sec_id": "1", "semester": "Fall", "year": 2017}
        ],
        "teaches": [
            {"ID": "10101", "course_id": "CS-101", "sec_id": "1", "semester": "Fall", "year": 2017}
        ],
        "takes": [
            {"ID": "00128", "course_id": "CS-101", "sec_id": "1", "semester": "Fall", "year": 2017, "grade": "A"},
            {"ID": "12345", "course_id": "CS-101", "sec_id": "1", "semester": "Fall", "year": 2017, "grade": "F"},
            {"ID": "12345", "course_id": "CS-101", "sec_id": "2", "semester": "Spring", "year": 2018, "grade": "B"},
            {"ID": "12345", "course_id": "CS-190", "sec_id": "1", "semester": "Spring", "year": 2017, "grade": "A"}
        ],
        "advisor": [
            {"i_ID": "10101", "s_ID": "12345"},
            {"i_ID": "22222", "s_ID": "00128"}
        ]
    })
}

/// Write `export` as `app.json` in a fresh directory.
///
/// Returns (TempDir, export_path). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn project_with_export(export: &Value) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    fs::write(&path, serde_json::to_string_pretty(export).unwrap()).unwrap();
    (dir, path)
}

/// A project whose export has been loaded into `.registrar/registrar.db`.
#[allow(dead_code)]
pub fn loaded_project(export: &Value) -> TempDir {
    let (dir, _) = project_with_export(export);
    let out = run(dir.path(), &["load"]);
    assert!(out.status.success(), "load failed: {}", stderr(&out));
    dir
}
