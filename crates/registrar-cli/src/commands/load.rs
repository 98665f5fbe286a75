use std::path::{Path, PathBuf};

use dialoguer::{console::Term, Confirm};
use registrar_audit::types::LoadResult;
use registrar_core::config::RegistrarConfig;
use registrar_core::schema::SchemaRevision;
use registrar_core::sqlite::SqliteRegistrarStore;
use registrar_core::sqlite_load::LoadOptions;
use registrar_output::OutputFormatter;

use super::{database_path, emit, export_path, read_export};

/// Run `registrar load` -- import an export into a plaintext database,
/// replacing the rows of an existing one.
pub fn run(
    formatter: &dyn OutputFormatter,
    config: &RegistrarConfig,
    export: Option<PathBuf>,
    database: Option<PathBuf>,
    enforce_fk: bool,
    yes: bool,
) -> i32 {
    let export = export_path(export, config);
    let database = database_path(database, config);

    let Some(doc) = read_export("load", &export) else {
        return 2;
    };

    let exists = database.exists();
    if exists && !yes {
        match confirm_replace(&database) {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("cancelled");
                return 0;
            }
            Err(msg) => {
                eprintln!("registrar load: {}", msg);
                return 2;
            }
        }
    }

    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("registrar load: failed to create {}: {}", parent.display(), e);
            return 2;
        }
    }

    let mut store = match SqliteRegistrarStore::open(&database, SchemaRevision::Plaintext) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("registrar load: failed to open database: {}", e);
            return 2;
        }
    };
    let options = LoadOptions {
        enforce_foreign_keys: enforce_fk,
        cipher: None,
        replace: exists,
    };
    match store.load_export(&doc, options) {
        Ok(summary) => {
            let result = LoadResult {
                version: env!("CARGO_PKG_VERSION").into(),
                command: "load".into(),
                database: database.display().to_string(),
                summary,
            };
            emit(&formatter.format_load(&result));
            0
        }
        Err(e) => {
            eprintln!("registrar load: {}", e);
            2
        }
    }
}

/// Ask before replacing `database`. Refuses when stderr is not a terminal.
fn confirm_replace(database: &Path) -> Result<bool, String> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(format!(
            "{} already exists; pass --yes to replace it",
            database.display()
        ));
    }
    Confirm::new()
        .with_prompt(format!("Replace all rows in {}?", database.display()))
        .default(false)
        .interact_on(&term)
        .map_err(|e| e.to_string())
}
