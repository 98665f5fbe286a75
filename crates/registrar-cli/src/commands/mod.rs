pub mod advisors;
pub mod check;
pub mod completion;
pub mod load;
pub mod profile;
pub mod scan;
pub mod schema;

use std::path::{Path, PathBuf};

use registrar_core::config::RegistrarConfig;
use registrar_core::export::{load_document, ExportDocument};
use registrar_core::sqlite::SqliteRegistrarStore;

/// Configuration from `.registrar/` in the working directory, or defaults.
pub fn load_config() -> RegistrarConfig {
    match std::env::current_dir() {
        Ok(cwd) => RegistrarConfig::load(&cwd.join(".registrar")),
        Err(e) => {
            tracing::warn!("failed to get current directory: {}", e);
            RegistrarConfig::default()
        }
    }
}

/// The export to read: the flag (or env) when given, else config.
pub fn export_path(flag: Option<PathBuf>, config: &RegistrarConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.export_path.clone())
}

pub fn database_path(flag: Option<PathBuf>, config: &RegistrarConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.database_path.clone())
}

pub fn read_export(command: &str, path: &Path) -> Option<ExportDocument> {
    match load_document(path) {
        Ok(doc) => Some(doc),
        Err(e) => {
            eprintln!("registrar {}: {}", command, e);
            None
        }
    }
}

pub fn open_database(command: &str, path: &Path) -> Option<SqliteRegistrarStore> {
    if !path.exists() {
        eprintln!(
            "registrar {}: database {} not found. Run `registrar load` first.",
            command,
            path.display()
        );
        return None;
    }
    match SqliteRegistrarStore::open_existing(path) {
        Ok(store) => Some(store),
        Err(e) => {
            eprintln!("registrar {}: failed to open database: {}", command, e);
            None
        }
    }
}

/// Write formatter output to stdout with exactly one trailing newline.
pub fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}
