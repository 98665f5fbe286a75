use std::path::PathBuf;

use registrar_audit::integrity::check_integrity;
use registrar_core::config::RegistrarConfig;
use registrar_output::OutputFormatter;

use super::{database_path, emit, export_path, open_database, read_export};

/// Run `registrar check` -- exit 1 when the database disagrees with the export.
pub fn run(
    formatter: &dyn OutputFormatter,
    config: &RegistrarConfig,
    export: Option<PathBuf>,
    database: Option<PathBuf>,
) -> i32 {
    let Some(doc) = read_export("check", &export_path(export, config)) else {
        return 2;
    };
    let Some(store) = open_database("check", &database_path(database, config)) else {
        return 2;
    };

    match check_integrity(&doc, &store, &config.limits) {
        Ok(report) => {
            emit(&formatter.format_integrity(&report));
            if report.is_clean() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("registrar check: {}", e);
            2
        }
    }
}
