use std::path::PathBuf;

use registrar_audit::duplicates::scan;
use registrar_core::config::RegistrarConfig;
use registrar_core::export::load_enrollments;
use registrar_core::store::RegistrarStore;
use registrar_output::OutputFormatter;

use super::{database_path, emit, export_path, open_database};

/// Run `registrar scan [STUDENT_ID]`.
///
/// Exit 0 after a report; with `strict`, exit 1 when duplicates exist.
pub fn run(
    formatter: &dyn OutputFormatter,
    config: &RegistrarConfig,
    student_id: Option<String>,
    export: Option<PathBuf>,
    from_db: bool,
    database: Option<PathBuf>,
    strict: bool,
) -> i32 {
    let Some(student_id) = student_id.or_else(|| config.scan.student_id.clone()) else {
        eprintln!("registrar scan: no student id given (pass STUDENT_ID or set scan.student_id)");
        return 2;
    };

    let records = if from_db {
        let path = database_path(database, config);
        let Some(store) = open_database("scan", &path) else {
            return 2;
        };
        store.enrollments(None)
    } else {
        load_enrollments(&export_path(export, config))
    };
    let records = match records {
        Ok(r) => r,
        Err(e) => {
            eprintln!("registrar scan: {}", e);
            return 2;
        }
    };
    tracing::info!(records = records.len(), "enrollments loaded");

    let result = scan(&records, &student_id);
    emit(&formatter.format_scan(&result));

    if strict && result.has_duplicates() {
        1
    } else {
        0
    }
}
