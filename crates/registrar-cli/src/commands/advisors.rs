use std::path::{Path, PathBuf};

use registrar_audit::reconcile::reconcile_advisors;
use registrar_core::config::RegistrarConfig;
use registrar_core::types::AdvisorPair;
use registrar_output::OutputFormatter;

use super::{database_path, emit, export_path, open_database, read_export};

/// Run `registrar advisors`.
pub fn run(
    formatter: &dyn OutputFormatter,
    config: &RegistrarConfig,
    export: Option<PathBuf>,
    database: Option<PathBuf>,
    csv_dir: Option<PathBuf>,
) -> i32 {
    let Some(doc) = read_export("advisors", &export_path(export, config)) else {
        return 2;
    };
    let Some(store) = open_database("advisors", &database_path(database, config)) else {
        return 2;
    };

    match reconcile_advisors(&doc, &store, &config.aliases) {
        Ok(report) => {
            if let Some(dir) = csv_dir {
                let lists = [
                    ("advisor_only_in_export.csv", &report.export_only),
                    ("advisor_only_in_database.csv", &report.database_only),
                ];
                for (name, pairs) in lists.into_iter().filter(|(_, p)| !p.is_empty()) {
                    let path = dir.join(name);
                    if let Err(e) = write_pairs(&path, pairs) {
                        eprintln!("registrar advisors: failed to write {}: {}", path.display(), e);
                        return 2;
                    }
                    eprintln!("Wrote {}", path.display());
                }
            }
            emit(&formatter.format_reconcile(&report));
            if report.matches() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("registrar advisors: {}", e);
            2
        }
    }
}

/// Write `pairs` as `i_id,s_id` rows under a header line.
fn write_pairs(path: &Path, pairs: &[AdvisorPair]) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["i_id", "s_id"])?;
    for pair in pairs {
        writer.write_record([&pair.instructor_id, &pair.student_id])?;
    }
    writer.flush()?;
    Ok(())
}
