use std::path::PathBuf;

use registrar_audit::profile::profile_document;
use registrar_core::config::RegistrarConfig;
use registrar_output::OutputFormatter;

use super::{emit, export_path, read_export};

/// Run `registrar profile`.
pub fn run(formatter: &dyn OutputFormatter, config: &RegistrarConfig, export: Option<PathBuf>) -> i32 {
    let Some(doc) = read_export("profile", &export_path(export, config)) else {
        return 2;
    };
    let report = profile_document(&doc);
    emit(&formatter.format_profile(&report));
    0
}
