//! Advisor pair reconciliation between an export and the database.

use std::collections::BTreeSet;

use registrar_core::config::AliasConfig;
use registrar_core::export::ExportDocument;
use registrar_core::store::RegistrarStore;
use registrar_core::types::{key_text, AdvisorPair, RegistrarError};
use serde_json::{Map, Value};

use crate::types::ReconcileReport;

/// Value under the first alias present in `row`.
fn resolve<'a>(row: &'a Map<String, Value>, aliases: &[String]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| row.get(alias))
}

/// Advisor pairs of the export, with field names resolved through `aliases`.
pub fn export_advisor_pairs(doc: &ExportDocument, aliases: &AliasConfig) -> BTreeSet<AdvisorPair> {
    doc.rows("advisor")
        .into_iter()
        .map(|row| {
            AdvisorPair::new(
                key_text(resolve(row, &aliases.instructor)),
                key_text(resolve(row, &aliases.student)),
            )
        })
        .collect()
}

pub fn reconcile_advisors(
    doc: &ExportDocument,
    store: &dyn RegistrarStore,
    aliases: &AliasConfig,
) -> Result<ReconcileReport, RegistrarError> {
    let exported = export_advisor_pairs(doc, aliases);
    let stored = store.advisor_pairs()?;

    let report = ReconcileReport {
        version: env!("CARGO_PKG_VERSION").into(),
        command: "advisors".into(),
        export_pairs: exported.len(),
        database_pairs: stored.len(),
        common: exported.intersection(&stored).count(),
        export_only: exported.difference(&stored).cloned().collect(),
        database_only: stored.difference(&exported).cloned().collect(),
    };
    if !report.matches() {
        tracing::warn!(
            export_only = report.export_only.len(),
            database_only = report.database_only.len(),
            "advisor pairs differ"
        );
    }
    Ok(report)
}
