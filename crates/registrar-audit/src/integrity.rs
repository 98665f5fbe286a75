//! Export-versus-database integrity checks.

use std::collections::HashMap;

use registrar_core::config::LimitsConfig;
use registrar_core::export::ExportDocument;
use registrar_core::hash::checksum_keys;
use registrar_core::schema::{SchemaRevision, TableDef, TABLES};
use registrar_core::store::RegistrarStore;
use registrar_core::types::{key_text, KeyCount, RegistrarError};
use serde_json::{Map, Value};

use crate::types::{
    CheckStatus, ChecksumCheck, DuplicateKeys, IntegrityReport, OrphanCheck, RowCountCheck,
    SealedSample,
};

/// Compare an export with the database it was loaded into.
///
/// Every catalog table is checked; a collection missing from the export
/// counts as empty.
pub fn check_integrity(
    doc: &ExportDocument,
    store: &dyn RegistrarStore,
    limits: &LimitsConfig,
) -> Result<IntegrityReport, RegistrarError> {
    let mut report = IntegrityReport {
        version: env!("CARGO_PKG_VERSION").into(),
        command: "check".into(),
        revision: store.revision().to_string(),
        row_counts: Vec::new(),
        checksums: Vec::new(),
        export_duplicates: Vec::new(),
        database_duplicates: Vec::new(),
        orphans: Vec::new(),
        sealed_samples: Vec::new(),
    };

    for table in TABLES {
        let export_rows = doc.rows(table.name);
        let export_count = doc.collection(table.name).map_or(0, |c| c.len()) as u64;
        let db_count = store.row_count(table)?;
        report.row_counts.push(RowCountCheck {
            table: table.name.to_string(),
            export: export_count,
            database: db_count,
            status: CheckStatus::from_eq(export_count == db_count),
        });

        let export_keys: Vec<Vec<String>> =
            export_rows.iter().map(|row| row_key(table, row)).collect();
        let export_sum = checksum_keys(export_keys.iter().cloned());
        let db_sum = checksum_keys(store.primary_keys(table)?);
        report.checksums.push(ChecksumCheck {
            table: table.name.to_string(),
            status: CheckStatus::from_eq(export_sum == db_sum),
            export: export_sum,
            database: db_sum,
        });

        report.export_duplicates.push(DuplicateKeys {
            table: table.name.to_string(),
            duplicates: duplicate_keys(&export_keys, limits.anomaly),
        });
        report.database_duplicates.push(DuplicateKeys {
            table: table.name.to_string(),
            duplicates: store.duplicate_keys(table, limits.anomaly)?,
        });

        for fk in table.foreign_keys {
            report.orphans.push(OrphanCheck {
                table: table.name.to_string(),
                columns: fk.columns.iter().map(|c| c.to_string()).collect(),
                parent: fk.parent.to_string(),
                parent_columns: fk.parent_columns.iter().map(|c| c.to_string()).collect(),
                orphans: store.orphans(table, fk, limits.anomaly)?,
            });
        }

        if store.revision() == SchemaRevision::Sealed && !table.sealed.is_empty() {
            report
                .sealed_samples
                .extend(sealed_samples(table, export_rows, store, limits.sample)?);
        }
    }

    if !report.is_clean() {
        tracing::warn!(issues = report.issue_count(), "integrity check found issues");
    }
    Ok(report)
}

/// Normalized primary-key tuple of an export row.
fn row_key(table: &TableDef, row: &Map<String, Value>) -> Vec<String> {
    table
        .primary_key
        .iter()
        .map(|col| key_text(row.get(*col)))
        .collect()
}

/// Key tuples seen more than once, sorted, at most `limit`.
fn duplicate_keys(keys: &[Vec<String>], limit: usize) -> Vec<KeyCount> {
    let mut counts: HashMap<&[String], u64> = HashMap::new();
    for key in keys {
        *counts.entry(key.as_slice()).or_default() += 1;
    }
    let mut dups: Vec<KeyCount> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, count)| KeyCount { key: key.to_vec(), count })
        .collect();
    dups.sort_by(|a, b| a.key.cmp(&b.key));
    dups.truncate(limit);
    dups
}

/// Stored form of each sealed column for the first `limit` export rows,
/// ordered by key.
fn sealed_samples(
    table: &TableDef,
    rows: Vec<&Map<String, Value>>,
    store: &dyn RegistrarStore,
    limit: usize,
) -> Result<Vec<SealedSample>, RegistrarError> {
    let mut keys: Vec<Vec<String>> = rows.iter().map(|row| row_key(table, row)).collect();
    keys.sort();
    keys.dedup();
    keys.truncate(limit);

    let mut samples = Vec::new();
    for key in keys {
        for column in table.sealed {
            let cell = store.sealed_cell(table, &key, column)?;
            samples.push(SealedSample {
                table: table.name.to_string(),
                key: key.clone(),
                column: column.to_string(),
                found: cell.is_some(),
                ciphertext_len: cell
                    .as_ref()
                    .and_then(|c| c.ciphertext.as_ref())
                    .map(Vec::len),
                iv_hex: cell.as_ref().and_then(|c| c.iv.as_deref()).map(hex::encode),
            });
        }
    }
    Ok(samples)
}

#[cfg(test)]
#[path = "integrity_tests.rs"]
mod tests;
