//! Output formatters for registrar command results.
//!
//! Provides two output modes:
//! - **Human** (default): Plain text reports for terminal users
//! - **JSON** (`--json`): Machine-readable structured output

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use registrar_audit::types::{
    IntegrityReport, LoadResult, ProfileReport, ReconcileReport, ScanResult, SchemaResult,
};

pub trait OutputFormatter {
    fn format_scan(&self, result: &ScanResult) -> String;
    fn format_schema(&self, result: &SchemaResult) -> String;
    fn format_load(&self, result: &LoadResult) -> String;
    fn format_integrity(&self, report: &IntegrityReport) -> String;
    fn format_profile(&self, report: &ProfileReport) -> String;
    fn format_reconcile(&self, report: &ReconcileReport) -> String;
}
