use crate::OutputFormatter;
use registrar_audit::types::{
    IntegrityReport, LoadResult, ProfileReport, ReconcileReport, ScanResult, SchemaResult,
};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_scan(&self, result: &ScanResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_schema(&self, result: &SchemaResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_load(&self, result: &LoadResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_integrity(&self, report: &IntegrityReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
    fn format_profile(&self, report: &ProfileReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
    fn format_reconcile(&self, report: &ReconcileReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
}
