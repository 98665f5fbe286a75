use registrar_core::types::AdvisorPair;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub version: String,
    pub command: String,
    pub export_pairs: usize,
    pub database_pairs: usize,
    pub common: usize,
    pub export_only: Vec<AdvisorPair>,
    pub database_only: Vec<AdvisorPair>,
}

impl ReconcileReport {
    pub fn matches(&self) -> bool {
        self.export_only.is_empty() && self.database_only.is_empty()
    }
}
