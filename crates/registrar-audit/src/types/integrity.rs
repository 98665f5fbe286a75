use registrar_core::types::KeyCount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Mismatch,
}

impl CheckStatus {
    pub fn from_eq(equal: bool) -> Self {
        if equal {
            CheckStatus::Ok
        } else {
            CheckStatus::Mismatch
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Mismatch => "MISMATCH",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowCountCheck {
    pub table: String,
    pub export: u64,
    pub database: u64,
    pub status: CheckStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksumCheck {
    pub table: String,
    pub export: String,
    pub database: String,
    pub status: CheckStatus,
}

/// Primary-key tuples seen more than once in one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateKeys {
    pub table: String,
    pub duplicates: Vec<KeyCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphanCheck {
    pub table: String,
    pub columns: Vec<String>,
    pub parent: String,
    pub parent_columns: Vec<String>,
    pub orphans: Vec<Vec<String>>,
}

/// Stored form of one sealed cell for an export row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedSample {
    pub table: String,
    pub key: Vec<String>,
    pub column: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ciphertext_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iv_hex: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub version: String,
    pub command: String,
    pub revision: String,
    pub row_counts: Vec<RowCountCheck>,
    pub checksums: Vec<ChecksumCheck>,
    pub export_duplicates: Vec<DuplicateKeys>,
    pub database_duplicates: Vec<DuplicateKeys>,
    pub orphans: Vec<OrphanCheck>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sealed_samples: Vec<SealedSample>,
}

impl IntegrityReport {
    /// Number of failed checks. Sealed samples are informational.
    pub fn issue_count(&self) -> usize {
        let mismatched = self
            .row_counts
            .iter()
            .filter(|c| c.status == CheckStatus::Mismatch)
            .count()
            + self
                .checksums
                .iter()
                .filter(|c| c.status == CheckStatus::Mismatch)
                .count();
        let duplicated = self
            .export_duplicates
            .iter()
            .chain(&self.database_duplicates)
            .filter(|d| !d.duplicates.is_empty())
            .count();
        let orphaned = self.orphans.iter().filter(|o| !o.orphans.is_empty()).count();
        mismatched + duplicated + orphaned
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }
}
