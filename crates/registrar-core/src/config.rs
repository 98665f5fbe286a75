//! Configuration file loading for registrar.
//!
//! Reads `.registrar/registrar.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level registrar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarConfig {
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub aliases: AliasConfig,
}

/// Defaults for `registrar scan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub student_id: Option<String>,
}

/// Output and anomaly caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Mismatched rows printed per list in human output.
    #[serde(default = "default_print_limit")]
    pub print: usize,
    /// Duplicate keys or orphans reported per table or relationship.
    #[serde(default = "default_anomaly_limit")]
    pub anomaly: usize,
    /// Export rows sampled per sealed table.
    #[serde(default = "default_sample_limit")]
    pub sample: usize,
}

/// Field-name aliases tried, in order, when reading advisor rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasConfig {
    #[serde(default = "default_instructor_aliases")]
    pub instructor: Vec<String>,
    #[serde(default = "default_student_aliases")]
    pub student: Vec<String>,
}

fn default_export_path() -> PathBuf {
    PathBuf::from("app.json")
}
fn default_database_path() -> PathBuf {
    PathBuf::from(".registrar").join("registrar.db")
}
fn default_print_limit() -> usize {
    25
}
fn default_anomaly_limit() -> usize {
    20
}
fn default_sample_limit() -> usize {
    10
}
fn default_instructor_aliases() -> Vec<String> {
    ["i_id", "i_ID", "I_ID", "instructor_id", "instructorId"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_student_aliases() -> Vec<String> {
    ["s_id", "s_ID", "S_ID", "student_id", "studentId"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            print: default_print_limit(),
            anomaly: default_anomaly_limit(),
            sample: default_sample_limit(),
        }
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            instructor: default_instructor_aliases(),
            student: default_student_aliases(),
        }
    }
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            database_path: default_database_path(),
            scan: ScanConfig::default(),
            limits: LimitsConfig::default(),
            aliases: AliasConfig::default(),
        }
    }
}

impl RegistrarConfig {
    /// Load configuration from `registrar.json` inside the given directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join("registrar.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }
}
