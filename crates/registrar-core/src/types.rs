use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of the `takes` table: a student enrolled in a course section.
///
/// Field names on the wire follow the export (`ID`, `sec_id`). Identifier
/// fields accept JSON strings or numbers; numbers keep their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    #[serde(rename = "ID", deserialize_with = "text")]
    pub student_id: String,
    #[serde(deserialize_with = "text")]
    pub course_id: String,
    #[serde(
        rename = "sec_id",
        default,
        deserialize_with = "opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_id: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default, deserialize_with = "opt_year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl EnrollmentRecord {
    pub fn new(student_id: &str, course_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            section_id: None,
            semester: None,
            year: None,
            grade: None,
        }
    }
}

/// An `(i_ID, s_ID)` row of the `advisor` table, normalized for comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AdvisorPair {
    pub instructor_id: String,
    pub student_id: String,
}

impl AdvisorPair {
    pub fn new(instructor_id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            instructor_id: instructor_id.into(),
            student_id: student_id.into(),
        }
    }
}

impl std::fmt::Display for AdvisorPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.instructor_id, self.student_id)
    }
}

/// A primary-key tuple seen more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: Vec<String>,
    pub count: u64,
}

/// Rows inserted into one table by a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLoad {
    pub table: String,
    pub rows: u64,
}

/// Outcome of importing an export into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub revision: String,
    pub foreign_keys_enforced: bool,
    pub tables: Vec<TableLoad>,
}

impl LoadSummary {
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Render a JSON scalar as text. Numbers keep their JSON spelling;
/// `null`, arrays and objects have no scalar text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Normalize a key value for comparison: missing and null become the
/// empty string, text is trimmed, booleans are spelled the way SQLite
/// stores them (`1`/`0`).
pub fn key_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Bool(b)) => (*b as u8).to_string(),
        Some(other) => scalar_text(other)
            .unwrap_or_else(|| other.to_string())
            .trim()
            .to_string(),
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a string or number, found {}", value))
    })
}

fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        other => scalar_text(&other).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a string or number, found {}", other))
        }),
    }
}

fn opt_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid year: {}", value)))
}

/// Errors raised while loading, storing, or auditing registrar data.
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed export: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Export has no '{0}' collection")]
    MissingCollection(String),

    #[error("Export field '{0}' is not an array of records")]
    NotACollection(String),

    #[error("Invalid record {index} in '{collection}': {reason}")]
    InvalidRecord {
        collection: String,
        index: usize,
        reason: String,
    },

    #[error(
        "Record {index} in 'takes' has 's_ID' but no 'ID'; \
         the student identifier field is ambiguous"
    )]
    AmbiguousStudentField { index: usize },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Database uses the {stored} schema revision, {requested} was requested")]
    RevisionMismatch { stored: String, requested: String },

    #[error("The sealed schema revision requires a column cipher")]
    CipherRequired,

    #[error("Cipher error on {column}: {reason}")]
    Cipher { column: String, reason: String },

    #[error("Row {index} of '{table}' rejected: {reason}")]
    RowRejected {
        table: String,
        index: usize,
        reason: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for RegistrarError {
    fn from(e: rusqlite::Error) -> Self {
        RegistrarError::Database(e.to_string())
    }
}
