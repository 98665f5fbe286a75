//! Loading of registrar JSON exports.
//!
//! An export is one JSON object whose fields are collections named after
//! tables (`{"student": [...], "takes": [...], ...}`). A bare top-level
//! array is accepted as a single collection named `root`.

use std::path::Path;

use serde_json::{Map, Value};

use crate::types::{EnrollmentRecord, RegistrarError};

/// Collection name used for a top-level array.
pub const ROOT_COLLECTION: &str = "root";

/// Collections recognised in an export, in profiling order.
pub const KNOWN_COLLECTIONS: &[&str] = &[
    "time_slot", "classroom", "department", "course", "instructor", "section",
    "teaches", "student", "takes", "advisor", "prereq",
];

/// A parsed export held in memory.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    root: Value,
}

impl ExportDocument {
    pub fn from_value(root: Value) -> Result<Self, RegistrarError> {
        match root {
            Value::Object(_) | Value::Array(_) => Ok(Self { root }),
            other => Err(RegistrarError::NotACollection(format!(
                "top-level {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn parse(content: &str) -> Result<Self, RegistrarError> {
        Self::from_value(serde_json::from_str(content)?)
    }

    /// The named collection, or `None` when absent or not an array.
    pub fn collection(&self, name: &str) -> Option<&[Value]> {
        match &self.root {
            Value::Object(map) => map.get(name).and_then(Value::as_array).map(Vec::as_slice),
            Value::Array(items) if name == ROOT_COLLECTION => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Object rows of a collection; non-object entries are skipped.
    pub fn rows(&self, name: &str) -> Vec<&Map<String, Value>> {
        self.collection(name)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    /// Known collections present in the export, in [`KNOWN_COLLECTIONS`] order.
    pub fn known_collections(&self) -> Vec<(&'static str, &[Value])> {
        match &self.root {
            Value::Array(items) => vec![(ROOT_COLLECTION, items.as_slice())],
            _ => KNOWN_COLLECTIONS
                .iter()
                .filter_map(|name| self.collection(name).map(|rows| (*name, rows)))
                .collect(),
        }
    }

    /// Parse the `takes` collection into enrollment records.
    ///
    /// Fails fast: a missing or non-array `takes`, a non-object row, or a
    /// row that does not fit [`EnrollmentRecord`] aborts the whole parse.
    /// A row carrying `s_ID` without `ID` is rejected rather than guessed at.
    pub fn enrollments(&self) -> Result<Vec<EnrollmentRecord>, RegistrarError> {
        let items = match &self.root {
            Value::Object(map) => match map.get("takes") {
                None => return Err(RegistrarError::MissingCollection("takes".into())),
                Some(Value::Array(items)) => items,
                Some(_) => return Err(RegistrarError::NotACollection("takes".into())),
            },
            Value::Array(_) => return Err(RegistrarError::MissingCollection("takes".into())),
            _ => return Err(RegistrarError::NotACollection("takes".into())),
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let row = item.as_object().ok_or_else(|| RegistrarError::InvalidRecord {
                collection: "takes".into(),
                index,
                reason: format!("expected an object, found {}", json_kind(item)),
            })?;
            let has_alt_id = row.keys().any(|k| k.eq_ignore_ascii_case("s_id"));
            if has_alt_id {
                if !row.contains_key("ID") {
                    return Err(RegistrarError::AmbiguousStudentField { index });
                }
                tracing::warn!(
                    index,
                    "takes record carries both 'ID' and 's_ID'; matching on 'ID'"
                );
            }
            let record = serde_json::from_value::<EnrollmentRecord>(item.clone()).map_err(|e| {
                RegistrarError::InvalidRecord {
                    collection: "takes".into(),
                    index,
                    reason: e.to_string(),
                }
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Read and parse an export file.
pub fn load_document(path: &Path) -> Result<ExportDocument, RegistrarError> {
    let content = std::fs::read_to_string(path).map_err(|source| RegistrarError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let doc = ExportDocument::parse(&content)?;
    tracing::debug!(path = %path.display(), "export loaded");
    Ok(doc)
}

/// Read an export and parse its enrollment records.
pub fn load_enrollments(path: &Path) -> Result<Vec<EnrollmentRecord>, RegistrarError> {
    load_document(path)?.enrollments()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
