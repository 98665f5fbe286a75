//! Shape profiling of an export: field types, a guessed relational column
//! type per field, a candidate primary key, and the child tables nested
//! values would need.

use std::collections::{BTreeMap, BTreeSet};

use registrar_core::export::ExportDocument;
use serde_json::{Map, Value};

use crate::types::{CandidateKey, ChildTable, FieldProfile, ProfileReport, TableProfile, TypeCount};

/// Key names tried first, in order, before `<table>_id` and `<table>Id`.
const PREFERRED_KEYS: &[&str] = &["id", "ID", "_id", "s_ID"];

const KINDS: &[&str] = &["null", "bool", "int", "float", "str", "array", "object"];

/// Profile every known collection of the export (or the root array).
pub fn profile_document(doc: &ExportDocument) -> ProfileReport {
    let tables = doc
        .known_collections()
        .into_iter()
        .map(|(name, items)| profile_table(&normalize_name(name), items))
        .collect();
    ProfileReport {
        version: env!("CARGO_PKG_VERSION").into(),
        command: "profile".into(),
        tables,
    }
}

pub fn profile_table(name: &str, items: &[Value]) -> TableProfile {
    let records: Vec<&Map<String, Value>> = items.iter().filter_map(Value::as_object).collect();
    let mut fields: BTreeMap<String, FieldStats> = BTreeMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut children: Vec<ChildTable> = Vec::new();

    for record in &records {
        for (key, value) in record.iter() {
            let field = normalize_name(key);
            if !fields.contains_key(&field) {
                order.push(field.clone());
            }
            fields.entry(field.clone()).or_default().observe(value);

            let child = match value {
                Value::Array(_) => Some((format!("{name}_{field}_items"), "array")),
                Value::Object(_) => Some((format!("{name}_{field}"), "object")),
                _ => None,
            };
            if let Some((child_name, kind)) = child {
                if !children.iter().any(|c| c.name == child_name) {
                    children.push(ChildTable {
                        name: child_name,
                        field: field.clone(),
                        kind: kind.into(),
                    });
                }
            }
        }
    }

    let fields = order
        .into_iter()
        .filter_map(|field| fields.remove(&field).map(|stats| stats.into_profile(field)))
        .collect();

    TableProfile {
        table: name.to_string(),
        records: items.len() as u64,
        fields,
        primary_key: candidate_key(&records, name),
        children,
    }
}

/// Trim and replace spaces and dashes with underscores.
pub fn normalize_name(name: &str) -> String {
    name.trim().replace([' ', '-'], "_")
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Default)]
struct FieldStats {
    types: BTreeMap<&'static str, u64>,
    nulls: u64,
    max_len: usize,
    has_array: bool,
    has_object: bool,
}

impl FieldStats {
    fn observe(&mut self, value: &Value) {
        let kind = kind_of(value);
        *self.types.entry(kind).or_default() += 1;
        match value {
            Value::Null => self.nulls += 1,
            Value::String(s) => self.max_len = self.max_len.max(s.chars().count()),
            Value::Array(_) => self.has_array = true,
            Value::Object(_) => self.has_object = true,
            _ => {}
        }
    }

    /// Dominant scalar kind, ignoring nulls and nested values. Ties go to
    /// bool, then int, float, str.
    fn dominant_scalar(&self) -> Option<&'static str> {
        let mut best: Option<(&'static str, u64)> = None;
        for kind in ["bool", "int", "float", "str"] {
            let count = self.types.get(kind).copied().unwrap_or(0);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((kind, count));
            }
        }
        best.map(|(kind, _)| kind)
    }

    fn column_type(&self) -> String {
        match self.dominant_scalar() {
            None => "JSON".into(),
            Some("bool") => "TINYINT(1)".into(),
            Some("int") => "BIGINT".into(),
            Some("float") => "DOUBLE".into(),
            Some(_) => {
                let len = self.max_len.max(1);
                if len <= 255 {
                    format!("VARCHAR({})", len.max(8))
                } else if len <= 4000 {
                    "TEXT".into()
                } else {
                    "LONGTEXT".into()
                }
            }
        }
    }

    fn into_profile(self, name: String) -> FieldProfile {
        let column_type = self.column_type();
        let types = KINDS
            .iter()
            .filter_map(|kind| {
                self.types.get(kind).map(|&count| TypeCount {
                    kind: kind.to_string(),
                    count,
                })
            })
            .collect();
        FieldProfile {
            name,
            types,
            nulls: self.nulls,
            max_len: self.max_len,
            has_array: self.has_array,
            has_object: self.has_object,
            column_type,
        }
    }
}

/// Present and non-null in every record, with no repeated value.
fn is_unique(records: &[&Map<String, Value>], field: &str) -> bool {
    let mut seen = BTreeSet::new();
    records.iter().all(|r| match r.get(field) {
        None | Some(Value::Null) => false,
        Some(v) => seen.insert(v.to_string()),
    })
}

fn candidate_key(records: &[&Map<String, Value>], table: &str) -> CandidateKey {
    let named = [format!("{table}_id"), format!("{table}Id")];
    let preferred = PREFERRED_KEYS
        .iter()
        .copied()
        .chain(named.iter().map(String::as_str));
    for field in preferred {
        if records.iter().any(|r| r.contains_key(field)) && is_unique(records, field) {
            return CandidateKey { field: normalize_name(field), surrogate: false };
        }
    }

    let all_fields: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.keys().map(String::as_str))
        .collect();
    if let Some(field) = all_fields.into_iter().find(|f| is_unique(records, f)) {
        return CandidateKey { field: normalize_name(field), surrogate: false };
    }

    CandidateKey { field: format!("{table}_pk"), surrogate: true }
}
