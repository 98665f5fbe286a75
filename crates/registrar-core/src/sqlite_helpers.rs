use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, Connection};
use serde_json::Value;

use crate::cipher::associated_data;
use crate::schema::TableDef;
use crate::types::RegistrarError;

/// `?1, ?2, ..., ?n`
pub(crate) fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bind a JSON value. Nested arrays and objects are stored as JSON text.
pub(crate) fn json_to_sql(value: Option<&Value>) -> SqlValue {
    match value {
        None | Some(Value::Null) => SqlValue::Null,
        Some(Value::Bool(b)) => SqlValue::Integer(*b as i64),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Integer(i)
            } else {
                SqlValue::Real(n.as_f64().unwrap_or_default())
            }
        }
        Some(Value::String(s)) => SqlValue::Text(s.clone()),
        Some(nested) => SqlValue::Text(nested.to_string()),
    }
}

/// Render a stored value as text, spelling reals the way JSON does.
pub(crate) fn sql_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(
            serde_json::Number::from_f64(f)
                .map(|n| n.to_string())
                .unwrap_or_else(|| f.to_string()),
        ),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Some(hex::encode(b)),
    }
}

/// Normalized key text, matching [`crate::types::key_text`] for exports.
pub(crate) fn sql_key_text(value: ValueRef<'_>) -> String {
    sql_text(value)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Year column that may hold an integer or numeric text.
pub(crate) fn sql_year(value: ValueRef<'_>) -> Option<i32> {
    match value {
        ValueRef::Integer(i) => i32::try_from(i).ok(),
        ValueRef::Text(t) => std::str::from_utf8(t).ok()?.trim().parse().ok(),
        _ => None,
    }
}

/// Associated data built from stored aad column values, as
/// [`associated_data`] expects them.
pub(crate) fn aad_from_values<'a>(values: impl IntoIterator<Item = ValueRef<'a>>) -> Vec<u8> {
    let parts: Vec<String> = values
        .into_iter()
        .map(|v| sql_text(v).unwrap_or_default())
        .collect();
    associated_data(&parts)
}

/// Associated data of the stored row at `rowid`.
pub(crate) fn stored_associated_data(
    conn: &Connection,
    table: &TableDef,
    rowid: i64,
) -> Result<Vec<u8>, RegistrarError> {
    if table.aad.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("SELECT {} FROM {} WHERE rowid = ?1", table.aad.join(", "), table.name);
    let aad = conn.query_row(&sql, params![rowid], |row| {
        (0..table.aad.len())
            .map(|i| row.get_ref(i))
            .collect::<rusqlite::Result<Vec<_>>>()
            .map(aad_from_values)
    })?;
    Ok(aad)
}

pub(crate) fn sql_blob(value: ValueRef<'_>) -> Option<Vec<u8>> {
    match value {
        ValueRef::Blob(b) => Some(b.to_vec()),
        ValueRef::Text(t) => Some(t.to_vec()),
        _ => None,
    }
}
