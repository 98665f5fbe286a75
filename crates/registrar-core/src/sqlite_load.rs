use std::collections::BTreeSet;

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection};
use serde_json::{Map, Value};

use crate::cipher::{ColumnCipher, ColumnRef};
use crate::export::ExportDocument;
use crate::schema::{self, SchemaRevision, TableDef};
use crate::sqlite::{delete_rows, SqliteRegistrarStore};
use crate::sqlite_helpers::{json_to_sql, placeholders, stored_associated_data};
use crate::types::{scalar_text, LoadSummary, RegistrarError, TableLoad};

/// How an export is imported.
#[derive(Clone, Copy, Default)]
pub struct LoadOptions<'a> {
    /// Reject rows whose parent is missing instead of importing them.
    pub enforce_foreign_keys: bool,
    /// Required by the sealed revision.
    pub cipher: Option<&'a dyn ColumnCipher>,
    /// Delete existing rows inside the load transaction, so a rejected
    /// row leaves the previous contents in place.
    pub replace: bool,
}

impl SqliteRegistrarStore {
    /// Import every catalog collection present in `doc`, parents first,
    /// in a single transaction. Any rejected row rolls back the whole load.
    pub fn load_export(
        &mut self,
        doc: &ExportDocument,
        options: LoadOptions<'_>,
    ) -> Result<LoadSummary, RegistrarError> {
        if self.revision == SchemaRevision::Sealed && options.cipher.is_none() {
            return Err(RegistrarError::CipherRequired);
        }
        let order = schema::load_order()?;

        // PRAGMA foreign_keys is a no-op inside a transaction, so set it first.
        self.set_foreign_keys(options.enforce_foreign_keys)?;
        let result = self.insert_tables(doc, &order, options);
        self.set_foreign_keys(true)?;

        Ok(LoadSummary {
            revision: self.revision.to_string(),
            foreign_keys_enforced: options.enforce_foreign_keys,
            tables: result?,
        })
    }

    fn insert_tables(
        &mut self,
        doc: &ExportDocument,
        order: &[&'static TableDef],
        options: LoadOptions<'_>,
    ) -> Result<Vec<TableLoad>, RegistrarError> {
        let revision = self.revision;
        let cipher = options.cipher;
        let tx = self.conn.transaction()?;
        if options.replace {
            delete_rows(&tx, order)?;
            tracing::info!("existing rows cleared");
        }
        let mut loaded = Vec::with_capacity(order.len());

        for table in order {
            let Some(items) = doc.collection(table.name) else {
                tracing::debug!(table = table.name, "collection absent from export");
                loaded.push(TableLoad { table: table.name.to_string(), rows: 0 });
                continue;
            };

            let columns = table.stored_columns(revision);
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table.name,
                columns.join(", "),
                placeholders(columns.len())
            );
            let mut stmt = tx.prepare(&sql)?;
            let mut unknown: BTreeSet<&str> = BTreeSet::new();

            for (index, item) in items.iter().enumerate() {
                let row = item.as_object().ok_or_else(|| RegistrarError::RowRejected {
                    table: table.name.to_string(),
                    index,
                    reason: "expected an object".into(),
                })?;
                unknown.extend(
                    row.keys()
                        .map(String::as_str)
                        .filter(|k| table.column(k).is_none()),
                );
                let values = row_values(table, row, revision);
                stmt.execute(params_from_iter(values.iter()))
                    .map_err(|e| RegistrarError::RowRejected {
                        table: table.name.to_string(),
                        index,
                        reason: e.to_string(),
                    })?;
                if revision == SchemaRevision::Sealed && !table.sealed.is_empty() {
                    let cipher = cipher.ok_or(RegistrarError::CipherRequired)?;
                    seal_row(&tx, table, tx.last_insert_rowid(), row, cipher)?;
                }
            }

            if !unknown.is_empty() {
                tracing::warn!(
                    table = table.name,
                    columns = ?unknown,
                    "skipped export fields not in schema"
                );
            }
            tracing::info!(table = table.name, rows = items.len(), "table loaded");
            loaded.push(TableLoad {
                table: table.name.to_string(),
                rows: items.len() as u64,
            });
        }

        tx.commit()?;
        Ok(loaded)
    }
}

/// Values for one row, in `stored_columns` order. Sealed columns are
/// inserted empty and filled by [`seal_row`].
fn row_values(table: &TableDef, row: &Map<String, Value>, revision: SchemaRevision) -> Vec<SqlValue> {
    let mut values = Vec::with_capacity(table.columns.len() + table.sealed.len());
    for col in table.columns {
        if revision == SchemaRevision::Sealed && table.is_sealed(col.name) {
            values.push(SqlValue::Null);
            values.push(SqlValue::Null);
        } else {
            values.push(json_to_sql(row.get(col.name)));
        }
    }
    values
}

/// Seal the row just inserted at `rowid`. The associated data is read
/// back from the stored row, so it matches what readers will see after
/// SQLite's type conversions.
fn seal_row(
    conn: &Connection,
    table: &TableDef,
    rowid: i64,
    row: &Map<String, Value>,
    cipher: &dyn ColumnCipher,
) -> Result<(), RegistrarError> {
    let aad = stored_associated_data(conn, table, rowid)?;
    for column in table.sealed {
        let plaintext = row.get(*column).and_then(scalar_text).unwrap_or_default();
        let sealed = cipher.seal(ColumnRef::new(table.name, column), plaintext.as_bytes(), &aad)?;
        conn.execute(
            &format!(
                "UPDATE {} SET {column}_ct = ?1, {column}_iv = ?2 WHERE rowid = ?3",
                table.name
            ),
            params![sealed.ciphertext, sealed.iv, rowid],
        )?;
    }
    Ok(())
}
