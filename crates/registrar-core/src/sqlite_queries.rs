use std::collections::BTreeSet;

use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::cipher::{ColumnCipher, ColumnRef, SealedValue};
use crate::schema::{self, ForeignKeyDef, SchemaRevision, TableDef};
use crate::sqlite::SqliteRegistrarStore;
use crate::sqlite_helpers::{aad_from_values, sql_blob, sql_key_text, sql_text, sql_year};
use crate::store::{RegistrarStore, SealedCell};
use crate::types::{AdvisorPair, EnrollmentRecord, KeyCount, RegistrarError};

impl RegistrarStore for SqliteRegistrarStore {
    fn revision(&self) -> SchemaRevision {
        self.revision
    }

    fn row_count(&self, table: &TableDef) -> Result<u64, RegistrarError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(1) FROM {}", table.name),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn primary_keys(&self, table: &TableDef) -> Result<Vec<Vec<String>>, RegistrarError> {
        let width = table.primary_key.len();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {}",
            table.primary_key.join(", "),
            table.name
        ))?;
        let keys = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(sql_key_text))
                    .collect::<rusqlite::Result<Vec<String>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(keys)
    }

    fn duplicate_keys(
        &self,
        table: &TableDef,
        limit: usize,
    ) -> Result<Vec<KeyCount>, RegistrarError> {
        let width = table.primary_key.len();
        let cols = table.primary_key.join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {cols}, COUNT(*) AS c FROM {} GROUP BY {cols} HAVING c > 1 \
             ORDER BY {cols} LIMIT ?1",
            table.name
        ))?;
        let dups = stmt
            .query_map(params![limit as i64], |row| {
                let key = (0..width)
                    .map(|i| row.get_ref(i).map(sql_key_text))
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                let count: i64 = row.get(width)?;
                Ok(KeyCount { key, count: count as u64 })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(dups)
    }

    fn orphans(
        &self,
        table: &TableDef,
        fk: &ForeignKeyDef,
        limit: usize,
    ) -> Result<Vec<Vec<String>>, RegistrarError> {
        let parent = schema::require_table(fk.parent)?;
        let width = fk.columns.len();
        let select = fk
            .columns
            .iter()
            .map(|c| format!("C.{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        let on = fk
            .columns
            .iter()
            .zip(fk.parent_columns)
            .map(|(c, p)| format!("C.{} = P.{}", c, p))
            .collect::<Vec<_>>()
            .join(" AND ");
        // SQL foreign keys ignore rows with any NULL child column.
        let present = fk
            .columns
            .iter()
            .map(|c| format!("C.{} IS NOT NULL", c))
            .collect::<Vec<_>>()
            .join(" AND ");
        let sql = format!(
            "SELECT {select} FROM {} C LEFT JOIN {} P ON {on} \
             WHERE {present} AND P.{} IS NULL ORDER BY {select} LIMIT ?1",
            table.name, parent.name, fk.parent_columns[0]
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let orphans = stmt
            .query_map(params![limit as i64], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(sql_key_text))
                    .collect::<rusqlite::Result<Vec<String>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(orphans)
    }

    fn advisor_pairs(&self) -> Result<BTreeSet<AdvisorPair>, RegistrarError> {
        let mut stmt = self.conn.prepare("SELECT i_ID, s_ID FROM advisor")?;
        let pairs = stmt
            .query_map([], |row| {
                Ok(AdvisorPair::new(
                    sql_key_text(row.get_ref(0)?),
                    sql_key_text(row.get_ref(1)?),
                ))
            })?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(pairs)
    }

    fn enrollments(
        &self,
        cipher: Option<&dyn ColumnCipher>,
    ) -> Result<Vec<EnrollmentRecord>, RegistrarError> {
        let sealed = self.revision == SchemaRevision::Sealed;
        let grade_cols = if sealed { "grade_ct, grade_iv" } else { "grade" };
        // The first five columns are the aad columns of `takes`.
        let mut stmt = self.conn.prepare(&format!(
            "SELECT ID, course_id, sec_id, semester, year, {} FROM takes \
             ORDER BY ID, course_id, sec_id",
            grade_cols
        ))?;
        let rows = stmt
            .query_map([], |row| {
                let record = EnrollmentRecord {
                    student_id: sql_text(row.get_ref(0)?).unwrap_or_default(),
                    course_id: sql_text(row.get_ref(1)?).unwrap_or_default(),
                    section_id: sql_text(row.get_ref(2)?),
                    semester: sql_text(row.get_ref(3)?),
                    year: sql_year(row.get_ref(4)?),
                    grade: if sealed { None } else { sql_text(row.get_ref(5)?) },
                };
                let grade_cell = if sealed {
                    match (sql_blob(row.get_ref(5)?), sql_blob(row.get_ref(6)?)) {
                        (Some(ciphertext), Some(iv)) => {
                            let stored = (0..5)
                                .map(|i| row.get_ref(i))
                                .collect::<rusqlite::Result<Vec<_>>>()?;
                            Some((SealedValue { ciphertext, iv }, aad_from_values(stored)))
                        }
                        _ => None,
                    }
                } else {
                    None
                };
                Ok((record, grade_cell))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let Some(cipher) = cipher.filter(|_| sealed) else {
            return Ok(rows.into_iter().map(|(record, _)| record).collect());
        };

        let column = ColumnRef::new("takes", "grade");
        let mut records = Vec::with_capacity(rows.len());
        for (mut record, cell) in rows {
            if let Some((cell, aad)) = cell {
                let plain = cipher.open(column, &cell, &aad)?;
                let grade = String::from_utf8(plain).map_err(|e| RegistrarError::Cipher {
                    column: column.to_string(),
                    reason: e.to_string(),
                })?;
                record.grade = Some(grade).filter(|g| !g.is_empty());
            }
            records.push(record);
        }
        Ok(records)
    }

    fn sealed_cell(
        &self,
        table: &TableDef,
        key: &[String],
        column: &str,
    ) -> Result<Option<SealedCell>, RegistrarError> {
        if self.revision != SchemaRevision::Sealed || !table.is_sealed(column) {
            return Err(RegistrarError::Internal(format!(
                "{}.{} is not a sealed column of this database",
                table.name, column
            )));
        }
        let filter = table
            .primary_key
            .iter()
            .enumerate()
            .map(|(i, k)| format!("{} = ?{}", k, i + 1))
            .collect::<Vec<_>>()
            .join(" AND ");
        let sql = format!(
            "SELECT {column}_ct, {column}_iv FROM {} WHERE {filter} LIMIT 1",
            table.name
        );
        let cell = self
            .conn
            .query_row(&sql, params_from_iter(key.iter()), |row| {
                Ok(SealedCell {
                    ciphertext: sql_blob(row.get_ref(0)?),
                    iv: sql_blob(row.get_ref(1)?),
                })
            })
            .optional()?;
        Ok(cell)
    }
}
