use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::schema::{self, SchemaRevision, TableDef};
use crate::types::RegistrarError;

const SCHEMA_VERSION: u32 = 1;

/// SQLite-backed implementation of the RegistrarStore trait.
pub struct SqliteRegistrarStore {
    pub(crate) conn: Connection,
    pub(crate) revision: SchemaRevision,
}

impl SqliteRegistrarStore {
    /// Open or create a registrar database at the given path.
    ///
    /// An existing database must use the requested revision.
    pub fn open(path: &Path, revision: SchemaRevision) -> Result<Self, RegistrarError> {
        let conn = Connection::open(path)?;
        Self::set_performance_pragmas(&conn)?;
        let store = SqliteRegistrarStore { conn, revision };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a database created earlier, adopting its stored revision.
    /// Fails rather than creating a new file.
    pub fn open_existing(path: &Path) -> Result<Self, RegistrarError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| RegistrarError::Io {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
        })?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM registrar_meta WHERE key = 'schema_revision'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|_| {
                RegistrarError::Internal(format!("{} is not a registrar database", path.display()))
            })?;
        let revision = value
            .as_deref()
            .and_then(SchemaRevision::parse)
            .unwrap_or(SchemaRevision::Plaintext);
        Self::set_performance_pragmas(&conn)?;
        let store = SqliteRegistrarStore { conn, revision };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory registrar database (for testing).
    pub fn in_memory(revision: SchemaRevision) -> Result<Self, RegistrarError> {
        let conn = Connection::open_in_memory()?;
        Self::set_performance_pragmas(&conn)?;
        let store = SqliteRegistrarStore { conn, revision };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Apply SQLite performance pragmas for faster reads and writes.
    fn set_performance_pragmas(conn: &Connection) -> Result<(), RegistrarError> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA cache_size = -8000;
            PRAGMA temp_store = MEMORY;
            PRAGMA foreign_keys = ON;
            ",
        )?;
        Ok(())
    }

    /// Toggle foreign key enforcement. Has no effect inside a transaction.
    /// Returns the actual FK state after the change (for verification).
    pub fn set_foreign_keys(&self, enabled: bool) -> Result<bool, RegistrarError> {
        let val = if enabled { "ON" } else { "OFF" };
        self.conn
            .execute_batch(&format!("PRAGMA foreign_keys = {};", val))?;
        let actual: i32 = self
            .conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))?;
        Ok(actual != 0)
    }

    fn initialize_schema(&self) -> Result<(), RegistrarError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS registrar_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        // New databases take the requested revision; existing ones keep theirs.
        self.conn.execute(
            "INSERT OR IGNORE INTO registrar_meta (key, value) VALUES ('schema_version', ?1)",
            params![SCHEMA_VERSION.to_string()],
        )?;
        self.conn.execute(
            "INSERT OR IGNORE INTO registrar_meta (key, value) VALUES ('schema_revision', ?1)",
            params![self.revision.as_str()],
        )?;
        let stored = self.stored_revision()?;
        if stored != self.revision {
            return Err(RegistrarError::RevisionMismatch {
                stored: stored.to_string(),
                requested: self.revision.to_string(),
            });
        }

        let version = self.schema_version()?;
        if version > SCHEMA_VERSION {
            return Err(RegistrarError::Internal(format!(
                "database schema v{} is newer than supported v{}",
                version, SCHEMA_VERSION
            )));
        }

        self.conn.execute_batch(&schema::ddl(self.revision)?)?;
        Ok(())
    }

    fn stored_revision(&self) -> Result<SchemaRevision, RegistrarError> {
        let value: String = self.conn.query_row(
            "SELECT value FROM registrar_meta WHERE key = 'schema_revision'",
            [],
            |row| row.get(0),
        )?;
        SchemaRevision::parse(&value)
            .ok_or_else(|| RegistrarError::Internal(format!("Invalid schema revision: {}", value)))
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<u32, RegistrarError> {
        let version: String = self.conn.query_row(
            "SELECT value FROM registrar_meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        version
            .parse()
            .map_err(|e| RegistrarError::Internal(format!("Invalid schema version: {}", e)))
    }

    /// Delete every row of every registrar table, children first.
    /// Preserves schema and metadata.
    pub fn clear_all(&mut self) -> Result<(), RegistrarError> {
        let order = schema::load_order()?;
        let tx = self.conn.transaction()?;
        delete_rows(&tx, &order)?;
        tx.commit()?;
        Ok(())
    }
}

/// Delete all rows of `order`'s tables, last table first.
pub(crate) fn delete_rows(
    conn: &Connection,
    order: &[&'static TableDef],
) -> Result<(), RegistrarError> {
    for table in order.iter().rev() {
        conn.execute(&format!("DELETE FROM {}", table.name), [])?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
