use std::collections::BTreeSet;

use crate::cipher::ColumnCipher;
use crate::schema::{ForeignKeyDef, SchemaRevision, TableDef};
use crate::types::{AdvisorPair, EnrollmentRecord, KeyCount, RegistrarError};

/// Raw ciphertext/IV cells of one sealed column in one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedCell {
    pub ciphertext: Option<Vec<u8>>,
    pub iv: Option<Vec<u8>>,
}

/// Read access to a registrar database, as consumed by the audit crate.
///
/// Key values are returned normalized (see [`crate::types::key_text`]) so
/// they compare directly with keys taken from an export.
pub trait RegistrarStore {
    /// Column layout of this database.
    fn revision(&self) -> SchemaRevision;

    /// Number of rows in a table.
    fn row_count(&self, table: &TableDef) -> Result<u64, RegistrarError>;

    /// Every primary-key tuple of a table, unordered.
    fn primary_keys(&self, table: &TableDef) -> Result<Vec<Vec<String>>, RegistrarError>;

    /// Primary-key tuples occurring more than once, at most `limit`.
    fn duplicate_keys(&self, table: &TableDef, limit: usize)
        -> Result<Vec<KeyCount>, RegistrarError>;

    /// Child key tuples of `fk` with no matching parent row, at most `limit`.
    fn orphans(
        &self,
        table: &TableDef,
        fk: &ForeignKeyDef,
        limit: usize,
    ) -> Result<Vec<Vec<String>>, RegistrarError>;

    /// All `(i_ID, s_ID)` pairs of the advisor table.
    fn advisor_pairs(&self) -> Result<BTreeSet<AdvisorPair>, RegistrarError>;

    /// The `takes` table as enrollment records, ordered by key. Sealed
    /// grades are opened with `cipher` when given and left empty otherwise.
    fn enrollments(
        &self,
        cipher: Option<&dyn ColumnCipher>,
    ) -> Result<Vec<EnrollmentRecord>, RegistrarError>;

    /// The sealed cells of `column` in the row with primary key `key`,
    /// or `None` when no such row exists.
    fn sealed_cell(
        &self,
        table: &TableDef,
        key: &[String],
        column: &str,
    ) -> Result<Option<SealedCell>, RegistrarError>;
}
