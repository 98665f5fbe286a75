//! Column-level encryption capability.
//!
//! The sealed schema revision stores sensitive values as ciphertext plus
//! the IV needed to open them. This crate never encrypts anything itself:
//! callers inject a [`ColumnCipher`] into the store when they load or read
//! sealed data, and the scanner never sees it.

use crate::types::RegistrarError;

/// A sealed column, addressed as `table.column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef<'a> {
    pub table: &'a str,
    pub column: &'a str,
}

impl<'a> ColumnRef<'a> {
    pub fn new(table: &'a str, column: &'a str) -> Self {
        Self { table, column }
    }
}

impl std::fmt::Display for ColumnRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Ciphertext (including any authentication tag) and its IV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedValue {
    pub ciphertext: Vec<u8>,
    pub iv: Vec<u8>,
}

/// Encrypt and decrypt column values. Implementations are keyed by column
/// and must bind `aad` so that a value cannot be moved to another row.
pub trait ColumnCipher {
    fn seal(
        &self,
        column: ColumnRef<'_>,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<SealedValue, RegistrarError>;

    fn open(
        &self,
        column: ColumnRef<'_>,
        sealed: &SealedValue,
        aad: &[u8],
    ) -> Result<Vec<u8>, RegistrarError>;
}

/// Associated data for a row: the stored text of the table's aad
/// columns, joined by `|`. Missing values contribute an empty part.
pub fn associated_data<S: AsRef<str>>(parts: &[S]) -> Vec<u8> {
    parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("|")
        .into_bytes()
}
