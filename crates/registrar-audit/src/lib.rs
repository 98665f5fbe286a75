//! Audits over registrar exports and databases.
//!
//! - [`duplicates`]: students registered for the same course more than once
//! - [`integrity`]: row counts, key checksums, duplicate keys, orphans, and sealed samples
//! - [`profile`]: field types and a relational layout guessed from an export
//! - [`reconcile`]: advisor pairs present on only one side

pub mod types;
pub mod duplicates;
pub mod integrity;
pub mod profile;
pub mod reconcile;

#[cfg(test)]
mod testing;
