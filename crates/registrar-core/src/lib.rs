//! Core types, schema catalog, export loading, and storage for registrar.
//!
//! This crate provides the foundational data structures used across all registrar crates:
//! - [`types`]: Enrollment records, advisor pairs, and the error type
//! - [`schema`]: The table catalog, DDL rendering, and load order
//! - [`export`]: Loading JSON exports and parsing the `takes` collection
//! - [`cipher`]: The [`ColumnCipher`](cipher::ColumnCipher) capability for sealed columns
//! - [`store`]: The [`RegistrarStore`](store::RegistrarStore) trait for database access
//! - [`sqlite`]: SQLite-backed implementation of `RegistrarStore`
//! - [`config`]: Configuration loading from `.registrar/registrar.json`
//! - [`hash`]: Order-independent primary-key checksums (base62 of xxhash64)

pub mod cipher;
pub mod config;
pub mod export;
pub mod hash;
pub mod schema;
pub mod sqlite;
pub mod sqlite_helpers;
pub mod sqlite_load;
pub mod sqlite_queries;
pub mod store;
pub mod types;
