mod integrity;
mod profile;
mod reconcile;
mod scan;

pub use integrity::*;
pub use profile::*;
pub use reconcile::*;
pub use scan::*;

use serde::{Deserialize, Serialize};

use registrar_core::types::LoadSummary;

/// Outcome of `registrar load`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResult {
    pub version: String,
    pub command: String,
    pub database: String,
    pub summary: LoadSummary,
}

/// Outcome of `registrar schema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaResult {
    pub version: String,
    pub command: String,
    pub revision: String,
    pub ddl: String,
}
