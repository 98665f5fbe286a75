use registrar_audit::types::SchemaResult;
use registrar_core::schema::{ddl, SchemaRevision};
use registrar_output::OutputFormatter;

use super::emit;

/// Run `registrar schema`.
pub fn run(formatter: &dyn OutputFormatter, sealed: bool) -> i32 {
    let revision = if sealed {
        SchemaRevision::Sealed
    } else {
        SchemaRevision::Plaintext
    };
    match ddl(revision) {
        Ok(ddl) => {
            let result = SchemaResult {
                version: env!("CARGO_PKG_VERSION").into(),
                command: "schema".into(),
                revision: revision.to_string(),
                ddl,
            };
            emit(&formatter.format_schema(&result));
            0
        }
        Err(e) => {
            eprintln!("registrar schema: {}", e);
            2
        }
    }
}
