use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "registrar",
    version,
    about = "Audit university registrar exports and their SQLite databases"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log progress to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Report a student's duplicate course registrations
    Scan {
        /// Student ID to scan (defaults to scan.student_id in config)
        student_id: Option<String>,
        /// JSON export to read
        #[arg(long, env = "REGISTRAR_EXPORT")]
        export: Option<PathBuf>,
        /// Read enrollments from the database instead of the export
        #[arg(long)]
        db: bool,
        /// Database to read with --db
        #[arg(long, env = "REGISTRAR_DATABASE")]
        database: Option<PathBuf>,
        /// Exit non-zero when duplicates are found
        #[arg(long)]
        strict: bool,
    },

    /// Print the database DDL
    Schema {
        /// Store sensitive columns as ciphertext/IV pairs
        #[arg(long)]
        sealed: bool,
    },

    /// Create or replace the database from an export
    Load {
        /// JSON export to import
        #[arg(long, env = "REGISTRAR_EXPORT")]
        export: Option<PathBuf>,
        /// Database to write
        #[arg(long, env = "REGISTRAR_DATABASE")]
        database: Option<PathBuf>,
        /// Reject rows whose foreign-key parent is missing
        #[arg(long)]
        enforce_fk: bool,
        /// Replace an existing database without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Compare an export with the database loaded from it
    Check {
        /// JSON export to compare
        #[arg(long, env = "REGISTRAR_EXPORT")]
        export: Option<PathBuf>,
        /// Database to compare
        #[arg(long, env = "REGISTRAR_DATABASE")]
        database: Option<PathBuf>,
    },

    /// Profile the fields of an export
    Profile {
        /// JSON export to profile
        #[arg(long, env = "REGISTRAR_EXPORT")]
        export: Option<PathBuf>,
    },

    /// Reconcile advisor pairs between export and database
    Advisors {
        /// JSON export to compare
        #[arg(long, env = "REGISTRAR_EXPORT")]
        export: Option<PathBuf>,
        /// Database to compare
        #[arg(long, env = "REGISTRAR_DATABASE")]
        database: Option<PathBuf>,
        /// Also write mismatched pairs as CSV files into this directory
        #[arg(long, value_name = "DIR")]
        csv: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
