//! registrar CLI: duplicate enrollment scans and export/database audits.
//!
//! This binary provides the `registrar` command with subcommands for scanning,
//! loading, checking, and profiling. See `registrar --help` for usage.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = commands::load_config();
    let formatter: Box<dyn registrar_output::OutputFormatter> = if cli.json {
        Box::new(registrar_output::json::JsonFormatter)
    } else {
        Box::new(registrar_output::human::HumanFormatter::new(config.limits.print))
    };

    let exit_code = match cli.command {
        Commands::Scan {
            student_id,
            export,
            db,
            database,
            strict,
        } => commands::scan::run(&*formatter, &config, student_id, export, db, database, strict),
        Commands::Schema { sealed } => commands::schema::run(&*formatter, sealed),
        Commands::Load {
            export,
            database,
            enforce_fk,
            yes,
        } => commands::load::run(&*formatter, &config, export, database, enforce_fk, yes),
        Commands::Check { export, database } => {
            commands::check::run(&*formatter, &config, export, database)
        }
        Commands::Profile { export } => commands::profile::run(&*formatter, &config, export),
        Commands::Advisors {
            export,
            database,
            csv,
        } => commands::advisors::run(&*formatter, &config, export, database, csv),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}
