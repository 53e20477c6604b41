//! FAANG validator CLI.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            file,
            kind,
            json,
            errors_csv,
            no_relationships,
            no_ontologies,
        } => commands::validate::run(commands::validate::Options {
            file,
            kind,
            json,
            errors_csv,
            relationships: !no_relationships,
            ontologies: !no_ontologies,
            verbose: cli.verbose > 0,
        }),

        Commands::Columns { kind } => commands::columns::run(kind),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
