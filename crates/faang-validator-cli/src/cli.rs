//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use faang_validator::SampleKind;
use std::path::PathBuf;

/// FAANG sample metadata validator
#[derive(Parser)]
#[command(name = "faang-validate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a JSON batch of sample records
    Validate {
        /// Path to the batch file (array of records or object keyed by kind)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sample kind (organism, organoid, teleost_embryo)
        #[arg(short, long)]
        kind: Option<SampleKind>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Write the error table as CSV
        #[arg(long, value_name = "PATH")]
        errors_csv: Option<PathBuf>,

        /// Skip parent reference checks
        #[arg(long)]
        no_relationships: bool,

        /// Skip ontology term lookups
        #[arg(long)]
        no_ontologies: bool,
    },

    /// List the columns of a sample kind
    Columns {
        /// Sample kind (organism, organoid, teleost_embryo)
        #[arg(value_name = "KIND")]
        kind: SampleKind,
    },
}
