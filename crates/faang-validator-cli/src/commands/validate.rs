//! Validate command - validate a batch file and print the report.

use std::path::PathBuf;

use colored::Colorize;
use faang_validator::{BatchLoader, CancellationToken, SampleKind, SampleValidator, ValidatorConfig};

/// Options for one validate run.
pub struct Options {
    pub file: PathBuf,
    pub kind: Option<SampleKind>,
    pub json: bool,
    pub errors_csv: Option<PathBuf>,
    pub relationships: bool,
    pub ontologies: bool,
    pub verbose: bool,
}

pub fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    if !options.file.exists() {
        return Err(format!("File not found: {}", options.file.display()).into());
    }

    let mut loader = BatchLoader::new();
    if let Some(kind) = options.kind {
        loader = loader.with_kind(kind);
    }
    let (batch, source) = loader.load_file(&options.file)?;

    let config = ValidatorConfig::from_env()?
        .with_relationships(options.relationships)
        .with_ontologies(options.ontologies);
    let validator = SampleValidator::new(config)?;

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .map_err(|e| format!("Failed to install Ctrl-C handler: {}", e))?;

    if !options.json {
        println!(
            "{} {} {} records from {}",
            "Validating".cyan().bold(),
            batch.records.len(),
            batch.kind.label(),
            source.file.white()
        );
    }

    let report = validator
        .validate_with_cancel(batch.kind, &batch.records, &cancel)?
        .with_source(source);

    if let Some(ref path) = options.errors_csv {
        report.save_error_table(path)?;
    }

    if options.json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report, options.verbose);
        if let Some(ref path) = options.errors_csv {
            println!("Error table written to {}", path.display().to_string().white());
        }
    }

    if report.all_valid() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} records failed validation",
            report.summary.invalid, report.summary.total
        )
        .into())
    }
}

fn print_summary(report: &faang_validator::ValidationReport, verbose: bool) {
    let summary = &report.summary;
    println!();
    println!("{}", "Summary:".yellow().bold());
    println!("  Total:    {}", summary.total.to_string().white());
    println!("  Valid:    {}", summary.valid.to_string().green());
    println!("  Invalid:  {}", summary.invalid.to_string().red());
    println!("  Warnings: {}", summary.warnings.to_string().yellow());

    if !report.error_table.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        for row in &report.error_table {
            println!(
                "  {} {} {}",
                row.sample_name.white().bold(),
                format!("[{}]", row.column).cyan(),
                row.error
            );
        }
    }

    let related: Vec<_> = report
        .valid
        .iter()
        .filter(|v| !v.relationship_errors.is_empty())
        .collect();
    if !related.is_empty() {
        println!();
        println!("{}", "Relationship findings:".magenta().bold());
        for record in related {
            for finding in &record.relationship_errors {
                println!("  {} {}", record.sample_name.white().bold(), finding);
            }
        }
    }

    if verbose && summary.warnings > 0 {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        let warned = report
            .valid
            .iter()
            .map(|v| (&v.sample_name, &v.warnings))
            .chain(report.invalid.iter().map(|i| (&i.sample_name, &i.outcome.warnings)));
        for (name, warnings) in warned {
            for warning in warnings {
                println!("  {} {}", name.white().bold(), warning);
            }
        }
    }

    println!();
    if summary.invalid == 0 {
        println!("{}", "All records are valid.".green());
    }
}
