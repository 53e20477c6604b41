//! Columns command - list the columns of a sample kind.

use colored::Colorize;
use faang_validator::{FieldAliasTable, RuleSet, SampleKind};

pub fn run(kind: SampleKind) -> Result<(), Box<dyn std::error::Error>> {
    let rules = RuleSet::for_kind(kind);
    let required = rules.required_columns();
    let recommended = rules.recommended_columns();
    let aliases = FieldAliasTable::for_rules(rules);

    println!("{} {}", "Columns for".cyan().bold(), kind.label().white());
    println!();

    let width = aliases.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
    for (field, column) in aliases.iter() {
        let marker = if required.iter().any(|c| *c == column) {
            "required".red().to_string()
        } else if recommended.iter().any(|c| *c == column) {
            "recommended".yellow().to_string()
        } else {
            String::new()
        };
        println!("  {:<width$}  {:<40} {}", column, field.dimmed(), marker, width = width);
    }

    if let Some(link) = rules.relationship {
        println!();
        println!(
            "Parents in '{}' must be: {}",
            rules.column(link.field),
            link.allowed_parent_materials.join(", ")
        );
    }

    Ok(())
}
