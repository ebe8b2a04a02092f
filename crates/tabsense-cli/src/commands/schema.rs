//! Schema command - print the inferred schema of a data file.

use std::path::PathBuf;

use colored::Colorize;
use tabsense::{Domain, DomainClassifier, FieldConstraints, Parser, SchemaBuilder};

pub fn run(file: PathBuf, domain: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (table, source) = Parser::new().parse_file(&file)?;
    let domain = match domain {
        Some(d) => d.parse::<Domain>()?,
        None => DomainClassifier::new().detect(&table),
    };
    let schema = SchemaBuilder::new().build(&table, domain);

    println!(
        "{} {} ({} rows, {})",
        "Schema for".cyan().bold(),
        file.display().to_string().white(),
        source.row_count,
        source.format
    );
    println!("Domain: {}", domain.to_string().white().bold());
    println!();

    for field in &schema.fields {
        let constraint = match &field.constraints {
            FieldConstraints::Range { min, max } => format!(
                "range [{}, {}]",
                min.map_or("-".to_string(), |v| v.to_string()),
                max.map_or("-".to_string(), |v| v.to_string())
            ),
            FieldConstraints::AllowedValues { allowed_values } => {
                format!("{} allowed values", allowed_values.len())
            }
            FieldConstraints::None => String::new(),
        };
        let required = if field.is_required {
            "required".green()
        } else {
            "optional".dimmed()
        };
        println!(
            "  {:24} {:14} {} {}",
            field.name,
            field.field_type.as_str(),
            required,
            constraint
        );
    }

    Ok(())
}
