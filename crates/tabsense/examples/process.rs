//! Example: profile a tabular data file with Tabsense.
//!
//! Usage:
//!   cargo run --example process -- <file_path> [domain]

use std::env;
use std::path::Path;

use tabsense::{Pipeline, Severity};

fn main() -> tabsense::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example process -- <file_path> [domain]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let hint = args.get(2).map(String::as_str);

    let result = Pipeline::new().process_file(path, hint)?;
    let meta = &result.processing_metadata;

    println!("## {}", path.display());
    println!(
        "  Domain: {} ({})",
        meta.domain,
        if meta.domain_detected { "detected" } else { "hinted" }
    );
    println!("  Rows: {}", meta.original_rows);
    println!();

    println!("## Schema ({} fields)", result.schema.total_fields);
    for field in &result.schema.fields {
        println!(
            "  {:24} {:14} required={}",
            field.name,
            field.field_type.as_str(),
            field.is_required
        );
    }
    println!();

    let report = &result.quality_report;
    println!("## Quality: {:.2} ({:?})", report.overall_score(), report.grade());
    println!("  completeness {:.2}", report.completeness_score);
    println!("  consistency  {:.2}", report.consistency_score);
    println!("  validity     {:.2}", report.validity_score);
    println!("  outliers     {:.1}%", report.outlier_percentage * 100.0);
    for error in &report.errors {
        println!("  [{}] {}: {}", error.severity.label(), error.field, error.message);
    }
    for warning in &report.warnings {
        println!("  [{}] {}", Severity::Warning.label(), warning);
    }
    println!();

    println!("## Insights");
    for pair in &result.insights.correlations.strong_correlations {
        println!("  {} ~ {}: r = {:.3}", pair.field1, pair.field2, pair.correlation);
    }
    for pattern in &result.insights.patterns {
        println!("  [{}] {}", pattern.severity.label(), pattern.description);
    }
    for rec in &result.insights.recommendations {
        println!("  - {}", rec);
    }

    Ok(())
}
