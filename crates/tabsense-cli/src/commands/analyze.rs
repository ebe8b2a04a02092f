//! Analyze command - run the full pipeline on a data file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use tabsense::{Pipeline, QualityGrade, Severity};

pub fn run(
    file: PathBuf,
    domain: Option<String>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let result = Pipeline::new().process_file(&file, domain.as_deref())?;

    if let Some(ref path) = output {
        fs::write(path, result.to_json()?)?;
    }

    if json {
        println!("{}", result.to_json()?);
        return Ok(());
    }

    let meta = &result.processing_metadata;
    println!(
        "{} {}",
        "Analyzed".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "Domain: {} {}",
        meta.domain.to_string().white().bold(),
        if meta.domain_detected { "(detected)" } else { "(hinted)" }
    );
    println!(
        "Rows: {}  Fields: {}",
        meta.original_rows.to_string().white().bold(),
        result.schema.total_fields.to_string().white().bold()
    );
    println!();

    let report = &result.quality_report;
    let overall = format!("{:.0}%", report.overall_score() * 100.0);
    let overall = match report.grade() {
        QualityGrade::Excellent | QualityGrade::Good => overall.green(),
        QualityGrade::Fair => overall.yellow(),
        QualityGrade::Poor => overall.red(),
    };
    println!("{} {}", "Data quality:".yellow().bold(), overall.bold());
    println!("  completeness  {:.0}%", report.completeness_score * 100.0);
    println!("  consistency   {:.0}%", report.consistency_score * 100.0);
    println!("  validity      {:.0}%", report.validity_score * 100.0);
    println!("  outliers      {:.1}%", report.outlier_percentage * 100.0);

    if !report.is_clean() {
        println!();
        println!(
            "Found {} errors, {} warnings",
            report.errors.len().to_string().red(),
            report.warnings.len().to_string().yellow()
        );
        for error in &report.errors {
            println!("  {} {}: {}", "error".red(), error.field.white(), error.message);
        }
        for warning in &report.warnings {
            println!("  {} {}", "warning".yellow(), warning);
        }
    }

    let insights = &result.insights;
    if !insights.correlations.strong_correlations.is_empty() {
        println!();
        println!("{}", "Strong correlations:".yellow().bold());
        for pair in &insights.correlations.strong_correlations {
            println!("  {} ~ {}  r = {:.3}", pair.field1, pair.field2, pair.correlation);
        }
    }

    if !insights.patterns.is_empty() {
        println!();
        println!("{}", "Patterns:".yellow().bold());
        for pattern in &insights.patterns {
            let label = match pattern.severity {
                Severity::Error => pattern.severity.label().red(),
                Severity::Warning => pattern.severity.label().yellow(),
                Severity::Info => pattern.severity.label().blue(),
            };
            println!("  {} {}", label, pattern.description);
        }
    }

    if !insights.recommendations.is_empty() {
        println!();
        println!("{}", "Recommendations:".yellow().bold());
        for rec in &insights.recommendations {
            println!("  - {}", rec);
        }
    }

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
