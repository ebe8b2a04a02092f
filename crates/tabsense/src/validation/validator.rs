//! Validation pass: rules per field, then quality scoring.

use std::borrow::Cow;

use crate::input::{CellValue, DataTable};
use crate::schema::DataSchema;

use super::quality;
use super::report::{QualityReport, QualityScores, QualityWeights, ValidationError, ValidationErrorKind};
use super::rules::{default_rules, FieldRule, Finding};

/// Checks a table against its schema and scores its quality.
pub struct DataValidator {
    rules: Vec<Box<dyn FieldRule>>,
    weights: QualityWeights,
    iqr_multiplier: f64,
}

impl DataValidator {
    /// Create a validator with the standard rule set.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            weights: QualityWeights::default(),
            iqr_multiplier: 1.5,
        }
    }

    /// Append a custom rule after the standard ones.
    pub fn with_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn with_weights(mut self, weights: QualityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier;
        self
    }

    /// Validate `table` against `schema`.
    ///
    /// The returned table is the input unchanged: no rule rewrites cells, so
    /// it is always borrowed.
    pub fn validate<'a>(
        &self,
        table: &'a DataTable,
        schema: &DataSchema,
    ) -> (Cow<'a, DataTable>, QualityReport) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for field in &schema.fields {
            let Some(col) = table.column_index(&field.name) else {
                if field.is_required {
                    errors.push(ValidationError::new(
                        &field.name,
                        ValidationErrorKind::MissingRequiredField,
                        format!("Required field '{}' is missing", field.name),
                    ));
                }
                continue;
            };

            let values: Vec<&CellValue> = table.column_values(col).collect();
            for rule in &self.rules {
                match rule.check(field, &values) {
                    Some(Finding::Error(err)) => {
                        tracing::trace!(field = %field.name, rule = rule.name(), "validation error");
                        errors.push(err);
                    }
                    Some(Finding::Warning(msg)) => warnings.push(msg),
                    None => {}
                }
            }
        }

        let scores = QualityScores {
            completeness: quality::completeness(table),
            consistency: quality::consistency(table, schema),
            validity: quality::validity(errors.len(), schema.fields.len()),
            outlier_percentage: quality::outlier_percentage(table, self.iqr_multiplier),
        };

        tracing::debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            completeness = scores.completeness,
            validity = scores.validity,
            "validation finished"
        );

        let report = QualityReport::new(scores, self.weights, errors, warnings, table.row_count());
        (Cow::Borrowed(table), report)
    }
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::SchemaBuilder;
    use crate::schema::{Domain, FieldSchema, FieldType};
    use crate::validation::QualityGrade;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::from_records(headers.into_iter().map(String::from).collect(), rows)
    }

    #[test]
    fn test_clean_table() {
        let table = make_table(
            vec!["patient_id", "age"],
            vec![vec!["P1", "40"], vec!["P2", "52"], vec!["P3", "61"]],
        );
        let schema = SchemaBuilder::new().build(&table, Domain::Surgery);
        let (cleaned, report) = DataValidator::new().validate(&table, &schema);

        assert!(matches!(cleaned, Cow::Borrowed(_)));
        assert!(report.errors.is_empty());
        assert_eq!(report.completeness_score, 1.0);
        assert_eq!(report.validity_score, 1.0);
        assert_eq!(report.total_records, 3);
        assert_eq!(report.valid_records, 3);
        assert_eq!(report.grade(), QualityGrade::Excellent);
    }

    #[test]
    fn test_required_override_emits_null_error() {
        let mut rows: Vec<Vec<String>> = (0..20).map(|i| vec![format!("P{}", i)]).collect();
        for row in rows.iter_mut().take(3) {
            row[0] = String::new();
        }
        let table = DataTable::from_records(vec!["patient_id".to_string()], rows);
        let schema = SchemaBuilder::new().build(&table, Domain::Surgery);
        assert!(!schema.fields[0].is_required);

        let validator = DataValidator::new();
        let (_, report) = validator.validate(&table, &schema);
        assert_eq!(report.errors_of_kind(ValidationErrorKind::NullRequiredField).count(), 0);

        let overridden = schema.with_field(schema.fields[0].with_required(true));
        let (_, report) = validator.validate(&table, &overridden);
        let errors: Vec<_> = report
            .errors_of_kind(ValidationErrorKind::NullRequiredField)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("3 null values"));
        assert_eq!(errors[0].row_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_missing_column() {
        let table = make_table(vec!["a"], vec![vec!["1"], vec!["2"]]);
        let schema = SchemaBuilder::new()
            .build(&table, Domain::General)
            .with_field(FieldSchema::new("claim_id", FieldType::Identifier).with_required(true))
            .with_field(FieldSchema::new("notes", FieldType::Text));

        let (_, report) = DataValidator::new().validate(&table, &schema);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].error_type, ValidationErrorKind::MissingRequiredField);
        assert_eq!(report.errors[0].field, "claim_id");
        // One error over three fields.
        assert!((report.validity_score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_foreign_table_against_schema() {
        let learned = make_table(
            vec!["amount"],
            vec![vec!["10"], vec!["20"], vec!["30"], vec!["40"]],
        );
        let schema = SchemaBuilder::new().build(&learned, Domain::General);

        let incoming = make_table(
            vec!["amount"],
            vec![vec!["5"], vec!["n/a"], vec!["lots"], vec!["25"]],
        );
        let (_, report) = DataValidator::new().validate(&incoming, &schema);

        assert_eq!(report.errors_of_kind(ValidationErrorKind::InvalidNumeric).count(), 1);
        assert_eq!(report.warnings, vec!["Field 'amount' has 1 values below minimum"]);
        assert_eq!(report.valid_records, 4);
    }

    #[test]
    fn test_empty_table_degrades() {
        let table = make_table(vec!["a", "b"], vec![]);
        let schema = SchemaBuilder::new().build(&table, Domain::General);
        let (_, report) = DataValidator::new().validate(&table, &schema);

        assert_eq!(report.completeness_score, 0.0);
        assert_eq!(report.outlier_percentage, 0.0);
        assert_eq!(report.total_records, 0);
        assert!(report.overall_score() >= 0.0 && report.overall_score() <= 1.0);
    }
}
