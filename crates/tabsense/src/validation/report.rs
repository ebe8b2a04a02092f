//! Validation findings and the quality report built from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite issue that should be addressed.
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Rule category of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required field is absent from the table.
    MissingRequiredField,
    /// A required field holds nulls.
    NullRequiredField,
    /// A numeric field holds non-numeric values.
    InvalidNumeric,
    /// A categorical field holds values outside its allowed set.
    InvalidCategoricalValue,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingRequiredField => "missing_required_field",
            ValidationErrorKind::NullRequiredField => "null_required_field",
            ValidationErrorKind::InvalidNumeric => "invalid_numeric",
            ValidationErrorKind::InvalidCategoricalValue => "invalid_categorical_value",
        }
    }

    /// Whether errors of this kind invalidate the rows they point at.
    ///
    /// Every current kind describes a column, so none is row-scoped and
    /// `valid_records` equals `total_records`.
    pub fn is_row_scoped(&self) -> bool {
        false
    }
}

/// A recoverable data-quality finding about one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub error_type: ValidationErrorKind,
    pub message: String,
    pub severity: Severity,
    /// First offending rows, for cell-scoped rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_indices: Vec<usize>,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        error_type: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            error_type,
            message: message.into(),
            severity: Severity::Error,
            row_indices: Vec::new(),
        }
    }

    pub fn with_row_indices(mut self, rows: Vec<usize>) -> Self {
        self.row_indices = rows;
        self
    }
}

/// Weights combining the sub-scores into `overall_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub completeness: f64,
    pub consistency: f64,
    pub validity: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            completeness: 0.3,
            consistency: 0.3,
            validity: 0.4,
        }
    }
}

/// Coarse label for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Outcome of one validation pass.
///
/// Serialize-only: `overall_score` always comes from [`QualityReport::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// `1 - null_cells / total_cells`.
    pub completeness_score: f64,
    /// Share of fields without mixed-case pollution.
    pub consistency_score: f64,
    /// `1 - errors / fields`, clamped to `[0, 1]`.
    pub validity_score: f64,
    /// Share of pooled numeric values outside their column's IQR fence.
    pub outlier_percentage: f64,
    overall_score: f64,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub total_records: usize,
    pub valid_records: usize,
}

/// Sub-scores handed to [`QualityReport::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScores {
    pub completeness: f64,
    pub consistency: f64,
    pub validity: f64,
    pub outlier_percentage: f64,
}

impl QualityReport {
    /// Assemble a report; the overall score is derived here and nowhere else.
    pub fn new(
        scores: QualityScores,
        weights: QualityWeights,
        errors: Vec<ValidationError>,
        warnings: Vec<String>,
        total_records: usize,
    ) -> Self {
        let overall_score = scores.completeness * weights.completeness
            + scores.consistency * weights.consistency
            + scores.validity * weights.validity;

        let invalid_rows: BTreeSet<usize> = errors
            .iter()
            .filter(|e| e.error_type.is_row_scoped())
            .flat_map(|e| e.row_indices.iter().copied())
            .collect();

        Self {
            completeness_score: scores.completeness,
            consistency_score: scores.consistency,
            validity_score: scores.validity,
            outlier_percentage: scores.outlier_percentage,
            overall_score,
            errors,
            warnings,
            total_records,
            valid_records: total_records.saturating_sub(invalid_rows.len()),
        }
    }

    /// Weighted combination of completeness, consistency and validity.
    ///
    /// The outlier share is reported alongside but never weighted in.
    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn grade(&self) -> QualityGrade {
        match self.overall_score {
            s if s >= 0.9 => QualityGrade::Excellent,
            s if s >= 0.75 => QualityGrade::Good,
            s if s >= 0.5 => QualityGrade::Fair,
            _ => QualityGrade::Poor,
        }
    }

    /// Errors of one kind, in the order they were found.
    pub fn errors_of_kind(&self, kind: ValidationErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.error_type == kind)
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(completeness: f64, consistency: f64, validity: f64) -> QualityScores {
        QualityScores {
            completeness,
            consistency,
            validity,
            outlier_percentage: 0.5,
        }
    }

    #[test]
    fn test_overall_score_weights() {
        let report = QualityReport::new(
            scores(1.0, 0.5, 0.25),
            QualityWeights::default(),
            Vec::new(),
            Vec::new(),
            10,
        );
        let expected = 0.3 + 0.15 + 0.1;
        assert!((report.overall_score() - expected).abs() < 1e-12);
        assert_eq!(report.grade(), QualityGrade::Fair);
    }

    #[test]
    fn test_outliers_do_not_affect_overall() {
        let mut s = scores(1.0, 1.0, 1.0);
        let a = QualityReport::new(s, QualityWeights::default(), Vec::new(), Vec::new(), 1);
        s.outlier_percentage = 0.0;
        let b = QualityReport::new(s, QualityWeights::default(), Vec::new(), Vec::new(), 1);
        assert_eq!(a.overall_score(), b.overall_score());
        assert_eq!(a.grade(), QualityGrade::Excellent);
    }

    #[test]
    fn test_column_errors_keep_all_records_valid() {
        let errors = vec![
            ValidationError::new("age", ValidationErrorKind::InvalidNumeric, "bad")
                .with_row_indices(vec![0, 1]),
        ];
        let report =
            QualityReport::new(scores(1.0, 1.0, 0.0), QualityWeights::default(), errors, Vec::new(), 5);
        assert_eq!(report.valid_records, 5);
        assert_eq!(report.errors_of_kind(ValidationErrorKind::InvalidNumeric).count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_serialized_overall_matches_sub_scores() {
        let report = QualityReport::new(
            scores(0.5, 1.0, 1.0),
            QualityWeights::default(),
            Vec::new(),
            Vec::new(),
            3,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overall_score"], report.overall_score());
        assert!((report.overall_score() - 0.85).abs() < 1e-12);
        assert!(report.is_clean());
    }

    #[test]
    fn test_error_serialization() {
        let err = ValidationError::new("age", ValidationErrorKind::NullRequiredField, "3 nulls");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error_type"], "null_required_field");
        assert_eq!(json["severity"], "error");
        assert!(json.get("row_indices").is_none());
    }
}
