//! Per-field validation rules.

use crate::input::CellValue;
use crate::schema::{FieldSchema, FieldType};

use super::report::{ValidationError, ValidationErrorKind};

/// How many offending rows an error keeps as evidence.
const SAMPLE_ROWS: usize = 10;

/// What a rule found in one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// Counts against validity.
    Error(ValidationError),
    /// Informational; never fails a record.
    Warning(String),
}

/// A check applied to one column against its field schema.
///
/// Each rule reports at most one finding per column per pass.
pub trait FieldRule: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Check the column's values; `values` is in row order.
    fn check(&self, field: &FieldSchema, values: &[&CellValue]) -> Option<Finding>;
}

/// Row indices of values matching `pred`, with the total count.
fn offending_rows(values: &[&CellValue], pred: impl Fn(&CellValue) -> bool) -> (usize, Vec<usize>) {
    let mut count = 0;
    let mut rows = Vec::new();
    for (idx, value) in values.iter().enumerate() {
        if pred(*value) {
            count += 1;
            if rows.len() < SAMPLE_ROWS {
                rows.push(idx);
            }
        }
    }
    (count, rows)
}

/// Required fields must not hold nulls.
pub struct RequiredRule;

impl FieldRule for RequiredRule {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(&self, field: &FieldSchema, values: &[&CellValue]) -> Option<Finding> {
        if !field.is_required {
            return None;
        }
        let (count, rows) = offending_rows(values, CellValue::is_null);
        (count > 0).then(|| {
            Finding::Error(
                ValidationError::new(
                    &field.name,
                    ValidationErrorKind::NullRequiredField,
                    format!("Required field has {} null values", count),
                )
                .with_row_indices(rows),
            )
        })
    }
}

/// Numeric fields must hold only numbers.
pub struct NumericRule;

impl FieldRule for NumericRule {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn check(&self, field: &FieldSchema, values: &[&CellValue]) -> Option<Finding> {
        if field.field_type != FieldType::Numeric {
            return None;
        }
        let (count, rows) = offending_rows(values, |v| matches!(v, CellValue::Text(_)));
        (count > 0).then(|| {
            Finding::Error(
                ValidationError::new(
                    &field.name,
                    ValidationErrorKind::InvalidNumeric,
                    format!("Found {} non-numeric values in numeric field", count),
                )
                .with_row_indices(rows),
            )
        })
    }
}

/// Numeric values below the learned minimum are flagged, not failed.
pub struct MinimumRule;

impl FieldRule for MinimumRule {
    fn name(&self) -> &'static str {
        "minimum"
    }

    fn check(&self, field: &FieldSchema, values: &[&CellValue]) -> Option<Finding> {
        if field.field_type != FieldType::Numeric {
            return None;
        }
        let min = field.constraints.min()?;
        let (count, _) = offending_rows(values, |v| v.as_number().is_some_and(|n| n < min));
        (count > 0).then(|| {
            Finding::Warning(format!(
                "Field '{}' has {} values below minimum",
                field.name, count
            ))
        })
    }
}

/// Categorical fields must stay within their allowed values.
pub struct CategoricalRule;

impl FieldRule for CategoricalRule {
    fn name(&self) -> &'static str {
        "categorical"
    }

    fn check(&self, field: &FieldSchema, values: &[&CellValue]) -> Option<Finding> {
        if field.field_type != FieldType::Categorical {
            return None;
        }
        let allowed = field.constraints.allowed_values()?;
        let (count, rows) = offending_rows(values, |v| {
            v.display_value()
                .is_some_and(|display| !allowed.contains(&display))
        });
        (count > 0).then(|| {
            Finding::Error(
                ValidationError::new(
                    &field.name,
                    ValidationErrorKind::InvalidCategoricalValue,
                    format!("Found {} invalid categorical values", count),
                )
                .with_row_indices(rows),
            )
        })
    }
}

/// The standard rule set, in reporting order.
pub fn default_rules() -> Vec<Box<dyn FieldRule>> {
    vec![
        Box::new(RequiredRule),
        Box::new(NumericRule),
        Box::new(MinimumRule),
        Box::new(CategoricalRule),
    ]
}
