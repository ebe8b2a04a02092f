//! Table-wide quality sub-scores.

use crate::input::{CellValue, DataTable};
use crate::schema::{DataSchema, FieldType};
use crate::stats::IqrFence;

/// Share of a column's values that must follow a case convention to count as mixed in.
const CASE_MIX_FRACTION: f64 = 0.1;

/// `1 - null_cells / total_cells`; an empty table scores zero.
pub fn completeness(table: &DataTable) -> f64 {
    let total = table.cell_count();
    if total == 0 {
        return 0.0;
    }
    let nulls = table
        .rows
        .iter()
        .flatten()
        .filter(|v| v.is_null())
        .count();
    1.0 - nulls as f64 / total as f64
}

/// `1 - inconsistent_fields / checked_fields`.
///
/// Every schema field present in the table is checked; only text fields can
/// be flagged, when their values mix case conventions.
pub fn consistency(table: &DataTable, schema: &DataSchema) -> f64 {
    let mut checked = 0usize;
    let mut inconsistent = 0usize;

    for field in &schema.fields {
        let Some(col) = table.column_index(&field.name) else {
            continue;
        };
        checked += 1;
        if field.field_type == FieldType::Text && has_mixed_case(table.column_values(col)) {
            inconsistent += 1;
        }
    }

    1.0 - inconsistent as f64 / checked.max(1) as f64
}

/// `1 - errors / fields`, clamped to `[0, 1]`.
pub fn validity(error_count: usize, field_count: usize) -> f64 {
    (1.0 - error_count as f64 / field_count.max(1) as f64).clamp(0.0, 1.0)
}

/// Pooled share of numeric values outside their column's IQR fence.
///
/// Columns with fewer than [`IqrFence::MIN_SAMPLE`] values are left out of
/// both numerator and denominator.
pub fn outlier_percentage(table: &DataTable, iqr_multiplier: f64) -> f64 {
    let (outliers, considered) = table
        .numeric_columns()
        .into_iter()
        .filter_map(|col| {
            let values = table.numbers(col);
            let fence = IqrFence::from_values(&values, iqr_multiplier)?;
            Some((fence.count_outliers(&values), values.len()))
        })
        .fold((0usize, 0usize), |(o, n), (co, cn)| (o + co, n + cn));

    if considered == 0 {
        0.0
    } else {
        outliers as f64 / considered as f64
    }
}

/// Whether a column's values were entered in several case conventions.
pub fn has_mixed_case<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> bool {
    let texts: Vec<String> = values
        .into_iter()
        .filter_map(CellValue::display_value)
        .collect();
    if texts.len() < 2 {
        return false;
    }

    let upper = texts.iter().filter(|s| is_upper(s)).count();
    let lower = texts.iter().filter(|s| is_lower(s)).count();
    let title = texts.iter().filter(|s| is_title(s)).count();

    let threshold = CASE_MIX_FRACTION * texts.len() as f64;
    let significant = |count: usize| count as f64 > threshold;

    (significant(upper) && significant(lower))
        || (significant(title) && (significant(upper) || significant(lower)))
}

/// At least one cased character and none lowercase.
fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// At least one cased character and none uppercase.
fn is_lower(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

/// Every word starts upper-case and continues lower-case.
fn is_title(s: &str) -> bool {
    let mut previous_cased = false;
    let mut any_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else {
            previous_cased = false;
        }
    }
    any_cased
}
