//! Per-column descriptive summaries.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::stats;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; absent with a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub null_count: usize,
}

impl ColumnStatistics {
    /// Statistics for column `col`, `None` when it holds no numbers.
    pub fn compute(table: &DataTable, col: usize) -> Option<Self> {
        let values = table.numbers(col);
        let sorted = stats::sorted(&values);
        Some(Self {
            mean: stats::mean(&values)?,
            median: stats::quantile_sorted(&sorted, 0.5)?,
            std: stats::sample_std(&values),
            min: *sorted.first()?,
            max: *sorted.last()?,
            null_count: table.null_count(col),
        })
    }
}

/// Value frequencies for one categorical or text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Distinct non-null values.
    pub unique_count: usize,
    /// Most frequent values with their counts, most frequent first.
    pub most_common: IndexMap<String, usize>,
    pub null_count: usize,
}

impl CategoricalSummary {
    /// Summary of column `col` keeping the `top_n` most frequent values.
    ///
    /// Equal counts keep first-seen order.
    pub fn compute(table: &DataTable, col: usize, top_n: usize) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for value in table.column_values(col).filter_map(|v| v.display_value()) {
            *counts.entry(value).or_default() += 1;
        }

        let unique_count = counts.len();
        // Stable sort keeps first-seen order among ties.
        counts.sort_by(|_, a, _, b| b.cmp(a));
        counts.truncate(top_n);

        Self {
            unique_count,
            most_common: counts,
            null_count: table.null_count(col),
        }
    }

    /// Whether every non-null value appeared exactly once.
    pub fn is_all_unique(&self, non_null: usize) -> bool {
        non_null > 0 && self.unique_count == non_null
    }
}

/// Number of distinct non-null display values in a column.
pub fn distinct_count(table: &DataTable, col: usize) -> usize {
    table
        .column_values(col)
        .filter_map(|v| v.display_value())
        .collect::<HashSet<String>>()
        .len()
}
