//! Pairwise Pearson correlation between numeric columns.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::stats;

/// A pair of columns whose correlation crossed the strength threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    pub field1: String,
    pub field2: String,
    pub correlation: f64,
}

/// Correlation matrix plus the strong pairs drawn from it.
///
/// `None` entries mark pairs with fewer than two complete observations or a
/// constant side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correlations {
    pub matrix: IndexMap<String, IndexMap<String, Option<f64>>>,
    pub strong_correlations: Vec<StrongCorrelation>,
}

impl Correlations {
    /// Correlate every pair of numeric columns.
    ///
    /// With fewer than two numeric columns the result is empty.
    pub fn compute(table: &DataTable, threshold: f64) -> Self {
        let columns = table.numeric_columns();
        if columns.len() < 2 {
            return Self::default();
        }

        let rows: Vec<(String, Vec<Option<f64>>)> = columns
            .par_iter()
            .map(|&a| {
                let row = columns.iter().map(|&b| column_pearson(table, a, b)).collect();
                (table.headers[a].clone(), row)
            })
            .collect();

        let mut strong_correlations = Vec::new();
        for (i, (name_a, row)) in rows.iter().enumerate() {
            for (j, r) in row.iter().enumerate().skip(i + 1) {
                if let Some(r) = r.filter(|v| v.abs() > threshold) {
                    strong_correlations.push(StrongCorrelation {
                        field1: name_a.clone(),
                        field2: rows[j].0.clone(),
                        correlation: r,
                    });
                }
            }
        }

        let matrix = rows
            .into_iter()
            .map(|(name, row)| {
                let entries: IndexMap<String, Option<f64>> = columns
                    .iter()
                    .map(|&c| table.headers[c].clone())
                    .zip(row)
                    .collect();
                (name, entries)
            })
            .collect();

        Self {
            matrix,
            strong_correlations,
        }
    }

    /// Correlation between two named columns, if computed.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.matrix.get(a)?.get(b).copied().flatten()
    }
}

/// Pearson correlation over rows where both columns hold numbers.
fn column_pearson(table: &DataTable, a: usize, b: usize) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = table
        .rows
        .iter()
        .filter_map(|row| Some((row.get(a)?.as_number()?, row.get(b)?.as_number()?)))
        .collect();
    stats::pearson(&pairs)
}
