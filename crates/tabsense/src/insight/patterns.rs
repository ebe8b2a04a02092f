//! Structural patterns across rows and per-column outlier risk.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::input::{CellValue, DataTable};
use crate::stats::IqrFence;
use crate::validation::Severity;

/// Category of a detected structural pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Rows missing more than the sparse-row fraction of their cells.
    HighMissingRows,
    /// Rows identical to an earlier row.
    DuplicateRows,
}

/// A structural observation about the table as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub description: String,
    pub severity: Severity,
    /// Number of rows involved.
    pub count: usize,
}

/// Rows whose null share exceeds `fraction` of the column count.
pub fn sparse_rows(table: &DataTable, fraction: f64) -> Option<DataPattern> {
    let width = table.column_count();
    let limit = width as f64 * fraction;
    let count = table
        .rows
        .iter()
        .filter(|row| {
            let missing = (0..width)
                .filter(|&c| row.get(c).is_none_or(CellValue::is_null))
                .count();
            missing as f64 > limit
        })
        .count();

    (count > 0).then(|| DataPattern {
        kind: PatternKind::HighMissingRows,
        description: format!(
            "Found {} rows with >{:.0}% missing data",
            count,
            fraction * 100.0
        ),
        severity: Severity::Warning,
        count,
    })
}

/// Rows that exactly repeat an earlier row; the first occurrence is not counted.
pub fn duplicate_rows(table: &DataTable) -> Option<DataPattern> {
    let mut seen: HashSet<&[CellValue]> = HashSet::with_capacity(table.row_count());
    let count = table
        .rows
        .iter()
        .filter(|row| !seen.insert(row.as_slice()))
        .count();

    (count > 0).then(|| DataPattern {
        kind: PatternKind::DuplicateRows,
        description: format!("Found {} duplicate rows", count),
        severity: Severity::Info,
        count,
    })
}

/// Outlier exposure of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskIndicator {
    pub column: String,
    pub outlier_count: usize,
    pub outlier_rate: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

/// IQR outlier rate for numeric column `col`, when any value falls outside the fence.
pub fn risk_indicator(table: &DataTable, col: usize, iqr_multiplier: f64) -> Option<RiskIndicator> {
    let values = table.numbers(col);
    let fence = IqrFence::from_values(&values, iqr_multiplier)?;
    let outlier_count = fence.count_outliers(&values);
    (outlier_count > 0).then(|| RiskIndicator {
        column: table.headers[col].clone(),
        outlier_count,
        outlier_rate: outlier_count as f64 / values.len() as f64,
        lower_fence: fence.lower,
        upper_fence: fence.upper,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::from_records(headers.into_iter().map(String::from).collect(), rows)
    }

    #[test]
    fn test_sparse_rows() {
        let table = make_table(
            vec!["a", "b", "c", "d"],
            vec![
                vec!["1", "", "", ""],
                vec!["1", "2", "", ""],
                vec!["1", "2", "3", "4"],
            ],
        );
        let pattern = sparse_rows(&table, 0.5).unwrap();
        assert_eq!(pattern.kind, PatternKind::HighMissingRows);
        assert_eq!(pattern.count, 1);
        assert_eq!(pattern.severity, Severity::Warning);
        assert_eq!(pattern.description, "Found 1 rows with >50% missing data");
    }

    #[test]
    fn test_short_row_counts_missing_cells() {
        let mut table = make_table(
            vec!["a", "b", "c", "d"],
            vec![vec!["1", "2", "3", "4"], vec!["1", "2", "3", "4"]],
        );
        table.rows[1].truncate(1);
        assert_eq!(sparse_rows(&table, 0.5).map(|p| p.count), Some(1));
    }

    #[test]
    fn test_duplicate_rows_keep_first() {
        let table = make_table(
            vec!["a", "b"],
            vec![
                vec!["1", "x"],
                vec!["1", "x"],
                vec!["2", "y"],
                vec!["1.0", "x"],
            ],
        );
        let pattern = duplicate_rows(&table).unwrap();
        // "1.0" parses to the same number as "1".
        assert_eq!(pattern.count, 2);
        assert_eq!(pattern.severity, Severity::Info);

        let unique = make_table(vec!["a"], vec![vec!["1"], vec!["2"]]);
        assert!(duplicate_rows(&unique).is_none());
    }

    #[test]
    fn test_risk_indicator() {
        let table = make_table(
            vec!["cost"],
            vec![vec!["10"], vec!["11"], vec!["12"], vec!["13"], vec!["100"]],
        );
        let risk = risk_indicator(&table, 0, 1.5).unwrap();
        assert_eq!(risk.column, "cost");
        assert_eq!(risk.outlier_count, 1);
        assert!((risk.outlier_rate - 0.2).abs() < 1e-12);

        let calm = make_table(vec!["cost"], vec![vec!["1"], vec!["2"], vec!["3"], vec!["4"]]);
        assert!(risk_indicator(&calm, 0, 1.5).is_none());
    }

    #[test]
    fn test_pattern_serializes_type_key() {
        let table = make_table(vec!["a"], vec![vec!["1"], vec!["1"]]);
        let json = serde_json::to_value(duplicate_rows(&table).unwrap()).unwrap();
        assert_eq!(json["type"], "duplicate_rows");
        assert_eq!(json["severity"], "info");
    }
}
