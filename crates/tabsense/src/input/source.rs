//! In-memory table representation and source metadata.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the bytes a table was loaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path, when loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Size of the raw contents in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the contents were loaded.
    pub loaded_at: DateTime<Utc>,
}

/// A single cell, typed once when the table is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Type a raw cell string.
    ///
    /// Null tokens become [`CellValue::Null`], finite numbers become
    /// [`CellValue::Number`] and everything else keeps its raw text.
    pub fn parse(raw: &str) -> Self {
        if is_null_token(raw) {
            return CellValue::Null;
        }
        match raw.trim().parse::<f64>() {
            // Adding zero folds -0.0 into 0.0 so equal numbers hash equally.
            Ok(n) if n.is_finite() => CellValue::Number(n + 0.0),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell the way it would appear in a text report.
    ///
    /// Returns `None` for nulls.
    pub fn display_value(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Number(a), CellValue::Number(b)) => a.to_bits() == b.to_bits(),
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            CellValue::Number(n) => n.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Integral values print without a trailing `.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Check if a raw value represents a missing/null value.
pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed.eq_ignore_ascii_case("#n/a")
        || trimmed.eq_ignore_ascii_case("<na>")
        || trimmed == "."
        || trimmed == "-"
}

/// Parsed tabular data with typed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers, in source order.
    pub headers: Vec<String>,
    /// Row data (row-major order), every row as wide as `headers`.
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Create a table from already-typed cells.
    ///
    /// Rows are padded with nulls or truncated to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Create a table from raw string records, typing every cell.
    pub fn from_records<S: AsRef<str>>(headers: Vec<String>, records: Vec<Vec<S>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| record.iter().map(|v| CellValue::parse(v.as_ref())).collect())
            .collect();
        Self::new(headers, rows)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Find a column's index by header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First row whose width differs from the header width, with that width.
    ///
    /// Tables built through [`DataTable::new`] never have one; `rows` is public
    /// and can be edited afterwards.
    pub fn ragged_row(&self) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.headers.len())
            .map(|(i, row)| (i, row.len()))
    }

    /// Number of null cells in a column.
    pub fn null_count(&self, index: usize) -> usize {
        self.column_values(index).filter(|v| v.is_null()).count()
    }

    /// Non-null numeric values of a column, in row order.
    pub fn numbers(&self, index: usize) -> Vec<f64> {
        self.column_values(index)
            .filter_map(CellValue::as_number)
            .collect()
    }

    /// Whether a column is stored as numbers: at least one number and no text.
    pub fn is_numeric_column(&self, index: usize) -> bool {
        let mut saw_number = false;
        for value in self.column_values(index) {
            match value {
                CellValue::Text(_) => return false,
                CellValue::Number(_) => saw_number = true,
                CellValue::Null => {}
            }
        }
        saw_number
    }

    /// Indices of numeric columns, in source order.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.column_count())
            .filter(|&i| self.is_numeric_column(i))
            .collect()
    }

    /// Indices of columns holding at least one text cell.
    pub fn text_columns(&self) -> Vec<usize> {
        (0..self.column_count())
            .filter(|&i| self.column_values(i).any(|v| matches!(v, CellValue::Text(_))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_token() {
        assert!(is_null_token(""));
        assert!(is_null_token("  "));
        assert!(is_null_token("NA"));
        assert!(is_null_token("na"));
        assert!(is_null_token("N/A"));
        assert!(is_null_token("NaN"));
        assert!(is_null_token("null"));
        assert!(is_null_token("NULL"));
        assert!(is_null_token("#N/A"));
        assert!(is_null_token("."));
        assert!(!is_null_token("value"));
        assert!(!is_null_token("0"));
    }

    #[test]
    fn test_cell_parse() {
        assert_eq!(CellValue::parse("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::parse(" 3.5 "), CellValue::Number(3.5));
        assert_eq!(CellValue::parse("-0"), CellValue::Number(0.0));
        assert_eq!(CellValue::parse("inf"), CellValue::Text("inf".to_string()));
        assert_eq!(CellValue::parse("T3"), CellValue::Text("T3".to_string()));
        assert_eq!(CellValue::parse("n/a"), CellValue::Null);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(CellValue::Number(5.0).display_value(), Some("5".to_string()));
        assert_eq!(CellValue::Number(2.5).display_value(), Some("2.5".to_string()));
        assert_eq!(CellValue::Null.display_value(), None);
    }

    #[test]
    fn test_rows_are_padded_and_truncated() {
        let table = DataTable::from_records(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1"], vec!["1", "2", "3"]],
        );
        assert_eq!(table.rows[0], vec![CellValue::Number(1.0), CellValue::Null]);
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.ragged_row(), None);
    }

    #[test]
    fn test_ragged_row_after_edit() {
        let mut table = DataTable::from_records(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1", "2"], vec!["3", "4"]],
        );
        table.rows[1].pop();
        assert_eq!(table.ragged_row(), Some((1, 1)));
    }

    #[test]
    fn test_numeric_and_text_columns() {
        let table = DataTable::from_records(
            vec!["age".to_string(), "stage".to_string(), "empty".to_string()],
            vec![vec!["30", "II", ""], vec!["NA", "III", ""], vec!["41", "IV", ""]],
        );
        assert_eq!(table.numeric_columns(), vec![0]);
        assert_eq!(table.text_columns(), vec![1]);
        assert_eq!(table.numbers(0), vec![30.0, 41.0]);
        assert_eq!(table.null_count(2), 3);
    }
}
