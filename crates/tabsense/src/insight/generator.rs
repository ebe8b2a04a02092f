//! Insight generation over a table and its schema.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::correlation::Correlations;
use super::patterns::{self, DataPattern, RiskIndicator};
use super::summary::{distinct_count, CategoricalSummary, ColumnStatistics};
use crate::input::DataTable;
use crate::schema::{DataSchema, Domain, FieldType};

/// Thresholds for insight generation.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Absolute Pearson correlation above which a pair is strong.
    pub strong_correlation: f64,
    /// Null share of a row above which it counts as sparse.
    pub sparse_row_fraction: f64,
    /// Null share of a field above which better collection is recommended.
    pub high_null_fraction: f64,
    /// Distinct/row ratio above which a categorical field needs standardization.
    pub standardization_ratio: f64,
    /// Values kept per categorical summary.
    pub top_n: usize,
    /// Tukey fence multiplier for risk indicators.
    pub iqr_multiplier: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            strong_correlation: 0.7,
            sparse_row_fraction: 0.5,
            high_null_fraction: 0.3,
            standardization_ratio: 0.5,
            top_n: 5,
            iqr_multiplier: 1.5,
        }
    }
}

/// Statistical insights for one processed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainInsights {
    pub domain: Domain,
    /// Numeric columns, in source order.
    pub statistical_summary: IndexMap<String, ColumnStatistics>,
    /// Text-stored columns with repeated values, in source order.
    pub categorical_summary: IndexMap<String, CategoricalSummary>,
    pub correlations: Correlations,
    pub patterns: Vec<DataPattern>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub risk_indicators: Vec<RiskIndicator>,
}

/// Produces [`DomainInsights`] from a table and its schema.
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    config: InsightConfig,
}

impl InsightGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Generate all insights; independent of validation.
    pub fn generate(&self, table: &DataTable, schema: &DataSchema) -> DomainInsights {
        let numeric = table.numeric_columns();

        let statistical_summary = numeric
            .par_iter()
            .filter_map(|&col| {
                ColumnStatistics::compute(table, col).map(|s| (table.headers[col].clone(), s))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        let risk_indicators = numeric
            .par_iter()
            .filter_map(|&col| patterns::risk_indicator(table, col, self.config.iqr_multiplier))
            .collect();

        let insights = DomainInsights {
            domain: schema.domain,
            statistical_summary,
            categorical_summary: self.categorical_summary(table),
            correlations: Correlations::compute(table, self.config.strong_correlation),
            patterns: self.patterns(table),
            recommendations: self.recommendations(table, schema),
            risk_indicators,
        };

        tracing::debug!(
            numeric = insights.statistical_summary.len(),
            categorical = insights.categorical_summary.len(),
            strong_correlations = insights.correlations.strong_correlations.len(),
            patterns = insights.patterns.len(),
            "insights generated"
        );

        insights
    }

    /// Summaries for every column stored as text, whatever type was inferred
    /// for it; all-unique columns carry no frequency signal and are skipped.
    fn categorical_summary(&self, table: &DataTable) -> IndexMap<String, CategoricalSummary> {
        table
            .text_columns()
            .par_iter()
            .filter_map(|&col| {
                let summary = CategoricalSummary::compute(table, col, self.config.top_n);
                let non_null = table.row_count() - summary.null_count;
                (!summary.is_all_unique(non_null)).then(|| (table.headers[col].clone(), summary))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    fn patterns(&self, table: &DataTable) -> Vec<DataPattern> {
        [
            patterns::sparse_rows(table, self.config.sparse_row_fraction),
            patterns::duplicate_rows(table),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn recommendations(&self, table: &DataTable, schema: &DataSchema) -> Vec<String> {
        let rows = table.row_count();
        if rows == 0 {
            return Vec::new();
        }

        let present: Vec<(&str, usize, FieldType)> = schema
            .fields
            .iter()
            .filter_map(|f| Some((f.name.as_str(), table.column_index(&f.name)?, f.field_type)))
            .collect();

        let sparse = present.iter().filter_map(|&(name, col, _)| {
            let null_rate = table.null_count(col) as f64 / rows as f64;
            (null_rate > self.config.high_null_fraction).then(|| {
                format!(
                    "Consider improving data collection for '{}' ({:.0}%+ missing values)",
                    name,
                    self.config.high_null_fraction * 100.0
                )
            })
        });

        let varied = present
            .iter()
            .filter(|&&(_, _, t)| t == FieldType::Categorical)
            .filter_map(|&(name, col, _)| {
                let ratio = distinct_count(table, col) as f64 / rows as f64;
                (ratio > self.config.standardization_ratio).then(|| {
                    format!(
                        "Field '{}' may need standardization (high variety of values)",
                        name
                    )
                })
            });

        sparse.chain(varied).collect()
    }
}
