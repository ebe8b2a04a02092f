//! Statistical insights: column summaries, correlations, structural patterns
//! and improvement recommendations.

mod correlation;
mod generator;
mod patterns;
mod summary;

pub use correlation::{Correlations, StrongCorrelation};
pub use generator::{DomainInsights, InsightConfig, InsightGenerator};
pub use patterns::{DataPattern, PatternKind, RiskIndicator};
pub use summary::{CategoricalSummary, ColumnStatistics};
