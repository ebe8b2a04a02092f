//! Pipeline facade: classify, infer, then validate and summarize.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{DomainClassifier, DomainPatterns};
use crate::error::{Result, TabsenseError};
use crate::inference::{FieldTypeInferrer, SchemaBuilder};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::insight::{DomainInsights, InsightConfig, InsightGenerator};
use crate::schema::{DataSchema, Domain};
use crate::validation::{DataValidator, QualityReport, QualityWeights};

/// Configuration for a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Parser configuration for byte and file inputs.
    pub parser: ParserConfig,
    /// Largest accepted input, in megabytes.
    pub max_file_size_mb: u64,
    /// Domain to assume instead of classifying.
    pub domain_hint: Option<Domain>,
    /// Keyword dictionaries for classification.
    pub patterns: DomainPatterns,
    /// Unique-value ratio below which a column is categorical.
    pub categorical_ratio: f64,
    /// Null fraction below which a field is required.
    pub required_null_fraction: f64,
    /// Weights for the overall quality score.
    pub weights: QualityWeights,
    /// Tukey fence multiplier for the outlier share.
    pub iqr_multiplier: f64,
    /// Insight thresholds.
    pub insights: InsightConfig,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            max_file_size_mb: 100,
            domain_hint: None,
            patterns: DomainPatterns::default(),
            categorical_ratio: 0.1,
            required_null_fraction: 0.1,
            weights: QualityWeights::default(),
            iqr_multiplier: 1.5,
            insights: InsightConfig::default(),
        }
    }
}

impl ProcessingConfig {
    pub fn with_domain_hint(mut self, domain: Domain) -> Self {
        self.domain_hint = Some(domain);
        self
    }

    pub fn with_max_file_size_mb(mut self, mb: u64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    pub fn with_patterns(mut self, patterns: DomainPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    fn limit_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Bookkeeping about one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingMetadata {
    pub original_rows: usize,
    pub processed_rows: usize,
    /// When processing ran.
    pub processing_time: DateTime<Utc>,
    pub domain: Domain,
    /// False when the domain came from a hint.
    pub domain_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub schema: DataSchema,
    /// The processed table; not serialized.
    #[serde(skip)]
    pub data: Arc<DataTable>,
    pub quality_report: QualityReport,
    pub insights: DomainInsights,
    pub processing_metadata: ProcessingMetadata,
}

impl ProcessingResult {
    /// Pretty JSON of everything except the table.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The processing engine.
pub struct Pipeline {
    config: ProcessingConfig,
    parser: Parser,
    classifier: DomainClassifier,
    schema_builder: SchemaBuilder,
    validator: DataValidator,
    insights: InsightGenerator,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProcessingConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: ProcessingConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let classifier = DomainClassifier::with_patterns(config.patterns.clone());
        let schema_builder = SchemaBuilder::new()
            .with_inferrer(FieldTypeInferrer::new().with_categorical_ratio(config.categorical_ratio))
            .with_required_null_fraction(config.required_null_fraction);
        let validator = DataValidator::new()
            .with_weights(config.weights)
            .with_iqr_multiplier(config.iqr_multiplier);
        let insights = InsightGenerator::with_config(config.insights.clone());

        Self {
            config,
            parser,
            classifier,
            schema_builder,
            validator,
            insights,
        }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Process an in-memory table.
    ///
    /// `hint` overrides the configured hint; with neither the domain is classified.
    pub fn process_table(&self, table: DataTable, hint: Option<Domain>) -> Result<ProcessingResult> {
        self.process_table_at(table, hint, Utc::now())
    }

    /// Process a table with an explicit timestamp for schema and metadata.
    pub fn process_table_at(
        &self,
        table: DataTable,
        hint: Option<Domain>,
        now: DateTime<Utc>,
    ) -> Result<ProcessingResult> {
        self.run(table, hint, None, now)
    }

    /// Parse and process raw bytes.
    pub fn process_bytes(&self, bytes: &[u8], hint: Option<&str>) -> Result<ProcessingResult> {
        self.check_size(bytes.len() as u64)?;
        let hint = parse_hint(hint)?;
        let (table, source) = self.parser.parse_bytes(bytes, None)?;
        self.run(table, hint, Some(source), Utc::now())
    }

    /// Read, parse and process a delimited file.
    pub fn process_file(&self, path: impl AsRef<Path>, hint: Option<&str>) -> Result<ProcessingResult> {
        let path = path.as_ref();
        let size = fs::metadata(path)
            .map_err(|e| TabsenseError::Io {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();
        self.check_size(size)?;
        let hint = parse_hint(hint)?;
        let (table, source) = self.parser.parse_file(path)?;
        self.run(table, hint, Some(source), Utc::now())
    }

    fn check_size(&self, size_bytes: u64) -> Result<()> {
        let limit_bytes = self.config.limit_bytes();
        if size_bytes > limit_bytes {
            return Err(TabsenseError::FileTooLarge {
                size_bytes,
                limit_bytes,
            });
        }
        Ok(())
    }

    fn run(
        &self,
        table: DataTable,
        hint: Option<Domain>,
        source: Option<SourceMetadata>,
        now: DateTime<Utc>,
    ) -> Result<ProcessingResult> {
        if table.column_count() == 0 {
            return Err(TabsenseError::NoColumns(
                "table has no columns to infer a schema from".to_string(),
            ));
        }
        if let Some((row, found)) = table.ragged_row() {
            return Err(TabsenseError::RaggedRow {
                row,
                expected: table.column_count(),
                found,
            });
        }

        tracing::debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "processing table"
        );

        let (domain, domain_detected) = match hint.or(self.config.domain_hint) {
            Some(domain) => (domain, false),
            None => (self.classifier.detect(&table), true),
        };

        let schema = self.schema_builder.build_at(&table, domain, now);

        let table = Arc::new(table);
        let ((cleaned, quality_report), insights) = rayon::join(
            || self.validator.validate(&table, &schema),
            || self.insights.generate(&table, &schema),
        );

        let data = match cleaned {
            Cow::Borrowed(_) => Arc::clone(&table),
            Cow::Owned(t) => Arc::new(t),
        };

        let processing_metadata = ProcessingMetadata {
            original_rows: table.row_count(),
            processed_rows: data.row_count(),
            processing_time: now,
            domain,
            domain_detected,
            source,
        };

        tracing::debug!(
            %domain,
            overall = quality_report.overall_score(),
            errors = quality_report.errors.len(),
            "processing finished"
        );

        Ok(ProcessingResult {
            schema,
            data,
            quality_report,
            insights,
            processing_metadata,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve an optional domain hint string.
fn parse_hint(hint: Option<&str>) -> Result<Option<Domain>> {
    hint.map(str::parse).transpose()
}
