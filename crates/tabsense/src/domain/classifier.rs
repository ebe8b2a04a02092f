//! Multi-signal domain classification.

use serde::{Deserialize, Serialize};

use super::patterns::{normalize_name, DomainPatterns};
use crate::input::DataTable;
use crate::schema::Domain;

/// Weight of a header match relative to a value match.
const HEADER_WEIGHT: usize = 2;

/// How strongly a table matched one domain's dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: Domain,
    /// Columns whose normalized name contains a header keyword.
    pub header_matches: usize,
    /// Sampled cells containing a value keyword.
    pub value_matches: usize,
}

impl DomainScore {
    pub fn score(&self) -> usize {
        HEADER_WEIGHT * self.header_matches + self.value_matches
    }
}

/// Scores a table against the configured dictionaries.
pub struct DomainClassifier {
    patterns: DomainPatterns,
}

impl DomainClassifier {
    /// Create a classifier over the built-in dictionaries.
    pub fn new() -> Self {
        Self::with_patterns(DomainPatterns::default())
    }

    /// Create a classifier over caller-supplied dictionaries.
    pub fn with_patterns(patterns: DomainPatterns) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &DomainPatterns {
        &self.patterns
    }

    /// Score every registered domain, in registration order.
    pub fn score(&self, table: &DataTable) -> Vec<DomainScore> {
        let headers: Vec<String> = table.headers.iter().map(|h| normalize_name(h)).collect();

        let sample: Vec<String> = table
            .text_columns()
            .into_iter()
            .flat_map(|col| {
                table
                    .column_values(col)
                    .take(self.patterns.sample_rows)
                    .filter_map(|v| v.display_value())
                    .map(|v| v.to_lowercase())
            })
            .collect();

        self.patterns
            .patterns
            .iter()
            .map(|pattern| DomainScore {
                domain: pattern.domain,
                header_matches: headers.iter().filter(|h| pattern.matches_header(h)).count(),
                value_matches: sample.iter().filter(|v| pattern.matches_value(v)).count(),
            })
            .collect()
    }

    /// Pick the best-scoring domain, or [`Domain::General`] when nothing matched.
    ///
    /// Ties go to the domain registered first.
    pub fn detect(&self, table: &DataTable) -> Domain {
        let scores = self.score(table);

        // `max_by_key` keeps the last maximum, so fold to keep the first.
        let best = scores.iter().fold(None::<&DomainScore>, |best, candidate| match best {
            Some(b) if b.score() >= candidate.score() => Some(b),
            _ => Some(candidate),
        });

        let domain = match best {
            Some(b) if b.score() > 0 => b.domain,
            _ => Domain::General,
        };

        tracing::debug!(
            %domain,
            scores = ?scores.iter().map(|s| (s.domain, s.score())).collect::<Vec<_>>(),
            "classified table domain"
        );

        domain
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new()
    }
}
