//! Keyword dictionaries used to recognize a dataset's domain.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::Domain;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("static regex"));

/// Lowercase a column name and replace whitespace with underscores.
///
/// Both the domain classifier and the field type inferrer match keywords
/// against this form.
pub fn normalize_name(name: &str) -> String {
    WHITESPACE.replace_all(&name.to_lowercase(), "_").into_owned()
}

/// Keywords characteristic of one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainPattern {
    pub domain: Domain,
    /// Substrings looked for in normalized column names.
    pub header_keywords: Vec<String>,
    /// Substrings looked for in lowercased cell values.
    pub value_keywords: Vec<String>,
}

impl DomainPattern {
    pub fn new<H, V>(domain: Domain, header_keywords: H, value_keywords: V) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let lower = |s: &str| s.to_lowercase();
        Self {
            domain,
            header_keywords: header_keywords.into_iter().map(|k| lower(k.as_ref())).collect(),
            value_keywords: value_keywords.into_iter().map(|k| lower(k.as_ref())).collect(),
        }
    }

    pub fn matches_header(&self, normalized_header: &str) -> bool {
        self.header_keywords
            .iter()
            .any(|k| normalized_header.contains(k.as_str()))
    }

    pub fn matches_value(&self, lowercase_value: &str) -> bool {
        self.value_keywords
            .iter()
            .any(|k| lowercase_value.contains(k.as_str()))
    }
}

/// The full set of dictionaries handed to a classifier.
///
/// Order matters: on equal scores the earlier-registered domain wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainPatterns {
    pub patterns: Vec<DomainPattern>,
    /// How many leading rows of each text column are sampled for values.
    pub sample_rows: usize,
}

impl DomainPatterns {
    /// Dictionaries with no entries; every table classifies as general.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            sample_rows: 100,
        }
    }

    /// Register another domain's dictionary after the existing ones.
    pub fn with_pattern(mut self, pattern: DomainPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn with_sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }

    pub fn get(&self, domain: Domain) -> Option<&DomainPattern> {
        self.patterns.iter().find(|p| p.domain == domain)
    }
}

impl Default for DomainPatterns {
    fn default() -> Self {
        Self::empty()
            .with_pattern(surgery_pattern())
            .with_pattern(logistics_pattern())
            .with_pattern(insurance_pattern())
    }
}

fn surgery_pattern() -> DomainPattern {
    DomainPattern::new(
        Domain::Surgery,
        [
            "patient_id", "patient", "surgery", "procedure", "operation", "diagnosis",
            "complication", "outcome", "mortality", "morbidity", "stage", "histology",
            "tumor", "cancer", "treatment", "therapy", "hospital", "surgeon", "age",
            "gender", "bmi", "ast", "operative_time",
        ],
        [
            "IA", "IB", "II", "III", "IV", "T1", "T2", "T3", "T4", "N0", "N1", "M0", "M1",
        ],
    )
}

fn logistics_pattern() -> DomainPattern {
    DomainPattern::new(
        Domain::Logistics,
        [
            "resource", "allocation", "capacity", "utilization", "workflow", "efficiency",
            "throughput", "bottleneck", "delay", "schedule", "inventory", "supply", "demand",
            "cost", "budget", "roi",
        ],
        ["available", "allocated", "in_use", "maintenance", "scheduled"],
    )
}

fn insurance_pattern() -> DomainPattern {
    DomainPattern::new(
        Domain::Insurance,
        [
            "claim", "policy", "premium", "coverage", "deductible", "copay", "risk", "fraud",
            "underwriting", "actuarial", "loss_ratio", "member", "provider", "network",
            "authorization", "denial",
        ],
        ["approved", "denied", "pending", "in_network", "out_network"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Patient ID"), "patient_id");
        assert_eq!(normalize_name("Operative\tTime"), "operative_time");
        assert_eq!(normalize_name("cost"), "cost");
    }

    #[test]
    fn test_default_registration_order() {
        let domains: Vec<Domain> = DomainPatterns::default()
            .patterns
            .iter()
            .map(|p| p.domain)
            .collect();
        assert_eq!(domains, vec![Domain::Surgery, Domain::Logistics, Domain::Insurance]);
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let patterns = DomainPatterns::default();
        let surgery = patterns.get(Domain::Surgery).unwrap();
        assert!(surgery.value_keywords.contains(&"t3".to_string()));
        assert!(surgery.matches_value("pt3n1"));
        assert!(surgery.matches_header("tumor_stage"));
        assert!(!surgery.matches_header("zip"));
    }
}
