//! Core type definitions for schema representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TabsenseError;

/// Subject-matter category of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Surgical and oncology records.
    Surgery,
    /// Resource, scheduling and supply records.
    Logistics,
    /// Claims, policies and coverage records.
    Insurance,
    /// Fallback when no dictionary matches.
    General,
}

impl Domain {
    /// Lowercase name used in hints and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Surgery => "surgery",
            Domain::Logistics => "logistics",
            Domain::Insurance => "insurance",
            Domain::General => "general",
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::General
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = TabsenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surgery" => Ok(Domain::Surgery),
            "logistics" => Ok(Domain::Logistics),
            "insurance" => Ok(Domain::Insurance),
            "general" => Ok(Domain::General),
            _ => Err(TabsenseError::UnknownDomain(s.to_string())),
        }
    }
}

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Row or entity identifier.
    Identifier,
    /// Date or timestamp.
    Date,
    /// Clinical coding (ICD, CPT, staging, histology).
    MedicalCode,
    /// Every non-null value is a number.
    Numeric,
    /// Low-cardinality discrete values.
    Categorical,
    /// Free text, or nothing to reason about.
    Text,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Identifier => "identifier",
            FieldType::Date => "date",
            FieldType::MedicalCode => "medical_code",
            FieldType::Numeric => "numeric",
            FieldType::Categorical => "categorical",
            FieldType::Text => "text",
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
