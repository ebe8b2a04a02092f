//! Per-column schema definition.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::FieldType;

/// Constraints learned from a column's observed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConstraints {
    /// Nothing to check beyond the field type.
    None,
    /// Observed numeric bounds; both absent when the column held no numbers.
    Range { min: Option<f64>, max: Option<f64> },
    /// Every distinct observed value, in order of first appearance.
    AllowedValues { allowed_values: IndexSet<String> },
}

impl FieldConstraints {
    pub fn min(&self) -> Option<f64> {
        match self {
            FieldConstraints::Range { min, .. } => *min,
            _ => None,
        }
    }

    pub fn max(&self) -> Option<f64> {
        match self {
            FieldConstraints::Range { max, .. } => *max,
            _ => None,
        }
    }

    pub fn allowed_values(&self) -> Option<&IndexSet<String>> {
        match self {
            FieldConstraints::AllowedValues { allowed_values } => Some(allowed_values),
            _ => None,
        }
    }
}

impl Default for FieldConstraints {
    fn default() -> Self {
        FieldConstraints::None
    }
}

/// Schema for a single column.
///
/// Built once from a column and never mutated; the `with_*` helpers return a
/// new value for callers that override an inferred decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Column name.
    pub name: String,
    /// Inferred semantic type.
    pub field_type: FieldType,
    /// Whether nulls are treated as errors.
    pub is_required: bool,
    /// Learned value constraints.
    #[serde(default)]
    pub constraints: FieldConstraints,
    /// Domain-specific annotations, e.g. the code system of a medical code.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub domain_specific: IndexMap<String, Value>,
}

impl FieldSchema {
    /// Create an optional, unconstrained field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            is_required: false,
            constraints: FieldConstraints::None,
            domain_specific: IndexMap::new(),
        }
    }

    /// Copy of this field with a different required flag.
    pub fn with_required(&self, is_required: bool) -> Self {
        Self {
            is_required,
            ..self.clone()
        }
    }

    /// Copy of this field with different constraints.
    pub fn with_constraints(&self, constraints: FieldConstraints) -> Self {
        Self {
            constraints,
            ..self.clone()
        }
    }

    /// Copy of this field with one more domain-specific annotation.
    pub fn with_annotation(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut domain_specific = self.domain_specific.clone();
        domain_specific.insert(key.into(), value.into());
        Self {
            domain_specific,
            ..self.clone()
        }
    }
}
