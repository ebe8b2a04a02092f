//! Validation of a table against its inferred schema.

pub mod quality;
mod report;
mod rules;
mod validator;

pub use report::{
    QualityGrade, QualityReport, QualityScores, QualityWeights, Severity, ValidationError,
    ValidationErrorKind,
};
pub use rules::{
    default_rules, CategoricalRule, FieldRule, Finding, MinimumRule, NumericRule, RequiredRule,
};
pub use validator::DataValidator;
