//! Domain classification from header and value keywords.

mod classifier;
mod patterns;

pub use classifier::{DomainClassifier, DomainScore};
pub use patterns::{normalize_name, DomainPattern, DomainPatterns};
