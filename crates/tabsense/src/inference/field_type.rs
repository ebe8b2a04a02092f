//! Semantic type inference for a single column.

use std::collections::HashSet;

use crate::domain::normalize_name;
use crate::input::CellValue;
use crate::schema::{Domain, FieldType};

const IDENTIFIER_TERMS: &[&str] = &["id", "uuid", "key"];
const DATE_TERMS: &[&str] = &["date", "time", "created", "updated"];
const MEDICAL_CODE_TERMS: &[&str] = &["icd", "cpt", "stage", "histology"];

/// Decides a column's [`FieldType`] from its name, then from its values.
///
/// Name conventions are checked first (identifier, date, medical code); only
/// when none applies are the values inspected.
#[derive(Debug, Clone)]
pub struct FieldTypeInferrer {
    /// Unique/non-null ratio below which a column is categorical.
    categorical_ratio: f64,
}

impl FieldTypeInferrer {
    pub fn new() -> Self {
        Self {
            categorical_ratio: 0.1,
        }
    }

    pub fn with_categorical_ratio(mut self, ratio: f64) -> Self {
        self.categorical_ratio = ratio;
        self
    }

    /// Infer the type of the column `name` holding `values`.
    pub fn infer<'a, I>(&self, name: &str, values: I, domain: Domain) -> FieldType
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let normalized = normalize_name(name);

        if contains_any(&normalized, IDENTIFIER_TERMS) {
            return FieldType::Identifier;
        }
        if contains_any(&normalized, DATE_TERMS) {
            return FieldType::Date;
        }
        if medical_code_system(name, domain).is_some() {
            return FieldType::MedicalCode;
        }

        let non_null: Vec<&CellValue> = values.into_iter().filter(|v| !v.is_null()).collect();
        if non_null.is_empty() {
            return FieldType::Text;
        }

        if non_null.iter().all(|v| matches!(v, CellValue::Number(_))) {
            return FieldType::Numeric;
        }

        let unique: HashSet<&CellValue> = non_null.iter().copied().collect();
        let unique_ratio = unique.len() as f64 / non_null.len() as f64;
        if unique_ratio < self.categorical_ratio {
            FieldType::Categorical
        } else {
            FieldType::Text
        }
    }
}

impl Default for FieldTypeInferrer {
    fn default() -> Self {
        Self::new()
    }
}

/// The clinical code system a column name refers to, for surgery data only.
pub fn medical_code_system(name: &str, domain: Domain) -> Option<&'static str> {
    if domain != Domain::Surgery {
        return None;
    }
    let normalized = normalize_name(name);
    MEDICAL_CODE_TERMS
        .iter()
        .copied()
        .find(|term| normalized.contains(*term))
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(*t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<CellValue> {
        raw.iter().map(|v| CellValue::parse(v)).collect()
    }

    fn infer(name: &str, raw: &[&str], domain: Domain) -> FieldType {
        FieldTypeInferrer::new().infer(name, &cells(raw), domain)
    }

    #[test]
    fn test_name_precedence() {
        assert_eq!(infer("Patient ID", &["1", "2"], Domain::General), FieldType::Identifier);
        assert_eq!(infer("record_uuid", &["a"], Domain::General), FieldType::Identifier);
        assert_eq!(infer("admission_date", &["2024-01-01"], Domain::General), FieldType::Date);
        assert_eq!(infer("Updated At", &["x"], Domain::General), FieldType::Date);
        // Identifier wins over date when both match.
        assert_eq!(infer("date_key", &["x"], Domain::General), FieldType::Identifier);
    }

    #[test]
    fn test_medical_code_only_for_surgery() {
        assert_eq!(infer("tumor_stage", &["II", "III"], Domain::Surgery), FieldType::MedicalCode);
        assert_eq!(infer("icd10", &["C18.7"], Domain::Surgery), FieldType::MedicalCode);
        assert_ne!(infer("tumor_stage", &["II", "III"], Domain::Insurance), FieldType::MedicalCode);
        assert_eq!(medical_code_system("Histology Grade", Domain::Surgery), Some("histology"));
        assert_eq!(medical_code_system("icd", Domain::General), None);
    }

    #[test]
    fn test_numeric() {
        assert_eq!(infer("score", &["1", "2", "3", "4", "5"], Domain::General), FieldType::Numeric);
        assert_eq!(infer("score", &["1.5", "NA", "-3"], Domain::General), FieldType::Numeric);
        assert_eq!(infer("score", &["1", "two"], Domain::General), FieldType::Text);
    }

    #[test]
    fn test_all_null_is_text() {
        assert_eq!(infer("notes", &["", "NA", "null"], Domain::General), FieldType::Text);
        assert_eq!(infer("notes", &[], Domain::General), FieldType::Text);
    }

    #[test]
    fn test_categorical_threshold() {
        let nine: Vec<String> = (0..100).map(|i| format!("grade_{}", i % 9)).collect();
        let nine: Vec<&str> = nine.iter().map(String::as_str).collect();
        assert_eq!(infer("grade", &nine, Domain::General), FieldType::Categorical);

        let eleven: Vec<String> = (0..100).map(|i| format!("grade_{}", i % 11)).collect();
        let eleven: Vec<&str> = eleven.iter().map(String::as_str).collect();
        assert_eq!(infer("grade", &eleven, Domain::General), FieldType::Text);
    }

    #[test]
    fn test_custom_ratio() {
        let inferrer = FieldTypeInferrer::new().with_categorical_ratio(0.5);
        let values = cells(&["a", "b", "a", "b", "a"]);
        assert_eq!(inferrer.infer("letter", &values, Domain::General), FieldType::Categorical);
    }
}
