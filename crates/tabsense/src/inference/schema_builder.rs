//! Assembles per-column type decisions into a dataset schema.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;

use super::field_type::{medical_code_system, FieldTypeInferrer};
use crate::input::DataTable;
use crate::schema::{DataSchema, Domain, FieldConstraints, FieldSchema, FieldType};

/// Learns a descriptive [`DataSchema`] from a table sample.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    inferrer: FieldTypeInferrer,
    /// Null fraction below which a field is marked required.
    required_null_fraction: f64,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            inferrer: FieldTypeInferrer::new(),
            required_null_fraction: 0.1,
        }
    }

    pub fn with_inferrer(mut self, inferrer: FieldTypeInferrer) -> Self {
        self.inferrer = inferrer;
        self
    }

    pub fn with_required_null_fraction(mut self, fraction: f64) -> Self {
        self.required_null_fraction = fraction;
        self
    }

    /// Build the schema for `table` as classified into `domain`.
    pub fn build(&self, table: &DataTable, domain: Domain) -> DataSchema {
        self.build_at(table, domain, Utc::now())
    }

    /// Build the schema with an explicit detection timestamp.
    pub fn build_at(&self, table: &DataTable, domain: Domain, now: DateTime<Utc>) -> DataSchema {
        let fields = (0..table.column_count())
            .map(|col| self.build_field(table, col, domain))
            .collect();
        DataSchema::new(domain, fields, now)
    }

    fn build_field(&self, table: &DataTable, col: usize, domain: Domain) -> FieldSchema {
        let name = table.headers[col].as_str();
        let field_type = self.inferrer.infer(name, table.column_values(col), domain);

        // An empty column has nothing observed, so it is treated as fully null.
        let null_fraction = if table.row_count() == 0 {
            1.0
        } else {
            table.null_count(col) as f64 / table.row_count() as f64
        };
        let is_required = null_fraction < self.required_null_fraction;

        let constraints = match field_type {
            FieldType::Numeric => {
                let numbers = table.numbers(col);
                FieldConstraints::Range {
                    min: numbers.iter().copied().reduce(f64::min),
                    max: numbers.iter().copied().reduce(f64::max),
                }
            }
            FieldType::Categorical => FieldConstraints::AllowedValues {
                allowed_values: table
                    .column_values(col)
                    .filter_map(|v| v.display_value())
                    .collect::<IndexSet<String>>(),
            },
            _ => FieldConstraints::None,
        };

        tracing::trace!(field = name, %field_type, is_required, "inferred field");

        let field = FieldSchema::new(name, field_type)
            .with_required(is_required)
            .with_constraints(constraints);

        match (field_type, medical_code_system(name, domain)) {
            (FieldType::MedicalCode, Some(system)) => field.with_annotation("code_system", system),
            _ => field,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::from_records(headers.into_iter().map(String::from).collect(), rows)
    }

    #[test]
    fn test_numeric_range() {
        let table = make_table(
            vec!["score"],
            vec![vec!["3"], vec!["1"], vec!["5"], vec!["2"], vec!["4"]],
        );
        let schema = SchemaBuilder::new().build(&table, Domain::General);
        let field = &schema.fields[0];

        assert_eq!(field.field_type, FieldType::Numeric);
        assert_eq!(
            field.constraints,
            FieldConstraints::Range {
                min: Some(1.0),
                max: Some(5.0)
            }
        );
        assert!(field.is_required);
    }

    #[test]
    fn test_categorical_allowed_values_keep_first_seen_order() {
        let rows: Vec<Vec<&str>> = (0..40)
            .map(|i| vec![["low", "high", "mid"][i % 3]])
            .collect();
        let table = make_table(vec!["priority"], rows);
        let schema = SchemaBuilder::new().build(&table, Domain::General);

        let allowed: Vec<&str> = schema.fields[0]
            .constraints
            .allowed_values()
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(allowed, vec!["low", "high", "mid"]);
    }

    #[test]
    fn test_required_threshold() {
        let mut rows: Vec<Vec<String>> = (0..20).map(|i| vec![format!("P{:03}", i)]).collect();
        let table = DataTable::from_records(vec!["patient_id".to_string()], rows.clone());
        let schema = SchemaBuilder::new().build(&table, Domain::Surgery);
        assert!(schema.fields[0].is_required);

        // 3 of 20 nulls is 15%.
        for row in rows.iter_mut().take(3) {
            row[0] = String::new();
        }
        let table = DataTable::from_records(vec!["patient_id".to_string()], rows);
        let schema = SchemaBuilder::new().build(&table, Domain::Surgery);
        assert!(!schema.fields[0].is_required);
    }

    #[test]
    fn test_field_order_and_annotations() {
        let table = make_table(
            vec!["patient_id", "icd_code", "notes"],
            vec![vec!["P1", "C18.7", "stable"], vec!["P2", "C34.1", "discharged"]],
        );
        let schema = SchemaBuilder::new().build(&table, Domain::Surgery);

        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["patient_id", "icd_code", "notes"]);
        assert_eq!(schema.total_fields, 3);
        assert_eq!(schema.fields[1].field_type, FieldType::MedicalCode);
        assert_eq!(schema.fields[1].domain_specific["code_system"], "icd");
        assert!(schema.fields[0].domain_specific.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = make_table(vec!["a", "b"], vec![]);
        let schema = SchemaBuilder::new().build(&table, Domain::General);

        assert_eq!(schema.total_fields, 2);
        assert!(schema.fields.iter().all(|f| f.field_type == FieldType::Text));
        assert!(schema.fields.iter().all(|f| !f.is_required));
    }
}
