//! Dataset-level schema definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::FieldSchema;
use super::types::Domain;

/// Inferred schema for a whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Domain the table was classified into (or hinted as).
    pub domain: Domain,
    /// One field per column, in source column order.
    pub fields: Vec<FieldSchema>,
    /// Number of fields.
    pub total_fields: usize,
    /// When the schema was inferred.
    pub detected_at: DateTime<Utc>,
}

impl DataSchema {
    pub fn new(domain: Domain, fields: Vec<FieldSchema>, detected_at: DateTime<Utc>) -> Self {
        Self {
            domain,
            total_fields: fields.len(),
            fields,
            detected_at,
        }
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Copy of this schema with `field` replacing the field of the same name,
    /// or appended when no such field exists.
    pub fn with_field(&self, field: FieldSchema) -> Self {
        let mut fields = self.fields.clone();
        match fields.iter().position(|f| f.name == field.name) {
            Some(i) => fields[i] = field,
            None => fields.push(field),
        }
        Self::new(self.domain, fields, self.detected_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn sample_schema() -> DataSchema {
        DataSchema::new(
            Domain::Surgery,
            vec![
                FieldSchema::new("patient_id", FieldType::Identifier),
                FieldSchema::new("age", FieldType::Numeric),
            ],
            Utc::now(),
        )
    }

    #[test]
    fn test_lookup() {
        let schema = sample_schema();
        assert_eq!(schema.total_fields, 2);
        assert_eq!(schema.field("age").map(|f| f.field_type), Some(FieldType::Numeric));
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_with_field_replaces_in_place() {
        let schema = sample_schema();
        let overridden = schema.with_field(schema.fields[0].with_required(true));

        assert!(!schema.fields[0].is_required);
        assert!(overridden.fields[0].is_required);
        assert_eq!(overridden.total_fields, 2);

        let extended = schema.with_field(FieldSchema::new("stage", FieldType::MedicalCode));
        assert_eq!(extended.total_fields, 3);
        assert_eq!(extended.fields[2].name, "stage");
    }
}
