/// CatalogView Schema and Records
///
/// A `Schema` is the declarative column-descriptor table consumed by the view
/// pipeline. A `Record` is one immutable catalog entity: a mapping from column key
/// to value. The pipeline never mutates records; derived views borrow them.
///
/// # Examples
///
/// ```
/// use catalogview::{ColumnDescriptor, ColumnType, ColumnValue, Record, Schema};
///
/// let schema = Schema::new(vec![
///     ColumnDescriptor::new("name", ColumnType::String),
///     ColumnDescriptor::new("stock", ColumnType::Int32),
/// ]);
///
/// let record = Record::new()
///     .with("name", "Alpha")
///     .with("stock", 5);
///
/// assert_eq!(schema.get_column_index("stock"), Some(1));
/// assert_eq!(record.get("name").and_then(|v| v.as_string()), Some("Alpha"));
/// assert_eq!(record.get("missing"), None);
/// ```

use crate::column::{ColumnDescriptor, ColumnType, ColumnValue};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Column descriptor table, in display order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: Vec<ColumnDescriptor>,
}

impl Schema {
    /// Creates a new schema with the specified columns.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Schema { columns }
    }

    /// Returns the number of columns in the schema.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Returns a list of all column keys.
    pub fn get_column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// Returns the index of a column by key, or None if not found.
    pub fn get_column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Returns the descriptor of a column by key, or None if not found.
    pub fn get_column(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Columns the global search looks at.
    pub fn global_filter_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.global_filter)
    }

    /// Converts a JSON object into a record, typing each field by its column.
    ///
    /// Fields that are absent from the object, or whose JSON type does not fit the
    /// column, are left out of the record; the pipeline treats them as missing.
    /// Fields not named by the schema are ignored.
    pub fn record_from_json(&self, object: &JsonValue) -> Result<Record, String> {
        let map = object
            .as_object()
            .ok_or_else(|| format!("Expected a JSON object, got {}", object))?;

        let mut fields = HashMap::with_capacity(self.columns.len());
        for column in &self.columns {
            if let Some(value) = map.get(&column.key).and_then(|v| json_to_column_value(v, &column.column_type)) {
                fields.insert(column.key.clone(), value);
            }
        }
        Ok(Record { fields })
    }
}

/// One immutable catalog entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, ColumnValue>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Builder-style field assignment, used while constructing a record.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ColumnValue> {
        self.fields.get(key)
    }

    /// Value of a column, with missing fields reported as `Null`.
    pub fn value_or_null(&self, key: &str) -> &ColumnValue {
        const NULL: &ColumnValue = &ColumnValue::Null;
        self.fields.get(key).unwrap_or(NULL)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ColumnValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, ColumnValue)>>(iter: I) -> Self {
        Record { fields: iter.into_iter().collect() }
    }
}

fn json_to_column_value(value: &JsonValue, column_type: &ColumnType) -> Option<ColumnValue> {
    if value.is_null() {
        return Some(ColumnValue::Null);
    }
    match column_type {
        ColumnType::Int32 => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(ColumnValue::Int32),
        ColumnType::Int64 => value.as_i64().map(ColumnValue::Int64),
        ColumnType::Float64 => value.as_f64().map(ColumnValue::Float64),
        ColumnType::String => value.as_str().map(|s| ColumnValue::String(s.to_string())),
        ColumnType::Bool => value.as_bool().map(ColumnValue::Bool),
        ColumnType::Enum(_) => {
            let label = value.as_str()?;
            let ordinal = column_type.enum_ordinal(label)?;
            Some(ColumnValue::Enum { ordinal, label: label.to_string() })
        }
        ColumnType::List => value.as_array().map(|items| {
            ColumnValue::List(items.iter().filter_map(json_scalar).collect())
        }),
    }
}

fn json_scalar(value: &JsonValue) -> Option<ColumnValue> {
    match value {
        JsonValue::Bool(b) => Some(ColumnValue::Bool(*b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(ColumnValue::Int64)
            .or_else(|| n.as_f64().map(ColumnValue::Float64)),
        JsonValue::String(s) => Some(ColumnValue::String(s.clone())),
        _ => None,
    }
}

/// JSON form of a value, used when exporting rows to a renderer.
pub(crate) fn column_value_to_json(value: &ColumnValue) -> JsonValue {
    match value {
        ColumnValue::Int32(n) => JsonValue::Number((*n).into()),
        ColumnValue::Int64(n) => JsonValue::Number((*n).into()),
        ColumnValue::Float64(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        ColumnValue::String(s) => JsonValue::String(s.clone()),
        ColumnValue::Bool(b) => JsonValue::Bool(*b),
        ColumnValue::Enum { label, .. } => JsonValue::String(label.clone()),
        ColumnValue::List(items) => JsonValue::Array(items.iter().map(column_value_to_json).collect()),
        ColumnValue::Null => JsonValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new(vec![
            ColumnDescriptor::new("name", ColumnType::String),
            ColumnDescriptor::new(
                "status",
                ColumnType::Enum(vec!["ACTIVE".into(), "DRAFT".into(), "ARCHIVE".into()]),
            ),
            ColumnDescriptor::new("stock", ColumnType::Int32),
            ColumnDescriptor::new("images", ColumnType::List),
        ])
    }

    #[test]
    fn test_schema_lookup() {
        let schema = schema();
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.get_column_names(), vec!["name", "status", "stock", "images"]);
        assert_eq!(schema.get_column_index("status"), Some(1));
        assert!(schema.get_column("nonexistent").is_none());

        let global: Vec<&str> = schema.global_filter_columns().map(|c| c.key.as_str()).collect();
        assert_eq!(global, vec!["name", "status", "stock"]);
    }

    #[test]
    fn test_record_from_json() {
        let record = schema()
            .record_from_json(&json!({
                "name": "Ergonomic Chair",
                "status": "DRAFT",
                "stock": 12,
                "images": ["a.png", "b.png"],
                "unrelated": true
            }))
            .unwrap();

        assert_eq!(record.len(), 4);
        assert_eq!(record.get("status"), Some(&ColumnValue::Enum { ordinal: 1, label: "DRAFT".into() }));
        assert_eq!(record.get("stock").and_then(|v| v.as_i32()), Some(12));
        assert!(record.get("unrelated").is_none());
    }

    #[test]
    fn test_record_from_json_drops_mistyped_fields() {
        let record = schema()
            .record_from_json(&json!({ "name": 7, "status": "DELETED", "stock": "many" }))
            .unwrap();
        assert!(record.is_empty());
        assert!(record.value_or_null("name").is_null());
    }

    #[test]
    fn test_record_from_json_rejects_non_objects() {
        assert!(schema().record_from_json(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_column_value_to_json() {
        let status = ColumnValue::Enum { ordinal: 0, label: "ACTIVE".into() };
        assert_eq!(column_value_to_json(&status), json!("ACTIVE"));
        assert_eq!(column_value_to_json(&ColumnValue::Int32(599)), json!(599));
        assert_eq!(
            column_value_to_json(&ColumnValue::List(vec!["x".into()])),
            json!(["x"])
        );
    }
}
