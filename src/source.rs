/// CatalogView Record Sources
///
/// The engine does not fetch or persist anything. A host obtains the snapshot from a
/// `RecordSource` and hands it to a `ViewController`. Category names only feed the
/// option list of the category select filter; nothing here validates records against
/// them.

use crate::error::FetchError;
use crate::table::{Record, Schema};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::path::Path;

pub trait RecordSource {
    /// The ordered snapshot the pipeline runs over.
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError>;

    fn fetch_category_names(&self) -> Result<BTreeSet<String>, FetchError>;
}

/// Source backed by a JSON export of the store:
///
/// ```json
/// { "products": [ { "name": "...", ... } ], "categories": [ { "name": "Electronics" } ] }
/// ```
///
/// Categories may also be plain strings.
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    schema: Schema,
    document: JsonValue,
}

impl JsonRecordSource {
    pub fn new(schema: Schema, document: JsonValue) -> Self {
        JsonRecordSource { schema, document }
    }

    pub fn from_json_str(schema: Schema, json: &str) -> Result<Self, FetchError> {
        Ok(Self::new(schema, serde_json::from_str(json)?))
    }

    pub fn from_path(schema: Schema, path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(schema, &text)
    }

    fn array(&self, key: &str) -> Result<&[JsonValue], FetchError> {
        match self.document.get(key) {
            Some(JsonValue::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(FetchError::Unavailable(format!("'{}' is not an array", key))),
            None => Err(FetchError::Unavailable(format!("missing '{}'", key))),
        }
    }
}

impl RecordSource for JsonRecordSource {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        self.array("products")?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.schema
                    .record_from_json(item)
                    .map_err(|message| FetchError::InvalidRecord { index, message })
            })
            .collect()
    }

    fn fetch_category_names(&self) -> Result<BTreeSet<String>, FetchError> {
        Ok(self
            .array("categories")?
            .iter()
            .filter_map(|c| match c {
                JsonValue::String(name) => Some(name.clone()),
                other => other.get("name").and_then(|n| n.as_str()).map(str::to_string),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product_schema;

    const STORE: &str = r#"{
        "products": [
            { "name": "Sleek Lamp", "status": "ACTIVE", "priceCents": 2599, "stock": 3,
              "categoryName": "Furnitures", "description": "Warm light", "sku": "A-1", "images": [] },
            { "name": "Brake Pads", "status": "DRAFT", "priceCents": 8900, "stock": 0,
              "categoryName": "Auto Parts", "description": "Ceramic", "sku": "B-2", "images": ["p.png"] }
        ],
        "categories": [ { "name": "Electronics" }, { "name": "Auto Parts" }, "Furnitures" ]
    }"#;

    #[test]
    fn test_fetch_records() {
        let source = JsonRecordSource::from_json_str(product_schema(), STORE).unwrap();
        let records = source.fetch_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("name").and_then(|v| v.as_string()), Some("Brake Pads"));
        assert_eq!(records[1].get("stock").and_then(|v| v.as_i32()), Some(0));
    }

    #[test]
    fn test_fetch_category_names() {
        let source = JsonRecordSource::from_json_str(product_schema(), STORE).unwrap();
        let names: Vec<String> = source.fetch_category_names().unwrap().into_iter().collect();
        assert_eq!(names, vec!["Auto Parts", "Electronics", "Furnitures"]);
    }

    #[test]
    fn test_fetch_errors() {
        assert!(matches!(
            JsonRecordSource::from_json_str(product_schema(), "{not json"),
            Err(FetchError::Json(_))
        ));

        let source = JsonRecordSource::from_json_str(product_schema(), r#"{"products": [1]}"#).unwrap();
        assert!(matches!(source.fetch_records(), Err(FetchError::InvalidRecord { index: 0, .. })));
        assert!(matches!(source.fetch_category_names(), Err(FetchError::Unavailable(_))));

        assert!(matches!(
            JsonRecordSource::from_path(product_schema(), "/nonexistent/catalog.json"),
            Err(FetchError::Io(_))
        ));
    }
}
