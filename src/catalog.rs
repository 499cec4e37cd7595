/// Product Catalog Columns
///
/// The column table and record model of the product admin dashboard. Products are
/// listed with an image strip, name, status badge, price in cents, stock, category,
/// description and SKU.
///
/// # Examples
///
/// ```
/// use catalogview::catalog::{product_schema, Product, ProductStatus};
///
/// let product = Product {
///     id: Some(1),
///     sku: "978-1-234".into(),
///     name: "Ergonomic Chair".into(),
///     description: "Adjustable office chair".into(),
///     price_cents: 12999,
///     category_name: "Furnitures".into(),
///     stock: 4,
///     on_stock: true,
///     images: vec!["chair.png".into()],
///     status: ProductStatus::Draft,
///     keywords: vec!["comfortable".into()],
/// };
///
/// let record = product.into_record();
/// assert_eq!(record.get("status").and_then(|v| v.as_string()), Some("DRAFT"));
/// assert!(product_schema().get_column("categoryName").is_some());
/// ```

use crate::column::{ColumnDescriptor, ColumnType, ColumnValue, FilterVariant};
use crate::table::{Record, Schema};
use serde::{Deserialize, Serialize};

/// Product lifecycle status, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Active,
    Draft,
    Archive,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [ProductStatus::Active, ProductStatus::Draft, ProductStatus::Archive];

    pub fn label(self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Draft => "DRAFT",
            ProductStatus::Archive => "ARCHIVE",
        }
    }

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn column_type() -> ColumnType {
        ColumnType::Enum(Self::ALL.iter().map(|s| s.label().to_string()).collect())
    }
}

impl From<ProductStatus> for ColumnValue {
    fn from(status: ProductStatus) -> Self {
        ColumnValue::Enum {
            ordinal: status.ordinal(),
            label: status.label().to_string(),
        }
    }
}

/// A product as the record store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category_name: String,
    pub stock: i32,
    #[serde(default)]
    pub on_stock: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: ProductStatus,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Product {
    pub fn into_record(self) -> Record {
        let list = |items: Vec<String>| ColumnValue::List(items.into_iter().map(ColumnValue::String).collect());
        let id = self.id.map(ColumnValue::Int64).unwrap_or(ColumnValue::Null);

        Record::new()
            .with("id", id)
            .with("sku", self.sku)
            .with("name", self.name)
            .with("description", self.description)
            .with("priceCents", self.price_cents)
            .with("categoryName", self.category_name)
            .with("stock", self.stock)
            .with("onStock", self.on_stock)
            .with("images", list(self.images))
            .with("status", self.status)
            .with("keywords", list(self.keywords))
    }
}

/// Column table of the product list, in display order.
pub fn product_schema() -> Schema {
    Schema::new(vec![
        ColumnDescriptor::new("images", ColumnType::List)
            .with_sorting(false)
            .with_column_filter(false),
        ColumnDescriptor::new("name", ColumnType::String),
        ColumnDescriptor::new("status", ProductStatus::column_type()),
        ColumnDescriptor::new("priceCents", ColumnType::Int64),
        ColumnDescriptor::new("stock", ColumnType::Int32),
        ColumnDescriptor::new("categoryName", ColumnType::String).with_filter_variant(FilterVariant::Select),
        ColumnDescriptor::new("description", ColumnType::String)
            .with_global_filter(false)
            .with_sorting(false),
        ColumnDescriptor::new("sku", ColumnType::String),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_from_store_json() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "sku": "978-0-13-110362-7",
            "name": "Handcrafted Steel Towels",
            "description": "Soft and absorbent",
            "priceCents": 4599,
            "categoryName": "Fashions",
            "stock": 0,
            "onStock": false,
            "images": ["https://example.com/a.jpg"],
            "status": "ARCHIVE",
            "keywords": ["Soft"]
        }))
        .unwrap();

        assert_eq!(product.status, ProductStatus::Archive);
        let record = product.into_record();
        assert_eq!(record.get("priceCents"), Some(&ColumnValue::Int64(4599)));
        assert_eq!(record.get("status"), Some(&ColumnValue::Enum { ordinal: 2, label: "ARCHIVE".into() }));
        assert_eq!(record.get("id"), Some(&ColumnValue::Int64(7)));
    }

    #[test]
    fn test_product_schema_matches_dashboard_columns() {
        let schema = product_schema();
        assert_eq!(
            schema.get_column_names(),
            vec!["images", "name", "status", "priceCents", "stock", "categoryName", "description", "sku"]
        );

        let global: Vec<&str> = schema.global_filter_columns().map(|c| c.key.as_str()).collect();
        assert_eq!(global, vec!["name", "status", "priceCents", "stock", "categoryName", "sku"]);

        let images = schema.get_column("images").unwrap();
        assert!(!images.sortable && !images.filterable);
        assert_eq!(
            schema.get_column("categoryName").unwrap().effective_filter_variant(),
            FilterVariant::Select
        );
    }

    #[test]
    fn test_status_order() {
        assert!(ProductStatus::Active < ProductStatus::Draft);
        assert_eq!(ProductStatus::Archive.ordinal(), 2);
        assert_eq!(ProductStatus::column_type().enum_ordinal("DRAFT"), Some(1));
    }
}
