/// CatalogView Filters
///
/// Two filtering stages run before sorting:
///
/// 1. The global filter keeps records where any globally-filterable column matches
///    the free-text query (see `fuzzy`).
/// 2. Column filters narrow the surviving set one after another, in the order they
///    appear in the view state. Every filter must pass (AND, never OR).
///
/// A record that lacks a filtered column never matches that filter. Both stages keep
/// the relative order of their input.

use crate::column::{ColumnDescriptor, ColumnValue, FilterVariant};
use crate::fuzzy::{FuzzyConfig, QueryMatcher};
use crate::table::{Record, Schema};
use serde::{Deserialize, Serialize};

/// Value of a column-level filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum FilterValue {
    Text { text: String },
    Range { min: Option<f64>, max: Option<f64> },
    Select { value: ColumnValue },
}

impl FilterValue {
    pub fn text(text: impl Into<String>) -> Self {
        FilterValue::Text { text: text.into() }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        FilterValue::Range { min, max }
    }

    pub fn select(value: impl Into<ColumnValue>) -> Self {
        FilterValue::Select { value: value.into() }
    }

    pub fn variant(&self) -> FilterVariant {
        match self {
            FilterValue::Text { .. } => FilterVariant::Text,
            FilterValue::Range { .. } => FilterVariant::Range,
            FilterValue::Select { .. } => FilterVariant::Select,
        }
    }

    /// An empty filter constrains nothing and is dropped from evaluation.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text { text } => text.is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
            FilterValue::Select { value } => value.is_empty_value(),
        }
    }

    /// Whether a column value satisfies this filter.
    pub fn matches(&self, value: &ColumnValue) -> bool {
        if value.is_null() {
            return false;
        }
        match self {
            FilterValue::Text { text } => value
                .to_text()
                .map(|t| t.to_lowercase().contains(&text.to_lowercase()))
                .unwrap_or(false),
            FilterValue::Range { min, max } => match value.as_f64() {
                Some(n) => min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi),
                None => false,
            },
            FilterValue::Select { value: selected } => value.equals_selection(selected),
        }
    }
}

/// One active per-column constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: FilterValue,
}

impl ColumnFilter {
    pub fn new(column: impl Into<String>, value: FilterValue) -> Self {
        ColumnFilter { column: column.into(), value }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record
            .get(&self.column)
            .map(|v| self.value.matches(v))
            .unwrap_or(false)
    }
}

/// Global filter stage.
pub fn apply_global_filter<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    query: &str,
    schema: &Schema,
    fuzzy: FuzzyConfig,
) -> Vec<&'a Record> {
    let matcher = QueryMatcher::new(query, fuzzy);
    if matcher.is_identity() {
        return records.into_iter().collect();
    }

    let columns: Vec<&ColumnDescriptor> = schema.global_filter_columns().collect();
    records
        .into_iter()
        .filter(|record| record_matches_query(record, &columns, &matcher))
        .collect()
}

fn record_matches_query(record: &Record, columns: &[&ColumnDescriptor], matcher: &QueryMatcher) -> bool {
    columns.iter().any(|column| {
        record
            .get(&column.key)
            .and_then(|v| v.to_text())
            .map(|text| matcher.matches(&text))
            .unwrap_or(false)
    })
}

/// Column filter stage. Empty filters are skipped.
pub fn apply_column_filters<'a>(rows: Vec<&'a Record>, filters: &[ColumnFilter]) -> Vec<&'a Record> {
    filters
        .iter()
        .filter(|f| !f.value.is_empty())
        .fold(rows, |surviving, filter| {
            surviving.into_iter().filter(|record| filter.matches(record)).collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn schema() -> Schema {
        Schema::new(vec![
            ColumnDescriptor::new("name", ColumnType::String),
            ColumnDescriptor::new(
                "status",
                ColumnType::Enum(vec!["ACTIVE".into(), "DRAFT".into(), "ARCHIVE".into()]),
            ),
            ColumnDescriptor::new("stock", ColumnType::Int32),
            ColumnDescriptor::new("description", ColumnType::String).with_global_filter(false),
        ])
    }

    fn status(ordinal: u32, label: &str) -> ColumnValue {
        ColumnValue::Enum { ordinal, label: label.to_string() }
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new()
                .with("name", "Alpha")
                .with("status", status(0, "ACTIVE"))
                .with("stock", 5)
                .with("description", "Sturdy oak table"),
            Record::new()
                .with("name", "Beta")
                .with("status", status(1, "DRAFT"))
                .with("stock", 0)
                .with("description", "Alpine jacket"),
            Record::new()
                .with("name", "Gamma")
                .with("status", status(0, "ACTIVE"))
                .with("stock", 12),
        ]
    }

    fn names(rows: &[&Record]) -> Vec<String> {
        rows.iter()
            .map(|r| r.get("name").and_then(|v| v.as_string()).unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_global_filter_skips_ineligible_columns() {
        let records = records();
        // "alp" only appears in Beta's description, which is not globally filterable
        let rows = apply_global_filter(&records, "alp", &schema(), FuzzyConfig::default());
        assert_eq!(names(&rows), vec!["Alpha"]);
    }

    #[test]
    fn test_global_filter_matches_numbers_and_enums() {
        let records = records();
        let rows = apply_global_filter(&records, "12", &schema(), FuzzyConfig::default());
        assert_eq!(names(&rows), vec!["Gamma"]);

        let rows = apply_global_filter(&records, "draft", &schema(), FuzzyConfig::default());
        assert_eq!(names(&rows), vec!["Beta"]);
    }

    #[test]
    fn test_global_filter_empty_query_is_identity() {
        let records = records();
        let rows = apply_global_filter(&records, "", &schema(), FuzzyConfig::default());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().zip(records.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_text_filter() {
        let f = FilterValue::text("AMM");
        assert!(f.matches(&"Gamma".into()));
        assert!(!f.matches(&"Beta".into()));
        assert!(!f.matches(&ColumnValue::Null));
    }

    #[test]
    fn test_range_filter_bounds_are_inclusive() {
        let f = FilterValue::range(Some(0.0), Some(5.0));
        assert!(f.matches(&ColumnValue::Int32(0)));
        assert!(f.matches(&ColumnValue::Int32(5)));
        assert!(!f.matches(&ColumnValue::Int32(6)));
        assert!(!f.matches(&"5".into()));

        let open_ended = FilterValue::range(Some(10.0), None);
        assert!(open_ended.matches(&ColumnValue::Int64(1_000_000)));
        assert!(!open_ended.matches(&ColumnValue::Float64(9.99)));
    }

    #[test]
    fn test_empty_filters() {
        assert!(FilterValue::text("").is_empty());
        assert!(FilterValue::range(None, None).is_empty());
        assert!(FilterValue::select(ColumnValue::Null).is_empty());
        assert!(FilterValue::select("").is_empty());
        assert!(!FilterValue::range(None, Some(0.0)).is_empty());
    }

    #[test]
    fn test_column_filters_are_anded_in_order() {
        let records = records();
        let rows: Vec<&Record> = records.iter().collect();
        let filters = vec![
            ColumnFilter::new("status", FilterValue::select("ACTIVE")),
            ColumnFilter::new("stock", FilterValue::range(Some(10.0), None)),
        ];
        let rows = apply_column_filters(rows, &filters);
        assert_eq!(names(&rows), vec!["Gamma"]);
    }

    #[test]
    fn test_empty_column_filter_is_noop() {
        let records = records();
        let rows: Vec<&Record> = records.iter().collect();
        let filters = vec![ColumnFilter::new("name", FilterValue::text(""))];
        assert_eq!(apply_column_filters(rows, &filters).len(), 3);
    }

    #[test]
    fn test_missing_column_never_matches() {
        let records = records();
        let rows: Vec<&Record> = records.iter().collect();
        let filters = vec![ColumnFilter::new("description", FilterValue::text("a"))];
        // Gamma has no description
        assert_eq!(names(&apply_column_filters(rows, &filters)), vec!["Alpha", "Beta"]);
    }
}
