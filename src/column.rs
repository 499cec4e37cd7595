/// CatalogView Column Types
///
/// A column is a named, addressable field of a record. Each column has a type and a
/// descriptor that says how the view pipeline may use it: whether the global search
/// looks at it, whether it can be sorted, filtered or hidden, and which filter variant
/// applies to it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column data types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Int32,
    Int64,
    Float64,
    String,
    Bool,
    /// Status-like enum; variants are listed in declaration order.
    Enum(Vec<String>),
    /// Array of scalars (e.g. image URLs, keywords)
    List,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int32 | ColumnType::Int64 | ColumnType::Float64)
    }

    /// Position of an enum label in declaration order, if this is an enum type.
    pub fn enum_ordinal(&self, label: &str) -> Option<u32> {
        match self {
            ColumnType::Enum(variants) => variants
                .iter()
                .position(|v| v == label)
                .map(|pos| pos as u32),
            _ => None,
        }
    }
}

/// Column value enum to support multiple types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Bool(bool),
    /// Enum value: its declaration ordinal and its label.
    Enum { ordinal: u32, label: String },
    List(Vec<ColumnValue>),
    Null,
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ColumnValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int32(v) => Some(*v as i64),
            ColumnValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ColumnValue::String(v) => Some(v),
            ColumnValue::Enum { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Numeric view of the value, used by range filters.
    /// Returns None for anything that is not a number.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Int32(n) => Some(*n as f64),
            ColumnValue::Int64(n) => Some(*n as f64),
            ColumnValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// True for values a filter should treat as "no value": null, blank text, empty lists.
    pub fn is_empty_value(&self) -> bool {
        match self {
            ColumnValue::Null => true,
            ColumnValue::String(s) => s.trim().is_empty(),
            ColumnValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Stringified form used for text matching. Null has no text form.
    ///
    /// Lists are joined with a single space so each element can be matched.
    pub fn to_text(&self) -> Option<String> {
        match self {
            ColumnValue::Int32(n) => Some(n.to_string()),
            ColumnValue::Int64(n) => Some(n.to_string()),
            ColumnValue::Float64(f) => Some(f.to_string()),
            ColumnValue::String(s) => Some(s.clone()),
            ColumnValue::Bool(b) => Some(b.to_string()),
            ColumnValue::Enum { label, .. } => Some(label.clone()),
            ColumnValue::List(items) => {
                let parts: Vec<String> = items.iter().filter_map(|v| v.to_text()).collect();
                Some(parts.join(" "))
            }
            ColumnValue::Null => None,
        }
    }

    /// Equality used by `select` filters.
    ///
    /// An enum value equals a string selection carrying its label, and numbers
    /// compare by value across integer widths.
    pub fn equals_selection(&self, selection: &ColumnValue) -> bool {
        match (self, selection) {
            (ColumnValue::Null, _) | (_, ColumnValue::Null) => false,
            (ColumnValue::Enum { label, .. }, ColumnValue::String(s))
            | (ColumnValue::String(s), ColumnValue::Enum { label, .. }) => label == s,
            (ColumnValue::Enum { ordinal: a, .. }, ColumnValue::Enum { ordinal: b, .. }) => a == b,
            (a, b) if a.as_f64().is_some() && b.as_f64().is_some() => a.as_f64() == b.as_f64(),
            (a, b) => a == b,
        }
    }

    /// Rank used to order values of different kinds deterministically.
    fn kind_rank(&self) -> u8 {
        match self {
            ColumnValue::Null => 0,
            ColumnValue::Bool(_) => 1,
            ColumnValue::Int32(_) | ColumnValue::Int64(_) | ColumnValue::Float64(_) => 2,
            ColumnValue::Enum { .. } => 3,
            ColumnValue::String(_) => 4,
            ColumnValue::List(_) => 5,
        }
    }

    /// Natural ordering of two values.
    ///
    /// Numbers compare numerically (across widths), strings lexicographically and
    /// case-sensitively, enums by declaration order, lists element by element.
    /// Null is the least value. Values of different kinds order by kind.
    pub fn natural_cmp(&self, other: &ColumnValue) -> Ordering {
        match (self, other) {
            (ColumnValue::Int32(a), ColumnValue::Int32(b)) => a.cmp(b),
            (ColumnValue::Int64(a), ColumnValue::Int64(b)) => a.cmp(b),
            (ColumnValue::String(a), ColumnValue::String(b)) => a.cmp(b),
            (ColumnValue::Bool(a), ColumnValue::Bool(b)) => a.cmp(b),
            (ColumnValue::Enum { ordinal: a, .. }, ColumnValue::Enum { ordinal: b, .. }) => a.cmp(b),
            (ColumnValue::List(a), ColumnValue::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let cmp = x.natural_cmp(y);
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                }
                a.len().cmp(&b.len())
            }
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => a.kind_rank().cmp(&b.kind_rank()),
            },
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(s: &str) -> Self {
        ColumnValue::String(s.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(s: String) -> Self {
        ColumnValue::String(s)
    }
}

impl From<i32> for ColumnValue {
    fn from(n: i32) -> Self {
        ColumnValue::Int32(n)
    }
}

impl From<i64> for ColumnValue {
    fn from(n: i64) -> Self {
        ColumnValue::Int64(n)
    }
}

impl From<f64> for ColumnValue {
    fn from(f: f64) -> Self {
        ColumnValue::Float64(f)
    }
}

impl From<bool> for ColumnValue {
    fn from(b: bool) -> Self {
        ColumnValue::Bool(b)
    }
}

/// How a column-level filter value is matched against a column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterVariant {
    /// Case-insensitive substring containment
    Text,
    /// Inclusive numeric `{min, max}` bounds
    Range,
    /// Exact equality with a single selected value
    Select,
}

impl FilterVariant {
    /// Variant used when a descriptor does not name one.
    pub fn default_for(column_type: &ColumnType) -> Self {
        match column_type {
            ColumnType::Int32 | ColumnType::Int64 | ColumnType::Float64 => FilterVariant::Range,
            ColumnType::Enum(_) | ColumnType::Bool => FilterVariant::Select,
            ColumnType::String | ColumnType::List => FilterVariant::Text,
        }
    }
}

/// Static per-column metadata consumed by the view pipeline.
///
/// # Examples
///
/// ```
/// use catalogview::{ColumnDescriptor, ColumnType, FilterVariant};
///
/// let category = ColumnDescriptor::new("categoryName", ColumnType::String)
///     .with_filter_variant(FilterVariant::Select);
/// assert!(category.global_filter);
/// assert_eq!(category.effective_filter_variant(), FilterVariant::Select);
///
/// // List columns are left out of the global search by default
/// let images = ColumnDescriptor::new("images", ColumnType::List);
/// assert!(!images.global_filter);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub key: String,
    pub column_type: ColumnType,
    /// Whether the global (fuzzy) filter considers this column
    pub global_filter: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub hideable: bool,
    pub filter_variant: Option<FilterVariant>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, column_type: ColumnType) -> Self {
        let global_filter = !matches!(column_type, ColumnType::List);
        ColumnDescriptor {
            key: key.into(),
            column_type,
            global_filter,
            sortable: true,
            filterable: true,
            hideable: true,
            filter_variant: None,
        }
    }

    pub fn with_global_filter(mut self, enabled: bool) -> Self {
        self.global_filter = enabled;
        self
    }

    pub fn with_sorting(mut self, enabled: bool) -> Self {
        self.sortable = enabled;
        self
    }

    pub fn with_column_filter(mut self, enabled: bool) -> Self {
        self.filterable = enabled;
        self
    }

    pub fn with_hiding(mut self, enabled: bool) -> Self {
        self.hideable = enabled;
        self
    }

    pub fn with_filter_variant(mut self, variant: FilterVariant) -> Self {
        self.filter_variant = Some(variant);
        self
    }

    pub fn effective_filter_variant(&self) -> FilterVariant {
        self.filter_variant
            .unwrap_or_else(|| FilterVariant::default_for(&self.column_type))
    }
}
