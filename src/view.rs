/// CatalogView View Derivation
///
/// A derived view is the render-ready projection of a record snapshot for one view
/// state. It is produced by a linear pipeline:
///
/// ```text
/// records -> global filter -> column filters -> sort -> paginate -> DerivedView
/// ```
///
/// Each stage is a pure function of its input and its slice of the view state, so
/// deriving twice from the same arguments yields identical views. Column visibility
/// is not a stage: it is applied when reading rows through a `ProjectionView`, and
/// never changes which rows survive or how many there are.
///
/// # Examples
///
/// ```
/// use catalogview::{derive_view, ColumnDescriptor, ColumnType, Record, Schema, SortKey, ViewState};
///
/// let schema = Schema::new(vec![
///     ColumnDescriptor::new("name", ColumnType::String),
///     ColumnDescriptor::new("stock", ColumnType::Int32),
/// ]);
/// let records = vec![
///     Record::new().with("name", "Alpha").with("stock", 5),
///     Record::new().with("name", "Beta").with("stock", 0),
///     Record::new().with("name", "Gamma").with("stock", 12),
/// ];
///
/// let mut state = ViewState::new(10);
/// state.sort = vec![SortKey::ascending("stock")];
///
/// let view = derive_view(&records, &state, &schema);
/// let names: Vec<&str> = view.rows.iter()
///     .map(|r| r.get("name").and_then(|v| v.as_string()).unwrap())
///     .collect();
/// assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
/// assert_eq!(view.page_count, 1);
/// ```

use crate::column::{ColumnDescriptor, ColumnValue};
use crate::filter::{apply_column_filters, apply_global_filter};
use crate::fuzzy::FuzzyConfig;
use crate::pagination::{page_count, PageBlock, PageSummary, Pagination};
use crate::state::ViewState;
use crate::table::{column_value_to_json, Record, Schema};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order (smallest first)
    Ascending,
    /// Descending order (largest first)
    Descending,
}

/// A single sort key specifying a column and order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// Column key to sort by
    pub column: String,
    /// Sort order (ascending or descending)
    pub order: SortOrder,
}

impl SortKey {
    pub fn ascending(column: impl Into<String>) -> Self {
        SortKey::new(column, SortOrder::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        SortKey::new(column, SortOrder::Descending)
    }

    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        SortKey {
            column: column.into(),
            order,
        }
    }
}

/// Compare two records according to one sort key.
///
/// A missing field compares as `Null`, the least value.
fn compare_by_key(a: &Record, b: &Record, key: &SortKey) -> Ordering {
    let base_cmp = a
        .value_or_null(&key.column)
        .natural_cmp(b.value_or_null(&key.column));

    match key.order {
        SortOrder::Ascending => base_cmp,
        SortOrder::Descending => base_cmp.reverse(),
    }
}

/// Sort stage: stable multi-key sort. The first key is primary; later keys break ties.
/// Rows equal under every key keep their input order. No keys leaves the input as is.
pub fn apply_sort<'a>(mut rows: Vec<&'a Record>, sort_keys: &[SortKey]) -> Vec<&'a Record> {
    if sort_keys.is_empty() {
        return rows;
    }
    // slice::sort_by is stable
    rows.sort_by(|a, b| {
        for key in sort_keys {
            let cmp = compare_by_key(a, b, key);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });
    rows
}

/// Output of one derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    /// Rows after filtering and sorting, before windowing
    pub rows: Vec<&'a Record>,
    /// Rows of the current page
    pub page_rows: Vec<&'a Record>,
    pub total_filtered_count: usize,
    pub page_count: usize,
    pub pagination: Pagination,
    /// Size of the snapshot before any filtering
    pub total_count: usize,
}

impl<'a> DerivedView<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.page_index.saturating_add(1) < self.page_count
    }

    pub fn page_block(&self, block_size: usize) -> PageBlock {
        PageBlock::compute(self.pagination.page_index, self.page_count, block_size)
    }

    pub fn page_summary(&self) -> PageSummary {
        let window = self.pagination.window(self.total_filtered_count);
        let (first_row_number, last_row_number) = if window.is_empty() {
            (0, 0)
        } else {
            (window.start + 1, window.end)
        };
        PageSummary {
            first_row_number,
            last_row_number,
            total_count: self.total_count,
        }
    }

    /// Read-time projection of the current page onto the visible columns.
    pub fn projection<'v>(&'v self, state: &ViewState, schema: &'v Schema) -> ProjectionView<'v> {
        ProjectionView::new(&self.page_rows, state, schema)
    }

    /// JSON form of the current page for a renderer: page metadata plus the page
    /// rows restricted to visible columns, in schema order.
    pub fn to_json(&self, state: &ViewState, schema: &Schema) -> JsonValue {
        let projection = self.projection(state, schema);
        let rows: Vec<JsonValue> = (0..projection.len())
            .map(|i| {
                let obj: serde_json::Map<String, JsonValue> = projection
                    .row(i)
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), column_value_to_json(value)))
                    .collect();
                JsonValue::Object(obj)
            })
            .collect();

        serde_json::json!({
            "columns": projection.columns(),
            "rows": rows,
            "pageIndex": self.pagination.page_index,
            "pageSize": self.pagination.page_size,
            "pageCount": self.page_count,
            "totalFilteredCount": self.total_filtered_count,
            "totalCount": self.total_count,
        })
    }
}

/// Runs the filter stages only. The row count it yields drives page clamping.
pub fn filter_rows<'a>(
    records: &'a [Record],
    state: &ViewState,
    schema: &Schema,
    fuzzy: FuzzyConfig,
) -> Vec<&'a Record> {
    let rows = apply_global_filter(records, &state.global_filter, schema, fuzzy);
    trace!("global filter {:?}: {} of {} rows", state.global_filter, rows.len(), records.len());
    let rows = apply_column_filters(rows, &state.column_filters);
    trace!("column filters ({}): {} rows", state.column_filters.len(), rows.len());
    rows
}

/// Derive the view for `state` over `records` with the default fuzzy settings.
pub fn derive_view<'a>(records: &'a [Record], state: &ViewState, schema: &Schema) -> DerivedView<'a> {
    derive_view_with(records, state, schema, FuzzyConfig::default())
}

/// Derive the view for `state` over `records`.
///
/// Never fails: an empty result is a well-formed view with no rows and no pages.
pub fn derive_view_with<'a>(
    records: &'a [Record],
    state: &ViewState,
    schema: &Schema,
    fuzzy: FuzzyConfig,
) -> DerivedView<'a> {
    let filtered = filter_rows(records, state, schema, fuzzy);
    let rows = apply_sort(filtered, &state.sort);

    let total_filtered_count = rows.len();
    let pagination = state.pagination;
    let page_rows = rows[pagination.window(total_filtered_count)].to_vec();

    DerivedView {
        page_count: page_count(total_filtered_count, pagination.page_size),
        page_rows,
        rows,
        total_filtered_count,
        pagination,
        total_count: records.len(),
    }
}

/// Visible fields of a single record, in schema order. Absent fields are skipped.
pub fn visible_fields<'r>(
    record: &'r Record,
    visibility: &HashMap<String, bool>,
    schema: &'r Schema,
) -> Vec<(&'r str, &'r ColumnValue)> {
    schema
        .columns()
        .iter()
        .filter(|c| is_visible(visibility, &c.key))
        .filter_map(|c| record.get(&c.key).map(|v| (c.key.as_str(), v)))
        .collect()
}

fn is_visible(visibility: &HashMap<String, bool>, key: &str) -> bool {
    visibility.get(key).copied().unwrap_or(true)
}

/// A ProjectionView exposes only the visible columns of a set of rows.
///
/// Hidden values stay in the underlying records, so showing a column again needs no
/// re-derivation.
pub struct ProjectionView<'v> {
    rows: &'v [&'v Record],
    selected_columns: Vec<&'v ColumnDescriptor>,
}

impl<'v> ProjectionView<'v> {
    pub fn new(rows: &'v [&'v Record], state: &ViewState, schema: &'v Schema) -> Self {
        let selected_columns = schema
            .columns()
            .iter()
            .filter(|c| is_visible(&state.column_visibility, &c.key))
            .collect();
        ProjectionView { rows, selected_columns }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keys of the visible columns, in schema order.
    pub fn columns(&self) -> Vec<&'v str> {
        self.selected_columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// Visible fields of a row; fields absent from the record are skipped.
    pub fn row(&self, index: usize) -> Vec<(&'v str, &'v ColumnValue)> {
        let Some(record) = self.rows.get(index) else {
            return Vec::new();
        };
        self.selected_columns
            .iter()
            .filter_map(|c| record.get(&c.key).map(|v| (c.key.as_str(), v)))
            .collect()
    }

    pub fn get_value(&self, row: usize, column: &str) -> Result<&'v ColumnValue, String> {
        if !self.selected_columns.iter().any(|c| c.key == column) {
            return Err(format!("Column '{}' not in projection", column));
        }
        let record = self
            .rows
            .get(row)
            .ok_or_else(|| format!("Row {} out of range [0, {})", row, self.len()))?;
        Ok(record.value_or_null(column))
    }
}
