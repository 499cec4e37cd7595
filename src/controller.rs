/// CatalogView Controller
///
/// `ViewController` is what a host UI talks to. It owns the record snapshot, the
/// column table, the configuration and the committed `ViewState`, and exposes one
/// named method per mutation. Each method validates and commits atomically: on
/// `Err` the state a renderer last saw is still the committed one.
///
/// The controller never fetches on its own. `load` pulls a snapshot from a
/// `RecordSource`; when that fails the controller reports `DataStatus::Unavailable`
/// and renders nothing rather than stale rows.
///
/// # Examples
///
/// ```
/// use catalogview::{ColumnDescriptor, ColumnType, Record, Schema, ViewConfig, ViewController};
///
/// let schema = Schema::new(vec![ColumnDescriptor::new("name", ColumnType::String)]);
/// let mut controller = ViewController::new(schema, ViewConfig::default());
/// controller.replace_records((0..12).map(|i| Record::new().with("name", format!("Lamp {}", i))).collect());
///
/// controller.last_page().unwrap();
/// let view = controller.view().unwrap();
/// assert_eq!(view.pagination.page_index, 2);
/// assert_eq!(view.page_rows.len(), 2);
/// ```

use crate::action::ViewAction;
use crate::column::{ColumnType, ColumnValue, FilterVariant};
use crate::config::ViewConfig;
use crate::error::ViewStateError;
use crate::filter::FilterValue;
use crate::pagination::PageBlock;
use crate::source::RecordSource;
use crate::state::{ViewContext, ViewState};
use crate::table::{Record, Schema};
use crate::view::{derive_view_with, filter_rows, DerivedView, SortOrder};
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Whether the controller has rows to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataStatus {
    /// Nothing loaded yet
    NotLoaded,
    Ready,
    /// The last load failed; carries the reason
    Unavailable(String),
}

pub struct ViewController {
    schema: Schema,
    config: ViewConfig,
    records: Vec<Record>,
    categories: BTreeSet<String>,
    category_column: Option<String>,
    status: DataStatus,
    state: ViewState,
}

impl ViewController {
    pub fn new(schema: Schema, config: ViewConfig) -> Self {
        let state = ViewState::new(config.default_page_size);
        ViewController {
            schema,
            config,
            records: Vec::new(),
            categories: BTreeSet::new(),
            category_column: None,
            status: DataStatus::NotLoaded,
            state,
        }
    }

    /// Column whose select options come from the fetched category names.
    pub fn with_category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = Some(column.into());
        self
    }

    /// Replace the snapshot from a record source.
    ///
    /// A failed record fetch clears the snapshot and marks the data unavailable. A
    /// failed category fetch only leaves the category options empty.
    pub fn load(&mut self, source: &dyn RecordSource) -> &DataStatus {
        match source.fetch_records() {
            Ok(records) => {
                self.categories = source.fetch_category_names().unwrap_or_else(|e| {
                    warn!("Category names unavailable: {}", e);
                    BTreeSet::new()
                });
                info!("Loaded {} records, {} categories", records.len(), self.categories.len());
                self.replace_records(records);
            }
            Err(e) => {
                warn!("Record source failed: {}", e);
                self.records.clear();
                self.categories.clear();
                self.status = DataStatus::Unavailable(e.to_string());
                self.reclamp();
            }
        }
        &self.status
    }

    /// Install a new snapshot. The page index is re-clamped against it.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.status = DataStatus::Ready;
        self.reclamp();
    }

    pub fn set_categories(&mut self, categories: BTreeSet<String>) {
        self.categories = categories;
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn status(&self) -> &DataStatus {
        &self.status
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The derived view for the committed state, or `None` while no data is
    /// available.
    pub fn view(&self) -> Option<DerivedView<'_>> {
        if self.status != DataStatus::Ready {
            return None;
        }
        let view = derive_view_with(&self.records, &self.state, &self.schema, self.config.fuzzy);
        debug!(
            "Derived page {}/{}: {} of {} rows",
            view.pagination.page_index + 1,
            view.page_count,
            view.total_filtered_count,
            view.total_count
        );
        Some(view)
    }

    /// Page-number controls around the current page.
    pub fn page_block(&self) -> Option<PageBlock> {
        self.view().map(|v| v.page_block(self.config.page_block_size))
    }

    /// Replace the committed state with one loaded from elsewhere, normalized and
    /// clamped against the current snapshot.
    pub fn restore_state(&mut self, state: ViewState) -> Result<&ViewState, ViewStateError> {
        self.state = state.normalized()?;
        self.reclamp();
        debug!("Restored view state: page {}", self.state.pagination.page_index);
        Ok(&self.state)
    }

    /// Validate `action` and commit the resulting state.
    pub fn dispatch(&mut self, action: ViewAction) -> Result<&ViewState, ViewStateError> {
        let ctx = ViewContext::new(&self.records, &self.schema).with_fuzzy(self.config.fuzzy);
        match self.state.apply(&action, &ctx) {
            Ok(next) => {
                debug!("Applied {:?}", action);
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                warn!("Rejected {:?}: {}", action, e);
                Err(e)
            }
        }
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::SetGlobalFilter { text: text.into() })
    }

    pub fn set_column_filter(
        &mut self,
        column: impl Into<String>,
        value: Option<FilterValue>,
    ) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::SetColumnFilter { column: column.into(), value })
    }

    pub fn clear_column_filters(&mut self) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::ClearColumnFilters)
    }

    pub fn set_sort(
        &mut self,
        column: impl Into<String>,
        order: Option<SortOrder>,
    ) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::SetSort { column: column.into(), order })
    }

    pub fn toggle_sort(&mut self, column: impl Into<String>) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::ToggleSort { column: column.into() })
    }

    pub fn clear_sort(&mut self) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::ClearSort)
    }

    pub fn set_column_visibility(
        &mut self,
        column: impl Into<String>,
        visible: bool,
    ) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::SetColumnVisibility { column: column.into(), visible })
    }

    pub fn reset_column_visibility(&mut self) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::ResetColumnVisibility)
    }

    pub fn set_page_index(&mut self, index: usize) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::SetPageIndex { index })
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::SetPageSize { size })
    }

    pub fn next_page(&mut self) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::NextPage)
    }

    pub fn previous_page(&mut self) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::PreviousPage)
    }

    pub fn first_page(&mut self) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::FirstPage)
    }

    pub fn last_page(&mut self) -> Result<&ViewState, ViewStateError> {
        self.dispatch(ViewAction::LastPage)
    }

    /// Options a select filter on `column` offers, as display labels.
    ///
    /// Enum columns list their variants in declaration order; the category column
    /// lists the fetched category names; anything else lists the distinct non-null
    /// values of the snapshot in natural order.
    pub fn select_options(&self, column: &str) -> Result<Vec<String>, ViewStateError> {
        let descriptor = self
            .schema
            .get_column(column)
            .ok_or_else(|| ViewStateError::UnknownColumn(column.to_string()))?;

        if let ColumnType::Enum(labels) = &descriptor.column_type {
            return Ok(labels.clone());
        }
        if self.category_column.as_deref() == Some(column) && !self.categories.is_empty() {
            return Ok(self.categories.iter().cloned().collect());
        }

        let mut values: Vec<&ColumnValue> = self
            .records
            .iter()
            .map(|r| r.value_or_null(column))
            .filter(|v| !v.is_null())
            .collect();
        values.sort_by(|a, b| a.natural_cmp(b));
        values.dedup_by(|a, b| a.natural_cmp(b).is_eq());
        Ok(values.into_iter().filter_map(|v| v.to_text()).collect())
    }

    /// Keys of the columns that may be hidden, in schema order.
    pub fn hideable_columns(&self) -> Vec<&str> {
        self.schema
            .columns()
            .iter()
            .filter(|c| c.hideable)
            .map(|c| c.key.as_str())
            .collect()
    }

    /// Keys of the currently visible columns, in schema order.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.schema
            .columns()
            .iter()
            .filter(|c| self.state.is_column_visible(&c.key))
            .map(|c| c.key.as_str())
            .collect()
    }

    /// Columns that offer a select filter.
    pub fn select_columns(&self) -> Vec<&str> {
        self.schema
            .columns()
            .iter()
            .filter(|c| c.filterable && c.effective_filter_variant() == FilterVariant::Select)
            .map(|c| c.key.as_str())
            .collect()
    }

    fn reclamp(&mut self) {
        let rows = filter_rows(&self.records, &self.state, &self.schema, self.config.fuzzy).len();
        self.state.pagination = self.state.pagination.clamped(rows);
    }
}
