/// CatalogView View State
///
/// `ViewState` is the complete description of what the user wants to see: the
/// global query, column filters, sort keys, column visibility and the page position.
///
/// State only changes through `ViewState::apply`, which validates an action against
/// the schema and returns a new state; the old one is untouched, so a rejected action
/// leaves the caller with the state it had. After every action:
///
/// - `column_filters` and `sort` hold at most one entry per column
/// - changing the global query, any column filter or the page size resets the page
///   index to 0
/// - the page index is clamped into the pages the filtered rows make
///
/// # Examples
///
/// ```
/// use catalogview::{ColumnDescriptor, ColumnType, Record, Schema, ViewAction, ViewContext, ViewState};
///
/// let schema = Schema::new(vec![ColumnDescriptor::new("name", ColumnType::String)]);
/// let records: Vec<Record> = (0..12)
///     .map(|i| Record::new().with("name", format!("Item {}", i)))
///     .collect();
/// let ctx = ViewContext::new(&records, &schema);
///
/// let state = ViewState::new(5)
///     .apply(&ViewAction::LastPage, &ctx)
///     .unwrap();
/// assert_eq!(state.pagination.page_index, 2);
///
/// // Narrowing the result set sends the user back to the first page
/// let state = state
///     .apply(&ViewAction::SetGlobalFilter { text: "item 1".into() }, &ctx)
///     .unwrap();
/// assert_eq!(state.pagination.page_index, 0);
/// ```

use crate::action::ViewAction;
use crate::column::ColumnDescriptor;
use crate::error::ViewStateError;
use crate::filter::{ColumnFilter, FilterValue};
use crate::fuzzy::FuzzyConfig;
use crate::pagination::Pagination;
use crate::table::{Record, Schema};
use crate::view::{filter_rows, SortKey, SortOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawViewState")]
pub struct ViewState {
    pub global_filter: String,
    pub column_filters: Vec<ColumnFilter>,
    pub sort: Vec<SortKey>,
    /// Absent keys are visible
    pub column_visibility: HashMap<String, bool>,
    pub pagination: Pagination,
}

/// Wire form of a persisted `ViewState`, checked by `ViewState::normalized` before use.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawViewState {
    #[serde(default)]
    global_filter: String,
    #[serde(default)]
    column_filters: Vec<ColumnFilter>,
    #[serde(default)]
    sort: Vec<SortKey>,
    #[serde(default)]
    column_visibility: HashMap<String, bool>,
    pagination: Pagination,
}

impl TryFrom<RawViewState> for ViewState {
    type Error = ViewStateError;

    fn try_from(raw: RawViewState) -> Result<Self, Self::Error> {
        ViewState {
            global_filter: raw.global_filter,
            column_filters: raw.column_filters,
            sort: raw.sort,
            column_visibility: raw.column_visibility,
            pagination: raw.pagination,
        }
        .normalized()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// What an action is validated and clamped against: the snapshot, its columns and
/// the fuzzy settings used to count filtered rows.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub records: &'a [Record],
    pub schema: &'a Schema,
    pub fuzzy: FuzzyConfig,
}

impl<'a> ViewContext<'a> {
    pub fn new(records: &'a [Record], schema: &'a Schema) -> Self {
        ViewContext { records, schema, fuzzy: FuzzyConfig::default() }
    }

    pub fn with_fuzzy(mut self, fuzzy: FuzzyConfig) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    fn column(&self, key: &str) -> Result<&'a ColumnDescriptor, ViewStateError> {
        self.schema
            .get_column(key)
            .ok_or_else(|| ViewStateError::UnknownColumn(key.to_string()))
    }
}

impl ViewState {
    /// A fresh state: no query, filters or sort, every column visible, first page.
    /// A page size of 0 is raised to 1.
    pub fn new(page_size: usize) -> Self {
        ViewState {
            global_filter: String::new(),
            column_filters: Vec::new(),
            sort: Vec::new(),
            column_visibility: HashMap::new(),
            pagination: Pagination::new(page_size.max(1)),
        }
    }

    /// Restore the invariants `apply` maintains on a state built by hand or loaded
    /// from storage. Repeated column filters or sort keys collapse into one entry at the
    /// first position, holding the last value. Empty filters are dropped. A page size of
    /// 0 is rejected. The page index is not clamped here; that needs the records.
    pub fn normalized(mut self) -> Result<Self, ViewStateError> {
        if self.pagination.page_size == 0 {
            return Err(ViewStateError::InvalidPageSize(0));
        }

        let mut filters: Vec<ColumnFilter> = Vec::with_capacity(self.column_filters.len());
        for filter in self.column_filters.drain(..) {
            match filters.iter_mut().find(|f| f.column == filter.column) {
                Some(existing) => *existing = filter,
                None => filters.push(filter),
            }
        }
        filters.retain(|f| !f.value.is_empty());
        self.column_filters = filters;

        let mut sort: Vec<SortKey> = Vec::with_capacity(self.sort.len());
        for key in self.sort.drain(..) {
            match sort.iter_mut().find(|k| k.column == key.column) {
                Some(existing) => existing.order = key.order,
                None => sort.push(key),
            }
        }
        self.sort = sort;
        Ok(self)
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        self.column_visibility.get(column).copied().unwrap_or(true)
    }

    pub fn column_filter(&self, column: &str) -> Option<&FilterValue> {
        self.column_filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| &f.value)
    }

    pub fn sort_order(&self, column: &str) -> Option<SortOrder> {
        self.sort.iter().find(|k| k.column == column).map(|k| k.order)
    }

    /// Apply one action, returning the next state.
    pub fn apply(&self, action: &ViewAction, ctx: &ViewContext<'_>) -> Result<ViewState, ViewStateError> {
        let mut next = self.clone();

        match action {
            ViewAction::SetGlobalFilter { text } => {
                next.global_filter = text.clone();
            }

            ViewAction::SetColumnFilter { column, value } => {
                let descriptor = ctx.column(column)?;
                if !descriptor.filterable {
                    return Err(ViewStateError::NotFilterable(column.clone()));
                }
                match value {
                    Some(value) if !value.is_empty() => {
                        let expected = descriptor.effective_filter_variant();
                        if value.variant() != expected {
                            return Err(ViewStateError::FilterVariantMismatch {
                                column: column.clone(),
                                expected,
                                actual: value.variant(),
                            });
                        }
                        let filter = ColumnFilter::new(column.clone(), value.clone());
                        match next.column_filters.iter_mut().find(|f| f.column == *column) {
                            Some(existing) => *existing = filter,
                            None => next.column_filters.push(filter),
                        }
                    }
                    _ => next.column_filters.retain(|f| f.column != *column),
                }
            }

            ViewAction::ClearColumnFilters => {
                next.column_filters.clear();
            }

            ViewAction::SetSort { column, order } => {
                next.set_sort_key(ctx, column, *order)?;
            }

            ViewAction::ToggleSort { column } => {
                let order = match self.sort_order(column) {
                    None => Some(SortOrder::Ascending),
                    Some(SortOrder::Ascending) => Some(SortOrder::Descending),
                    Some(SortOrder::Descending) => None,
                };
                next.set_sort_key(ctx, column, order)?;
            }

            ViewAction::ClearSort => {
                next.sort.clear();
            }

            ViewAction::SetColumnVisibility { column, visible } => {
                let descriptor = ctx.column(column)?;
                if !*visible && !descriptor.hideable {
                    return Err(ViewStateError::NotHideable(column.clone()));
                }
                next.column_visibility.insert(column.clone(), *visible);
            }

            ViewAction::ResetColumnVisibility => {
                next.column_visibility.clear();
            }

            ViewAction::SetPageIndex { index } => {
                next.pagination.page_index = *index;
            }

            ViewAction::SetPageSize { size } => {
                if *size == 0 {
                    return Err(ViewStateError::InvalidPageSize(*size));
                }
                next.pagination = Pagination::new(*size);
            }

            ViewAction::NextPage => {
                next.pagination.page_index = next.pagination.page_index.saturating_add(1);
            }

            ViewAction::PreviousPage => {
                next.pagination.page_index = next.pagination.page_index.saturating_sub(1);
            }

            ViewAction::FirstPage => {
                next.pagination.page_index = 0;
            }

            // Clamped to the last page below
            ViewAction::LastPage => {
                next.pagination.page_index = usize::MAX;
            }
        }

        if action.changes_filters() {
            next.pagination.page_index = 0;
        }

        let rows = filter_rows(ctx.records, &next, ctx.schema, ctx.fuzzy).len();
        next.pagination = next.pagination.clamped(rows);
        Ok(next)
    }

    fn set_sort_key(
        &mut self,
        ctx: &ViewContext<'_>,
        column: &str,
        order: Option<SortOrder>,
    ) -> Result<(), ViewStateError> {
        let descriptor = ctx.column(column)?;
        if !descriptor.sortable {
            return Err(ViewStateError::NotSortable(column.to_string()));
        }
        match order {
            Some(order) => match self.sort.iter_mut().find(|k| k.column == column) {
                Some(existing) => existing.order = order,
                None => self.sort.push(SortKey::new(column, order)),
            },
            None => self.sort.retain(|k| k.column != column),
        }
        Ok(())
    }
}
