/// View-state mutations
///
/// Every way a user can change what the table shows is one `ViewAction`. Actions
/// are plain data so a host can queue, log or ship them (e.g. from a UI event loop)
/// before applying them with `ViewState::apply`.

use crate::filter::FilterValue;
use crate::view::SortOrder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewAction {
    /// Replace the free-text global query
    SetGlobalFilter { text: String },

    /// Set or replace one column's filter; `None` or an empty value removes it
    SetColumnFilter {
        column: String,
        value: Option<FilterValue>,
    },

    /// Remove every column filter
    ClearColumnFilters,

    /// Set a column's sort direction in place, append it as the lowest-priority
    /// key, or remove it with `None`
    SetSort {
        column: String,
        order: Option<SortOrder>,
    },

    /// Header-click cycle: unsorted -> ascending -> descending -> unsorted
    ToggleSort { column: String },

    /// Remove every sort key
    ClearSort,

    /// Show or hide a column
    SetColumnVisibility { column: String, visible: bool },

    /// Show every column
    ResetColumnVisibility,

    /// Jump to a page (clamped to the available pages)
    SetPageIndex { index: usize },

    /// Change rows per page
    SetPageSize { size: usize },

    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
}

impl ViewAction {
    /// True for actions that change which rows survive filtering.
    pub fn changes_filters(&self) -> bool {
        matches!(
            self,
            ViewAction::SetGlobalFilter { .. }
                | ViewAction::SetColumnFilter { .. }
                | ViewAction::ClearColumnFilters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_json_shape() {
        let action: ViewAction = serde_json::from_str(
            r#"{"type": "SetColumnFilter", "column": "status", "value": {"variant": "select", "value": "ACTIVE"}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            ViewAction::SetColumnFilter {
                column: "status".into(),
                value: Some(FilterValue::select("ACTIVE")),
            }
        );
        assert!(action.changes_filters());

        let action: ViewAction = serde_json::from_str(r#"{"type": "NextPage"}"#).unwrap();
        assert_eq!(action, ViewAction::NextPage);
        assert!(!action.changes_filters());
    }

    #[test]
    fn test_sort_action_json_shape() {
        let action: ViewAction =
            serde_json::from_str(r#"{"type": "SetSort", "column": "stock", "order": "descending"}"#).unwrap();
        assert_eq!(
            action,
            ViewAction::SetSort { column: "stock".into(), order: Some(SortOrder::Descending) }
        );

        let clear: ViewAction =
            serde_json::from_str(r#"{"type": "SetSort", "column": "stock", "order": null}"#).unwrap();
        assert_eq!(clear, ViewAction::SetSort { column: "stock".into(), order: None });
    }
}
