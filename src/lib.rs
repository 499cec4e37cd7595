/// CatalogView - View Derivation for Catalog Tables
///
/// Turns an in-memory record snapshot plus a view state (global fuzzy query, per-column
/// filters, multi-key sort, column visibility, page position) into the exact rows a
/// table should render, together with the page metadata its controls need.
/// Derivation is a pure function of its inputs; state changes go through validated
/// actions that return a new state.

pub mod action;
pub mod catalog;
pub mod column;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod fuzzy;
pub mod pagination;
pub mod source;
pub mod state;
pub mod table;
pub mod view;

pub use action::ViewAction;
pub use column::{ColumnDescriptor, ColumnType, ColumnValue, FilterVariant};
pub use config::ViewConfig;
pub use controller::{DataStatus, ViewController};
pub use error::{ConfigError, FetchError, ViewStateError};
pub use filter::{ColumnFilter, FilterValue};
pub use fuzzy::{FuzzyConfig, FuzzyMode};
pub use pagination::{PageBlock, PageSummary, Pagination};
pub use source::{JsonRecordSource, RecordSource};
pub use state::{ViewContext, ViewState, DEFAULT_PAGE_SIZE};
pub use table::{Record, Schema};
pub use view::{derive_view, derive_view_with, DerivedView, ProjectionView, SortKey, SortOrder};
