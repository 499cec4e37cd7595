/// CatalogView Errors

use crate::column::FilterVariant;
use thiserror::Error;

/// A view-state mutation that was rejected. The previously committed state is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewStateError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' does not support sorting")]
    NotSortable(String),

    #[error("column '{0}' does not support column filtering")]
    NotFilterable(String),

    #[error("column '{0}' cannot be hidden")]
    NotHideable(String),

    #[error("column '{column}' uses the {expected:?} filter, got a {actual:?} value")]
    FilterVariantMismatch {
        column: String,
        expected: FilterVariant,
        actual: FilterVariant,
    },

    #[error("page size must be positive, got {0}")]
    InvalidPageSize(usize),
}

/// Configuration that could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: String, value: String },

    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

/// Failure of the record store collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read record source: {0}")]
    Io(#[from] std::io::Error),

    #[error("record source is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index} is invalid: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("record source unavailable: {0}")]
    Unavailable(String),
}
