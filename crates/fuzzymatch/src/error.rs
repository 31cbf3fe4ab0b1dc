//! Error types for metric and configuration parsing

use thiserror::Error;

pub use fuzzymatch_ffi_common::FfiError;

/// Errors raised when selecting a similarity metric
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    /// Numeric metric id from the C boundary is not known
    #[error("unknown metric id {0}")]
    UnknownId(i32),

    /// Metric name from configuration is not known
    #[error("unknown metric name '{0}' (expected ratio, levenshtein or jaro_winkler)")]
    UnknownName(String),
}
