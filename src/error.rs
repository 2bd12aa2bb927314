//! Crate-level error type.
//!
//! Cell parsing, block building and layout never fail; errors only come from
//! the edges (reading documents, loading configuration, writing exports) and
//! from view selection that matches nothing.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SynopticError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("table {index} not found (document has {available} tables)")]
    TableNotFound { index: usize, available: usize },
    #[error("no matching rows for {0}")]
    NoMatchingRows(String),
    #[error("document contains no recognizable tables")]
    NoTables,
    #[error("invalid year value: {0:?}")]
    InvalidYear(String),
    #[error("invalid x limits {lo}..{hi}: need lo < hi and a span of at most {max} years")]
    InvalidLimits { lo: f64, hi: f64, max: f64 },
    #[error("failed to format SVG: {0}")]
    Format(#[from] std::fmt::Error),
}
