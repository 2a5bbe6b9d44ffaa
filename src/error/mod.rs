//! Error handling for the feature pipeline.
//!
//! Only structural problems are fatal: a required column missing from a
//! source table, a colliding feature-column name, or an I/O failure on
//! the load path. Unparseable date cells are coerced to `None` during
//! extraction and flow through the pipeline as censoring, never as errors.
//! Empty cohorts and under-supported lab concepts are logged and counted,
//! not raised.

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the feature pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A required column is absent from a source table
    #[error("missing required column `{column}` in table `{table}`")]
    MissingColumn {
        /// Source table name
        table: String,
        /// Missing column name
        column: String,
    },

    /// A feature column was produced twice (e.g. two lab concepts
    /// sanitizing to the same truncated token)
    #[error("duplicate feature column `{0}`")]
    DuplicateColumn(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error constructing or manipulating Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading or parsing a pipeline configuration file
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for feature pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
