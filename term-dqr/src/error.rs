//! Error types for the data quality report library.
//!
//! All fallible operations return [`ReportError`] through the crate-wide [`Result`] alias.
//! Only dataset-level structural problems are fatal while building a report; a column whose
//! statistics cannot be computed (for example because every value is missing) produces null
//! statistics instead of an error.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the report library.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The dataset cannot be summarised (no rows or no columns).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Writing a report table to its destination failed.
    #[error("Failed to export report to '{}': {source}", path.display())]
    Export {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error from data source operations.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV", "Parquet", "JSON")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ReportError>`.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an export error for the given destination.
    pub fn export(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Export {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Returns true when the error is an export failure.
    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export { .. })
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ReportError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| wrap(msg, e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(&f(), e.into()))
    }
}

fn wrap(msg: &str, err: ReportError) -> ReportError {
    match err {
        // Keep the variant callers match on; only the message gains context.
        ReportError::InvalidInput(inner) => ReportError::InvalidInput(format!("{msg}: {inner}")),
        ReportError::Export { .. } => err,
        ReportError::Internal(inner) => ReportError::Internal(format!("{msg}: {inner}")),
        other => ReportError::Internal(format!("{msg}: {other}")),
    }
}
