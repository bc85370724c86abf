//! File data sources that load a dataset into a single Arrow batch.
//!
//! Every source reads through a DataFusion [`SessionContext`], so CSV, Parquet and
//! newline-delimited JSON inputs share schema inference and multi-file handling. Paths may be
//! given as glob patterns with [`expand_globs`].

use std::fmt::Debug;
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::dataframe::DataFrame;
use datafusion::prelude::SessionContext;
use tracing::{debug, instrument};

use crate::error::{ReportError, Result};

mod csv;
mod json;
mod parquet;

pub use csv::{CsvOptions, CsvSource};
pub use json::{JsonOptions, JsonSource};
pub use parquet::ParquetSource;

/// A file-backed dataset.
///
/// # Examples
///
/// ```rust,no_run
/// use term_dqr::sources::{CsvSource, DataSource};
///
/// # async fn example() -> term_dqr::Result<()> {
/// let source = CsvSource::new("data/users.csv")?;
/// let dataset = source.load().await?;
/// println!("{} rows", dataset.num_rows());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Builds a DataFrame over this source in the given context.
    async fn read(&self, ctx: &SessionContext) -> Result<DataFrame>;

    /// Short name of the file format, used in error reports.
    fn source_type(&self) -> &'static str;

    /// Returns a human-readable description of this data source.
    fn description(&self) -> String;

    /// Registers this source as a table so it can be queried before reporting.
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        let df = self.read(ctx).await?;
        ctx.register_table(table_name, df.into_view())?;
        Ok(())
    }

    /// Reads the whole source into one batch.
    async fn load(&self) -> Result<RecordBatch> {
        let ctx = SessionContext::new();
        let df = self.read(&ctx).await?;
        collect_batch(df).await.map_err(|e| {
            ReportError::data_source_with_source(
                self.source_type(),
                format!("Failed to read {}", self.description()),
                Box::new(e),
            )
        })
    }
}

/// Executes a DataFrame and concatenates the result into a single batch.
///
/// An empty result still carries the DataFrame's schema.
#[instrument(skip(df))]
pub async fn collect_batch(df: DataFrame) -> Result<RecordBatch> {
    let schema = df.schema().inner().clone();
    let batches = df.collect().await?;
    let schema = batches.first().map(RecordBatch::schema).unwrap_or(schema);
    let batch = concat_batches(&schema, &batches)?;
    debug!(
        batches = batches.len(),
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "Collected dataset"
    );
    Ok(batch)
}

/// Expands glob patterns into the files they match, in pattern order.
pub async fn expand_globs(patterns: &[String]) -> Result<Vec<String>> {
    use glob::glob;

    let mut paths = Vec::new();
    for pattern in patterns {
        let matches = glob(pattern).map_err(|e| {
            ReportError::Configuration(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        for entry in matches {
            let path = entry.map_err(|e| ReportError::Io(std::io::Error::other(e)))?;

            if path.is_file() {
                if let Some(path_str) = path.to_str() {
                    paths.push(path_str.to_string());
                }
            }
        }
    }

    if paths.is_empty() {
        return Err(ReportError::data_source(
            "file",
            "No files found matching glob patterns",
        ));
    }

    Ok(paths)
}

/// Returns `true` when the string contains glob metacharacters.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

pub(crate) fn non_empty(paths: Vec<String>) -> Result<Vec<String>> {
    if paths.is_empty() {
        return Err(ReportError::Configuration(
            "At least one path must be provided".to_string(),
        ));
    }
    Ok(paths)
}

/// File extension DataFusion should accept for these paths, with a leading dot.
///
/// All paths must share one extension; `fallback` is used for paths without one.
pub(crate) fn shared_extension(paths: &[String], fallback: &str) -> Result<String> {
    let extension_of = |path: &String| {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_else(|| fallback.to_string())
    };
    let mut extensions = paths.iter().map(extension_of);
    let first = extensions
        .next()
        .ok_or_else(|| ReportError::Configuration("No paths to read".to_string()))?;
    if let Some(other) = extensions.find(|ext| *ext != first) {
        return Err(ReportError::Configuration(format!(
            "Input files must share one extension, found '{first}' and '{other}'"
        )));
    }
    Ok(first)
}
