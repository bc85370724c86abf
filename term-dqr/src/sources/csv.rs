//! CSV file source.

use std::sync::Arc;

use arrow::datatypes::Schema;
use async_trait::async_trait;
use datafusion::dataframe::DataFrame;
use datafusion::prelude::{CsvReadOptions, SessionContext};
use tracing::{info, instrument};

use super::{expand_globs, non_empty, shared_extension, DataSource};
use crate::error::Result;

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Escape character (default: None)
    pub escape: Option<u8>,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
    /// Schema to use (if None, will be inferred)
    pub schema: Option<Arc<Schema>>,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            escape: None,
            comment: None,
            schema: None,
            schema_infer_max_records: 1000,
        }
    }
}

/// A CSV data source over one or more files with the same layout.
///
/// Empty fields are read as nulls and count as missing values in the report.
///
/// # Examples
///
/// ```rust,no_run
/// use term_dqr::sources::{CsvOptions, CsvSource};
///
/// # async fn example() -> term_dqr::Result<()> {
/// let source = CsvSource::new("data/users.csv")?;
///
/// let options = CsvOptions {
///     delimiter: b'\t',
///     has_header: false,
///     ..Default::default()
/// };
/// let source = CsvSource::with_options("data/users.tsv", options)?;
///
/// let source = CsvSource::from_glob("data/*.csv").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    paths: Vec<String>,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source from a single file path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl Into<String>, options: CsvOptions) -> Result<Self> {
        Ok(Self {
            paths: vec![path.into()],
            options,
        })
    }

    /// Creates a CSV source from multiple file paths.
    pub fn from_paths(paths: Vec<String>) -> Result<Self> {
        Ok(Self {
            paths: non_empty(paths)?,
            options: CsvOptions::default(),
        })
    }

    /// Creates a CSV source from a glob pattern.
    pub async fn from_glob(pattern: impl Into<String>) -> Result<Self> {
        Self::from_globs(vec![pattern.into()]).await
    }

    /// Creates a CSV source from multiple glob patterns.
    pub async fn from_globs(patterns: Vec<String>) -> Result<Self> {
        let paths = expand_globs(&patterns).await?;
        Self::from_paths(paths)
    }

    /// Sets custom options for this CSV source.
    pub fn with_custom_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }
}

#[async_trait]
impl DataSource for CsvSource {
    #[instrument(skip(self, ctx), fields(
        source.type = "csv",
        source.files = self.paths.len(),
        csv.delimiter = %self.options.delimiter as char,
        csv.has_header = self.options.has_header
    ))]
    async fn read(&self, ctx: &SessionContext) -> Result<DataFrame> {
        info!(source.paths = ?self.paths, "Reading CSV data source");

        let extension = shared_extension(&self.paths, ".csv")?;
        let mut csv_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .schema_infer_max_records(self.options.schema_infer_max_records)
            .file_extension(&extension);

        if let Some(escape) = self.options.escape {
            csv_options = csv_options.escape(escape);
        }
        if let Some(comment) = self.options.comment {
            csv_options = csv_options.comment(comment);
        }
        if let Some(schema) = &self.options.schema {
            csv_options = csv_options.schema(schema);
        }

        Ok(ctx.read_csv(self.paths.clone(), csv_options).await?)
    }

    fn source_type(&self) -> &'static str {
        "CSV"
    }

    fn description(&self) -> String {
        if self.paths.len() == 1 {
            format!("CSV file: {}", self.paths[0])
        } else {
            format!("CSV files: {} files", self.paths.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_infers_types_and_nulls() {
        let file = csv_file(".csv", "age,city\n25,NY\n30,LA\n25,NY\n40,NY\n,LA\n");
        let source = CsvSource::new(file.path().to_str().unwrap()).unwrap();
        let batch = source.load().await.unwrap();

        assert_eq!(batch.num_rows(), 5);
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Int64);
        assert_eq!(batch.column(0).null_count(), 1);
        assert_eq!(batch.schema().field(1).name(), "city");
    }

    #[tokio::test]
    async fn test_tab_separated_without_header() {
        let file = csv_file(".tsv", "1\tx\n2\ty\n");
        let options = CsvOptions {
            delimiter: b'\t',
            has_header: false,
            ..Default::default()
        };
        let source = CsvSource::with_options(file.path().to_str().unwrap(), options).unwrap();
        let batch = source.load().await.unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 2);
    }

    #[tokio::test]
    async fn test_multiple_files_are_concatenated() {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in [("a.csv", "x,y\n1,a\n2,b\n"), ("b.csv", "x,y\n3,c\n")] {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        let source = CsvSource::from_glob(format!("{}/*.csv", dir.path().display()))
            .await
            .unwrap();
        assert_eq!(source.paths().len(), 2);
        assert_eq!(source.load().await.unwrap().num_rows(), 3);
    }

    #[tokio::test]
    async fn test_register_as_table() {
        let file = csv_file(".csv", "x\n1\n2\n3\n");
        let source = CsvSource::new(file.path().to_str().unwrap()).unwrap();
        let ctx = SessionContext::new();
        source.register(&ctx, "numbers").await.unwrap();

        let df = ctx.sql("SELECT x FROM numbers WHERE x > 1").await.unwrap();
        let batch = crate::sources::collect_batch(df).await.unwrap();
        assert_eq!(batch.num_rows(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let source = CsvSource::new("/nonexistent/data.csv").unwrap();
        assert!(source.load().await.is_err());
    }

    #[test]
    fn test_description() {
        let source = CsvSource::new("data.csv").unwrap();
        assert_eq!(source.description(), "CSV file: data.csv");

        let source = CsvSource::from_paths(vec!["a.csv".into(), "b.csv".into()]).unwrap();
        assert_eq!(source.description(), "CSV files: 2 files");

        assert!(CsvSource::from_paths(Vec::new()).is_err());
    }
}
