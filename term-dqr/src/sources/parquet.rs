//! Parquet file source.

use async_trait::async_trait;
use datafusion::dataframe::DataFrame;
use datafusion::prelude::{ParquetReadOptions, SessionContext};
use tracing::{info, instrument};

use super::{expand_globs, non_empty, shared_extension, DataSource};
use crate::error::Result;

/// A Parquet data source. The schema comes from the file metadata.
#[derive(Debug, Clone)]
pub struct ParquetSource {
    paths: Vec<String>,
}

impl ParquetSource {
    /// Creates a new Parquet source from a single file path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        Ok(Self {
            paths: vec![path.into()],
        })
    }

    /// Creates a Parquet source from multiple file paths.
    pub fn from_paths(paths: Vec<String>) -> Result<Self> {
        Ok(Self {
            paths: non_empty(paths)?,
        })
    }

    /// Creates a Parquet source from a glob pattern.
    pub async fn from_glob(pattern: impl Into<String>) -> Result<Self> {
        Self::from_globs(vec![pattern.into()]).await
    }

    /// Creates a Parquet source from multiple glob patterns.
    pub async fn from_globs(patterns: Vec<String>) -> Result<Self> {
        let paths = expand_globs(&patterns).await?;
        Self::from_paths(paths)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

#[async_trait]
impl DataSource for ParquetSource {
    #[instrument(skip(self, ctx), fields(source.type = "parquet", source.files = self.paths.len()))]
    async fn read(&self, ctx: &SessionContext) -> Result<DataFrame> {
        info!(source.paths = ?self.paths, "Reading Parquet data source");

        let extension = shared_extension(&self.paths, ".parquet")?;
        let mut options = ParquetReadOptions::default();
        options.file_extension = &extension;
        Ok(ctx.read_parquet(self.paths.clone(), options).await?)
    }

    fn source_type(&self) -> &'static str {
        "Parquet"
    }

    fn description(&self) -> String {
        if self.paths.len() == 1 {
            format!("Parquet file: {}", self.paths[0])
        } else {
            format!("Parquet files: {} files", self.paths.len())
        }
    }
}
