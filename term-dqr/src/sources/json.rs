//! Newline-delimited JSON file source.

use std::sync::Arc;

use arrow::datatypes::Schema;
use async_trait::async_trait;
use datafusion::dataframe::DataFrame;
use datafusion::prelude::{NdJsonReadOptions, SessionContext};
use tracing::{info, instrument};

use super::{expand_globs, non_empty, shared_extension, DataSource};
use crate::error::Result;

/// Options for configuring JSON reading.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Schema to use (if None, will be inferred)
    pub schema: Option<Arc<Schema>>,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            schema: None,
            schema_infer_max_records: 1000,
        }
    }
}

/// A data source over newline-delimited JSON files, one object per row.
#[derive(Debug, Clone)]
pub struct JsonSource {
    paths: Vec<String>,
    options: JsonOptions,
}

impl JsonSource {
    /// Creates a new JSON source from a single file path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        Self::with_options(path, JsonOptions::default())
    }

    /// Creates a new JSON source with custom options.
    pub fn with_options(path: impl Into<String>, options: JsonOptions) -> Result<Self> {
        Ok(Self {
            paths: vec![path.into()],
            options,
        })
    }

    /// Creates a JSON source from multiple file paths.
    pub fn from_paths(paths: Vec<String>) -> Result<Self> {
        Ok(Self {
            paths: non_empty(paths)?,
            options: JsonOptions::default(),
        })
    }

    /// Creates a JSON source from a glob pattern.
    pub async fn from_glob(pattern: impl Into<String>) -> Result<Self> {
        Self::from_globs(vec![pattern.into()]).await
    }

    /// Creates a JSON source from multiple glob patterns.
    pub async fn from_globs(patterns: Vec<String>) -> Result<Self> {
        let paths = expand_globs(&patterns).await?;
        Self::from_paths(paths)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

#[async_trait]
impl DataSource for JsonSource {
    #[instrument(skip(self, ctx), fields(source.type = "json", source.files = self.paths.len()))]
    async fn read(&self, ctx: &SessionContext) -> Result<DataFrame> {
        info!(source.paths = ?self.paths, "Reading JSON data source");

        let extension = shared_extension(&self.paths, ".json")?;
        let mut options = NdJsonReadOptions::default().file_extension(&extension);
        options.schema_infer_max_records = self.options.schema_infer_max_records;
        if let Some(schema) = &self.options.schema {
            options = options.schema(schema);
        }
        Ok(ctx.read_json(self.paths.clone(), options).await?)
    }

    fn source_type(&self) -> &'static str {
        "JSON"
    }

    fn description(&self) -> String {
        if self.paths.len() == 1 {
            format!("JSON file: {}", self.paths[0])
        } else {
            format!("JSON files: {} files", self.paths.len())
        }
    }
}
