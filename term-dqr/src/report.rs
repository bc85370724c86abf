//! Report assembly: classification, summarisation and ordering of both feature tables.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use term_dqr::report::DataQualityReport;
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("age", DataType::Int64, true),
//!     Field::new("city", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![Some(25), Some(30), Some(25), Some(40), None])),
//!         Arc::new(StringArray::from(vec!["NY", "LA", "NY", "NY", "LA"])),
//!     ],
//! )
//! .unwrap();
//!
//! let report = DataQualityReport::generate(&batch).unwrap();
//! assert_eq!(report.continuous_report()[0].column.name, "age");
//! assert_eq!(report.categorical_report()[0].mode.as_deref(), Some("NY"));
//! ```

use std::path::Path;

use arrow::record_batch::RecordBatch;
use serde::Serialize;
use tracing::{info, instrument};

use crate::categorical::{summarize_categorical, CategoricalSummary};
use crate::classifier::{classify, ColumnClassification};
use crate::config::ReportConfig;
use crate::continuous::{summarize_continuous, ContinuousSummary};
use crate::error::Result;
use crate::export;

/// The two report tables for one dataset.
///
/// Both tables are sorted by missing percentage, highest first; columns with equal missing
/// percentages keep their dataset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQualityReport {
    continuous: Vec<ContinuousSummary>,
    categorical: Vec<CategoricalSummary>,
    #[serde(skip)]
    config: ReportConfig,
}

impl DataQualityReport {
    /// Builds the report with the default configuration.
    pub fn generate(dataset: &RecordBatch) -> Result<Self> {
        Self::generate_with_config(dataset, &ReportConfig::default())
    }

    /// Builds the report with a custom configuration.
    #[instrument(
        skip(dataset, config),
        fields(columns = dataset.num_columns(), rows = dataset.num_rows())
    )]
    pub fn generate_with_config(dataset: &RecordBatch, config: &ReportConfig) -> Result<Self> {
        config.validate()?;
        let classifications = classify(dataset, config)?;

        let mut continuous = Vec::new();
        let mut categorical = Vec::new();
        for (classification, column) in classifications.into_iter().zip(dataset.columns()) {
            if classification.is_continuous() {
                continuous.push(summarize_continuous(column, classification, config));
            } else {
                categorical.push(summarize_categorical(column, classification, config));
            }
        }

        sort_by_missing(&mut continuous, |s| &s.column);
        sort_by_missing(&mut categorical, |s| &s.column);

        info!(
            continuous = continuous.len(),
            categorical = categorical.len(),
            "Generated data quality report"
        );

        Ok(Self {
            continuous,
            categorical,
            config: config.clone(),
        })
    }

    /// Summaries of the continuous columns.
    pub fn continuous_report(&self) -> &[ContinuousSummary] {
        &self.continuous
    }

    /// Summaries of the categorical columns.
    pub fn categorical_report(&self) -> &[CategoricalSummary] {
        &self.categorical
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Number of dataset columns covered by the report.
    pub fn column_count(&self) -> usize {
        self.continuous.len() + self.categorical.len()
    }

    pub fn into_tables(self) -> (Vec<ContinuousSummary>, Vec<CategoricalSummary>) {
        (self.continuous, self.categorical)
    }

    /// The continuous table as an Arrow batch in export column order.
    pub fn continuous_batch(&self) -> Result<RecordBatch> {
        export::continuous_batch(&self.continuous)
    }

    /// The categorical table as an Arrow batch in export column order.
    pub fn categorical_batch(&self) -> Result<RecordBatch> {
        export::categorical_batch(&self.categorical)
    }

    /// Writes both tables as CSV.
    ///
    /// Destinations left as `None` fall back to the configured paths, which default to
    /// `continuous_data.csv` and `categorical_data.csv`. Both files are replaced together: if
    /// either table fails to write, neither destination changes.
    pub fn export(
        &self,
        continuous_destination: Option<&Path>,
        categorical_destination: Option<&Path>,
    ) -> Result<()> {
        let settings = &self.config.export;
        let continuous_path =
            continuous_destination.unwrap_or(settings.continuous_path.as_path());
        let categorical_path =
            categorical_destination.unwrap_or(settings.categorical_path.as_path());

        export::write_csv_tables(
            &[
                (&self.continuous_batch()?, continuous_path),
                (&self.categorical_batch()?, categorical_path),
            ],
            settings.delimiter,
        )?;

        info!(
            continuous = %continuous_path.display(),
            categorical = %categorical_path.display(),
            "Exported data quality report"
        );
        Ok(())
    }

    /// Serialises both tables as a JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders both tables as text tables.
    pub fn pretty(&self) -> Result<String> {
        let continuous = export::pretty_table(&self.continuous_batch()?)?;
        let categorical = export::pretty_table(&self.categorical_batch()?)?;
        Ok(format!(
            "Continuous features\n{continuous}\n\nCategorical features\n{categorical}"
        ))
    }
}

/// Stable sort by missing percentage, descending.
fn sort_by_missing<T>(rows: &mut [T], column: impl Fn(&T) -> &ColumnClassification) {
    rows.sort_by(|a, b| {
        column(b)
            .missing_percent
            .total_cmp(&column(a).missing_percent)
    });
}

/// Builds both report tables and optionally exports them to the default destinations.
pub fn generate_report(
    dataset: &RecordBatch,
    export: bool,
) -> Result<(Vec<ContinuousSummary>, Vec<CategoricalSummary>)> {
    let report = DataQualityReport::generate(dataset)?;
    if export {
        report.export(None, None)?;
    }
    Ok(report.into_tables())
}
