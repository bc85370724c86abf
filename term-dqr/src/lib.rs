//! # term-dqr - Data Quality Reports for Arrow datasets
//!
//! term-dqr produces a quick exploratory data-quality report for a tabular dataset. Every
//! column is routed to one of two feature groups and summarised the way that group is
//! usually inspected:
//!
//! - **Continuous** columns (numeric and temporal) get min, quartiles, mean, median, max and
//!   standard deviation.
//! - **Categorical** columns get the two most frequent values with their frequencies and
//!   percentages.
//!
//! Both tables carry the column's declared type, non-missing count, missing percentage and
//! cardinality, and are sorted with the most incomplete columns first.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use term_dqr::prelude::*;
//!
//! # fn main() -> term_dqr::Result<()> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("age", DataType::Int64, true),
//!     Field::new("city", DataType::Utf8, true),
//! ]));
//! let dataset = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![Some(25), Some(30), Some(25), Some(40), None])),
//!         Arc::new(StringArray::from(vec!["NY", "LA", "NY", "NY", "LA"])),
//!     ],
//! )?;
//!
//! let (continuous, categorical) = generate_report(&dataset, false)?;
//! assert_eq!(continuous[0].column.missing_percent, 20.0);
//! assert_eq!(categorical[0].mode.as_deref(), Some("NY"));
//! assert_eq!(categorical[0].mode_percent, Some(60.0));
//! # Ok(())
//! # }
//! ```
//!
//! Passing `true` as the second argument also writes `continuous_data.csv` and
//! `categorical_data.csv` to the working directory. Use [`DataQualityReport`] with a
//! [`ReportConfig`] to change destinations, rounding or the mode tie-break rule.
//!
//! ## Loading data
//!
//! The [`sources`] module reads CSV, Parquet and newline-delimited JSON files (including glob
//! patterns) into a single Arrow batch through DataFusion:
//!
//! ```rust,no_run
//! use term_dqr::prelude::*;
//! use term_dqr::sources::CsvSource;
//!
//! # async fn example() -> term_dqr::Result<()> {
//! let dataset = CsvSource::from_glob("data/*.csv").await?.load().await?;
//! let report = DataQualityReport::generate(&dataset)?;
//! println!("{}", report.pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`classifier`**: value kinds, cardinality and the continuous/categorical routing
//! - **`continuous`** / **`categorical`**: per-group summarisers
//! - **`report`**: assembly, ordering and the [`generate_report`] entry point
//! - **`export`**: Arrow tables, CSV files and text rendering
//! - **`sources`**: file loaders
//! - **`logging`**: subscriber setup for applications

pub mod categorical;
pub mod classifier;
pub mod config;
pub mod continuous;
pub mod error;
pub mod export;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod sources;
pub mod stats;
pub mod values;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use config::{ExportConfig, ModeTieBreak, ReportConfig};
pub use error::{ReportError, Result};
pub use report::{generate_report, DataQualityReport};
