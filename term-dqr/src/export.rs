//! Arrow and CSV rendering of the report tables.
//!
//! Both tables are materialised as Arrow batches with a fixed column order so that the same
//! layout backs CSV export, pretty printing and any downstream Arrow consumer. Statistic columns
//! of the continuous table are text because a single table mixes numeric and temporal rows.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use tracing::{debug, warn};

use crate::categorical::CategoricalSummary;
use crate::classifier::ColumnClassification;
use crate::continuous::{ContinuousSummary, StatValue};
use crate::error::{ReportError, Result};

/// Column names of the continuous table, in order.
pub const CONTINUOUS_COLUMNS: [&str; 12] = [
    "name",
    "declared_type",
    "count",
    "missing",
    "cardinality",
    "min",
    "first_qrt",
    "mean",
    "median",
    "third_qrt",
    "max",
    "std_dev",
];

/// Column names of the categorical table, in order.
pub const CATEGORICAL_COLUMNS: [&str; 11] = [
    "name",
    "declared_type",
    "count",
    "missing",
    "cardinality",
    "mode",
    "mode_freq",
    "mode_percent",
    "mode_2",
    "mode_2_freq",
    "mode_2_percent",
];

fn classification_fields() -> Vec<Field> {
    vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("declared_type", DataType::Utf8, false),
        Field::new("count", DataType::UInt64, false),
        Field::new("missing", DataType::Float64, false),
        Field::new("cardinality", DataType::UInt64, false),
    ]
}

/// Schema of the continuous table.
pub fn continuous_schema() -> SchemaRef {
    let mut fields = classification_fields();
    fields.extend(
        CONTINUOUS_COLUMNS[5..]
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true)),
    );
    Arc::new(Schema::new(fields))
}

/// Schema of the categorical table.
pub fn categorical_schema() -> SchemaRef {
    let mut fields = classification_fields();
    fields.extend([
        Field::new("mode", DataType::Utf8, true),
        Field::new("mode_freq", DataType::UInt64, true),
        Field::new("mode_percent", DataType::Float64, true),
        Field::new("mode_2", DataType::Utf8, true),
        Field::new("mode_2_freq", DataType::UInt64, true),
        Field::new("mode_2_percent", DataType::Float64, true),
    ]);
    Arc::new(Schema::new(fields))
}

fn classification_columns<'a>(
    rows: impl Iterator<Item = &'a ColumnClassification> + Clone,
) -> Vec<ArrayRef> {
    vec![
        Arc::new(StringArray::from_iter_values(
            rows.clone().map(|c| c.name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.clone().map(|c| c.declared_type.as_str()),
        )),
        Arc::new(UInt64Array::from_iter_values(
            rows.clone().map(|c| c.non_missing_count),
        )),
        Arc::new(Float64Array::from_iter_values(
            rows.clone().map(|c| c.missing_percent),
        )),
        Arc::new(UInt64Array::from_iter_values(rows.map(|c| c.cardinality))),
    ]
}

/// Builds the continuous table.
pub fn continuous_batch(rows: &[ContinuousSummary]) -> Result<RecordBatch> {
    let mut columns = classification_columns(rows.iter().map(|r| &r.column));
    for index in 0..7 {
        let values: StringArray = rows
            .iter()
            .map(|row| row.statistics()[index].map(StatValue::to_string))
            .collect();
        columns.push(Arc::new(values));
    }
    Ok(RecordBatch::try_new(continuous_schema(), columns)?)
}

/// Builds the categorical table.
pub fn categorical_batch(rows: &[CategoricalSummary]) -> Result<RecordBatch> {
    let mut columns = classification_columns(rows.iter().map(|r| &r.column));
    columns.extend([
        Arc::new(rows.iter().map(|r| r.mode.as_deref()).collect::<StringArray>()) as ArrayRef,
        Arc::new(rows.iter().map(|r| r.mode_frequency).collect::<UInt64Array>()) as ArrayRef,
        Arc::new(rows.iter().map(|r| r.mode_percent).collect::<Float64Array>()) as ArrayRef,
        Arc::new(rows.iter().map(|r| r.mode_2.as_deref()).collect::<StringArray>()) as ArrayRef,
        Arc::new(rows.iter().map(|r| r.mode_2_frequency).collect::<UInt64Array>()) as ArrayRef,
        Arc::new(rows.iter().map(|r| r.mode_2_percent).collect::<Float64Array>()) as ArrayRef,
    ]);
    Ok(RecordBatch::try_new(categorical_schema(), columns)?)
}

/// Writes a batch as CSV with a header row. Null cells are written empty.
pub fn write_csv(batch: &RecordBatch, path: &Path, delimiter: u8) -> Result<()> {
    write_csv_file(batch, path, delimiter).map_err(|e| ReportError::export(path, e))?;
    debug!(path = %path.display(), rows = batch.num_rows(), "Wrote CSV table");
    Ok(())
}

/// Writes several tables as CSV, replacing either every destination or none of them.
///
/// Each table is staged in a hidden sibling of its destination. Staged files are renamed into
/// place once all tables are written, and removed if any write fails.
pub fn write_csv_tables(tables: &[(&RecordBatch, &Path)], delimiter: u8) -> Result<()> {
    let staged: Vec<PathBuf> = tables.iter().map(|(_, path)| staging_path(path)).collect();

    let written = tables
        .iter()
        .zip(&staged)
        .try_for_each(|((batch, path), staging)| {
            write_csv_file(batch, staging, delimiter).map_err(|e| ReportError::export(*path, e))
        })
        .and_then(|()| {
            tables.iter().zip(&staged).try_for_each(|((_, path), staging)| {
                fs::rename(staging, path).map_err(|e| ReportError::export(*path, e))
            })
        });

    if written.is_err() {
        for staging in staged.iter().filter(|p| p.exists()) {
            if let Err(e) = fs::remove_file(staging) {
                warn!(path = %staging.display(), error = %e, "Failed to remove staged CSV file");
            }
        }
    }
    written?;

    for (batch, path) in tables {
        debug!(path = %path.display(), rows = batch.num_rows(), "Wrote CSV table");
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| OsStr::new("table")));
    name.push(".partial");
    path.with_file_name(name)
}

fn write_csv_file(
    batch: &RecordBatch,
    path: &Path,
    delimiter: u8,
) -> std::result::Result<(), ArrowError> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_delimiter(delimiter)
        .build(BufWriter::new(file));
    writer.write(batch)?;
    writer.into_inner().flush()?;
    Ok(())
}

/// Renders a batch as a text table.
pub fn pretty_table(batch: &RecordBatch) -> Result<String> {
    Ok(pretty_format_batches(std::slice::from_ref(batch))?.to_string())
}
