//! Type classification: routes every column to the continuous or categorical group.
//!
//! A column is continuous when its Arrow type is numeric or temporal and categorical
//! otherwise. Any column with exactly two distinct non-missing values is categorical regardless
//! of its type, since binary-valued columns behave like booleans. The override only changes the
//! derived [`FeatureCategory`]; the declared type stays as read from the schema.

use std::collections::HashSet;
use std::fmt;

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::ReportConfig;
use crate::error::{ErrorContext, ReportError, Result};
use crate::stats::round_to;
use crate::values::{value_keys, ValueKind};

/// The feature group a column is summarised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    Continuous,
    Categorical,
}

impl FeatureCategory {
    /// Routes a column by its value kind and cardinality.
    pub fn route(kind: ValueKind, cardinality: u64, binary_cardinality: u64) -> Self {
        if cardinality == binary_cardinality {
            return Self::Categorical;
        }
        match kind {
            ValueKind::Numeric | ValueKind::Temporal => Self::Continuous,
            ValueKind::Other => Self::Categorical,
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => f.write_str("continuous"),
            Self::Categorical => f.write_str("categorical"),
        }
    }
}

/// Classification metadata shared by both report tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnClassification {
    pub name: String,
    /// Arrow type name as declared by the schema
    pub declared_type: String,
    pub value_kind: ValueKind,
    pub row_count: u64,
    pub non_missing_count: u64,
    /// Share of missing rows in percent
    pub missing_percent: f64,
    /// Distinct non-missing values
    pub cardinality: u64,
    pub effective_category: FeatureCategory,
}

impl ColumnClassification {
    pub fn missing_count(&self) -> u64 {
        self.row_count - self.non_missing_count
    }

    pub fn is_continuous(&self) -> bool {
        self.effective_category == FeatureCategory::Continuous
    }

    pub fn is_categorical(&self) -> bool {
        self.effective_category == FeatureCategory::Categorical
    }

    /// True when the binary override moved the column out of its declared group.
    pub fn is_binary_override(&self) -> bool {
        self.value_kind != ValueKind::Other && self.is_categorical()
    }
}

/// Classifies every column of the dataset, in schema order.
///
/// Fails with [`ReportError::InvalidInput`] when the dataset has no columns or no rows.
#[instrument(
    skip(dataset, config),
    fields(columns = dataset.num_columns(), rows = dataset.num_rows())
)]
pub fn classify(dataset: &RecordBatch, config: &ReportConfig) -> Result<Vec<ColumnClassification>> {
    if dataset.num_columns() == 0 {
        return Err(ReportError::invalid_input("dataset has no columns"));
    }
    if dataset.num_rows() == 0 {
        return Err(ReportError::invalid_input("dataset has no rows"));
    }

    let schema = dataset.schema();
    schema
        .fields()
        .iter()
        .zip(dataset.columns())
        .map(|(field, column)| classify_column(field.name(), column, config))
        .collect()
}

/// Classifies a single column.
pub fn classify_column(
    name: &str,
    column: &ArrayRef,
    config: &ReportConfig,
) -> Result<ColumnClassification> {
    let row_count = column.len() as u64;
    if row_count == 0 {
        return Err(ReportError::invalid_input(format!(
            "column '{name}' has no rows"
        )));
    }

    let keys = value_keys(column, config.nan_as_missing)
        .with_context(|| format!("Failed to read values of column '{name}'"))?;
    let mut distinct = HashSet::new();
    let mut non_missing_count = 0u64;
    for key in keys.into_iter().flatten() {
        non_missing_count += 1;
        distinct.insert(key);
    }
    let cardinality = distinct.len() as u64;

    let value_kind = ValueKind::of(column.data_type());
    let effective_category =
        FeatureCategory::route(value_kind, cardinality, config.binary_cardinality);
    let missing_percent = round_to(
        (row_count - non_missing_count) as f64 / row_count as f64 * 100.0,
        config.decimals,
    );

    debug!(
        column = name,
        kind = %value_kind,
        cardinality,
        category = %effective_category,
        "Classified column"
    );

    Ok(ColumnClassification {
        name: name.to_string(),
        declared_type: column.data_type().to_string(),
        value_kind,
        row_count,
        non_missing_count,
        missing_percent,
        cardinality,
        effective_category,
    })
}

/// Splits classifications into (continuous, categorical), keeping input order in each group.
pub fn partition(
    classifications: Vec<ColumnClassification>,
) -> (Vec<ColumnClassification>, Vec<ColumnClassification>) {
    classifications
        .into_iter()
        .partition(ColumnClassification::is_continuous)
}
