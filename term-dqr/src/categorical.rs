//! Frequency statistics for categorical columns.
//!
//! Values are counted by identity (see [`ValueKey`]) and reported by their Arrow display
//! string. Frequency ties are broken by [`ModeTieBreak`]; with the default rule the value seen
//! first in row order wins, which keeps `mode` and `mode_2` stable across runs.

use std::cmp::Ordering;
use std::collections::HashMap;

use arrow::array::ArrayRef;
use serde::Serialize;
use tracing::{debug, warn};

use crate::classifier::ColumnClassification;
use crate::config::{ModeTieBreak, ReportConfig};
use crate::error::Result;
use crate::stats::round_to;
use crate::values::{value_keys, ValueFormatter, ValueKey};

/// Count of one distinct value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueFrequency {
    pub value: String,
    pub count: u64,
    /// Row of the first occurrence
    pub first_row: usize,
}

/// One row of the categorical report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    #[serde(flatten)]
    pub column: ColumnClassification,
    pub mode: Option<String>,
    pub mode_frequency: Option<u64>,
    pub mode_percent: Option<f64>,
    pub mode_2: Option<String>,
    pub mode_2_frequency: Option<u64>,
    pub mode_2_percent: Option<f64>,
}

impl CategoricalSummary {
    /// A summary with every statistic null.
    pub fn empty(column: ColumnClassification) -> Self {
        Self {
            column,
            mode: None,
            mode_frequency: None,
            mode_percent: None,
            mode_2: None,
            mode_2_frequency: None,
            mode_2_percent: None,
        }
    }
}

/// Builds the frequency table of a column, most frequent first.
pub fn frequency_table(
    column: &ArrayRef,
    tie_break: ModeTieBreak,
    nan_as_missing: bool,
) -> Result<Vec<ValueFrequency>> {
    let keys = value_keys(column, nan_as_missing)?;

    let mut slots: HashMap<ValueKey, usize> = HashMap::new();
    let mut counts: Vec<(usize, u64)> = Vec::new();
    for (row, key) in keys.into_iter().enumerate() {
        let Some(key) = key else { continue };
        match slots.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key, counts.len());
                counts.push((row, 1));
            }
        }
    }

    let formatter = ValueFormatter::try_new(column)?;
    let mut table: Vec<ValueFrequency> = counts
        .into_iter()
        .map(|(first_row, count)| ValueFrequency {
            value: formatter.value(first_row),
            count,
            first_row,
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| tie(a, b, tie_break)));
    Ok(table)
}

fn tie(a: &ValueFrequency, b: &ValueFrequency, tie_break: ModeTieBreak) -> Ordering {
    match tie_break {
        ModeTieBreak::FirstOccurrence => a.first_row.cmp(&b.first_row),
        ModeTieBreak::Lexicographic => a
            .value
            .cmp(&b.value)
            .then_with(|| a.first_row.cmp(&b.first_row)),
    }
}

/// Summarises one categorical column.
///
/// A column whose values cannot be counted is reported with null statistics so that the rest
/// of the report is still produced.
pub fn summarize_categorical(
    column: &ArrayRef,
    classification: ColumnClassification,
    config: &ReportConfig,
) -> CategoricalSummary {
    let table = match frequency_table(column, config.tie_break, config.nan_as_missing) {
        Ok(table) => table,
        Err(err) => {
            warn!(
                column = %classification.name,
                error = %err,
                "Could not count values, reporting nulls"
            );
            return CategoricalSummary::empty(classification);
        }
    };

    let row_count = classification.row_count;
    let percent = |count: u64| round_to(count as f64 / row_count as f64 * 100.0, config.decimals);

    let mut summary = CategoricalSummary::empty(classification);
    let mut ranked = table.into_iter();
    if let Some(first) = ranked.next() {
        summary.mode_percent = Some(percent(first.count));
        summary.mode_frequency = Some(first.count);
        summary.mode = Some(first.value);
    }
    if let Some(second) = ranked.next() {
        summary.mode_2_percent = Some(percent(second.count));
        summary.mode_2_frequency = Some(second.count);
        summary.mode_2 = Some(second.value);
    }

    debug!(
        column = %summary.column.name,
        mode = ?summary.mode,
        mode_2 = ?summary.mode_2,
        "Summarised categorical column"
    );
    summary
}
