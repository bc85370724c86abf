//! Distributional statistics for continuous (numeric and temporal) columns.
//!
//! Statistics ignore missing values. Numeric statistics are rounded to the configured number
//! of decimals; temporal statistics keep the column's native precision and are reported as UTC
//! date-times (positions) or durations (`std_dev`). An all-missing column yields null for every
//! statistic rather than an error.

use std::fmt;

use arrow::array::ArrayRef;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::classifier::ColumnClassification;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::stats::{
    mean, quantile, round_to, sample_std_dev, tick_mean, tick_quantile, tick_std_dev,
};
use crate::values::{numeric_values, TemporalValues, ValueKind};

/// A single statistic of a continuous column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    DateTime(DateTime<Utc>),
    #[serde(serialize_with = "serialize_display")]
    Duration(TimeDelta),
}

impl StatValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Self::Duration(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write_number(f, *value),
            Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Duration(value) => write_duration(f, *value),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

/// Writes `[-]D days HH:MM:SS[.fffffffff]`.
fn write_duration(f: &mut fmt::Formatter<'_>, value: TimeDelta) -> fmt::Result {
    let sign = if value < TimeDelta::zero() { "-" } else { "" };
    let value = value.abs();
    let seconds = value.num_seconds();
    let nanos = value.subsec_nanos();
    let (days, rem) = (seconds / 86_400, seconds % 86_400);
    write!(
        f,
        "{sign}{days} days {:02}:{:02}:{:02}",
        rem / 3600,
        rem % 3600 / 60,
        rem % 60
    )?;
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        write!(f, ".{}", fraction.trim_end_matches('0'))?;
    }
    Ok(())
}

fn serialize_display<S: Serializer>(
    value: &TimeDelta,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&StatValue::Duration(*value))
}

/// One row of the continuous report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousSummary {
    #[serde(flatten)]
    pub column: ColumnClassification,
    pub min: Option<StatValue>,
    pub first_quartile: Option<StatValue>,
    pub mean: Option<StatValue>,
    pub median: Option<StatValue>,
    pub third_quartile: Option<StatValue>,
    pub max: Option<StatValue>,
    pub std_dev: Option<StatValue>,
}

impl ContinuousSummary {
    /// A summary with every statistic null.
    pub fn empty(column: ColumnClassification) -> Self {
        Self {
            column,
            min: None,
            first_quartile: None,
            mean: None,
            median: None,
            third_quartile: None,
            max: None,
            std_dev: None,
        }
    }

    /// Statistic values in table order: min, 1st quartile, mean, median, 3rd quartile, max,
    /// standard deviation.
    pub fn statistics(&self) -> [Option<&StatValue>; 7] {
        [
            self.min.as_ref(),
            self.first_quartile.as_ref(),
            self.mean.as_ref(),
            self.median.as_ref(),
            self.third_quartile.as_ref(),
            self.max.as_ref(),
            self.std_dev.as_ref(),
        ]
    }
}

/// Summarises one continuous column.
///
/// A column whose values cannot be read as numbers or ticks is reported with null statistics
/// so that the rest of the report is still produced.
pub fn summarize_continuous(
    column: &ArrayRef,
    classification: ColumnClassification,
    config: &ReportConfig,
) -> ContinuousSummary {
    let name = classification.name.clone();
    let summary = match classification.value_kind {
        ValueKind::Temporal => summarize_temporal(column, classification),
        _ => summarize_numeric(column, classification, config),
    };
    match summary {
        Ok(summary) => {
            debug!(column = %name, "Summarised continuous column");
            summary
        }
        Err((classification, err)) => {
            warn!(column = %name, error = %err, "Could not compute statistics, reporting nulls");
            ContinuousSummary::empty(classification)
        }
    }
}

type Partial = std::result::Result<ContinuousSummary, (ColumnClassification, ReportError)>;

fn summarize_numeric(
    column: &ArrayRef,
    classification: ColumnClassification,
    config: &ReportConfig,
) -> Partial {
    let mut values = match numeric_values(column, config.nan_as_missing) {
        Ok(values) => values,
        Err(err) => return Err((classification, err)),
    };
    if values.is_empty() {
        return Ok(ContinuousSummary::empty(classification));
    }

    let std_dev = sample_std_dev(&values);
    let mean = mean(&values);
    values.sort_by(f64::total_cmp);

    let number =
        |value: Option<f64>| value.map(|v| StatValue::Number(round_to(v, config.decimals)));
    Ok(ContinuousSummary {
        column: classification,
        min: number(values.first().copied()),
        first_quartile: number(quantile(&values, 0.25)),
        mean: number(mean),
        median: number(quantile(&values, 0.5)),
        third_quartile: number(quantile(&values, 0.75)),
        max: number(values.last().copied()),
        std_dev: number(std_dev),
    })
}

fn summarize_temporal(column: &ArrayRef, classification: ColumnClassification) -> Partial {
    let mut temporal = match TemporalValues::from_array(column) {
        Ok(temporal) => temporal,
        Err(err) => return Err((classification, err)),
    };
    if temporal.ticks.is_empty() {
        return Ok(ContinuousSummary::empty(classification));
    }

    let std_dev = tick_std_dev(&temporal.ticks);
    let mean = tick_mean(&temporal.ticks);
    temporal.ticks.sort_unstable();

    let ticks = &temporal.ticks;
    let position = |tick: Option<i64>| {
        tick.and_then(|t| temporal.to_datetime(t))
            .map(StatValue::DateTime)
    };
    let spread = std_dev
        .and_then(|t| temporal.to_delta(t.round() as i64))
        .map(StatValue::Duration);

    Ok(ContinuousSummary {
        min: position(ticks.first().copied()),
        first_quartile: position(tick_quantile(ticks, 0.25)),
        mean: position(mean),
        median: position(tick_quantile(ticks, 0.5)),
        third_quartile: position(tick_quantile(ticks, 0.75)),
        max: position(ticks.last().copied()),
        std_dev: spread,
        column: classification,
    })
}
