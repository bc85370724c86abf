//! Typed views over Arrow columns shared by the classifier and the summarizers.
//!
//! Every stage reads the original Arrow array directly. This module turns an array into the
//! representation a stage needs: hashable per-row keys for distinct counting and frequency
//! tables, non-missing `f64` values for numeric statistics, or integer ticks for temporal ones.

use std::fmt;

use arrow::array::{ArrayRef, AsArray};
use arrow::buffer::NullBuffer;
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Decimal128Type, Float64Type, Int16Type, Int32Type,
    Int64Type, Int8Type, TimeUnit, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Native value kind of a column, derived from its Arrow type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Integers, floats and decimals
    Numeric,
    /// Dates and timestamps
    Temporal,
    /// Text, booleans and everything else
    Other,
}

impl ValueKind {
    /// Derives the value kind for an Arrow data type.
    pub fn of(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Decimal256(_, _) => Self::Numeric,
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => Self::Temporal,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Temporal => "temporal",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hashable identity of a single non-missing value.
///
/// Integers (and temporal ticks, booleans and 128-bit decimals) compare exactly, floats compare
/// by value with `-0.0 == 0.0`, and every other type compares by its display string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Integer(i128),
    Float(u64),
    Text(String),
}

impl ValueKey {
    fn float(value: f64) -> Self {
        // Collapse negative zero and every NaN payload onto one key.
        let value = if value == 0.0 {
            0.0
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        Self::Float(value.to_bits())
    }
}

macro_rules! integer_keys {
    ($array:expr, $ty:ty) => {
        $array
            .as_primitive::<$ty>()
            .iter()
            .map(|v| v.map(|v| ValueKey::Integer(v as i128)))
            .collect()
    };
}

/// Computes one key per row; `None` marks a missing value.
pub fn value_keys(array: &ArrayRef, nan_as_missing: bool) -> Result<Vec<Option<ValueKey>>> {
    let keys: Vec<Option<ValueKey>> = match array.data_type() {
        DataType::Int8 => integer_keys!(array, Int8Type),
        DataType::Int16 => integer_keys!(array, Int16Type),
        DataType::Int32 => integer_keys!(array, Int32Type),
        DataType::Int64 => integer_keys!(array, Int64Type),
        DataType::UInt8 => integer_keys!(array, UInt8Type),
        DataType::UInt16 => integer_keys!(array, UInt16Type),
        DataType::UInt32 => integer_keys!(array, UInt32Type),
        DataType::UInt64 => integer_keys!(array, UInt64Type),
        DataType::Date32 => integer_keys!(array, Date32Type),
        DataType::Date64 => integer_keys!(array, Date64Type),
        DataType::Timestamp(_, _) => {
            let ticks = cast(array, &DataType::Int64)?;
            integer_keys!(ticks, Int64Type)
        }
        // Scale is fixed per column, so the unscaled value identifies a decimal.
        DataType::Decimal128(_, _) => integer_keys!(array, Decimal128Type),
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let floats = cast(array, &DataType::Float64)?;
            floats
                .as_primitive::<Float64Type>()
                .iter()
                .map(|v| match v {
                    Some(v) if v.is_nan() && nan_as_missing => None,
                    Some(v) => Some(ValueKey::float(v)),
                    None => None,
                })
                .collect()
        }
        DataType::Boolean => array
            .as_boolean()
            .iter()
            .map(|v| v.map(|v| ValueKey::Integer(i128::from(v))))
            .collect(),
        _ => {
            let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
            let nulls = array.logical_nulls();
            (0..array.len())
                .map(|row| {
                    if is_missing(nulls.as_ref(), row) {
                        None
                    } else {
                        Some(ValueKey::Text(formatter.value(row).to_string()))
                    }
                })
                .collect()
        }
    };
    Ok(keys)
}

fn is_missing(nulls: Option<&NullBuffer>, row: usize) -> bool {
    nulls.is_some_and(|nulls| nulls.is_null(row))
}

/// Returns the non-missing values of a numeric column as `f64`, in row order.
pub fn numeric_values(array: &ArrayRef, nan_as_missing: bool) -> Result<Vec<f64>> {
    if ValueKind::of(array.data_type()) != ValueKind::Numeric {
        return Err(ReportError::Internal(format!(
            "expected a numeric column, found {}",
            array.data_type()
        )));
    }
    let floats = cast(array, &DataType::Float64)?;
    Ok(floats
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .filter(|v| !(nan_as_missing && v.is_nan()))
        .collect())
}

/// Non-missing ticks of a temporal column together with their unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalValues {
    pub unit: TimeUnit,
    pub ticks: Vec<i64>,
}

impl TemporalValues {
    /// Reads the ticks of a `Date32`, `Date64` or `Timestamp` column.
    ///
    /// `Date32` days are widened to milliseconds so that every date column shares `Date64`'s
    /// unit and sub-day positions (a mean, an interpolated quantile) stay representable.
    pub fn from_array(array: &ArrayRef) -> Result<Self> {
        match array.data_type() {
            DataType::Date32 => Ok(Self {
                unit: TimeUnit::Millisecond,
                ticks: array
                    .as_primitive::<Date32Type>()
                    .iter()
                    .flatten()
                    .map(|days| i64::from(days) * MILLIS_PER_DAY)
                    .collect(),
            }),
            DataType::Date64 => Ok(Self {
                unit: TimeUnit::Millisecond,
                ticks: array.as_primitive::<Date64Type>().iter().flatten().collect(),
            }),
            DataType::Timestamp(unit, _) => {
                let ticks = cast(array, &DataType::Int64)?;
                Ok(Self {
                    unit: *unit,
                    ticks: ticks.as_primitive::<Int64Type>().iter().flatten().collect(),
                })
            }
            other => Err(ReportError::Internal(format!(
                "expected a temporal column, found {other}"
            ))),
        }
    }

    /// Converts a tick in this unit to a UTC date-time.
    pub fn to_datetime(&self, tick: i64) -> Option<DateTime<Utc>> {
        match self.unit {
            TimeUnit::Second => DateTime::from_timestamp(tick, 0),
            TimeUnit::Millisecond => DateTime::from_timestamp_millis(tick),
            TimeUnit::Microsecond => DateTime::from_timestamp_micros(tick),
            TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(tick)),
        }
    }

    /// Converts a number of ticks in this unit to a duration.
    pub fn to_delta(&self, ticks: i64) -> Option<TimeDelta> {
        match self.unit {
            TimeUnit::Second => TimeDelta::try_seconds(ticks),
            TimeUnit::Millisecond => TimeDelta::try_milliseconds(ticks),
            TimeUnit::Microsecond => Some(TimeDelta::microseconds(ticks)),
            TimeUnit::Nanosecond => Some(TimeDelta::nanoseconds(ticks)),
        }
    }
}

/// Renders row values with Arrow's display rules, the same text the CSV writer produces.
pub struct ValueFormatter<'a> {
    formatter: ArrayFormatter<'a>,
}

impl<'a> ValueFormatter<'a> {
    pub fn try_new(array: &'a ArrayRef) -> Result<Self> {
        Ok(Self {
            formatter: ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?,
        })
    }

    pub fn value(&self, row: usize) -> String {
        self.formatter.value(row).to_string()
    }
}
