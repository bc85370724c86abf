//! Small in-memory datasets shared by unit tests, integration tests and benchmarks.
//!
//! Available under `cfg(test)` and with the `test-utils` feature.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    TimestampMillisecondArray,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

/// Builds a batch from named columns, nullable fields throughout.
///
/// # Panics
///
/// Panics if the columns have different lengths.
pub fn batch_from_columns(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .expect("fixture columns must have equal length")
}

/// A batch holding a single column.
pub fn single_column_batch(name: &str, column: ArrayRef) -> RecordBatch {
    batch_from_columns(vec![(name, column)])
}

/// `age` (Int64, one null) and `city` (Utf8, two distinct values).
///
/// | age  | city |
/// |------|------|
/// | 25   | NY   |
/// | 30   | LA   |
/// | 25   | NY   |
/// | 40   | NY   |
/// | null | LA   |
/// Wraps a concrete array as an [`ArrayRef`].
pub fn array(values: impl Array + 'static) -> ArrayRef {
    Arc::new(values)
}

pub fn city_age_batch() -> RecordBatch {
    batch_from_columns(vec![
        (
            "age",
            array(Int64Array::from(vec![
                Some(25),
                Some(30),
                Some(25),
                Some(40),
                None,
            ])),
        ),
        (
            "city",
            array(StringArray::from(vec!["NY", "LA", "NY", "NY", "LA"])),
        ),
    ])
}

/// Four rows with interleaved continuous and categorical columns of varying completeness.
///
/// Continuous: `a` 25%, `b` 0%, `c` 50%, `d` 25% missing.
/// Categorical: `label` 25%, `notes` 100%, `tag` 0% missing.
pub fn mixed_missing_batch() -> RecordBatch {
    batch_from_columns(vec![
        (
            "a",
            array(Int64Array::from(vec![Some(1), Some(2), Some(3), None])),
        ),
        (
            "label",
            array(StringArray::from(vec![
                Some("x"),
                None,
                Some("y"),
                Some("z"),
            ])),
        ),
        (
            "b",
            array(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0])),
        ),
        (
            "notes",
            array(StringArray::from(vec![None::<&str>, None, None, None])),
        ),
        (
            "c",
            array(Int64Array::from(vec![None, None, Some(7), Some(7)])),
        ),
        (
            "tag",
            array(StringArray::from(vec!["p", "q", "r", "p"])),
        ),
        (
            "d",
            array(Float64Array::from(vec![Some(5.0), Some(6.0), None, Some(7.0)])),
        ),
    ])
}

/// One column per supported value kind, including a binary numeric flag.
pub fn mixed_types_batch() -> RecordBatch {
    batch_from_columns(vec![
        (
            "amount",
            array(Float64Array::from(vec![
                Some(10.5),
                Some(f64::NAN),
                Some(3.25),
                None,
                Some(8.0),
                Some(12.0),
            ])),
        ),
        (
            "joined",
            array(Date32Array::from(vec![
                Some(19_000),
                Some(19_010),
                None,
                Some(19_020),
                Some(19_030),
                Some(19_040),
            ])),
        ),
        (
            "last_login",
            array(
                TimestampMillisecondArray::from(vec![
                    Some(1_700_000_000_000),
                    Some(1_700_000_360_000),
                    Some(1_700_003_600_000),
                    None,
                    None,
                    Some(1_700_007_200_000),
                ])
                .with_timezone("UTC"),
            ),
        ),
        (
            "active",
            array(BooleanArray::from(vec![
                Some(true),
                Some(false),
                Some(true),
                Some(true),
                None,
                Some(false),
            ])),
        ),
        (
            "churned",
            array(Int64Array::from(vec![0, 1, 0, 0, 1, 0])),
        ),
        (
            "segment",
            array(StringArray::from(vec![
                Some("retail"),
                Some("smb"),
                Some("enterprise"),
                Some("retail"),
                None,
                Some("smb"),
            ])),
        ),
    ])
}

/// A wide synthetic batch for benchmarks: `columns` numeric columns and as many string
/// columns, `rows` rows each, with a deterministic missing pattern.
pub fn synthetic_batch(rows: usize, columns: usize) -> RecordBatch {
    let mut named: Vec<(String, ArrayRef)> = Vec::with_capacity(columns * 2);
    for c in 0..columns {
        let numbers: Float64Array = (0..rows)
            .map(|r| (r % (c + 7) != 0).then(|| ((r * 31 + c * 17) % 997) as f64 / 3.0))
            .collect();
        named.push((format!("num_{c}"), array(numbers)));

        let labels: StringArray = (0..rows)
            .map(|r| (r % (c + 5) != 0).then(|| format!("cat_{}", (r + c) % (c + 3))))
            .collect();
        named.push((format!("cat_{c}"), array(labels)));
    }
    batch_from_columns(
        named
            .iter()
            .map(|(name, array)| (name.as_str(), array.clone()))
            .collect(),
    )
}
