//! `generate_report(dataset, true)` writes to the default file names in the working directory.
//!
//! Kept in its own test binary because it changes the process working directory.

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use term_dqr::config::{CATEGORICAL_DEFAULT_PATH, CONTINUOUS_DEFAULT_PATH};
use term_dqr::generate_report;

#[test]
fn test_export_uses_default_file_names() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let dataset = RecordBatch::try_new(
        Arc::new(Schema::new(vec![
            Field::new("age", DataType::Int64, true),
            Field::new("city", DataType::Utf8, true),
        ])),
        vec![
            Arc::new(Int64Array::from(vec![Some(25), Some(30), None])) as ArrayRef,
            Arc::new(StringArray::from(vec!["NY", "LA", "NY"])) as ArrayRef,
        ],
    )
    .unwrap();

    let (continuous, categorical) = generate_report(&dataset, true).unwrap();
    assert_eq!(continuous.len(), 0);
    assert_eq!(categorical.len(), 2);

    assert_eq!(CONTINUOUS_DEFAULT_PATH, "continuous_data.csv");
    assert_eq!(CATEGORICAL_DEFAULT_PATH, "categorical_data.csv");
    assert!(dir.path().join(CONTINUOUS_DEFAULT_PATH).exists());
    assert!(dir.path().join(CATEGORICAL_DEFAULT_PATH).exists());
}
