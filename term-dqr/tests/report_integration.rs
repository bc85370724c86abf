//! End-to-end report scenarios over in-memory datasets.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Decimal128Array, Float64Array, Int64Array, StringArray,
    TimestampMicrosecondArray,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use term_dqr::prelude::*;

fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

fn people() -> RecordBatch {
    batch(vec![
        (
            "age",
            Arc::new(Int64Array::from(vec![Some(25), Some(30), Some(25), Some(40), None])) as ArrayRef,
        ),
        (
            "city",
            Arc::new(StringArray::from(vec!["NY", "LA", "NY", "NY", "LA"])) as ArrayRef,
        ),
    ])
}

#[test]
fn test_age_city_report() {
    let (continuous, categorical) = generate_report(&people(), false).unwrap();

    assert_eq!(continuous.len(), 1);
    let age = &continuous[0];
    assert_eq!(age.column.name, "age");
    assert_eq!(age.column.declared_type, "Int64");
    assert_eq!(age.column.non_missing_count, 4);
    assert_eq!(age.column.missing_percent, 20.0);
    assert_eq!(age.column.cardinality, 3);
    let stat = |value: &Option<StatValue>| value.as_ref().and_then(StatValue::as_f64);
    assert_eq!(stat(&age.min), Some(25.0));
    assert_eq!(stat(&age.first_quartile), Some(25.0));
    assert_eq!(stat(&age.mean), Some(30.0));
    assert_eq!(stat(&age.median), Some(27.5));
    assert_eq!(stat(&age.third_quartile), Some(32.5));
    assert_eq!(stat(&age.max), Some(40.0));
    assert_eq!(stat(&age.std_dev), Some(7.07));

    assert_eq!(categorical.len(), 1);
    let city = &categorical[0];
    assert_eq!(city.column.name, "city");
    assert_eq!(city.column.declared_type, "Utf8");
    assert_eq!(city.column.non_missing_count, 5);
    assert_eq!(city.column.missing_percent, 0.0);
    assert_eq!(city.column.cardinality, 2);
    assert_eq!(city.mode.as_deref(), Some("NY"));
    assert_eq!(city.mode_frequency, Some(3));
    assert_eq!(city.mode_percent, Some(60.0));
    assert_eq!(city.mode_2.as_deref(), Some("LA"));
    assert_eq!(city.mode_2_frequency, Some(2));
    assert_eq!(city.mode_2_percent, Some(40.0));
}

#[test]
fn test_binary_integer_flag_is_categorical() {
    let dataset = batch(vec![(
        "flag",
        Arc::new(Int64Array::from(vec![Some(0), Some(1), Some(1), None])) as ArrayRef,
    )]);
    let (continuous, categorical) = generate_report(&dataset, false).unwrap();

    assert!(continuous.is_empty());
    let flag = &categorical[0];
    assert_eq!(flag.column.declared_type, "Int64");
    assert_eq!(flag.column.cardinality, 2);
    assert_eq!(flag.column.missing_percent, 25.0);
    assert_eq!(flag.mode.as_deref(), Some("1"));
    assert_eq!(flag.mode_percent, Some(50.0));
    assert_eq!(flag.mode_2.as_deref(), Some("0"));
    assert_eq!(flag.mode_2_percent, Some(25.0));
}

#[test]
fn test_constant_column_has_no_second_mode() {
    let dataset = batch(vec![(
        "answer",
        Arc::new(StringArray::from(vec!["Y", "Y", "Y"])) as ArrayRef,
    )]);
    let (_, categorical) = generate_report(&dataset, false).unwrap();
    let answer = &categorical[0];

    assert_eq!(answer.column.cardinality, 1);
    assert_eq!(answer.mode.as_deref(), Some("Y"));
    assert_eq!(answer.mode_frequency, Some(3));
    assert_eq!(answer.mode_percent, Some(100.0));
    assert_eq!(answer.mode_2, None);
    assert_eq!(answer.mode_2_frequency, None);
    assert_eq!(answer.mode_2_percent, None);
}

#[test]
fn test_all_missing_numeric_column() {
    let dataset = batch(vec![
        (
            "empty",
            Arc::new(Float64Array::from(vec![None::<f64>, None, None])) as ArrayRef,
        ),
        (
            "full",
            Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])) as ArrayRef,
        ),
    ]);
    let (continuous, _) = generate_report(&dataset, false).unwrap();

    assert_eq!(continuous[0].column.name, "empty");
    assert_eq!(continuous[0].column.missing_percent, 100.0);
    assert_eq!(continuous[0].column.cardinality, 0);
    assert!(continuous[0].statistics().iter().all(Option::is_none));
    assert_eq!(continuous[1].column.name, "full");
}

#[test]
fn test_equal_missing_keeps_dataset_order() {
    let dataset = batch(vec![
        (
            "x",
            Arc::new(Float64Array::from(vec![
                Some(1.0),
                None,
                Some(3.0),
                Some(4.0),
                Some(5.0),
                Some(6.0),
            ])) as ArrayRef,
        ),
        (
            "y",
            Arc::new(Float64Array::from(vec![
                Some(1.0),
                Some(2.0),
                Some(3.0),
                Some(4.0),
                Some(5.0),
                None,
            ])) as ArrayRef,
        ),
        (
            "z",
            Arc::new(Float64Array::from(vec![
                None,
                None,
                None,
                Some(4.0),
                Some(5.0),
                Some(6.0),
            ])) as ArrayRef,
        ),
    ]);
    let report = DataQualityReport::generate(&dataset).unwrap();
    let names: Vec<_> = report
        .continuous_report()
        .iter()
        .map(|s| s.column.name.as_str())
        .collect();
    assert_eq!(names, vec!["z", "x", "y"]);
}

#[test]
fn test_large_decimals_keep_their_cardinality() {
    let balances = Decimal128Array::from(vec![
        9_007_199_254_740_992_i128,
        9_007_199_254_740_993,
        9_007_199_254_740_994,
    ])
    .with_precision_and_scale(38, 0)
    .unwrap();
    let dataset = batch(vec![("balance", Arc::new(balances) as ArrayRef)]);
    let (continuous, categorical) = generate_report(&dataset, false).unwrap();

    assert!(categorical.is_empty());
    assert_eq!(continuous.len(), 1);
    assert_eq!(continuous[0].column.cardinality, 3);
}

#[test]
fn test_nan_counts_as_missing() {
    let dataset = batch(vec![(
        "score",
        Arc::new(Float64Array::from(vec![1.0, f64::NAN, 3.0, 5.0])) as ArrayRef,
    )]);
    let (continuous, _) = generate_report(&dataset, false).unwrap();
    let score = &continuous[0];
    assert_eq!(score.column.missing_percent, 25.0);
    assert_eq!(score.column.cardinality, 3);
    assert_eq!(score.median.as_ref().and_then(StatValue::as_f64), Some(3.0));

    let config = ReportConfig::builder().nan_as_missing(false).build().unwrap();
    let report = DataQualityReport::generate_with_config(&dataset, &config).unwrap();
    assert_eq!(report.continuous_report()[0].column.missing_percent, 0.0);
}

#[test]
fn test_mixed_kinds_are_routed() {
    let dataset = batch(vec![
        (
            "signup",
            Arc::new(Date32Array::from(vec![19_000, 19_005, 19_010, 19_020])) as ArrayRef,
        ),
        (
            "seen",
            Arc::new(TimestampMicrosecondArray::from(vec![
                1_000_000, 2_000_000, 3_000_000, 5_000_000,
            ])) as ArrayRef,
        ),
        (
            "active",
            Arc::new(BooleanArray::from(vec![true, false, true, true])) as ArrayRef,
        ),
        (
            "tier",
            Arc::new(StringArray::from(vec!["gold", "silver", "bronze", "gold"])) as ArrayRef,
        ),
    ]);
    let report = DataQualityReport::generate(&dataset).unwrap();

    let continuous: Vec<_> = report
        .continuous_report()
        .iter()
        .map(|s| s.column.name.as_str())
        .collect();
    assert_eq!(continuous, vec!["signup", "seen"]);

    let categorical: Vec<_> = report
        .categorical_report()
        .iter()
        .map(|s| s.column.name.as_str())
        .collect();
    assert_eq!(categorical, vec!["active", "tier"]);

    let seen = &report.continuous_report()[1];
    assert_eq!(
        seen.mean.as_ref().map(ToString::to_string).as_deref(),
        Some("1970-01-01 00:00:02.750")
    );
    assert_eq!(
        seen.min.as_ref().map(ToString::to_string).as_deref(),
        Some("1970-01-01 00:00:01")
    );
}

#[test]
fn test_empty_dataset_is_invalid_input() {
    let empty = RecordBatch::new_empty(Arc::new(Schema::empty()));
    assert!(matches!(
        generate_report(&empty, false),
        Err(ReportError::InvalidInput(_))
    ));

    let no_rows = batch(vec![(
        "x",
        Arc::new(Int64Array::from(Vec::<i64>::new())) as ArrayRef,
    )]);
    assert!(matches!(
        generate_report(&no_rows, false),
        Err(ReportError::InvalidInput(_))
    ));
}

#[test]
fn test_report_is_deterministic() {
    let dataset = batch(vec![(
        "tie",
        Arc::new(StringArray::from(vec!["b", "a", "c", "a", "b", "c"])) as ArrayRef,
    )]);
    let first = DataQualityReport::generate(&dataset).unwrap();
    for _ in 0..5 {
        assert_eq!(DataQualityReport::generate(&dataset).unwrap(), first);
    }
    assert_eq!(first.categorical_report()[0].mode.as_deref(), Some("b"));
    assert_eq!(first.categorical_report()[0].mode_2.as_deref(), Some("a"));
}
