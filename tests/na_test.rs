use framekit::{row, CancellationToken, DataFrame, Error, Series, Value, NIL};

fn with_gaps() -> DataFrame {
    DataFrame::new(vec![
        Series::new_int64("day", vec![Some(1), None, Some(3), Some(4)]),
        Series::new_string("city", vec![Some("a"), Some("b"), None, Some("d")]),
    ])
    .unwrap()
}

#[test]
fn test_dataframe_drop_nil() {
    let df = with_gaps();
    let dropped = df.drop_nil(&CancellationToken::new()).unwrap();
    assert_eq!(dropped, 2);
    assert_eq!(df.nrows(), 2);
    assert_eq!(df.row(0)["day"], Some(Value::Int64(1)));
    assert_eq!(df.row(1)["city"], Some(Value::String("d".into())));
}

#[test]
fn test_dataframe_fill_nil_keyed() {
    let df = with_gaps();
    let errors = df
        .fill_nil(row! { "day" => 0 }, &CancellationToken::new())
        .unwrap();
    assert!(errors.is_empty());
    assert_eq!(df.row(1)["day"], Some(Value::Int64(0)));
    // untouched column keeps its nil
    assert_eq!(df.row(2)["city"], None);
    assert_eq!(df.series("day").unwrap().nil_count(), 0);
}

#[test]
fn test_dataframe_fill_nil_positional() {
    let df = with_gaps();
    df.fill_nil(row![NIL, "?"], &CancellationToken::new())
        .unwrap();
    assert_eq!(df.row(1)["day"], None);
    assert_eq!(df.row(2)["city"], Some(Value::String("?".into())));
}

#[test]
fn test_fill_nil_wrong_type_changes_nothing() {
    let s = Series::new_int64("day", vec![Some(1), None]);
    let result = s.fill_nil("zero", &CancellationToken::new());
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    assert_eq!(s.value(1), None);

    let df = with_gaps();
    let result = df.fill_nil(row! { "day" => "zero" }, &CancellationToken::new());
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    assert_eq!(df.series("day").unwrap().nil_count(), 1);
}

#[test]
fn test_series_drop_nil_cancelled() {
    let s = Series::new_float64("x", vec![Some(1.0), None]);
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(s.drop_nil(&cancel), Err(Error::Cancelled));
    assert_eq!(s.nrows(), 2);
}
