use framekit::{
    row, ApplyExt, CancellationToken, DataFrame, Error, FilterAction, Series, Value,
};

fn day_sales() -> DataFrame {
    DataFrame::new(vec![
        Series::new_int64("day", vec![Some(1), Some(2), Some(3), Some(4)]),
        Series::new_float64("sales", vec![Some(50.3), None, Some(56.2), Some(10.0)]),
    ])
    .unwrap()
}

#[test]
fn test_series_apply_copy_leaves_source() {
    let s = Series::new_int64("x", vec![Some(1), None, Some(3)]);
    let out = s
        .apply(
            |v, _, _| Ok(v.and_then(|v| v.as_i64()).map(|v| Value::Int64(v * 10))),
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(out.is_complete());
    assert_eq!(out.value.value(2), Some(Value::Int64(30)));
    assert_eq!(out.value.value(1), None);
    assert_eq!(s.value(2), Some(Value::Int64(3)));
}

#[test]
fn test_series_apply_collects_row_errors() {
    let s = Series::new_int64("x", vec![Some(1), Some(2), Some(3)]);
    let errors = s
        .apply_in_place(
            |v, row, _| {
                if row == 1 {
                    return Err(Error::InvalidInput("odd row".into()));
                }
                Ok(v)
            },
            &CancellationToken::new(),
        )
        .unwrap();
    assert_eq!(errors.rows(), vec![1]);
    assert_eq!(s.value(1), Some(Value::Int64(2)));
}

#[test]
fn test_halted_apply_stops_immediately() {
    let s = Series::new_int64("x", vec![Some(1), Some(2), Some(3)]);
    let mut visited = 0;
    let result = s.apply_in_place(
        |v, row, _| {
            visited += 1;
            if row == 1 {
                return Err(Error::Halted("enough".into()));
            }
            Ok(v.map(|_| Value::Int64(0)))
        },
        &CancellationToken::new(),
    );
    assert_eq!(result, Err(Error::Halted("enough".into())));
    assert_eq!(visited, 2);
    // no rollback
    assert_eq!(s.value(0), Some(Value::Int64(0)));
    assert_eq!(s.value(2), Some(Value::Int64(3)));
}

#[test]
fn test_series_filter_in_place() {
    let s = Series::new_float64("x", vec![Some(1.0), Some(5.0), None, Some(7.0)]);
    let errors = s
        .filter_in_place(
            |v, _, _| {
                Ok(match v.and_then(|v| v.as_f64()) {
                    Some(x) if x > 2.0 => FilterAction::Keep,
                    _ => FilterAction::Drop,
                })
            },
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(errors.is_empty());
    assert_eq!(s.nrows(), 2);
    assert_eq!(s.value(1), Some(Value::Float64(7.0)));
}

#[test]
fn test_dataframe_apply_keyed_update() {
    let df = day_sales();
    let out = df
        .apply(
            |row, _, _| {
                Ok(match row["sales"] {
                    None => Some(row! { "sales" => 0.0 }),
                    Some(_) => None,
                })
            },
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(out.is_complete());
    assert_eq!(out.value.row(1)["sales"], Some(Value::Float64(0.0)));
    assert_eq!(out.value.row(1)["day"], Some(Value::Int64(2)));
    assert_eq!(df.row(1)["sales"], None);
}

#[test]
fn test_dataframe_apply_rejected_row_is_kept() {
    let df = day_sales();
    let out = df
        .apply(
            |row, idx, _| {
                if idx == 2 {
                    return Ok(Some(row! { "day" => "third" }));
                }
                Ok(Some(row! { "day" => row["day"].clone() }))
            },
            &CancellationToken::new(),
        )
        .unwrap();
    let (frame, errors) = out.into_parts();
    let errors = errors.unwrap();
    assert_eq!(errors.rows(), vec![2]);
    assert_eq!(frame.nrows(), 4);
    assert_eq!(frame.row(2)["day"], Some(Value::Int64(3)));
}

#[test]
fn test_dataframe_filter() {
    let df = day_sales();
    let cancel = CancellationToken::new();
    let even = |row: &framekit::Row, _: usize, _: usize| {
        Ok::<_, Error>(match row["day"].as_ref().and_then(Value::as_i64) {
            Some(d) if d % 2 == 0 => FilterAction::Keep,
            _ => FilterAction::Drop,
        })
    };

    let out = df.filter(even, &cancel).unwrap().into_result().unwrap();
    assert_eq!(out.nrows(), 2);
    assert_eq!(df.nrows(), 4);

    let errors = df.filter_in_place(even, &cancel).unwrap();
    assert!(errors.is_empty());
    assert_eq!(df.nrows(), 2);
    assert_eq!(df.row(0)["day"], Some(Value::Int64(2)));
    assert_eq!(df.row(1)["sales"], Some(Value::Float64(10.0)));
}

#[test]
fn test_cancelled_before_first_row() {
    let df = day_sales();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut calls = 0;
    let result = df.apply_in_place(
        |_, _, _| {
            calls += 1;
            Ok(None)
        },
        &cancel,
    );
    assert_eq!(result, Err(Error::Cancelled));
    assert_eq!(calls, 0);

    let result = df.filter(|_, _, _| Ok(FilterAction::Drop), &cancel);
    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(df.nrows(), 4);
}

#[test]
fn test_deadline_cancels() {
    let s = Series::new_int64("x", (0..10).map(Some));
    let cancel = CancellationToken::with_timeout(std::time::Duration::from_millis(0));
    let result = s.filter(|_, _, _| Ok(FilterAction::Keep), &cancel);
    assert!(matches!(result, Err(Error::DeadlineExceeded)));
}
