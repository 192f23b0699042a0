use std::fmt;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use framekit::series::{Float64Series, MixedKinds, TypedSeries};
use framekit::{
    CancellationToken, Error, GenericValue, IsEqualOptions, IterOptions, Range, Series, SeriesKind,
    SeriesTrait, Value, ValueKind,
};

#[derive(Debug, Clone, PartialEq, PartialOrd)]
struct Point {
    x: i32,
    y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[test]
fn test_nil_count_tracks_mutations() {
    let s = Series::new_float64("sales", vec![Some(1.0), None, Some(f64::NAN)]);
    // NaN is stored as nil
    assert_eq!(s.nil_count(), 2);

    s.update(1, 2.5).unwrap();
    assert_eq!(s.nil_count(), 1);
    s.append(framekit::NIL).unwrap();
    s.prepend(4.0).unwrap();
    s.insert(2, framekit::NIL).unwrap();
    assert_eq!(s.nrows(), 6);
    assert_eq!(s.nil_count(), 3);
    s.remove(2);
    assert_eq!(s.nil_count(), 2);
}

#[test]
fn test_type_mismatch_leaves_series_unchanged() {
    let s = Series::new_int64("day", vec![Some(1)]);
    assert!(matches!(s.append("two"), Err(Error::TypeMismatch { .. })));
    assert!(matches!(s.update(0, 1.5), Err(Error::TypeMismatch { .. })));
    assert_eq!(s.nrows(), 1);
    assert_eq!(s.value(0), Some(Value::Int64(1)));

    // integral floats are accepted
    s.append(2.0).unwrap();
    assert_eq!(s.value(1), Some(Value::Int64(2)));
}

#[test]
fn test_every_kind_reports_its_type() {
    let t = Utc.with_ymd_and_hms(2020, 5, 17, 10, 0, 0).unwrap();
    let kinds = [
        (Series::new_float64("a", vec![Some(1.0)]), SeriesKind::Float64, "float64"),
        (Series::new_int64("b", vec![Some(1)]), SeriesKind::Int64, "int64"),
        (Series::new_string("c", vec![Some("x")]), SeriesKind::String, "string"),
        (Series::new_time("d", vec![Some(t)]), SeriesKind::Time, "time"),
        (
            Series::new_generic("e", vec![Some(Point { x: 1, y: 2 })]),
            SeriesKind::Generic,
            "Point",
        ),
    ];
    for (series, kind, name) in kinds {
        assert_eq!(series.kind(), kind);
        assert!(series.type_name().contains(name), "{}", series.type_name());
    }
    assert_eq!(Series::new_time("d", vec![Some(t)]).value_string(0), "2020-05-17T10:00:00+00:00");
}

#[test]
fn test_generic_series_rejects_other_types() {
    let s = Series::new_generic("p", vec![Some(Point { x: 0, y: 0 })]);
    assert!(s.append(Value::generic(Point { x: 3, y: 4 })).is_ok());
    assert!(matches!(s.append(5), Err(Error::TypeMismatch { .. })));
    assert_eq!(s.value_string(1), "(3, 4)");
}

#[test]
fn test_mixed_series_whitelist() {
    let s = Series::new_mixed("m", vec![Some(Value::Int64(1)), Some(Value::String("a".into()))]);
    s.append(2.5).unwrap();
    assert_eq!(s.nrows(), 3);

    let only_numbers = TypedSeries::<Value>::empty_with_marker(
        "n",
        MixedKinds::only([ValueKind::Int64, ValueKind::Float64]),
        0,
    );
    let s = Series::new(only_numbers);
    s.append(1).unwrap();
    assert!(matches!(s.append("text"), Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_custom_comparators_and_formatter() {
    // compare by absolute value
    let mut inner = Float64Series::new("x", vec![Some(-3.0), Some(2.0), Some(1.0)]);
    inner.set_is_less_than_func(Arc::new(|a: Option<&f64>, b: Option<&f64>| match (a, b) {
        (Some(a), Some(b)) => a.abs() < b.abs(),
        (None, Some(_)) => true,
        _ => false,
    }));
    inner.set_formatter(Arc::new(|v: Option<&f64>| match v {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }));
    let s = Series::new(inner);

    assert!(s.sort(&Default::default(), &CancellationToken::new()));
    assert_eq!(s.value(0), Some(Value::Float64(1.0)));
    assert_eq!(s.value(2), Some(Value::Float64(-3.0)));
    assert_eq!(s.value_string(2), "-3.0");
    s.append(framekit::NIL).unwrap();
    assert_eq!(s.value_string(3), "-");
}

#[test]
fn test_values_iter_windows() {
    let s = Series::new_int64("x", (0..6).map(Some));
    let forward: Vec<usize> = s
        .values_iter(IterOptions {
            initial_row: 1,
            step: 2,
        })
        .map(|(row, _, _)| row)
        .collect();
    assert_eq!(forward, vec![1, 3, 5]);

    let backward: Vec<Option<Value>> = s
        .values_iter(IterOptions::reverse())
        .map(|(_, v, _)| v)
        .take(2)
        .collect();
    assert_eq!(backward, vec![Some(Value::Int64(5)), Some(Value::Int64(4))]);

    let guard = s.read();
    let total: usize = guard.values_iter(IterOptions::default()).map(|(_, _, n)| n).sum();
    assert_eq!(total, 36);
}

#[test]
fn test_copy_equality_and_sharing() {
    let s = Series::new_string("city", vec![Some("a"), None]);
    let shared = s.clone();
    let copy = s.copy();
    let opts = IsEqualOptions::default();
    let cancel = CancellationToken::new();

    shared.update(1, "b").unwrap();
    assert_eq!(s.value(1), Some(Value::String("b".into())));
    assert!(!copy.is_equal(&s, &opts, &cancel).unwrap());

    copy.update(1, "b").unwrap();
    assert!(copy.is_equal(&s, &opts, &cancel).unwrap());
    copy.rename("town");
    assert!(!copy.is_equal(&s, &opts, &cancel).unwrap());
    assert!(copy.is_equal(&s, &IsEqualOptions { check_name: false }, &cancel).unwrap());

    let empty = s.new_empty("fresh", 4);
    assert_eq!(empty.kind(), SeriesKind::String);
    assert_eq!(empty.nrows(), 0);
}

#[test]
fn test_series_table_and_display() {
    let s = Series::new_int64("day", vec![Some(1), None]);
    let table = s.table(&Range::all()).unwrap();
    assert!(table.contains("DAY"));
    assert!(table.contains("2X1"));
    assert!(table.contains("NaN"));
    assert_eq!(s.to_string(), "[ 1 NaN ]");

    let long = Series::new_int64("x", (0..10).map(Some));
    assert_eq!(long.to_string(), "[ 0 1 2 ... 7 8 9 ]");
}

#[test]
fn test_comparators_replaceable_on_shared_time_generic_mixed() {
    let t = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
    let times = Series::new_time("t", vec![Some(t), None]);
    times
        .write()
        .as_time_mut()
        .unwrap()
        .set_formatter(Arc::new(|v: Option<&chrono::DateTime<Utc>>| match v {
            Some(v) => v.format("%Y-%m-%d").to_string(),
            None => "never".to_string(),
        }));
    assert_eq!(times.value_string(0), "2021-03-04");
    assert_eq!(times.value_string(1), "never");

    // points with equal x compare equal
    let points = Series::new_generic("p", vec![Some(Point { x: 1, y: 2 }), Some(Point { x: 1, y: 9 })]);
    points
        .write()
        .as_generic_mut()
        .unwrap()
        .set_is_equal_func(Arc::new(|a: Option<&GenericValue>, b: Option<&GenericValue>| {
            let x = |v: Option<&GenericValue>| v.and_then(|g| g.downcast_ref::<Point>()).map(|p| p.x);
            x(a) == x(b)
        }));
    assert!(points.read().is_equal_at(0, 1));

    let mixed = Series::new_mixed("m", vec![Some(Value::Int64(1)), Some(Value::String("1".into()))]);
    assert!(!mixed.read().is_equal_at(0, 1));
    mixed
        .write()
        .as_mixed_mut()
        .unwrap()
        .set_is_equal_func(Arc::new(|a: Option<&Value>, b: Option<&Value>| {
            a.map(Value::to_string) == b.map(Value::to_string)
        }));
    assert!(mixed.read().is_equal_at(0, 1));
}
