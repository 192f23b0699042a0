//! Conversions between Series kinds.
//!
//! Every row is attempted. A row that cannot be converted becomes nil in the
//! result and is reported as a `RowError`, so the returned series always has
//! the same number of rows as its source. Nil rows stay nil and never reach
//! the converter.

use log::debug;

use crate::core::cancel::CancellationToken;
use crate::core::error::{Error, Result};
use crate::core::error_collection::{ErrorCollection, Partial};
use crate::core::value::Value;
use crate::series::any::{AnySeries, SeriesTrait};
use crate::series::element::{exact_i64, Element, MixedKinds};
use crate::series::typed::{Float64Series, Int64Series, MixedSeries, StringSeries, TypedSeries};
use crate::series::Series;

/// Per-row converter
pub type Converter<'a, T> = &'a dyn Fn(&Value) -> Result<T>;

fn cast_error(value: &Value, target: &str) -> Error {
    Error::Cast(format!("cannot convert {} {:?} to {}", value.type_name(), value.to_string(), target))
}

/// Default conversion to float64
pub fn value_to_f64(value: &Value) -> Result<f64> {
    match value {
        Value::Float64(v) => Ok(*v),
        Value::Int64(v) => Ok(*v as f64),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| cast_error(value, "float64")),
        _ => Err(cast_error(value, "float64")),
    }
}

/// Default conversion to int64. Times convert to Unix nanoseconds.
pub fn value_to_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Int64(v) => Ok(*v),
        Value::Float64(v) => exact_i64(*v).ok_or_else(|| cast_error(value, "int64")),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| cast_error(value, "int64")),
        Value::Time(t) => t
            .timestamp_nanos_opt()
            .ok_or_else(|| cast_error(value, "int64")),
        _ => Err(cast_error(value, "int64")),
    }
}

fn convert<E, F>(
    source: &AnySeries,
    mut out: TypedSeries<E>,
    mut f: F,
    cancel: &CancellationToken,
) -> Result<Partial<TypedSeries<E>>>
where
    E: Element,
    F: FnMut(&Value, usize) -> Result<E>,
{
    let n = source.nrows();
    debug!(
        "converting series {:?} from {} to {}",
        source.name(),
        source.type_name(),
        out.type_name()
    );

    let errors = ErrorCollection::new();
    for row in 0..n {
        cancel.check()?;
        let converted = match source.value(row) {
            None => None,
            Some(value) => match f(&value, row) {
                Ok(v) => Some(v),
                Err(err) if err.is_cancellation() => return Err(err),
                Err(err) => {
                    errors.push_row(row, err);
                    None
                }
            },
        };
        out.push(converted);
    }

    if !errors.is_empty() {
        debug!("conversion of {:?}: {} rows failed", source.name(), errors.len());
    }
    Ok(Partial::new(out, errors))
}

impl AnySeries {
    /// Convert to a Float64 series, by default parsing strings.
    pub fn to_float64(
        &self,
        converter: Option<Converter<'_, f64>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<Float64Series>> {
        let out = Float64Series::with_capacity(self.name(), self.nrows());
        let f = converter.unwrap_or(&value_to_f64);
        convert(self, out, |v, _| f(v), cancel)
    }

    /// Convert to an Int64 series, by default parsing strings.
    pub fn to_int64(
        &self,
        converter: Option<Converter<'_, i64>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<Int64Series>> {
        let out = Int64Series::with_capacity(self.name(), self.nrows());
        let f = converter.unwrap_or(&value_to_i64);
        convert(self, out, |v, _| f(v), cancel)
    }

    /// Convert to a String series, by default using each row's formatted value.
    pub fn to_string_series(
        &self,
        converter: Option<Converter<'_, String>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<StringSeries>> {
        let out = StringSeries::with_capacity(self.name(), self.nrows());
        match converter {
            Some(f) => convert(self, out, |v, _| f(v), cancel),
            None => convert(self, out, |_, row| Ok(self.value_string(row)), cancel),
        }
    }

    /// Convert to a Mixed series accepting every kind.
    pub fn to_mixed(
        &self,
        converter: Option<Converter<'_, Value>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<MixedSeries>> {
        let out = MixedSeries::empty_with_marker(self.name(), MixedKinds::any(), self.nrows());
        match converter {
            Some(f) => convert(self, out, |v, _| f(v), cancel),
            None => convert(self, out, |v, _| Ok(v.clone()), cancel),
        }
    }
}

impl Series {
    pub fn to_float64(
        &self,
        converter: Option<Converter<'_, f64>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<Series>> {
        Ok(self.read().to_float64(converter, cancel)?.map(Series::new))
    }

    pub fn to_int64(
        &self,
        converter: Option<Converter<'_, i64>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<Series>> {
        Ok(self.read().to_int64(converter, cancel)?.map(Series::new))
    }

    pub fn to_string_series(
        &self,
        converter: Option<Converter<'_, String>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<Series>> {
        Ok(self.read().to_string_series(converter, cancel)?.map(Series::new))
    }

    pub fn to_mixed(
        &self,
        converter: Option<Converter<'_, Value>>,
        cancel: &CancellationToken,
    ) -> Result<Partial<Series>> {
        Ok(self.read().to_mixed(converter, cancel)?.map(Series::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::typed::TimeSeries;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn test_default_converters() {
        assert_eq!(value_to_f64(&Value::String(" 2.5 ".into())).unwrap(), 2.5);
        assert_eq!(value_to_i64(&Value::Float64(4.0)).unwrap(), 4);
        assert!(value_to_i64(&Value::Float64(4.5)).is_err());
        assert!(matches!(value_to_f64(&Value::String("x".into())), Err(Error::Cast(_))));
    }

    #[test]
    fn test_to_string_uses_formatter() {
        let s: AnySeries = Float64Series::new("x", vec![Some(1.5), None]).into();
        let out = s.to_string_series(None, &CancellationToken::new()).unwrap();
        assert!(out.is_complete());
        assert_eq!(out.value.get(0), Some(&"1.5".to_string()));
        assert_eq!(out.value.get(1), None);
    }

    #[test]
    fn test_time_to_int64() {
        let t = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        let s: AnySeries = TimeSeries::new("t", vec![Some(t)]).into();
        let out = s.to_int64(None, &CancellationToken::new()).unwrap();
        assert_eq!(out.value.get(0), Some(&1_000_000_000));
    }

    #[test]
    fn test_custom_converter() {
        let s: AnySeries = StringSeries::new("x", vec![Some("yes".to_string()), Some("no".into())]).into();
        let yes_no = |v: &Value| -> Result<i64> {
            match v.as_str() {
                Some("yes") => Ok(1),
                Some("no") => Ok(0),
                _ => Err(Error::Cast("not yes/no".into())),
            }
        };
        let out = s.to_int64(Some(&yes_no), &CancellationToken::new()).unwrap();
        assert_eq!(out.value.values(), &[Some(1), Some(0)]);
    }
}
