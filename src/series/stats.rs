use crate::core::cancel::CancellationToken;
use crate::core::error::{Error, Result};
use crate::series::any::{AnySeries, SeriesTrait};
use crate::series::Series;

impl AnySeries {
    /// Sum of the non-nil values of a numeric series.
    ///
    /// An all-nil series sums to NaN, and so do opposing infinities. An empty
    /// series sums to 0.
    pub fn sum(&self, cancel: &CancellationToken) -> Result<f64> {
        let values: Box<dyn Iterator<Item = Option<f64>> + '_> = match self {
            AnySeries::Float64(s) => Box::new(s.values().iter().copied()),
            AnySeries::Int64(s) => Box::new(s.values().iter().map(|v| v.map(|v| v as f64))),
            other => {
                return Err(Error::TypeMismatch {
                    expected: "float64|int64".to_string(),
                    found: other.type_name(),
                })
            }
        };

        cancel.check()?;
        if self.nrows() > 0 && self.nil_count() == self.nrows() {
            return Ok(f64::NAN);
        }

        let mut sum = 0.0;
        let (mut pos_inf, mut neg_inf) = (false, false);
        for v in values {
            cancel.check()?;
            let Some(v) = v else {
                continue;
            };
            if v == f64::INFINITY {
                pos_inf = true;
            } else if v == f64::NEG_INFINITY {
                neg_inf = true;
            }
            if pos_inf && neg_inf {
                return Ok(f64::NAN);
            }
            sum += v;
        }
        Ok(sum)
    }

    /// Mean of the non-nil values of a numeric series.
    pub fn mean(&self, cancel: &CancellationToken) -> Result<f64> {
        let sum = self.sum(cancel)?;
        let count = self.nrows() - self.nil_count();
        if count == 0 {
            return Ok(sum);
        }
        Ok(sum / count as f64)
    }
}

impl Series {
    pub fn sum(&self, cancel: &CancellationToken) -> Result<f64> {
        self.read().sum(cancel)
    }

    pub fn mean(&self, cancel: &CancellationToken) -> Result<f64> {
        self.read().mean(cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::typed::{Float64Series, Int64Series, StringSeries};

    #[test]
    fn test_sum_and_mean_skip_nils() {
        let cancel = CancellationToken::new();
        let s: AnySeries = Float64Series::new("x", vec![Some(1.0), None, Some(3.0)]).into();
        assert_eq!(s.sum(&cancel).unwrap(), 4.0);
        assert_eq!(s.mean(&cancel).unwrap(), 2.0);

        let i: AnySeries = Int64Series::new("i", vec![Some(2), Some(4)]).into();
        assert_eq!(i.mean(&cancel).unwrap(), 3.0);
    }

    #[test]
    fn test_nan_cases() {
        let cancel = CancellationToken::new();
        let nils: AnySeries = Float64Series::new("x", vec![None, None]).into();
        assert!(nils.sum(&cancel).unwrap().is_nan());
        assert!(nils.mean(&cancel).unwrap().is_nan());

        let infs: AnySeries =
            Float64Series::new("x", vec![Some(f64::INFINITY), Some(1.0), Some(f64::NEG_INFINITY)]).into();
        assert!(infs.sum(&cancel).unwrap().is_nan());

        let empty: AnySeries = Float64Series::new("x", Vec::new()).into();
        assert_eq!(empty.sum(&cancel).unwrap(), 0.0);
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        let s: AnySeries = StringSeries::new("x", vec![Some("a".to_string())]).into();
        assert!(matches!(
            s.sum(&CancellationToken::new()),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
