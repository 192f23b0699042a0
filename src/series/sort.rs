use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::FrameConfig;
use crate::core::cancel::CancellationToken;
use crate::series::any::{AnySeries, SeriesTrait};
use crate::series::Series;
use crate::utils::sorting;

/// Sort behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Keep the relative order of equal rows
    pub stable: bool,
    /// Descending order. Only used when sorting a single Series.
    pub desc: bool,
}

impl SortOptions {
    pub fn from_config(config: &FrameConfig) -> Self {
        Self {
            stable: config.sort.stable,
            desc: false,
        }
    }
}

/// Composite ordering of two rows: equal rows are never less, and `desc`
/// inverts the comparator's answer.
pub(crate) fn ordered(series: &AnySeries, a: usize, b: usize, desc: bool) -> Option<bool> {
    if series.is_equal_at(a, b) {
        return None;
    }
    let less = series.is_less_than_at(a, b);
    Some(if desc { !less } else { less })
}

impl AnySeries {
    /// Sort the rows with this series' comparators.
    ///
    /// Returns `false` when `cancel` fired; the series is then left unchanged.
    pub fn sort(&mut self, opts: &SortOptions, cancel: &CancellationToken) -> bool {
        let mut order: Vec<usize> = (0..self.nrows()).collect();
        let completed = sorting::sort_by(
            &mut order,
            opts.stable,
            |a, b| ordered(self, *a, *b, opts.desc).unwrap_or(false),
            cancel,
        );
        if !completed {
            warn!("sort of series {:?} cancelled", self.name());
            return false;
        }
        self.permute(&order);
        debug!("sorted series {:?} ({} rows)", self.name(), order.len());
        true
    }
}

impl Series {
    pub fn sort(&self, opts: &SortOptions, cancel: &CancellationToken) -> bool {
        self.write().sort(opts, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;
    use crate::series::typed::Float64Series;

    #[test]
    fn test_sort_puts_nil_first_ascending() {
        let mut s: AnySeries = Float64Series::new("x", vec![Some(2.0), None, Some(1.0)]).into();
        assert!(s.sort(&SortOptions::default(), &CancellationToken::new()));
        assert_eq!(s.value(0), None);
        assert_eq!(s.value(1), Some(Value::Float64(1.0)));

        let desc = SortOptions {
            stable: true,
            desc: true,
        };
        assert!(s.sort(&desc, &CancellationToken::new()));
        assert_eq!(s.value(0), Some(Value::Float64(2.0)));
        assert_eq!(s.value(2), None);
    }

    #[test]
    fn test_cancelled_sort_leaves_series() {
        let token = CancellationToken::new();
        token.cancel();
        let mut s: AnySeries = Float64Series::new("x", vec![Some(2.0), Some(1.0)]).into();
        assert!(!s.sort(&SortOptions::default(), &token));
        assert_eq!(s.value(0), Some(Value::Float64(2.0)));
    }
}
