//! Row cursors
//!
//! Iterators are single-use and not restartable. Each step yields
//! `(row, value, nrows)`; `None` ends the iteration.

use crate::core::value::Value;
use crate::series::any::{AnySeries, SeriesTrait};
use crate::series::Series;

/// Where iteration starts and how far each step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterOptions {
    /// First row visited. Negative values count from the end.
    pub initial_row: isize,
    /// Rows advanced per step. Negative steps iterate backwards; 0 means 1.
    pub step: isize,
}

impl Default for IterOptions {
    fn default() -> Self {
        Self {
            initial_row: 0,
            step: 1,
        }
    }
}

impl IterOptions {
    /// Start at the last row and walk backwards
    pub fn reverse() -> Self {
        Self {
            initial_row: -1,
            step: -1,
        }
    }

    pub(crate) fn resolve(&self, nrows: usize) -> (Option<usize>, isize) {
        let start = if self.initial_row < 0 {
            nrows.checked_add_signed(self.initial_row)
        } else {
            Some(self.initial_row.unsigned_abs())
        };
        let step = if self.step == 0 { 1 } else { self.step };
        (start, step)
    }
}

/// Next row, or `None` past either end of `usize`
pub(crate) fn advance(row: usize, step: isize) -> Option<usize> {
    row.checked_add_signed(step)
}

enum Source<'a> {
    /// Take a read lock for every step
    Locked(&'a Series),
    /// The caller already holds a guard
    Held(&'a AnySeries),
}

/// Cursor over the values of a Series.
pub struct ValuesIter<'a> {
    source: Source<'a>,
    row: Option<usize>,
    step: isize,
}

impl<'a> ValuesIter<'a> {
    pub(crate) fn locked(series: &'a Series, opts: IterOptions) -> Self {
        let (row, step) = opts.resolve(series.nrows());
        Self {
            source: Source::Locked(series),
            row,
            step,
        }
    }

    pub(crate) fn held(series: &'a AnySeries, opts: IterOptions) -> Self {
        let (row, step) = opts.resolve(series.nrows());
        Self {
            source: Source::Held(series),
            row,
            step,
        }
    }

    fn fetch(series: &AnySeries, row: usize) -> Option<(Option<Value>, usize)> {
        let nrows = series.nrows();
        if row >= nrows {
            return None;
        }
        Some((series.value(row), nrows))
    }
}

impl Iterator for ValuesIter<'_> {
    type Item = (usize, Option<Value>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.row?;
        let fetched = match self.source {
            Source::Locked(series) => Self::fetch(&series.read(), row),
            Source::Held(series) => Self::fetch(series, row),
        };
        match fetched {
            Some((value, nrows)) => {
                self.row = advance(row, self.step);
                Some((row, value, nrows))
            }
            None => {
                self.row = None;
                None
            }
        }
    }
}

impl AnySeries {
    /// Iterate without locking; the caller holds the guard.
    pub fn values_iter(&self, opts: IterOptions) -> ValuesIter<'_> {
        ValuesIter::held(self, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::typed::Int64Series;

    #[test]
    fn test_forward_and_reverse() {
        let s: AnySeries = Int64Series::new("x", vec![Some(1), None, Some(3)]).into();
        let rows: Vec<usize> = s.values_iter(IterOptions::default()).map(|(r, _, _)| r).collect();
        assert_eq!(rows, vec![0, 1, 2]);

        let values: Vec<Option<Value>> = s
            .values_iter(IterOptions::reverse())
            .map(|(_, v, n)| {
                assert_eq!(n, 3);
                v
            })
            .collect();
        assert_eq!(values, vec![Some(Value::Int64(3)), None, Some(Value::Int64(1))]);
    }

    #[test]
    fn test_step_and_out_of_range_start() {
        let s: AnySeries = Int64Series::new("x", (0..7).map(Some)).into();
        let rows: Vec<usize> = s
            .values_iter(IterOptions {
                initial_row: 1,
                step: 3,
            })
            .map(|(r, _, _)| r)
            .collect();
        assert_eq!(rows, vec![1, 4]);

        let opts = IterOptions {
            initial_row: -10,
            step: 1,
        };
        assert_eq!(s.values_iter(opts).count(), 0);
    }

    #[test]
    fn test_extreme_steps_end_iteration() {
        let s: AnySeries = Int64Series::new("x", (0..3).map(Some)).into();
        let huge = IterOptions {
            initial_row: 1,
            step: isize::MAX,
        };
        let rows: Vec<usize> = s.values_iter(huge).map(|(r, _, _)| r).collect();
        assert_eq!(rows, vec![1]);

        let far_back = IterOptions {
            initial_row: isize::MIN,
            step: isize::MIN,
        };
        assert_eq!(s.values_iter(far_back).count(), 0);

        assert_eq!(advance(usize::MAX - 1, 5), None);
        assert_eq!(advance(2, -3), None);
        assert_eq!(advance(2, -2), Some(0));
    }
}
