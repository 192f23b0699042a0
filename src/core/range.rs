//! Inclusive row windows with negative indexing
//!
//! A [`Range`] is resolved against the row count of a Series or DataFrame.
//! Negative bounds count from the end, so `-1` is the last row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Inclusive row window. `None` bounds mean "first row" / "last row".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Option<isize>,
    pub end: Option<isize>,
}

impl Range {
    /// Range covering every row
    pub fn all() -> Self {
        Self::default()
    }

    /// Range with optional bounds
    pub fn new(start: Option<isize>, end: Option<isize>) -> Self {
        Self { start, end }
    }

    /// Range with both bounds set
    pub fn finite(start: isize, end: isize) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Range from `start` to the last row
    pub fn from_start(start: isize) -> Self {
        Self::new(Some(start), None)
    }

    /// Range from the first row to `end`
    pub fn to_end(end: isize) -> Self {
        Self::new(None, Some(end))
    }

    /// Resolve the window against `nrows` rows.
    ///
    /// Returns `Ok(None)` when there are no rows at all. Otherwise returns the
    /// inclusive `(start, end)` pair with `start <= end < nrows`.
    pub fn limits(&self, nrows: usize) -> Result<Option<(usize, usize)>> {
        if nrows == 0 {
            return Ok(None);
        }

        let n = nrows as isize;
        let resolve = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(b) if b < 0 => n + b,
            Some(b) => b,
        };

        let s = resolve(self.start, 0);
        let e = resolve(self.end, n - 1);

        if s < 0 || e < 0 || s >= n || e >= n {
            return Err(Error::InvalidRange(format!(
                "{} is out of bounds for {} rows",
                self, nrows
            )));
        }
        if s > e {
            return Err(Error::InvalidRange(format!(
                "{} resolves to start {} after end {}",
                self, s, e
            )));
        }

        Ok(Some((s as usize, e as usize)))
    }

    /// Number of rows covered by the window, 0 when `nrows` is 0.
    pub fn nrows(&self, nrows: usize) -> Result<usize> {
        Ok(self.limits(nrows)?.map_or(0, |(s, e)| e - s + 1))
    }

    /// Resolved window as a Rust range, empty when `nrows` is 0.
    pub fn rows(&self, nrows: usize) -> Result<std::ops::Range<usize>> {
        Ok(self.limits(nrows)?.map_or(0..0, |(s, e)| s..e + 1))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<isize>| b.map_or_else(|| "nil".to_string(), |v| v.to_string());
        write!(f, "Range:{}-{}", bound(self.start), bound(self.end))
    }
}

/// Merge a list of row indices into the smallest set of consecutive ranges.
///
/// The input may be unordered and contain duplicates.
pub fn ints_to_ranges(ints: &[isize]) -> Vec<Range> {
    let mut sorted = ints.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut out = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return out;
    };

    let (mut start, mut end) = (first, first);
    for v in iter {
        if v == end + 1 {
            end = v;
        } else {
            out.push(Range::finite(start, end));
            start = v;
            end = v;
        }
    }
    out.push(Range::finite(start, end));
    out
}
