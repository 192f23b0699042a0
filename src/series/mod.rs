//! Series: named, typed, nullable columns
//!
//! [`Series`] is a shared handle around an [`AnySeries`] protected by a
//! read/write lock. Cloning the handle shares the column; use
//! [`Series::copy`] for an independent column.
//!
//! Every method on the handle takes the lock once. Batch callers take a
//! guard with [`Series::read`] or [`Series::write`] and work on the inner
//! [`AnySeries`] directly, which never locks.

pub mod any;
pub mod apply;
pub mod conversion;
pub mod element;
pub mod iter;
pub mod sort;
pub mod stats;
pub mod typed;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::cancel::CancellationToken;
use crate::core::data_value::DataValue;
use crate::core::error::Result;
use crate::core::range::Range;
use crate::core::value::{IntoValue, Value};
use crate::utils::table;

pub use any::{AnySeries, SeriesKind, SeriesTrait};
pub use apply::FilterAction;
pub use element::{Element, MixedKinds};
pub use iter::{IterOptions, ValuesIter};
pub use sort::SortOptions;
pub use typed::{
    CompareFn, Float64Series, FormatFn, GenericSeries, Int64Series, MixedSeries, StringSeries,
    TimeSeries, TypedSeries,
};

/// Options for equality checks between two Series or DataFrames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsEqualOptions {
    /// Also require names to match
    pub check_name: bool,
}

impl Default for IsEqualOptions {
    fn default() -> Self {
        Self { check_name: true }
    }
}

/// Shared, lockable Series handle
#[derive(Clone)]
pub struct Series {
    inner: Arc<RwLock<AnySeries>>,
}

impl Series {
    pub fn new(series: impl Into<AnySeries>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(series.into())),
        }
    }

    pub fn new_float64(name: &str, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(Float64Series::new(name, values))
    }

    pub fn new_int64(name: &str, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::new(Int64Series::new(name, values))
    }

    pub fn new_string<S, I>(name: &str, values: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = Option<S>>,
    {
        Self::new(StringSeries::new(
            name,
            values.into_iter().map(|v| v.map(Into::into)),
        ))
    }

    pub fn new_time(name: &str, values: impl IntoIterator<Item = Option<DateTime<Utc>>>) -> Self {
        Self::new(TimeSeries::new(name, values))
    }

    /// Generic series accepting only values of type `T`
    pub fn new_generic<T: DataValue + 'static>(
        name: &str,
        values: impl IntoIterator<Item = Option<T>>,
    ) -> Self {
        Self::new(GenericSeries::generic(name, values))
    }

    /// Mixed series accepting values of any kind
    pub fn new_mixed(name: &str, values: impl IntoIterator<Item = Option<Value>>) -> Self {
        Self::new(MixedSeries::mixed(name, values))
    }

    /// Shared lock guard over the inner series
    pub fn read(&self) -> RwLockReadGuard<'_, AnySeries> {
        self.inner.read()
    }

    /// Exclusive lock guard over the inner series
    pub fn write(&self) -> RwLockWriteGuard<'_, AnySeries> {
        self.inner.write()
    }

    /// Returns whether both handles refer to the same column
    pub fn ptr_eq(&self, other: &Series) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn name(&self) -> String {
        self.read().name().to_string()
    }

    pub fn rename(&self, name: &str) {
        self.write().rename(name)
    }

    pub fn nrows(&self) -> usize {
        self.read().nrows()
    }

    pub fn nil_count(&self) -> usize {
        self.read().nil_count()
    }

    pub fn kind(&self) -> SeriesKind {
        self.read().kind()
    }

    pub fn type_name(&self) -> String {
        self.read().type_name()
    }

    /// Cell at `row`. Panics when `row` is out of bounds.
    pub fn value(&self, row: usize) -> Option<Value> {
        self.read().value(row)
    }

    pub fn value_string(&self, row: usize) -> String {
        self.read().value_string(row)
    }

    pub fn update(&self, row: usize, value: impl IntoValue) -> Result<()> {
        self.write().update(row, value.into_value())
    }

    pub fn append(&self, value: impl IntoValue) -> Result<()> {
        self.write().append(value.into_value())
    }

    pub fn prepend(&self, value: impl IntoValue) -> Result<()> {
        self.write().prepend(value.into_value())
    }

    pub fn insert(&self, row: usize, value: impl IntoValue) -> Result<()> {
        self.write().insert(row, value.into_value())
    }

    pub fn remove(&self, row: usize) {
        self.write().remove(row)
    }

    pub fn swap(&self, i: usize, j: usize) {
        self.write().swap(i, j)
    }

    /// Deep copy with its own lock
    pub fn copy(&self) -> Series {
        Series::new(self.read().copy())
    }

    /// Empty series of the same kind
    pub fn new_empty(&self, name: &str, capacity: usize) -> Series {
        Series::new(self.read().new_empty(name, capacity))
    }

    /// Iterate, taking a read lock for every row
    pub fn values_iter(&self, opts: IterOptions) -> ValuesIter<'_> {
        ValuesIter::locked(self, opts)
    }

    /// Row-by-row comparison with `other`, using this series' equality comparator.
    pub fn is_equal(
        &self,
        other: &Series,
        opts: &IsEqualOptions,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        cancel.check()?;
        if self.ptr_eq(other) {
            return Ok(true);
        }

        // never hold both locks: compare against an owned copy of `other`
        let theirs = other.snapshot();
        self.read().matches_snapshot(&theirs, opts, cancel)
    }

    /// Owned copy of name, type and values taken under a single read lock
    pub fn snapshot(&self) -> SeriesSnapshot {
        self.read().snapshot()
    }

    /// Grid rendering of the rows selected by `range`
    pub fn table(&self, range: &Range) -> Result<String> {
        self.read().table(range)
    }
}

/// Detached copy of a series, used to compare without nesting locks
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    pub name: String,
    pub type_name: String,
    pub values: Vec<Option<Value>>,
}

impl AnySeries {
    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            name: self.name().to_string(),
            type_name: self.type_name(),
            values: (0..self.nrows()).map(|row| self.value(row)).collect(),
        }
    }

    /// Row-by-row comparison with a snapshot, using this series' equality comparator.
    pub fn matches_snapshot(
        &self,
        other: &SeriesSnapshot,
        opts: &IsEqualOptions,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        if self.nrows() != other.values.len() || self.type_name() != other.type_name {
            return Ok(false);
        }
        if opts.check_name && self.name() != other.name {
            return Ok(false);
        }
        for (row, value) in other.values.iter().enumerate() {
            cancel.check()?;
            if !self.equals_value(row, value.as_ref()) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Grid rendering of the rows selected by `range`
    pub fn table(&self, range: &Range) -> Result<String> {
        let header = vec![String::new(), self.name().to_uppercase()];
        let rows = range
            .rows(self.nrows())?
            .map(|row| vec![format!("{}:", row), self.value_string(row)])
            .collect::<Vec<_>>();
        let footer = vec![
            format!("{}x1", self.nrows()).to_uppercase(),
            self.type_name().to_uppercase(),
        ];
        Ok(table::render(&header, &rows, &footer))
    }
}

impl fmt::Display for AnySeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.nrows();
        let cells: Vec<String> = if n <= 6 {
            (0..n).map(|row| self.value_string(row)).collect()
        } else {
            let mut cells: Vec<String> = (0..3).map(|row| self.value_string(row)).collect();
            cells.push("...".to_string());
            cells.extend((n - 3..n).map(|row| self.value_string(row)));
            cells
        };
        write!(f, "[ {} ]", cells.join(" "))
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.read(), f)
    }
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Series").field(&*self.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::value::NIL;

    #[test]
    fn test_handle_shares_and_copy_detaches() {
        let s = Series::new_int64("day", vec![Some(1), Some(2)]);
        let shared = s.clone();
        let copied = s.copy();

        shared.append(3i64).unwrap();
        assert_eq!(s.nrows(), 3);
        assert_eq!(copied.nrows(), 2);
        assert!(s.ptr_eq(&shared));
        assert!(!s.ptr_eq(&copied));
    }

    #[test]
    fn test_type_mismatch_on_generic() {
        let s = Series::new_generic("g", vec![Some(1u8), None]);
        assert!(s.append(Value::generic(2u8)).is_ok());
        assert!(matches!(
            s.append(Value::generic("x".to_string())),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(s.update(1, NIL).is_ok());
        assert_eq!(s.nrows(), 3);
    }

    #[test]
    fn test_is_equal_checks_name_optionally() {
        let cancel = CancellationToken::new();
        let a = Series::new_float64("a", vec![Some(1.0), None]);
        let b = Series::new_float64("b", vec![Some(1.0), None]);
        assert!(!a.is_equal(&b, &IsEqualOptions::default(), &cancel).unwrap());
        let opts = IsEqualOptions { check_name: false };
        assert!(a.is_equal(&b, &opts, &cancel).unwrap());
        b.update(1, 2.0).unwrap();
        assert!(!a.is_equal(&b, &opts, &cancel).unwrap());
    }

    #[test]
    fn test_display() {
        let s = Series::new_float64("x", vec![Some(1.5), None, Some(3.0)]);
        assert_eq!(s.to_string(), "[ 1.5 NaN 3 ]");
        let long = Series::new_int64("y", (0..8).map(Some));
        assert_eq!(long.to_string(), "[ 0 1 2 ... 5 6 7 ]");
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_value_panics() {
        let s = Series::new_int64("x", vec![Some(1)]);
        s.value(5);
    }
}
