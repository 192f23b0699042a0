use std::sync::Arc;

use log::{debug, warn};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::cancel::CancellationToken;
use crate::core::error::{Error, Result};
use crate::core::range::Range;
use crate::core::value::{IntoValue, Value};
use crate::dataframe::row::{ColumnRef, Row, RowValues};
use crate::series::{IsEqualOptions, Series, SeriesSnapshot, SeriesTrait};

/// Lock-free inner tier of a [`DataFrame`].
///
/// Obtained through [`DataFrame::read`] / [`DataFrame::write`]. Member
/// series are locked one at a time, in column order, for each cell access.
#[derive(Debug)]
pub struct Frame {
    series: Vec<Series>,
    n: usize,
}

/// Aligned collection of Series sharing one row count.
///
/// The DataFrame references its Series; it does not copy them. Several
/// DataFrames may share a Series, and a change made through one is visible
/// through the others.
#[derive(Debug)]
pub struct DataFrame {
    frame: RwLock<Frame>,
}

impl Frame {
    fn new(series: Vec<Series>) -> Result<Self> {
        let n = series.first().map_or(0, |s| s.nrows());

        for (i, s) in series.iter().enumerate() {
            let found = s.nrows();
            if found != n {
                return Err(Error::InconsistentRowCount { expected: n, found });
            }
            if series[..i].iter().any(|other| other.ptr_eq(s)) {
                return Err(Error::InvalidInput(format!(
                    "series {:?} is added more than once",
                    s.name()
                )));
            }
        }

        let names: Vec<String> = series.iter().map(|s| s.name()).collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                warn!("duplicate series name {:?}: lookups by name use the first", name);
            }
        }

        Ok(Self { series, n })
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.n
    }

    /// Number of series
    pub fn ncols(&self) -> usize {
        self.series.len()
    }

    /// Member series in column order
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn names(&self) -> Vec<String> {
        self.series.iter().map(|s| s.name()).collect()
    }

    pub(crate) fn names_arc(&self) -> Arc<[String]> {
        self.names().into()
    }

    /// Position of the first series called `name`
    pub fn name_to_column(&self, name: &str) -> Result<usize> {
        self.series
            .iter()
            .position(|s| s.read().name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Resolve a column reference to a position
    pub fn column_index(&self, column: &ColumnRef) -> Result<usize> {
        match column {
            ColumnRef::Index(i) if *i < self.series.len() => Ok(*i),
            ColumnRef::Index(i) => Err(Error::ColumnOutOfBounds {
                index: *i,
                size: self.series.len(),
            }),
            ColumnRef::Name(name) => self.name_to_column(name),
        }
    }

    /// Series for a column reference
    pub fn column<C: Into<ColumnRef>>(&self, column: C) -> Result<&Series> {
        let idx = self.column_index(&column.into())?;
        Ok(&self.series[idx])
    }

    fn check_row(&self, row: usize, limit: usize) {
        if row >= limit {
            panic!("row {} out of bounds for DataFrame with {} rows", row, self.n);
        }
    }

    /// Snapshot of a row. Panics when `row` is out of bounds.
    pub fn row(&self, row: usize) -> Row {
        self.row_named(&self.names_arc(), row)
    }

    pub(crate) fn row_named(&self, names: &Arc<[String]>, row: usize) -> Row {
        self.check_row(row, self.n);
        let values = self.series.iter().map(|s| s.read().value(row)).collect();
        Row::new(Arc::clone(names), values)
    }

    /// Spread row values over the columns. `None` marks a column the input
    /// does not mention.
    pub(crate) fn resolve(&self, values: RowValues) -> Result<Vec<Option<Option<Value>>>> {
        match values {
            RowValues::Positional(values) => {
                if values.len() != self.series.len() {
                    return Err(Error::LengthMismatch {
                        expected: self.series.len(),
                        actual: values.len(),
                    });
                }
                Ok(values.into_iter().map(Some).collect())
            }
            RowValues::Keyed(pairs) => {
                let mut cells = vec![None; self.series.len()];
                for (column, value) in pairs {
                    let idx = self.column_index(&column)?;
                    cells[idx] = Some(value);
                }
                Ok(cells)
            }
        }
    }

    /// Resolve and type-check row values before any series is touched.
    pub(crate) fn prepare(&self, values: RowValues) -> Result<Vec<Option<Option<Value>>>> {
        let cells = self.resolve(values)?;
        for (s, cell) in self.series.iter().zip(&cells) {
            if let Some(value) = cell {
                s.read().accepts(value.as_ref())?;
            }
        }
        Ok(cells)
    }

    /// Add a row at the end. Unmentioned columns get nil.
    pub fn append(&mut self, values: RowValues) -> Result<()> {
        let n = self.n;
        self.insert(n, values)
    }

    /// Add a row at the start. Unmentioned columns get nil.
    pub fn prepend(&mut self, values: RowValues) -> Result<()> {
        self.insert(0, values)
    }

    /// Insert a row before `row`; `row == nrows()` appends.
    pub fn insert(&mut self, row: usize, values: RowValues) -> Result<()> {
        self.check_row(row, self.n + 1);
        let cells = self.prepare(values)?;
        for (s, cell) in self.series.iter().zip(cells) {
            s.write().insert(row, cell.flatten())?;
        }
        self.n += 1;
        Ok(())
    }

    /// Remove a row from every series
    pub fn remove(&mut self, row: usize) {
        self.check_row(row, self.n);
        for s in &self.series {
            s.write().remove(row);
        }
        self.n -= 1;
    }

    /// Swap two rows in every series
    pub fn swap(&mut self, i: usize, j: usize) {
        self.check_row(i, self.n);
        self.check_row(j, self.n);
        if i == j {
            return;
        }
        for s in &self.series {
            s.write().swap(i, j);
        }
    }

    /// Overwrite a row. Keyed values leave unmentioned columns untouched.
    pub fn update_row(&mut self, row: usize, values: RowValues) -> Result<()> {
        self.check_row(row, self.n);
        let cells = self.prepare(values)?;
        for (s, cell) in self.series.iter().zip(cells) {
            if let Some(value) = cell {
                s.write().update(row, value)?;
            }
        }
        Ok(())
    }

    /// Overwrite one cell
    pub fn update<C: Into<ColumnRef>>(&mut self, row: usize, column: C, value: impl IntoValue) -> Result<()> {
        self.check_row(row, self.n);
        let idx = self.column_index(&column.into())?;
        self.series[idx].write().update(row, value.into_value())
    }

    /// Deep copy of every series
    pub fn copy(&self) -> Frame {
        Frame {
            series: self.series.iter().map(Series::copy).collect(),
            n: self.n,
        }
    }

    /// Deep copy of the rows selected by `range`
    pub fn copy_range(&self, range: &Range) -> Result<Frame> {
        let rows = range.rows(self.n)?;
        let mut series = Vec::with_capacity(self.series.len());
        for s in &self.series {
            let src = s.read();
            let mut out = src.new_empty(src.name(), rows.len());
            for row in rows.clone() {
                out.append(src.value(row))?;
            }
            series.push(Series::new(out));
        }
        Ok(Frame {
            series,
            n: rows.len(),
        })
    }

    /// Empty frame with series of the same kinds and names
    pub(crate) fn new_empty_like(&self, capacity: usize) -> Frame {
        let series = self
            .series
            .iter()
            .map(|s| {
                let src = s.read();
                Series::new(src.new_empty(src.name(), capacity))
            })
            .collect();
        Frame { series, n: 0 }
    }

    /// Reorder the series. `names` must list every series exactly once.
    pub fn reorder_columns(&mut self, names: &[&str]) -> Result<()> {
        if names.len() != self.series.len() {
            return Err(Error::LengthMismatch {
                expected: self.series.len(),
                actual: names.len(),
            });
        }

        let mut order = Vec::with_capacity(names.len());
        for name in names {
            let idx = self.name_to_column(name)?;
            if order.contains(&idx) {
                return Err(Error::InvalidInput(format!("column {:?} listed twice", name)));
            }
            order.push(idx);
        }

        self.series = order.into_iter().map(|i| self.series[i].clone()).collect();
        Ok(())
    }

    /// Detach a series from the frame and hand it back
    pub fn remove_series(&mut self, name: &str) -> Result<Series> {
        let idx = self.name_to_column(name)?;
        let removed = self.series.remove(idx);
        if self.series.is_empty() {
            self.n = 0;
        }
        Ok(removed)
    }

    /// Row-by-row, column-by-column comparison
    pub fn is_equal(&self, other: &Frame, opts: &IsEqualOptions, cancel: &CancellationToken) -> Result<bool> {
        if self.ncols() != other.ncols() || self.nrows() != other.nrows() {
            return Ok(false);
        }
        for (a, b) in self.series.iter().zip(&other.series) {
            if !a.is_equal(b, opts, cancel)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl DataFrame {
    /// Build a DataFrame over existing series. The series are shared, not copied.
    pub fn new(series: Vec<Series>) -> Result<Self> {
        let frame = Frame::new(series)?;
        debug!("new DataFrame: {}x{}", frame.nrows(), frame.ncols());
        Ok(Self::from_frame(frame))
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self {
            frame: RwLock::new(frame),
        }
    }

    /// Shared lock guard over the inner frame
    pub fn read(&self) -> RwLockReadGuard<'_, Frame> {
        self.frame.read()
    }

    /// Exclusive lock guard over the inner frame
    pub fn write(&self) -> RwLockWriteGuard<'_, Frame> {
        self.frame.write()
    }

    pub fn nrows(&self) -> usize {
        self.read().nrows()
    }

    pub fn ncols(&self) -> usize {
        self.read().ncols()
    }

    pub fn names(&self) -> Vec<String> {
        self.read().names()
    }

    pub fn name_to_column(&self, name: &str) -> Result<usize> {
        self.read().name_to_column(name)
    }

    /// Handle to a member series
    pub fn series<C: Into<ColumnRef>>(&self, column: C) -> Result<Series> {
        self.read().column(column).cloned()
    }

    pub fn row(&self, row: usize) -> Row {
        self.read().row(row)
    }

    pub fn append(&self, values: RowValues) -> Result<()> {
        self.write().append(values)
    }

    pub fn prepend(&self, values: RowValues) -> Result<()> {
        self.write().prepend(values)
    }

    pub fn insert(&self, row: usize, values: RowValues) -> Result<()> {
        self.write().insert(row, values)
    }

    pub fn remove(&self, row: usize) {
        self.write().remove(row)
    }

    pub fn swap(&self, i: usize, j: usize) {
        self.write().swap(i, j)
    }

    pub fn update_row(&self, row: usize, values: RowValues) -> Result<()> {
        self.write().update_row(row, values)
    }

    pub fn update<C: Into<ColumnRef>>(&self, row: usize, column: C, value: impl IntoValue) -> Result<()> {
        self.write().update(row, column, value)
    }

    /// Independent deep copy
    pub fn copy(&self) -> DataFrame {
        DataFrame::from_frame(self.read().copy())
    }

    pub fn copy_range(&self, range: &Range) -> Result<DataFrame> {
        Ok(DataFrame::from_frame(self.read().copy_range(range)?))
    }

    pub fn reorder_columns(&self, names: &[&str]) -> Result<()> {
        self.write().reorder_columns(names)
    }

    pub fn remove_series(&self, name: &str) -> Result<Series> {
        self.write().remove_series(name)
    }

    pub fn is_equal(&self, other: &DataFrame, opts: &IsEqualOptions, cancel: &CancellationToken) -> Result<bool> {
        cancel.check()?;
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        // snapshot `other` and release it before locking `self`
        let (their_rows, theirs) = {
            let them = other.read();
            let snaps: Vec<SeriesSnapshot> = them.series.iter().map(Series::snapshot).collect();
            (them.nrows(), snaps)
        };
        let me = self.read();
        if me.ncols() != theirs.len() || me.nrows() != their_rows {
            return Ok(false);
        }
        for (s, snap) in me.series.iter().zip(&theirs) {
            if !s.read().matches_snapshot(snap, opts, cancel)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
