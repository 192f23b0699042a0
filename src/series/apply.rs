//! Apply and Filter over a single Series.
//!
//! Row functions receive `(value, row, nrows)`. A row function that fails
//! leaves its row untouched and the failure is collected as a `RowError`.
//! Returning [`Error::Halted`] (or a cancellation error) stops the loop.

use log::debug;

use crate::core::cancel::CancellationToken;
use crate::core::error::{Error, Result};
use crate::core::error_collection::{ErrorCollection, Partial};
use crate::core::value::Value;
use crate::series::any::{AnySeries, SeriesTrait};
use crate::series::Series;

/// Decision returned by a filter function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    Keep,
    Drop,
}

/// Errors that end a bulk operation instead of being collected per row
pub(crate) fn is_fatal(err: &Error) -> bool {
    matches!(err, Error::Halted(_)) || err.is_cancellation()
}

impl AnySeries {
    /// Map every row into a new series of the same kind.
    pub fn apply<F>(&self, mut f: F, cancel: &CancellationToken) -> Result<Partial<AnySeries>>
    where
        F: FnMut(Option<Value>, usize, usize) -> Result<Option<Value>>,
    {
        let n = self.nrows();
        debug!("apply: series {:?}, {} rows", self.name(), n);

        let mut out = self.new_empty(self.name(), n);
        let errors = ErrorCollection::new();
        for row in 0..n {
            cancel.check()?;
            let original = self.value(row);
            match f(original.clone(), row, n) {
                Ok(value) => {
                    if let Err(err) = out.append(value) {
                        errors.push_row(row, err);
                        out.append(original)?;
                    }
                }
                Err(err) if is_fatal(&err) => return Err(err),
                Err(err) => {
                    errors.push_row(row, err);
                    out.append(original)?;
                }
            }
        }
        Ok(Partial::new(out, errors))
    }

    /// Map every row in place. Rows already updated stay updated on failure.
    pub fn apply_in_place<F>(&mut self, mut f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(Option<Value>, usize, usize) -> Result<Option<Value>>,
    {
        let n = self.nrows();
        debug!("apply in place: series {:?}, {} rows", self.name(), n);

        let errors = ErrorCollection::new();
        for row in 0..n {
            cancel.check()?;
            match f(self.value(row), row, n) {
                Ok(value) => {
                    if let Err(err) = self.update(row, value) {
                        errors.push_row(row, err);
                    }
                }
                Err(err) if is_fatal(&err) => return Err(err),
                Err(err) => errors.push_row(row, err),
            }
        }
        Ok(errors)
    }

    /// Keep the rows `f` accepts in a new series.
    pub fn filter<F>(&self, mut f: F, cancel: &CancellationToken) -> Result<Partial<AnySeries>>
    where
        F: FnMut(Option<&Value>, usize, usize) -> Result<FilterAction>,
    {
        let n = self.nrows();
        debug!("filter: series {:?}, {} rows", self.name(), n);

        let mut out = self.new_empty(self.name(), 0);
        let errors = ErrorCollection::new();
        for row in 0..n {
            cancel.check()?;
            let value = self.value(row);
            let keep = match f(value.as_ref(), row, n) {
                Ok(action) => action == FilterAction::Keep,
                Err(err) if is_fatal(&err) => return Err(err),
                Err(err) => {
                    errors.push_row(row, err);
                    true
                }
            };
            if keep {
                out.append(value)?;
            }
        }
        Ok(Partial::new(out, errors))
    }

    /// Remove the rows `f` rejects. Rows are removed from the end backwards.
    pub fn filter_in_place<F>(&mut self, mut f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(Option<&Value>, usize, usize) -> Result<FilterAction>,
    {
        let n = self.nrows();
        debug!("filter in place: series {:?}, {} rows", self.name(), n);

        let errors = ErrorCollection::new();
        let mut dropped = Vec::new();
        for row in 0..n {
            cancel.check()?;
            match f(self.value(row).as_ref(), row, n) {
                Ok(FilterAction::Drop) => dropped.push(row),
                Ok(FilterAction::Keep) => {}
                Err(err) if is_fatal(&err) => return Err(err),
                Err(err) => errors.push_row(row, err),
            }
        }

        for &row in dropped.iter().rev() {
            self.remove(row);
        }
        Ok(errors)
    }
}

impl Series {
    /// Map every row into a new, independent series.
    pub fn apply<F>(&self, f: F, cancel: &CancellationToken) -> Result<Partial<Series>>
    where
        F: FnMut(Option<Value>, usize, usize) -> Result<Option<Value>>,
    {
        Ok(self.read().apply(f, cancel)?.map(Series::new))
    }

    /// Map every row in place under one write lock.
    pub fn apply_in_place<F>(&self, f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(Option<Value>, usize, usize) -> Result<Option<Value>>,
    {
        self.write().apply_in_place(f, cancel)
    }

    pub fn filter<F>(&self, f: F, cancel: &CancellationToken) -> Result<Partial<Series>>
    where
        F: FnMut(Option<&Value>, usize, usize) -> Result<FilterAction>,
    {
        Ok(self.read().filter(f, cancel)?.map(Series::new))
    }

    pub fn filter_in_place<F>(&self, f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(Option<&Value>, usize, usize) -> Result<FilterAction>,
    {
        self.write().filter_in_place(f, cancel)
    }
}
