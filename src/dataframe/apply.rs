//! Apply and Filter over DataFrame rows.
//!
//! Row functions receive a [`Row`] snapshot addressable by column index or
//! name, together with the row number and the row count.

use log::debug;

use crate::core::cancel::CancellationToken;
use crate::core::error::Result;
use crate::core::error_collection::{ErrorCollection, Partial};
use crate::dataframe::base::{DataFrame, Frame};
use crate::dataframe::row::{Row, RowValues};
use crate::series::apply::is_fatal;
use crate::series::FilterAction;

/// Row-wise transforms for DataFrames
pub trait ApplyExt {
    /// Build a new DataFrame from the rows returned by `f`.
    ///
    /// `f` returns the cells to change; `None` keeps the row as is. Keyed
    /// updates only change the columns they mention.
    fn apply<F>(&self, f: F, cancel: &CancellationToken) -> Result<Partial<DataFrame>>
    where
        F: FnMut(&Row, usize, usize) -> Result<Option<RowValues>>;

    /// Update rows in place with the cells returned by `f`.
    fn apply_in_place<F>(&self, f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(&Row, usize, usize) -> Result<Option<RowValues>>;

    /// Build a new DataFrame from the rows `f` keeps.
    fn filter<F>(&self, f: F, cancel: &CancellationToken) -> Result<Partial<DataFrame>>
    where
        F: FnMut(&Row, usize, usize) -> Result<FilterAction>;

    /// Remove the rows `f` drops.
    fn filter_in_place<F>(&self, f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(&Row, usize, usize) -> Result<FilterAction>;
}

impl Frame {
    fn merged(&self, row: &Row, update: RowValues) -> Result<RowValues> {
        let mut cells = row.values().to_vec();
        for (cell, new) in cells.iter_mut().zip(self.resolve(update)?) {
            if let Some(new) = new {
                *cell = new;
            }
        }
        Ok(RowValues::Positional(cells))
    }

    pub fn apply<F>(&self, mut f: F, cancel: &CancellationToken) -> Result<Partial<Frame>>
    where
        F: FnMut(&Row, usize, usize) -> Result<Option<RowValues>>,
    {
        let n = self.nrows();
        debug!("apply: {}x{} DataFrame", n, self.ncols());

        let names = self.names_arc();
        let mut out = self.new_empty_like(n);
        let errors = ErrorCollection::new();
        for row in 0..n {
            cancel.check()?;
            let current = self.row_named(&names, row);
            let outcome = match f(&current, row, n) {
                Ok(Some(update)) => self.merged(&current, update),
                Ok(None) => Ok(RowValues::Positional(current.values().to_vec())),
                Err(err) if is_fatal(&err) => return Err(err),
                Err(err) => Err(err),
            };
            // a rejected row is copied through unchanged
            if let Err(err) = outcome.and_then(|values| out.append(values)) {
                errors.push_row(row, err);
                out.append(RowValues::Positional(current.into_values()))?;
            }
        }
        Ok(Partial::new(out, errors))
    }

    pub fn apply_in_place<F>(&mut self, mut f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(&Row, usize, usize) -> Result<Option<RowValues>>,
    {
        let n = self.nrows();
        debug!("apply in place: {}x{} DataFrame", n, self.ncols());

        let names = self.names_arc();
        let errors = ErrorCollection::new();
        for row in 0..n {
            cancel.check()?;
            let current = self.row_named(&names, row);
            match f(&current, row, n) {
                Ok(Some(update)) => {
                    if let Err(err) = self.update_row(row, update) {
                        errors.push_row(row, err);
                    }
                }
                Ok(None) => {}
                Err(err) if is_fatal(&err) => return Err(err),
                Err(err) => errors.push_row(row, err),
            }
        }
        Ok(errors)
    }

    pub fn filter<F>(&self, mut f: F, cancel: &CancellationToken) -> Result<Partial<Frame>>
    where
        F: FnMut(&Row, usize, usize) -> Result<FilterAction>,
    {
        let n = self.nrows();
        debug!("filter: {}x{} DataFrame", n, self.ncols());

        let names = self.names_arc();
        let mut out = self.new_empty_like(0);
        let errors = ErrorCollection::new();
        for row in 0..n {
            cancel.check()?;
            let current = self.row_named(&names, row);
            let keep = match f(&current, row, n) {
                Ok(action) => action == FilterAction::Keep,
                Err(err) if is_fatal(&err) => return Err(err),
                Err(err) => {
                    errors.push_row(row, err);
                    true
                }
            };
            if keep {
                out.append(RowValues::Positional(current.into_values()))?;
            }
        }
        Ok(Partial::new(out, errors))
    }

    pub fn filter_in_place<F>(&mut self, mut f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(&Row, usize, usize) -> Result<FilterAction>,
    {
        let n = self.nrows();
        debug!("filter in place: {}x{} DataFrame", n, self.ncols());

        let names = self.names_arc();
        let errors = ErrorCollection::new();
        let mut dropped = Vec::new();
        for row in 0..n {
            cancel.check()?;
            match f(&self.row_named(&names, row), row, n) {
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

impl ApplyExt for DataFrame {
    fn apply<F>(&self, f: F, cancel: &CancellationToken) -> Result<Partial<DataFrame>>
    where
        F: FnMut(&Row, usize, usize) -> Result<Option<RowValues>>,
    {
        Ok(self.read().apply(f, cancel)?.map(DataFrame::from_frame))
    }

    fn apply_in_place<F>(&self, f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(&Row, usize, usize) -> Result<Option<RowValues>>,
    {
        self.write().apply_in_place(f, cancel)
    }

    fn filter<F>(&self, f: F, cancel: &CancellationToken) -> Result<Partial<DataFrame>>
    where
        F: FnMut(&Row, usize, usize) -> Result<FilterAction>,
    {
        Ok(self.read().filter(f, cancel)?.map(DataFrame::from_frame))
    }

    fn filter_in_place<F>(&self, f: F, cancel: &CancellationToken) -> Result<ErrorCollection>
    where
        F: FnMut(&Row, usize, usize) -> Result<FilterAction>,
    {
        self.write().filter_in_place(f, cancel)
    }
}
