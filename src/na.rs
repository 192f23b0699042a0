//! Nil handling for Series and DataFrames
//!
//! Dropping is an in-place Filter and filling an in-place Apply, so both
//! honour cancellation at every row.

use log::debug;

use crate::core::cancel::CancellationToken;
use crate::core::error::Result;
use crate::core::error_collection::ErrorCollection;
use crate::core::value::IntoValue;
use crate::dataframe::{ColumnRef, DataFrame, Frame, RowValues};
use crate::series::any::{AnySeries, SeriesTrait};
use crate::series::{FilterAction, Series};

fn keep_if(present: bool) -> FilterAction {
    if present {
        FilterAction::Keep
    } else {
        FilterAction::Drop
    }
}

impl AnySeries {
    /// Remove nil rows. Returns the number of rows removed.
    pub fn drop_nil(&mut self, cancel: &CancellationToken) -> Result<usize> {
        let before = self.nrows();
        if self.nil_count() > 0 {
            self.filter_in_place(|v, _, _| Ok(keep_if(v.is_some())), cancel)?;
        }
        Ok(before - self.nrows())
    }

    /// Replace nils with `value`.
    ///
    /// `value` must fit the series; a value of the wrong type is rejected
    /// before any row changes.
    pub fn fill_nil(&mut self, value: impl IntoValue, cancel: &CancellationToken) -> Result<ErrorCollection> {
        let value = value.into_value();
        self.accepts(value.as_ref())?;
        self.apply_in_place(
            |current, _, _| Ok(current.or_else(|| value.clone())),
            cancel,
        )
    }
}

impl Series {
    pub fn drop_nil(&self, cancel: &CancellationToken) -> Result<usize> {
        self.write().drop_nil(cancel)
    }

    pub fn fill_nil(&self, value: impl IntoValue, cancel: &CancellationToken) -> Result<ErrorCollection> {
        self.write().fill_nil(value, cancel)
    }
}

impl Frame {
    /// Remove every row holding a nil in any column. Returns the number of
    /// rows removed.
    pub fn drop_nil(&mut self, cancel: &CancellationToken) -> Result<usize> {
        let before = self.nrows();
        self.filter_in_place(
            |row, _, _| Ok(keep_if(row.values().iter().all(Option::is_some))),
            cancel,
        )?;
        let dropped = before - self.nrows();
        debug!("dropped {} rows with nils", dropped);
        Ok(dropped)
    }

    /// Replace nils with per-column values.
    ///
    /// Keyed `fills` only touch the columns they name; a positional list must
    /// give one value per column, where nil leaves that column alone.
    pub fn fill_nil(&mut self, fills: RowValues, cancel: &CancellationToken) -> Result<ErrorCollection> {
        let fills: Vec<Option<_>> = self
            .prepare(fills)?
            .into_iter()
            .map(Option::flatten)
            .collect();

        self.apply_in_place(
            |row, _, _| {
                let updates: Vec<(ColumnRef, _)> = row
                    .values()
                    .iter()
                    .zip(&fills)
                    .enumerate()
                    .filter(|(_, (cell, fill))| cell.is_none() && fill.is_some())
                    .map(|(col, (_, fill))| (ColumnRef::Index(col), fill.clone()))
                    .collect();
                Ok((!updates.is_empty()).then_some(RowValues::Keyed(updates)))
            },
            cancel,
        )
    }
}

impl DataFrame {
    pub fn drop_nil(&self, cancel: &CancellationToken) -> Result<usize> {
        self.write().drop_nil(cancel)
    }

    pub fn fill_nil(&self, fills: RowValues, cancel: &CancellationToken) -> Result<ErrorCollection> {
        self.write().fill_nil(fills, cancel)
    }
}
