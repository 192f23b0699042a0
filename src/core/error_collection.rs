//! Per-row failure reporting
//!
//! Bulk operations (conversions, Apply, Filter) keep going when a single row
//! fails. Each failure is recorded as a [`RowError`] inside an
//! [`ErrorCollection`], which is handed back alongside the partial result in a
//! [`Partial`].

use std::fmt;

use parking_lot::Mutex;
use thiserror::Error;

use crate::core::error::{Error, Result};

/// An error tagged with the row that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row: {row}: {source}")]
pub struct RowError {
    /// Row index within the source Series or DataFrame
    pub row: usize,
    /// Underlying cause
    pub source: Error,
}

impl RowError {
    /// Create a new RowError
    pub fn new(row: usize, source: Error) -> Self {
        Self { row, source }
    }
}

/// Ordered, lock-protected list of errors.
///
/// Errors can be pushed from several threads through a shared reference.
#[derive(Default)]
pub struct ErrorCollection {
    errors: Mutex<Vec<Error>>,
}

impl ErrorCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error
    pub fn push(&self, err: Error) {
        self.errors.lock().push(err);
    }

    /// Append a row error
    pub fn push_row(&self, row: usize, err: Error) {
        self.push(RowError::new(row, err).into());
    }

    /// Returns whether the collection holds no errors
    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Number of errors held
    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    /// Snapshot of the held errors in insertion order
    pub fn errors(&self) -> Vec<Error> {
        self.errors.lock().clone()
    }

    /// Returns true if any held error is, or wraps, `target`.
    pub fn contains(&self, target: &Error) -> bool {
        self.errors.lock().iter().any(|e| e.is(target))
    }

    /// All held errors that are row errors, in insertion order.
    pub fn row_errors(&self) -> Vec<RowError> {
        self.errors
            .lock()
            .iter()
            .filter_map(|e| match e {
                Error::Row(row_error) => Some((**row_error).clone()),
                _ => None,
            })
            .collect()
    }

    /// Row indices of the held row errors.
    pub fn rows(&self) -> Vec<usize> {
        self.row_errors().into_iter().map(|re| re.row).collect()
    }

    /// First held error matching `predicate`.
    pub fn find<F>(&self, predicate: F) -> Option<Error>
    where
        F: Fn(&Error) -> bool,
    {
        self.errors.lock().iter().find(|e| predicate(e)).cloned()
    }
}

impl Clone for ErrorCollection {
    fn clone(&self) -> Self {
        Self {
            errors: Mutex::new(self.errors()),
        }
    }
}

impl PartialEq for ErrorCollection {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.errors() == other.errors()
    }
}

impl fmt::Debug for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.errors.lock().iter()).finish()
    }
}

impl fmt::Display for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.lock();
        for (i, err) in errors.iter().enumerate() {
            if i + 1 == errors.len() {
                write!(f, "{}", err)?;
            } else {
                writeln!(f, "{}", err)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorCollection {}

impl FromIterator<Error> for ErrorCollection {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        Self {
            errors: Mutex::new(iter.into_iter().collect()),
        }
    }
}

/// A result that may be only partially successful.
///
/// `value` is always usable; `errors` lists the rows that failed.
#[derive(Debug, Clone)]
pub struct Partial<T> {
    pub value: T,
    pub errors: ErrorCollection,
}

impl<T> Partial<T> {
    /// Wrap a value with an (initially empty or pre-filled) error collection
    pub fn new(value: T, errors: ErrorCollection) -> Self {
        Self { value, errors }
    }

    /// Returns whether every row succeeded
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Split into the value and the errors, if any.
    pub fn into_parts(self) -> (T, Option<ErrorCollection>) {
        if self.errors.is_empty() {
            (self.value, None)
        } else {
            (self.value, Some(self.errors))
        }
    }

    /// Discard the partial value when any row failed.
    pub fn into_result(self) -> Result<T> {
        match self.into_parts() {
            (value, None) => Ok(value),
            (_, Some(errors)) => Err(Error::Rows(errors)),
        }
    }

    /// Transform the value, keeping the errors
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Partial<U> {
        Partial {
            value: f(self.value),
            errors: self.errors,
        }
    }
}
