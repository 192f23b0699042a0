//! Row snapshots and row-shaped inputs.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::core::value::Value;

/// A column addressed by position or by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<&String> for ColumnRef {
    fn from(name: &String) -> Self {
        ColumnRef::Name(name.clone())
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "{}", i),
            ColumnRef::Name(name) => f.write_str(name),
        }
    }
}

/// Values for one row, given in column order or keyed by column.
///
/// Keyed rows leave unmentioned columns nil when a row is added, and
/// untouched when a row is updated.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    Positional(Vec<Option<Value>>),
    Keyed(Vec<(ColumnRef, Option<Value>)>),
}

/// Build [`RowValues`] from literals.
///
/// ```
/// use framekit::{row, NIL};
///
/// let positional = row![1, 50.3];
/// let keyed = row! { "day" => 10, "sales" => NIL };
/// # let _ = (positional, keyed);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::dataframe::RowValues::Positional(::std::vec::Vec::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::dataframe::RowValues::Keyed(vec![
            $((
                $crate::dataframe::ColumnRef::from($key),
                $crate::core::value::IntoValue::into_value($value),
            )),+
        ])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::dataframe::RowValues::Positional(vec![
            $($crate::core::value::IntoValue::into_value($value)),+
        ])
    };
}

/// Snapshot of one DataFrame row, addressable by column index or name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    names: Arc<[String]>,
    values: Vec<Option<Value>>,
}

impl Row {
    pub(crate) fn new(names: Arc<[String]>, values: Vec<Option<Value>>) -> Self {
        Self { names, values }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column names in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cells in column order
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<Value>> {
        self.values
    }

    /// Cell at a column index or name. `None` when the column does not exist.
    pub fn get<C: Into<ColumnRef>>(&self, column: C) -> Option<&Option<Value>> {
        match column.into() {
            ColumnRef::Index(i) => self.values.get(i),
            ColumnRef::Name(name) => self
                .names
                .iter()
                .position(|n| *n == name)
                .map(|i| &self.values[i]),
        }
    }

    /// `(name, cell)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Option<Value>)> {
        self.names.iter().map(String::as_str).zip(self.values.iter())
    }
}

impl Index<usize> for Row {
    type Output = Option<Value>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl Index<&str> for Row {
    type Output = Option<Value>;

    /// Panics when no column has this name.
    fn index(&self, name: &str) -> &Self::Output {
        match self.get(name) {
            Some(v) => v,
            None => panic!("column not found: {}", name),
        }
    }
}
