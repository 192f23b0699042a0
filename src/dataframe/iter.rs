use std::sync::Arc;

use crate::dataframe::base::{DataFrame, Frame};
use crate::dataframe::row::Row;
use crate::series::iter::{advance, IterOptions};

enum Source<'a> {
    Locked(&'a DataFrame),
    Held(&'a Frame),
}

/// Cursor over the rows of a DataFrame, yielding `(row, Row, nrows)`.
///
/// Column names are captured when the iterator is built.
pub struct RowsIter<'a> {
    source: Source<'a>,
    names: Arc<[String]>,
    row: Option<usize>,
    step: isize,
}

impl<'a> RowsIter<'a> {
    fn new(source: Source<'a>, frame: &Frame, opts: IterOptions) -> Self {
        let (row, step) = opts.resolve(frame.nrows());
        Self {
            source,
            names: frame.names_arc(),
            row,
            step,
        }
    }

    fn fetch(frame: &Frame, names: &Arc<[String]>, row: usize) -> Option<(Row, usize)> {
        let nrows = frame.nrows();
        if row >= nrows {
            return None;
        }
        Some((frame.row_named(names, row), nrows))
    }
}

impl Iterator for RowsIter<'_> {
    type Item = (usize, Row, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.row?;
        let fetched = match self.source {
            Source::Locked(df) => Self::fetch(&df.read(), &self.names, row),
            Source::Held(frame) => Self::fetch(frame, &self.names, row),
        };
        match fetched {
            Some((values, nrows)) => {
                self.row = advance(row, self.step);
                Some((row, values, nrows))
            }
            None => {
                self.row = None;
                None
            }
        }
    }
}

impl DataFrame {
    /// Iterate, taking a read lock for every row
    pub fn rows_iter(&self, opts: IterOptions) -> RowsIter<'_> {
        let frame = self.read();
        RowsIter::new(Source::Locked(self), &frame, opts)
    }
}

impl Frame {
    /// Iterate without locking; the caller holds the guard.
    pub fn rows_iter(&self, opts: IterOptions) -> RowsIter<'_> {
        RowsIter::new(Source::Held(self), self, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;
    use crate::series::Series;

    #[test]
    fn test_rows_by_index_and_name() {
        let df = DataFrame::new(vec![
            Series::new_int64("day", vec![Some(1), Some(2)]),
            Series::new_string("city", vec![Some("a"), None]),
        ])
        .unwrap();

        let rows: Vec<(usize, Row, usize)> = df.rows_iter(IterOptions::reverse()).collect();
        assert_eq!(rows.len(), 2);
        let (idx, row, n) = &rows[0];
        assert_eq!((*idx, *n), (1, 2));
        assert_eq!(row[0], Some(Value::Int64(2)));
        assert_eq!(row["city"], None);
    }

    #[test]
    fn test_held_iteration() {
        let df = DataFrame::new(vec![Series::new_int64("x", (0..5).map(Some))]).unwrap();
        let frame = df.read();
        let rows: Vec<usize> = frame
            .rows_iter(IterOptions {
                initial_row: -2,
                step: 1,
            })
            .map(|(r, _, _)| r)
            .collect();
        assert_eq!(rows, vec![3, 4]);
    }
}
