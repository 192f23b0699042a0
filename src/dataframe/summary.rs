//! Per-column overview computed across columns in parallel.

use crate::core::cancel::CancellationToken;
use crate::core::error::Result;
use crate::dataframe::base::DataFrame;
use crate::parallel::TaskGroup;
use crate::series::any::SeriesTrait;
use crate::series::{Series, SeriesKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: SeriesKind,
    pub rows: usize,
    pub nils: usize,
    /// Only for numeric columns
    pub sum: Option<f64>,
    pub mean: Option<f64>,
}

fn summarize(series: &Series, cancel: &CancellationToken) -> Result<ColumnSummary> {
    let s = series.read();
    let kind = s.kind();
    let (sum, mean) = if kind.is_numeric() {
        (Some(s.sum(cancel)?), Some(s.mean(cancel)?))
    } else {
        (None, None)
    };
    Ok(ColumnSummary {
        name: s.name().to_string(),
        kind,
        rows: s.nrows(),
        nils: s.nil_count(),
        sum,
        mean,
    })
}

impl DataFrame {
    /// One [`ColumnSummary`] per column, in column order.
    ///
    /// Columns are summarized concurrently on `group`; the first failure
    /// cancels the others.
    pub fn summary(&self, group: &TaskGroup, cancel: &CancellationToken) -> Result<Vec<ColumnSummary>> {
        let columns: Vec<Series> = self.read().series().to_vec();
        let tasks: Vec<_> = columns
            .into_iter()
            .map(|series| move |token: &CancellationToken| summarize(&series, token))
            .collect();
        group.run(cancel, tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[test]
    fn test_summary_per_column() {
        let df = DataFrame::new(vec![
            Series::new_int64("day", vec![Some(1), None, Some(3)]),
            Series::new_string("city", vec![Some("a"), Some("b"), None]),
        ])
        .unwrap();

        let out = df.summary(&TaskGroup::new(2), &CancellationToken::new()).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "day");
        assert_eq!(out[0].nils, 1);
        assert_eq!(out[0].sum, Some(4.0));
        assert_eq!(out[0].mean, Some(2.0));
        assert_eq!(out[1].kind, SeriesKind::String);
        assert_eq!(out[1].sum, None);
    }

    #[test]
    fn test_summary_cancelled() {
        let df = DataFrame::new(vec![Series::new_float64("x", vec![Some(1.0)])]).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(df.summary(&TaskGroup::default(), &cancel), Err(Error::Cancelled));
    }
}
