//! Grid rendering for DataFrames.

use std::fmt;

use crate::config::{DisplayConfig, FrameConfig};
use crate::core::error::Result;
use crate::core::range::Range;
use crate::dataframe::base::{DataFrame, Frame};
use crate::dataframe::row::ColumnRef;
use crate::series::any::{AnySeries, SeriesTrait};
use crate::utils::table;

const ELLIPSIS: &str = "⋮";

/// Which rows and columns a table shows, and how cells are written
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Columns to show, by index or name. Empty shows every column.
    /// Selected columns keep their DataFrame order.
    pub series: Vec<ColumnRef>,
    pub range: Range,
    /// Text for nil cells. `None` uses each series' own formatting.
    pub nil_text: Option<String>,
    pub uppercase_headers: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            range: Range::all(),
            nil_text: None,
            uppercase_headers: true,
        }
    }
}

impl TableOptions {
    pub fn from_config(config: &FrameConfig) -> Self {
        Self {
            nil_text: Some(config.display.nil_text.clone()),
            uppercase_headers: config.display.uppercase_headers,
            ..Self::default()
        }
    }
}

fn cell(series: &AnySeries, row: usize, nil_text: Option<&str>) -> String {
    match nil_text {
        Some(text) if series.value(row).is_none() => text.to_string(),
        _ => series.value_string(row),
    }
}

fn header(name: &str, uppercase: bool) -> String {
    if uppercase {
        name.to_uppercase()
    } else {
        name.to_string()
    }
}

impl Frame {
    fn selected(&self, columns: &[ColumnRef]) -> Result<Vec<usize>> {
        if columns.is_empty() {
            return Ok((0..self.ncols()).collect());
        }
        let mut picked = vec![false; self.ncols()];
        for column in columns {
            picked[self.column_index(column)?] = true;
        }
        Ok((0..self.ncols()).filter(|&c| picked[c]).collect())
    }

    fn header_and_footer(&self, columns: &[usize], uppercase: bool) -> (Vec<String>, Vec<String>) {
        let mut headers = vec![String::new()];
        let mut footers = vec![header(&format!("{}x{}", self.nrows(), self.ncols()), uppercase)];
        for &c in columns {
            let series = self.series()[c].read();
            headers.push(header(series.name(), uppercase));
            footers.push(header(&series.type_name(), uppercase));
        }
        (headers, footers)
    }

    fn body_row(&self, columns: &[usize], row: usize, nil_text: Option<&str>) -> Vec<String> {
        let mut cells = Vec::with_capacity(columns.len() + 1);
        cells.push(format!("{}:", row));
        for &c in columns {
            cells.push(cell(&self.series()[c].read(), row, nil_text));
        }
        cells
    }

    /// Grid of the rows and columns selected by `opts`.
    pub fn table(&self, opts: &TableOptions) -> Result<String> {
        let columns = self.selected(&opts.series)?;
        let rows = opts.range.rows(self.nrows())?;
        let (headers, footers) = self.header_and_footer(&columns, opts.uppercase_headers);
        let body: Vec<Vec<String>> = rows
            .map(|row| self.body_row(&columns, row, opts.nil_text.as_deref()))
            .collect();
        Ok(table::render(&headers, &body, &footers))
    }

    /// Grid of every column. Frames longer than `max_rows` show a head and a
    /// tail that together hold `max_rows` rows, around an ellipsis row.
    pub fn display_with(&self, config: &DisplayConfig) -> String {
        let n = self.nrows();
        let columns: Vec<usize> = (0..self.ncols()).collect();
        let nil_text = Some(config.nil_text.as_str());
        let (headers, footers) = self.header_and_footer(&columns, config.uppercase_headers);

        // at least one row on each side of the ellipsis
        let keep = config.max_rows.max(2);
        let body: Vec<Vec<String>> = if n <= keep {
            (0..n).map(|row| self.body_row(&columns, row, nil_text)).collect()
        } else {
            let (head, tail) = ((keep + 1) / 2, keep / 2);
            let mut body: Vec<Vec<String>> = (0..head).map(|row| self.body_row(&columns, row, nil_text)).collect();
            body.push(vec![ELLIPSIS.to_string(); columns.len() + 1]);
            body.extend((n - tail..n).map(|row| self.body_row(&columns, row, nil_text)));
            body
        };
        table::render(&headers, &body, &footers)
    }
}

impl DataFrame {
    pub fn table(&self, opts: &TableOptions) -> Result<String> {
        self.read().table(opts)
    }

    pub fn display_with(&self, config: &DisplayConfig) -> String {
        self.read().display_with(config)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(&DisplayConfig::default()))
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::series::Series;

    fn sample(n: i64) -> DataFrame {
        DataFrame::new(vec![
            Series::new_int64("day", (0..n).map(Some)),
            Series::new_string("city", (0..n).map(|i| if i % 2 == 0 { Some("a") } else { None })),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_selects_columns_in_frame_order() {
        let df = sample(2);
        let opts = TableOptions {
            series: vec!["city".into(), 0usize.into()],
            ..TableOptions::default()
        };
        let out = df.table(&opts).unwrap();
        let header = out.lines().nth(1).unwrap();
        assert!(header.find("DAY").unwrap() < header.find("CITY").unwrap());
        assert!(out.contains("2X2"));
    }

    #[test]
    fn test_table_nil_text_and_lowercase() {
        let df = sample(2);
        let opts = TableOptions {
            nil_text: Some("-".into()),
            uppercase_headers: false,
            ..TableOptions::default()
        };
        let out = df.table(&opts).unwrap();
        assert!(out.contains("city"));
        assert!(!out.contains("CITY"));
        assert!(out.contains(" - "));
        assert!(!out.contains("NaN"));
    }

    #[test]
    fn test_table_unknown_column() {
        let opts = TableOptions {
            series: vec!["nope".into()],
            ..TableOptions::default()
        };
        assert_eq!(sample(1).table(&opts), Err(Error::ColumnNotFound("nope".into())));
    }

    #[test]
    fn test_display_elides_middle_rows() {
        let out = sample(10).to_string();
        assert!(out.contains(ELLIPSIS));
        assert!(out.contains("2:"));
        assert!(out.contains("7:"));
        assert!(!out.contains("5:"));
        assert!(out.contains("10X2"));

        let short = sample(6).to_string();
        assert!(!short.contains(ELLIPSIS));
        assert!(short.contains("5:"));
    }

    fn row_labels(out: &str) -> Vec<String> {
        out.lines()
            .filter_map(|line| line.split_whitespace().find(|cell| cell.ends_with(':')))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_small_max_rows_never_repeats_rows() {
        let df = sample(4);
        let config = DisplayConfig {
            max_rows: 2,
            ..DisplayConfig::default()
        };
        let out = df.display_with(&config);
        assert_eq!(row_labels(&out), vec!["0:", "3:"]);
        assert!(out.contains(ELLIPSIS));

        let odd = DisplayConfig {
            max_rows: 5,
            ..DisplayConfig::default()
        };
        assert_eq!(row_labels(&sample(9).display_with(&odd)), vec!["0:", "1:", "2:", "7:", "8:"]);
    }

    #[test]
    fn test_unvalidated_max_rows_shows_short_frames_whole() {
        let config = DisplayConfig {
            max_rows: 1,
            ..DisplayConfig::default()
        };
        let out = sample(2).display_with(&config);
        assert_eq!(row_labels(&out), vec!["0:", "1:"]);
        assert!(!out.contains(ELLIPSIS));
        assert_eq!(row_labels(&sample(3).display_with(&config)), vec!["0:", "2:"]);
    }
}
