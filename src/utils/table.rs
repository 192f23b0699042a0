//! Plain-text grid rendering shared by Series and DataFrame tables.
//!
//! ```text
//! +-----+-------+
//! |     |  DAY  |
//! +-----+-------+
//! | 0:  |   1   |
//! +-----+-------+
//! | 1X1 | INT64 |
//! +-----+-------+
//! ```

/// Render a centered grid with a header row, body rows and a footer row.
pub(crate) fn render(header: &[String], rows: &[Vec<String>], footer: &[String]) -> String {
    let ncols = header.len();
    let mut widths = vec![0usize; ncols];
    for line in std::iter::once(header)
        .chain(rows.iter().map(|r| r.as_slice()))
        .chain(std::iter::once(footer))
    {
        for (col, cell) in line.iter().enumerate().take(ncols) {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&separator);
    push_line(&mut out, header, &widths);
    out.push_str(&separator);
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&separator);
    push_line(&mut out, footer, &widths);
    out.push_str(&separator);
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (col, width) in widths.iter().enumerate() {
        let cell = cells.get(col).map(String::as_str).unwrap_or("");
        out.push(' ');
        out.push_str(&center(cell, *width));
        out.push_str(" |");
    }
    out.push('\n');
}

// Odd gaps put the extra space on the right.
fn center(cell: &str, width: usize) -> String {
    let gap = width.saturating_sub(cell.chars().count());
    let left = gap / 2;
    format!("{}{}{}", " ".repeat(left), cell, " ".repeat(gap - left))
}
