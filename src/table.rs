use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub header: &'a str,
    pub min_width: usize,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub fn left(header: &'a str, min_width: usize) -> Self {
        Self {
            header,
            min_width,
            align: Align::Left,
        }
    }

    pub fn right(header: &'a str, min_width: usize) -> Self {
        Self {
            header,
            min_width,
            align: Align::Right,
        }
    }
}

pub fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|c| display_width(c.header).max(c.min_width))
        .collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(columns.len()) {
            widths[idx] = widths[idx].max(display_width(&sanitize_cell(cell)));
        }
    }
    widths
}

/// Renders a titled table with `+---+` rules and `| a | b |` rows, followed
/// by `footer` and a closing rule.
pub fn render_boxed_table(
    title: &str,
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    footer: &str,
) -> String {
    let widths = column_widths(columns, rows);
    // Cell padding plus the border characters between and around cells.
    let total_width = widths.iter().sum::<usize>() + 3 * widths.len() + 1;
    let banner = "=".repeat(total_width);
    let separator = widths
        .iter()
        .fold(String::from("+"), |mut line, width| {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
            line
        });

    let mut output = String::new();
    let _ = writeln!(output, "{banner}");
    let _ = writeln!(output, "{}", center(title, total_width));
    let _ = writeln!(output, "{banner}");
    let _ = writeln!(output, "{separator}");
    let headers = columns.iter().map(|c| c.header.to_string()).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&headers, columns, &widths));
    let _ = writeln!(output, "{separator}");
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, columns, &widths));
    }
    let _ = writeln!(output, "{separator}");
    let _ = writeln!(output);
    let _ = writeln!(output, "{footer}");
    let _ = writeln!(output, "{banner}");
    output
}

fn format_row(values: &[String], columns: &[Column<'_>], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (idx, column) in columns.iter().enumerate() {
        let value = values.get(idx).map(String::as_str).unwrap_or("");
        let sanitized = sanitize_cell(value);
        let padding = " ".repeat(widths[idx].saturating_sub(display_width(&sanitized)));
        match column.align {
            Align::Left => {
                let _ = write!(line, " {sanitized}{padding} |");
            }
            Align::Right => {
                let _ = write!(line, " {padding}{sanitized} |");
            }
        }
    }
    line
}

fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{text}", " ".repeat(padding / 2))
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // Skip ANSI escape sequence (e.g. \x1b[31m)
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
