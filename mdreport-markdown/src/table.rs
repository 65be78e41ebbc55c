//! Pipe table parsing.
use std::fmt::Write;

use crate::inline::format_inline;

/// A parsed pipe table and the number of source lines it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
  /// Rendered `<table>` element.
  pub html:     String,
  /// Lines consumed, including header and separator.
  pub consumed: usize,
}

/// Whether `line` could be a table separator row: it has a pipe and a run
/// of dashes.
#[must_use]
pub fn is_separator_row(line: &str) -> bool {
  line.contains('|') && line.contains('-')
}

/// Whether the table starting at `lines[0]` looks like a table at all: the
/// header has a pipe and the next line is a separator row.
#[must_use]
pub fn starts_table(lines: &[&str]) -> bool {
  match lines {
    [header, separator, ..] => header.contains('|') && is_separator_row(separator),
    _ => false,
  }
}

/// Split a row into trimmed, non-empty cells.
fn split_cells(line: &str) -> Vec<&str> {
  line
    .split('|')
    .map(str::trim)
    .filter(|cell| !cell.is_empty())
    .collect()
}

/// Parse a table whose header row is `lines[0]`.
///
/// Returns `None` when the lines do not form a table (missing separator row
/// or an empty header). Body rows are all contiguous following lines that
/// contain a pipe. Rows without any non-empty cell are consumed but not
/// rendered.
#[must_use]
pub fn parse_table(lines: &[&str]) -> Option<ParsedTable> {
  if !starts_table(lines) {
    return None;
  }

  let headers = split_cells(lines[0]);
  if headers.is_empty() {
    return None;
  }

  let mut html = String::from("<table>\n<thead>\n<tr>\n");
  for header in &headers {
    // Writing to a String cannot fail
    let _ = writeln!(html, "<th>{}</th>", format_inline(header));
  }
  html.push_str("</tr>\n</thead>\n<tbody>\n");

  let body_rows = lines[2..]
    .iter()
    .take_while(|line| line.contains('|'))
    .collect::<Vec<_>>();

  for row in &body_rows {
    let cells = split_cells(row);
    if cells.is_empty() {
      continue;
    }
    html.push_str("<tr>\n");
    for cell in cells {
      let _ = writeln!(html, "<td>{}</td>", format_inline(cell));
    }
    html.push_str("</tr>\n");
  }
  html.push_str("</tbody>\n</table>");

  Some(ParsedTable {
    html,
    consumed: 2 + body_rows.len(),
  })
}
