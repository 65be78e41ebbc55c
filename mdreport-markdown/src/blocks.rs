//! Line-oriented block conversion.
//!
//! A single forward scan over the (placeholder-substituted) document, with a
//! paragraph buffer and a list stack as the only state. Every tag opened here
//! is closed by the end of the scan.
use std::sync::LazyLock;

use log::error;
use regex::Regex;

use crate::{
  extract::is_placeholder_line,
  inline::format_inline,
  table::{parse_table, starts_table},
  utils::{never_matching_regex, slugify},
};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#{1,6})\s+(.+)$").unwrap_or_else(|e| {
    error!("Failed to compile HEADER regex: {e}");
    never_matching_regex()
  })
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\s*)([-*+]|\d+\.)\s+(.+)$").unwrap_or_else(|e| {
    error!("Failed to compile LIST_ITEM regex: {e}");
    never_matching_regex()
  })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
  Unordered,
  Ordered,
}

impl ListKind {
  fn from_marker(marker: &str) -> Self {
    if marker.ends_with('.') {
      Self::Ordered
    } else {
      Self::Unordered
    }
  }

  const fn tag(self) -> &'static str {
    match self {
      Self::Unordered => "ul",
      Self::Ordered => "ol",
    }
  }
}

#[derive(Debug, Default)]
struct BlockWriter {
  out:       Vec<String>,
  paragraph: Vec<String>,
  lists:     Vec<ListKind>,
  /// The last emitted line is an `<li>` that has no children yet.
  bare_item: bool,
}

impl BlockWriter {
  fn emit(&mut self, line: String) {
    self.out.push(line);
    self.bare_item = false;
  }

  fn close_paragraph(&mut self) {
    if self.paragraph.is_empty() {
      return;
    }
    let text = self.paragraph.join("\n");
    self.paragraph.clear();
    self.emit(format!("<p>{text}</p>"));
  }

  fn close_item(&mut self) {
    if self.bare_item {
      if let Some(last) = self.out.last_mut() {
        last.push_str("</li>");
      }
      self.bare_item = false;
    } else {
      self.emit("</li>".to_string());
    }
  }

  fn pop_list(&mut self) {
    if let Some(kind) = self.lists.pop() {
      self.close_item();
      self.emit(format!("</{}>", kind.tag()));
    }
  }

  fn close_lists(&mut self) {
    while !self.lists.is_empty() {
      self.pop_list();
    }
  }

  fn close_all(&mut self) {
    self.close_paragraph();
    self.close_lists();
  }

  fn list_item(&mut self, depth: usize, kind: ListKind, content: &str) {
    self.close_paragraph();

    // A list can only nest one level deeper than the current one
    let depth = depth.min(self.lists.len());
    while self.lists.len() > depth + 1 {
      self.pop_list();
    }

    match self.lists.last().copied() {
      Some(current) if self.lists.len() == depth + 1 && current == kind => {
        self.close_item();
      },
      Some(_) if self.lists.len() == depth + 1 => {
        self.pop_list();
        self.open_list(kind);
      },
      _ => self.open_list(kind),
    }

    self.emit(format!("<li>{}", format_inline(content)));
    self.bare_item = true;
  }

  fn open_list(&mut self, kind: ListKind) {
    self.lists.push(kind);
    self.emit(format!("<{}>", kind.tag()));
  }

  fn finish(mut self) -> String {
    self.close_all();
    self.out.join("\n")
  }
}

fn is_rule(trimmed: &str) -> bool {
  matches!(trimmed, "---" | "***" | "___")
}

fn is_citation(trimmed: &str) -> bool {
  if trimmed.starts_with("*Source:") {
    return true;
  }
  trimmed.len() > 2 && trimmed.starts_with('*') && trimmed.ends_with('*')
}

/// Convert Markdown block structure into HTML.
///
/// Fenced code must already have been replaced by placeholder lines; those
/// lines are emitted unchanged. Headers, rules, pipe tables, nested lists,
/// citation lines and paragraphs are recognised, with inline spans formatted
/// inside each.
#[must_use]
pub fn convert_blocks(markdown: &str) -> String {
  let lines = markdown.lines().collect::<Vec<_>>();
  let mut writer = BlockWriter::default();
  let mut i = 0;

  while i < lines.len() {
    let line = lines[i];
    let trimmed = line.trim();

    if trimmed.is_empty() {
      writer.close_paragraph();
      i += 1;
      continue;
    }

    if let Some(caps) = HEADER.captures(trimmed) {
      writer.close_all();
      let level = caps[1].len();
      let text = caps[2].trim();
      writer.emit(format!(
        "<h{level} id=\"{}\">{}</h{level}>",
        slugify(text),
        format_inline(text)
      ));
      i += 1;
      continue;
    }

    if is_rule(trimmed) {
      writer.close_all();
      writer.emit("<hr>".to_string());
      i += 1;
      continue;
    }

    if starts_table(&lines[i..]) {
      if let Some(table) = parse_table(&lines[i..]) {
        writer.close_all();
        writer.emit(table.html);
        i += table.consumed;
        continue;
      }
    }

    if let Some(caps) = LIST_ITEM.captures(line) {
      let depth = caps[1].len() / 2;
      writer.list_item(depth, ListKind::from_marker(&caps[2]), &caps[3]);
      i += 1;
      continue;
    }

    if is_placeholder_line(line) {
      writer.close_paragraph();
      writer.emit(trimmed.to_string());
      i += 1;
      continue;
    }

    writer.close_lists();
    if is_citation(trimmed) {
      writer.close_paragraph();
      writer.emit(format!(
        "<p class=\"source-citation\">{}</p>",
        format_inline(trimmed)
      ));
    } else {
      writer.paragraph.push(format_inline(trimmed));
    }
    i += 1;
  }

  writer.finish()
}
