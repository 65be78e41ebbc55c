//! Table of contents extraction and rendering.
use std::{fmt::Write, sync::LazyLock};

use log::error;
use regex::Regex;

use crate::{
  types::Header,
  utils::{
    codeblock::FenceTracker,
    escape_html,
    never_matching_regex,
    slugify,
    strip_inline_markers,
  },
};

/// Deepest header level that appears in a table of contents.
pub const MAX_TOC_LEVEL: u8 = 3;

static TOC_HEADER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#{1,3})\s+(.+)$").unwrap_or_else(|e| {
    error!("Failed to compile TOC_HEADER regex: {e}");
    never_matching_regex()
  })
});

/// Collect level 1-3 headers outside fenced code, in document order.
///
/// Header ids match those produced by the block converter.
#[must_use]
pub fn extract_toc(markdown: &str) -> Vec<Header> {
  let mut tracker = FenceTracker::new();
  let mut headers = Vec::new();

  for line in markdown.lines() {
    let was_in_code = tracker.in_code_block();
    let (next, _) = tracker.process_line(line);
    tracker = next;
    if was_in_code || tracker.in_code_block() {
      continue;
    }

    let Some(caps) = TOC_HEADER.captures(line.trim()) else {
      continue;
    };
    let text = caps[2].trim();
    #[allow(
      clippy::cast_possible_truncation,
      reason = "The pattern caps the level at 3"
    )]
    let level = caps[1].len() as u8;

    headers.push(Header {
      text: strip_inline_markers(text),
      level,
      id: slugify(text),
    });
  }

  headers
}

/// Render headers as nested `<ul>` lists.
///
/// A deeper level opens one list per step and a shallower level closes the
/// lists it leaves. Returns an empty string when there are no headers.
#[must_use]
pub fn build_toc_html(headers: &[Header]) -> String {
  if headers.is_empty() {
    return String::new();
  }

  let mut html = String::new();
  let mut depth: u8 = 0;
  // Nesting is relative to the shallowest header present
  let base = headers.iter().map(|h| h.level).min().unwrap_or(1);

  for header in headers {
    let level = header.level - base + 1;
    while depth < level {
      html.push_str("<ul>\n");
      depth += 1;
    }
    while depth > level {
      html.push_str("</ul>\n");
      depth -= 1;
    }
    // Writing to a String cannot fail
    let _ = writeln!(
      html,
      "<li><a href=\"#{}\">{}</a></li>",
      escape_html(&header.id),
      escape_html(&header.text)
    );
  }

  for _ in 0..depth {
    html.push_str("</ul>\n");
  }

  html
}
