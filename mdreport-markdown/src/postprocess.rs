//! HTML post-processing for ASCII-art diagrams and inline flow arrows.
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::{
  diagram::{ClassifierOptions, DiagramStyle, classify, mermaid::to_mermaid},
  utils::{escape_html, never_matching_regex},
};

/// Untagged code blocks. Blocks with a language class are never matched.
static PLAIN_CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").unwrap_or_else(|e| {
    error!("Failed to compile PLAIN_CODE_BLOCK regex: {e}");
    never_matching_regex()
  })
});

static TAG: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<[^>]+>").unwrap_or_else(|e| {
    error!("Failed to compile TAG regex: {e}");
    never_matching_regex()
  })
});

static INLINE_ARROW: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(\w+(?:_\w+)?)\s*→\s*(\w+(?:_\w+)?)").unwrap_or_else(|e| {
    error!("Failed to compile INLINE_ARROW regex: {e}");
    never_matching_regex()
  })
});

/// Counts from one restyling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostProcessStats {
  /// Untagged code blocks examined.
  pub checked:   usize,
  /// Blocks restyled or rewritten as diagrams.
  pub converted: usize,
}

/// Restyle untagged code blocks that hold ASCII art.
///
/// In [`DiagramStyle::Styled`] the block keeps its already-escaped content and
/// becomes `<pre class="ascii-art-…">`. In [`DiagramStyle::Visual`] it is
/// replaced by a Mermaid container. Blocks that are not diagrams are left
/// exactly as they were.
#[must_use]
pub fn restyle_ascii_art(
  html: &str,
  style: DiagramStyle,
  options: &ClassifierOptions,
) -> (String, PostProcessStats) {
  let mut stats = PostProcessStats::default();

  let output = PLAIN_CODE_BLOCK.replace_all(html, |caps: &Captures| {
    stats.checked += 1;
    let escaped = &caps[1];
    let raw = html_escape::decode_html_entities(escaped);

    let Some(kind) = classify(&raw, options) else {
      return caps[0].to_string();
    };

    let index = stats.converted;
    stats.converted += 1;
    match style {
      DiagramStyle::Styled => {
        format!("<pre class=\"{}\">{escaped}</pre>", kind.css_class())
      },
      DiagramStyle::Visual => {
        format!(
          "<div class=\"mermaid\" id=\"ascii-converted-{index}\">{}</div>",
          escape_html(to_mermaid(&raw))
        )
      },
    }
  });

  (output.into_owned(), stats)
}

fn tag_name(tag: &str) -> &str {
  tag
    .trim_start_matches('<')
    .trim_start_matches('/')
    .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
    .next()
    .unwrap_or_default()
}

fn push_text(output: &mut String, text: &str, verbatim: bool) {
  if verbatim {
    output.push_str(text);
  } else {
    output.push_str(&INLINE_ARROW.replace_all(
      text,
      "<span class=\"inline-flow\">$1 ➔ $2</span>",
    ));
  }
}

/// Rewrite `A → B` in body text as `<span class="inline-flow">A ➔ B</span>`.
///
/// Only text between tags is touched. Text inside `<pre>`, `<code>` and
/// Mermaid containers is left alone.
#[must_use]
pub fn convert_inline_arrows(html: &str) -> String {
  let mut output = String::with_capacity(html.len());
  let mut verbatim_depth = 0usize;
  let mut in_diagram = false;
  let mut last_end = 0;

  for tag in TAG.find_iter(html) {
    push_text(
      &mut output,
      &html[last_end..tag.start()],
      verbatim_depth > 0 || in_diagram,
    );
    output.push_str(tag.as_str());
    last_end = tag.end();

    let text = tag.as_str();
    let name = tag_name(text);
    in_diagram = name == "div" && text.contains("class=\"mermaid\"");
    if matches!(name, "pre" | "code") {
      if text.starts_with("</") {
        verbatim_depth = verbatim_depth.saturating_sub(1);
      } else {
        verbatim_depth += 1;
      }
    }
  }
  push_text(
    &mut output,
    &html[last_end..],
    verbatim_depth > 0 || in_diagram,
  );

  output
}
