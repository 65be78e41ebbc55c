//! Inline span formatting for a single line of Markdown text.
//!
//! Supports `**strong**`, `*emphasis*`, `` `code` `` and `[label](url)`.
//! Everything else, including raw HTML, passes through untouched.
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::utils::{escape_html, never_matching_regex};

/// Alternation of every inline construct. Alternatives are tried in order at
/// each position, so code spans win over emphasis and strong wins over
/// emphasis.
static INLINE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"`(?P<code>[^`]+)`|\*\*(?P<strong>[^*]+)\*\*|\*(?P<em>[^*\n]+)\*|\[(?P<label>[^\]]+)\]\((?P<url>[^)]+)\)",
  )
  .unwrap_or_else(|e| {
    error!("Failed to compile INLINE_SPAN regex: {e}");
    never_matching_regex()
  })
});

/// Format the inline spans of one line into HTML.
///
/// Code span content is HTML-escaped and never formatted further. The text
/// inside strong, emphasis and link labels is formatted recursively, so
/// `**[docs](x)**` yields a link inside `<strong>`. Overlapping or unbalanced
/// markers are not repaired.
#[must_use]
pub fn format_inline(text: &str) -> String {
  INLINE_SPAN
    .replace_all(text, |caps: &Captures| render_span(caps))
    .into_owned()
}

fn render_span(caps: &Captures) -> String {
  if let Some(code) = caps.name("code") {
    return format!("<code>{}</code>", escape_html(code.as_str()));
  }
  if let Some(strong) = caps.name("strong") {
    return format!("<strong>{}</strong>", format_inline(strong.as_str()));
  }
  if let Some(em) = caps.name("em") {
    return format!("<em>{}</em>", format_inline(em.as_str()));
  }
  match (caps.name("label"), caps.name("url")) {
    (Some(label), Some(url)) => {
      format!(
        "<a href=\"{}\">{}</a>",
        html_escape::encode_double_quoted_attribute(url.as_str()),
        format_inline(label.as_str())
      )
    },
    _ => caps[0].to_string(),
  }
}
