use std::sync::LazyLock;

use log::error;
use regex::Regex;

pub mod codeblock;

static STRONG_MARKER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*\*([^*]+)\*\*").unwrap_or_else(|e| {
    error!("Failed to compile STRONG_MARKER regex: {e}");
    never_matching_regex()
  })
});

static EMPHASIS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*([^*]+)\*").unwrap_or_else(|e| {
    error!("Failed to compile EMPHASIS_MARKER regex: {e}");
    never_matching_regex()
  })
});

static CODE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"`([^`]+)`").unwrap_or_else(|e| {
    error!("Failed to compile CODE_MARKER regex: {e}");
    never_matching_regex()
  })
});

static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[^\w\s-]").unwrap_or_else(|e| {
    error!("Failed to compile NON_SLUG_CHARS regex: {e}");
    never_matching_regex()
  })
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\s+").unwrap_or_else(|e| {
    error!("Failed to compile WHITESPACE_RUN regex: {e}");
    never_matching_regex()
  })
});

/// Remove `**strong**`, `*emphasis*` and `` `code` `` markers, keeping the
/// text they wrap.
#[must_use]
pub fn strip_inline_markers(text: &str) -> String {
  let text = STRONG_MARKER.replace_all(text, "$1");
  let text = EMPHASIS_MARKER.replace_all(&text, "$1");
  CODE_MARKER.replace_all(&text, "$1").into_owned()
}

/// Slugify header text for use as an anchor ID.
///
/// Inline markers are stripped, the text is lowercased, anything that is not a
/// word character, whitespace or hyphen is dropped, whitespace runs become a
/// single hyphen and leading/trailing hyphens are trimmed. The result depends
/// only on the input text.
#[must_use]
pub fn slugify(text: &str) -> String {
  let lowered = strip_inline_markers(text).to_lowercase();
  let cleaned = NON_SLUG_CHARS.replace_all(&lowered, "");
  WHITESPACE_RUN
    .replace_all(&cleaned, "-")
    .trim_matches('-')
    .to_string()
}

/// Escape text for HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
  html_escape::encode_quoted_attribute(text).into_owned()
}

/// Strip a leading YAML front matter block (`---` ... `---`).
///
/// Content without front matter, or with an unterminated block, is returned
/// unchanged.
#[must_use]
pub fn strip_front_matter(content: &str) -> &str {
  let Some(rest) = content.strip_prefix("---") else {
    return content;
  };

  rest
    .find("---")
    .map_or(content, |end| rest[end + 3..].trim())
}

/// A regex that never matches, used when compiling a static pattern fails.
#[must_use]
#[allow(clippy::expect_used, reason = "The pattern is a valid literal")]
pub fn never_matching_regex() -> Regex {
  // Asserts something impossible: a character that is neither space nor
  // non-space.
  Regex::new(r"[^\s\S]").expect("never-matching pattern is valid")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slugify_strips_markup_and_punctuation() {
    assert_eq!(slugify("Hello **World**!"), "hello-world");
    assert_eq!(slugify("  `GL_CORE` Overview  "), "gl_core-overview");
    assert_eq!(slugify("1. Introduction & Scope"), "1-introduction-scope");
  }

  #[test]
  fn slugify_is_case_insensitive_and_stable() {
    assert_eq!(slugify("Data Flow"), slugify("DATA FLOW"));
    assert_eq!(slugify("Data Flow"), slugify("Data Flow"));
  }

  #[test]
  fn slugify_trims_hyphens() {
    assert_eq!(slugify("-- Edge --"), "edge");
  }

  #[test]
  fn strip_inline_markers_keeps_text() {
    assert_eq!(
      strip_inline_markers("**bold** and *em* and `code`"),
      "bold and em and code"
    );
  }

  #[test]
  fn front_matter_is_removed() {
    let md = "---\ntitle: Manual\n---\n# Heading\n";
    assert_eq!(strip_front_matter(md), "# Heading");
    assert_eq!(strip_front_matter("# No front matter"), "# No front matter");
    assert_eq!(strip_front_matter("---\nunterminated"), "---\nunterminated");
  }

  #[test]
  fn escape_html_escapes_markup() {
    let escaped = escape_html("<a href=\"x\">&</a>");
    assert!(escaped.starts_with("&lt;a href=&quot;x&quot;&gt;&amp;"));
  }
}
