//! Types for the mdreport-markdown public API.
use serde::{Deserialize, Serialize};

/// A header in a Markdown document, also used as a table of contents entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Header text with inline emphasis markers removed.
  pub text:  String,
  /// Header level (1-6).
  pub level: u8,
  /// Anchor slug for the header, see [`crate::slugify`].
  pub id:    String,
}

/// Result of Markdown processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML fragment.
  pub html: String,

  /// Level 1-3 headers in document order.
  pub headers: Vec<Header>,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,
}
