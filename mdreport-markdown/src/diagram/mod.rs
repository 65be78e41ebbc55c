//! ASCII-art diagram detection.
//!
//! Decides whether an untagged code block is really a hand-drawn diagram.
//! The rules are heuristics tuned for the documents this tool ships with;
//! anything ambiguous stays plain code.
pub mod mermaid;

use std::sync::LazyLock;

use log::error;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::never_matching_regex;

/// Light, rounded and double box-drawing characters.
const BOX_CHARS: &str = "┌┐└┘├┤┬┴┼─│╭╮╰╯═║╔╗╚╝╠╣╦╩╬";
/// Heavy box-drawing characters.
const HEAVY_BOX_CHARS: &str = "━┃┏┓┗┛┣┫┳┻╋";
/// Directional arrow glyphs.
pub const ARROW_CHARS: &str = "→←↑↓⟶⟵⟷↔▶◀▲▼";

static TEXT_ARROW: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[-=]+>|<[-=]+").unwrap_or_else(|e| {
    error!("Failed to compile TEXT_ARROW regex: {e}");
    never_matching_regex()
  })
});

static TABLE_RUN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[+\-|]{3,}").unwrap_or_else(|e| {
    error!("Failed to compile TABLE_RUN regex: {e}");
    never_matching_regex()
  })
});

static TABLE_CORNER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\+[-+]+\+").unwrap_or_else(|e| {
    error!("Failed to compile TABLE_CORNER regex: {e}");
    never_matching_regex()
  })
});

/// How detected ASCII-art blocks are presented.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DiagramStyle {
  /// Keep the drawing, but give it a diagram-specific CSS class.
  #[default]
  Styled,
  /// Replace the drawing with an equivalent Mermaid description.
  Visual,
}

/// Cosmetic category of a detected ASCII-art block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsciiArtKind {
  Box,
  Arrows,
  Table,
  /// Detected by layout alone, with no drawing characters.
  Plain,
}

impl AsciiArtKind {
  /// CSS class used for the restyled `<pre>` element.
  #[must_use]
  pub const fn css_class(self) -> &'static str {
    match self {
      Self::Box => "ascii-art-box",
      Self::Arrows => "ascii-art-arrows",
      Self::Table => "ascii-art-table",
      Self::Plain => "ascii-art",
    }
  }
}

fn default_keywords() -> Vec<String> {
  [
    "SYS_ADMIN",
    "GL_CORE",
    "IRS_CORE",
    "SL_MGMT",
    "PL_MGMT",
    "ST_CTRL",
    "BATCH_FW",
    "RPT_ENGINE",
    "DAL",
    "PERIOD_PROC",
    "COMMON_UTIL",
    "INTEG_SVC",
  ]
  .into_iter()
  .map(String::from)
  .collect()
}

fn default_connector() -> String {
  "via".to_string()
}

const fn default_keyword_threshold() -> usize {
  3
}

const fn default_indent_threshold() -> usize {
  8
}

const fn default_max_average_width() -> usize {
  60
}

/// Tunables for the structural (character-free) detection rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
  /// Domain entity names whose presence suggests an architecture drawing.
  pub keywords:          Vec<String>,
  /// Distinct keywords required before a block counts as a diagram.
  pub keyword_threshold: usize,
  /// Connector word that marks an indented layout as a diagram.
  pub connector:         String,
  /// Leading indentation, in columns, that a layout must exceed.
  pub indent_threshold:  usize,
  /// Average trimmed line length a layout must stay under.
  pub max_average_width: usize,
}

impl Default for ClassifierOptions {
  fn default() -> Self {
    Self {
      keywords:          default_keywords(),
      keyword_threshold: default_keyword_threshold(),
      connector:         default_connector(),
      indent_threshold:  default_indent_threshold(),
      max_average_width: default_max_average_width(),
    }
  }
}

/// Whether `text` contains any directional arrow, glyph or textual.
#[must_use]
pub fn has_arrow(text: &str) -> bool {
  text.contains(|c: char| ARROW_CHARS.contains(c)) || TEXT_ARROW.is_match(text)
}

/// Classify a code block's raw (unescaped) text.
///
/// Rules are tried in order and the first match wins. Returns `None` for
/// plain code.
#[must_use]
pub fn classify(text: &str, options: &ClassifierOptions) -> Option<AsciiArtKind> {
  // Directory trees drawn with `├──` are boxes too
  if text.contains(|c: char| BOX_CHARS.contains(c))
    || text.contains(|c: char| HEAVY_BOX_CHARS.contains(c))
  {
    return Some(AsciiArtKind::Box);
  }

  if has_arrow(text) {
    return Some(AsciiArtKind::Arrows);
  }

  if TABLE_RUN.is_match(text) && TABLE_CORNER.is_match(text) {
    return Some(AsciiArtKind::Table);
  }

  classify_by_layout(text, options)
}

fn classify_by_layout(
  text: &str,
  options: &ClassifierOptions,
) -> Option<AsciiArtKind> {
  let lines = text
    .lines()
    .filter(|line| !line.trim().is_empty())
    .collect::<Vec<_>>();
  if lines.len() <= 2 {
    return None;
  }

  let keyword_hits = options
    .keywords
    .iter()
    .filter(|keyword| text.contains(keyword.as_str()))
    .count();
  if keyword_hits >= options.keyword_threshold {
    return Some(AsciiArtKind::Box);
  }

  let max_indent = lines
    .iter()
    .map(|line| line.len() - line.trim_start().len())
    .max()
    .unwrap_or_default();
  if max_indent <= options.indent_threshold {
    return None;
  }

  let total_width: usize =
    lines.iter().map(|line| line.trim().chars().count()).sum();
  let narrow = total_width < options.max_average_width * lines.len();
  let connected = text
    .to_lowercase()
    .contains(&options.connector.to_lowercase());

  (narrow && connected).then_some(AsciiArtKind::Plain)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn classify_default(text: &str) -> Option<AsciiArtKind> {
    classify(text, &ClassifierOptions::default())
  }

  #[test]
  fn box_drawing_is_a_box() {
    let drawing = "┌─┐\n│ │\n└─┘";
    assert_eq!(classify_default(drawing), Some(AsciiArtKind::Box));
  }

  #[test]
  fn heavy_box_drawing_is_a_box() {
    assert_eq!(classify_default("┏━━┓\n┗━━┛"), Some(AsciiArtKind::Box));
  }

  #[test]
  fn plain_code_is_not_a_diagram() {
    assert_eq!(classify_default("x = 1"), None);
    assert_eq!(
      classify_default("fn main() {\n    let y = 2;\n    println!(\"{y}\");\n}"),
      None
    );
  }

  #[test]
  fn arrows_are_detected() {
    assert_eq!(classify_default("A → B"), Some(AsciiArtKind::Arrows));
    assert_eq!(classify_default("A -> B"), Some(AsciiArtKind::Arrows));
    assert_eq!(classify_default("A <== B"), Some(AsciiArtKind::Arrows));
  }

  #[test]
  fn directory_trees_are_boxes() {
    let tree = "docs\n├── intro.md\n└── usage.md";
    assert_eq!(classify_default(tree), Some(AsciiArtKind::Box));
    assert_eq!(classify_default("│\n├──"), Some(AsciiArtKind::Box));
  }

  #[test]
  fn plus_minus_borders_are_tables() {
    let table = "+-----+-----+\n| a   | b   |\n+-----+-----+";
    assert_eq!(classify_default(table), Some(AsciiArtKind::Table));
  }

  #[test]
  fn subsystem_names_mark_a_diagram() {
    let text = "GL_CORE    SL_MGMT\n\nPL_MGMT    ST_CTRL\nDAL";
    assert_eq!(classify_default(text), Some(AsciiArtKind::Box));
  }

  #[test]
  fn two_lines_are_never_structural_diagrams() {
    assert_eq!(classify_default("GL_CORE SL_MGMT\nPL_MGMT ST_CTRL"), None);
  }

  #[test]
  fn indented_layout_with_connector_is_plain_art() {
    let text =
      "Sales\n            Stock\n            updated via posting\n  Ledger";
    assert_eq!(classify_default(text), Some(AsciiArtKind::Plain));
  }

  #[test]
  fn indented_layout_without_connector_is_code() {
    let text = "Sales\n            Stock\n            updated\n  Ledger";
    assert_eq!(classify_default(text), None);
  }

  #[test]
  fn keyword_options_are_configurable() {
    let options = ClassifierOptions {
      keywords: vec!["API".into(), "DB".into(), "CACHE".into()],
      ..Default::default()
    };
    let text = "API\nDB\nCACHE";
    assert_eq!(classify(text, &options), Some(AsciiArtKind::Box));
    assert_eq!(classify_default(text), None);
  }

  #[test]
  fn css_classes_match_categories() {
    assert_eq!(AsciiArtKind::Box.css_class(), "ascii-art-box");
    assert_eq!(AsciiArtKind::Plain.css_class(), "ascii-art");
  }
}
