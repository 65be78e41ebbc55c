//! The document conversion pipeline.
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
  blocks::convert_blocks,
  diagram::{ClassifierOptions, DiagramStyle},
  extract::ConversionContext,
  postprocess::{convert_inline_arrows, restyle_ascii_art},
  toc::extract_toc,
  types::MarkdownResult,
  utils::strip_front_matter,
};

/// Options for Markdown processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
  /// How ASCII-art code blocks are presented.
  pub diagram_style:      DiagramStyle,
  /// Tunables for ASCII-art detection.
  pub classifier:         ClassifierOptions,
  /// Drop a leading `---` front matter block before rendering.
  pub strip_front_matter: bool,
}

/// Converts whole documents to HTML fragments.
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
  options: MarkdownOptions,
}

impl MarkdownProcessor {
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render one document.
  ///
  /// Each call uses a fresh [`ConversionContext`], so the processor can be
  /// reused across documents.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    let source = if self.options.strip_front_matter {
      strip_front_matter(markdown)
    } else {
      markdown
    };

    let headers = extract_toc(source);
    let title = headers
      .iter()
      .find(|header| header.level == 1)
      .map(|header| header.text.clone());

    let mut context = ConversionContext::new();
    let stripped = context.extract(source);
    debug!("Extracted {} fenced blocks", context.blocks().len());

    let html = context.restore(&convert_blocks(&stripped));
    let (mut html, stats) = restyle_ascii_art(
      &html,
      self.options.diagram_style,
      &self.options.classifier,
    );
    if stats.checked > 0 {
      let verb = match self.options.diagram_style {
        DiagramStyle::Styled => "styled",
        DiagramStyle::Visual => "converted",
      };
      info!(
        "Checked {} code blocks, {verb} {} as ASCII art",
        stats.checked, stats.converted
      );
    }

    if self.options.diagram_style == DiagramStyle::Visual {
      html = convert_inline_arrows(&html);
    }

    MarkdownResult {
      html,
      headers,
      title,
    }
  }
}
