//! Fenced block extraction and restoration.
//!
//! Fenced blocks are removed before block conversion so that Markdown-like
//! characters inside them are never interpreted. Each block is replaced by a
//! placeholder line that the converter passes through verbatim, and the
//! placeholders are substituted with rendered markup afterwards.
use std::{borrow::Cow, collections::HashMap, sync::LazyLock};

use log::error;
use regex::{Captures, Regex};

use crate::utils::{
  codeblock::{FenceEvent, FenceTracker},
  escape_html,
  never_matching_regex,
};

/// Fence info string that marks a diagram block.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

const PLACEHOLDER_PREFIX: &str = "@@MDR-";
const PLACEHOLDER_SUFFIX: &str = "@@";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"@@MDR-(?:CODE|DIAGRAM)-\d+@@").unwrap_or_else(|e| {
    error!("Failed to compile PLACEHOLDER regex: {e}");
    never_matching_regex()
  })
});

/// What an extracted block contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
  /// A plain fenced code block with an optional language tag.
  Code {
    language: Option<String>,
    code:     String,
  },
  /// A diagram-description block rendered client-side.
  Diagram { source: String },
}

/// A fenced block pulled out of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
  /// Placeholder token standing in for the block, unique per document.
  pub placeholder: String,
  /// Position among blocks of the same kind.
  pub index:       usize,
  /// Block contents.
  pub kind:        BlockKind,
}

/// Per-document conversion state.
///
/// Holds the blocks extracted from one document. Each document gets its own
/// context, so placeholder numbering never leaks between documents.
#[derive(Debug, Default)]
pub struct ConversionContext {
  blocks:        Vec<ExtractedBlock>,
  code_count:    usize,
  diagram_count: usize,
}

impl ConversionContext {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Blocks extracted so far, in document order.
  #[must_use]
  pub fn blocks(&self) -> &[ExtractedBlock] {
    &self.blocks
  }

  fn push(&mut self, kind: BlockKind) -> String {
    let (namespace, counter) = match kind {
      BlockKind::Diagram { .. } => ("DIAGRAM", &mut self.diagram_count),
      BlockKind::Code { .. } => ("CODE", &mut self.code_count),
    };
    let index = *counter;
    *counter += 1;

    let placeholder =
      format!("{PLACEHOLDER_PREFIX}{namespace}-{index}{PLACEHOLDER_SUFFIX}");
    self.blocks.push(ExtractedBlock {
      placeholder: placeholder.clone(),
      index,
      kind,
    });
    placeholder
  }

  /// Replace every fenced block in `content` with a placeholder line.
  ///
  /// An unterminated fence is left in place as ordinary text.
  pub fn extract(&mut self, content: &str) -> String {
    let mut output: Vec<Cow<'_, str>> = Vec::new();
    let mut tracker = FenceTracker::new();
    let mut open: Option<(usize, &str)> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in content.lines() {
      let (next, event) = tracker.process_line(line);
      tracker = next;

      match (event, open) {
        (FenceEvent::Open(info), None) => {
          open = Some((output.len(), info));
          body.clear();
          output.push(Cow::Borrowed(line));
        },
        (FenceEvent::Close, Some((start, info))) => {
          let code = body.join("\n");
          let language = info.split_whitespace().next().unwrap_or_default();
          let kind = if language == DIAGRAM_LANGUAGE {
            BlockKind::Diagram { source: code }
          } else {
            BlockKind::Code {
              language: (!language.is_empty()).then(|| language.to_string()),
              code,
            }
          };
          output.truncate(start);
          output.push(Cow::Owned(self.push(kind)));
          open = None;
        },
        (_, Some(_)) => {
          body.push(line);
          output.push(Cow::Borrowed(line));
        },
        (_, None) => output.push(Cow::Borrowed(line)),
      }
    }

    output.join("\n")
  }

  /// Substitute every placeholder in `html` with the rendered block.
  ///
  /// Substituted markup is never scanned again, so block contents that look
  /// like placeholders survive unchanged. Tokens with no matching block are
  /// left as they are.
  #[must_use]
  pub fn restore(&self, html: &str) -> String {
    let rendered = self
      .blocks
      .iter()
      .map(|block| (block.placeholder.as_str(), render_block(block)))
      .collect::<HashMap<_, _>>();

    PLACEHOLDER
      .replace_all(html, |caps: &Captures<'_>| {
        rendered
          .get(&caps[0])
          .cloned()
          .unwrap_or_else(|| caps[0].to_string())
      })
      .into_owned()
  }
}

/// Whether a line consists of nothing but a placeholder token.
#[must_use]
pub fn is_placeholder_line(line: &str) -> bool {
  let trimmed = line.trim();
  trimmed.len() > PLACEHOLDER_PREFIX.len() + PLACEHOLDER_SUFFIX.len()
    && trimmed.starts_with(PLACEHOLDER_PREFIX)
    && trimmed.ends_with(PLACEHOLDER_SUFFIX)
}

fn render_block(block: &ExtractedBlock) -> String {
  match &block.kind {
    BlockKind::Diagram { source } => {
      format!(
        "<div class=\"mermaid\" id=\"mermaid-diagram-{}\">{}</div>",
        block.index,
        escape_html(source)
      )
    },
    BlockKind::Code {
      language: Some(language),
      code,
    } => {
      format!(
        "<pre><code class=\"language-{}\">{}</code></pre>",
        escape_html(language),
        escape_html(code)
      )
    },
    BlockKind::Code {
      language: None,
      code,
    } => format!("<pre><code>{}</code></pre>", escape_html(code)),
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn extracts_code_and_diagram_blocks() {
    let md = "intro\n```rust\nlet x = 1;\n```\ntext\n```mermaid\ngraph TB\n  A --> B\n```\nend";
    let mut ctx = ConversionContext::new();
    let stripped = ctx.extract(md);

    assert_eq!(
      stripped,
      "intro\n@@MDR-CODE-0@@\ntext\n@@MDR-DIAGRAM-0@@\nend"
    );
    assert_eq!(ctx.blocks().len(), 2);
    assert_eq!(ctx.blocks()[0].kind, BlockKind::Code {
      language: Some("rust".to_string()),
      code:     "let x = 1;".to_string(),
    });
    assert_eq!(ctx.blocks()[1].kind, BlockKind::Diagram {
      source: "graph TB\n  A --> B".to_string(),
    });
  }

  #[test]
  fn markdown_inside_fences_is_hidden() {
    let md = "```\n# not a header\n- not a list\n| a | b |\n```";
    let mut ctx = ConversionContext::new();
    let stripped = ctx.extract(md);
    assert_eq!(stripped, "@@MDR-CODE-0@@");
  }

  #[test]
  fn unterminated_fence_is_left_alone() {
    let md = "before\n```\nnever closed";
    let mut ctx = ConversionContext::new();
    assert_eq!(ctx.extract(md), md);
    assert!(ctx.blocks().is_empty());
  }

  #[test]
  fn restore_escapes_exactly_once() {
    let md = "```\nif a < b && c > \"d\" { &amp; }\n```";
    let mut ctx = ConversionContext::new();
    let stripped = ctx.extract(md);
    let html = ctx.restore(&stripped);

    assert_eq!(
      html,
      "<pre><code>if a &lt; b &amp;&amp; c &gt; &quot;d&quot; { &amp;amp; \
       }</code></pre>"
    );
    let inner = html
      .trim_start_matches("<pre><code>")
      .trim_end_matches("</code></pre>");
    assert_eq!(
      html_escape::decode_html_entities(inner),
      "if a < b && c > \"d\" { &amp; }"
    );
  }

  #[test]
  fn restore_renders_language_class_and_diagram_container() {
    let md = "```bash\necho hi\n```\n```mermaid\ngraph LR\n  A --> B\n```";
    let mut ctx = ConversionContext::new();
    let stripped = ctx.extract(md);
    let html = ctx.restore(&stripped);

    assert!(html.contains("<pre><code class=\"language-bash\">echo hi</code></pre>"));
    assert!(html.contains(
      "<div class=\"mermaid\" id=\"mermaid-diagram-0\">graph LR\n  A --&gt; B</div>"
    ));
  }

  #[test]
  fn placeholder_text_inside_blocks_is_not_substituted() {
    let md = "```\nsee @@MDR-CODE-1@@\n```\n```\nsecond\n```";
    let mut ctx = ConversionContext::new();
    let stripped = ctx.extract(md);
    assert_eq!(stripped, "@@MDR-CODE-0@@\n@@MDR-CODE-1@@");

    assert_eq!(
      ctx.restore(&stripped),
      "<pre><code>see @@MDR-CODE-1@@</code></pre>\n<pre><code>second</code></pre>"
    );
    assert_eq!(ctx.restore("left @@MDR-CODE-9@@"), "left @@MDR-CODE-9@@");
  }

  #[test]
  fn placeholder_lines_are_recognised() {
    assert!(is_placeholder_line("@@MDR-CODE-3@@"));
    assert!(is_placeholder_line("  @@MDR-DIAGRAM-0@@ "));
    assert!(!is_placeholder_line("@@@@"));
    assert!(!is_placeholder_line("text @@MDR-CODE-0@@"));
  }
}
