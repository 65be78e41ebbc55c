use std::fmt::Write;

use html_escape::encode_text;
use mdreport_markdown::{
  Header,
  MarkdownProcessor,
  toc::build_toc_html,
  utils::{escape_html, strip_front_matter},
};
use serde::{Deserialize, Serialize};

use super::SourceDocument;

/// Lines searched for a `# ` title before falling back to the file name.
const TITLE_SEARCH_LINES: usize = 10;

/// Category of a report section. Decides how the source is resolved,
/// rendered and labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
  /// Markdown file relative to the group directory.
  #[default]
  Document,
  /// `{NAME}/{NAME}_SPECIFICATION.md` under the group directory.
  Subsystem,
  /// Raw Mermaid source, shown as a single diagram.
  Diagram,
}

impl SectionKind {
  #[must_use]
  pub const fn css_class(self) -> &'static str {
    match self {
      Self::Document => "doc-section",
      Self::Subsystem => "doc-section subsystem-spec",
      Self::Diagram => "doc-section diagram-section",
    }
  }

  /// Anchor id for the section built from `name`.
  ///
  /// `05_DEPENDENCY_ANALYSIS.md` becomes `05-dependency-analysis`, subsystem
  /// `GL_CORE` becomes `subsystem-gl-core` and diagram
  /// `system_context.mermaid` becomes `diagram-system-context`.
  #[must_use]
  pub fn section_id(self, name: &str) -> String {
    let base = strip_extension(name).replace('_', "-").to_lowercase();
    match self {
      Self::Document => base,
      Self::Subsystem => format!("subsystem-{base}"),
      Self::Diagram => format!("diagram-{base}"),
    }
  }

  /// Text shown under the section title.
  #[must_use]
  pub fn meta(self, name: &str) -> String {
    match self {
      Self::Document => format!("Source: {name}"),
      Self::Subsystem => format!("Subsystem: {name}"),
      Self::Diagram => "Architecture Diagram".to_string(),
    }
  }
}

/// One rendered document inside a static report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
  pub id:        String,
  pub title:     String,
  pub kind:      SectionKind,
  pub meta:      String,
  pub body_html: String,
  pub headers:   Vec<Header>,
}

impl Section {
  /// Render a loaded document as a section of the given kind.
  #[must_use]
  pub fn from_source(
    kind: SectionKind,
    source: &SourceDocument,
    processor: &MarkdownProcessor,
  ) -> Self {
    let id = kind.section_id(&source.key);
    let title_source = if processor.options().strip_front_matter {
      strip_front_matter(&source.content)
    } else {
      source.content.as_str()
    };
    let title = derive_title(title_source, source.file_name());

    let (body_html, headers) = match kind {
      SectionKind::Diagram => {
        let body = format!(
          "<div class=\"mermaid-container\">\n<div class=\"mermaid\" \
           id=\"mermaid-{id}\">\n{}\n</div>\n</div>",
          escape_html(source.content.trim())
        );
        (body, Vec::new())
      },
      SectionKind::Document | SectionKind::Subsystem => {
        let result = processor.render(&source.content);
        (result.html, result.headers)
      },
    };

    Self {
      meta: kind.meta(&source.key),
      id,
      title,
      kind,
      body_html,
      headers,
    }
  }

  /// Section wrapper with header, meta line and converted body.
  #[must_use]
  pub fn to_html(&self) -> String {
    format!(
      "<section id=\"{id}\" class=\"{class}\">\n<div \
       class=\"section-header\">\n<h1>{title}</h1>\n<div \
       class=\"section-meta\">{meta}</div>\n</div>\n<div \
       class=\"section-content\">\n{body}\n</div>\n</section>\n",
      id = escape_html(&self.id),
      class = self.kind.css_class(),
      title = encode_text(&self.title),
      meta = encode_text(&self.meta),
      body = self.body_html,
    )
  }

  /// Sidebar link, followed by the heading outline when `with_toc` is set.
  #[must_use]
  pub fn nav_item(&self, with_toc: bool) -> String {
    let mut html = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
      html,
      "<a href=\"#{}\" class=\"nav-item\">{}</a>",
      escape_html(&self.id),
      encode_text(&self.title)
    );
    if with_toc && !self.headers.is_empty() {
      html.push_str("<div class=\"nav-toc\">\n");
      html.push_str(&build_toc_html(&self.headers));
      html.push_str("</div>\n");
    }
    html
  }
}

/// Title of a document: its first `# ` heading near the top, or a name built
/// from the file name.
#[must_use]
pub fn derive_title(content: &str, file_name: &str) -> String {
  content
    .trim()
    .lines()
    .take(TITLE_SEARCH_LINES)
    .find_map(|line| line.strip_prefix("# "))
    .map_or_else(|| title_from_file_name(file_name), |t| t.trim().to_string())
}

/// `00_MASTER_SUBSYSTEM_ARCHITECTURE.md` becomes
/// `Master Subsystem Architecture`.
fn title_from_file_name(file_name: &str) -> String {
  let spaced = strip_extension(file_name).replace(['_', '-'], " ");
  let numbered = spaced.chars().take(2).filter(char::is_ascii_digit).count() == 2;
  let name = match spaced.split_once(' ') {
    Some((_, rest)) if numbered => rest,
    _ => spaced.as_str(),
  };
  title_case(name)
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut in_word = false;
  for c in text.chars() {
    if c.is_alphabetic() {
      if in_word {
        out.extend(c.to_lowercase());
      } else {
        out.extend(c.to_uppercase());
      }
      in_word = true;
    } else {
      out.push(c);
      in_word = false;
    }
  }
  out
}

fn strip_extension(name: &str) -> &str {
  name
    .strip_suffix(".md")
    .or_else(|| name.strip_suffix(".mermaid"))
    .unwrap_or(name)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use mdreport_markdown::MarkdownOptions;
  use pretty_assertions::assert_eq;

  use super::*;

  fn source(key: &str, file: &str, content: &str) -> SourceDocument {
    SourceDocument {
      key:     key.to_string(),
      path:    PathBuf::from("docs").join(file),
      content: content.to_string(),
    }
  }

  #[test]
  fn ids_follow_the_section_kind() {
    assert_eq!(
      SectionKind::Document.section_id("05_DEPENDENCY_ANALYSIS.md"),
      "05-dependency-analysis"
    );
    assert_eq!(
      SectionKind::Subsystem.section_id("GL_CORE"),
      "subsystem-gl-core"
    );
    assert_eq!(
      SectionKind::Diagram.section_id("system_context.mermaid"),
      "diagram-system-context"
    );
  }

  #[test]
  fn title_prefers_an_early_heading() {
    assert_eq!(
      derive_title("\n\n# General Ledger  \nbody", "GL.md"),
      "General Ledger"
    );
  }

  #[test]
  fn late_heading_falls_back_to_file_name() {
    let content = format!("{}# Too Late", "line\n".repeat(10));
    assert_eq!(
      derive_title(&content, "01_SUBSYSTEM_INVENTORY.md"),
      "Subsystem Inventory"
    );
  }

  #[test]
  fn file_name_titles() {
    assert_eq!(
      title_from_file_name("00_MASTER_SUBSYSTEM_ARCHITECTURE.md"),
      "Master Subsystem Architecture"
    );
    assert_eq!(
      title_from_file_name("data_flow-complete.mermaid"),
      "Data Flow Complete"
    );
    assert_eq!(title_from_file_name("7_up.md"), "7 Up");
  }

  #[test]
  fn diagram_sections_wrap_the_source_in_a_mermaid_container() {
    let processor = MarkdownProcessor::default();
    let section = Section::from_source(
      SectionKind::Diagram,
      &source(
        "system_context.mermaid",
        "system_context.mermaid",
        "graph TB\n  A --> B\n",
      ),
      &processor,
    );

    assert_eq!(section.title, "System Context");
    assert_eq!(section.meta, "Architecture Diagram");
    assert_eq!(
      section.body_html,
      "<div class=\"mermaid-container\">\n<div class=\"mermaid\" \
       id=\"mermaid-diagram-system-context\">\ngraph TB\n  A --&gt; \
       B\n</div>\n</div>"
    );
    assert!(section.headers.is_empty());
  }

  #[test]
  fn subsystem_sections_render_markdown() {
    let processor = MarkdownProcessor::default();
    let section = Section::from_source(
      SectionKind::Subsystem,
      &source(
        "GL_CORE",
        "GL_CORE_SPECIFICATION.md",
        "# GL Core\n\n## Purpose\n\nPosts journals.",
      ),
      &processor,
    );

    assert_eq!(section.id, "subsystem-gl-core");
    assert_eq!(section.title, "GL Core");
    assert_eq!(section.meta, "Subsystem: GL_CORE");
    assert!(section.body_html.contains("<h2 id=\"purpose\">Purpose</h2>"));
    assert_eq!(section.headers.len(), 2);

    let html = section.to_html();
    assert!(html.starts_with(
      "<section id=\"subsystem-gl-core\" class=\"doc-section subsystem-spec\">"
    ));
    assert!(html.contains("<div class=\"section-meta\">Subsystem: GL_CORE</div>"));
    assert!(html.ends_with("</div>\n</section>\n"));
  }

  #[test]
  fn front_matter_does_not_hide_the_title() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      strip_front_matter: true,
      ..Default::default()
    });
    let content = format!(
      "---\n{}---\n# Technical Manual\n",
      "key: value\n".repeat(12)
    );
    let section = Section::from_source(
      SectionKind::Document,
      &source("MANUAL.md", "MANUAL.md", &content),
      &processor,
    );
    assert_eq!(section.title, "Technical Manual");
  }

  #[test]
  fn nav_item_can_carry_the_heading_outline() {
    let processor = MarkdownProcessor::default();
    let section = Section::from_source(
      SectionKind::Document,
      &source("GUIDE.md", "GUIDE.md", "# Guide\n\n## Setup\n"),
      &processor,
    );

    assert_eq!(
      section.nav_item(false),
      "<a href=\"#guide\" class=\"nav-item\">Guide</a>\n"
    );
    let with_toc = section.nav_item(true);
    assert!(with_toc.contains("<div class=\"nav-toc\">\n<ul>\n"));
    assert!(with_toc.contains("<li><a href=\"#setup\">Setup</a></li>"));
  }
}
