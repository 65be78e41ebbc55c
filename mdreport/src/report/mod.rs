//! Static report assembly: sections, navigation and the page shell.

mod section;
mod source;

use std::{fmt::Write, path::PathBuf};

use html_escape::encode_text;
use log::{debug, info};
use mdreport_markdown::MarkdownProcessor;

pub use self::{
  section::{Section, SectionKind, derive_title},
  source::{SourceDocument, load_group, resolve_path},
};
use crate::{config::Config, error::Result, html::template};

/// Result of a build, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
  pub output:   PathBuf,
  /// Sections (static) or embedded documents (bundle) in the report.
  pub sections: usize,
  /// Configured inputs that did not exist.
  pub skipped:  Vec<PathBuf>,
  pub bytes:    usize,
}

/// A finished page before it is written out.
#[derive(Debug, Clone)]
pub struct RenderedReport {
  pub html:     String,
  pub sections: usize,
  pub skipped:  Vec<PathBuf>,
}

/// Sections under one navigation heading.
#[derive(Debug, Clone)]
pub struct ReportGroup {
  pub heading:  String,
  pub sections: Vec<Section>,
}

/// All converted sections of a static report, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct Report {
  pub groups:  Vec<ReportGroup>,
  pub skipped: Vec<PathBuf>,
}

impl Report {
  /// Load and convert every configured document.
  ///
  /// # Errors
  ///
  /// Returns an error if an existing input cannot be read.
  pub fn assemble(config: &Config) -> Result<Self> {
    let processor = MarkdownProcessor::new(config.markdown_options());
    let mut report = Self::default();

    for group in &config.groups {
      info!("Processing {}...", group.heading);
      let loaded = load_group(&config.base_dir, group, &mut report.skipped)?;
      if loaded.is_empty() {
        debug!("No documents found for {}, leaving it out", group.heading);
        continue;
      }

      let sections = loaded
        .iter()
        .map(|(_, source)| Section::from_source(group.kind, source, &processor))
        .collect();

      report.groups.push(ReportGroup {
        heading: group.heading.clone(),
        sections,
      });
    }

    Ok(report)
  }

  #[must_use]
  pub fn section_count(&self) -> usize {
    self.groups.iter().map(|group| group.sections.len()).sum()
  }

  /// Sidebar markup: one `nav-section` per group.
  #[must_use]
  pub fn navigation_html(&self, with_toc: bool) -> String {
    let mut html = String::new();
    for group in &self.groups {
      html.push_str("<div class=\"nav-section\">\n");
      // Writing to a String cannot fail
      let _ = writeln!(html, "<h3>{}</h3>", encode_text(&group.heading));
      for section in &group.sections {
        html.push_str(&section.nav_item(with_toc));
      }
      html.push_str("</div>\n");
    }
    html
  }

  /// Every section wrapper, concatenated.
  #[must_use]
  pub fn sections_html(&self) -> String {
    self
      .groups
      .iter()
      .flat_map(|group| &group.sections)
      .map(Section::to_html)
      .collect::<Vec<_>>()
      .join("\n")
  }
}

/// Build the page for a static report.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the page template fails.
pub fn render_static(config: &Config) -> Result<RenderedReport> {
  let report = Report::assemble(config)?;
  let sections = report.section_count();

  let html = template::render_report(
    config,
    &report.navigation_html(config.toc),
    &report.sections_html(),
    sections,
  )?;

  Ok(RenderedReport {
    html,
    sections,
    skipped: report.skipped,
  })
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use std::fs;

  use pretty_assertions::assert_eq;
  use tempfile::TempDir;

  use super::*;
  use crate::config::{Entry, Group};

  fn entries(names: &[&str]) -> Vec<Entry> {
    names.iter().map(|n| Entry::File((*n).to_string())).collect()
  }

  #[test]
  fn empty_groups_are_left_out_of_the_navigation() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("A.md"), "# Alpha\n\nText.").expect("write");

    let config = Config {
      base_dir: dir.path().to_path_buf(),
      groups: vec![
        Group {
          heading: "Docs".to_string(),
          kind:    SectionKind::Document,
          dir:     None,
          entries: entries(&["A.md"]),
        },
        Group {
          heading: "Diagrams".to_string(),
          kind:    SectionKind::Diagram,
          dir:     Some(PathBuf::from("Diagrams")),
          entries: entries(&["missing.mermaid"]),
        },
      ],
      ..Config::default()
    };

    let report = Report::assemble(&config).expect("assembles");
    assert_eq!(report.section_count(), 1);
    assert_eq!(
      report.skipped,
      [dir.path().join("Diagrams").join("missing.mermaid")]
    );
    assert_eq!(
      report.navigation_html(false),
      "<div class=\"nav-section\">\n<h3>Docs</h3>\n<a href=\"#a\" \
       class=\"nav-item\">Alpha</a>\n</div>\n"
    );
  }
}
