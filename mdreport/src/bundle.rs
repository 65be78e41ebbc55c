//! Bundled reports: Markdown embedded as JavaScript template literals and
//! rendered by the browser one document at a time.

use std::{fmt::Write, path::Path};

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{debug, info, warn};
use mdreport_markdown::utils::strip_front_matter;

use crate::{
  config::Config,
  error::Result,
  html::template,
  report::{RenderedReport, SourceDocument, load_group},
};

/// Key of the landing document, loaded when the page opens.
pub const HOME_KEY: &str = "home";

/// A document as embedded in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDocument {
  pub key:     String,
  pub content: String,
}

/// Escape text for the body of a JavaScript template literal.
///
/// Backslashes, backticks and `${` are escaped so the literal evaluates to
/// exactly `text`. `</` becomes `<\/` so embedded markup cannot close the
/// surrounding `<script>` element.
#[must_use]
pub fn escape_template_literal(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + text.len() / 32);
  let mut chars = text.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '\\' => out.push_str("\\\\"),
      '`' => out.push_str("\\`"),
      '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
      '<' if chars.peek() == Some(&'/') => out.push_str("<\\"),
      _ => out.push(c),
    }
  }

  out
}

/// Make serialized JSON safe to place inside a `<script>` element.
#[must_use]
pub fn script_safe(json: &str) -> String {
  json.replace("</", "<\\/")
}

/// Body of the `documents` object literal: a JSON key and a template literal
/// per document, in order.
///
/// # Errors
///
/// Returns an error if a key cannot be serialized.
pub fn documents_object(documents: &[BundleDocument]) -> Result<String> {
  let mut pairs = Vec::with_capacity(documents.len());
  for document in documents {
    let key = script_safe(&serde_json::to_string(&document.key)?);
    pairs.push(format!(
      "  {key}: `{}`",
      escape_template_literal(&document.content)
    ));
  }
  Ok(pairs.join(",\n"))
}

/// Sidebar label for a file without a configured one: the file stem with
/// `prefix` removed and underscores turned into spaces.
#[must_use]
pub fn default_label(file: &str, prefix: Option<&str>) -> String {
  let stem = Path::new(file)
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or(file);
  let stem = prefix
    .and_then(|prefix| stem.strip_prefix(prefix))
    .unwrap_or(stem);
  stem.replace('_', " ")
}

/// Sidebar entry that switches the page to document `key`.
#[must_use]
pub fn nav_item(key: &str, label: &str, description: Option<&str>) -> String {
  let call = format!(
    "loadDocument('{}')",
    key.replace('\\', "\\\\").replace('\'', "\\'")
  );

  let mut html = format!(
    "<a class=\"nav-item\" onclick=\"{}\" data-doc=\"{}\">{}",
    encode_double_quoted_attribute(&call),
    encode_double_quoted_attribute(key),
    encode_text(label)
  );
  if let Some(description) = description {
    // Writing to a String cannot fail
    let _ = write!(
      html,
      "<div class=\"nav-item-desc\">{}</div>",
      encode_text(description)
    );
  }
  html.push_str("</a>\n");
  html
}

/// Markdown shown when the page opens.
///
/// Inline content wins over a configured file. A missing file, or no
/// configuration at all, falls back to the built-in page (or its override in
/// the template directory).
///
/// # Errors
///
/// Returns an error if an existing home file or template override cannot be
/// read.
pub fn home_content(config: &Config) -> Result<String> {
  if let Some(content) = &config.home.content {
    return Ok(content.clone());
  }

  if let Some(file) = &config.home.file {
    let path = config.base_dir.join(file);
    if let Some(document) = SourceDocument::read(HOME_KEY, path.clone())? {
      return Ok(document.content);
    }
    warn!(
      "Home document {} not found, using the built-in page",
      path.display()
    );
  }

  template::template_content(config, "home.md", mdreport_templates::HOME_MD)
}

/// Build the page for a bundled report.
///
/// The home entry opens the first navigation group. Groups whose documents
/// are all missing are left out, except the first.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the page template fails.
pub fn render_bundle(config: &Config) -> Result<RenderedReport> {
  let mut skipped = Vec::new();
  let mut documents = vec![BundleDocument {
    key:     HOME_KEY.to_string(),
    content: home_content(config)?,
  }];
  let mut navigation = String::new();

  for (index, group) in config.groups.iter().enumerate() {
    info!("Embedding {}...", group.heading);
    let loaded = load_group(&config.base_dir, group, &mut skipped)?;
    if index > 0 && loaded.is_empty() {
      debug!("No documents found for {}, leaving it out", group.heading);
      continue;
    }

    navigation.push_str("<div class=\"nav-section\">\n");
    // Writing to a String cannot fail
    let _ = writeln!(navigation, "<h3>{}</h3>", encode_text(&group.heading));
    if index == 0 {
      navigation.push_str(&nav_item(
        HOME_KEY,
        &config.home.label,
        config.home.description.as_deref(),
      ));
    }

    for (entry, source) in loaded {
      let label = entry.label().map_or_else(
        || default_label(entry.file(), config.label_prefix.as_deref()),
        str::to_string,
      );
      navigation.push_str(&nav_item(&source.key, &label, entry.description()));

      let content = if config.strip_front_matter {
        strip_front_matter(&source.content).to_string()
      } else {
        source.content
      };
      documents.push(BundleDocument {
        key: source.key,
        content,
      });
    }

    navigation.push_str("</div>\n");
  }

  let html = template::render_bundle(
    config,
    &navigation,
    &documents_object(&documents)?,
  )?;

  Ok(RenderedReport {
    html,
    sections: documents.len(),
    skipped,
  })
}
