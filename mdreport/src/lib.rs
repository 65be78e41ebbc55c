//! # mdreport
//!
//! Turns an ordered, configured set of Markdown and Mermaid documents into a
//! single self-contained HTML report.
//!
//! A [`Config`] lists the documents in navigation groups. In
//! [`Mode::Static`] every document is converted to HTML at build time by
//! [`mdreport_markdown`]. In [`Mode::Bundle`] the Markdown is embedded in the
//! page and rendered by the browser. Either way the result is one file.

pub mod bundle;
pub mod cli;
pub mod config;
pub mod error;
pub mod html;
pub mod report;
pub mod utils;

use log::info;

pub use crate::{
  config::{Config, Mode, Preset},
  error::{ReportError, Result},
  report::BuildSummary,
};

/// Render the configured report and write it to `config.output`.
///
/// Missing inputs are skipped and listed in the returned summary.
///
/// # Errors
///
/// Returns an error if two entries share an id, an existing input cannot be
/// read, a template fails to render, or the output cannot be written.
pub fn build(config: &Config) -> Result<BuildSummary> {
  config.check_document_ids()?;

  info!(
    "Building {} ({:?} mode)",
    config.output.display(),
    config.mode
  );

  let rendered = match config.mode {
    Mode::Static => report::render_static(config)?,
    Mode::Bundle => bundle::render_bundle(config)?,
  };

  utils::output::write_atomic(&config.output, &rendered.html)?;

  Ok(BuildSummary {
    output:   config.output.clone(),
    sections: rendered.sections,
    skipped:  rendered.skipped,
    bytes:    rendered.html.len(),
  })
}
