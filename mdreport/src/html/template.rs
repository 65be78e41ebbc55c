use std::fs;

use log::debug;
use mdreport_templates::{
  BUNDLE_CSS,
  BUNDLE_JS,
  BUNDLE_TEMPLATE,
  REPORT_CSS,
  REPORT_JS,
  REPORT_TEMPLATE,
};
use tera::{Context, Tera};

use crate::{
  bundle::script_safe,
  config::Config,
  error::{ReportError, Result},
};

/// Render the static report page.
///
/// # Errors
///
/// Returns an error if a template override cannot be read or rendering
/// fails.
pub fn render_report(
  config: &Config,
  navigation: &str,
  sections: &str,
  section_count: usize,
) -> Result<String> {
  let template = template_content(config, "report.html", REPORT_TEMPLATE)?;
  let mut context =
    page_context(config, ("report.css", REPORT_CSS), ("report.js", REPORT_JS))?;

  context.insert("navigation", navigation);
  context.insert("sections", sections);
  context.insert("section_count", &section_count);
  context.insert("generated", &generated_date());

  render("report.html", &template, &context)
}

/// Render the bundled report page. `documents` is the body of the
/// `documents` object literal.
///
/// # Errors
///
/// Returns an error if a template override cannot be read or rendering
/// fails.
pub fn render_bundle(
  config: &Config,
  navigation: &str,
  documents: &str,
) -> Result<String> {
  let template = template_content(config, "bundle.html", BUNDLE_TEMPLATE)?;
  let mut context =
    page_context(config, ("bundle.css", BUNDLE_CSS), ("bundle.js", BUNDLE_JS))?;

  context.insert("navigation", navigation);
  context.insert("documents", documents);
  context.insert(
    "title_json",
    &script_safe(&serde_json::to_string(&config.title)?),
  );

  render("bundle.html", &template, &context)
}

/// Content of a template, preferring an override in the configured template
/// directory over the embedded `fallback`.
///
/// # Errors
///
/// Returns an error if an override exists but cannot be read.
pub fn template_content(
  config: &Config,
  name: &str,
  fallback: &str,
) -> Result<String> {
  if let Some(path) = config.template_file(name)
    && path.exists()
  {
    debug!("Using template override: {}", path.display());
    return fs::read_to_string(&path)
      .map_err(|source| ReportError::Read { path, source });
  }
  Ok(fallback.to_string())
}

/// Today's date as shown in the report header.
#[must_use]
pub fn generated_date() -> String {
  jiff::Zoned::now().strftime("%B %d, %Y").to_string()
}

/// Values shared by both page shells.
fn page_context(
  config: &Config,
  (css_name, css_fallback): (&str, &str),
  (js_name, js_fallback): (&str, &str),
) -> Result<Context> {
  let mut context = Context::new();
  context.insert("title", &config.title);
  context.insert("subtitle", &config.subtitle);
  context.insert("footer_text", &config.footer_text);
  context.insert(
    "stylesheet",
    &template_content(config, css_name, css_fallback)?,
  );
  context.insert("script", &template_content(config, js_name, js_fallback)?);
  Ok(context)
}

fn render(name: &str, template: &str, context: &Context) -> Result<String> {
  // Names ending in .html get Tera's HTML autoescaping
  let mut tera = Tera::default();
  tera.add_raw_template(name, template)?;
  Ok(tera.render(name, context)?)
}
