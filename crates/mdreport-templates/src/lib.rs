use std::collections::HashMap;

pub const REPORT_TEMPLATE: &str = include_str!("../templates/report.html");
pub const BUNDLE_TEMPLATE: &str = include_str!("../templates/bundle.html");

pub const REPORT_CSS: &str = include_str!("../templates/report.css");
pub const BUNDLE_CSS: &str = include_str!("../templates/bundle.css");
pub const REPORT_JS: &str = include_str!("../templates/report.js");
pub const BUNDLE_JS: &str = include_str!("../templates/bundle.js");

/// Landing page for bundled reports without a configured home document.
pub const HOME_MD: &str = include_str!("../templates/home.md");

pub const SUBSYSTEMS_PRESET: &str =
  include_str!("../templates/presets/subsystems.toml");
pub const SUBSYSTEMS_VISUAL_PRESET: &str =
  include_str!("../templates/presets/subsystems-visual.toml");
pub const FUNCTIONAL_PRESET: &str =
  include_str!("../templates/presets/functional.toml");
pub const MANUAL_PRESET: &str = include_str!("../templates/presets/manual.toml");

/// Page shells and assets that can be overridden from a template directory.
#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert("report.html", REPORT_TEMPLATE);
  templates.insert("bundle.html", BUNDLE_TEMPLATE);
  templates.insert("report.css", REPORT_CSS);
  templates.insert("bundle.css", BUNDLE_CSS);
  templates.insert("report.js", REPORT_JS);
  templates.insert("bundle.js", BUNDLE_JS);
  templates.insert("home.md", HOME_MD);
  templates
}
