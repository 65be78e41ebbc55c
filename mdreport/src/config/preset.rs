use clap::ValueEnum;

/// Built-in report configurations, one per documentation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
  /// Architecture documents, subsystem specifications and diagrams.
  #[default]
  Subsystems,
  /// Same inputs as `subsystems`, with ASCII art rewritten as Mermaid.
  SubsystemsVisual,
  /// Functional documentation, rendered in the browser.
  Functional,
  /// A single technical manual with a heading outline in the sidebar.
  Manual,
}

impl Preset {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Subsystems => "subsystems",
      Self::SubsystemsVisual => "subsystems-visual",
      Self::Functional => "functional",
      Self::Manual => "manual",
    }
  }

  /// TOML source of the preset, as written by `mdreport init`.
  #[must_use]
  pub const fn source(self) -> &'static str {
    match self {
      Self::Subsystems => mdreport_templates::SUBSYSTEMS_PRESET,
      Self::SubsystemsVisual => mdreport_templates::SUBSYSTEMS_VISUAL_PRESET,
      Self::Functional => mdreport_templates::FUNCTIONAL_PRESET,
      Self::Manual => mdreport_templates::MANUAL_PRESET,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_match_command_line_values() {
    for preset in Preset::value_variants() {
      let value = preset.to_possible_value().map(|v| v.get_name().to_string());
      assert_eq!(value.as_deref(), Some(preset.name()));
      assert!(!preset.source().is_empty());
    }
  }
}
