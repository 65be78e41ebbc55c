use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Preset;

/// Command line interface for mdreport
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "mdreport: Markdown documentation to one self-contained HTML report"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`]). Defaults to `build`.
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON)
  #[arg(short, long, conflicts_with = "preset")]
  pub config: Option<PathBuf>,

  /// Built-in report configuration to build from
  #[arg(short, long, value_enum)]
  pub preset: Option<Preset>,

  /// Write the report here instead of the configured output path
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// Resolve input documents against this directory
  #[arg(short = 'C', long)]
  pub base_dir: Option<PathBuf>,
}

/// All supported subcommands for the mdreport CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Build the report described by the active configuration.
  Build,

  /// Write a configuration file based on a built-in preset.
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "mdreport.toml")]
    output: PathBuf,

    /// Preset to start from
    #[arg(short, long, value_enum, default_value_t = Preset::Subsystems)]
    preset: Preset,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export default templates to a directory for customization.
  ExportTemplates {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::panic, reason = "Fine in tests")]

  use clap::CommandFactory;

  use super::*;

  #[test]
  fn command_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn no_arguments_means_build_defaults() {
    let cli = Cli::parse_from(["mdreport"]);
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
    assert!(cli.preset.is_none());
    assert!(!cli.verbose);
  }

  #[test]
  fn preset_names_are_kebab_case() {
    let cli = Cli::parse_from([
      "mdreport",
      "--preset",
      "subsystems-visual",
      "-C",
      "docs",
      "build",
    ]);
    assert_eq!(cli.preset, Some(Preset::SubsystemsVisual));
    assert_eq!(cli.base_dir, Some(PathBuf::from("docs")));
    assert!(matches!(cli.command, Some(Commands::Build)));
  }

  #[test]
  fn config_and_preset_conflict() {
    let result =
      Cli::try_parse_from(["mdreport", "-c", "a.toml", "-p", "manual"]);
    assert!(result.is_err());
  }

  #[test]
  fn init_has_its_own_defaults() {
    let cli = Cli::parse_from(["mdreport", "init", "--preset", "functional"]);
    match cli.command {
      Some(Commands::Init {
        output,
        preset,
        force,
      }) => {
        assert_eq!(output, PathBuf::from("mdreport.toml"));
        assert_eq!(preset, Preset::Functional);
        assert!(!force);
      },
      other => panic!("unexpected command: {other:?}"),
    }
  }
}
