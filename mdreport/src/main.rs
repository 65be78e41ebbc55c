use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info, warn};
use mdreport::{
  Config,
  cli::{Cli, Commands},
};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .target(env_logger::Target::Stdout)
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Some(Commands::Init {
      output,
      preset,
      force,
    }) => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_config(*preset, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;
      return Ok(());
    },

    Some(Commands::ExportTemplates { output_dir, force }) => {
      Config::export_templates(output_dir, *force).wrap_err_with(|| {
        format!("Failed to export templates to {}", output_dir.display())
      })?;
      return Ok(());
    },

    Some(Commands::Build) | None => {},
  }

  let config = Config::load(&cli).wrap_err("Failed to load configuration")?;
  let summary = mdreport::build(&config).wrap_err_with(|| {
    format!("Failed to build report {}", config.output.display())
  })?;

  if !summary.skipped.is_empty() {
    warn!("{} configured file(s) were missing", summary.skipped.len());
  }
  info!(
    "Report generated: {} ({} sections, {} KB)",
    summary.output.display(),
    summary.sections,
    summary.bytes.div_ceil(1024)
  );

  Ok(())
}
