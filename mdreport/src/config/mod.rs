mod preset;

use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use log::{debug, info, warn};
use mdreport_markdown::{ClassifierOptions, DiagramStyle, MarkdownOptions};
pub use preset::Preset;
use serde::{Deserialize, Serialize};

use crate::{
  bundle::HOME_KEY,
  cli::Cli,
  error::{ReportError, Result},
  report::SectionKind,
};

/// File names searched for in the working directory, in order.
const CONFIG_FILENAMES: &[&str] =
  &["mdreport.toml", "mdreport.json", ".mdreport.toml", ".mdreport.json"];

/// How documents end up in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Markdown is converted to HTML at build time.
  #[default]
  Static,
  /// Markdown is embedded verbatim and rendered by the browser.
  Bundle,
}

/// One document in a group: a bare file name or a labelled table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
  File(String),
  Detailed {
    file:        String,
    #[serde(default)]
    label:       Option<String>,
    #[serde(default)]
    description: Option<String>,
  },
}

impl Entry {
  /// File name, or subsystem name for subsystem groups.
  #[must_use]
  pub fn file(&self) -> &str {
    match self {
      Self::File(file) | Self::Detailed { file, .. } => file,
    }
  }

  #[must_use]
  pub fn label(&self) -> Option<&str> {
    match self {
      Self::File(_) => None,
      Self::Detailed { label, .. } => label.as_deref(),
    }
  }

  #[must_use]
  pub fn description(&self) -> Option<&str> {
    match self {
      Self::File(_) => None,
      Self::Detailed { description, .. } => description.as_deref(),
    }
  }
}

/// A navigation group and the documents it lists, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  pub heading: String,

  #[serde(default)]
  pub kind: SectionKind,

  /// Directory under `base_dir` the entries live in.
  #[serde(default)]
  pub dir: Option<PathBuf>,

  #[serde(default)]
  pub entries: Vec<Entry>,
}

/// Landing page of a bundled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
  pub label:       String,
  pub description: Option<String>,

  /// Markdown file under `base_dir`.
  pub file: Option<PathBuf>,

  /// Inline Markdown. Takes precedence over `file`.
  pub content: Option<String>,
}

impl Default for HomeConfig {
  fn default() -> Self {
    Self {
      label:       "Welcome".to_string(),
      description: None,
      file:        None,
      content:     None,
    }
  }
}

/// Configuration for a single report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Page title, also used in the sidebar header.
  pub title: String,

  pub subtitle: Option<String>,

  pub footer_text: Option<String>,

  /// Report file to write.
  pub output: PathBuf,

  /// Directory input documents are resolved against.
  pub base_dir: PathBuf,

  pub mode: Mode,

  /// How ASCII-art code blocks are presented in static reports.
  pub diagram_style: DiagramStyle,

  /// Show each section's heading outline under its sidebar entry.
  pub toc: bool,

  /// Drop a leading `---` front matter block from every document.
  pub strip_front_matter: bool,

  /// Directory with template overrides, looked up file by file.
  pub template_dir: Option<PathBuf>,

  /// Prefix dropped from file names when deriving sidebar labels.
  pub label_prefix: Option<String>,

  pub home: HomeConfig,

  pub classifier: ClassifierOptions,

  pub groups: Vec<Group>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      title:              "Documentation Report".to_string(),
      subtitle:           None,
      footer_text:        None,
      output:             PathBuf::from("report.html"),
      base_dir:           PathBuf::from("."),
      mode:               Mode::default(),
      diagram_style:      DiagramStyle::default(),
      toc:                false,
      strip_front_matter: false,
      template_dir:       None,
      label_prefix:       None,
      home:               HomeConfig::default(),
      classifier:         ClassifierOptions::default(),
      groups:             Vec::new(),
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ReportError::Config(format!(
        "Failed to read config file: {}: {e}",
        path.display()
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ReportError::Config(format!(
            "Failed to parse JSON config from {}: {e}",
            path.display()
          ))
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          ReportError::Config(format!(
            "Failed to parse TOML config from {}: {e}",
            path.display()
          ))
        })
      },
      Some(_) => {
        Err(ReportError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ReportError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load one of the embedded presets.
  ///
  /// # Errors
  ///
  /// Returns an error if the embedded TOML does not parse.
  pub fn from_preset(preset: Preset) -> Result<Self> {
    toml::from_str(preset.source()).map_err(|e| {
      ReportError::Config(format!(
        "Failed to parse built-in preset {}: {e}",
        preset.name()
      ))
    })
  }

  /// Resolve the active configuration for a CLI invocation.
  ///
  /// An explicit `--config` wins, then `--preset`, then a configuration file
  /// in the working directory, then the `subsystems` preset. Command line
  /// overrides are applied last.
  ///
  /// # Errors
  ///
  /// Returns an error if the chosen source cannot be loaded or the result
  /// fails validation.
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = if let Some(path) = &cli.config {
      info!("Using configuration file: {}", path.display());
      Self::from_file(path)?
    } else if let Some(preset) = cli.preset {
      info!("Using built-in preset: {}", preset.name());
      Self::from_preset(preset)?
    } else if let Some(path) = Self::find_config_file() {
      info!("Using configuration file: {}", path.display());
      Self::from_file(&path)?
    } else {
      debug!("No configuration file found, using the default preset");
      Self::from_preset(Preset::default())?
    };

    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
  }

  /// Apply command line overrides.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(output) = &cli.output {
      self.output.clone_from(output);
    }
    if let Some(base_dir) = &cli.base_dir {
      self.base_dir.clone_from(base_dir);
    }
  }

  /// Search the working directory for a configuration file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    CONFIG_FILENAMES
      .iter()
      .map(|name| current_dir.join(name))
      .find(|path| path.is_file())
  }

  /// Check the settings a build depends on.
  ///
  /// # Errors
  ///
  /// Returns an error if no documents are configured, two entries share an
  /// id, or the template directory does not exist.
  pub fn validate(&self) -> Result<()> {
    if self.groups.iter().all(|group| group.entries.is_empty()) {
      return Err(ReportError::Config(
        "No documents configured: add at least one [[groups]] entry"
          .to_string(),
      ));
    }

    self.check_document_ids()?;

    if let Some(dir) = &self.template_dir
      && !dir.is_dir()
    {
      return Err(ReportError::Config(format!(
        "Template directory does not exist: {}",
        dir.display()
      )));
    }

    if !self.base_dir.is_dir() {
      warn!(
        "Base directory {} does not exist, every document will be skipped",
        self.base_dir.display()
      );
    }

    Ok(())
  }

  /// Ensure every entry gets its own section anchor (static mode) or
  /// document key (bundle mode).
  ///
  /// Ids come from entry names alone, so the same file name listed under two
  /// group directories would otherwise collide.
  ///
  /// # Errors
  ///
  /// Returns an error naming the first clash.
  pub fn check_document_ids(&self) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    if self.mode == Mode::Bundle {
      seen.insert(HOME_KEY.to_string(), "home page");
    }

    for group in &self.groups {
      for entry in &group.entries {
        let id = match self.mode {
          Mode::Static => group.kind.section_id(entry.file()),
          Mode::Bundle => entry.file().to_string(),
        };
        if let Some(first) = seen.insert(id.clone(), &group.heading) {
          return Err(ReportError::Config(format!(
            "Duplicate document id '{id}': {} in '{}' clashes with '{first}'",
            entry.file(),
            group.heading
          )));
        }
      }
    }

    Ok(())
  }

  /// Options handed to the Markdown processor for static reports.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      diagram_style:      self.diagram_style,
      classifier:         self.classifier.clone(),
      strip_front_matter: self.strip_front_matter,
    }
  }

  /// Location of an override for the named template, if a template
  /// directory is configured. Existence is not checked.
  #[must_use]
  pub fn template_file(&self, name: &str) -> Option<PathBuf> {
    self.template_dir.as_ref().map(|dir| dir.join(name))
  }

  /// Write a preset's TOML source to `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be written.
  pub fn generate_config(preset: Preset, path: &Path) -> Result<()> {
    fs::write(path, preset.source()).map_err(|source| {
      ReportError::Write {
        path: path.to_path_buf(),
        source,
      }
    })?;

    info!(
      "Created configuration file {} from the {} preset",
      path.display(),
      preset.name()
    );
    Ok(())
  }

  /// Export embedded templates to a directory for customization
  ///
  /// # Errors
  ///
  /// Returns an error if the output directory cannot be created or a template
  /// cannot be written.
  pub fn export_templates(output_dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|e| {
      ReportError::Config(format!(
        "Failed to create template directory: {}: {e}",
        output_dir.display()
      ))
    })?;

    let mut templates: Vec<_> =
      mdreport_templates::all_templates().into_iter().collect();
    templates.sort_unstable_by_key(|(name, _)| *name);

    for (filename, content) in templates {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content).map_err(|source| {
        ReportError::Write {
          path: file_path.clone(),
          source,
        }
      })?;
      info!("Exported template: {}", file_path.display());
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn entries_accept_strings_and_tables() {
    let config: Config = toml::from_str(
      r#"
      [[groups]]
      heading = "Docs"
      entries = [
        "A.md",
        { file = "B.md", label = "Bee", description = "Second" },
      ]
      "#,
    )
    .expect("config parses");

    let entries = &config.groups[0].entries;
    assert_eq!(entries[0].file(), "A.md");
    assert_eq!(entries[0].label(), None);
    assert_eq!(entries[1].file(), "B.md");
    assert_eq!(entries[1].label(), Some("Bee"));
    assert_eq!(entries[1].description(), Some("Second"));
    assert_eq!(config.groups[0].kind, SectionKind::Document);
  }

  #[test]
  fn missing_keys_fall_back_to_defaults() {
    let config: Config = toml::from_str("title = \"T\"").expect("parses");
    assert_eq!(config.title, "T");
    assert_eq!(config.mode, Mode::Static);
    assert_eq!(config.output, PathBuf::from("report.html"));
    assert_eq!(config.home.label, "Welcome");
    assert_eq!(config.classifier, ClassifierOptions::default());
  }

  #[test]
  fn every_preset_parses_and_validates_its_shape() {
    for preset in [
      Preset::Subsystems,
      Preset::SubsystemsVisual,
      Preset::Functional,
      Preset::Manual,
    ] {
      let config = Config::from_preset(preset).expect("preset parses");
      assert!(!config.groups.is_empty(), "{} has no groups", preset.name());
      config.check_document_ids().expect("preset ids are unique");
    }
  }

  #[test]
  fn presets_carry_their_modes() {
    let visual =
      Config::from_preset(Preset::SubsystemsVisual).expect("preset parses");
    assert_eq!(visual.diagram_style, DiagramStyle::Visual);
    assert_eq!(visual.groups[1].kind, SectionKind::Subsystem);

    let functional =
      Config::from_preset(Preset::Functional).expect("preset parses");
    assert_eq!(functional.mode, Mode::Bundle);
    assert_eq!(functional.label_prefix.as_deref(), Some("ACAS_"));

    let manual = Config::from_preset(Preset::Manual).expect("preset parses");
    assert!(manual.toc);
    assert!(manual.strip_front_matter);
  }

  #[test]
  fn empty_configuration_is_rejected() {
    let err = Config::default().validate().expect_err("no groups");
    assert!(err.to_string().contains("No documents configured"));
  }

  fn readme_group(heading: &str, kind: SectionKind, dir: &str) -> Group {
    Group {
      heading: heading.to_string(),
      kind,
      dir: Some(PathBuf::from(dir)),
      entries: vec![Entry::File("README.md".to_string())],
    }
  }

  #[test]
  fn same_file_name_in_two_directories_is_rejected() {
    let mut config = Config {
      groups: vec![
        readme_group("Guides", SectionKind::Document, "a"),
        readme_group("Internals", SectionKind::Document, "b"),
      ],
      ..Config::default()
    };

    let err = config.check_document_ids().expect_err("static ids clash");
    assert!(matches!(err, ReportError::Config(_)));
    assert!(err.to_string().contains("'readme'"));
    assert!(err.to_string().contains("'Internals' clashes with 'Guides'"));

    config.mode = Mode::Bundle;
    let err = config.check_document_ids().expect_err("bundle keys clash");
    assert!(err.to_string().contains("'README.md'"));
    assert!(config.validate().is_err());
  }

  #[test]
  fn ids_only_clash_within_their_mode() {
    // Kinds prefix static anchors but not bundle keys
    let mut config = Config {
      groups: vec![
        readme_group("Docs", SectionKind::Document, "docs"),
        readme_group("Diagrams", SectionKind::Diagram, "diagrams"),
      ],
      ..Config::default()
    };
    config.check_document_ids().expect("distinct anchors");

    config.mode = Mode::Bundle;
    config.check_document_ids().expect_err("same key");

    config.groups = vec![Group {
      heading: "Docs".to_string(),
      kind:    SectionKind::Document,
      dir:     None,
      entries: vec![Entry::File(HOME_KEY.to_string())],
    }];
    let err = config.check_document_ids().expect_err("home is reserved");
    assert!(err.to_string().contains("'home page'"));
  }

  #[test]
  fn template_file_joins_the_override_directory() {
    let mut config = Config::default();
    assert_eq!(config.template_file("report.html"), None);
    config.template_dir = Some(PathBuf::from("overrides"));
    assert_eq!(
      config.template_file("report.css"),
      Some(PathBuf::from("overrides/report.css"))
    );
  }
}
