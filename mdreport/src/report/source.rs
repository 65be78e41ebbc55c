use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::{debug, warn};

use super::SectionKind;
use crate::{
  config::{Entry, Group},
  error::{ReportError, Result},
};

/// A document read from disk. Never modified after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
  /// Name the document is configured under (file or subsystem name).
  pub key:     String,
  pub path:    PathBuf,
  pub content: String,
}

impl SourceDocument {
  /// Read a document. A missing file yields `Ok(None)`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file exists but cannot be read.
  pub fn read(key: impl Into<String>, path: PathBuf) -> Result<Option<Self>> {
    match fs::read_to_string(&path) {
      Ok(content) => {
        Ok(Some(Self {
          key: key.into(),
          path,
          content,
        }))
      },
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(source) => Err(ReportError::Read { path, source }),
    }
  }

  /// File name component of the path.
  #[must_use]
  pub fn file_name(&self) -> &str {
    self
      .path
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or(&self.key)
  }
}

/// Where an entry of `group` lives on disk.
#[must_use]
pub fn resolve_path(base_dir: &Path, group: &Group, entry: &Entry) -> PathBuf {
  let root = group
    .dir
    .as_ref()
    .map_or_else(|| base_dir.to_path_buf(), |dir| base_dir.join(dir));
  let name = entry.file();

  match group.kind {
    SectionKind::Subsystem => {
      root.join(name).join(format!("{name}_SPECIFICATION.md"))
    },
    SectionKind::Document | SectionKind::Diagram => root.join(name),
  }
}

/// Read every entry of a group in order.
///
/// Missing files are reported and appended to `skipped`; the rest of the
/// group still loads.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read.
pub fn load_group<'a>(
  base_dir: &Path,
  group: &'a Group,
  skipped: &mut Vec<PathBuf>,
) -> Result<Vec<(&'a Entry, SourceDocument)>> {
  let mut loaded = Vec::with_capacity(group.entries.len());

  for entry in &group.entries {
    let path = resolve_path(base_dir, group, entry);
    match SourceDocument::read(entry.file(), path.clone())? {
      Some(document) => {
        debug!(
          "Loaded {} ({} bytes)",
          document.path.display(),
          document.content.len()
        );
        loaded.push((entry, document));
      },
      None => {
        warn!("File not found, skipping: {}", path.display());
        skipped.push(path);
      },
    }
  }

  Ok(loaded)
}
