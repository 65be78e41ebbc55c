use std::{
  fs,
  io::Write,
  path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::{ReportError, Result};

/// Write `contents` to `path` so that readers see either the old file or the
/// complete new one.
///
/// The data goes to a temporary file in the destination directory, which is
/// then renamed over `path`. Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written or renamed. The temporary file is removed on failure.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };

  let write_error = |source| {
    ReportError::Write {
      path: path.to_path_buf(),
      source,
    }
  };

  fs::create_dir_all(&dir).map_err(write_error)?;
  let mut file = NamedTempFile::new_in(&dir).map_err(write_error)?;
  file.write_all(contents.as_bytes()).map_err(write_error)?;
  file.as_file().sync_all().map_err(write_error)?;
  file.persist(path).map_err(|e| write_error(e.error))?;

  Ok(())
}
