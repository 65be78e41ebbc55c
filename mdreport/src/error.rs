use std::{error::Error as _, io, path::PathBuf};

use thiserror::Error;

/// Error type for loading configuration and producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Template error: {0}")]
  Template(String),

  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}

impl From<tera::Error> for ReportError {
  fn from(err: tera::Error) -> Self {
    // Tera keeps the line/column detail in the source chain
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
      message.push_str(": ");
      message.push_str(&inner.to_string());
      cause = inner.source();
    }
    Self::Template(message)
  }
}

pub type Result<T> = std::result::Result<T, ReportError>;
