//! Error types for docfix operations
//!
//! Only conditions that stop a run (or a single rename) are errors. An empty
//! match set, a destination conflict, and a declined confirmation are normal
//! outcomes reported through the return values of the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// docfix result type alias
pub type Result<T> = std::result::Result<T, DocfixError>;

/// docfix error taxonomy
#[derive(Debug, Error)]
pub enum DocfixError {
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to walk directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to rename {} -> {}: {source}", source_path.display(), destination.display())]
    Rename {
        source_path: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },

    #[error("File {} is not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    #[error("config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DocfixError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
