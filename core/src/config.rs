//! docfix configuration loading
//!
//! Resolution order: an explicit path, then `DOCFIX_CONFIG`, then
//! `docfix.toml` in the working root. When none exists the built-in
//! defaults apply.

use std::path::Path;
use std::path::PathBuf;

use path_absolutize::Absolutize;
use serde::Deserialize;

use crate::error::DocfixError;
use crate::error::Result;

/// Root configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DocfixConfig {
    /// Frontmatter repair settings
    #[serde(default)]
    pub frontmatter: FrontmatterConfig,
}

/// Where the frontmatter pass looks, relative to the working root.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FrontmatterConfig {
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// File extension to scan, with or without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_target_dir() -> PathBuf {
    ["src", "content", "docs_migrated"].iter().collect()
}

fn default_extension() -> String {
    "mdx".to_string()
}

impl Default for FrontmatterConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            extension: default_extension(),
        }
    }
}

impl DocfixConfig {
    pub const ENV_CONFIG_PATH: &'static str = "DOCFIX_CONFIG";
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "docfix.toml";

    /// Load configuration for a run rooted at `root`.
    ///
    /// An explicit path (argument or env var) must exist; the implicit
    /// `docfix.toml` is optional.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Some(path) = std::env::var_os(Self::ENV_CONFIG_PATH) {
            return Self::load_from_path(Path::new(&path));
        }

        let implicit = root.join(Self::DEFAULT_CONFIG_FILENAME);
        if implicit.is_file() {
            return Self::load_from_path(&implicit);
        }

        tracing::debug!(root = %root.display(), "no docfix config found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DocfixError::config_with_source(
                format!("failed to read config at {}", path.display()),
                e,
            )
        })?;

        let cfg = Self::parse(&contents)?;
        tracing::debug!(path = %path.display(), "loaded docfix config");
        Ok(cfg)
    }

    /// Parse configuration from a TOML string
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: DocfixConfig = toml::from_str(contents)
            .map_err(|e| DocfixError::config_with_source("failed to parse config", e))?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.frontmatter.extension.trim_start_matches('.').is_empty() {
            return Err(DocfixError::config("frontmatter.extension must not be empty"));
        }
        Ok(())
    }
}

/// Make `path` absolute against the current directory, without touching the
/// filesystem (the path may not exist yet).
pub fn absolute_root(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| {
            DocfixError::config_with_source(
                format!("failed to resolve {}", path.display()),
                e,
            )
        })
}
