//! Configuration for the `lectern` binary.
//!
//! Configuration lives in a TOML file:
//!
//! ```toml
//! [layout]
//! lenses = "lens-library"
//!
//! [output]
//! pretty = false
//! ```
//!
//! The file is taken from `--config` (or `LECTERN_CONFIG`), then from
//! `lectern.toml` in the content root. Without either, defaults apply.

use std::path::{Path, PathBuf};

use lectern_core::{ContentLayout, Error, Result};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE_NAME: &str = "lectern.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecternConfig {
    /// Directory names for each content bucket.
    #[serde(default)]
    pub layout: ContentLayout,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output settings for `lectern process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl LecternConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Read configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Load configuration, resolving the file as described in the module docs.
    ///
    /// An explicitly named file must exist; a missing `lectern.toml` in the
    /// root just means defaults.
    pub fn load(explicit: Option<&Path>, root: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit, root) {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// The config file that [`LecternConfig::load`] would read, if any.
pub fn resolve_config_path(explicit: Option<&Path>, root: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    root.map(|root| root.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}
