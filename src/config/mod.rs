//! Configuration: per-template settings and feature list files.
pub mod features_file;

use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::fs::FileSystemOps;

/// Name of the optional settings file at the template root.
pub const SETTINGS_FILE: &str = "templater.toml";

/// Settings loaded from `templater.toml`.
///
/// Every field has a default, so a missing file (or an empty one) yields
/// [`Settings::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Patch tool settings (`[patch]` table).
    pub patch: PatchSettings,
}

/// How the external patch tool is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchSettings {
    /// Program used to apply patches.
    pub program: String,
    /// Per-step time limit in seconds.
    pub timeout_secs: u64,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout_secs: 30,
        }
    }
}

impl PatchSettings {
    /// Per-step time limit.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Load `templater.toml` from `template_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(fs: &dyn FileSystemOps, template_root: &Path) -> Result<Self, ConfigError> {
        let path = template_root.join(SETTINGS_FILE);
        let content = match fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        toml::from_str(&content).map_err(|source| ConfigError::InvalidSettings { path, source })
    }
}
