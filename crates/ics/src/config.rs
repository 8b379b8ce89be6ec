//! CLI configuration persistence.
//!
//! The API key lives in a small YAML file in the user's home directory
//! (`~/.ics-cli.yaml`). Logging out blanks the key rather than deleting the
//! file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::CredentialProvider;

/// File name of the configuration file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".ics-cli.yaml";

/// Persisted CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// ICS API key; empty when logged out.
    #[serde(default)]
    pub api_key: String,
}

impl Config {
    /// Default configuration path, `~/.ics-cli.yaml`.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load configuration, or defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Write configuration to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Whether an API key is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Blank the stored key. Returns whether a key was present.
    pub fn logout(&mut self) -> bool {
        let was_logged_in = self.is_logged_in();
        self.api_key.clear();
        was_logged_in
    }
}

impl CredentialProvider for Config {
    fn api_token(&self) -> Option<String> {
        self.is_logged_in().then(|| self.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.is_logged_in());
        assert_eq!(config.api_token(), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = Config {
            api_key: "abc123".into(),
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.api_key, "abc123");
        assert_eq!(loaded.api_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_logout_blanks_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config {
            api_key: "abc123".into(),
        };
        assert!(config.logout());
        assert!(!config.logout());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(!loaded.is_logged_in());
        assert!(path.exists());
    }

    #[test]
    fn test_ignores_unknown_keys_and_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, "api_key: xyz\ntheme: dark\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().api_key, "xyz");

        std::fs::write(&path, "").unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "api_key: [unterminated").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
