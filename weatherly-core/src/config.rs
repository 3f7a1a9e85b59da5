use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable consulted before the config file.
pub const API_KEY_ENV: &str = "WEATHERLY_API_KEY";

/// Top-level configuration stored on disk.
///
/// The API key is never embedded in the source; it comes from
/// `WEATHERLY_API_KEY` or from the config file written by
/// `weatherly configure`. A missing key is reported as a distinct
/// credential fault when the provider is constructed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// api_key = "..."
    pub api_key: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherly", "weatherly")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// API key to use for provider requests; the environment variable wins
    /// over the config file, blank values count as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_counts_as_absent() {
        let cfg = Config {
            api_key: Some("   ".to_string()),
        };
        assert_eq!(cfg.resolved_api_key(), None);
    }

    #[test]
    fn file_key_used_when_env_unset() {
        // Serial with other env-touching tests is not needed: this test only
        // reads the variable, which is unset in the test environment.
        let cfg = Config {
            api_key: Some("FILE_KEY".to_string()),
        };
        if env::var(API_KEY_ENV).is_err() {
            assert_eq!(cfg.resolved_api_key().as_deref(), Some("FILE_KEY"));
        }
    }

    #[test]
    fn default_config_has_no_key() {
        let cfg = Config::default();
        if env::var(API_KEY_ENV).is_err() {
            assert_eq!(cfg.resolved_api_key(), None);
        }
    }
}
