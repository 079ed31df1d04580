//! Configuration module for microtag
//!
//! Settings live in `<config_dir>/microtag/config.toml` and can be overridden
//! by `MICROTAG_*` environment variables. A missing file means defaults; the
//! file is only written by an explicit `config set`.

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Keys accepted by [`MicrotagConfig::set`]
pub const KEYS: &[&str] = &["root", "quiet", "confirm_bulk"];

fn default_root() -> PathBuf {
    PathBuf::from("micrographs")
}

const fn default_true() -> bool {
    true
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MicrotagConfig {
    /// Directory holding one sub-directory per dataset
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Ask before applying a bulk tag operation
    #[serde(default = "default_true")]
    pub confirm_bulk: bool,
}

impl Default for MicrotagConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            quiet: false,
            confirm_bulk: true,
        }
    }
}

impl MicrotagConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("microtag").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, layered with `MICROTAG_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("MICROTAG").try_parsing(true))
            .build()?;
        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`, creating its directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Set one key from its string form
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown key and
    /// `ConfigError::Message` for a value of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "root" => self.root = PathBuf::from(value),
            "quiet" => self.quiet = parse_bool(key, value)?,
            "confirm_bulk" => self.confirm_bulk = parse_bool(key, value)?,
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }

    /// Datasets root, preferring an explicit override
    #[must_use]
    pub fn resolve_root(&self, cli_root: Option<&Path>) -> PathBuf {
        cli_root.map_or_else(|| self.root.clone(), Path::to_path_buf)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::Message(format!("'{value}' is not a valid boolean for {key}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MicrotagConfig::default();
        assert_eq!(config.root, PathBuf::from("micrographs"));
        assert!(!config.quiet);
        assert!(config.confirm_bulk);
    }

    #[test]
    fn test_missing_file_gives_defaults_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("microtag/config.toml");
        let config = MicrotagConfig::load_from(&path).unwrap();
        assert_eq!(config, MicrotagConfig::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "root = \"/data/scans\"\n").unwrap();

        let config = MicrotagConfig::load_from(&path).unwrap();
        assert_eq!(config.root, PathBuf::from("/data/scans"));
        assert!(config.confirm_bulk);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = MicrotagConfig::default();
        config.set("root", "/srv/micrographs").unwrap();
        config.set("confirm_bulk", "no").unwrap();
        config.save_to(&path).unwrap();

        let loaded = MicrotagConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_bool() {
        let mut config = MicrotagConfig::default();
        assert!(matches!(config.set("colour", "red"), Err(ConfigError::NotFound(_))));
        assert!(config.set("quiet", "maybe").is_err());
        assert!(!config.quiet);
        config.set("quiet", "TRUE").unwrap();
        assert!(config.quiet);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "root = [unterminated").unwrap();
        assert!(MicrotagConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_resolve_root_prefers_override() {
        let config = MicrotagConfig::default();
        assert_eq!(config.resolve_root(None), PathBuf::from("micrographs"));
        assert_eq!(config.resolve_root(Some(Path::new("/x"))), PathBuf::from("/x"));
    }
}
