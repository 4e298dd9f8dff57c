//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (.patroid/config.toml)
//! 3. Environment variables (PATROID_* prefix)

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PatroidError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.scanner.max_file_size_bytes == 0 {
            return Err(PatroidError::Config(
                "scanner.max_file_size_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Glob patterns excluded from discovery, in addition to the built-in
    /// version-control and build-output directories.
    pub exclude: Vec<String>,
    pub max_file_size_bytes: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            max_file_size_bytes: 4 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub module_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            module_file: "output_module.xml".to_string(),
        }
    }
}

/// Loads and merges configuration, the way `ConfigLoader` does for its
/// caller: defaults, then an optional project file, then environment
/// variables, in that order of increasing precedence.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let project_path = Self::project_config_path();
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        figment = figment.merge(Env::prefixed("PATROID_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| PatroidError::Config(format!("configuration error: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| PatroidError::Config(format!("configuration error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".patroid/config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.module_file, "output_module.xml");
    }

    #[test]
    fn zero_max_file_size_is_rejected() {
        let mut config = Config::default();
        config.scanner.max_file_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file_merges_project_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [scanner]
            exclude = ["vendor/**"]

            [output]
            module_file = "graph.xml"
            "#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.scanner.exclude, vec!["vendor/**".to_string()]);
        assert_eq!(config.output.module_file, "graph.xml");
    }
}
