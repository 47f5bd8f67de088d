//! Configuration management for Staffbook CLI
//!
//! Stores the data directory in ~/.config/staffbook/config.toml.
//! `STAFFBOOK_DATA_DIR` (also read from `.env`) overrides the file,
//! and `--data-dir` overrides both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "staffbook";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the configured data directory
pub const DATA_DIR_ENV: &str = "STAFFBOOK_DATA_DIR";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_employees_file")]
    pub employees_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_employees_file() -> String {
    "employees.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            employees_file: default_employees_file(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set the default data directory
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
    }

    /// Effective data directory: flag, then environment, then config file
    pub fn resolve_data_dir(&self, flag: Option<&Path>) -> PathBuf {
        resolve_with(self, flag, std::env::var(DATA_DIR_ENV).ok())
    }

    /// Path of the employees document inside the effective data directory
    pub fn employees_path(&self, flag: Option<&Path>) -> PathBuf {
        self.resolve_data_dir(flag).join(&self.employees_file)
    }
}

fn resolve_with(config: &Config, flag: Option<&Path>, env: Option<String>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| config.data_dir.clone())
}
