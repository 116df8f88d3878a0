// File: ./src/config.rs
use crate::storage::{DATA_FILE_NAME, LocalStorage};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tax rate every session starts with. Never persisted with the lists.
    pub default_tax_rate: String,
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tax_rate: "10".to_string(),
            data_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "smartshopper", "smartshopper")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Missing file means defaults; a file that is present must parse.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Directory holding the data file and the log.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(LocalStorage::data_dir)
    }

    /// A dedicated store when `data_dir` is set. `None` means use the shared one.
    pub fn storage_override(&self) -> Option<LocalStorage> {
        self.data_dir
            .as_ref()
            .map(|dir| LocalStorage::at(dir.join(DATA_FILE_NAME)))
    }
}
