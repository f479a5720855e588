//! Application configuration
//!
//! Remembers the templates folder and output folder between runs. Stored as
//! TOML under the platform config directory
//! (`~/.config/raceconfig/config.toml` on Linux).

use crate::parser::{EmptyEntryPolicy, ParseOptions};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "raceconfig";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Last folder templates were loaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_path: Option<PathBuf>,

    /// Folder generated player files are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Leave empty option entries (`{}`, `[]`, blank) out of parsed templates
    #[serde(default)]
    pub skip_empty_entries: bool,
}

impl AppConfig {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location; missing file or directory yields defaults
    pub fn load() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::default_path().context("No config directory available on this platform")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        crate::services::write_text(path, &content)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            empty_entries: if self.skip_empty_entries {
                EmptyEntryPolicy::Skip
            } else {
                EmptyEntryPolicy::Keep
            },
        }
    }
}
