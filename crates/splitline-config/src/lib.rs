use serde::{Deserialize, Serialize};
use splitline_engine::{FlowMetrics, SplitClasses, SplitOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Layout metrics for the built-in flow layout, all optional in the file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f32,
    pub char_width: f32,
    pub space_width: f32,
    pub line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let metrics = FlowMetrics::default();
        Self {
            width: metrics.default_width,
            char_width: metrics.char_width,
            space_width: metrics.space_width,
            line_height: metrics.line_height,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classes: SplitClasses,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/splitline");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            classes: self.classes.clone(),
        }
    }

    pub fn flow_metrics(&self) -> FlowMetrics {
        FlowMetrics {
            char_width: self.layout.char_width,
            space_width: self.layout.space_width,
            line_height: self.layout.line_height,
            default_width: self.layout.width,
        }
    }
}
