use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::context::Viewport;
use crate::mcp::McpMode;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub instructions: InstructionsConfig,
}

/// Prompt capability defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_supports_computer_use")]
    pub supports_computer_use: bool,

    #[serde(default)]
    pub mcp_mode: McpMode,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

/// User instruction settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InstructionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

// デフォルト値を返す関数
fn default_supports_computer_use() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    Viewport::default().width
}

fn default_viewport_height() -> u32 {
    Viewport::default().height
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            supports_computer_use: default_supports_computer_use(),
            mcp_mode: McpMode::default(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl PromptConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }
}

impl Config {
    /// Get the application home directory (~/.coding-agent-prompt)
    pub fn app_home() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".coding-agent-prompt"))
    }

    /// Get the config file path (~/.coding-agent-prompt/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let app_home = Self::app_home()?;
        Ok(app_home.join("config.toml"))
    }

    /// Load configuration from the default location (or use defaults if not found)
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path` (or use defaults if not found)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
