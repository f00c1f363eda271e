use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How much MCP support is advertised in the prompt.
/// Deserializes through `FromStr`, so config files accept the same spellings as the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum McpMode {
    Off,
    Partial,
    #[default]
    Full,
}

impl McpMode {
    pub fn is_enabled(self) -> bool {
        self != McpMode::Off
    }

    pub fn as_str(self) -> &'static str {
        match self {
            McpMode::Off => "off",
            McpMode::Partial => "partial",
            McpMode::Full => "full",
        }
    }
}

impl std::str::FromStr for McpMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(McpMode::Off),
            "partial" => Ok(McpMode::Partial),
            "full" => Ok(McpMode::Full),
            other => bail!("Unknown MCP mode '{}' (expected off, partial or full)", other),
        }
    }
}

impl TryFrom<String> for McpMode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl std::fmt::Display for McpMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpServerStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpToolInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpResourceInfo {
    pub uri: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A server as reported by the MCP hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerDescriptor {
    pub name: String,
    pub status: McpServerStatus,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub tools: Vec<McpToolInfo>,
    #[serde(default)]
    pub resources: Vec<McpResourceInfo>,
}

impl McpServerDescriptor {
    pub fn is_connected(&self) -> bool {
        self.status == McpServerStatus::Connected
    }

    /// Command line used to launch the server, e.g. `node build/index.js --stdio`
    pub fn launch_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Source of MCP state for prompt composition
#[async_trait]
pub trait McpHub: Send + Sync {
    fn mode(&self) -> McpMode;

    fn servers(&self) -> Vec<McpServerDescriptor>;

    /// Directory where user-created MCP servers live
    async fn servers_path(&self) -> Result<PathBuf>;
}

/// Hub state loaded from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotHub {
    #[serde(default)]
    pub mode: McpMode,
    #[serde(default)]
    pub servers_path: Option<PathBuf>,
    #[serde(default)]
    pub servers: Vec<McpServerDescriptor>,
}

impl SnapshotHub {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read MCP snapshot {}", path.display()))?;

        let hub: SnapshotHub = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse MCP snapshot {}", path.display()))?;

        info!(
            "Loaded MCP snapshot from {:?} ({} servers, mode {})",
            path,
            hub.servers.len(),
            hub.mode
        );
        Ok(hub)
    }

    pub fn with_mode(mut self, mode: McpMode) -> Self {
        self.mode = mode;
        self
    }
}

#[async_trait]
impl McpHub for SnapshotHub {
    fn mode(&self) -> McpMode {
        self.mode
    }

    fn servers(&self) -> Vec<McpServerDescriptor> {
        self.servers.clone()
    }

    async fn servers_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.servers_path {
            return Ok(path.clone());
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        let path = home.join("Documents").join("Cline").join("MCP");
        debug!("No serversPath in snapshot, defaulting to {:?}", path);
        Ok(path)
    }
}
