use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::mcp::McpMode;

/// Browser window size used by the browser_action tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
        }
    }
}

impl std::str::FromStr for Viewport {
    type Err = anyhow::Error;

    /// Parse `WIDTHxHEIGHT` (e.g. `1280x800`)
    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .with_context(|| format!("Invalid viewport '{}', expected WIDTHxHEIGHT", s))?;
        let width = w
            .trim()
            .parse()
            .with_context(|| format!("Invalid viewport width '{}'", w))?;
        let height = h
            .trim()
            .parse()
            .with_context(|| format!("Invalid viewport height '{}'", h))?;
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Capability flags that decide which tools are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub supports_computer_use: bool,
    pub mcp_mode: McpMode,
}

/// Environment the prompt is rendered against. Built once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub cwd: PathBuf,
    pub os_name: String,
    pub shell: String,
    pub home_dir: PathBuf,
    pub viewport: Viewport,
    /// Directory where new MCP servers should be created (only shown in full mode)
    pub mcp_servers_path: Option<PathBuf>,
}

impl PromptContext {
    /// Resolve OS, shell and home directory from the running process.
    /// A relative `cwd` is made absolute against the process working directory.
    pub fn detect(cwd: impl Into<PathBuf>, viewport: Viewport) -> Result<Self> {
        let cwd = cwd.into();
        let cwd = std::path::absolute(&cwd)
            .with_context(|| format!("Failed to resolve working directory {}", cwd.display()))?;
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        let os_name = detect_os_name();
        let shell = detect_shell();

        debug!(%os_name, %shell, "Detected prompt environment");

        Ok(Self {
            cwd,
            os_name,
            shell,
            home_dir,
            viewport,
            mcp_servers_path: None,
        })
    }

    pub fn with_mcp_servers_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mcp_servers_path = Some(path.into());
        self
    }

    pub fn cwd_posix(&self) -> String {
        to_posix(&self.cwd)
    }

    pub fn home_posix(&self) -> String {
        to_posix(&self.home_dir)
    }
}

/// Render a path with forward slashes regardless of platform
pub fn to_posix(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

fn detect_os_name() -> String {
    let os = match std::env::consts::OS {
        "macos" => "macOS",
        "linux" => "Linux",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    };
    format!("{} ({})", os, std::env::consts::ARCH)
}

fn detect_shell() -> String {
    let var = if cfg!(windows) { "COMSPEC" } else { "SHELL" };
    match std::env::var(var) {
        Ok(shell) if !shell.trim().is_empty() => shell,
        _ if cfg!(windows) => "cmd.exe".to_string(),
        _ => "/bin/sh".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_parse() {
        let viewport: Viewport = "1280x800".parse().unwrap();
        assert_eq!(viewport.width, 1280);
        assert_eq!(viewport.height, 800);
        assert_eq!(viewport.to_string(), "1280x800");

        assert!("1280".parse::<Viewport>().is_err());
        assert!("widexhigh".parse::<Viewport>().is_err());
    }

    #[test]
    fn test_to_posix_converts_backslashes() {
        assert_eq!(to_posix(Path::new(r"C:\Users\dev\project")), "C:/Users/dev/project");
        assert_eq!(to_posix(Path::new("/home/dev")), "/home/dev");
    }

    #[test]
    fn test_detect_fills_environment() {
        let ctx = PromptContext::detect("/tmp/project", Viewport::default()).unwrap();
        assert_eq!(ctx.cwd, PathBuf::from("/tmp/project"));
        assert!(!ctx.os_name.is_empty());
        assert!(!ctx.shell.is_empty());
        assert!(ctx.mcp_servers_path.is_none());
    }

    #[test]
    fn test_detect_resolves_relative_cwd() {
        let process_cwd = std::env::current_dir().unwrap();

        let ctx = PromptContext::detect(".", Viewport::default()).unwrap();
        assert!(ctx.cwd.is_absolute());
        assert_eq!(ctx.cwd, process_cwd);
        assert_ne!(ctx.cwd_posix(), ".");

        let ctx = PromptContext::detect("sub/dir", Viewport::default()).unwrap();
        assert_eq!(ctx.cwd, process_cwd.join("sub").join("dir"));
    }
}
