use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use coding_agent_prompt::config::Config;
use coding_agent_prompt::{
    compose_from_hub, CustomInstructions, McpMode, PromptContext, SnapshotHub, Viewport,
};

/// Coding agent system prompt composer
#[derive(Parser, Debug)]
#[command(author, version, about = "Compose the system prompt for the coding agent")]
struct Args {
    /// Working directory the agent operates in (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Whether the model supports computer use (enables browser_action)
    #[arg(long, env = "CODING_AGENT_COMPUTER_USE")]
    computer_use: Option<bool>,

    /// MCP mode: off, partial or full
    #[arg(long, env = "CODING_AGENT_MCP_MODE")]
    mcp_mode: Option<McpMode>,

    /// JSON snapshot of the MCP hub (mode, serversPath, servers)
    #[arg(long, value_name = "FILE")]
    mcp_snapshot: Option<PathBuf>,

    /// Browser viewport, e.g. 1280x800
    #[arg(long)]
    viewport: Option<Viewport>,

    /// Preferred response language
    #[arg(long)]
    language: Option<String>,

    /// Extra custom instructions
    #[arg(long)]
    instructions: Option<String>,

    /// Config file (defaults to ~/.coding-agent-prompt/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

const DEFAULT_LOG_FILTER: &str = "coding_agent_prompt=info";

/// Load `.env` (or `dotenv_path`) first so that the log filter variable may come from it
fn load_env_and_filter(dotenv_path: Option<&Path>, filter_var: &str) -> EnvFilter {
    match dotenv_path {
        Some(path) => {
            dotenvy::from_path(path).ok();
        }
        None => {
            dotenv().ok();
        }
    }

    EnvFilter::try_from_env(filter_var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> Result<()> {
    // ロギング初期化（標準出力はプロンプト専用）
    let filter = load_env_and_filter(None, EnvFilter::DEFAULT_ENV);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // CLI引数のパース
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let cwd = match args.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let viewport = args.viewport.unwrap_or_else(|| config.prompt.viewport());
    let context = PromptContext::detect(cwd, viewport)?;

    let mut hub = match &args.mcp_snapshot {
        Some(path) => SnapshotHub::load(path)?,
        None => SnapshotHub::default().with_mode(config.prompt.mcp_mode),
    };
    if let Some(mode) = args.mcp_mode {
        hub = hub.with_mode(mode);
    }

    let language = args
        .language
        .as_deref()
        .or(config.instructions.preferred_language.as_deref());
    let settings = args
        .instructions
        .as_deref()
        .or(config.instructions.custom.as_deref());
    let instructions = CustomInstructions::load(&context.cwd, language, settings)
        .context("Failed to load custom instructions")?;

    let supports_computer_use = args
        .computer_use
        .unwrap_or(config.prompt.supports_computer_use);

    tracing::info!(
        "Composing prompt for {:?} (mcp mode {}, computer use {})",
        context.cwd,
        hub.mode,
        supports_computer_use
    );

    let prompt = compose_from_hub(&hub, context, supports_computer_use, &instructions).await?;

    println!("{}", prompt);

    tracing::info!("Prompt length: {} chars", prompt.chars().count());

    Ok(())
}
