//! System prompt assembly.
//!
//! The prompt is a pure function of its inputs: the same context, capabilities,
//! server list and instructions always render the same string. Anything that
//! needs I/O (home directory, MCP hub, rule files) is resolved by the caller.

use anyhow::{Context, Result};
use tracing::debug;

use crate::context::{to_posix, Capabilities, PromptContext};
use crate::instructions::CustomInstructions;
use crate::mcp::{McpHub, McpMode, McpServerDescriptor};
use crate::tools;

/// Rule between the header and the tool-use section
pub const HEADER_RULE: &str = "\n\n====\n\n";

/// Separator between the remaining sections
pub const SECTION_SEPARATOR: &str = "\n\n";

pub const NO_MCP_SERVERS: &str = "(No MCP servers currently connected)";

const HEADER: &str = "You are Cline, a skilled software engineer. \
You have tools to interact with the user's system and accomplish tasks.";

const TOOL_USE_INTRO: &str = r#"TOOL USE
Use one tool per message, formatted in XML. Wait for the user's response after each use.
<tool_name>
<param1_name>value1</param1_name>
</tool_name>"#;

const MCP_SERVERS_INTRO: &str = "MCP SERVERS\n\
Connected servers provide tools (`use_mcp_tool`) and resources (`access_mcp_resource`).";

const MCP_SERVER_GUIDE: &str = include_str!("mcp_guide.md");

const ENVIRONMENT_DETAILS: &str = "ENVIRONMENT DETAILS\n\
(Provided after each user message. Use for context, but not a direct part of the user's request.)";

const OBJECTIVE: &str = r#"OBJECTIVE
Accomplish the user's task iteratively:
1. Analyze the task and set goals.
2. Work through goals sequentially, using one tool at a time.
3. Use <thinking> tags to analyze and choose tools.
4. Use `attempt_completion` when done.
5. The user may provide feedback for improvements."#;

/// Build the complete system prompt
pub fn compose_prompt(
    ctx: &PromptContext,
    caps: &Capabilities,
    servers: &[McpServerDescriptor],
    instructions: &CustomInstructions,
) -> String {
    let sections = [
        tool_use_section(ctx, caps),
        key_rules(ctx),
        mcp_section(ctx, caps, servers),
        system_information(ctx),
        OBJECTIVE.to_string(),
    ];

    let body = sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR);

    let mut prompt = format!("{}{}{}", HEADER, HEADER_RULE, body);

    if !instructions.is_empty() {
        prompt.push_str(&instructions.render());
    }

    prompt
}

/// Query `hub` for MCP state and compose the prompt from it
pub async fn compose_from_hub(
    hub: &dyn McpHub,
    ctx: PromptContext,
    supports_computer_use: bool,
    instructions: &CustomInstructions,
) -> Result<String> {
    let caps = Capabilities {
        supports_computer_use,
        mcp_mode: hub.mode(),
    };

    let ctx = if caps.mcp_mode == McpMode::Full && ctx.mcp_servers_path.is_none() {
        let path = hub
            .servers_path()
            .await
            .context("Failed to resolve MCP servers directory")?;
        ctx.with_mcp_servers_path(path)
    } else {
        ctx
    };

    let servers = hub.servers();
    debug!(
        tools = tools::enabled_tools(&ctx, &caps).len(),
        servers = servers.iter().filter(|s| s.is_connected()).count(),
        mode = %caps.mcp_mode,
        "Composing system prompt"
    );

    Ok(compose_prompt(&ctx, &caps, &servers, instructions))
}

fn tool_use_section(ctx: &PromptContext, caps: &Capabilities) -> String {
    let rendered = tools::enabled_tools(ctx, caps)
        .iter()
        .map(|tool| tool.render())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{}", TOOL_USE_INTRO, rendered)
}

fn key_rules(ctx: &PromptContext) -> String {
    format!(
        r#"KEY RULES
- **Each response MUST use a tool.** If you don't use a tool, you'll get an error: "[ERROR] You did not use a tool in your previous response! Please retry with a tool use."
- **Tool use MUST be in valid XML format:**
 <tool_name>
  <parameter1_name>value1</parameter1_name>
  <parameter2_name>value2</parameter2_name>
 </tool_name>
- **WAIT for user confirmation after each tool use before proceeding.**
- If a required parameter is missing, use `ask_followup_question`.
- `replace_in_file` is preferred for targeted edits. `write_to_file` is for new files or major overhauls.
- Auto-formatting may occur after file edits. Use the updated content for subsequent edits.
- You can prepend your commands with `cd` if needed, but know that the working dir is reset to '{}' after each command.
- Do not use ~ or $HOME for the home directory.
- In PLAN MODE, use `plan_mode_response` to communicate.
- **Be direct and technical.**
- **End the attempt_completion with a confirmation message.**"#,
        ctx.cwd_posix()
    )
}

fn mcp_section(ctx: &PromptContext, caps: &Capabilities, servers: &[McpServerDescriptor]) -> String {
    if !caps.mcp_mode.is_enabled() {
        return String::new();
    }

    let connected = servers
        .iter()
        .filter(|server| server.is_connected())
        .map(render_server)
        .collect::<Vec<_>>();

    let listing = if connected.is_empty() {
        NO_MCP_SERVERS.to_string()
    } else {
        connected.join("\n\n")
    };

    let mut section = format!("{}\n\n{}", MCP_SERVERS_INTRO, listing);

    if caps.mcp_mode == McpMode::Full {
        section.push_str("\n\n");
        if let Some(path) = &ctx.mcp_servers_path {
            section.push_str(&format!(
                "Create new MCP servers in {} unless the user asks for another location.\n\n",
                to_posix(path)
            ));
        }
        section.push_str(MCP_SERVER_GUIDE.trim_end());
    }

    section
}

fn render_server(server: &McpServerDescriptor) -> String {
    let mut lines = vec![format!("## {} (`{}`)", server.name, server.launch_line())];

    if !server.tools.is_empty() {
        lines.push("Tools:".to_string());
        lines.extend(
            server
                .tools
                .iter()
                .map(|tool| describe(&tool.name, tool.description.as_deref())),
        );
    }

    if !server.resources.is_empty() {
        lines.push("Resources:".to_string());
        lines.extend(
            server
                .resources
                .iter()
                .map(|resource| describe(&resource.uri, resource.description.as_deref())),
        );
    }

    lines.join("\n")
}

fn describe(name: &str, description: Option<&str>) -> String {
    match description {
        Some(d) if !d.trim().is_empty() => format!("- {}: {}", name, d.trim()),
        _ => format!("- {}", name),
    }
}

fn system_information(ctx: &PromptContext) -> String {
    format!(
        "SYSTEM INFORMATION\nOS: {}\nShell: {}\nHome Dir: {}\nCWD: {}\n\n{}",
        ctx.os_name,
        ctx.shell,
        ctx.home_posix(),
        ctx.cwd_posix(),
        ENVIRONMENT_DETAILS
    )
}
