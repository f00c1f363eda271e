pub mod browser_action;
pub mod execute_command;
pub mod interaction;
pub mod list_code_definitions;
pub mod list_files;
pub mod mcp_access;
pub mod read_file;
pub mod replace_in_file;
pub mod search_files;
pub mod write_file;

pub use browser_action::BrowserActionTool;
pub use execute_command::ExecuteCommandTool;
pub use interaction::{AskFollowupQuestionTool, AttemptCompletionTool, PlanModeResponseTool};
pub use list_code_definitions::ListCodeDefinitionNamesTool;
pub use list_files::ListFilesTool;
pub use mcp_access::{AccessMcpResourceTool, UseMcpTool};
pub use read_file::ReadFileTool;
pub use replace_in_file::ReplaceInFileTool;
pub use search_files::SearchFilesTool;
pub use write_file::WriteFileTool;

use crate::context::{Capabilities, PromptContext};

/// Condition under which a tool is offered to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    ComputerUse,
    McpEnabled,
}

impl Requirement {
    pub fn is_met(self, caps: &Capabilities) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::ComputerUse => caps.supports_computer_use,
            Requirement::McpEnabled => caps.mcp_mode.is_enabled(),
        }
    }
}

/// Static description of one tool the assistant can invoke via XML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    /// One-line summary shown next to the tool name
    pub summary: String,
    /// Parameter and usage bullets, rendered verbatim
    pub usage: Vec<String>,
    /// Lines inside the example `<name>...</name>` element
    pub example: Vec<String>,
    pub requirement: Requirement,
}

impl ToolSpec {
    pub fn new(name: &'static str, summary: impl Into<String>) -> Self {
        Self {
            name,
            summary: summary.into(),
            usage: Vec::new(),
            example: Vec::new(),
            requirement: Requirement::Always,
        }
    }

    pub fn usage(mut self, line: impl Into<String>) -> Self {
        self.usage.push(line.into());
        self
    }

    pub fn example(mut self, lines: &[&str]) -> Self {
        self.example = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn is_enabled(&self, caps: &Capabilities) -> bool {
        self.requirement.is_met(caps)
    }

    pub fn render(&self) -> String {
        let mut out = format!("- '{}': {}\n", self.name, self.summary);
        for line in &self.usage {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("- Example:\n");
        out.push_str(&format!(" <{}>\n", self.name));
        for line in &self.example {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!(" </{}>", self.name));
        out
    }
}

/// Every tool in prompt order. The order is part of the prompt format.
pub fn catalog(ctx: &PromptContext) -> Vec<ToolSpec> {
    vec![
        ExecuteCommandTool::spec(ctx),
        ReadFileTool::spec(),
        WriteFileTool::spec(),
        ReplaceInFileTool::spec(),
        SearchFilesTool::spec(),
        ListFilesTool::spec(),
        ListCodeDefinitionNamesTool::spec(),
        BrowserActionTool::spec(ctx),
        UseMcpTool::spec(),
        AccessMcpResourceTool::spec(),
        AskFollowupQuestionTool::spec(),
        AttemptCompletionTool::spec(),
        PlanModeResponseTool::spec(),
    ]
}

/// Tools whose requirement is met by `caps`, in catalog order
pub fn enabled_tools(ctx: &PromptContext, caps: &Capabilities) -> Vec<ToolSpec> {
    catalog(ctx)
        .into_iter()
        .filter(|tool| tool.is_enabled(caps))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::context::Viewport;
    use crate::mcp::McpMode;
    use std::path::PathBuf;

    pub(crate) fn test_context() -> PromptContext {
        PromptContext {
            cwd: PathBuf::from("/home/dev/project"),
            os_name: "Linux (x86_64)".to_string(),
            shell: "/bin/bash".to_string(),
            home_dir: PathBuf::from("/home/dev"),
            viewport: Viewport {
                width: 1280,
                height: 800,
            },
            mcp_servers_path: None,
        }
    }

    fn names(tools: &[ToolSpec]) -> Vec<&'static str> {
        tools.iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_catalog_order() {
        let tools = catalog(&test_context());
        assert_eq!(
            names(&tools),
            vec![
                "execute_command",
                "read_file",
                "write_to_file",
                "replace_in_file",
                "search_files",
                "list_files",
                "list_code_definition_names",
                "browser_action",
                "use_mcp_tool",
                "access_mcp_resource",
                "ask_followup_question",
                "attempt_completion",
                "plan_mode_response",
            ]
        );
    }

    #[test]
    fn test_requirements_filter_tools() {
        let ctx = test_context();
        let caps = Capabilities {
            supports_computer_use: false,
            mcp_mode: McpMode::Off,
        };
        let tools = names(&enabled_tools(&ctx, &caps));
        assert_eq!(tools.len(), 10);
        assert!(!tools.contains(&"browser_action"));
        assert!(!tools.contains(&"use_mcp_tool"));
        assert!(!tools.contains(&"access_mcp_resource"));

        let caps = Capabilities {
            supports_computer_use: true,
            mcp_mode: McpMode::Partial,
        };
        assert_eq!(enabled_tools(&ctx, &caps).len(), 13);
    }

    #[test]
    fn test_render_layout() {
        let rendered = ReadFileTool::spec().render();
        assert_eq!(
            rendered,
            "- 'read_file': Read file contents. Extracts text from PDF/DOCX.\n\
             - `path`: File path.\n\
             - Example:\n \
             <read_file>\n  \
             <path>src/main.js</path>\n \
             </read_file>"
        );
    }

    #[test]
    fn test_context_is_substituted() {
        let ctx = test_context();
        let command = ExecuteCommandTool::spec(&ctx).render();
        assert!(command.contains("/home/dev/project"));

        let browser = BrowserActionTool::spec(&ctx).render();
        assert!(browser.contains("Window size: 1280x800."));
    }
}
