use super::{Requirement, ToolSpec};

/// use_mcp_tool ツール
pub struct UseMcpTool;

impl UseMcpTool {
    pub fn spec() -> ToolSpec {
        ToolSpec::new("use_mcp_tool", "Use tools from connected MCP servers.")
            .usage("- `server_name`: Server name.")
            .usage("- `tool_name`: Tool name.")
            .usage("- `arguments`: JSON arguments.")
            .example(&[
                "<server_name>weather-server</server_name>",
                "<tool_name>get_forecast</tool_name>",
                r#"<arguments>{"city": "SF"}</arguments>"#,
            ])
            .requires(Requirement::McpEnabled)
    }
}

/// access_mcp_resource ツール
pub struct AccessMcpResourceTool;

impl AccessMcpResourceTool {
    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            "access_mcp_resource",
            "Access resources from connected MCP servers.",
        )
        .usage("- `server_name`: Server name.")
        .usage("- `uri`: Resource URI.")
        .example(&[
            "<server_name>weather-server</server_name>",
            "<uri>weather://SF/current</uri>",
        ])
        .requires(Requirement::McpEnabled)
    }
}
