use super::ToolSpec;
use crate::context::PromptContext;

/// execute_command ツール
pub struct ExecuteCommandTool;

impl ExecuteCommandTool {
    /// ツールの説明を返す（作業ディレクトリを埋め込む）
    pub fn spec(ctx: &PromptContext) -> ToolSpec {
        ToolSpec::new(
            "execute_command",
            format!(
                "Run CLI commands from the current working directory: {}.",
                ctx.cwd_posix()
            ),
        )
        .usage("- Tailor commands to the user's OS (see SYSTEM INFORMATION).")
        .usage("- `requires_approval`: `true` for impactful operations, `false` for safe ones.")
        .example(&[
            "<command>pnpm run dev</command>",
            "<requires_approval>false</requires_approval>",
        ])
    }
}
