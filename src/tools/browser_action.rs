use super::{Requirement, ToolSpec};
use crate::context::PromptContext;

/// browser_action ツール（computer use 対応モデルのみ）
pub struct BrowserActionTool;

impl BrowserActionTool {
    /// ツールの説明を返す（ビューポートサイズを埋め込む）
    pub fn spec(ctx: &PromptContext) -> ToolSpec {
        ToolSpec::new("browser_action", "Interact with a Puppeteer browser.")
            .usage("- One action per message. Start with `launch`, end with `close`.")
            .usage("- Only use `browser_action` while the browser is active.")
            .usage(format!("- Window size: {}.", ctx.viewport))
            .usage("- `action`: `launch`, `click`, `type`, `scroll_down`, `scroll_up`, `close`.")
            .usage("  - `launch`: Requires `url`.")
            .usage("  - `click`: Requires `coordinate` (center of element from screenshot).")
            .usage("  - `type`: Requires `text`.")
            .example(&[
                "<action>launch</action>",
                "<url>http://localhost:3000</url>",
            ])
            .requires(Requirement::ComputerUse)
    }
}
