use super::ToolSpec;

/// replace_in_file ツール（SEARCH/REPLACE ブロックによる部分編集）
pub struct ReplaceInFileTool;

impl ReplaceInFileTool {
    /// ツールの説明を返す
    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            "replace_in_file",
            "Edit existing files with SEARCH/REPLACE blocks.",
        )
        .usage("- `path`: File path.")
        .usage("- `diff`: SEARCH/REPLACE blocks.")
        .usage("  - SEARCH content MUST match the file EXACTLY (including whitespace).")
        .usage("  - Only replaces the first match. Use multiple blocks for multiple changes, listed in order they appear in the file.")
        .usage("  - Keep blocks concise, including only changing lines and minimal context.")
        .usage("  - Do not truncate lines.")
        .usage("  - To delete, use an empty REPLACE section.")
        .example(&[
            "<path>src/App.tsx</path>",
            "<diff>",
            "<<<<<<< SEARCH",
            "function foo() {",
            "=======",
            "function bar() {",
            ">>>>>>> REPLACE",
            "</diff>",
        ])
    }
}
