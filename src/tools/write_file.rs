use super::ToolSpec;

/// write_to_file ツール
pub struct WriteFileTool;

impl WriteFileTool {
    /// ツールの説明を返す
    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            "write_to_file",
            "Create or overwrite files. Provide the COMPLETE content.",
        )
        .usage("- `path`: File path.")
        .usage("- `content`: Full file content.")
        .example(&[
            "<path>src/config.json</path>",
            r#"<content>{"key": "value"}</content>"#,
        ])
    }
}
