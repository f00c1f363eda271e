use super::ToolSpec;

/// read_file ツール
pub struct ReadFileTool;

impl ReadFileTool {
    /// ツールの説明を返す
    pub fn spec() -> ToolSpec {
        ToolSpec::new("read_file", "Read file contents. Extracts text from PDF/DOCX.")
            .usage("- `path`: File path.")
            .example(&["<path>src/main.js</path>"])
    }
}
