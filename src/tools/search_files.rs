use super::ToolSpec;

/// search_files ツール
pub struct SearchFilesTool;

impl SearchFilesTool {
    /// ツールの説明を返す
    pub fn spec() -> ToolSpec {
        ToolSpec::new("search_files", "Regex search in a directory.")
            .usage("- `path`: Directory path.")
            .usage("- `regex`: Rust regex pattern.")
            .usage("- `file_pattern`: Optional glob pattern (e.g., '*.ts').")
            .example(&["<path>src</path>", "<regex>TODO</regex>"])
    }
}
