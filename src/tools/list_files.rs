use super::ToolSpec;

/// list_files ツール
pub struct ListFilesTool;

impl ListFilesTool {
    /// ツールの説明を返す
    pub fn spec() -> ToolSpec {
        ToolSpec::new("list_files", "List files/directories.")
            .usage("- `path`: Directory path.")
            .usage("- `recursive`: Optional. `true` for recursive listing.")
            .example(&["<path>src</path>", "<recursive>true</recursive>"])
    }
}
