use super::ToolSpec;

pub struct ListCodeDefinitionNamesTool;

impl ListCodeDefinitionNamesTool {
    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            "list_code_definition_names",
            "List code definitions (classes, functions) in a directory.",
        )
        .usage("- `path`: Directory path.")
        .example(&["<path>src</path>"])
    }
}
