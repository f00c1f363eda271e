//! Tools that talk to the user rather than the system.

use super::ToolSpec;

pub struct AskFollowupQuestionTool;

impl AskFollowupQuestionTool {
    pub fn spec() -> ToolSpec {
        ToolSpec::new("ask_followup_question", "Ask the user for clarification.")
            .usage("- `question`: The question.")
            .example(&["<question>What's the API key?</question>"])
    }
}

pub struct AttemptCompletionTool;

impl AttemptCompletionTool {
    pub fn spec() -> ToolSpec {
        ToolSpec::new("attempt_completion", "Present the completed task result.")
            .usage("- **MUST** be used only after confirming successful tool use from the user.")
            .usage("- `result`: Final result description.")
            .usage("- `command`: Optional CLI command to demonstrate the result (e.g., `open index.html`).")
            .example(&[
                "<result>Website created.</result>",
                "<command>open index.html</command>",
            ])
    }
}

pub struct PlanModeResponseTool;

impl PlanModeResponseTool {
    pub fn spec() -> ToolSpec {
        ToolSpec::new("plan_mode_response", "Respond to the user in PLAN MODE.")
            .usage("- `response`: Your response.")
            .example(&["<response>Here's the plan...</response>"])
    }
}
