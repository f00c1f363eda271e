pub mod config;
pub mod context;
pub mod instructions;
pub mod mcp;
pub mod system_prompt;
pub mod tools;
pub mod welcome;

pub use context::{Capabilities, PromptContext, Viewport};
pub use instructions::{append_user_instructions, CustomInstructions};
pub use mcp::{McpHub, McpMode, McpServerDescriptor, SnapshotHub};
pub use system_prompt::{compose_from_hub, compose_prompt};
