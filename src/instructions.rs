use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::context::to_posix;

pub const RULES_FILE_NAME: &str = ".clinerules";
pub const IGNORE_FILE_NAME: &str = ".clineignore";

/// Delimiter placed between the system prompt and user-provided instructions
pub const USER_INSTRUCTIONS_HEADER: &str = "\n\n====\n\n";

/// Join the non-empty blocks with a blank line and place them under the fixed header.
///
/// Blocks that are `None` or contain only whitespace are skipped. With no remaining
/// blocks the header is returned on its own.
pub fn append_user_instructions(blocks: &[Option<&str>]) -> String {
    let body = blocks
        .iter()
        .flatten()
        .filter(|block| !block.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}", USER_INSTRUCTIONS_HEADER, body)
}

/// User-supplied text appended after the system prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomInstructions {
    pub preferred_language: Option<String>,
    pub settings: Option<String>,
    pub rules_file: Option<String>,
    pub ignore_file: Option<String>,
}

impl CustomInstructions {
    /// Collect every instruction source for `cwd`
    pub fn load(cwd: &Path, preferred_language: Option<&str>, settings: Option<&str>) -> Result<Self> {
        Ok(Self {
            preferred_language: preferred_language.and_then(preferred_language_block),
            settings: settings
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string()),
            rules_file: load_rules_file(cwd)?,
            ignore_file: load_ignore_file(cwd)?,
        })
    }

    /// Blocks in the order they appear in the prompt
    pub fn blocks(&self) -> [Option<&str>; 4] {
        [
            self.preferred_language.as_deref(),
            self.settings.as_deref(),
            self.rules_file.as_deref(),
            self.ignore_file.as_deref(),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.blocks()
            .iter()
            .flatten()
            .all(|block| block.trim().is_empty())
    }

    pub fn render(&self) -> String {
        append_user_instructions(&self.blocks())
    }
}

/// `None` for blank input or the English default
pub fn preferred_language_block(language: &str) -> Option<String> {
    let language = language.trim();
    if language.is_empty() || language.eq_ignore_ascii_case("english") {
        return None;
    }
    Some(format!("# Preferred Language\n\nSpeak in {}.", language))
}

/// Read `.clinerules` from `cwd`. A directory is read as a set of rule files in path order.
pub fn load_rules_file(cwd: &Path) -> Result<Option<String>> {
    let path = cwd.join(RULES_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = if path.is_dir() {
        read_rules_directory(&path)?
    } else {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let content = content.trim();
    if content.is_empty() {
        debug!("{:?} is empty, skipping", path);
        return Ok(None);
    }

    Ok(Some(format!(
        "# .clinerules\n\nThe following is provided by a root-level .clinerules file where the user has \
         specified instructions for this working directory ({})\n\n{}",
        to_posix(cwd),
        content
    )))
}

fn read_rules_directory(dir: &Path) -> Result<String> {
    let mut sections = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let entry_path = entry.path();
        let content = match std::fs::read_to_string(entry_path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Skipping unreadable rule file {:?}: {}", entry_path, e);
                continue;
            }
        };

        let relative = entry_path.strip_prefix(dir).unwrap_or(entry_path);
        sections.push(format!("{}\n{}", to_posix(relative), content.trim()));
    }

    debug!("Read {} rule files from {:?}", sections.len(), dir);
    Ok(sections.join("\n\n"))
}

/// Read `.clineignore` from `cwd` and explain its effect to the model
pub fn load_ignore_file(cwd: &Path) -> Result<Option<String>> {
    let path = cwd.join(IGNORE_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let content = content.trim();
    if content.is_empty() {
        return Ok(None);
    }

    Ok(Some(format!(
        "# .clineignore\n\n(The following is provided by a root-level .clineignore file where the user has \
         specified files and directories that should not be accessed. When using list_files, you'll notice \
         a 🔒 next to files that are blocked. Attempting to access the file's contents e.g. through \
         read_file will result in an error.)\n\n{}\n.clineignore",
        content
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_empty_blocks_yield_header_only() {
        assert_eq!(append_user_instructions(&[]), "\n\n====\n\n");
        assert_eq!(
            append_user_instructions(&[None, Some(""), Some("  \n"), None]),
            USER_INSTRUCTIONS_HEADER
        );
    }

    #[test]
    fn test_single_block_is_appended_verbatim() {
        let out = append_user_instructions(&[None, Some("Always write tests."), None]);
        assert_eq!(out, "\n\n====\n\nAlways write tests.");
    }

    #[test]
    fn test_blocks_joined_with_blank_line() {
        let out = append_user_instructions(&[Some("first"), None, Some("second")]);
        assert!(out.ends_with("first\n\nsecond"));
    }

    #[test]
    fn test_preferred_language_block() {
        assert_eq!(preferred_language_block("  "), None);
        assert_eq!(preferred_language_block("English"), None);
        assert_eq!(
            preferred_language_block("Japanese").as_deref(),
            Some("# Preferred Language\n\nSpeak in Japanese.")
        );
    }

    #[test]
    fn test_block_order() {
        let instructions = CustomInstructions {
            preferred_language: Some("lang".into()),
            settings: Some("settings".into()),
            rules_file: Some("rules".into()),
            ignore_file: Some("ignore".into()),
        };
        assert!(instructions
            .render()
            .ends_with("lang\n\nsettings\n\nrules\n\nignore"));
        assert!(!instructions.is_empty());
        assert!(CustomInstructions::default().is_empty());
    }

    #[test]
    fn test_load_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_rules_file(dir.path()).unwrap(), None);

        std::fs::write(dir.path().join(RULES_FILE_NAME), "Use tabs.\n").unwrap();
        let rules = load_rules_file(dir.path()).unwrap().unwrap();
        assert!(rules.starts_with("# .clinerules"));
        assert!(rules.ends_with("Use tabs."));
    }

    #[test]
    fn test_load_rules_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let rules_dir = dir.path().join(RULES_FILE_NAME);
        std::fs::create_dir(&rules_dir).unwrap();
        std::fs::write(rules_dir.join("b-style.md"), "Prefer iterators.").unwrap();
        std::fs::write(rules_dir.join("a-testing.md"), "Write tests first.").unwrap();

        let rules = load_rules_file(dir.path()).unwrap().unwrap();
        let testing = rules.find("a-testing.md\nWrite tests first.").unwrap();
        let style = rules.find("b-style.md\nPrefer iterators.").unwrap();
        assert!(testing < style);
    }

    #[test]
    fn test_load_ignore_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_ignore_file(dir.path()).unwrap(), None);

        std::fs::write(dir.path().join(IGNORE_FILE_NAME), "secrets/\n").unwrap();
        let ignore = load_ignore_file(dir.path()).unwrap().unwrap();
        assert!(ignore.contains("secrets/\n.clineignore"));
    }

    #[test]
    fn test_load_skips_blank_settings() {
        let dir = tempfile::tempdir().unwrap();
        let instructions = CustomInstructions::load(dir.path(), Some("English"), Some("   ")).unwrap();
        assert!(instructions.is_empty());
    }
}
