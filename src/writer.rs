/*!
 * Prompt writer for promptclip
 */

use crate::types::FileRecord;

/// Line placed before the file blocks
pub const DEFAULT_HEADER: &str = "Here is the context of my current project.";

/// Line placed after the instruction
pub const DEFAULT_FOOTER: &str = "Use best practices and clean code techniques. Try your best!";

/// Language tag of the fenced blocks
pub const FENCE_LANGUAGE: &str = "python";

/// Assembles file records and an instruction into one prompt
#[derive(Debug, Clone)]
pub struct PromptWriter {
    /// First line of the prompt
    header: String,
    /// Last line of the prompt
    footer: String,
}

impl PromptWriter {
    /// Create a writer with the default header and footer
    pub fn new() -> Self {
        Self::with_header_footer(DEFAULT_HEADER, DEFAULT_FOOTER)
    }

    /// Create a writer with a custom header and footer
    pub fn with_header_footer(header: impl Into<String>, footer: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            footer: footer.into(),
        }
    }

    /// Render one file as a labeled fenced block
    pub fn render_block(&self, file: &FileRecord) -> String {
        format!(
            "File `{}`:\n```{}\n{}\n```",
            file.relative_path, FENCE_LANGUAGE, file.content
        )
    }

    /// Build the final prompt.
    ///
    /// Layout is header, blocks joined by newlines, a literal `.`, the
    /// instruction, and the footer. Blocks keep the order of `files`.
    pub fn assemble(&self, files: &[FileRecord], instruction: &str) -> String {
        let blocks = files
            .iter()
            .map(|file| self.render_block(file))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n{}.\n{}\n{}",
            self.header, blocks, instruction, self.footer
        )
    }
}

impl Default for PromptWriter {
    fn default() -> Self {
        Self::new()
    }
}
