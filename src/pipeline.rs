/*!
 * Prompt building pipeline
 *
 * Runs pattern resolution, discovery, transformation, assembly, and delivery
 * once, in that order. The minifier, tokenizer, and clipboard are injected so
 * the pipeline can run without the real collaborators.
 */

use std::fs;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{PromptError, Result};
use crate::minifier::Minifier;
use crate::patterns;
use crate::scanner::Scanner;
use crate::tokenizer::Tokenizer;
use crate::transform::load_file;
use crate::types::FileRecord;
use crate::writer::PromptWriter;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct PromptOutput {
    /// The assembled prompt
    pub prompt: String,
    /// Processed files, in prompt order
    pub files: Vec<FileRecord>,
    /// Tokens in the prompt
    pub total_tokens: usize,
    /// Encoding the tokens were counted with
    pub encoding: String,
    /// Whether the prompt was handed to the clipboard
    pub copied: bool,
}

/// One-shot prompt builder
pub struct Pipeline<'a> {
    minifier: &'a dyn Minifier,
    tokenizer: &'a dyn Tokenizer,
    clipboard: Option<&'a dyn Clipboard>,
    writer: PromptWriter,
    progress: Arc<ProgressBar>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline; without a clipboard the prompt is only returned
    pub fn new(
        minifier: &'a dyn Minifier,
        tokenizer: &'a dyn Tokenizer,
        clipboard: Option<&'a dyn Clipboard>,
        progress: Arc<ProgressBar>,
    ) -> Self {
        Self {
            minifier,
            tokenizer,
            clipboard,
            writer: PromptWriter::new(),
            progress,
        }
    }

    /// Replace the prompt writer (custom header and footer)
    pub fn with_writer(mut self, writer: PromptWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Build and deliver the prompt described by `config`
    pub fn run(&self, config: &Config) -> Result<PromptOutput> {
        config.validate()?;

        let root = fs::canonicalize(&config.target_dir).map_err(|source| PromptError::Read {
            path: config.target_dir.clone(),
            source,
        })?;

        let (include, exclude) =
            patterns::resolve(&config.include, config.exclude.as_deref(), &root);

        self.progress.set_prefix("📊 Scanning");
        let scanner = Scanner::new(&root, Arc::clone(&self.progress));
        let selected = scanner.scan(&include, &exclude).selected();
        info!("Selected {} files under {}", selected.len(), root.display());

        self.progress.set_prefix("📊 Processing");
        self.progress.set_length(selected.len() as u64);

        let mut files = Vec::with_capacity(selected.len());
        for path in &selected {
            self.progress
                .set_message(format!("Current file: {}", path.display()));
            files.push(load_file(&root, path, self.minifier)?);
            self.progress.inc(1);
        }

        let prompt = self.writer.assemble(&files, &config.prompt);
        debug!("Assembled prompt of {} bytes", prompt.len());

        let copied = match self.clipboard {
            Some(clipboard) => {
                clipboard.copy_to_clipboard(&prompt)?;
                info!("Prompt copied to clipboard");
                true
            }
            None => false,
        };

        let total_tokens = self.tokenizer.count_tokens(&prompt)?;

        Ok(PromptOutput {
            prompt,
            files,
            total_tokens,
            encoding: self.tokenizer.encoding_name(),
            copied,
        })
    }
}
