//! Global error handling for promptclip
//!
//! Every failure of a run ends up as a [`PromptError`]. Errors are never
//! retried; the first one aborts the run before anything is delivered.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::minifier::MinifyError;
use crate::tokenizer::TokenizerError;

/// Invalid invocation detected before any filesystem scan
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Search root does not exist
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Search root exists but is not a directory
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Instruction is empty or whitespace only
    #[error("Prompt cannot be empty")]
    EmptyInstruction,
}

/// Global error type for promptclip operations
#[derive(Error, Debug)]
pub enum PromptError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A selected file could not be opened or read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A selected file is not valid UTF-8
    #[error("File {} is not valid UTF-8", .path.display())]
    Decode { path: PathBuf },

    /// The minifier rejected a source file
    #[error("Failed to minify {}: {source}", .path.display())]
    Minify {
        path: PathBuf,
        #[source]
        source: MinifyError,
    },

    /// Tokenizer-related errors
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    /// Clipboard-related errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

impl PromptError {
    /// Process exit code for this error category
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Read { .. } | Self::Decode { .. } => 3,
            Self::Minify { .. } => 4,
            Self::Tokenizer(_) => 5,
            Self::Clipboard(_) => 6,
        }
    }
}

/// Specialized Result type for promptclip operations
pub type Result<T> = std::result::Result<T, PromptError>;
