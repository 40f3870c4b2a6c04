//! Error types for the tokenizer module

use thiserror::Error;

/// Result type for tokenizer operations
pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// Errors that can occur during tokenization
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The BPE ranks for an encoding could not be loaded
    #[error("Failed to load encoding: {0}")]
    Encoding(String),
}
