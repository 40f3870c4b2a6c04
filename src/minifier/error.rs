//! Error types for the minifier module

use thiserror::Error;

/// Result type for minifier operations
pub type MinifyResult<T> = Result<T, MinifyError>;

/// Errors that can occur while minifying source text
#[derive(Error, Debug)]
pub enum MinifyError {
    /// The grammar could not be loaded into the parser
    #[error("Language error: {0}")]
    Language(String),

    /// The parser produced no tree
    #[error("Parser produced no syntax tree")]
    Parse,

    /// The source is not valid for the target language
    #[error("Syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}
