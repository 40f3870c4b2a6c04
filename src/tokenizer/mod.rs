//! Tokenizer module for token counting
//!
//! Token counts are reported for the final prompt using a tiktoken
//! encoding, `cl100k_base` unless configured otherwise.

mod encoding;
mod error;

// Re-exports for public API
pub use encoding::Encoding;
pub use error::{TokenizerError, TokenizerResult};

use tiktoken_rs::CoreBPE;

/// Trait defining the interface for tokenizers
pub trait Tokenizer: Send + Sync {
    /// Count tokens in the given text
    fn count_tokens(&self, text: &str) -> TokenizerResult<usize>;

    /// Name of the encoding used for counting
    fn encoding_name(&self) -> String;
}

/// Tokenizer backed by tiktoken
pub struct TiktokenTokenizer {
    encoding: Encoding,
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Create a tokenizer for the given encoding
    pub fn new(encoding: Encoding) -> TokenizerResult<Self> {
        let bpe = encoding.load()?;
        Ok(Self { encoding, bpe })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count_tokens(&self, text: &str) -> TokenizerResult<usize> {
        Ok(self.bpe.encode_ordinary(text).len())
    }

    fn encoding_name(&self) -> String {
        self.encoding.to_string()
    }
}
