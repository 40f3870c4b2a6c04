//! Encoding definitions

use clap::ValueEnum;
use strum::{Display, EnumIter};
use tiktoken_rs::CoreBPE;

use super::error::{TokenizerError, TokenizerResult};

/// Supported tiktoken encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, Display, ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum Encoding {
    /// GPT-4 and GPT-3.5 encoding
    #[default]
    Cl100kBase,
    /// GPT-4o encoding
    O200kBase,
    /// Codex encoding
    P50kBase,
    /// GPT-3 encoding
    R50kBase,
}

impl Encoding {
    /// Load the BPE ranks for this encoding
    pub fn load(&self) -> TokenizerResult<CoreBPE> {
        let bpe = match self {
            Self::Cl100kBase => tiktoken_rs::cl100k_base(),
            Self::O200kBase => tiktoken_rs::o200k_base(),
            Self::P50kBase => tiktoken_rs::p50k_base(),
            Self::R50kBase => tiktoken_rs::r50k_base(),
        };
        bpe.map_err(|e| TokenizerError::Encoding(e.to_string()))
    }
}
