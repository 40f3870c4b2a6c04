/*!
 * Configuration handling for promptclip
 */

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::error::ConfigError;
use crate::tokenizer::Encoding;

/// Command-line arguments for promptclip
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "promptclip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Gather project files, minify Python ones, and concatenate all of them into one prompt",
    long_about = "Selects files under a directory by glob pattern, minifies Python sources, wraps every file in a labeled code block, appends your instruction, and copies the resulting prompt to the system clipboard."
)]
pub struct Args {
    /// Directory to search for files (default: current directory)
    #[clap(long)]
    pub directory: Option<PathBuf>,

    /// Comma-separated list of patterns for files to include
    #[clap(long, default_value = "*")]
    pub include: String,

    /// Comma-separated list of patterns for files to exclude (.git/**/* is always excluded)
    #[clap(long)]
    pub exclude: Option<String>,

    /// Encoding used to count the prompt tokens
    #[clap(long, value_enum, default_value_t = Encoding::default())]
    pub encoding: Encoding,

    /// Do not copy the prompt to the clipboard
    #[clap(long)]
    pub no_clip: bool,

    /// Also write the prompt to stdout
    #[clap(long)]
    pub print: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Prompt to be appended to the end
    pub prompt: String,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to search
    pub target_dir: PathBuf,

    /// Raw include spec
    pub include: String,

    /// Raw exclude spec
    pub exclude: Option<String>,

    /// Instruction placed after the files
    pub prompt: String,

    /// Encoding for the token count
    pub encoding: Encoding,

    /// Copy output to clipboard
    pub clip: bool,

    /// Write output to stdout
    pub print: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: args.directory.unwrap_or_else(|| PathBuf::from(".")),
            include: args.include,
            exclude: args.exclude,
            prompt: args.prompt,
            encoding: args.encoding,
            clip: !args.no_clip,
            print: args.print,
        }
    }

    /// Create configuration for `target_dir` with defaults everywhere else
    pub fn new(target_dir: impl Into<PathBuf>, prompt: impl Into<String>) -> Self {
        Self {
            target_dir: target_dir.into(),
            include: String::new(),
            exclude: None,
            prompt: prompt.into(),
            encoding: Encoding::default(),
            clip: true,
            print: false,
        }
    }

    /// Validate the configuration.
    ///
    /// The root is checked before the instruction. Nothing here scans the
    /// directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.target_dir.exists() {
            return Err(ConfigError::RootNotFound(self.target_dir.clone()));
        }

        if !self.target_dir.is_dir() {
            return Err(ConfigError::NotADirectory(self.target_dir.clone()));
        }

        if self.prompt.trim().is_empty() {
            return Err(ConfigError::EmptyInstruction);
        }

        Ok(())
    }
}
