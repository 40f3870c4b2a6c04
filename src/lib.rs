/*!
 * promptclip - Build an LLM prompt from project files
 *
 * This library selects files under a directory by glob pattern, minifies
 * Python sources, and assembles everything around an instruction into a
 * single prompt ready for the clipboard.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod logger;
pub mod minifier;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod tokenizer;
pub mod transform;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use clipboard::{Clipboard, SystemClipboard};
pub use config::{Args, Config};
pub use error::{ConfigError, PromptError, Result};
pub use minifier::{Minifier, PythonMinifier};
pub use pipeline::{Pipeline, PromptOutput};
pub use report::{FileReportInfo, PromptReport, ReportFormat, Reporter};
pub use scanner::{Scanner, Selection};
pub use tokenizer::{Encoding, TiktokenTokenizer, Tokenizer};
pub use types::FileRecord;
pub use writer::PromptWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
