/*!
 * Core types and data structures for promptclip
 */

use std::path::PathBuf;

/// A selected file with its rendered content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path as discovered under the search root
    pub path: PathBuf,
    /// Root-relative path with forward slashes, used for labels
    pub relative_path: String,
    /// Raw or minified content
    pub content: String,
    /// Whether the content went through the minifier
    pub minified: bool,
}

impl FileRecord {
    /// Record for a file whose content is passed through unchanged
    pub fn raw(path: PathBuf, relative_path: String, content: String) -> Self {
        Self {
            path,
            relative_path,
            content,
            minified: false,
        }
    }

    /// Record for a file whose content was minified
    pub fn minified(path: PathBuf, relative_path: String, content: String) -> Self {
        Self {
            path,
            relative_path,
            content,
            minified: true,
        }
    }
}
