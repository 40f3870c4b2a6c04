/*!
 * Per-file content transformation
 *
 * Reads a selected file as UTF-8 and minifies it when it is a Python source.
 * Any failure is fatal for the whole run.
 */

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PromptError, Result};
use crate::minifier::Minifier;
use crate::types::FileRecord;
use crate::utils::relative_posix;

/// Extension of the files handed to the minifier
pub const PYTHON_EXTENSION: &str = "py";

/// Check whether a file is a Python source by its extension
pub fn is_python(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PYTHON_EXTENSION)
}

/// Read a file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| PromptError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| PromptError::Decode {
        path: path.to_path_buf(),
    })
}

/// Load a file and produce its rendered content
pub fn load_file(root: &Path, path: &Path, minifier: &dyn Minifier) -> Result<FileRecord> {
    let raw = read_text(path)?;
    let relative_path = relative_posix(root, path);

    if !is_python(path) {
        debug!("Passing through {}", relative_path);
        return Ok(FileRecord::raw(path.to_path_buf(), relative_path, raw));
    }

    let content = minifier
        .minify(&raw)
        .map_err(|source| PromptError::Minify {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Minified {} ({} -> {} bytes)",
        relative_path,
        raw.len(),
        content.len()
    );
    Ok(FileRecord::minified(path.to_path_buf(), relative_path, content))
}
