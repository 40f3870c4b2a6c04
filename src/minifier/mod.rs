//! Minifier module for shrinking scripting-language sources
//!
//! The pipeline only depends on the [`Minifier`] trait; [`PythonMinifier`]
//! is the implementation used by the command line.

mod error;
mod python;

// Re-exports for public API
pub use error::{MinifyError, MinifyResult};
pub use python::{MinifyOptions, PythonMinifier};

/// Trait defining the interface for minifiers
pub trait Minifier {
    /// Return a shorter text that executes the same as `source`
    fn minify(&self, source: &str) -> MinifyResult<String>;
}
