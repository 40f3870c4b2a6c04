/*!
 * Pattern set resolution for file selection
 *
 * Turns the raw comma-separated include and exclude strings from the command
 * line into deduplicated sets of glob patterns.
 */

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

/// A deduplicated set of glob patterns
pub type PatternSet = BTreeSet<String>;

/// Include pattern used when none is given (everything, at every depth)
pub const DEFAULT_INCLUDE: &str = "*";

/// Exclude pattern that is always applied so version-control internals never
/// reach the prompt
pub const GIT_EXCLUDE: &str = ".git/**/*";

/// Split a comma-separated spec into patterns. Segments are not trimmed.
fn split_spec(spec: &str) -> PatternSet {
    spec.split(',').map(str::to_string).collect()
}

/// Resolve the include spec; empty means [`DEFAULT_INCLUDE`]
pub fn include_patterns(spec: &str) -> PatternSet {
    if spec.is_empty() {
        return PatternSet::from([DEFAULT_INCLUDE.to_string()]);
    }
    split_spec(spec)
}

/// Resolve the exclude spec, always adding [`GIT_EXCLUDE`]
pub fn merge_excludes(spec: Option<&str>) -> PatternSet {
    let mut patterns = match spec {
        Some(spec) if !spec.is_empty() => split_spec(spec),
        _ => PatternSet::new(),
    };
    patterns.insert(GIT_EXCLUDE.to_string());
    patterns
}

/// Patterns derived from ignore files under `root`.
///
/// Extension point for `.gitignore`-style exclusion. No ignore file is parsed
/// yet, so this is always empty.
// TODO: translate .gitignore entries into recursive glob patterns
pub fn ignore_file_patterns(root: &Path) -> PatternSet {
    debug!("Ignore files are not parsed under {}", root.display());
    PatternSet::new()
}

/// Resolve both specs and fold in the ignore-file patterns
pub fn resolve(include: &str, exclude: Option<&str>, root: &Path) -> (PatternSet, PatternSet) {
    let include = include_patterns(include);
    let mut exclude = merge_excludes(exclude);
    exclude.extend(ignore_file_patterns(root));

    debug!(?include, ?exclude, "Resolved pattern sets");
    (include, exclude)
}
