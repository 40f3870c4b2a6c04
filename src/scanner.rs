/*!
 * Directory scanning and file selection
 *
 * Patterns are matched recursively: a pattern matches a file when any
 * trailing run of its root-relative path segments matches the glob, the same
 * as prepending `**` and a slash to it. `*` never crosses a slash, and braces
 * are matched literally.
 */

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use glob_match::glob_match;
use indicatif::ProgressBar;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::patterns::PatternSet;
use crate::utils::relative_posix;

/// Files matched by the include and exclude pattern sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Files matching at least one include pattern
    pub included: BTreeSet<PathBuf>,
    /// Files matching at least one exclude pattern
    pub excluded: BTreeSet<PathBuf>,
}

impl Selection {
    /// Files to process: included minus excluded, in path order
    pub fn selected(&self) -> BTreeSet<PathBuf> {
        self.included.difference(&self.excluded).cloned().collect()
    }
}

/// Scanner for a single search root
pub struct Scanner {
    /// Search root
    root: PathBuf,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(root: impl Into<PathBuf>, progress: Arc<ProgressBar>) -> Self {
        Self {
            root: root.into(),
            progress,
        }
    }

    /// Walk the root once and classify every regular file against both
    /// pattern sets.
    ///
    /// The result is the same as expanding each set with its own recursive
    /// walk. Entries that cannot be read are skipped with a warning.
    pub fn scan(&self, include: &PatternSet, exclude: &PatternSet) -> Selection {
        self.progress
            .set_message(format!("📂 Scanning directory: {}", self.root.display()));

        let mut selection = Selection::default();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking entry: {}", e);
                    continue;
                }
            };

            // Follows symlinks, so a link to a regular file counts as a file
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = relative_posix(&self.root, path);
            if matches_any(include, &relative) {
                selection.included.insert(path.to_path_buf());
            }
            if matches_any(exclude, &relative) {
                selection.excluded.insert(path.to_path_buf());
            }
        }

        debug!(
            included = selection.included.len(),
            excluded = selection.excluded.len(),
            "Scan finished"
        );
        selection
    }
}

/// Check a root-relative path against every pattern of a set
pub fn matches_any(patterns: &PatternSet, relative: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| matches_recursive(pattern, relative))
}

/// Match `pattern` against any trailing run of the segments of `relative`
pub fn matches_recursive(pattern: &str, relative: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let pattern = escape_braces(pattern);
    let mut suffix = relative;
    loop {
        if glob_match(&pattern, suffix) {
            return true;
        }
        match suffix.find('/') {
            Some(pos) => suffix = &suffix[pos + 1..],
            None => return false,
        }
    }
}

/// Escape `{` and `}` so glob-match does not read them as alternation
fn escape_braces(pattern: &str) -> String {
    pattern.replace('{', "\\{").replace('}', "\\}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{include_patterns, merge_excludes};
    use std::fs;
    use tempfile::TempDir;

    fn setup_tree() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("src").join("pkg")).unwrap();
        fs::create_dir_all(root.join(".git").join("objects")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();

        fs::write(root.join("main.py"), "print('hi')\n").unwrap();
        fs::write(root.join("src").join("util.py"), "x = 1\n").unwrap();
        fs::write(root.join("src").join("pkg").join("mod.py"), "y = 2\n").unwrap();
        fs::write(root.join("docs").join("guide.md"), "# Guide\n").unwrap();
        fs::write(root.join("notes.txt"), "todo\n").unwrap();
        fs::write(root.join(".git").join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(root.join(".git").join("objects").join("ab"), "blob").unwrap();

        dir
    }

    fn scanner(dir: &TempDir) -> Scanner {
        Scanner::new(dir.path(), Arc::new(ProgressBar::hidden()))
    }

    fn relative_set(dir: &TempDir, paths: &BTreeSet<PathBuf>) -> Vec<String> {
        paths
            .iter()
            .map(|p| relative_posix(dir.path(), p))
            .collect()
    }

    #[test]
    fn test_matches_recursive_star() {
        assert!(matches_recursive("*", "a.py"));
        assert!(matches_recursive("*", "src/pkg/a.py"));
        assert!(matches_recursive("*.py", "src/pkg/mod.py"));
        assert!(!matches_recursive("*.py", "notes.txt"));
    }

    #[test]
    fn test_matches_recursive_with_directories() {
        assert!(matches_recursive("src/*.py", "src/util.py"));
        assert!(matches_recursive("src/*.py", "nested/src/util.py"));
        assert!(!matches_recursive("src/*.py", "src/pkg/mod.py"));
    }

    #[test]
    fn test_matches_recursive_git_pattern() {
        assert!(matches_recursive(".git/**/*", ".git/HEAD"));
        assert!(matches_recursive(".git/**/*", ".git/objects/ab"));
        assert!(matches_recursive(".git/**/*", "vendor/lib/.git/config"));
        assert!(!matches_recursive(".git/**/*", "src/git.py"));
    }

    #[test]
    fn test_braces_are_literal() {
        assert!(matches_recursive("{x}.txt", "{x}.txt"));
        assert!(matches_recursive("*.txt", "docs/{x}.txt"));
        assert!(!matches_recursive("{a,b}.txt", "a.txt"));
        assert!(!matches_recursive("*.{py,md}", "main.py"));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        assert!(!matches_recursive("", "a.py"));
    }

    #[test]
    fn test_scan_everything_minus_git() {
        let dir = setup_tree();
        let selection = scanner(&dir).scan(&include_patterns(""), &merge_excludes(None));

        assert_eq!(
            relative_set(&dir, &selection.selected()),
            vec![
                "docs/guide.md",
                "main.py",
                "notes.txt",
                "src/pkg/mod.py",
                "src/util.py",
            ]
        );
        assert_eq!(
            relative_set(&dir, &selection.excluded),
            vec![".git/HEAD", ".git/objects/ab"]
        );
    }

    #[test]
    fn test_scan_include_is_recursive() {
        let dir = setup_tree();
        let selection = scanner(&dir).scan(&include_patterns("*.py"), &merge_excludes(None));

        assert_eq!(
            relative_set(&dir, &selection.selected()),
            vec!["main.py", "src/pkg/mod.py", "src/util.py"]
        );
    }

    #[test]
    fn test_scan_exclude_overrides_include() {
        let dir = setup_tree();
        let selection = scanner(&dir).scan(
            &include_patterns("*.py,*.md"),
            &merge_excludes(Some("pkg/*,guide.md")),
        );

        assert_eq!(
            relative_set(&dir, &selection.selected()),
            vec!["main.py", "src/util.py"]
        );
    }

    #[test]
    fn test_selection_is_subset_and_disjoint() {
        let dir = setup_tree();
        let selection = scanner(&dir).scan(&include_patterns("*"), &merge_excludes(Some("*.txt")));
        let selected = selection.selected();

        assert!(selected.is_subset(&selection.included));
        assert!(selected.is_disjoint(&selection.excluded));
    }

    #[test]
    fn test_git_exclusion_always_applied() {
        let dir = setup_tree();
        let scanner = scanner(&dir);
        let include = include_patterns("*");

        let mut explicit = merge_excludes(Some("*.md"));
        explicit.insert(".git/**/*".to_string());

        assert_eq!(
            scanner.scan(&include, &merge_excludes(Some("*.md"))).selected(),
            scanner.scan(&include, &explicit).selected()
        );
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let dir = setup_tree();
        let selection = scanner(&dir).scan(&include_patterns("*.rs"), &merge_excludes(None));
        assert!(selection.included.is_empty());
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_directories_are_never_selected() {
        let dir = setup_tree();
        let selection = scanner(&dir).scan(&include_patterns("src"), &merge_excludes(None));
        assert!(selection.included.is_empty());
    }
}
