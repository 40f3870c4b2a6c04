/*!
 * Utility functions for promptclip
 */

use std::path::Path;

/// Path of `path` relative to `root`, with forward slashes.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn relative_posix(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}

/// Count lines the way an editor shows them (a trailing newline does not
/// start a new line)
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relative_posix() {
        let root = PathBuf::from("/project");
        let nested = root.join("src").join("pkg").join("mod.py");
        assert_eq!(relative_posix(&root, &nested), "src/pkg/mod.py");
        assert_eq!(relative_posix(&root, &root.join("a.py")), "a.py");
    }

    #[test]
    fn test_relative_posix_outside_root() {
        let path = PathBuf::from("/elsewhere/a.py");
        assert_eq!(relative_posix(Path::new("/project"), &path), "/elsewhere/a.py");
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("hello\n"), 1);
        assert_eq!(count_lines("a\nb"), 2);
    }
}
