//! Python minifier built on tree-sitter-python
//!
//! Removes comments and literal statements (docstrings included), then
//! re-indents every logical line to one space per level, collapses runs of
//! blanks, and drops empty lines. Names and annotations are left untouched.
//! Text inside string literals and kept comments is never modified.

use std::ops::Range;

use tree_sitter::{Language, Node, Parser, Tree};

use super::error::{MinifyError, MinifyResult};
use super::Minifier;

/// Node kinds with no side effects when used as a whole statement
const LITERAL_KINDS: &[&str] = &["integer", "float", "true", "false", "none", "ellipsis"];

/// Statement left in a block whose statements were all removed
const PLACEHOLDER: &str = "0";

/// What the minifier is allowed to remove
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Remove statements made of a single literal, docstrings included
    pub remove_literal_statements: bool,
    /// Remove comments
    pub remove_comments: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            remove_literal_statements: true,
            remove_comments: true,
        }
    }
}

/// Minifier for Python sources
pub struct PythonMinifier {
    language: Language,
    options: MinifyOptions,
}

impl PythonMinifier {
    /// Create a minifier with the default options
    pub fn new() -> Self {
        Self::with_options(MinifyOptions::default())
    }

    /// Create a minifier with custom options
    pub fn with_options(options: MinifyOptions) -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
            options,
        }
    }

    /// Parse `source`, rejecting anything with syntax errors
    fn parse(&self, source: &str) -> MinifyResult<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| MinifyError::Language(e.to_string()))?;

        let tree = parser.parse(source, None).ok_or(MinifyError::Parse)?;

        let root = tree.root_node();
        if root.has_error() {
            let position = first_error(root).unwrap_or(root).start_position();
            return Err(MinifyError::Syntax {
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        Ok(tree)
    }
}

impl Default for PythonMinifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Minifier for PythonMinifier {
    fn minify(&self, source: &str) -> MinifyResult<String> {
        let tree = self.parse(source)?;

        let mut collector = Collector::new(source.as_bytes(), self.options);
        collector.visit(tree.root_node());

        let (text, verbatim) = collector.apply(source);
        Ok(reflow(&text, &verbatim))
    }
}

/// A byte range of the source to drop, optionally replaced by fixed text
struct Edit {
    range: Range<usize>,
    replacement: &'static str,
}

/// Gathers edits and verbatim ranges from a syntax tree
struct Collector<'a> {
    source: &'a [u8],
    options: MinifyOptions,
    edits: Vec<Edit>,
    /// String literals and kept comments, copied as is by the reflow
    verbatim: Vec<Range<usize>>,
}

impl<'a> Collector<'a> {
    fn new(source: &'a [u8], options: MinifyOptions) -> Self {
        Self {
            source,
            options,
            edits: Vec::new(),
            verbatim: Vec::new(),
        }
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "comment" => {
                if self.options.remove_comments {
                    self.edits.push(Edit {
                        range: node.byte_range(),
                        replacement: "",
                    });
                } else {
                    let mut range = node.byte_range();
                    while range.end > range.start
                        && matches!(self.source[range.end - 1], b' ' | b'\t' | b'\r')
                    {
                        range.end -= 1;
                    }
                    self.verbatim.push(range);
                }
                return;
            }
            // Outermost string only; f-string interpolations stay inside it
            "string" => {
                self.verbatim.push(node.byte_range());
                return;
            }
            "module" | "block" if self.options.remove_literal_statements => {
                self.visit_statements(node);
            }
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children {
            self.visit(child);
        }
    }

    /// Queue removal of the literal statements directly inside `body`
    fn visit_statements(&mut self, body: Node) {
        let mut cursor = body.walk();
        let children: Vec<Node> = body.children(&mut cursor).collect();

        let statements = children
            .iter()
            .filter(|c| c.is_named() && !is_extra_kind(c.kind()))
            .count();
        let literals: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, c)| is_literal_statement(**c))
            .map(|(i, _)| i)
            .collect();

        if literals.is_empty() {
            return;
        }

        // A block cannot be empty, a module can
        let keep_placeholder = body.kind() == "block" && literals.len() == statements;

        for (n, &index) in literals.iter().enumerate() {
            let statement = children[index];
            let mut end = statement.end_byte();

            // `"doc"; x = 1` must not leave a dangling separator
            if let Some(next) = children.get(index + 1) {
                if next.kind() == ";" {
                    end = next.end_byte();
                    while matches!(self.source.get(end), Some(b' ' | b'\t')) {
                        end += 1;
                    }
                }
            }

            let replacement = if keep_placeholder && n == 0 {
                PLACEHOLDER
            } else {
                ""
            };
            self.edits.push(Edit {
                range: statement.start_byte()..end,
                replacement,
            });
        }
    }

    /// Apply the edits, returning the new text and, per byte, whether it
    /// belongs to a verbatim range
    fn apply(mut self, source: &str) -> (String, Vec<bool>) {
        self.edits
            .sort_by(|a, b| a.range.start.cmp(&b.range.start).then(b.range.end.cmp(&a.range.end)));
        self.verbatim.sort_by_key(|r| r.start);

        let mut text = String::with_capacity(source.len());
        let mut verbatim = Vec::with_capacity(source.len());
        let mut cursor = 0;

        for edit in &self.edits {
            // Nested inside an edit that was already applied
            if edit.range.start < cursor {
                continue;
            }
            self.copy(source, cursor..edit.range.start, &mut text, &mut verbatim);
            text.push_str(edit.replacement);
            verbatim.resize(text.len(), false);
            cursor = edit.range.end;
        }
        self.copy(source, cursor..source.len(), &mut text, &mut verbatim);

        (text, verbatim)
    }

    fn copy(&self, source: &str, range: Range<usize>, text: &mut String, verbatim: &mut Vec<bool>) {
        for i in range.clone() {
            verbatim.push(self.is_verbatim(i));
        }
        text.push_str(&source[range]);
    }

    fn is_verbatim(&self, offset: usize) -> bool {
        let after = self.verbatim.partition_point(|r| r.start <= offset);
        after > 0 && offset < self.verbatim[after - 1].end
    }
}

fn is_extra_kind(kind: &str) -> bool {
    matches!(kind, "comment" | "line_continuation")
}

fn is_literal_statement(node: Node) -> bool {
    if node.kind() != "expression_statement" {
        return false;
    }

    let mut cursor = node.walk();
    let mut named = node
        .named_children(&mut cursor)
        .filter(|c| !is_extra_kind(c.kind()));
    let literal = match (named.next(), named.next()) {
        (Some(expression), None) => is_pure_literal(expression),
        _ => false,
    };
    literal
}

fn is_pure_literal(node: Node) -> bool {
    match node.kind() {
        // f-strings can call arbitrary code through interpolations
        "string" => {
            let mut cursor = node.walk();
            let interpolated = node
                .children(&mut cursor)
                .any(|c| c.kind() == "interpolation");
            !interpolated
        }
        "concatenated_string" => {
            let mut cursor = node.walk();
            let pure = node
                .named_children(&mut cursor)
                .filter(|c| !is_extra_kind(c.kind()))
                .all(|c| c.kind() == "string" && is_pure_literal(c));
            pure
        }
        kind => LITERAL_KINDS.contains(&kind),
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error)
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0c')
}

fn is_trailing_blank(b: u8) -> bool {
    is_blank(b) || b == b'\r'
}

/// Column width of leading whitespace, with tabs to the next multiple of 8
fn indent_width(indent: &[u8]) -> usize {
    indent.iter().fold(0, |width, &b| match b {
        b'\t' => (width / 8 + 1) * 8,
        b'\x0c' => 0,
        _ => width + 1,
    })
}

/// Indentation level for a logical line of the given width
fn indent_level(indents: &mut Vec<usize>, width: usize) -> usize {
    let top = indents.last().copied().unwrap_or(0);
    if width > top {
        indents.push(width);
    } else {
        while indents.len() > 1 && indents.last().is_some_and(|&w| width < w) {
            indents.pop();
        }
    }
    indents.len() - 1
}

/// Copy `range` of `text` collapsing runs of blanks outside verbatim ranges
fn collapse(out: &mut String, text: &str, verbatim: &[bool], range: Range<usize>) {
    let bytes = text.as_bytes();
    let mut i = range.start;
    let mut segment = i;

    while i < range.end {
        if !verbatim[i] && is_blank(bytes[i]) {
            out.push_str(&text[segment..i]);
            while i < range.end && !verbatim[i] && is_blank(bytes[i]) {
                i += 1;
            }
            out.push(' ');
            segment = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[segment..range.end]);
}

/// A kept comment starts at `offset`; no string literal starts with `#`
fn is_comment_start(bytes: &[u8], verbatim: &[bool], offset: usize) -> bool {
    verbatim.get(offset).copied().unwrap_or(false) && bytes[offset] == b'#'
}

/// Rebuild the line layout of edited source
fn reflow(text: &str, verbatim: &[bool]) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut indents = vec![0];
    let mut depth = 0usize;
    let mut continued = false;
    let mut first = true;
    let mut start = 0;

    loop {
        let end = bytes[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |p| start + p);

        // The previous newline belongs to a multi-line string
        let interior = start > 0 && verbatim[start - 1];
        let lead = (start..end)
            .find(|&i| verbatim[i] || !is_blank(bytes[i]))
            .unwrap_or(end);
        let content_end = (lead..end)
            .rev()
            .find(|&i| verbatim[i] || !is_trailing_blank(bytes[i]))
            .map_or(lead, |i| i + 1);

        if interior || content_end > lead {
            if !first {
                out.push('\n');
            }
            first = false;

            if interior {
                out.push_str(&text[start..end]);
            } else {
                if depth == 0 && !continued && is_comment_start(bytes, verbatim, lead) {
                    // Comment-only lines never open or close a block
                    let level = indents.len() - 1;
                    out.extend(std::iter::repeat(' ').take(level));
                } else if depth == 0 && !continued {
                    let level = indent_level(&mut indents, indent_width(&bytes[start..lead]));
                    out.extend(std::iter::repeat(' ').take(level));
                } else if depth == 0 && lead > start {
                    // Keep tokens apart across a backslash continuation
                    out.push(' ');
                }
                collapse(&mut out, text, verbatim, lead..content_end);
            }
        }

        for i in start..end {
            if verbatim[i] {
                continue;
            }
            match bytes[i] {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        continued = content_end > lead
            && bytes[content_end - 1] == b'\\'
            && !verbatim[content_end - 1];

        if end == bytes.len() {
            break;
        }
        start = end + 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify(source: &str) -> String {
        PythonMinifier::new().minify(source).unwrap()
    }

    #[test]
    fn test_simple_assignment() {
        assert_eq!(minify("x = 1\n"), "x = 1");
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(minify(""), "");
    }

    #[test]
    fn test_docstrings_and_comments_removed() {
        let source = r#""""Module docstring."""
import os  # stdlib


def add(a: int, b: int) -> int:
    """Add two numbers."""
    # sum them
    return a + b
"#;
        assert_eq!(
            minify(source),
            "import os\ndef add(a: int, b: int) -> int:\n return a + b"
        );
    }

    #[test]
    fn test_docstring_only_body_keeps_placeholder() {
        let source = "class Empty:\n    \"\"\"Nothing here.\"\"\"\n";
        assert_eq!(minify(source), "class Empty:\n 0");
    }

    #[test]
    fn test_indentation_normalized() {
        let source = "class A:\n    def f(self):\n        if True:\n            return 1\n        return 2\n";
        assert_eq!(
            minify(source),
            "class A:\n def f(self):\n  if True:\n   return 1\n  return 2"
        );
    }

    #[test]
    fn test_multiline_string_preserved() {
        let source = "text = \"\"\"\n    keep   this\n\"\"\"\n";
        assert_eq!(minify(source), "text = \"\"\"\n    keep   this\n\"\"\"");
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        assert_eq!(minify("s = \"a # b\"  # trailing\n"), "s = \"a # b\"");
    }

    #[test]
    fn test_string_whitespace_untouched() {
        assert_eq!(minify("s   =   'a    b'\n"), "s = 'a    b'");
    }

    #[test]
    fn test_bracket_continuation() {
        let source = "values = [\n    1,   # one\n\n    2,\n]\n";
        assert_eq!(minify(source), "values = [\n1,\n2,\n]");
    }

    #[test]
    fn test_backslash_continuation() {
        let source = "total = 1 + \\\n        2\n";
        assert_eq!(minify(source), "total = 1 + \\\n 2");
    }

    #[test]
    fn test_literal_statement_with_separator() {
        assert_eq!(minify("\"a\"; x = 1\n"), "x = 1");
    }

    #[test]
    fn test_fstring_statement_kept() {
        assert_eq!(minify("f\"{setup()}\"\n"), "f\"{setup()}\"");
    }

    #[test]
    fn test_assigned_strings_kept() {
        assert_eq!(minify("x = \"doc\"\n"), "x = \"doc\"");
    }

    #[test]
    fn test_keep_literal_statements_option() {
        let minifier = PythonMinifier::with_options(MinifyOptions {
            remove_literal_statements: false,
            remove_comments: true,
        });
        let result = minifier
            .minify("def f():\n    \"\"\"Doc.\"\"\"\n    return 1  # one\n")
            .unwrap();
        assert_eq!(result, "def f():\n \"\"\"Doc.\"\"\"\n return 1");
    }

    #[test]
    fn test_kept_comment_brackets_do_not_affect_indentation() {
        let minifier = PythonMinifier::with_options(MinifyOptions {
            remove_literal_statements: true,
            remove_comments: false,
        });
        let result = minifier
            .minify("def f(x):  # (\n    return x\ny = 1\n")
            .unwrap();
        assert_eq!(result, "def f(x): # (\n return x\ny = 1");

        let result = minifier.minify("z = 1  # ends with \\\nw = 2\n").unwrap();
        assert_eq!(result, "z = 1 # ends with \\\nw = 2");
    }

    #[test]
    fn test_kept_comment_lines_keep_block_indentation() {
        let minifier = PythonMinifier::with_options(MinifyOptions {
            remove_literal_statements: true,
            remove_comments: false,
        });
        let source = "if a:\n        # deep   note   \n    x = 1\n# top\n    y = 2\nz = 3\n";
        assert_eq!(
            minifier.minify(source).unwrap(),
            "if a:\n# deep   note\n x = 1\n # top\n y = 2\nz = 3"
        );
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = PythonMinifier::new().minify("def broken(:\n    pass\n");
        assert!(matches!(result, Err(MinifyError::Syntax { .. })));
    }

    #[test]
    fn test_minify_is_a_fixed_point() {
        let source = r#"
"""Tool module."""

import sys


class Runner:
    """Runs things."""

    def __init__(self, name: str) -> None:
        # remember the name
        self.name = name

    def run(self, *args):
        """Run."""
        result = [
            arg.upper()   for arg in args
        ]
        text = """
  raw
"""
        return result, text


def noop():
    ...
"#;
        let once = minify(source);
        let twice = minify(&once);
        assert_eq!(once, twice);
        assert!(once.len() < source.len());
    }
}
