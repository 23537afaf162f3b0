//! In-memory document model
//!
//! A [`Document`] owns the LaTeX source as an ordered sequence of lines, plus
//! an optional node tree overlay produced by the structural parser. Lines are
//! obtained by splitting the input on `'\n'`, so joining them back yields text
//! byte-identical to the input (round-trip fidelity).

pub mod outline;
pub mod span;
pub mod tree;

pub use outline::{Outline, OutlineNode};
pub use span::LineSpan;
pub use tree::{Node, NodeId, NodeKind, NodeTree, Wrapper};

/// One LaTeX document held as lines, with an optional structural overlay
///
/// Constructed once per upload, mutated in place by accepted edits, and
/// re-serialized on export. Public line addressing is 1-based; internal
/// indices are 0-based.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
    tree: Option<NodeTree>,
}

impl Document {
    /// Build a document from raw text, without a structural parse
    ///
    /// This is the degraded mode: only line-number addressing works.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            tree: None,
        }
    }

    /// Attach the node tree produced by a structural parse
    pub(crate) fn set_tree(&mut self, tree: NodeTree) {
        self.tree = Some(tree);
    }

    /// Drop the structural overlay; node identifiers stop resolving until a
    /// re-parse mints a new set
    pub fn invalidate_tree(&mut self) {
        self.tree = None;
    }

    #[must_use]
    pub fn tree(&self) -> Option<&NodeTree> {
        self.tree.as_ref()
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.tree.is_some()
    }

    /// Number of physical lines (including a trailing empty segment when the
    /// input ends with a newline)
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// A single line by 0-based index
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Re-serialize; untouched lines come back byte-identical
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// The document with 1-based line numbers, for a suggestion source that
    /// addresses by line
    #[must_use]
    pub fn numbered_text(&self) -> String {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:4} | {line}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Snapshot of the node tree, if the document was structurally parsed
    #[must_use]
    pub fn outline(&self) -> Option<Outline> {
        self.tree.as_ref().map(Outline::from_tree)
    }

    /// Replace an inclusive 0-based line range with new lines
    ///
    /// The replacement may be empty (removal) or longer than the range.
    pub(crate) fn splice(&mut self, span: LineSpan, replacement: Vec<String>) {
        self.lines.splice(span.start..=span.end, replacement);
    }

    /// Insert lines so that the first lands at 0-based index `at`
    pub(crate) fn insert_lines(&mut self, at: usize, new_lines: Vec<String>) {
        self.lines.splice(at..at, new_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_byte_identical() {
        let samples = [
            "a\nb\nc",
            "a\nb\nc\n",
            "",
            "\n\n",
            "windows line\r\nnext\r\n",
            "  indented \n\ttabbed",
        ];
        for text in samples {
            let doc = Document::from_text(text);
            assert_eq!(doc.to_text(), text);
        }
    }

    #[test]
    fn line_count_includes_trailing_segment() {
        let doc = Document::from_text("a\nb\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), Some("a"));
        assert_eq!(doc.line(2), Some(""));
        assert_eq!(doc.line(3), None);
    }

    #[test]
    fn numbered_text_is_one_based() {
        let doc = Document::from_text("first\nsecond");
        let numbered = doc.numbered_text();
        assert!(numbered.contains("   1 | first"));
        assert!(numbered.contains("   2 | second"));
    }

    #[test]
    fn splice_replaces_range() {
        let mut doc = Document::from_text("a\nb\nc\nd");
        doc.splice(LineSpan::new(1, 2), vec!["X".to_string()]);
        assert_eq!(doc.to_text(), "a\nX\nd");
    }

    #[test]
    fn splice_with_empty_replacement_removes() {
        let mut doc = Document::from_text("a\nb\nc");
        doc.splice(LineSpan::new(1, 1), Vec::new());
        assert_eq!(doc.to_text(), "a\nc");
    }

    #[test]
    fn insert_lines_at_index() {
        let mut doc = Document::from_text("a\nc");
        doc.insert_lines(1, vec!["b".to_string()]);
        assert_eq!(doc.to_text(), "a\nb\nc");
    }

    #[test]
    fn plain_document_has_no_tree() {
        let doc = Document::from_text("anything");
        assert!(!doc.is_parsed());
        assert!(doc.outline().is_none());
    }
}
