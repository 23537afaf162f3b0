//! Single-document editing session
//!
//! One [`ResumeSession`] owns one [`Document`] through its whole life: parse,
//! present the outline to a suggestion source, apply accepted edits, render.
//! All operations are synchronous; batches are applied sequentially and
//! already-applied edits are not rolled back when a later one fails.

use crate::document::{Document, Outline};
use crate::edit::{EditOutcome, EditRequest, apply_batch};
use crate::error::ParseResult;
use crate::parser::ResumeParser;

/// The single-writer façade over one résumé document
pub struct ResumeSession {
    doc: Document,
}

impl ResumeSession {
    /// Parse LaTeX source into a structurally addressable session
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::ParseError`] when the document's structural
    /// markers do not balance; no session is produced on failure.
    pub fn parse(text: &str) -> ParseResult<Self> {
        let doc = ResumeParser::new().parse(text)?;
        Ok(Self { doc })
    }

    /// Open a session in degraded mode: line-number addressing only
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            doc: Document::from_text(text),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.doc.is_parsed()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.doc.tree().map_or(0, crate::document::NodeTree::node_count)
    }

    /// Snapshot of the node tree for the suggestion source, if parsed
    #[must_use]
    pub fn outline(&self) -> Option<Outline> {
        self.doc.outline()
    }

    /// Outline rendered as an indented text listing for a prompt
    #[must_use]
    pub fn outline_text(&self) -> Option<String> {
        self.outline().map(|o| o.display())
    }

    /// The document with 1-based line numbers, for line-addressed suggestions
    #[must_use]
    pub fn numbered_text(&self) -> String {
        self.doc.numbered_text()
    }

    /// Apply a batch of edits; one outcome per request, in request order
    pub fn apply(&mut self, requests: &[EditRequest]) -> Vec<EditOutcome> {
        apply_batch(&mut self.doc, requests)
    }

    /// Serialize the current document text
    #[must_use]
    pub fn render(&self) -> String {
        self.doc.to_text()
    }

    /// Re-parse the current text, minting a fresh identifier set
    ///
    /// # Errors
    ///
    /// Returns a parse error if the mutated text no longer parses; the
    /// session keeps its current document in that case.
    pub fn reparse(&mut self) -> ParseResult<()> {
        self.doc = ResumeParser::new().parse(&self.doc.to_text())?;
        Ok(())
    }
}
