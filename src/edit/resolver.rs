//! Mapping edit targets to concrete document locations
//!
//! Resolution is exact or it fails: identifier targets are an O(1) table
//! lookup in the current parse, line targets a bounds check. There is no
//! fuzzy or text-similarity fallback anywhere; eliminating that failure
//! mode is the reason identifiers exist.

use crate::document::{Document, LineSpan, NodeId, NodeKind, Wrapper};
use crate::error::{EditError, EditResult};

use super::EditTarget;

/// A resolved edit location
#[derive(Debug, Clone)]
pub enum Location {
    /// A structural node with its recorded span and wrapper convention
    Node {
        id: NodeId,
        kind: NodeKind,
        span: LineSpan,
        indent: String,
        wrapper: Wrapper,
    },
    /// A raw 0-based line index (degraded mode)
    Line { index: usize },
}

impl Location {
    /// The 0-based line where this location starts, used for batch ordering
    #[must_use]
    pub const fn start_line(&self) -> usize {
        match self {
            Self::Node { span, .. } => span.start,
            Self::Line { index } => *index,
        }
    }

    /// The pre-mutation lines this location stakes out within a batch
    ///
    /// Two edits whose footprints overlap conflict: applying both against
    /// spans resolved before any mutation would let one shift or consume the
    /// other's lines.
    #[must_use]
    pub const fn footprint(&self) -> LineSpan {
        match self {
            Self::Node { span, .. } => *span,
            Self::Line { index } => LineSpan::new(*index, *index),
        }
    }
}

/// Resolve one edit target against a document
///
/// Identifier targets fail hard when the identifier comes from another parse
/// session ([`EditError::StaleIdentifier`]) or does not exist in this one
/// ([`EditError::UnknownIdentifier`]). Line targets must be within
/// `1..=line_count`.
///
/// # Errors
///
/// Returns the corresponding [`EditError`] on any resolution failure; the
/// document is never consulted beyond its identifier table and line count.
pub fn resolve(doc: &Document, target: &EditTarget) -> EditResult<Location> {
    match target {
        EditTarget::Node { id } => {
            let Some(tree) = doc.tree() else {
                return Err(EditError::unknown_identifier(id.clone()));
            };
            let node_id = NodeId::from_raw(id.clone());
            if !tree.owns_identifier(&node_id) {
                return Err(EditError::stale_identifier(id.clone()));
            }
            let node = tree
                .get(&node_id)
                .ok_or_else(|| EditError::unknown_identifier(id.clone()))?;
            Ok(Location::Node {
                id: node.id.clone(),
                kind: node.kind,
                span: node.span,
                indent: node.indent.clone(),
                wrapper: node.wrapper.clone(),
            })
        }
        EditTarget::Line { number } => {
            let line_count = doc.line_count() as u64;
            if *number >= 1 && *number <= line_count {
                #[allow(clippy::cast_possible_truncation)]
                Ok(Location::Line {
                    index: (number - 1) as usize,
                })
            } else {
                Err(EditError::line_out_of_range(*number, line_count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ResumeParser;

    const SAMPLE: &str = "\\section{Work Experience}\n\\resumeItemListStart\n\\resumeItem{Built data pipelines}\n\\resumeItemListEnd\n\\end{document}";

    fn parsed() -> Document {
        ResumeParser::new().parse(SAMPLE).unwrap()
    }

    #[test]
    fn resolves_node_by_identifier() {
        let doc = parsed();
        let tree = doc.tree().unwrap();
        let section = tree.get(&tree.roots()[0]).unwrap();
        let item_id = section.children[0].to_string();

        let location = resolve(
            &doc,
            &EditTarget::Node {
                id: item_id.clone(),
            },
        )
        .unwrap();
        match location {
            Location::Node { id, kind, .. } => {
                assert_eq!(id.to_string(), item_id);
                assert_eq!(kind, NodeKind::Item);
            }
            Location::Line { .. } => panic!("expected node location"),
        }
    }

    #[test]
    fn unknown_identifier_in_this_session_fails() {
        let doc = parsed();
        let session = doc.tree().unwrap().session().to_string();
        let bogus = format!("{session}-0000000000000000");

        let err = resolve(&doc, &EditTarget::Node { id: bogus }).unwrap_err();
        assert!(matches!(err, EditError::UnknownIdentifier(_)));
    }

    #[test]
    fn identifier_from_another_parse_is_stale() {
        let doc = parsed();
        let other = ResumeParser::new().parse(SAMPLE).unwrap();
        let other_tree = other.tree().unwrap();
        let foreign = other_tree.roots()[0].to_string();

        let err = resolve(&doc, &EditTarget::Node { id: foreign }).unwrap_err();
        assert!(matches!(err, EditError::StaleIdentifier(_)));
    }

    #[test]
    fn identifier_against_plain_document_fails() {
        let doc = Document::from_text("no structure here");
        let err = resolve(
            &doc,
            &EditTarget::Node {
                id: "aaaa-bbbb".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::UnknownIdentifier(_)));
    }

    #[test]
    fn line_numbers_are_one_based() {
        let doc = Document::from_text("first\nsecond");

        let location = resolve(&doc, &EditTarget::Line { number: 1 }).unwrap();
        assert_eq!(location.start_line(), 0);

        let location = resolve(&doc, &EditTarget::Line { number: 2 }).unwrap();
        assert_eq!(location.start_line(), 1);
    }

    #[test]
    fn out_of_range_lines_fail() {
        let doc = Document::from_text("first\nsecond");

        for number in [0, 3, 9999] {
            let err = resolve(&doc, &EditTarget::Line { number }).unwrap_err();
            assert!(matches!(err, EditError::LineOutOfRange { .. }));
        }
    }
}
