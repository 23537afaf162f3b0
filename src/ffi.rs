//! `UniFFI` bindings for the résumé edit engine
//!
//! This module provides a FFI interface so host applications (web shells,
//! iOS, Android, Python, etc.) can drive an editing session.
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value
)]

use std::fmt;
use std::sync::Mutex;

use crate::document::{Outline, OutlineNode};
use crate::edit::{EditAction, EditOutcome, EditRequest, EditTarget};
use crate::session::ResumeSession;

/// Edit action across the FFI boundary
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiEditAction {
    Modify,
    Remove,
    InsertAfter,
}

impl From<FfiEditAction> for EditAction {
    fn from(action: FfiEditAction) -> Self {
        match action {
            FfiEditAction::Modify => Self::Modify,
            FfiEditAction::Remove => Self::Remove,
            FfiEditAction::InsertAfter => Self::InsertAfter,
        }
    }
}

/// A flat edit request for FFI: exactly one of `target_id` / `target_line`
/// must be set
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEditRequest {
    pub target_id: Option<String>,
    pub target_line: Option<u64>,
    pub action: FfiEditAction,
    pub text: Option<String>,
}

impl FfiEditRequest {
    fn into_request(self) -> Result<EditRequest, String> {
        let target = match (self.target_id, self.target_line) {
            (Some(id), None) => EditTarget::Node { id },
            (None, Some(number)) => EditTarget::Line { number },
            _ => return Err("exactly one of target_id / target_line must be set".to_string()),
        };
        Ok(EditRequest {
            target,
            action: self.action.into(),
            text: self.text,
        })
    }
}

/// Error type for `TailorDocument` operations
#[derive(Debug, uniffi::Error)]
pub enum FfiError {
    ParseFailed(String),
    NoDocument,
    NoStructure,
    SnapshotFailed(String),
}

impl fmt::Display for FfiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailed(s) => write!(f, "Failed to parse document: {s}"),
            Self::NoDocument => write!(f, "No document loaded"),
            Self::NoStructure => write!(f, "Document has no structural parse"),
            Self::SnapshotFailed(s) => write!(f, "Snapshot failed: {s}"),
        }
    }
}

impl std::error::Error for FfiError {}

/// Escape LaTeX special characters in plain suggestion text
#[uniffi::export]
#[must_use]
pub fn escape_latex_text(text: String) -> String {
    crate::escape::escape_latex(&text)
}

/// Unified interface for driving an editing session across platforms
#[derive(uniffi::Object)]
pub struct TailorDocument {
    session: Mutex<Option<ResumeSession>>,
}

#[uniffi::export]
impl TailorDocument {
    /// Create an empty document handle
    #[uniffi::constructor]
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    /// Parse a LaTeX résumé, returning the number of structural nodes
    ///
    /// # Errors
    ///
    /// Returns an error if the document is structurally unparseable; no
    /// document is loaded in that case.
    ///
    /// # Panics
    ///
    /// May panic if the mutex is poisoned (this should not happen in normal
    /// operation)
    pub fn parse(&self, text: &str) -> Result<u32, FfiError> {
        let session =
            ResumeSession::parse(text).map_err(|e| FfiError::ParseFailed(e.to_string()))?;
        let count = session.node_count() as u32;
        *self.session.lock().unwrap() = Some(session);
        Ok(count)
    }

    /// Load text in degraded mode: line-number addressing only
    pub fn load_plain(&self, text: &str) {
        *self.session.lock().unwrap() = Some(ResumeSession::plain(text));
    }

    /// Get total number of structural nodes (0 when not parsed)
    pub fn node_count(&self) -> u32 {
        let session = self.session.lock().unwrap();
        session.as_ref().map_or(0, |s| s.node_count() as u32)
    }

    /// Get the number of physical lines
    pub fn line_count(&self) -> u32 {
        let session = self.session.lock().unwrap();
        session.as_ref().map_or(0, |s| s.line_count() as u32)
    }

    /// Get the node tree snapshot in document order
    ///
    /// # Errors
    ///
    /// Returns an error if no document is loaded or it has no structural parse
    pub fn outline(&self) -> Result<Vec<OutlineNode>, FfiError> {
        self.with_outline(|outline| Ok(outline.nodes.clone()))
    }

    /// Get the outline as an indented text listing for a prompt
    ///
    /// # Errors
    ///
    /// Returns an error if no document is loaded or it has no structural parse
    pub fn outline_text(&self) -> Result<String, FfiError> {
        self.with_outline(|outline| Ok(outline.display()))
    }

    /// Get the outline encoded as CBOR bytes
    ///
    /// # Errors
    ///
    /// Returns an error if no document is loaded, it has no structural parse,
    /// or encoding fails
    pub fn outline_cbor(&self) -> Result<Vec<u8>, FfiError> {
        self.with_outline(|outline| {
            outline
                .to_cbor()
                .map_err(|e| FfiError::SnapshotFailed(e.to_string()))
        })
    }

    /// Get the document with 1-based line numbers for line-addressed
    /// suggestion sources
    ///
    /// # Errors
    ///
    /// Returns an error if no document is loaded
    pub fn numbered_text(&self) -> Result<String, FfiError> {
        let session = self.session.lock().unwrap();
        session
            .as_ref()
            .map(ResumeSession::numbered_text)
            .ok_or(FfiError::NoDocument)
    }

    /// Apply a batch of edits; one outcome per request, in request order
    ///
    /// # Errors
    ///
    /// Returns an error if no document is loaded; per-edit failures are
    /// reported in the outcomes instead
    pub fn apply_edits(&self, requests: Vec<FfiEditRequest>) -> Result<Vec<EditOutcome>, FfiError> {
        let mut session = self.session.lock().unwrap();
        let session = session.as_mut().ok_or(FfiError::NoDocument)?;

        let mut outcomes = Vec::with_capacity(requests.len());
        let mut batch = Vec::with_capacity(requests.len());
        let mut slots = Vec::with_capacity(requests.len());

        for (i, request) in requests.into_iter().enumerate() {
            match request.into_request() {
                Ok(parsed) => {
                    slots.push(i);
                    batch.push(parsed);
                    outcomes.push(None);
                }
                Err(reason) => outcomes.push(Some(EditOutcome {
                    target: "(unset)".to_string(),
                    applied: false,
                    reason: Some(reason),
                    failure: Some(crate::edit::EditFailureKind::MalformedRequest),
                })),
            }
        }

        for (slot, outcome) in slots.into_iter().zip(session.apply(&batch)) {
            outcomes[slot] = Some(outcome);
        }

        Ok(outcomes.into_iter().flatten().collect())
    }

    /// Serialize the current document text
    ///
    /// # Errors
    ///
    /// Returns an error if no document is loaded
    pub fn render(&self) -> Result<String, FfiError> {
        let session = self.session.lock().unwrap();
        session
            .as_ref()
            .map(ResumeSession::render)
            .ok_or(FfiError::NoDocument)
    }

    /// Re-parse the current text, minting a fresh identifier set; returns the
    /// new node count
    ///
    /// # Errors
    ///
    /// Returns an error if no document is loaded or the text no longer parses
    pub fn reparse(&self) -> Result<u32, FfiError> {
        let mut session = self.session.lock().unwrap();
        let session = session.as_mut().ok_or(FfiError::NoDocument)?;
        session
            .reparse()
            .map_err(|e| FfiError::ParseFailed(e.to_string()))?;
        Ok(session.node_count() as u32)
    }

    /// Whether the loaded document has a structural parse
    pub fn is_parsed(&self) -> bool {
        let session = self.session.lock().unwrap();
        session.as_ref().is_some_and(ResumeSession::is_parsed)
    }
}

impl TailorDocument {
    fn with_outline<T>(&self, f: impl FnOnce(&Outline) -> Result<T, FfiError>) -> Result<T, FfiError> {
        let session = self.session.lock().unwrap();
        let session = session.as_ref().ok_or(FfiError::NoDocument)?;
        let outline = session.outline().ok_or(FfiError::NoStructure)?;
        f(&outline)
    }
}

impl Default for TailorDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeKind;

    const SAMPLE: &str = "\\section{Work Experience}\n\\resumeItemListStart\n\\resumeItem{Built data pipelines}\n\\resumeItemListEnd\n\\end{document}";

    #[test]
    fn parse_outline_edit_render_across_the_boundary() {
        let doc = TailorDocument::new();
        let count = doc.parse(SAMPLE).unwrap();
        assert_eq!(count, 2);

        let outline = doc.outline().unwrap();
        let item = outline
            .iter()
            .find(|n| n.kind == NodeKind::Item)
            .unwrap();

        let outcomes = doc
            .apply_edits(vec![FfiEditRequest {
                target_id: Some(item.id.clone()),
                target_line: None,
                action: FfiEditAction::Modify,
                text: Some("Built ETL pipelines".to_string()),
            }])
            .unwrap();

        assert!(outcomes[0].applied);
        assert!(doc.render().unwrap().contains("\\resumeItem{Built ETL pipelines}"));
        assert!(!doc.is_parsed());
        assert_eq!(doc.reparse().unwrap(), 2);
    }

    #[test]
    fn request_with_both_targets_is_rejected_in_place() {
        let doc = TailorDocument::new();
        doc.parse(SAMPLE).unwrap();

        let outcomes = doc
            .apply_edits(vec![
                FfiEditRequest {
                    target_id: Some("x".to_string()),
                    target_line: Some(1),
                    action: FfiEditAction::Remove,
                    text: None,
                },
                FfiEditRequest {
                    target_id: None,
                    target_line: Some(1),
                    action: FfiEditAction::Modify,
                    text: Some("\\section{Experience}".to_string()),
                },
            ])
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].applied);
        assert!(outcomes[1].applied);
        assert!(doc.render().unwrap().contains("\\section{Experience}"));
    }

    #[test]
    fn operations_without_a_document_fail() {
        let doc = TailorDocument::new();
        assert!(matches!(doc.render(), Err(FfiError::NoDocument)));
        assert!(matches!(doc.outline(), Err(FfiError::NoDocument)));
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn plain_mode_has_no_outline() {
        let doc = TailorDocument::new();
        doc.load_plain("a\nb");
        assert!(matches!(doc.outline(), Err(FfiError::NoStructure)));
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn outline_cbor_round_trips() {
        let doc = TailorDocument::new();
        doc.parse(SAMPLE).unwrap();

        let bytes = doc.outline_cbor().unwrap();
        let outline = Outline::from_cbor(&bytes).unwrap();
        assert_eq!(outline.nodes.len(), 2);
    }

    #[test]
    fn escape_export_matches_library_function() {
        assert_eq!(escape_latex_text("R&D".to_string()), "R\\&D");
    }
}
