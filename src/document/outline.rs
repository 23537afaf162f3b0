//! Serializable snapshot of the node tree
//!
//! The outline is what the external suggestion source sees: identifiers, kinds
//! and display text, never raw spans. It can be rendered as an indented text
//! listing for a prompt, or encoded to CBOR bytes for transport.

use serde::{Deserialize, Serialize};

use crate::error::{SnapshotError, SnapshotResult};

use super::tree::{NodeKind, NodeTree};

/// Longest bullet preview shown in the text rendering
const PREVIEW_LEN: usize = 80;

/// One node of the outline snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct OutlineNode {
    pub id: String,
    pub kind: NodeKind,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub text: String,
}

/// A snapshot of one parse's node tree, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub session: String,
    pub nodes: Vec<OutlineNode>,
}

impl Outline {
    /// Build a snapshot from a node tree
    #[must_use]
    pub fn from_tree(tree: &NodeTree) -> Self {
        let nodes = tree
            .iter_document_order()
            .into_iter()
            .map(|node| OutlineNode {
                id: node.id.to_string(),
                kind: node.kind,
                parent: node.parent.as_ref().map(ToString::to_string),
                children: node.children.iter().map(ToString::to_string).collect(),
                text: node.label.clone(),
            })
            .collect();

        Self {
            session: tree.session().to_string(),
            nodes,
        }
    }

    /// Encode the snapshot to CBOR bytes
    ///
    /// # Errors
    ///
    /// Returns an error if CBOR encoding fails
    pub fn to_cbor(&self) -> SnapshotResult<Vec<u8>> {
        serde_cbor::to_vec(self).map_err(|e| SnapshotError::encode_failed(e.to_string()))
    }

    /// Decode a snapshot from CBOR bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid outline
    pub fn from_cbor(bytes: &[u8]) -> SnapshotResult<Self> {
        serde_cbor::from_slice(bytes).map_err(|e| SnapshotError::decode_failed(e.to_string()))
    }

    /// Render the outline as an indented text listing for a prompt
    #[must_use]
    pub fn display(&self) -> String {
        let mut lines = vec!["=== RESUME STRUCTURE ===".to_string()];

        for node in &self.nodes {
            let preview = if node.text.chars().count() > PREVIEW_LEN {
                let cut: String = node.text.chars().take(PREVIEW_LEN).collect();
                format!("{cut}...")
            } else {
                node.text.clone()
            };

            let line = match node.kind {
                NodeKind::Section => format!("\n[{}] {}", node.id, preview),
                NodeKind::Entry => format!("  [{}] {}", node.id, preview),
                NodeKind::Item => format!("    - [{}] {}", node.id, preview),
            };
            lines.push(line);
        }

        lines.join("\n")
    }
}
