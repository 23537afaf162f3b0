//! Node tree overlay for a structurally parsed document
//!
//! Every node carries a synthetic identifier minted at creation time. The
//! identifier embeds the parse session prefix, so identifiers from a previous
//! parse can be told apart from identifiers that simply do not exist.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::span::LineSpan;

/// Opaque, parse-session-scoped node identifier
///
/// Format: `{session}-{token}` where `session` is the 8-hex-char prefix of the
/// parse that minted it and `token` is a random uuid-v4 (122 bits of entropy).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Mint a fresh identifier for the given parse session
    #[must_use]
    pub fn fresh(session: &str) -> Self {
        Self(format!("{session}-{}", uuid::Uuid::new_v4().simple()))
    }

    /// Wrap an externally supplied identifier string
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The session prefix embedded in this identifier, if it has one
    #[must_use]
    pub fn session_prefix(&self) -> Option<&str> {
        self.0.split_once('-').map(|(prefix, _)| prefix)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of structural unit a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum NodeKind {
    /// A `\section{...}` block
    Section,
    /// One job, project or education entry inside a section
    Entry,
    /// A leaf unit: a bullet or a skill line
    Item,
}

impl NodeKind {
    /// Get a human-readable name for this kind
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Section => "section",
            Self::Entry => "entry",
            Self::Item => "item",
        }
    }
}

/// The LaTeX command convention a node's text lives inside
///
/// Recording the wrapper lets the applier re-wrap replacement text uniformly
/// across differently formatted sections, with no per-section code paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapper {
    /// `\resumeItem{...}`
    Bullet,
    /// `\textbf{Category}{: ...}`
    Skill { category: String },
    /// No enclosing command; text is spliced in as-is
    Plain,
}

impl Wrapper {
    /// Re-wrap replacement text in this node's command convention
    #[must_use]
    pub fn wrap(&self, text: &str) -> String {
        match self {
            Self::Bullet => format!("\\resumeItem{{{text}}}"),
            Self::Skill { category } => format!("\\textbf{{{category}}}{{: {text}}}"),
            Self::Plain => text.to_string(),
        }
    }
}

/// One structural unit of the parsed document
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// The raw line span this node owns
    pub span: LineSpan,
    /// Leading whitespace of the node's first line
    pub indent: String,
    /// Display text for outlines (section name, entry heading, bullet text)
    pub label: String,
    pub wrapper: Wrapper,
    /// Lookup only; the tree owns nodes top-down
    pub parent: Option<NodeId>,
    /// Insertion order = document order
    pub children: Vec<NodeId>,
}

macro_rules! impl_kind_helpers {
    ($($variant:ident),*) => {
        $(
            impl Node {
                paste::paste! {
                    #[must_use]
                    pub fn [<is_ $variant:snake>](&self) -> bool {
                        matches!(self.kind, NodeKind::$variant)
                    }
                }
            }
        )*
    };
}

impl_kind_helpers!(Section, Entry, Item);

/// The tree of nodes produced by one parse
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    session: String,
    roots: Vec<NodeId>,
    nodes: HashMap<NodeId, Node>,
}

impl NodeTree {
    /// Create an empty tree with a fresh session prefix
    #[must_use]
    pub fn new() -> Self {
        let session = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
        Self {
            session,
            roots: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    /// The 8-hex-char session prefix shared by all identifiers of this parse
    #[must_use]
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Mint an identifier belonging to this tree's session
    #[must_use]
    pub fn mint_id(&self) -> NodeId {
        NodeId::fresh(&self.session)
    }

    /// Whether an identifier was minted by this tree's parse session
    #[must_use]
    pub fn owns_identifier(&self, id: &NodeId) -> bool {
        id.session_prefix() == Some(self.session.as_str())
    }

    /// Insert a node; if it has no parent it becomes a root, otherwise it is
    /// appended to its parent's children
    pub fn insert(&mut self, node: Node) {
        let id = node.id.clone();
        match &node.parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.push(id.clone());
                }
            }
            None => self.roots.push(id.clone()),
        }
        self.nodes.insert(id, node);
    }

    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Root nodes (sections) in document order
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in document order (depth-first over roots)
    #[must_use]
    pub fn iter_document_order(&self) -> Vec<&Node> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<&NodeId> = self.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(node);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }
}
