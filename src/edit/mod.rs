//! Edit requests, outcomes, and their application
//!
//! An [`EditRequest`] arrives from an external suggestion source and names its
//! target by node identifier or by 1-based line number. Every request yields
//! exactly one [`EditOutcome`], in request order, whether it applied or not.

pub mod applier;
pub mod resolver;

pub use applier::apply_batch;
pub use resolver::{Location, resolve};

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// What an edit does to its resolved location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    /// Replace the target's owned span, re-wrapped in its original command
    Modify,
    /// Delete the target's owned span (subtree included)
    Remove,
    /// Insert new content immediately after the target's span
    InsertAfter,
}

impl EditAction {
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Modify => "modify",
            Self::Remove => "remove",
            Self::InsertAfter => "insert_after",
        }
    }
}

/// Where an edit points: a node identifier or a 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditTarget {
    Node { id: String },
    Line { number: u64 },
}

impl std::fmt::Display for EditTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node { id } => write!(f, "node {id}"),
            Self::Line { number } => write!(f, "line {number}"),
        }
    }
}

/// One externally supplied edit instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub target: EditTarget,
    pub action: EditAction,
    pub text: Option<String>,
}

impl EditRequest {
    #[must_use]
    pub fn modify_node(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: EditTarget::Node { id: id.into() },
            action: EditAction::Modify,
            text: Some(text.into()),
        }
    }

    #[must_use]
    pub fn remove_node(id: impl Into<String>) -> Self {
        Self {
            target: EditTarget::Node { id: id.into() },
            action: EditAction::Remove,
            text: None,
        }
    }

    #[must_use]
    pub fn insert_after_node(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: EditTarget::Node { id: id.into() },
            action: EditAction::InsertAfter,
            text: Some(text.into()),
        }
    }

    #[must_use]
    pub fn modify_line(number: u64, text: impl Into<String>) -> Self {
        Self {
            target: EditTarget::Line { number },
            action: EditAction::Modify,
            text: Some(text.into()),
        }
    }

    #[must_use]
    pub const fn remove_line(number: u64) -> Self {
        Self {
            target: EditTarget::Line { number },
            action: EditAction::Remove,
            text: None,
        }
    }

    #[must_use]
    pub fn insert_after_line(number: u64, text: impl Into<String>) -> Self {
        Self {
            target: EditTarget::Line { number },
            action: EditAction::InsertAfter,
            text: Some(text.into()),
        }
    }

    /// Structural well-formedness: `modify` and `insert_after` require
    /// non-empty text, `remove` must not carry any
    ///
    /// # Errors
    ///
    /// Returns [`EditError::MalformedRequest`] when the action/text pairing is
    /// invalid
    pub fn validate(&self) -> Result<(), EditError> {
        match self.action {
            EditAction::Modify | EditAction::InsertAfter => match &self.text {
                Some(text) if !text.is_empty() => Ok(()),
                _ => Err(EditError::malformed(format!(
                    "{} requires non-empty text",
                    self.action.name()
                ))),
            },
            EditAction::Remove => {
                if self.text.is_none() {
                    Ok(())
                } else {
                    Err(EditError::malformed("remove must not carry text"))
                }
            }
        }
    }
}

/// The specific failure family of a rejected edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum EditFailureKind {
    UnknownIdentifier,
    StaleIdentifier,
    LineOutOfRange,
    MalformedRequest,
    UnbalancedWrapper,
    ConflictingEdit,
}

impl From<&EditError> for EditFailureKind {
    fn from(err: &EditError) -> Self {
        match err {
            EditError::UnknownIdentifier(_) => Self::UnknownIdentifier,
            EditError::StaleIdentifier(_) => Self::StaleIdentifier,
            EditError::LineOutOfRange { .. } => Self::LineOutOfRange,
            EditError::MalformedRequest(_) => Self::MalformedRequest,
            EditError::UnbalancedWrapper(_) => Self::UnbalancedWrapper,
            EditError::ConflictingEdit(_) => Self::ConflictingEdit,
        }
    }
}

/// The per-request report: one per [`EditRequest`], never silently dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct EditOutcome {
    /// Display form of the request's target
    pub target: String,
    pub applied: bool,
    pub reason: Option<String>,
    pub failure: Option<EditFailureKind>,
}

impl EditOutcome {
    #[must_use]
    pub fn applied(target: &EditTarget) -> Self {
        Self {
            target: target.to_string(),
            applied: true,
            reason: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn rejected(target: &EditTarget, err: &EditError) -> Self {
        Self {
            target: target.to_string(),
            applied: false,
            reason: Some(err.to_string()),
            failure: Some(EditFailureKind::from(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_without_text_is_malformed() {
        let request = EditRequest {
            target: EditTarget::Line { number: 1 },
            action: EditAction::Modify,
            text: None,
        };
        assert!(matches!(
            request.validate(),
            Err(EditError::MalformedRequest(_))
        ));
    }

    #[test]
    fn modify_with_empty_text_is_malformed() {
        let request = EditRequest::modify_line(1, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn remove_with_text_is_malformed() {
        let request = EditRequest {
            target: EditTarget::Node {
                id: "abc".to_string(),
            },
            action: EditAction::Remove,
            text: Some("stray".to_string()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn well_formed_requests_validate() {
        assert!(EditRequest::modify_node("id", "text").validate().is_ok());
        assert!(EditRequest::remove_line(3).validate().is_ok());
        assert!(EditRequest::insert_after_line(3, "new").validate().is_ok());
    }

    #[test]
    fn rejected_outcome_carries_failure_kind() {
        let target = EditTarget::Line { number: 99 };
        let outcome = EditOutcome::rejected(&target, &EditError::line_out_of_range(99, 10));
        assert!(!outcome.applied);
        assert_eq!(outcome.failure, Some(EditFailureKind::LineOutOfRange));
        assert_eq!(outcome.target, "line 99");
        assert!(outcome.reason.unwrap().contains("99"));
    }

    #[test]
    fn request_round_trips_through_cbor() {
        let request = EditRequest::modify_node("a1", "new text");
        let bytes = serde_cbor::to_vec(&request).unwrap();
        let decoded: EditRequest = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(request, decoded);
    }
}
