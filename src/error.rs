//! Error types for the tailor library
//!
//! This module provides centralized error handling using `thiserror` across all components

use thiserror::Error;

/// Parse-related errors
///
/// Any parse failure is terminal: no [`crate::document::Document`] is produced.
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum ParseError {
    /// A structural command's argument braces never balance
    #[error("Unbalanced braces in {command} starting at line {line}")]
    UnbalancedBraces { line: u64, command: String },

    /// An item list was opened but never closed
    #[error("Item list opened at line {line} is never closed")]
    UnclosedList { line: u64 },

    /// Other parsing errors
    #[error("Parse error: {0}")]
    Other(String),
}

impl ParseError {
    /// Create an unbalanced-braces error for a command starting at a line (1-based)
    pub fn unbalanced_braces(line: u64, command: impl Into<String>) -> Self {
        Self::UnbalancedBraces {
            line,
            command: command.into(),
        }
    }

    /// Create an unclosed-list error at a line (1-based)
    #[must_use]
    pub const fn unclosed_list(line: u64) -> Self {
        Self::UnclosedList { line }
    }

    /// Create a generic parse error
    pub fn other(reason: impl Into<String>) -> Self {
        Self::Other(reason.into())
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Per-edit errors
///
/// These are isolated to a single edit request: one failing request yields one
/// failed outcome and does not prevent the rest of the batch from running.
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum EditError {
    /// The identifier belongs to this parse session but no node carries it
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// The identifier was minted by a different parse session
    #[error("Stale identifier from another parse: {0}")]
    StaleIdentifier(String),

    /// The target line number is outside the document
    #[error("Line {line} out of range (document has {line_count} lines)")]
    LineOutOfRange { line: u64, line_count: u64 },

    /// The request is structurally invalid (e.g. a modify without text)
    #[error("Malformed edit request: {0}")]
    MalformedRequest(String),

    /// The node's recorded span no longer brace-balances on re-scan
    #[error("Span for node {0} is no longer balanced")]
    UnbalancedWrapper(String),

    /// The target's lines overlap an edit already applied in this batch
    #[error("Edit for {0} overlaps another edit in the batch")]
    ConflictingEdit(String),
}

impl EditError {
    /// Create an unknown-identifier error
    pub fn unknown_identifier(id: impl Into<String>) -> Self {
        Self::UnknownIdentifier(id.into())
    }

    /// Create a stale-identifier error
    pub fn stale_identifier(id: impl Into<String>) -> Self {
        Self::StaleIdentifier(id.into())
    }

    /// Create a line-out-of-range error (1-based line number)
    #[must_use]
    pub const fn line_out_of_range(line: u64, line_count: u64) -> Self {
        Self::LineOutOfRange { line, line_count }
    }

    /// Create a malformed-request error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRequest(reason.into())
    }

    /// Create an unbalanced-wrapper error
    pub fn unbalanced_wrapper(id: impl Into<String>) -> Self {
        Self::UnbalancedWrapper(id.into())
    }

    /// Create a conflicting-edit error
    pub fn conflicting(target: impl Into<String>) -> Self {
        Self::ConflictingEdit(target.into())
    }
}

/// Result type for resolving and applying a single edit
pub type EditResult<T> = Result<T, EditError>;

/// Snapshot encoding errors
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum SnapshotError {
    /// Encoding the outline to CBOR failed
    #[error("Snapshot encoding failed: {0}")]
    EncodeFailed(String),

    /// Decoding an outline from CBOR failed
    #[error("Snapshot decoding failed: {0}")]
    DecodeFailed(String),
}

impl SnapshotError {
    /// Create an encode-failed error
    pub fn encode_failed(reason: impl Into<String>) -> Self {
        Self::EncodeFailed(reason.into())
    }

    /// Create a decode-failed error
    pub fn decode_failed(reason: impl Into<String>) -> Self {
        Self::DecodeFailed(reason.into())
    }
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Main unified error type that can represent any tailor error
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum TailorError {
    /// Parsing error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Per-edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Snapshot error
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

impl TailorError {
    /// Create a generic error
    pub fn other(reason: impl Into<String>) -> Self {
        Self::Other(reason.into())
    }
}

/// Result type for tailor operations
pub type TailorResult<T> = Result<T, TailorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_unbalanced_braces() {
        let err = ParseError::unbalanced_braces(17, "\\resumeItem");
        assert!(err.to_string().contains("line 17"));
        assert!(err.to_string().contains("\\resumeItem"));
    }

    #[test]
    fn test_parse_error_unclosed_list() {
        let err = ParseError::unclosed_list(9);
        assert!(err.to_string().contains("line 9"));
    }

    #[test]
    fn test_edit_error_line_out_of_range() {
        let err = EditError::line_out_of_range(120, 80);
        assert!(err.to_string().contains("120"));
        assert!(err.to_string().contains("80"));
    }

    #[test]
    fn test_edit_error_stale_identifier() {
        let err = EditError::stale_identifier("deadbeef-0011");
        assert!(err.to_string().contains("another parse"));
        assert!(err.to_string().contains("deadbeef-0011"));
    }

    #[test]
    fn test_tailor_error_from_parse_error() {
        let parse_err = ParseError::other("test error");
        let err: TailorError = parse_err.into();
        assert!(err.to_string().contains("test error"));
    }

    #[test]
    fn test_tailor_error_from_edit_error() {
        let edit_err = EditError::unknown_identifier("abc123");
        let err: TailorError = edit_err.into();
        assert!(err.to_string().contains("abc123"));
    }
}
