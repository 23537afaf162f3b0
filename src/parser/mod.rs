//! Structural parsing of LaTeX résumés
//!
//! This module converts raw LaTeX text into a [`crate::document::Document`]
//! with a tree of typed nodes (section, entry, item), each carrying a stable
//! synthetic identifier for the lifetime of one parse.
//!
//! Key design principles:
//! - Line scanning with a stack of open structural contexts
//! - Spans found by brace balancing, never by single-line text search
//! - Identifiers minted at node creation, in one forward pass
//! - Round-trip fidelity: unrecognized lines stay raw and untouched

pub mod latex;
pub(crate) mod scan;

pub use latex::ResumeParser;
