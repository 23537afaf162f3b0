#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

uniffi::setup_scaffolding!();

pub mod document;
pub mod edit;
pub mod error;
pub mod escape;
pub mod ffi;
pub mod parser;
pub mod session;

// Re-export common error types for convenience
pub use error::{
    EditError, EditResult, ParseError, ParseResult, SnapshotError, SnapshotResult, TailorError,
    TailorResult,
};
