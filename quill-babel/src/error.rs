//! Error types for rendering

use quill_parser::quill::error::{ParseError, SourceLocation};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("unknown pragma '%{name}' at {location}")]
    UnknownPragma {
        name: String,
        location: SourceLocation,
    },
    #[error("transclusion of '{target}' at {location} includes itself")]
    TransclusionCycle {
        target: String,
        location: SourceLocation,
    },
    /// Raised by render-time transclusion.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
