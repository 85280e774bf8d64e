//! Document loading utilities
//!
//! This module provides `DocumentLoader` - a utility for loading manuscript text from files
//! or strings and compiling it. This is used by both the CLI and tests.
//!
//! # Example
//!
//! ```rust
//! use quill_parser::quill::loader::DocumentLoader;
//!
//! // From file
//! let compiled = DocumentLoader::from_path("novel.quill").unwrap().compile().unwrap();
//!
//! // From string, one chapter only
//! let compiled = DocumentLoader::from_string(source).with_chapter("3").compile().unwrap();
//! ```

use crate::quill::ast::Book;
use crate::quill::context::{CompilationContext, RenderFlags};
use crate::quill::error::ParseError;
use crate::quill::parsing::parse_book;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error that can occur when loading documents
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoaderError {
    /// IO error when reading file
    #[error("IO error: {0}")]
    IoError(String),
    /// Grammar or reference error in the manuscript
    #[error("{0}")]
    ParseError(#[from] ParseError),
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

/// A parsed book together with the context it was parsed in.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub book: Book,
    pub context: CompilationContext,
}

/// Document loader
///
/// Holds the source text plus the options of one compilation run.
pub struct DocumentLoader {
    source: String,
    chapter: Option<String>,
    flags: RenderFlags,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader::from_string(source))
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
            chapter: None,
            flags: RenderFlags::default(),
        }
    }

    /// Only keep the chapter with this id.
    pub fn with_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter = Some(chapter.into());
        self
    }

    /// Flags to start from; prelude pragmas are added on top.
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse the source into a [Book], with a fresh context.
    pub fn compile(&self) -> Result<Compilation, LoaderError> {
        let mut context = CompilationContext::with_flags(self.flags);
        let book = parse_book(&self.source, &mut context, self.chapter.as_deref())?;
        Ok(Compilation { book, context })
    }
}
