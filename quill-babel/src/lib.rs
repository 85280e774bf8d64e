//! Output formats for quill manuscripts
//!
//!     This crate renders a parsed [Book](quill_parser::quill::ast::Book) into the publishing
//!     formats: plain text, HTML, per-chapter HTML for EPUB packaging, and a LaTeX fragment.
//!
//! Architecture
//!
//!     - Format trait: what a format decides (the string for each node, chapter headers,
//!       document framing)
//!     - Renderer: the format-agnostic walk over chapters, segments and paragraphs, including
//!       speaker continuation and render-time transclusion
//!     - FormatRegistry: discovery and selection of formats by name
//!
//!     This is a pure lib: it powers quill-cli but is shell agnostic. No code here prints,
//!     reads env vars or touches files. Packaging the EPUB or running LaTeX happens elsewhere.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── render.rs               # Renderer and RenderScope
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── text
//!     │   ├── html
//!     │   ├── epub                # html nodes, packaging-friendly headers
//!     │   └── latex
//!     ├── lib.rs
//!
//! Testing
//!
//!     Unit tests sit next to each format. tests/ holds whole-document rendering of the samples
//!     from quill-parser.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod render;

pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use render::{RenderScope, RenderedChapter, RenderedPackage, Renderer};
