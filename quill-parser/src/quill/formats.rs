//! Debug output formats for the AST
//!
//!     These views are for inspecting a parse, not for publishing. Publishing formats (plain
//!     text, HTML, LaTeX, EPUB sections) live in the quill-babel crate.

pub mod treeviz;

pub use treeviz::{to_json_string, to_treeviz_str};
