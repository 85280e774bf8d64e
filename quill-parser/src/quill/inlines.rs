//! Inline parsing
//!
//!     Every non-blank line of a chapter body goes through the inline parser, which turns it
//!     into a flat sequence of nodes. Formatting nests: dialogue may hold italics, italics may
//!     hold small caps, and so on, with three limits:
//!
//!         - a delimiter cannot open inside a span of its own kind;
//!         - a block (`/`) only opens at the top level;
//!         - dialogue (`|`) only opens at the top level or one level down.
//!
//!     Unlike the block level, inline markup has no lookahead across lines. An unterminated
//!     span simply absorbs the rest of its line and the parse reports it as not closed.
//!
//!     See [parser] for the scanning rules and [delimiters] for the delimiter table.

pub mod delimiters;
pub mod parser;

pub use delimiters::{Delimiter, OpenTags};
pub use parser::{parse_span, parse_text, InlineParse, BODY_PRAGMAS};
