//! AST definitions for the quill format
//!
//!     A quill manuscript compiles to a [Book]: an optional [Prelude] with the title page
//!     metadata, followed by chapters. Chapters hold segments, segments hold paragraphs and a
//!     paragraph is a flat run of [Node]s. Nesting only happens inside a paragraph, through the
//!     inline formatting nodes (italics inside dialogue, small caps inside a block, and so on).
//!
//! Segments
//!
//!     A chapter body is normally a single segment. Transclusion (`%transclude id`) splits it:
//!     the paragraphs before the pragma form one segment, the referenced chapter's segments are
//!     spliced in, and the rest of the body continues in a new segment. Segments are reference
//!     counted so the spliced chapters share storage with the chapter they came from.
//!
//! Positions
//!
//!     Every node carries a [Position]: the 1-based source line, the line index inside its
//!     chapter body and the character offset where its chunk began. Positions are used for
//!     error reporting and for the lettrine rule (the first chunk of a chapter sits at chapter
//!     line 0, offset 0). Two nodes that differ only in position are [semantically
//!     equal](Node::semantically_eq), not `==`.

mod book;
mod node;
mod position;

pub use book::{Book, Chapter, Paragraph, Prelude, Segment};
pub use node::{nodes_semantically_eq, DashKind, Node, NodeKind};
pub use position::Position;
