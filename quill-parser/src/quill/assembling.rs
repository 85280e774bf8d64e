//! Assembling module
//!
//!     The assembling stage turns parsed lines into the book structure. It works chapter by
//!     chapter: a separator line (`//!!!//`), a `##` title, then body lines until the next
//!     separator. Body lines are parsed inline, grouped into paragraphs at blank lines and
//!     merged.
//!
//!     Chapters with an id are recorded in the chapter registry the moment they are finished,
//!     which is what makes `%transclude id` work: a paragraph starting with that pragma splits
//!     the current chapter and splices in the registered segments of `id`. Only chapters that
//!     come earlier in the document can be transcluded.
//!
//! Stages:
//!
//!     - [title]: parses `##id (label) description` lines.
//!     - [paragraphs]: groups line results into merged paragraphs.
//!     - [chapters]: the chapter loop, body collection and transclusion splicing.

pub mod chapters;
pub mod paragraphs;
pub mod title;

pub use chapters::{is_chapter_separator, parse_chapters};
pub use paragraphs::group_paragraphs;
pub use title::ChapterTitle;
