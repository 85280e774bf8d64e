//! Parsing entry points
//!
//!     [parse_book] runs the whole pipeline over a source string:
//!
//!         preprocess -> prelude -> chapters (inline parse, merge, group, transclude)
//!
//!     The caller owns the [CompilationContext]; prelude pragmas land in its flags and finished
//!     chapters in its registry, so the same context is then handed to the renderer.

use crate::quill::assembling::parse_chapters;
use crate::quill::ast::Book;
use crate::quill::context::CompilationContext;
use crate::quill::error::ParseResult;
use crate::quill::prelude::parse_prelude;
use crate::quill::preprocess::preprocess;
use tracing::debug;

/// Parses `source`, optionally keeping only the chapter with id `selected`.
pub fn parse_book(
    source: &str,
    context: &mut CompilationContext,
    selected: Option<&str>,
) -> ParseResult<Book> {
    context.begin_run();

    let lines = preprocess(source);
    debug!(lines = lines.len(), "preprocessed source");

    let (prelude, rest) = parse_prelude(lines, &mut context.flags)?;
    let chapters = parse_chapters(&rest, context, selected)?;

    Ok(Book { prelude, chapters })
}

/// Parses `source` with a fresh context.
pub fn parse_document(source: &str) -> ParseResult<(Book, CompilationContext)> {
    let mut context = CompilationContext::new();
    let book = parse_book(source, &mut context, None)?;
    Ok((book, context))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let source = ":Title: Sample\n:Author: Someone\n%lettrine\n\n//!!!//\n##1 (One)\nHello.";
        let (book, context) = parse_document(source).unwrap();

        assert_eq!(book.prelude.title.as_deref(), Some("Sample"));
        assert_eq!(book.chapters.len(), 1);
        assert!(context.flags.lettrine);
    }

    #[test]
    fn test_runs_do_not_share_registry() {
        let mut context = CompilationContext::new();
        parse_book("//!!!//\n##a (A)\nText.", &mut context, None).unwrap();
        assert!(context.registry.contains("a"));

        let err = parse_book("//!!!//\n##b (B)\n%transclude a", &mut context, None).unwrap_err();
        assert!(err.is_reference());
    }
}
