//! Per-run compilation state
//!
//!     Everything that outlives a single line but not a single compilation lives in a
//!     [CompilationContext]: the rendering flags set by the prelude, the chapter registry used by
//!     transclusion, and the structural warnings raised along the way. A context is created for
//!     each run and threaded explicitly through prelude parsing, assembly and rendering, so two
//!     compilations never observe each other.

use crate::quill::ast::Segment;
use crate::quill::error::{ParseError, ParseResult, SourceLocation, StructuralWarning};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Global switches set by `%pragma` lines in the prelude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderFlags {
    pub lettrine: bool,
    pub alt_style: bool,
    pub print_numbering: bool,
    pub skip_tests: bool,
}

impl RenderFlags {
    pub const PRAGMAS: [&'static str; 4] = ["lettrine", "altstyle", "printnum", "skiptests"];

    /// Sets the flag named by a prelude pragma. Returns false for unknown names.
    pub fn apply_pragma(&mut self, name: &str) -> bool {
        match name {
            "lettrine" => self.lettrine = true,
            "altstyle" => self.alt_style = true,
            "printnum" => self.print_numbering = true,
            "skiptests" => self.skip_tests = true,
            _ => return false,
        }
        true
    }
}

/// Chapter id to the finalized segments of that chapter.
#[derive(Debug, Clone, Default)]
pub struct ChapterRegistry {
    chapters: HashMap<String, Vec<Segment>>,
}

impl ChapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a chapter. A later chapter with the same id replaces the earlier one.
    pub fn insert(&mut self, id: impl Into<String>, segments: &[Segment]) {
        self.chapters.insert(id.into(), segments.to_vec());
    }

    pub fn get(&self, id: &str) -> Option<&[Segment]> {
        self.chapters.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.chapters.contains_key(id)
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.chapters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn clear(&mut self) {
        self.chapters.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompilationContext {
    pub flags: RenderFlags,
    pub registry: ChapterRegistry,
    warnings: Vec<StructuralWarning>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(flags: RenderFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    /// Empties the registry and warnings ahead of a new run. Flags are kept.
    pub fn begin_run(&mut self) {
        self.registry.clear();
        self.warnings.clear();
    }

    pub fn warn(&mut self, warning: StructuralWarning) {
        warn!(line = ?warning.line, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[StructuralWarning] {
        &self.warnings
    }

    /// Segments of a registered chapter, or a reference error at `location`.
    pub fn resolve_transclusion(
        &self,
        target: &str,
        location: impl Into<SourceLocation>,
    ) -> ParseResult<&[Segment]> {
        self.registry
            .get(target)
            .ok_or_else(|| ParseError::reference(target, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quill::ast::{Node, Position};
    use std::sync::Arc;

    fn segment(text: &str) -> Segment {
        Arc::new(vec![vec![Node::regular(text, Position::default())]])
    }

    #[test]
    fn test_apply_pragma() {
        let mut flags = RenderFlags::default();
        assert!(flags.apply_pragma("lettrine"));
        assert!(flags.apply_pragma("printnum"));
        assert!(!flags.apply_pragma("lettrines"));
        assert!(flags.lettrine && flags.print_numbering);
        assert!(!flags.alt_style && !flags.skip_tests);
    }

    #[test]
    fn test_registry_shares_segments() {
        let mut registry = ChapterRegistry::new();
        let segments = vec![segment("a")];
        registry.insert("one", &segments);

        let stored = registry.get("one").unwrap();
        assert!(Arc::ptr_eq(&stored[0], &segments[0]));
    }

    #[test]
    fn test_registry_ids_sorted() {
        let mut registry = ChapterRegistry::new();
        registry.insert("b", &[segment("x")]);
        registry.insert("a", &[segment("y")]);
        assert_eq!(registry.ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_resolve_missing_transclusion() {
        let context = CompilationContext::new();
        let err = context
            .resolve_transclusion("nope", SourceLocation::line(5))
            .unwrap_err();
        assert!(err.is_reference());
    }

    #[test]
    fn test_begin_run_keeps_flags() {
        let mut context = CompilationContext::new();
        context.flags.lettrine = true;
        context.registry.insert("a", &[segment("x")]);
        context.warn(StructuralWarning::new("end of book", Some(3)));

        context.begin_run();

        assert!(context.flags.lettrine);
        assert!(context.registry.is_empty());
        assert!(context.warnings().is_empty());
    }
}
