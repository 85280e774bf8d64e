//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::render::{RenderedChapter, RenderedPackage, Renderer};
use quill_parser::quill::ast::Book;
use quill_parser::quill::context::CompilationContext;
use std::collections::HashMap;

/// Registry of output formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let html = registry.render(&book, &context, "html")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Render a whole document (prelude, chapters, closing) in the named format
    pub fn render(
        &self,
        book: &Book,
        context: &CompilationContext,
        format: &str,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        Renderer::new(fmt, context).render_document(book)
    }

    /// Render each chapter separately in the named format
    pub fn render_chapters(
        &self,
        book: &Book,
        context: &CompilationContext,
        format: &str,
    ) -> Result<Vec<RenderedChapter>, FormatError> {
        let fmt = self.get(format)?;
        Renderer::new(fmt, context).render_chapters(book)
    }

    /// Render each chapter separately, together with the book's metadata
    pub fn render_package(
        &self,
        book: &Book,
        context: &CompilationContext,
        format: &str,
    ) -> Result<RenderedPackage, FormatError> {
        let fmt = self.get(format)?;
        Renderer::new(fmt, context).render_package(book)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::TextFormat);
        registry.register(crate::formats::HtmlFormat);
        registry.register(crate::formats::EpubFormat::default());
        registry.register(crate::formats::LatexFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderScope;
    use quill_parser::quill::ast::{Chapter, Node};
    use quill_parser::quill::parsing::parse_document;

    // Test format
    struct TestFormat;
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test format"
        }
        fn render_node(
            &self,
            _node: &Node,
            _scope: &RenderScope<'_>,
            _continues_speaker: bool,
        ) -> Result<String, FormatError> {
            Ok("x".to_string())
        }
        fn render_chapter_header(&self, _chapter: &Chapter, _total: usize) -> String {
            "#".to_string()
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let format = registry.get("test");
        assert!(format.is_ok());
        assert_eq!(format.unwrap().name(), "test");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_render() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let (book, context) = parse_document("//!!!//\n##1 (One)\nHello.").unwrap();
        let output = registry.render(&book, &context, "test").unwrap();
        assert_eq!(output, "#x\n\n");
    }

    #[test]
    fn test_registry_render_not_found() {
        let registry = FormatRegistry::new();
        let (book, context) = parse_document("").unwrap();

        let result = registry.render(&book, &context, "nonexistent");
        assert!(matches!(result, Err(FormatError::FormatNotFound(_))));
    }

    #[test]
    fn test_registry_render_chapters() {
        let registry = FormatRegistry::default();
        let (book, context) =
            parse_document("//!!!//\n##1 (One)\nA.\n//!!!//\n##2 (Two)\nB.").unwrap();

        let chapters = registry.render_chapters(&book, &context, "epub").unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].index, 4);
    }

    #[test]
    fn test_registry_render_package() {
        let registry = FormatRegistry::default();
        let (book, context) =
            parse_document(":Title: Road\n:Date: 1999\n//!!!//\n##1 (One)\nA.").unwrap();

        let package = registry.render_package(&book, &context, "epub").unwrap();
        assert_eq!(package.title.as_deref(), Some("Road"));
        assert_eq!(package.author, None);
        assert_eq!(package.date.as_deref(), Some("1999"));
        assert_eq!(package.chapters.len(), 1);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["epub", "html", "tex", "txt"]);
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        registry.register(TestFormat); // Replace

        assert_eq!(registry.list_formats().len(), 1);
    }
}
