//! The render engine
//!
//!     A [Renderer] pairs a [Format] with the [CompilationContext] the book was parsed in and
//!     walks the book:
//!
//!         chapter header, then per segment, per paragraph: the paragraph's nodes rendered by
//!         the format, wrapped by the format, followed by a blank line.
//!
//!     Formats render composite nodes by calling back into a [RenderScope], which carries the
//!     recursion depth and gives access to the flags and the chapter registry.
//!
//! Speaker continuation
//!
//!     A paragraph's speaker is the tag of its first node when that node is dialogue. When two
//!     consecutive paragraphs of a segment share a speaker, the first one's closing quotation
//!     mark is left off: the speech runs on into the next paragraph. Only the last top-level
//!     node of the first paragraph is told about it, never nested content.

use crate::error::FormatError;
use crate::format::Format;
use quill_parser::quill::ast::{Book, Chapter, Node, NodeKind, Paragraph, Position, Segment};
use quill_parser::quill::context::{CompilationContext, RenderFlags};
use serde::Serialize;
use std::cell::RefCell;
use tracing::debug;

/// EPUB packaging puts the title and contents pages first.
pub const FIRST_CHAPTER_INDEX: usize = 3;

/// One chapter rendered on its own, for an external EPUB packager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedChapter {
    pub index: usize,
    pub id: Option<String>,
    pub label: String,
    pub file_name: String,
    pub content: String,
}

/// Everything an EPUB packager needs: the book's metadata and its rendered chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPackage {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub chapters: Vec<RenderedChapter>,
}

pub struct Renderer<'a> {
    format: &'a dyn Format,
    context: &'a CompilationContext,
    /// Chapters being transcluded, outermost first.
    transcluding: RefCell<Vec<String>>,
}

impl<'a> Renderer<'a> {
    pub fn new(format: &'a dyn Format, context: &'a CompilationContext) -> Self {
        Self {
            format,
            context,
            transcluding: RefCell::new(Vec::new()),
        }
    }

    pub fn format(&self) -> &dyn Format {
        self.format
    }

    pub fn flags(&self) -> &RenderFlags {
        &self.context.flags
    }

    /// Chapters only, no prelude or closing.
    pub fn render(&self, book: &Book) -> Result<String, FormatError> {
        let total = book.chapters.len();
        let mut output = String::new();
        for chapter in &book.chapters {
            output.push_str(&self.render_chapter(chapter, total)?);
        }
        Ok(output)
    }

    /// Prelude, chapters and closing, passed through the format's final pass.
    pub fn render_document(&self, book: &Book) -> Result<String, FormatError> {
        let mut output = self.format.render_prelude(&book.prelude, self.flags());
        output.push_str(&self.render(book)?);
        output.push_str(&self.format.render_closing());
        debug!(format = self.format.name(), bytes = output.len(), "rendered document");
        Ok(self.format.finish(output))
    }

    /// Every chapter as its own document body, numbered from [FIRST_CHAPTER_INDEX].
    pub fn render_chapters(&self, book: &Book) -> Result<Vec<RenderedChapter>, FormatError> {
        let total = book.chapters.len();
        book.chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| {
                let index = FIRST_CHAPTER_INDEX + i;
                let content = self.format.finish(self.render_chapter(chapter, total)?);
                Ok(RenderedChapter {
                    index,
                    id: chapter.id.clone(),
                    label: chapter.label.clone(),
                    file_name: format!("section{:04}.html", index),
                    content,
                })
            })
            .collect()
    }

    /// [Renderer::render_chapters] plus the prelude's metadata.
    pub fn render_package(&self, book: &Book) -> Result<RenderedPackage, FormatError> {
        Ok(RenderedPackage {
            title: book.prelude.title.clone(),
            author: book.prelude.author.clone(),
            date: book.prelude.date.clone(),
            chapters: self.render_chapters(book)?,
        })
    }

    pub fn render_chapter(&self, chapter: &Chapter, total: usize) -> Result<String, FormatError> {
        if let Some(id) = &chapter.id {
            self.transcluding.borrow_mut().push(id.clone());
        }
        let body = self.render_chapter_body(chapter);
        if chapter.id.is_some() {
            self.transcluding.borrow_mut().pop();
        }

        let mut output = self.format.render_chapter_header(chapter, total);
        output.push_str(&body?);
        Ok(output)
    }

    fn render_chapter_body(&self, chapter: &Chapter) -> Result<String, FormatError> {
        let mut output = String::new();
        for segment in &chapter.segments {
            output.push_str(&self.render_segment(segment, 0)?);
        }
        Ok(output)
    }

    pub fn render_segment(&self, paragraphs: &[Paragraph], depth: usize) -> Result<String, FormatError> {
        let mut output = String::new();
        for (i, paragraph) in paragraphs.iter().enumerate() {
            let continues = paragraphs
                .get(i + 1)
                .is_some_and(|next| same_speaker(paragraph, next));
            let body = self.render_nodes(paragraph, continues, depth)?;
            output.push_str(&self.format.render_paragraph(body, depth));
            output.push_str("\n\n");
        }
        Ok(output)
    }

    /// Renders sibling nodes; only the last one may be told the speaker continues.
    fn render_nodes(&self, nodes: &[Node], continues: bool, depth: usize) -> Result<String, FormatError> {
        let scope = RenderScope {
            renderer: self,
            depth,
        };
        let last = nodes.len().saturating_sub(1);
        let mut output = String::new();
        for (i, node) in nodes.iter().enumerate() {
            output.push_str(&self.format.render_node(node, &scope, continues && i == last)?);
        }
        Ok(output)
    }
}

fn speaker(paragraph: &[Node]) -> Option<char> {
    match paragraph.first()?.kind() {
        NodeKind::Dialog { attrib, .. } => *attrib,
        _ => None,
    }
}

fn same_speaker(paragraph: &[Node], next: &[Node]) -> bool {
    matches!((speaker(paragraph), speaker(next)), (Some(a), Some(b)) if a == b)
}

/// Handed to [Format::render_node] for recursion.
pub struct RenderScope<'r> {
    renderer: &'r Renderer<'r>,
    depth: usize,
}

impl<'r> RenderScope<'r> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn flags(&self) -> &RenderFlags {
        self.renderer.flags()
    }

    /// Renders nested content one level deeper, without speaker continuation.
    pub fn render_children(&self, children: &[Node]) -> Result<String, FormatError> {
        self.renderer.render_nodes(children, false, self.depth + 1)
    }

    /// Render-time transclusion for pragmas that were not spliced while parsing.
    pub fn transclude(&self, target: &str, position: Position) -> Result<String, FormatError> {
        let segments = self
            .renderer
            .context
            .resolve_transclusion(target, position)?;
        if self.renderer.transcluding.borrow().iter().any(|id| id == target) {
            return Err(FormatError::TransclusionCycle {
                target: target.to_string(),
                location: position.into(),
            });
        }
        debug!(%target, "transcluding at render time");

        self.renderer.transcluding.borrow_mut().push(target.to_string());
        let rendered = self.render_segments(segments);
        self.renderer.transcluding.borrow_mut().pop();
        rendered
    }

    fn render_segments(&self, segments: &[Segment]) -> Result<String, FormatError> {
        let mut output = String::new();
        for segment in segments {
            output.push_str(&self.renderer.render_segment(segment, self.depth + 1)?);
        }
        Ok(output)
    }
}
