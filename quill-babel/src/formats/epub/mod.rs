//! EPUB chapter format
//!
//!     Renders each chapter as an HTML body fragment for an external EPUB packager. Nodes look
//!     exactly as in [HtmlFormat]; chapters are announced with a title div, and there is no page
//!     framing because the packager supplies it. Use with
//!     [Renderer::render_chapters](crate::render::Renderer::render_chapters).

use super::html::{escape_html, replace_typography, HtmlFormat};
use crate::error::FormatError;
use crate::format::Format;
use crate::render::RenderScope;
use quill_parser::quill::ast::{Chapter, Node};

#[derive(Debug, Clone, Copy, Default)]
pub struct EpubFormat {
    html: HtmlFormat,
}

impl Format for EpubFormat {
    fn name(&self) -> &str {
        "epub"
    }

    fn description(&self) -> &str {
        "Per-chapter HTML bodies for EPUB packaging"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xhtml"]
    }

    fn render_node(
        &self,
        node: &Node,
        scope: &RenderScope<'_>,
        continues_speaker: bool,
    ) -> Result<String, FormatError> {
        self.html.node(node, scope, continues_speaker)
    }

    fn render_chapter_header(&self, chapter: &Chapter, total_chapters: usize) -> String {
        if total_chapters == 1 {
            String::new()
        } else {
            format!("<div class='title'>{}</div>\n", escape_html(&chapter.label))
        }
    }

    fn render_paragraph(&self, body: String, depth: usize) -> String {
        self.html.paragraph(body, depth)
    }

    fn finish(&self, document: String) -> String {
        replace_typography(&document)
    }
}
