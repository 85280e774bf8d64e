//! Plain text format
//!
//!     Text keeps the manuscript's own punctuation conventions: TeX-style quotes, `*` around
//!     italics, small caps shouted in upper case. Blocks are indented with a tab.

use crate::error::FormatError;
use crate::format::{render_pragma, Format};
use crate::render::RenderScope;
use quill_parser::quill::ast::{Chapter, DashKind, Node, NodeKind, Prelude};
use quill_parser::quill::context::RenderFlags;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "txt"
    }

    fn description(&self) -> &str {
        "Plain text"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn render_node(
        &self,
        node: &Node,
        scope: &RenderScope<'_>,
        continues_speaker: bool,
    ) -> Result<String, FormatError> {
        let rendered = match node.kind() {
            NodeKind::LineBreak => "\n".to_string(),
            NodeKind::Todo => "--TODO--\n\n".to_string(),
            NodeKind::Regular(text) => text.clone(),
            NodeKind::SmallCaps(children) => scope.render_children(children)?.to_uppercase(),
            NodeKind::Italics(children) => format!("*{}*", scope.render_children(children)?),
            NodeKind::Escape(children) => scope.render_children(children)?,
            NodeKind::Block { children, .. } => {
                format!("\t{}\n", scope.render_children(children)?)
            }
            NodeKind::Dialog { children, .. } => {
                let close = if continues_speaker { "" } else { "''" };
                format!("``{}{}", scope.render_children(children)?, close)
            }
            NodeKind::Dashquote { children, kind } => {
                let dash = match kind {
                    DashKind::Single => "— ",
                    DashKind::Double => "    — ",
                };
                format!("{}{}", dash, scope.render_children(children)?)
            }
            NodeKind::SingleQuote(children) => format!("`{}'", scope.render_children(children)?),
            NodeKind::DoubleQuote(children) => {
                format!("``{}''", scope.render_children(children)?)
            }
            NodeKind::Pragma { .. } => render_pragma(node, scope, "\n\n")?,
            NodeKind::BeatSeparator => "***\n\n".to_string(),
        };
        Ok(rendered)
    }

    fn render_chapter_header(&self, chapter: &Chapter, total_chapters: usize) -> String {
        if total_chapters == 1 {
            "******\n\n".to_string()
        } else {
            format!("******\n{}\n******\n\n", chapter.label.to_uppercase())
        }
    }

    fn render_prelude(&self, prelude: &Prelude, _flags: &RenderFlags) -> String {
        let mut output = String::new();
        if let Some(title) = &prelude.title {
            output.push_str(&format!("\n{}\n\n", title));
        }
        if let Some(author) = &prelude.author {
            output.push_str(&format!("by {}\n\n", author));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;
    use quill_parser::quill::parsing::parse_document;
    use rstest::rstest;

    fn render(body: &str) -> String {
        let source = format!("//!!!//\n##1 (One)\n{}", body);
        let (book, context) = parse_document(&source).unwrap();
        Renderer::new(&TextFormat, &context).render(&book).unwrap()
    }

    #[rstest]
    #[case("*italic*", "*italic*")]
    #[case("@small@ caps", "SMALL caps")]
    #[case("{mono}", "mono")]
    #[case("/a block/", "\ta block\n")]
    #[case("`single'", "`single'")]
    #[case("``double''", "``double''")]
    #[case(">said", "— said")]
    #[case(">>said", "    — said")]
    #[case("//-", "***\n\n")]
    #[case("---", "--TODO--\n\n")]
    #[case("%lit raw", "raw")]
    #[case("%skipline", "\n\n")]
    fn test_node_strings(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(render(body), format!("******\n\n{}\n\n", expected));
    }

    #[test]
    fn test_headers() {
        let chapter = Chapter {
            id: None,
            label: "The Start".to_string(),
            description: None,
            segments: vec![],
        };
        assert_eq!(TextFormat.render_chapter_header(&chapter, 1), "******\n\n");
        assert_eq!(
            TextFormat.render_chapter_header(&chapter, 2),
            "******\nTHE START\n******\n\n"
        );
    }

    #[test]
    fn test_prelude() {
        let prelude = Prelude {
            title: Some("T".to_string()),
            author: Some("A".to_string()),
            date: None,
        };
        assert_eq!(
            TextFormat.render_prelude(&prelude, &RenderFlags::default()),
            "\nT\n\nby A\n\n"
        );
        assert_eq!(
            TextFormat.render_prelude(&Prelude::default(), &RenderFlags::default()),
            ""
        );
    }

    #[test]
    fn test_lettrine_leaves_text_alone() {
        let source = ":Title: T\n%lettrine\n//!!!//\n##1 (One)\nOnce upon a time.";
        let (book, context) = parse_document(source).unwrap();
        let output = Renderer::new(&TextFormat, &context).render(&book).unwrap();
        assert_eq!(output, "******\n\nOnce upon a time.\n\n");
    }
}
