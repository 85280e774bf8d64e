//! HTML format
//!
//!     Produces a standalone page: the prelude opens the document with an embedded stylesheet
//!     and the title header, top-level paragraphs become `<p>` elements, and the closing tag
//!     ends it. Nested paragraphs (from render-time transclusion) are not wrapped again.
//!
//!     The final pass turns `---` into an em dash and `(TM)` into a trademark sign.

use crate::error::FormatError;
use crate::format::{render_pragma, split_initial, wants_lettrine, Format};
use crate::render::RenderScope;
use quill_parser::quill::ast::{Chapter, DashKind, Node, NodeKind, Prelude};
use quill_parser::quill::context::RenderFlags;

const STYLESHEET: &str = include_str!("../../../css/manuscript.css");

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// `---` to an em dash, `(TM)` to ™.
pub fn replace_typography(document: &str) -> String {
    document.replace("---", "—").replace("(TM)", "™")
}

fn lettrine(text: &str) -> String {
    match split_initial(text) {
        Some((initial, word, "")) => format!(
            "<span class=\"lettrine\">{}</span>{}",
            escape_html(&initial.to_string()),
            escape_html(word)
        ),
        Some((initial, word, rest)) => format!(
            "<span class=\"lettrine\">{}</span>{} {}",
            escape_html(&initial.to_string()),
            escape_html(word),
            escape_html(rest)
        ),
        None => escape_html(text),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl HtmlFormat {
    /// Node strings shared with the EPUB format.
    pub(crate) fn node(
        &self,
        node: &Node,
        scope: &RenderScope<'_>,
        continues_speaker: bool,
    ) -> Result<String, FormatError> {
        let rendered = match node.kind() {
            NodeKind::LineBreak => "<br/>".to_string(),
            NodeKind::Todo => "--TODO--<br/><br/>".to_string(),
            NodeKind::Regular(text) if wants_lettrine(node, scope.flags()) => lettrine(text),
            NodeKind::Regular(text) => escape_html(text),
            NodeKind::SmallCaps(children) => format!(
                "<span style=\"font-variant: small-caps;\">{}</span>",
                scope.render_children(children)?
            ),
            NodeKind::Italics(children) => format!("<i>{}</i>", scope.render_children(children)?),
            NodeKind::Escape(children) => {
                format!("<code>{}</code>", scope.render_children(children)?)
            }
            NodeKind::Block { children, .. } => format!(
                "<div style=\"margin-left:2em\">{}</div>",
                scope.render_children(children)?
            ),
            NodeKind::Dialog { children, .. } => {
                let close = if continues_speaker { "" } else { "”" };
                format!("“{}{}", scope.render_children(children)?, close)
            }
            NodeKind::Dashquote { children, kind } => {
                let class = match kind {
                    DashKind::Single => "dashquote",
                    DashKind::Double => "dashquote dashquote-double",
                };
                format!(
                    "<span class=\"{}\">—</span>&nbsp;{}",
                    class,
                    scope.render_children(children)?
                )
            }
            NodeKind::SingleQuote(children) => format!("‘{}’", scope.render_children(children)?),
            NodeKind::DoubleQuote(children) => format!("“{}”", scope.render_children(children)?),
            NodeKind::Pragma { .. } => render_pragma(node, scope, "<br/><br/>")?,
            NodeKind::BeatSeparator => "<p class=\"beat\">***</p>".to_string(),
        };
        Ok(rendered)
    }

    /// Only top-level paragraphs become `<p>`; a lone beat already is one.
    pub(crate) fn paragraph(&self, body: String, depth: usize) -> String {
        if depth == 0 && !body.starts_with("<p") && !body.starts_with("<div") {
            format!("<p>{}</p>", body)
        } else {
            body
        }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone HTML page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn render_node(
        &self,
        node: &Node,
        scope: &RenderScope<'_>,
        continues_speaker: bool,
    ) -> Result<String, FormatError> {
        self.node(node, scope, continues_speaker)
    }

    fn render_chapter_header(&self, chapter: &Chapter, total_chapters: usize) -> String {
        if total_chapters == 1 {
            "<h3>*****</h3>\n".to_string()
        } else {
            format!("<h3>{}</h3>\n", escape_html(&chapter.label))
        }
    }

    fn render_paragraph(&self, body: String, depth: usize) -> String {
        self.paragraph(body, depth)
    }

    fn render_prelude(&self, prelude: &Prelude, _flags: &RenderFlags) -> String {
        let title = prelude.title.as_deref().map(escape_html);
        let mut output = String::new();
        output.push_str(&format!(
            "<!--DATE:{}-->\n<!--TITLE:{}-->\n",
            prelude.date.as_deref().unwrap_or("NO DATE"),
            prelude.title.as_deref().unwrap_or("NO TITLE")
        ));
        output.push_str("<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        if let Some(title) = &title {
            output.push_str(&format!("<title>{}</title>\n", title));
        }
        output.push_str(&format!("<style>\n{}</style>\n", STYLESHEET));
        output.push_str("</head>\n<body>\n");
        if let Some(title) = &title {
            output.push_str(&format!("<h1>{}</h1>\n", title));
        }
        if let Some(author) = &prelude.author {
            output.push_str(&format!(
                "<div class=\"author\">by {}</div>\n",
                escape_html(author)
            ));
        }
        output
    }

    fn render_closing(&self) -> String {
        "<p class=\"beat\">***</p>\n</body>\n</html>\n".to_string()
    }

    fn finish(&self, document: String) -> String {
        replace_typography(&document)
    }
}
