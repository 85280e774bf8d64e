//! LaTeX format
//!
//!     Renders the chapters as a LaTeX fragment meant to be `\input` into a memoir-style book
//!     template that defines `\secbreak`, `\altfonts`, `\letterfont` and `\chapfont`. The
//!     fragment has no framing of its own; the title and author pages are produced separately
//!     by [LatexFormat::title_page] and [LatexFormat::author_page].
//!
//!     Regular text is escaped as it is rendered (see [escape]), so pragma `lit` arguments are
//!     the only way to pass raw LaTeX through.

pub mod escape;

use crate::error::FormatError;
use crate::format::{render_pragma, split_initial, wants_lettrine, Format};
use crate::render::RenderScope;
use escape::escape_latex;
use quill_parser::quill::ast::{Chapter, DashKind, Node, NodeKind, Prelude};
use quill_parser::quill::context::RenderFlags;

#[derive(Debug, Clone, Copy, Default)]
pub struct LatexFormat;

impl LatexFormat {
    /// Title page. `printnum` moves it into the front matter; `altstyle` sets it in the
    /// chapter font.
    pub fn title_page(prelude: &Prelude, flags: &RenderFlags) -> String {
        let matter = if flags.print_numbering {
            "\\frontmatter"
        } else {
            "\\mainmatter"
        };
        let font = if flags.alt_style {
            "\\chapfont"
        } else {
            "\\scshape{}"
        };
        format!(
            "{}\\thispagestyle{{empty}}\\mbox{{}}\\vspace{{2in}}\\noindent\\begin{{flushright}}{{\\HUGE{}\\let\\clearpage\\relax {}}}\\\\\n\\end{{flushright}}\\vspace{{6\\baselineskip}}",
            matter,
            font,
            escape_latex(prelude.title.as_deref().unwrap_or_default())
        )
    }

    pub fn author_page(prelude: &Prelude) -> String {
        format!(
            "\\hfill{{\\Large\\scshape{{}}\\let\\clearpage\\relax {}}}\\cleartoverso",
            escape_latex(prelude.author.as_deref().unwrap_or_default())
        )
    }
}

fn lettrine(text: &str) -> String {
    match split_initial(text) {
        Some((initial, word, "")) => {
            format!("\\lettrine{{\\letterfont {}}}{{{}}}", initial, escape_latex(word))
        }
        Some((initial, word, rest)) => format!(
            "\\lettrine{{\\letterfont {}}}{{{}}} {}",
            initial,
            escape_latex(word),
            escape_latex(rest)
        ),
        None => escape_latex(text),
    }
}

impl Format for LatexFormat {
    fn name(&self) -> &str {
        "tex"
    }

    fn description(&self) -> &str {
        "LaTeX chapter fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tex"]
    }

    fn render_node(
        &self,
        node: &Node,
        scope: &RenderScope<'_>,
        continues_speaker: bool,
    ) -> Result<String, FormatError> {
        let close_quote = if continues_speaker { "" } else { "''" };
        let rendered = match node.kind() {
            NodeKind::LineBreak => "\n".to_string(),
            NodeKind::Todo => "--TODO--\n\n".to_string(),
            NodeKind::Regular(text) if wants_lettrine(node, scope.flags()) => lettrine(text),
            NodeKind::Regular(text) => escape_latex(text),
            NodeKind::SmallCaps(children) => {
                format!("\\textsc{{{}}}", scope.render_children(children)?.to_lowercase())
            }
            NodeKind::Italics(children) => format!("\\emph{{{}}}", scope.render_children(children)?),
            NodeKind::Escape(children) => {
                format!("{{\\altfonts {}}}", scope.render_children(children)?)
            }
            NodeKind::Block { children, .. } => format!(
                "\\begin{{quote}}\n{}\n\\end{{quote}}",
                scope.render_children(children)?
            ),
            NodeKind::Dialog { children, .. } if wants_lettrine(node, scope.flags()) => {
                // The drop capital replaces the opening quotation mark.
                let (first, rest) = match children.split_first() {
                    Some((first, rest)) => (first, rest),
                    None => return Ok(String::new()),
                };
                let opening = match first.as_regular() {
                    Some(text) => lettrine(text),
                    None => scope.render_children(std::slice::from_ref(first))?,
                };
                format!("{}{}{}", opening, scope.render_children(rest)?, close_quote)
            }
            NodeKind::Dialog { children, .. } => {
                format!("``{}{}", scope.render_children(children)?, close_quote)
            }
            NodeKind::Dashquote { children, kind } => {
                let dash = match kind {
                    DashKind::Single => "\\textemdash{} ",
                    DashKind::Double => "\\hspace{2em}\\textemdash{} ",
                };
                format!("{}{}", dash, scope.render_children(children)?)
            }
            NodeKind::SingleQuote(children) => {
                format!("`{}'{{}}", scope.render_children(children)?)
            }
            NodeKind::DoubleQuote(children) => {
                format!("``{}''", scope.render_children(children)?)
            }
            NodeKind::Pragma { .. } => render_pragma(node, scope, "\\par\\bigskip\n\n")?,
            NodeKind::BeatSeparator => "\\secbreak\n\n".to_string(),
        };
        Ok(rendered)
    }

    fn render_chapter_header(&self, chapter: &Chapter, _total_chapters: usize) -> String {
        format!("\\chapter{{{}}}\n\n", escape_latex(&chapter.label))
    }
}
