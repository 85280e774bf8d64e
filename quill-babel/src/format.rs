//! Format trait definition
//!
//! This module defines the core Format trait that all output formats implement. A format only
//! decides strings: how each node looks, how a chapter is announced and how the document is
//! framed. Walking the book, speaker continuation and transclusion are the
//! [Renderer](crate::render::Renderer)'s job.

use crate::error::FormatError;
use crate::render::RenderScope;
use quill_parser::quill::ast::{Chapter, Node, Prelude};
use quill_parser::quill::context::RenderFlags;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct ShoutFormat;
///
/// impl Format for ShoutFormat {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn render_node(
///         &self,
///         node: &Node,
///         scope: &RenderScope<'_>,
///         _continues_speaker: bool,
///     ) -> Result<String, FormatError> {
///         match node.children() {
///             Some(children) => scope.render_children(children),
///             None => Ok(node.as_regular().unwrap_or_default().to_uppercase()),
///         }
///     }
///
///     fn render_chapter_header(&self, chapter: &Chapter, _total: usize) -> String {
///         format!("== {} ==\n", chapter.label)
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "txt", "html", "tex")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Render one node. `continues_speaker` is only ever true for the last top-level node of a
    /// paragraph whose speaker also opens the next paragraph.
    fn render_node(
        &self,
        node: &Node,
        scope: &RenderScope<'_>,
        continues_speaker: bool,
    ) -> Result<String, FormatError>;

    /// Announce a chapter. `total_chapters` lets single-chapter books use a bare marker.
    fn render_chapter_header(&self, chapter: &Chapter, total_chapters: usize) -> String;

    /// Wrap the rendered body of a paragraph.
    fn render_paragraph(&self, body: String, _depth: usize) -> String {
        body
    }

    fn render_prelude(&self, _prelude: &Prelude, _flags: &RenderFlags) -> String {
        String::new()
    }

    fn render_closing(&self) -> String {
        String::new()
    }

    /// Last pass over the whole document.
    fn finish(&self, document: String) -> String {
        document
    }
}

/// Shared handling of the body pragmas. `skipline` is the format's extra break.
pub fn render_pragma(
    node: &Node,
    scope: &RenderScope<'_>,
    skipline: &str,
) -> Result<String, FormatError> {
    match node.as_pragma() {
        Some(("skipline", _)) => Ok(skipline.to_string()),
        Some(("lit", arg)) => Ok(arg.unwrap_or_default().to_string()),
        Some(("transclude", Some(target))) => scope.transclude(target, node.position()),
        Some((name, _)) => Err(FormatError::UnknownPragma {
            name: name.to_string(),
            location: node.position().into(),
        }),
        None => Ok(String::new()),
    }
}

/// Splits off the drop capital of a chapter's opening text.
///
/// Returns `(initial, rest of first word, remainder after the first space)` when the text
/// opens with an upper-case letter or an apostrophe.
pub fn split_initial(text: &str) -> Option<(char, &str, &str)> {
    let initial = text.chars().next()?;
    if !(initial.is_ascii_uppercase() || initial == '\'') {
        return None;
    }
    let after = &text[initial.len_utf8()..];
    match after.split_once(' ') {
        Some((word, rest)) => Some((initial, word, rest)),
        None => Some((initial, after, "")),
    }
}

/// True when lettrine applies to `node`.
pub fn wants_lettrine(node: &Node, flags: &RenderFlags) -> bool {
    flags.lettrine && node.position().opens_chapter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_initial() {
        assert_eq!(
            split_initial("Once upon a time"),
            Some(('O', "nce", "upon a time"))
        );
        assert_eq!(split_initial("I"), Some(('I', "", "")));
        assert_eq!(split_initial("'Twas night"), Some(('\'', "Twas", "night")));
        assert_eq!(split_initial("once"), None);
        assert_eq!(split_initial(""), None);
    }
}
