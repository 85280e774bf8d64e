//! Inline delimiters and their nesting rules

use crate::quill::ast::{Node, NodeKind, Position};
use crate::quill::error::ParseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `*text*`
    Italics,
    /// `/text/`, only at the start of a span
    Block,
    /// `|text|`
    Dialog,
    /// `{text}`
    Escape,
    /// `@text@`
    SmallCaps,
    /// `` `text' ``
    SingleQuote,
    /// ``` ``text'' ```
    DoubleQuote,
}

impl Delimiter {
    /// Recognises an opener at `index`.
    pub fn opening_at(chars: &[char], index: usize) -> Option<Self> {
        match chars.get(index)? {
            '*' => Some(Delimiter::Italics),
            '/' if index == 0 => Some(Delimiter::Block),
            '|' => Some(Delimiter::Dialog),
            '{' => Some(Delimiter::Escape),
            '@' => Some(Delimiter::SmallCaps),
            '`' if chars.get(index + 1) == Some(&'`') => Some(Delimiter::DoubleQuote),
            '`' => Some(Delimiter::SingleQuote),
            _ => None,
        }
    }

    pub fn open(self) -> &'static str {
        match self {
            Delimiter::Italics => "*",
            Delimiter::Block => "/",
            Delimiter::Dialog => "|",
            Delimiter::Escape => "{",
            Delimiter::SmallCaps => "@",
            Delimiter::SingleQuote => "`",
            Delimiter::DoubleQuote => "``",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Delimiter::Escape => "}",
            Delimiter::SingleQuote => "'",
            Delimiter::DoubleQuote => "''",
            other => other.open(),
        }
    }

    pub fn is_symmetric(self) -> bool {
        self.open() == self.close()
    }

    /// Dialogue and blocks may carry a trailing `X>` speaker tag.
    pub fn takes_attrib(self) -> bool {
        matches!(self, Delimiter::Dialog | Delimiter::Block)
    }

    /// Level 1 rules out blocks, level 2 and deeper also rules out dialogue.
    pub fn allowed_at(self, level: usize) -> bool {
        match self {
            Delimiter::Block => level == 0,
            Delimiter::Dialog => level <= 1,
            _ => true,
        }
    }

    pub fn wrap(
        self,
        children: Vec<Node>,
        attrib: Option<char>,
        position: Position,
    ) -> ParseResult<Node> {
        let kind = match self {
            Delimiter::Italics => NodeKind::Italics(children),
            Delimiter::Block => NodeKind::Block { children, attrib },
            Delimiter::Dialog => NodeKind::Dialog { children, attrib },
            Delimiter::Escape => NodeKind::Escape(children),
            Delimiter::SmallCaps => NodeKind::SmallCaps(children),
            Delimiter::SingleQuote => NodeKind::SingleQuote(children),
            Delimiter::DoubleQuote => NodeKind::DoubleQuote(children),
        };
        Node::new(kind, position)
    }
}

/// Delimiters enclosing the span being parsed, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenTags(Vec<Delimiter>);

impl OpenTags {
    pub fn contains(&self, delimiter: Delimiter) -> bool {
        self.0.contains(&delimiter)
    }

    pub fn innermost(&self) -> Option<Delimiter> {
        self.0.last().copied()
    }

    pub fn with(&self, delimiter: Delimiter) -> Self {
        let mut tags = self.0.clone();
        tags.push(delimiter);
        OpenTags(tags)
    }
}
