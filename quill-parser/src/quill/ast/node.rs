//! Inline nodes
//!
//!     A [Node] is a [NodeKind] plus the [Position] of its chunk. The formatting kinds own their
//!     children; the remaining kinds are leaves. Construction of a formatting node goes through
//!     [Node::new], which rejects an empty italics, dialogue, block, single or double quote.

use super::position::Position;
use crate::quill::error::{ParseError, ParseResult};
use serde::Serialize;
use std::mem;

/// `>` or `>>` at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DashKind {
    Single,
    Double,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    Regular(String),
    Italics(Vec<Node>),
    DoubleQuote(Vec<Node>),
    SingleQuote(Vec<Node>),
    SmallCaps(Vec<Node>),
    Escape(Vec<Node>),
    Dialog {
        children: Vec<Node>,
        attrib: Option<char>,
    },
    Block {
        children: Vec<Node>,
        attrib: Option<char>,
    },
    Dashquote {
        children: Vec<Node>,
        kind: DashKind,
    },
    Pragma {
        name: String,
        arg: Option<String>,
    },
    Todo,
    BeatSeparator,
    LineBreak,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Regular(_) => "Regular",
            NodeKind::Italics(_) => "Italics",
            NodeKind::DoubleQuote(_) => "DoubleQuote",
            NodeKind::SingleQuote(_) => "SingleQuote",
            NodeKind::SmallCaps(_) => "SmallCaps",
            NodeKind::Escape(_) => "Escape",
            NodeKind::Dialog { .. } => "Dialog",
            NodeKind::Block { .. } => "Block",
            NodeKind::Dashquote { .. } => "Dashquote",
            NodeKind::Pragma { .. } => "Pragma",
            NodeKind::Todo => "Todo",
            NodeKind::BeatSeparator => "BeatSeparator",
            NodeKind::LineBreak => "LineBreak",
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            NodeKind::Italics(children)
            | NodeKind::DoubleQuote(children)
            | NodeKind::SingleQuote(children)
            | NodeKind::SmallCaps(children)
            | NodeKind::Escape(children)
            | NodeKind::Dialog { children, .. }
            | NodeKind::Block { children, .. }
            | NodeKind::Dashquote { children, .. } => Some(children),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            NodeKind::Italics(children)
            | NodeKind::DoubleQuote(children)
            | NodeKind::SingleQuote(children)
            | NodeKind::SmallCaps(children)
            | NodeKind::Escape(children)
            | NodeKind::Dialog { children, .. }
            | NodeKind::Block { children, .. }
            | NodeKind::Dashquote { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Kinds that may not be constructed without content.
    fn requires_children(&self) -> bool {
        matches!(
            self,
            NodeKind::Dialog { .. }
                | NodeKind::Italics(_)
                | NodeKind::DoubleQuote(_)
                | NodeKind::Block { .. }
                | NodeKind::SingleQuote(_)
        )
    }

    pub fn same_kind(&self, other: &NodeKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    fn semantically_eq(&self, other: &NodeKind) -> bool {
        match (self, other) {
            (NodeKind::Regular(a), NodeKind::Regular(b)) => a == b,
            (
                NodeKind::Dialog {
                    children: a,
                    attrib: x,
                },
                NodeKind::Dialog {
                    children: b,
                    attrib: y,
                },
            )
            | (
                NodeKind::Block {
                    children: a,
                    attrib: x,
                },
                NodeKind::Block {
                    children: b,
                    attrib: y,
                },
            ) => x == y && nodes_semantically_eq(a, b),
            (
                NodeKind::Dashquote { children: a, kind: x },
                NodeKind::Dashquote { children: b, kind: y },
            ) => x == y && nodes_semantically_eq(a, b),
            (NodeKind::Pragma { name: a, arg: x }, NodeKind::Pragma { name: b, arg: y }) => {
                a == b && x == y
            }
            (a, b) if a.same_kind(b) => match (a.children(), b.children()) {
                (Some(a), Some(b)) => nodes_semantically_eq(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) position: Position,
}

impl Node {
    /// Builds a node, enforcing non-empty content on the formatting kinds that need it.
    pub fn new(kind: NodeKind, position: Position) -> ParseResult<Self> {
        if kind.requires_children() && kind.children().is_some_and(<[Node]>::is_empty) {
            return Err(ParseError::grammar(
                format!("empty {} span", kind.name()),
                position,
            ));
        }
        Ok(Self { kind, position })
    }

    pub fn regular(text: impl Into<String>, position: Position) -> Self {
        Self {
            kind: NodeKind::Regular(text.into()),
            position,
        }
    }

    pub fn pragma(name: impl Into<String>, arg: Option<String>, position: Position) -> Self {
        Self {
            kind: NodeKind::Pragma {
                name: name.into(),
                arg,
            },
            position,
        }
    }

    pub fn todo(position: Position) -> Self {
        Self {
            kind: NodeKind::Todo,
            position,
        }
    }

    pub fn beat_separator(position: Position) -> Self {
        Self {
            kind: NodeKind::BeatSeparator,
            position,
        }
    }

    pub fn line_break(position: Position) -> Self {
        Self {
            kind: NodeKind::LineBreak,
            position,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn children(&self) -> Option<&[Node]> {
        self.kind.children()
    }

    /// Speaker tag of a dialogue or block node.
    pub fn attrib(&self) -> Option<char> {
        match &self.kind {
            NodeKind::Dialog { attrib, .. } | NodeKind::Block { attrib, .. } => *attrib,
            _ => None,
        }
    }

    pub fn as_regular(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Regular(text) => Some(text),
            _ => None,
        }
    }

    /// `(name, arg)` of a pragma node.
    pub fn as_pragma(&self) -> Option<(&str, Option<&str>)> {
        match &self.kind {
            NodeKind::Pragma { name, arg } => Some((name, arg.as_deref())),
            _ => None,
        }
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self.kind, NodeKind::LineBreak)
    }

    /// 1 for leaves, 1 + the deepest child otherwise.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .and_then(|children| children.iter().map(Node::depth).max())
            .unwrap_or(0)
    }

    /// Structural equality that ignores positions.
    pub fn semantically_eq(&self, other: &Node) -> bool {
        self.kind.semantically_eq(&other.kind)
    }
}

pub fn nodes_semantically_eq(a: &[Node], b: &[Node]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.semantically_eq(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: usize) -> Position {
        Position::new(1, 0, offset)
    }

    #[test]
    fn test_empty_italics_is_rejected() {
        let err = Node::new(NodeKind::Italics(vec![]), pos(0)).unwrap_err();
        assert!(err.to_string().contains("empty Italics span"));
    }

    #[test]
    fn test_empty_small_caps_is_allowed() {
        assert!(Node::new(NodeKind::SmallCaps(vec![]), pos(0)).is_ok());
    }

    #[test]
    fn test_empty_dialog_is_rejected() {
        let kind = NodeKind::Dialog {
            children: vec![],
            attrib: Some('A'),
        };
        assert!(Node::new(kind, pos(0)).is_err());
    }

    #[test]
    fn test_semantic_equality_ignores_position() {
        let a = Node::regular("hello", pos(0));
        let b = Node::regular("hello", pos(9));
        assert_ne!(a, b);
        assert!(a.semantically_eq(&b));
    }

    #[test]
    fn test_semantic_equality_compares_attrib() {
        let dialog = |attrib| {
            Node::new(
                NodeKind::Dialog {
                    children: vec![Node::regular("hi", pos(1))],
                    attrib,
                },
                pos(0),
            )
            .unwrap()
        };
        assert!(dialog(Some('A')).semantically_eq(&dialog(Some('A'))));
        assert!(!dialog(Some('A')).semantically_eq(&dialog(Some('B'))));
        assert!(!dialog(Some('A')).semantically_eq(&dialog(None)));
    }

    #[test]
    fn test_semantic_equality_distinguishes_kinds() {
        let italics = Node::new(NodeKind::Italics(vec![Node::regular("x", pos(1))]), pos(0));
        let caps = Node::new(NodeKind::SmallCaps(vec![Node::regular("x", pos(1))]), pos(0));
        assert!(!italics.unwrap().semantically_eq(&caps.unwrap()));
    }

    #[test]
    fn test_depth() {
        let leaf = Node::regular("x", pos(2));
        assert_eq!(leaf.depth(), 1);
        let caps = Node::new(NodeKind::SmallCaps(vec![leaf]), pos(1)).unwrap();
        let italics = Node::new(NodeKind::Italics(vec![caps]), pos(0)).unwrap();
        assert_eq!(italics.depth(), 3);
    }

    #[test]
    fn test_as_pragma() {
        let node = Node::pragma("lit", Some("\\newpage".into()), pos(0));
        assert_eq!(node.as_pragma(), Some(("lit", Some("\\newpage"))));
        assert_eq!(Node::todo(pos(0)).as_pragma(), None);
    }
}
