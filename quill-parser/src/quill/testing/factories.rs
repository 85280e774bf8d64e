//! Node factories for expected trees
//!
//! All nodes get a default position; compare with
//! [assert_nodes_eq](crate::quill::testing::assert_nodes_eq) or
//! [Node::semantically_eq](crate::quill::ast::Node::semantically_eq).

use crate::quill::ast::{DashKind, Node, NodeKind, Position};

fn node(kind: NodeKind) -> Node {
    Node {
        kind,
        position: Position::default(),
    }
}

pub fn regular(text: &str) -> Node {
    node(NodeKind::Regular(text.to_string()))
}

pub fn italics(children: Vec<Node>) -> Node {
    node(NodeKind::Italics(children))
}

pub fn small_caps(children: Vec<Node>) -> Node {
    node(NodeKind::SmallCaps(children))
}

pub fn escape(children: Vec<Node>) -> Node {
    node(NodeKind::Escape(children))
}

pub fn single_quote(children: Vec<Node>) -> Node {
    node(NodeKind::SingleQuote(children))
}

pub fn double_quote(children: Vec<Node>) -> Node {
    node(NodeKind::DoubleQuote(children))
}

pub fn dialog(children: Vec<Node>, attrib: Option<char>) -> Node {
    node(NodeKind::Dialog { children, attrib })
}

pub fn block(children: Vec<Node>, attrib: Option<char>) -> Node {
    node(NodeKind::Block { children, attrib })
}

pub fn dashquote(children: Vec<Node>, kind: DashKind) -> Node {
    node(NodeKind::Dashquote { children, kind })
}

pub fn pragma(name: &str, arg: Option<&str>) -> Node {
    node(NodeKind::Pragma {
        name: name.to_string(),
        arg: arg.map(str::to_string),
    })
}

pub fn todo() -> Node {
    node(NodeKind::Todo)
}

pub fn beat_separator() -> Node {
    node(NodeKind::BeatSeparator)
}

pub fn line_break() -> Node {
    node(NodeKind::LineBreak)
}
