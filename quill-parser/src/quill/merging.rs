//! Adjacent node merging
//!
//!     Lines of a paragraph are parsed one at a time, so a dialogue that spans three source
//!     lines arrives as three dialogue nodes. Merging fuses neighbours of the same kind back
//!     together:
//!
//!         - two `Regular` nodes join with a single space;
//!         - any other kind concatenates children, keeping the earlier position and the later
//!           speaker tag (or dash kind);
//!         - pragmas never merge, not even with each other.
//!
//!     Merging then recurses into every composite node. A second pass finds nothing left to do.

use crate::quill::ast::{Node, NodeKind};
use std::mem;

pub fn merge_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());

    for node in nodes {
        match merged.last_mut() {
            Some(last) if mergeable(last, &node) => absorb(last, node),
            _ => merged.push(node),
        }
    }

    for node in &mut merged {
        if let Some(children) = node.kind.children_mut() {
            let taken = mem::take(children);
            *children = merge_nodes(taken);
        }
    }

    merged
}

fn mergeable(left: &Node, right: &Node) -> bool {
    left.kind.same_kind(&right.kind) && !matches!(left.kind, NodeKind::Pragma { .. })
}

fn absorb(into: &mut Node, next: Node) {
    match (&mut into.kind, next.kind) {
        (NodeKind::Regular(text), NodeKind::Regular(more)) => {
            text.push(' ');
            text.push_str(&more);
        }
        (
            NodeKind::Dialog { children, attrib },
            NodeKind::Dialog {
                children: more,
                attrib: later,
            },
        )
        | (
            NodeKind::Block { children, attrib },
            NodeKind::Block {
                children: more,
                attrib: later,
            },
        ) => {
            children.extend(more);
            *attrib = later;
        }
        (
            NodeKind::Dashquote { children, kind },
            NodeKind::Dashquote {
                children: more,
                kind: later,
            },
        ) => {
            children.extend(more);
            *kind = later;
        }
        (kind, mut other) => {
            if let (Some(children), Some(more)) = (kind.children_mut(), other.children_mut()) {
                children.append(more);
            }
        }
    }
}
