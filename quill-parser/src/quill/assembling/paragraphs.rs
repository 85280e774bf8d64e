//! Paragraph grouping
//!
//!     Each body line contributes the nodes it parsed to. A blank-line run contributes a single
//!     `LineBreak` marker line. Grouping splits on the markers, flattens each group and merges
//!     it, so merging never crosses a paragraph boundary.

use crate::quill::ast::{Node, Paragraph};
use crate::quill::merging::merge_nodes;

pub fn group_paragraphs(lines: Vec<Vec<Node>>) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<Node> = Vec::new();

    for line in lines {
        if line.first().is_some_and(Node::is_line_break) {
            if !current.is_empty() {
                paragraphs.push(merge_nodes(std::mem::take(&mut current)));
            }
            continue;
        }
        current.extend(line);
    }
    if !current.is_empty() {
        paragraphs.push(merge_nodes(current));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quill::ast::nodes_semantically_eq;
    use crate::quill::testing::factories::*;

    #[test]
    fn test_groups_split_on_line_breaks() {
        let paragraphs = group_paragraphs(vec![
            vec![regular("one")],
            vec![regular("two")],
            vec![line_break()],
            vec![regular("three")],
        ]);

        assert_eq!(paragraphs.len(), 2);
        assert!(nodes_semantically_eq(&paragraphs[0], &[regular("one two")]));
        assert!(nodes_semantically_eq(&paragraphs[1], &[regular("three")]));
    }

    #[test]
    fn test_no_empty_paragraphs() {
        let paragraphs = group_paragraphs(vec![
            vec![line_break()],
            vec![regular("only")],
            vec![line_break()],
        ]);
        assert_eq!(paragraphs.len(), 1);
    }

    #[test]
    fn test_merge_does_not_cross_paragraphs() {
        let paragraphs = group_paragraphs(vec![
            vec![dialog(vec![regular("a")], Some('X'))],
            vec![line_break()],
            vec![dialog(vec![regular("b")], Some('X'))],
        ]);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].len(), 1);
        assert_eq!(paragraphs[1].len(), 1);
    }
}
