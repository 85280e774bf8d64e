//! Treeviz formatter for the book tree
//!
//! One line per node, nesting drawn with box connectors, labels truncated to 30 characters.
//!
//! Example:
//!
//! ⧉ The Long Road by A. Writer
//! ├─ § 1 One
//! │ ├─ ¶ 2 nodes
//! │ │ ├─ " Dialog X>
//! │ │ │ └─ ◦ Where are we going?
//! │ │ └─ ◦  she asked.
//! │ └─ ¶ 1 nodes
//! │   └─ ⁂ BeatSeparator
//! └─ § 2 Two
//!   └─ ¶ 1 nodes
//!     └─ % transclude 1

//! Icons
//!     Book: ⧉
//!     Chapter: §
//!     Segment: ⊞ (only drawn when a chapter has more than one)
//!     Paragraph: ¶
//!     Regular: ◦
//!     Italics: 𝐼
//!     SmallCaps: ᴀ
//!     Dialog: "
//!     Block: ▌
//!     Dashquote: —
//!     Escape: ƒ
//!     SingleQuote / DoubleQuote: ‘ / “
//!     Pragma: %
//!     Todo: ☐
//!     BeatSeparator: ⁂
//!     LineBreak: ↵

use crate::quill::ast::{Book, Chapter, Node, NodeKind, Paragraph};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node type
fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Book" => "⧉",
        "Chapter" => "§",
        "Segment" => "⊞",
        "Paragraph" => "¶",
        "Regular" => "◦",
        "Italics" => "𝐼",
        "SmallCaps" => "ᴀ",
        "Dialog" => "\"",
        "Block" => "▌",
        "Dashquote" => "—",
        "Escape" => "ƒ",
        "SingleQuote" => "‘",
        "DoubleQuote" => "“",
        "Pragma" => "%",
        "Todo" => "☐",
        "BeatSeparator" => "⁂",
        "LineBreak" => "↵",
        _ => "○",
    }
}

/// Intermediate tree so every level is drawn the same way.
struct Entry {
    node_type: &'static str,
    label: String,
    children: Vec<Entry>,
}

fn node_entry(node: &Node) -> Entry {
    let label = match node.kind() {
        NodeKind::Regular(text) => text.clone(),
        NodeKind::Pragma { name, arg } => match arg {
            Some(arg) => format!("{} {}", name, arg),
            None => name.clone(),
        },
        NodeKind::Dialog { attrib: Some(tag), .. } | NodeKind::Block { attrib: Some(tag), .. } => {
            format!("{} {}>", node.name(), tag)
        }
        NodeKind::Dashquote { kind, .. } => format!("Dashquote {:?}", kind),
        _ => node.name().to_string(),
    };
    Entry {
        node_type: node.name(),
        label,
        children: node
            .children()
            .map(|children| children.iter().map(node_entry).collect())
            .unwrap_or_default(),
    }
}

fn paragraph_entry(paragraph: &Paragraph) -> Entry {
    Entry {
        node_type: "Paragraph",
        label: format!("{} nodes", paragraph.len()),
        children: paragraph.iter().map(node_entry).collect(),
    }
}

fn chapter_entry(chapter: &Chapter) -> Entry {
    let children = if chapter.segments.len() > 1 {
        chapter
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| Entry {
                node_type: "Segment",
                label: format!("segment {}", i + 1),
                children: segment.iter().map(paragraph_entry).collect(),
            })
            .collect()
    } else {
        chapter.paragraphs().map(paragraph_entry).collect()
    };
    let label = match &chapter.id {
        Some(id) => format!("{} {}", id, chapter.label),
        None => chapter.label.clone(),
    };
    Entry {
        node_type: "Chapter",
        label,
        children,
    }
}

fn format_entry(entry: &Entry, prefix: &str, is_last: bool) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(entry.node_type),
        truncate(&entry.label, 30)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = entry.children.len();
    for (i, child) in entry.children.iter().enumerate() {
        output.push_str(&format_entry(child, &child_prefix, i + 1 == count));
    }

    output
}

pub fn to_treeviz_str(book: &Book) -> String {
    let mut output = format!("{} {}\n", get_icon("Book"), book.prelude);
    let count = book.chapters.len();
    for (i, chapter) in book.chapters.iter().enumerate() {
        output.push_str(&format_entry(&chapter_entry(chapter), "", i + 1 == count));
    }
    output
}

/// Pretty JSON of the whole book, positions included.
pub fn to_json_string(book: &Book) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(book)
}
