use super::node::Node;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The merged nodes of the lines between two blank lines.
pub type Paragraph = Vec<Node>;

/// A run of paragraphs, shared between a chapter and every chapter transcluding it.
pub type Segment = Arc<Vec<Paragraph>>;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Prelude {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl Prelude {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.date.is_none()
    }
}

impl fmt::Display for Prelude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.title, &self.author) {
            (Some(title), Some(author)) => write!(f, "{} by {}", title, author),
            (Some(title), None) => write!(f, "{}", title),
            (None, Some(author)) => write!(f, "by {}", author),
            (None, None) => write!(f, "(untitled)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    pub id: Option<String>,
    pub label: String,
    pub description: Option<String>,
    pub segments: Vec<Segment>,
}

impl Chapter {
    /// All paragraphs in reading order, across segments.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.segments.iter().flat_map(|segment| segment.iter())
    }

    pub fn paragraph_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Book {
    pub prelude: Prelude,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters
            .iter()
            .find(|chapter| chapter.id.as_deref() == Some(id))
    }
}
