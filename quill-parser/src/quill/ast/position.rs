use serde::Serialize;
use std::fmt;

/// Where a chunk of markup begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    /// 1-based line number in the source document
    pub line: usize,
    /// 0-based line index within the chapter body
    pub chapter_line: usize,
    /// Character offset within the line
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, chapter_line: usize, offset: usize) -> Self {
        Self {
            line,
            chapter_line,
            offset,
        }
    }

    /// Same line, different column.
    pub fn at_offset(self, offset: usize) -> Self {
        Self { offset, ..self }
    }

    /// True for the very first chunk of a chapter body.
    pub fn opens_chapter(&self) -> bool {
        self.chapter_line == 0 && self.offset == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (chapter line {})",
            self.line, self.offset, self.chapter_line
        )
    }
}
