//! Error types for quill compilation
//!
//!     Two failures abort a compilation: a [ParseError::Grammar] for malformed markup and a
//!     [ParseError::Reference] for a transclusion whose target chapter does not exist (yet).
//!     Both carry a [SourceLocation]. Running out of input where another chapter was expected
//!     is not an error; it is recorded as a [StructuralWarning] and parsing ends with what has
//!     been built so far.

use crate::quill::ast::Position;
use std::fmt;
use thiserror::Error;

/// Where an error was raised. Line is always known; the rest only inside a chapter body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub chapter_line: Option<usize>,
    pub offset: Option<usize>,
}

impl SourceLocation {
    pub fn line(line: usize) -> Self {
        Self {
            line,
            chapter_line: None,
            offset: None,
        }
    }
}

impl From<Position> for SourceLocation {
    fn from(position: Position) -> Self {
        Self {
            line: position.line,
            chapter_line: Some(position.chapter_line),
            offset: Some(position.offset),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)?;
        if let Some(offset) = self.offset {
            write!(f, ", column {}", offset)?;
        }
        if let Some(chapter_line) = self.chapter_line {
            write!(f, " (chapter line {})", chapter_line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("grammar error at {location}: {message}")]
    Grammar {
        message: String,
        location: SourceLocation,
    },
    #[error("reference error at {location}: no chapter '{target}' to transclude")]
    Reference {
        target: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn grammar(message: impl Into<String>, location: impl Into<SourceLocation>) -> Self {
        ParseError::Grammar {
            message: message.into(),
            location: location.into(),
        }
    }

    pub fn reference(target: impl Into<String>, location: impl Into<SourceLocation>) -> Self {
        ParseError::Reference {
            target: target.into(),
            location: location.into(),
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Grammar { location, .. } | ParseError::Reference { location, .. } => {
                *location
            }
        }
    }

    pub fn is_grammar(&self) -> bool {
        matches!(self, ParseError::Grammar { .. })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ParseError::Reference { .. })
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Non-fatal structural problem, kept on the compilation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralWarning {
    pub message: String,
    pub line: Option<usize>,
}

impl StructuralWarning {
    pub fn new(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Format source code context around an error line (1-based).
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!(
            "{} {:3} | {}\n",
            marker,
            line_num + 1,
            lines[line_num]
        ));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";

        let context = format_source_context(source, 4);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_format_source_context_past_end() {
        assert_eq!(format_source_context("only line", 10), "");
    }

    #[test]
    fn test_grammar_error_display() {
        let err = ParseError::grammar("empty Italics span", Position::new(7, 2, 4));
        assert_eq!(
            err.to_string(),
            "grammar error at line 7, column 4 (chapter line 2): empty Italics span"
        );
        assert!(err.is_grammar());
    }

    #[test]
    fn test_reference_error_display() {
        let err = ParseError::reference("ch9", SourceLocation::line(3));
        assert_eq!(
            err.to_string(),
            "reference error at line 3: no chapter 'ch9' to transclude"
        );
        assert_eq!(err.location().line, 3);
    }
}
