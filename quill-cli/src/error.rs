//! Errors surfaced by the CLI, and how they are reported

use quill_babel::FormatError;
use quill_config::ConfigError;
use quill_parser::quill::error::{format_source_context, ParseError, SourceLocation};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    /// Parse and render failures keep the manuscript so the report can quote it.
    #[error("{}: {error}", path.display())]
    Parse {
        path: PathBuf,
        source_text: String,
        error: ParseError,
    },
    #[error("{}: {error}", path.display())]
    Render {
        path: PathBuf,
        source_text: String,
        error: FormatError,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("self-check failed: {0}")]
    SelfCheck(String),
}

impl CliError {
    fn location(&self) -> Option<(&str, SourceLocation)> {
        match self {
            CliError::Parse {
                source_text, error, ..
            } => Some((source_text, error.location())),
            CliError::Render {
                source_text,
                error: FormatError::Parse(error),
                ..
            } => Some((source_text, error.location())),
            CliError::Render {
                source_text,
                error:
                    FormatError::UnknownPragma { location, .. }
                    | FormatError::TransclusionCycle { location, .. },
                ..
            } => Some((source_text, *location)),
            _ => None,
        }
    }

    /// The diagnostic printed on stderr.
    pub fn report(&self) -> String {
        let mut report = format!("error: {}\n", self);
        if let Some((source, location)) = self.location() {
            report.push('\n');
            report.push_str(&format_source_context(source, location.line));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_quotes_source() {
        let err = CliError::Parse {
            path: PathBuf::from("book.quill"),
            source_text: "one\ntwo\nthree\nfour".to_string(),
            error: ParseError::grammar("empty Italics span", SourceLocation::line(3)),
        };
        let report = err.report();
        assert!(report.starts_with("error: book.quill: grammar error at line 3"));
        assert!(report.contains(">>   3 | three\n"));
    }

    #[test]
    fn test_usage_report_has_no_context() {
        let err = CliError::Usage("no input".to_string());
        assert_eq!(err.report(), "error: no input\n");
    }
}
