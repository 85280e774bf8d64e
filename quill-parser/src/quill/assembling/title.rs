//! Chapter title lines

use crate::quill::error::{ParseError, ParseResult, SourceLocation};

/// `##id (label) description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterTitle {
    pub id: Option<String>,
    pub label: String,
    pub description: Option<String>,
}

impl ChapterTitle {
    /// Without a `(` the whole rest of the line is the label.
    pub fn parse(line: &str, line_number: usize) -> ParseResult<Self> {
        let location = SourceLocation::line(line_number);
        let rest = line.strip_prefix("##").ok_or_else(|| {
            ParseError::grammar(
                format!("expected a chapter title starting with '##', got '{}'", line),
                location,
            )
        })?;

        let title = match rest.split_once('(') {
            None => ChapterTitle {
                id: None,
                label: rest.trim().to_string(),
                description: None,
            },
            Some((id, after)) => {
                let (label, description) = after.split_once(')').ok_or_else(|| {
                    ParseError::grammar(format!("unclosed chapter label in '{}'", line), location)
                })?;
                ChapterTitle {
                    id: non_empty(id),
                    label: label.trim().to_string(),
                    description: non_empty(description),
                }
            }
        };

        if title.label.is_empty() {
            return Err(ParseError::grammar(
                format!("chapter title '{}' has no label", line),
                location,
            ));
        }
        Ok(title)
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("##1 (The Start) in which it begins", Some("1"), "The Start", Some("in which it begins"))]
    #[case("##ch2 (Second)", Some("ch2"), "Second", None)]
    #[case("##(Unnumbered)", None, "Unnumbered", None)]
    #[case("## Epilogue", None, "Epilogue", None)]
    fn test_parse_title(
        #[case] line: &str,
        #[case] id: Option<&str>,
        #[case] label: &str,
        #[case] description: Option<&str>,
    ) {
        let title = ChapterTitle::parse(line, 1).unwrap();
        assert_eq!(title.id.as_deref(), id);
        assert_eq!(title.label, label);
        assert_eq!(title.description.as_deref(), description);
    }

    #[rstest]
    #[case("# One")]
    #[case("##1 (Unclosed")]
    #[case("##1 ()")]
    #[case("##")]
    fn test_parse_title_errors(#[case] line: &str) {
        let err = ChapterTitle::parse(line, 9).unwrap_err();
        assert!(err.is_grammar());
        assert_eq!(err.location().line, 9);
    }
}
