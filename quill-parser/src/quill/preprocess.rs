//! Comment stripping and line numbering
//!
//!     The first stage turns the raw manuscript into numbered, trimmed lines with comments
//!     removed. Two comment forms exist: `/* ... */` anywhere on a line, and `#` up to the end
//!     of the line. Chapter titles start with `##` and are never treated as comments.
//!
//!     Blank lines are significant later on (they separate paragraphs) but their count is
//!     not: a run of blanks folds into its last blank, which is only emitted when a non-blank
//!     line follows. A line holding nothing but a `#` comment is dropped outright, so it can sit
//!     inside a paragraph without splitting it.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[^*]*\*/").unwrap());

/// A source line after trimming, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Runs the whole stage.
pub fn preprocess(source: &str) -> Vec<SourceLine> {
    remove_comments(number_lines(source))
}

pub fn number_lines(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| SourceLine::new(index + 1, line.replace('\r', "").trim()))
        .collect()
}

pub fn is_comment_line(text: &str) -> bool {
    text.starts_with('#') && !text.starts_with("##")
}

/// Strips both comment forms from one line. Titles pass through untouched.
pub fn strip_comments(text: &str) -> String {
    if text.starts_with("##") {
        return text.to_string();
    }
    let without_blocks = BLOCK_COMMENT.replace_all(text, "");
    strip_line_comment(&without_blocks).trim().to_string()
}

fn strip_line_comment(text: &str) -> &str {
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        match ch {
            '\\' if !escaped => escaped = true,
            '#' if !escaped => return &text[..index],
            _ => escaped = false,
        }
    }
    text
}

pub fn remove_comments(lines: Vec<SourceLine>) -> Vec<SourceLine> {
    let mut cleaned = Vec::with_capacity(lines.len());
    let mut pending_blank: Option<usize> = None;

    for line in lines {
        if is_comment_line(&line.text) {
            continue;
        }
        let text = strip_comments(&line.text);
        if text.is_empty() {
            pending_blank = Some(line.number);
            continue;
        }
        if let Some(number) = pending_blank.take() {
            cleaned.push(SourceLine::new(number, ""));
        }
        cleaned.push(SourceLine::new(line.number, text));
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn texts(lines: &[SourceLine]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("text # trailing comment", "text")]
    #[case("before /* inline */ after", "before  after")]
    #[case("/* lead */ text", "text")]
    #[case("##1 (Title) # not a comment", "##1 (Title) # not a comment")]
    #[case("issue \\#5 stays", "issue \\#5 stays")]
    fn test_strip_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_comments(input), expected);
    }

    #[test]
    fn test_numbering_is_one_based_and_trimmed() {
        let lines = number_lines("  first\r\nsecond  \n");
        assert_eq!(lines, vec![SourceLine::new(1, "first"), SourceLine::new(2, "second")]);
    }

    #[test]
    fn test_blank_runs_fold_to_last_blank() {
        let lines = preprocess("one\n\n\n\ntwo");
        assert_eq!(texts(&lines), vec!["one", "", "two"]);
        assert_eq!(lines[1].number, 4);
        assert_eq!(lines[2].number, 5);
    }

    #[test]
    fn test_trailing_blanks_dropped() {
        let lines = preprocess("one\n\n\n");
        assert_eq!(texts(&lines), vec!["one"]);
    }

    #[test]
    fn test_comment_line_does_not_split_paragraph() {
        let lines = preprocess("first half\n# aside\nsecond half");
        assert_eq!(texts(&lines), vec!["first half", "second half"]);
    }

    #[test]
    fn test_comment_emptied_line_counts_as_blank() {
        let lines = preprocess("one\n/* gone */\ntwo");
        assert_eq!(texts(&lines), vec!["one", "", "two"]);
    }
}
