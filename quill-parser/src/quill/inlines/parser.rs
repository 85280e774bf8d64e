//! Recursive inline parser
//!
//!     The parser scans one span left to right, collecting plain text into a buffer. When it
//!     meets an opener it captures raw text up to the matching close (or the end of the line),
//!     parses the capture one level deeper with the opener added to the open tags, and wraps
//!     the result in the node for that delimiter. A backslash makes the next character plain.
//!
//!     Some spans are recognised whole before any scanning happens:
//!
//!         ---             a todo marker (top level only)
//!         //- or //&      a beat separator (top level only)
//!         %name arg       a pragma (top level, or the whole content of a `{...}` span)
//!
//!     A symmetric delimiter (`*`, `/`, `|`, `@`) found inside its own capture after whitespace
//!     and before a word character reads as an opener, not a close. Since the delimiter is
//!     already open that is a nesting error: `*What's *she* doing?*` is rejected rather than
//!     silently parsed as two italics runs around plain text.

use super::delimiters::{Delimiter, OpenTags};
use crate::quill::ast::{DashKind, Node, NodeKind, Position};
use crate::quill::error::{ParseError, ParseResult};

/// Pragmas allowed inside a chapter body.
pub const BODY_PRAGMAS: [&str; 3] = ["skipline", "lit", "transclude"];

/// Result of parsing one span.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineParse {
    pub nodes: Vec<Node>,
    /// False when some span ran into the end of the line without its close.
    pub closed: bool,
    /// True when the span is a `%transclude` pragma.
    pub transclude: bool,
}

impl InlineParse {
    fn single(node: Node) -> Self {
        Self {
            nodes: vec![node],
            closed: true,
            transclude: false,
        }
    }
}

/// Parses one logical line. `position` points at column 0 of that line.
pub fn parse_text(line: &str, position: Position) -> ParseResult<InlineParse> {
    parse_span(line, position, 0, &OpenTags::default())
}

/// Parses a span at nesting `level`. `position.offset` is the span's column within its line.
pub fn parse_span(
    text: &str,
    position: Position,
    level: usize,
    open: &OpenTags,
) -> ParseResult<InlineParse> {
    if let Some(parsed) = parse_whole_span(text, position, level, open)? {
        return Ok(parsed);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut scanner = Scanner::new(position);
    let mut index = 0;

    while index < chars.len() {
        let ch = chars[index];

        if ch == '\\' {
            match chars.get(index + 1) {
                Some(&next) => scanner.push(next, index),
                None => scanner.push('\\', index),
            }
            index += 2;
            continue;
        }

        if level == 0 && index == 0 && ch == '>' {
            let (kind, width) = if chars.get(1) == Some(&'>') {
                (DashKind::Double, 2)
            } else {
                (DashKind::Single, 1)
            };
            let body: String = chars[width..].iter().collect();
            let inner = parse_span(
                &body,
                position.at_offset(position.offset + width),
                level + 1,
                &open.with(Delimiter::Block),
            )?;
            scanner.closed &= inner.closed;
            scanner.nodes.push(Node::new(
                NodeKind::Dashquote {
                    children: inner.nodes,
                    kind,
                },
                position,
            )?);
            break;
        }

        if let Some(delimiter) = Delimiter::opening_at(&chars, index) {
            let at = position.at_offset(position.offset + index);
            if open.contains(delimiter) {
                return Err(ParseError::grammar(
                    format!("'{}' opened inside another '{}' span", delimiter.open(), delimiter.open()),
                    at,
                ));
            }
            if !delimiter.allowed_at(level) {
                return Err(ParseError::grammar(
                    format!("'{}' is not allowed at nesting level {}", delimiter.open(), level),
                    at,
                ));
            }
            scanner.flush();

            let body_start = index + delimiter.open().chars().count();
            let capture = capture_span(&chars, body_start, delimiter, position)?;
            let inner = parse_span(
                &capture.text,
                position.at_offset(position.offset + body_start),
                level + 1,
                &open.with(delimiter),
            )?;
            scanner.closed &= capture.closed && inner.closed;

            let mut next = capture.end;
            let mut attrib = None;
            if capture.closed && delimiter.takes_attrib() {
                if let Some(tag) = attrib_at(&chars, next) {
                    attrib = Some(tag);
                    next += 2;
                }
            }
            scanner.nodes.push(delimiter.wrap(inner.nodes, attrib, at)?);
            index = next;
            continue;
        }

        scanner.push(ch, index);
        index += 1;
    }

    Ok(scanner.finish())
}

fn parse_whole_span(
    text: &str,
    position: Position,
    level: usize,
    open: &OpenTags,
) -> ParseResult<Option<InlineParse>> {
    if level == 0 && text == "---" {
        return Ok(Some(InlineParse::single(Node::todo(position))));
    }

    if level == 0 {
        if let Some(rest) = text.strip_prefix("//") {
            return match rest.chars().next() {
                Some('-') | Some('&') => Ok(Some(InlineParse::single(Node::beat_separator(
                    position,
                )))),
                Some('!') => Err(ParseError::grammar(
                    format!("chapter separator '{}' inside a chapter body", text),
                    position,
                )),
                _ => Err(ParseError::grammar(
                    format!("unknown separator '{}'", text),
                    position,
                )),
            };
        }
    }

    let pragma_allowed = level == 0 || open.innermost() == Some(Delimiter::Escape);
    if pragma_allowed {
        if let Some(rest) = text.strip_prefix('%') {
            return parse_pragma(rest, position).map(Some);
        }
    }

    Ok(None)
}

fn parse_pragma(rest: &str, position: Position) -> ParseResult<InlineParse> {
    let (name, arg) = match rest.split_once(' ') {
        Some((name, arg)) if !arg.trim().is_empty() => (name, Some(arg.trim().to_string())),
        Some((name, _)) => (name, None),
        None => (rest, None),
    };

    if !BODY_PRAGMAS.contains(&name) {
        return Err(ParseError::grammar(
            format!("unknown pragma '%{}'", name),
            position,
        ));
    }

    let transclude = name == "transclude";
    if transclude && arg.is_none() {
        return Err(ParseError::grammar(
            "'%transclude' needs a chapter id",
            position,
        ));
    }

    Ok(InlineParse {
        nodes: vec![Node::pragma(name, arg, position)],
        closed: true,
        transclude,
    })
}

/// Raw text between an opener and its close.
struct Capture {
    text: String,
    /// Index just past the close, or the line length when unterminated.
    end: usize,
    closed: bool,
}

fn capture_span(
    chars: &[char],
    start: usize,
    delimiter: Delimiter,
    position: Position,
) -> ParseResult<Capture> {
    let close: Vec<char> = delimiter.close().chars().collect();
    let mut text = String::new();
    let mut index = start;

    while index < chars.len() {
        let ch = chars[index];

        if ch == '\\' {
            text.push('\\');
            if let Some(&next) = chars.get(index + 1) {
                text.push(next);
            }
            index += 2;
            continue;
        }

        if chars[index..].starts_with(&close) {
            // A close carrying a speaker tag is never an opener.
            let tagged = delimiter.takes_attrib() && attrib_at(chars, index + close.len()).is_some();
            if delimiter.is_symmetric() && index > start && !tagged && reopens(chars, index) {
                return Err(ParseError::grammar(
                    format!(
                        "'{}' opened inside another '{}' span",
                        delimiter.open(),
                        delimiter.open()
                    ),
                    position.at_offset(position.offset + index),
                ));
            }
            if closes(delimiter, chars, index) {
                return Ok(Capture {
                    text,
                    end: index + close.len(),
                    closed: true,
                });
            }
        }

        text.push(ch);
        index += 1;
    }

    Ok(Capture {
        text,
        end: chars.len(),
        closed: false,
    })
}

/// Preceded by whitespace and followed by a word character.
fn reopens(chars: &[char], index: usize) -> bool {
    let after_space = chars[index - 1].is_whitespace();
    let before_word = chars
        .get(index + 1)
        .is_some_and(|next| next.is_alphanumeric());
    after_space && before_word
}

/// A block's `/` only closes at the end of the line or right before its speaker tag.
fn closes(delimiter: Delimiter, chars: &[char], index: usize) -> bool {
    match delimiter {
        Delimiter::Block => index + 1 == chars.len() || attrib_at(chars, index + 1).is_some(),
        _ => true,
    }
}

fn attrib_at(chars: &[char], index: usize) -> Option<char> {
    match (chars.get(index), chars.get(index + 1)) {
        (Some(&tag), Some('>')) if tag.is_alphanumeric() => Some(tag),
        _ => None,
    }
}

/// Accumulates plain text and finished nodes for one span.
struct Scanner {
    position: Position,
    nodes: Vec<Node>,
    buffer: String,
    buffer_start: usize,
    closed: bool,
}

impl Scanner {
    fn new(position: Position) -> Self {
        Self {
            position,
            nodes: Vec::new(),
            buffer: String::new(),
            buffer_start: 0,
            closed: true,
        }
    }

    fn push(&mut self, ch: char, index: usize) {
        if self.buffer.is_empty() {
            self.buffer_start = index;
        }
        self.buffer.push(ch);
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let at = self
                .position
                .at_offset(self.position.offset + self.buffer_start);
            self.nodes
                .push(Node::regular(std::mem::take(&mut self.buffer), at));
        }
    }

    fn finish(mut self) -> InlineParse {
        self.flush();
        InlineParse {
            nodes: self.nodes,
            closed: self.closed,
            transclude: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quill::ast::nodes_semantically_eq;
    use crate::quill::testing::factories::*;

    fn parse(line: &str) -> Vec<Node> {
        parse_text(line, Position::new(1, 0, 0)).unwrap().nodes
    }

    fn assert_parses(line: &str, expected: Vec<Node>) {
        let actual = parse(line);
        assert!(
            nodes_semantically_eq(&actual, &expected),
            "parsing {:?}\n  got:      {:?}\n  expected: {:?}",
            line,
            actual,
            expected
        );
    }

    #[test]
    fn parses_plain_text() {
        assert_parses("just some words", vec![regular("just some words")]);
    }

    #[test]
    fn parses_small_caps_inside_italics() {
        assert_parses(
            "*What's @she@ doing?*",
            vec![italics(vec![
                regular("What's "),
                small_caps(vec![regular("she")]),
                regular(" doing?"),
            ])],
        );
    }

    #[test]
    fn rejects_reopened_italics() {
        let err = parse_text("*What's *she* doing?*", Position::new(1, 0, 0)).unwrap_err();
        assert!(err.is_grammar());
    }

    #[test]
    fn parses_dialog_with_attrib() {
        assert_parses(
            "|Test dialog,| he said, |to see how spaces work|Z>",
            vec![
                dialog(vec![regular("Test dialog,")], None),
                regular(" he said, "),
                dialog(vec![regular("to see how spaces work")], Some('Z')),
            ],
        );
        assert_parses(
            "|Wait for me |A> she said.",
            vec![
                dialog(vec![regular("Wait for me ")], Some('A')),
                regular(" she said."),
            ],
        );
    }

    #[test]
    fn parses_block_with_inner_slashes() {
        assert_parses(
            "/Affinity: Pyromancy->Ice/high/",
            vec![block(vec![regular("Affinity: Pyromancy->Ice/high")], None)],
        );
        assert_parses(
            "/Some test text/Z>",
            vec![block(vec![regular("Some test text")], Some('Z'))],
        );
    }

    #[test]
    fn parses_dashquotes() {
        assert_parses(
            ">@dashquote example@ *example 2*",
            vec![dashquote(
                vec![
                    small_caps(vec![regular("dashquote example")]),
                    regular(" "),
                    italics(vec![regular("example 2")]),
                ],
                DashKind::Single,
            )],
        );
        assert_parses(
            ">>indented",
            vec![dashquote(vec![regular("indented")], DashKind::Double)],
        );
    }

    #[test]
    fn parses_quotes() {
        assert_parses(
            "|Some test `here' text|",
            vec![dialog(
                vec![
                    regular("Some test "),
                    single_quote(vec![regular("here")]),
                    regular(" text"),
                ],
                None,
            )],
        );
        assert_parses(
            "``quoted''",
            vec![double_quote(vec![regular("quoted")])],
        );
    }

    #[test]
    fn resolves_escapes() {
        assert_parses(
            "`If she\\'s here you should---'",
            vec![single_quote(vec![regular("If she's here you should---")])],
        );
        assert_parses("5 \\* 3", vec![regular("5 * 3")]);
    }

    #[test]
    fn parses_escape_spans_with_formatting() {
        assert_parses(
            "This is @*a more* complex@ {example of *some* text} end.",
            vec![
                regular("This is "),
                small_caps(vec![italics(vec![regular("a more")]), regular(" complex")]),
                regular(" "),
                escape(vec![
                    regular("example of "),
                    italics(vec![regular("some")]),
                    regular(" text"),
                ]),
                regular(" end."),
            ],
        );
    }

    #[test]
    fn parses_inline_pragma_in_escape() {
        assert_parses(
            "Before {%lit \\newpage} after",
            vec![
                regular("Before "),
                escape(vec![pragma("lit", Some("\\newpage"))]),
                regular(" after"),
            ],
        );
    }

    #[test]
    fn parses_line_forms() {
        assert_parses("---", vec![todo()]);
        assert_parses("//-", vec![beat_separator()]);
        assert_parses("//&&&", vec![beat_separator()]);
        assert_parses("%skipline", vec![pragma("skipline", None)]);
    }

    #[test]
    fn flags_transclusion() {
        let parsed = parse_text("%transclude ch1", Position::new(3, 0, 0)).unwrap();
        assert!(parsed.transclude);
        assert_eq!(parsed.nodes[0].as_pragma(), Some(("transclude", Some("ch1"))));
    }

    #[test]
    fn rejects_unknown_pragma_and_separators() {
        for line in ["%bogus", "%transclude", "//!!!//", "//x"] {
            assert!(
                parse_text(line, Position::new(1, 0, 0)).is_err(),
                "{:?} should fail",
                line
            );
        }
    }

    #[test]
    fn rejects_empty_mandatory_spans() {
        for line in ["**", "||", "`'", "````''''"] {
            assert!(
                parse_text(line, Position::new(1, 0, 0)).is_err(),
                "{:?} should fail",
                line
            );
        }
    }

    #[test]
    fn unterminated_span_absorbs_rest_of_line() {
        let parsed = parse_text("start *runs on", Position::new(1, 0, 0)).unwrap();
        assert!(!parsed.closed);
        assert!(nodes_semantically_eq(
            &parsed.nodes,
            &[regular("start "), italics(vec![regular("runs on")])]
        ));
    }

    #[test]
    fn records_absolute_offsets() {
        let nodes = parse("ab *cd @ef@*");
        assert_eq!(nodes[0].position().offset, 0);
        assert_eq!(nodes[1].position().offset, 3);
        let inner = nodes[1].children().unwrap();
        assert_eq!(inner[0].position().offset, 4);
        assert_eq!(inner[1].position().offset, 7);
        assert_eq!(inner[1].children().unwrap()[0].position().offset, 8);
    }

    #[test]
    fn literal_slash_mid_line() {
        assert_parses("either/or", vec![regular("either/or")]);
    }
}
