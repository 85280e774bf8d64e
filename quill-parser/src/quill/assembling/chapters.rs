//! The chapter loop
//!
//!     Chapters are read one after another from the lines following the prelude:
//!
//!         //!!!//
//!         ##1 (Label) description
//!
//!         Body paragraphs...
//!
//!     Inside a body two lines are directives rather than text. `%skip` drops the chapter
//!     (it is neither returned nor registered), and `%stop` (any case) ends the chapter and
//!     the whole book, keeping what was read so far.
//!
//!     When a chapter id is selected, chapters with another id are skipped unparsed. They are
//!     not registered either, so transcluding them fails.

use super::paragraphs::group_paragraphs;
use super::title::ChapterTitle;
use crate::quill::ast::{Chapter, Node, Paragraph, Position, Segment};
use crate::quill::context::CompilationContext;
use crate::quill::error::{ParseError, ParseResult, SourceLocation, StructuralWarning};
use crate::quill::inlines::parse_text;
use crate::quill::preprocess::SourceLine;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

static CHAPTER_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^//!+//").unwrap());

pub fn is_chapter_separator(text: &str) -> bool {
    CHAPTER_SEPARATOR.is_match(text)
}

/// Reads every chapter in `lines`, registering each finished chapter that has an id.
pub fn parse_chapters(
    lines: &[SourceLine],
    context: &mut CompilationContext,
    selected: Option<&str>,
) -> ParseResult<Vec<Chapter>> {
    ChapterAssembler::new(lines, context, selected).run()
}

enum Outcome {
    Parsed { chapter: Chapter, stop: bool },
    Dropped,
}

enum Body {
    Lines {
        lines: Vec<Vec<Node>>,
        transcludes: bool,
        stop: bool,
    },
    Skipped,
}

struct ChapterAssembler<'a> {
    lines: &'a [SourceLine],
    cursor: usize,
    context: &'a mut CompilationContext,
    selected: Option<&'a str>,
}

impl<'a> ChapterAssembler<'a> {
    fn new(
        lines: &'a [SourceLine],
        context: &'a mut CompilationContext,
        selected: Option<&'a str>,
    ) -> Self {
        Self {
            lines,
            cursor: 0,
            context,
            selected,
        }
    }

    fn run(mut self) -> ParseResult<Vec<Chapter>> {
        let mut chapters = Vec::new();

        loop {
            self.skip_blank();
            let Some(line) = self.peek() else {
                break;
            };
            if !self.title_ahead() {
                let warning = StructuralWarning::new(
                    "found end of book while looking for another chapter",
                    Some(line.number),
                );
                self.context.warn(warning);
                break;
            }

            match self.parse_chapter()? {
                Outcome::Parsed { chapter, stop } => {
                    chapters.push(chapter);
                    if stop {
                        break;
                    }
                }
                Outcome::Dropped => {}
            }
        }

        Ok(chapters)
    }

    fn parse_chapter(&mut self) -> ParseResult<Outcome> {
        let separator = self.advance_required()?;
        if !is_chapter_separator(&separator.text) {
            return Err(ParseError::grammar(
                format!("expected a chapter separator, got '{}'", separator.text),
                SourceLocation::line(separator.number),
            ));
        }

        self.skip_blank();
        let title_line = self.advance_required()?;
        if is_chapter_separator(&title_line.text) {
            return Err(ParseError::grammar(
                "chapter separator where a chapter title was expected",
                SourceLocation::line(title_line.number),
            ));
        }
        let title = ChapterTitle::parse(&title_line.text, title_line.number)?;

        if let Some(selected) = self.selected {
            if title.id.as_deref() != Some(selected) {
                debug!(label = %title.label, id = ?title.id, "chapter not selected, skipping");
                self.skip_to_separator();
                return Ok(Outcome::Dropped);
            }
        }

        self.skip_blank();
        let (lines, transcludes, stop) = match self.collect_body()? {
            Body::Lines {
                lines,
                transcludes,
                stop,
            } => (lines, transcludes, stop),
            Body::Skipped => {
                debug!(label = %title.label, "chapter marked %skip");
                return Ok(Outcome::Dropped);
            }
        };

        let segments = self.finalize(lines, transcludes)?;
        if let Some(id) = &title.id {
            self.context.registry.insert(id.as_str(), &segments);
        }

        let chapter = Chapter {
            id: title.id,
            label: title.label,
            description: title.description,
            segments,
        };
        debug!(
            label = %chapter.label,
            paragraphs = chapter.paragraph_count(),
            segments = chapter.segments.len(),
            "parsed chapter"
        );
        Ok(Outcome::Parsed { chapter, stop })
    }

    fn collect_body(&mut self) -> ParseResult<Body> {
        let mut lines = Vec::new();
        let mut transcludes = false;
        let mut pending_break = false;
        let mut chapter_line = 0;

        while let Some(line) = self.peek() {
            if is_chapter_separator(&line.text) {
                break;
            }
            self.cursor += 1;

            if line.text == "%skip" {
                self.skip_to_separator();
                return Ok(Body::Skipped);
            }
            if line.is_blank() {
                pending_break = true;
                chapter_line += 1;
                continue;
            }

            let position = Position::new(line.number, chapter_line, 0);
            if pending_break {
                lines.push(vec![Node::line_break(position)]);
                pending_break = false;
            }
            if line.text.eq_ignore_ascii_case("%stop") {
                info!(line = line.number, "%stop reached, ending the book");
                return Ok(Body::Lines {
                    lines,
                    transcludes,
                    stop: true,
                });
            }

            let parsed = parse_text(&line.text, position)?;
            if !parsed.closed {
                debug!(line = line.number, "unterminated span runs to end of line");
            }
            transcludes |= parsed.transclude;
            lines.push(parsed.nodes);
            chapter_line += 1;
        }

        Ok(Body::Lines {
            lines,
            transcludes,
            stop: false,
        })
    }

    /// Groups the body into paragraphs and splits it into segments around transclusions.
    fn finalize(&self, lines: Vec<Vec<Node>>, transcludes: bool) -> ParseResult<Vec<Segment>> {
        let paragraphs = group_paragraphs(lines);
        self.check_nested_transclusions(&paragraphs)?;
        if !transcludes {
            return Ok(vec![Arc::new(paragraphs)]);
        }

        let mut segments = Vec::new();
        let mut current: Vec<Paragraph> = Vec::new();

        for mut paragraph in paragraphs {
            let Some((target, position)) = transclusion_target(&paragraph) else {
                current.push(paragraph);
                continue;
            };

            let spliced = self.context.resolve_transclusion(&target, position)?;
            if !current.is_empty() {
                segments.push(Arc::new(std::mem::take(&mut current)));
            }
            debug!(%target, segments = spliced.len(), "transcluded chapter");
            segments.extend(spliced.iter().cloned());

            paragraph.remove(0);
            if !paragraph.is_empty() {
                current.push(paragraph);
            }
        }

        if !current.is_empty() || segments.is_empty() {
            segments.push(Arc::new(current));
        }
        Ok(segments)
    }

    /// Pragmas inside `{…}` are rendered later, but their targets must already be registered
    /// now, exactly like the spliced ones.
    fn check_nested_transclusions(&self, paragraphs: &[Paragraph]) -> ParseResult<()> {
        for node in paragraphs.iter().flatten() {
            if let Some(children) = node.children() {
                for (target, position) in nested_transclusions(children) {
                    self.context.resolve_transclusion(target, position)?;
                }
            }
        }
        Ok(())
    }

    fn peek(&self) -> Option<&'a SourceLine> {
        self.lines.get(self.cursor)
    }

    fn advance_required(&mut self) -> ParseResult<&'a SourceLine> {
        let line = self.peek().ok_or_else(|| {
            let last = self.lines.last().map_or(0, |line| line.number);
            ParseError::grammar("unexpected end of input", SourceLocation::line(last))
        })?;
        self.cursor += 1;
        Ok(line)
    }

    fn skip_blank(&mut self) {
        while self.peek().is_some_and(SourceLine::is_blank) {
            self.cursor += 1;
        }
    }

    fn skip_to_separator(&mut self) {
        while self
            .peek()
            .is_some_and(|line| !is_chapter_separator(&line.text))
        {
            self.cursor += 1;
        }
    }

    fn title_ahead(&self) -> bool {
        self.lines[self.cursor..]
            .iter()
            .any(|line| line.text.starts_with("##"))
    }
}

/// `(id, position)` when a paragraph opens with `%transclude id`.
fn transclusion_target(paragraph: &[Node]) -> Option<(String, Position)> {
    let head = paragraph.first()?;
    match head.as_pragma()? {
        ("transclude", Some(target)) => Some((target.to_string(), head.position())),
        _ => None,
    }
}

/// Every `%transclude` pragma in `nodes` and below.
fn nested_transclusions(nodes: &[Node]) -> Vec<(&str, Position)> {
    let mut found = Vec::new();
    for node in nodes {
        match node.as_pragma() {
            Some(("transclude", Some(target))) => found.push((target, node.position())),
            _ => {
                if let Some(children) = node.children() {
                    found.extend(nested_transclusions(children));
                }
            }
        }
    }
    found
}
