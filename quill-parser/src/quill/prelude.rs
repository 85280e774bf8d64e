//! Prelude parsing
//!
//!     A manuscript may open with title page metadata and global pragmas before its first
//!     chapter separator:
//!
//!         :Title: The Long Road
//!         :Author: A. Writer
//!         :Date: 2019
//!         %lettrine
//!
//!     The prelude ends at the first line that is neither blank, a `%pragma` nor a metadata
//!     line. Without a title or an author the lines are not a prelude at all: they are handed
//!     back untouched and no flag is set.

use crate::quill::ast::Prelude;
use crate::quill::context::RenderFlags;
use crate::quill::error::{ParseError, ParseResult, SourceLocation};
use crate::quill::preprocess::SourceLine;
use tracing::debug;

const TITLE: &str = ":Title:";
const AUTHOR: &str = ":Author:";
const DATE: &str = ":Date:";

/// Splits the prelude off `lines`. Returns the prelude and the lines after it.
pub fn parse_prelude(
    lines: Vec<SourceLine>,
    flags: &mut RenderFlags,
) -> ParseResult<(Prelude, Vec<SourceLine>)> {
    let mut prelude = Prelude::default();
    let mut pending = *flags;
    let mut consumed = 0;

    for line in &lines {
        let text = line.text.as_str();
        if text.is_empty() {
            // blank
        } else if let Some(name) = text.strip_prefix('%') {
            let name = name.trim();
            if !pending.apply_pragma(name) {
                return Err(ParseError::grammar(
                    format!("unknown prelude pragma '%{}'", name),
                    SourceLocation::line(line.number),
                ));
            }
        } else if let Some(value) = metadata(text, TITLE) {
            prelude.title = Some(value);
        } else if let Some(value) = metadata(text, AUTHOR) {
            prelude.author = Some(value);
        } else if let Some(value) = metadata(text, DATE) {
            prelude.date = Some(value);
        } else {
            break;
        }
        consumed += 1;
    }

    if prelude.title.is_none() && prelude.author.is_none() {
        debug!("no title or author, document has no prelude");
        return Ok((Prelude::default(), lines));
    }

    *flags = pending;
    debug!(%prelude, ?flags, "parsed prelude");
    let rest = lines.into_iter().skip(consumed).collect();
    Ok((prelude, rest))
}

fn metadata(text: &str, key: &str) -> Option<String> {
    text.find(key)
        .map(|index| text[index + key.len()..].trim().to_string())
}
