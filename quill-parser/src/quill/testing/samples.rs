//! Verified sample manuscripts
//!
//! Each sample is a file under `quill-parser/tests/fixtures/`, embedded at build time.

use crate::quill::loader::{Compilation, DocumentLoader, LoaderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// Two paragraphs by speaker `1`; the second does not open with dialogue.
    DialogClosed,
    /// Two paragraphs that both open with dialogue by speaker `1`.
    DialogContinued,
    /// Three paragraphs with a comment line inside the second.
    Comments,
    /// Every inline form, transclusion and speaker runs across four chapters.
    Showcase,
    /// Full prelude with all four global pragmas, plus a mid-chapter transclusion.
    FlagsAndTransclusion,
    /// Long chapter separator, dotted chapter id and comment-only lines.
    Lorem,
}

impl Sample {
    pub const ALL: [Sample; 6] = [
        Sample::DialogClosed,
        Sample::DialogContinued,
        Sample::Comments,
        Sample::Showcase,
        Sample::FlagsAndTransclusion,
        Sample::Lorem,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sample::DialogClosed => "dialog-closed",
            Sample::DialogContinued => "dialog-continued",
            Sample::Comments => "comments",
            Sample::Showcase => "showcase",
            Sample::FlagsAndTransclusion => "flags-and-transclusion",
            Sample::Lorem => "lorem",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Sample::DialogClosed => include_str!("../../../tests/fixtures/dialog-closed.quill"),
            Sample::DialogContinued => {
                include_str!("../../../tests/fixtures/dialog-continued.quill")
            }
            Sample::Comments => include_str!("../../../tests/fixtures/comments.quill"),
            Sample::Showcase => include_str!("../../../tests/fixtures/showcase.quill"),
            Sample::FlagsAndTransclusion => {
                include_str!("../../../tests/fixtures/flags-and-transclusion.quill")
            }
            Sample::Lorem => include_str!("../../../tests/fixtures/lorem.quill"),
        }
    }

    pub fn from_name(name: &str) -> Option<Sample> {
        Sample::ALL.into_iter().find(|sample| sample.name() == name)
    }

    pub fn loader(self) -> DocumentLoader {
        DocumentLoader::from_string(self.source())
    }

    pub fn compile(self) -> Result<Compilation, LoaderError> {
        self.loader().compile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_samples_compile() {
        for sample in Sample::ALL {
            let compiled = sample.compile();
            assert!(compiled.is_ok(), "{} failed: {:?}", sample.name(), compiled.err());
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Sample::from_name("lorem"), Some(Sample::Lorem));
        assert_eq!(Sample::from_name("missing"), None);
    }
}
