//! Startup self-check
//!
//!     Before compiling a manuscript the CLI compiles the built-in samples and checks the
//!     behaviours that are easiest to break without noticing: dialogue continuation across
//!     paragraphs, comment lines inside paragraphs, and a long real-world chapter. A manuscript
//!     opts out with `%skiptests`; the config and `--no-self-check` can turn it off too.

use crate::error::CliError;
use quill_babel::formats::LatexFormat;
use quill_babel::Renderer;
use quill_parser::quill::testing::samples::Sample;
use tracing::debug;

fn render(sample: Sample) -> Result<String, CliError> {
    let compiled = sample
        .compile()
        .map_err(|e| CliError::SelfCheck(format!("sample '{}' does not compile: {}", sample.name(), e)))?;
    Renderer::new(&LatexFormat, &compiled.context)
        .render(&compiled.book)
        .map_err(|e| CliError::SelfCheck(format!("sample '{}' does not render: {}", sample.name(), e)))
}

fn expect_closing_quotes(sample: Sample, expected: usize) -> Result<(), CliError> {
    let found = render(sample)?.matches("''").count();
    if found != expected {
        return Err(CliError::SelfCheck(format!(
            "sample '{}' closes {} quotations, expected {}",
            sample.name(),
            found,
            expected
        )));
    }
    Ok(())
}

pub fn run() -> Result<(), CliError> {
    for sample in Sample::ALL {
        render(sample)?;
    }

    expect_closing_quotes(Sample::DialogClosed, 2)?;
    expect_closing_quotes(Sample::DialogContinued, 1)?;

    let comments = Sample::Comments
        .compile()
        .map_err(|e| CliError::SelfCheck(e.to_string()))?;
    let paragraphs: usize = comments
        .book
        .chapters
        .iter()
        .map(|chapter| chapter.paragraph_count())
        .sum();
    if paragraphs != 3 {
        return Err(CliError::SelfCheck(format!(
            "sample 'comments' has {} paragraphs, expected 3",
            paragraphs
        )));
    }

    if !render(Sample::Lorem)?.contains("Pellentesque") {
        return Err(CliError::SelfCheck(
            "sample 'lorem' lost its dialogue".to_string(),
        ));
    }

    debug!(samples = Sample::ALL.len(), "self-check passed");
    Ok(())
}
