//! CLI-specific transforms
//!
//! This module maps every `--to` target the CLI accepts onto the code that produces it: the
//! registered output formats render the whole document, `epub` renders per-chapter bodies and
//! the book's metadata as JSON for an external packager, `tex-title` produces the title and
//! author pages that go with the `tex` fragment, and the `ast-*` transforms dump the parsed tree.

use crate::error::CliError;
use quill_babel::formats::LatexFormat;
use quill_babel::FormatRegistry;
use quill_parser::quill::formats::{to_json_string, to_treeviz_str};
use quill_parser::quill::loader::Compilation;

/// Transforms available alongside the registry's formats
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tex-title", "ast-json", "ast-treeviz"];

/// True when `target` is a format or a transform.
pub fn is_known_target(registry: &FormatRegistry, target: &str) -> bool {
    registry.has(target) || AVAILABLE_TRANSFORMS.contains(&target)
}

/// Every accepted `--to` value with a one-line description (sorted by name).
pub fn list_targets(registry: &FormatRegistry) -> Vec<(String, String)> {
    let mut targets: Vec<(String, String)> = registry
        .list_formats()
        .into_iter()
        .map(|name| {
            let description = registry
                .get(&name)
                .map(|format| format.description().to_string())
                .unwrap_or_default();
            (name, description)
        })
        .collect();
    targets.push((
        "tex-title".to_string(),
        "LaTeX title and author pages".to_string(),
    ));
    targets.push(("ast-json".to_string(), "Parsed tree as JSON".to_string()));
    targets.push(("ast-treeviz".to_string(), "Parsed tree, one node per line".to_string()));
    targets.sort();
    targets
}

/// File extension used when the output path is derived rather than given.
pub fn output_extension(registry: &FormatRegistry, target: &str) -> String {
    match target {
        "epub" | "ast-json" => "json".to_string(),
        "ast-treeviz" => "txt".to_string(),
        "tex-title" => "tex".to_string(),
        _ => registry
            .get(target)
            .ok()
            .and_then(|format| format.file_extensions().first().map(|ext| ext.to_string()))
            .unwrap_or_else(|| target.to_string()),
    }
}

/// Produce the output for `target`. Format errors come back untouched so the caller can
/// attach the manuscript to them.
pub fn execute_transform(
    registry: &FormatRegistry,
    compiled: &Compilation,
    target: &str,
) -> Result<String, CliError> {
    let Compilation { book, context } = compiled;
    match target {
        "ast-json" => Ok(to_json_string(book)?),
        "ast-treeviz" => Ok(to_treeviz_str(book)),
        "tex-title" => Ok(format!(
            "{}\n{}\n",
            LatexFormat::title_page(&book.prelude, &context.flags),
            LatexFormat::author_page(&book.prelude)
        )),
        "epub" => {
            let package = registry.render_package(book, context, target)?;
            Ok(serde_json::to_string_pretty(&package)?)
        }
        _ => Ok(registry.render(book, context, target)?),
    }
}
