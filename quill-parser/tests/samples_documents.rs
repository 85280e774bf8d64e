//! Whole-document tests over the verified samples
//!
//! - Load documents through `Sample`, never ad-hoc strings
//! - Check structure (chapters, segments, paragraphs) and the nodes that matter

use quill_parser::quill::ast::{DashKind, NodeKind};
use quill_parser::quill::testing::assert_nodes_eq;
use quill_parser::quill::testing::factories::*;
use quill_parser::quill::testing::samples::Sample;
use rstest::rstest;
use std::sync::Arc;

#[test]
fn test_comment_line_keeps_paragraph_together() {
    let compiled = Sample::Comments.compile().unwrap();
    let chapter = &compiled.book.chapters[0];

    assert_eq!(chapter.label, "test");
    assert_eq!(chapter.segments.len(), 1);
    let paragraphs = &chapter.segments[0];
    assert_eq!(paragraphs.len(), 3);
    assert_nodes_eq(&paragraphs[0], &[regular("para")]);
    assert_nodes_eq(&paragraphs[1], &[regular("Paragraph 1 Paragraph 1 more")]);
    assert_nodes_eq(&paragraphs[2], &[regular("Paragraph 2")]);
}

#[test]
fn test_dialog_paragraphs() {
    let compiled = Sample::DialogContinued.compile().unwrap();
    let paragraphs = &compiled.book.chapters[0].segments[0];

    assert_nodes_eq(
        &paragraphs[1],
        &[
            dialog(vec![regular("Another dialog same char")], Some('1')),
            regular(" stuff"),
        ],
    );
}

#[test]
fn test_prelude_and_flags() {
    let compiled = Sample::FlagsAndTransclusion.compile().unwrap();
    let prelude = &compiled.book.prelude;
    let flags = compiled.context.flags;

    assert_eq!(prelude.title.as_deref(), Some("Title of the story goes here"));
    assert_eq!(prelude.author.as_deref(), Some("TestAuthor's Name"));
    assert!(flags.lettrine && flags.print_numbering && flags.skip_tests && flags.alt_style);
}

#[test]
fn test_mid_chapter_transclusion_shares_segments() {
    let compiled = Sample::FlagsAndTransclusion.compile().unwrap();
    let chapters = &compiled.book.chapters;
    let source = &chapters[0];
    let target = &chapters[2];

    assert_eq!(target.label, "TEST3");
    assert_eq!(target.id, None);
    assert_eq!(target.segments.len(), 3);
    assert!(Arc::ptr_eq(&target.segments[1], &source.segments[0]));
    assert_eq!(target.segments[0].len(), 4);
    assert_eq!(target.segments[2].len(), 3);
}

#[test]
fn test_transclusion_only_chapter() {
    let compiled = Sample::Showcase.compile().unwrap();
    let chapter = compiled.book.chapter("TEST2").unwrap();

    assert_eq!(chapter.segments.len(), 1);
    assert_eq!(chapter.paragraph_count(), 2);
}

#[test]
fn test_showcase_inline_forms() {
    let compiled = Sample::Showcase.compile().unwrap();
    let chapter = compiled.book.chapter("NUM").unwrap();
    let paragraphs: Vec<_> = chapter.paragraphs().collect();

    assert_nodes_eq(
        paragraphs[2],
        &[
            regular("This is "),
            italics(vec![regular("example")]),
            regular(" "),
            small_caps(vec![regular("line")]),
            regular("  "),
            escape(vec![regular("three")]),
            regular("."),
        ],
    );
    assert_nodes_eq(
        paragraphs[4],
        &[block(
            vec![regular(
                "example block another example block yet another example block",
            )],
            None,
        )],
    );
    assert_nodes_eq(paragraphs[8], &[pragma("skipline", None)]);
    assert_nodes_eq(paragraphs[9], &[todo()]);
}

#[test]
fn test_beat_separator_paragraph() {
    let compiled = Sample::Showcase.compile().unwrap();
    let chapter = compiled.book.chapter("ch2").unwrap();
    let paragraphs: Vec<_> = chapter.paragraphs().collect();

    assert_eq!(chapter.description.as_deref(), Some("stuff"));
    assert_nodes_eq(paragraphs[2], &[beat_separator()]);
}

#[test]
fn test_lorem_title_with_dotted_id() {
    let compiled = Sample::Lorem.compile().unwrap();
    let chapter = &compiled.book.chapters[0];

    assert_eq!(chapter.id.as_deref(), Some("III.A"));
    assert_eq!(chapter.label, "Lorem");
    assert_eq!(
        chapter.description.as_deref(),
        Some("ipsum dolor sit amet, consectetur adipiscing elit")
    );
    assert_eq!(chapter.paragraph_count(), 1);
}

#[rstest]
#[case(Sample::Showcase, Some("ch2"), "here")]
#[case(Sample::Showcase, Some("TEST"), "TITLE")]
#[case(Sample::Lorem, Some("III.A"), "Lorem")]
fn test_chapter_selection(
    #[case] sample: Sample,
    #[case] chapter: Option<&str>,
    #[case] label: &str,
) {
    let mut loader = sample.loader();
    if let Some(id) = chapter {
        loader = loader.with_chapter(id);
    }
    let compiled = loader.compile().unwrap();

    assert_eq!(compiled.book.chapters.len(), 1);
    assert_eq!(compiled.book.chapters[0].label, label);
}

#[test]
fn test_selected_chapter_cannot_transclude_skipped_one() {
    let err = Sample::Showcase
        .loader()
        .with_chapter("TEST2")
        .compile()
        .unwrap_err();
    assert!(err.to_string().contains("no chapter 'TEST'"));
}

#[test]
fn test_dashquote_in_document() {
    let compiled = quill_parser::quill::loader::DocumentLoader::from_string(
        "//!!!//\n##1 (One)\n>He left.\n>>Then came back.",
    )
    .compile()
    .unwrap();
    let paragraph = &compiled.book.chapters[0].segments[0][0];

    assert_eq!(paragraph.len(), 1);
    match paragraph[0].kind() {
        NodeKind::Dashquote { kind, .. } => assert_eq!(*kind, DashKind::Double),
        other => panic!("expected a dashquote, got {:?}", other),
    }
}
