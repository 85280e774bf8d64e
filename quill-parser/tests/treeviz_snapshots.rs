//! Snapshot tests for the treeviz debug view

use quill_parser::quill::formats::to_treeviz_str;
use quill_parser::quill::testing::samples::Sample;

#[test]
fn test_dialog_continued_tree() {
    let compiled = Sample::DialogContinued.compile().unwrap();
    let output = to_treeviz_str(&compiled.book);

    insta::assert_snapshot!(output, @r###"
    ⧉ (untitled)
    └─ § test
      ├─ ¶ 1 nodes
      │ └─ " Dialog 1>
      │   └─ ◦ This is some test dialog which...
      └─ ¶ 2 nodes
        ├─ " Dialog 1>
        │ └─ ◦ Another dialog same char
        └─ ◦  stuff
    "###);
}

#[test]
fn test_segments_drawn_for_transclusion() {
    let compiled = Sample::FlagsAndTransclusion.compile().unwrap();
    let output = to_treeviz_str(&compiled.book);

    assert!(output.starts_with("⧉ Title of the story goes here by TestAuthor's Name\n"));
    assert!(output.contains("└─ § TEST3\n"));
    assert_eq!(output.matches("⊞ segment").count(), 3);
}
