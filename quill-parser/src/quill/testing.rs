//! Testing utilities
//!
//!     Quill is a small private markup and there is no corpus of real manuscripts to test
//!     against, so made-up source strings drift from what writers actually type. Tests that
//!     need whole documents use the verified samples in `tests/fixtures/` through [samples];
//!     tests of a single stage build their expected trees with [factories] and compare with
//!     [assert_nodes_eq], which ignores positions.
//!
//!     Examples:
//!
//!     ```rust,ignore
//!     use quill_parser::quill::testing::samples::Sample;
//!     use quill_parser::quill::testing::factories::*;
//!
//!     let compiled = Sample::DialogContinued.compile().unwrap();
//!     let first = &compiled.book.chapters[0];
//!
//!     assert_nodes_eq(&first.segments[0][0], &[dialog(vec![regular("...")], Some('1'))]);
//!     ```
//!
//!     The samples are embedded in the library so the CLI self-check can run them without
//!     the source tree around.

pub mod factories;
pub mod samples;

use crate::quill::ast::{nodes_semantically_eq, Node};

/// Panics with both trees when `actual` and `expected` differ beyond positions.
pub fn assert_nodes_eq(actual: &[Node], expected: &[Node]) {
    if !nodes_semantically_eq(actual, expected) {
        panic!(
            "node trees differ\n  actual:   {:#?}\n  expected: {:#?}",
            actual, expected
        );
    }
}
