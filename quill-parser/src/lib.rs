//! # quill
//!
//! A parser for the quill manuscript format.
//!
//! File Layout
//!
//!     The pipeline runs forward, one stage per module, and every stage hands a plain value to
//!     the next one:
//!
//!     src/quill
//!       ├── preprocess   comment stripping and line numbering
//!       ├── prelude      title / author / date and global pragmas
//!       ├── inlines      recursive parser for one logical line
//!       ├── merging      fusion of adjacent nodes of the same kind
//!       ├── assembling   paragraphs, chapters, transclusion
//!       └── parsing      the entry points tying the stages together
//!
//!     Rendering lives in the quill-babel crate. This crate stops at the [`Book`](quill::ast::Book).
//!
//! For testing guidelines, see the [testing module](quill::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod quill;
