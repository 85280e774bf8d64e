//! Main module for quill library functionality

pub mod assembling;
pub mod ast;
pub mod context;
pub mod error;
pub mod formats;
pub mod inlines;
pub mod loader;
pub mod merging;
pub mod parsing;
pub mod prelude;
pub mod preprocess;
pub mod testing;
