//! # Text
//!
//! Helpers for producing token streams from raw text.

mod word_splitter;

#[doc(inline)]
pub use word_splitter::{DEFAULT_WORD_PATTERN, WordSplitter, WordSplitterOptions};
