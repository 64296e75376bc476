//! # Vocabulary
//!
//! This module provides the token vocabularies.
//!
//! ## Admission
//!
//! Both vocabularies share one admission state machine, [`CountingIndex`]:
//! * [`TokenCounts`] - running counts, and the `min_count` threshold;
//! * [`TokenIndex`] - the dense ``{ K <-> T }`` bijection, with `UNK` at `0`.
//!
//! A token is admitted exactly once, at the scan step where its count
//! reaches `min_count`.
//!
//! ## Encodings
//!
//! * [`IndexVocab`] - raw integer ids; ids are append-only and stable.
//! * [`OneHotVocab`] - dense one-hot vectors; supports trimming, and a
//!   hardened (frozen) phase with an optional precomputed matrix.
//!
//! Batch generators consume either through the [`VocabIndex`] trait.
//!
//! One-hot rows are only reachable through a hardened [`OneHotVocab`]:
//!
//! ```compile_fail
//! let row = embedor::vocab::one_hot::one_hot_vector(3, 5);
//! ```

mod counting_index;
mod index_vocab;
mod one_hot;
mod one_hot_vocab;
mod token_counts;
mod token_index;
mod vocab_index;
mod vocab_options;

#[doc(inline)]
pub use counting_index::CountingIndex;
#[doc(inline)]
pub use index_vocab::IndexVocab;
#[doc(inline)]
pub use one_hot::OneHotMatrix;
#[doc(inline)]
pub use one_hot_vocab::OneHotVocab;
#[doc(inline)]
pub use token_counts::{TokenCounts, TrimThreshold};
#[doc(inline)]
pub use token_index::{TokenIndex, UNK_LABEL, unk_id};
#[doc(inline)]
pub use vocab_index::VocabIndex;
#[doc(inline)]
pub use vocab_options::VocabOptions;
