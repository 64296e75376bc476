//! # `embedor` Embedding Training Data Pipeline
//!
//! This crate turns token streams into supervised training batches for
//! word embedding models (CBOW and skip-gram).
//!
//! See:
//! * [`vocab`] to assign dense integer ids to tokens.
//! * [`batching`] to slide a window over a token stream and emit batches.
//! * [`text`] to split raw text into tokens.
//! * [`observe`] to receive advisory vocabulary warnings.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``.
//!
//! This is done by the ``types::EHash{*}`` type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! This swaps all HashMap/HashSet implementations for ``foldhash``;
//! ``ahash`` wins if both are enabled.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Building Batches
//!
//! ```rust
//! use embedor::batching::{BatchSource, WindowOptions};
//! use embedor::vocab::{IndexVocab, VocabOptions};
//!
//! let corpus = "the cat sat on the mat".split_whitespace().map(String::from).collect::<Vec<_>>();
//!
//! let vocab: IndexVocab = IndexVocab::from_tokens(&corpus, VocabOptions::default())?;
//!
//! let mut batcher = WindowOptions::new(2, (1, 1)).init_cbow(&vocab, &corpus)?;
//! let batch = batcher.next_batch().unwrap();
//!
//! assert_eq!(batch.contexts, vec![vec![1, 3], vec![2, 4]]);
//! assert_eq!(batch.labels, vec![2, 3]);
//! # Ok::<(), embedor::EmbedorError>(())
//! ```
#![warn(missing_docs, unused)]

pub mod batching;
pub mod errors;
pub mod observe;
pub mod text;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{EmbedorError, EmbedorResult};
