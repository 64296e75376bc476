//! # Batching
//!
//! Turns a token stream and a populated vocabulary into fixed-size batches
//! of ``(context, label)`` pairs.
//!
//! * [`BatchSource`] - the "produce next batch" capability.
//! * [`WindowBatcher`] - the shared sliding-window mechanics, with a
//!   [`WindowStrategy`] deciding how a complete window becomes pairs:
//!   * [`Cbow`] / [`CbowBatcher`] - one ``(context ids, target)`` pair per window;
//!   * [`SkipGram`] / [`SkipGramBatcher`] - one ``([target], context id)`` pair
//!     per context position.
//!
//! ## Example
//!
//! ```rust
//! use embedor::{
//!     batching::{BatchSource, WindowOptions},
//!     vocab::{IndexVocab, VocabOptions},
//! };
//!
//! let tokens = ["a", "b", "a", "c", "a", "b"];
//! let vocab: IndexVocab<&str> = IndexVocab::from_tokens(tokens, VocabOptions::default())?;
//!
//! let mut batcher = WindowOptions::new(1, (1, 1)).init_cbow(&vocab, tokens)?;
//!
//! let batch = batcher.next_batch().unwrap();
//! assert_eq!(batch.contexts, vec![vec![1, 1]]);
//! assert_eq!(batch.labels, vec![2]);
//! # Ok::<(), embedor::EmbedorError>(())
//! ```
//!
//! Windows are only built from validated [`WindowOptions`]:
//!
//! ```compile_fail
//! let window = embedor::batching::SlidingWindow::<u32>::new(0);
//! ```

mod batch;
mod batch_source;
mod sliding_window;
mod window_batcher;
mod window_options;
mod window_strategy;

#[doc(inline)]
pub use batch::Batch;
#[doc(inline)]
pub use batch_source::BatchSource;
#[doc(inline)]
pub use window_batcher::{CbowBatcher, SkipGramBatcher, WindowBatcher};
#[doc(inline)]
pub use window_options::{MAX_WINDOW_SIZE, WindowOptions};
#[doc(inline)]
pub use window_strategy::{Cbow, SkipGram, WindowStrategy};
