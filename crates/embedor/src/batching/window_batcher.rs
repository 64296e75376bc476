//! # Sliding Window Batcher

use core::borrow::Borrow;

use crate::{
    batching::{
        Batch, BatchSource, Cbow, SkipGram, WindowOptions, WindowStrategy,
        sliding_window::SlidingWindow,
    },
    errors::{EmbedorError, EmbedorResult},
    vocab::VocabIndex,
};

/// Upper bound on the pairs pre-allocated per batch; larger batches grow on demand.
const MAX_PREALLOCATED_PAIRS: usize = 1 << 12;

/// Produces fixed-size batches of ``(context, label)`` pairs from a token stream.
///
/// Each token is looked up in the vocab and pushed into a sliding window of
/// ``left + 1 + right`` ids. Every complete window is handed to the
/// [`WindowStrategy`], and a batch is returned as soon as exactly
/// `batch_size` pairs have accumulated; the accumulator is reset before
/// the next call resumes the stream.
///
/// Output is deterministic: no shuffling, no sampling.
///
/// Pending pairs left at stream exhaustion are dropped, unless
/// [`WindowOptions::flush_partial`] is set.
///
/// # Parameters
/// * `V` - the vocabulary; owned, or a reference.
/// * `I` - the token iterator; may be unbounded.
/// * `S` - the window strategy.
pub struct WindowBatcher<V, I, S>
where
    V: VocabIndex,
    I: Iterator,
    I::Item: Borrow<V::Key>,
    S: WindowStrategy,
{
    vocab: V,
    tokens: core::iter::Fuse<I>,
    options: WindowOptions,
    strategy: S,
    window: SlidingWindow<V::Token>,
    scratch: Vec<V::Token>,
    pending: Batch<V::Token>,
    windows_seen: u64,
    batches_emitted: u64,
}

/// Continuous bag-of-words batches.
pub type CbowBatcher<V, I> = WindowBatcher<V, I, Cbow>;

/// Skip-gram batches.
pub type SkipGramBatcher<V, I> = WindowBatcher<V, I, SkipGram>;

impl<V, I, S> WindowBatcher<V, I, S>
where
    V: VocabIndex,
    I: Iterator,
    I::Item: Borrow<V::Key>,
    S: WindowStrategy,
{
    /// Create a new batcher with the default strategy.
    ///
    /// ## Arguments
    /// * `vocab` - a populated vocabulary.
    /// * `tokens` - the token stream.
    /// * `options` - window and batch options.
    ///
    /// ## Errors
    /// * [`EmbedorError::InvalidConfiguration`] if the options are rejected.
    /// * [`EmbedorError::Precondition`] if the vocab is not populated.
    pub fn new<It>(
        vocab: V,
        tokens: It,
        options: WindowOptions,
    ) -> EmbedorResult<Self>
    where
        It: IntoIterator<IntoIter = I>,
    {
        Self::with_strategy(vocab, tokens, options, S::default())
    }

    /// Create a new batcher with an explicit strategy.
    pub fn with_strategy<It>(
        vocab: V,
        tokens: It,
        options: WindowOptions,
        strategy: S,
    ) -> EmbedorResult<Self>
    where
        It: IntoIterator<IntoIter = I>,
    {
        strategy.validate(&options)?;

        if !vocab.is_populated() {
            return Err(EmbedorError::Precondition(
                "the vocabulary must be populated before producing batches".to_string(),
            ));
        }

        let window_size = options.window_size();
        Ok(Self {
            vocab,
            tokens: tokens.into_iter().fuse(),
            options,
            strategy,
            window: SlidingWindow::new(window_size),
            scratch: Vec::with_capacity(window_size),
            pending: Batch::with_capacity(options.batch_size.min(MAX_PREALLOCATED_PAIRS)),
            windows_seen: 0,
            batches_emitted: 0,
        })
    }

    /// The batcher options.
    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &V {
        &self.vocab
    }

    /// The number of complete windows seen so far.
    pub fn windows_seen(&self) -> u64 {
        self.windows_seen
    }

    /// The number of batches emitted so far.
    pub fn batches_emitted(&self) -> u64 {
        self.batches_emitted
    }

    /// The number of pairs accumulated towards the next batch.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn take_pending(&mut self) -> Batch<V::Token> {
        let batch = core::mem::replace(
            &mut self.pending,
            Batch::with_capacity(self.options.batch_size.min(MAX_PREALLOCATED_PAIRS)),
        );
        self.batches_emitted += 1;
        batch
    }
}

impl<V, I, S> BatchSource for WindowBatcher<V, I, S>
where
    V: VocabIndex,
    I: Iterator,
    I::Item: Borrow<V::Key>,
    S: WindowStrategy,
{
    type Token = V::Token;

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    fn next_batch(&mut self) -> Option<Batch<V::Token>> {
        let left = self.options.left;
        let batch_size = self.options.batch_size;

        while let Some(token) = self.tokens.next() {
            let id = self.vocab.lookup(token.borrow());
            if !self.window.push(id) {
                continue;
            }
            self.windows_seen += 1;

            self.window.copy_to(&mut self.scratch);
            self.strategy.emit(&self.scratch, left, &mut self.pending);

            debug_assert!(self.pending.len() <= batch_size);
            if self.pending.len() == batch_size {
                return Some(self.take_pending());
            }
        }

        if self.options.flush_partial && !self.pending.is_empty() {
            log::debug!("flushing a partial batch of {} pairs", self.pending.len());
            return Some(self.take_pending());
        }

        if !self.pending.is_empty() {
            log::trace!(
                "token stream exhausted; dropping {} pending pairs",
                self.pending.len()
            );
        }
        None
    }

    fn batch_size(&self) -> usize {
        self.options.batch_size
    }
}

impl<V, I, S> Iterator for WindowBatcher<V, I, S>
where
    V: VocabIndex,
    I: Iterator,
    I::Item: Borrow<V::Key>,
    S: WindowStrategy,
{
    type Item = Batch<V::Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch()
    }
}
