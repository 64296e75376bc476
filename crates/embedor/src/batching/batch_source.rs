//! # Batch Source Trait

use crate::{batching::Batch, types::TokenType};

/// The "produce next batch" capability.
///
/// Sources are pull-based and stateful; a single consumer drives them.
pub trait BatchSource {
    /// The token id type.
    type Token: TokenType;

    /// Produce the next full batch.
    ///
    /// ## Returns
    /// `None` once the underlying token stream is exhausted
    /// without completing another batch.
    fn next_batch(&mut self) -> Option<Batch<Self::Token>>;

    /// The number of pairs in a full batch.
    fn batch_size(&self) -> usize;
}

impl<B: BatchSource + ?Sized> BatchSource for Box<B> {
    type Token = B::Token;

    fn next_batch(&mut self) -> Option<Batch<Self::Token>> {
        (**self).next_batch()
    }

    fn batch_size(&self) -> usize {
        (**self).batch_size()
    }
}
