//! # Window Strategies
//!
//! A [`WindowStrategy`] turns one complete window into emitted pairs.

use core::fmt::Debug;

use crate::{
    batching::{Batch, WindowOptions},
    errors::{EmbedorError, EmbedorResult},
    types::TokenType,
};

/// How a complete window becomes ``(context, label)`` pairs.
pub trait WindowStrategy: Debug + Default + Clone + Send + Sync {
    /// Check the options against this strategy.
    fn validate(
        &self,
        options: &WindowOptions,
    ) -> EmbedorResult<()> {
        options.validate()
    }

    /// Append the pairs for one complete window to `batch`.
    ///
    /// ## Arguments
    /// * `window` - the window ids, oldest first; `window[left]` is the target.
    /// * `left` - the target offset.
    /// * `batch` - the batch accumulator.
    fn emit<T: TokenType>(
        &self,
        window: &[T],
        left: usize,
        batch: &mut Batch<T>,
    );
}

/// Continuous bag of words: the context predicts the target.
///
/// Each window emits one pair; the row is the window without the
/// target (in window order), the label is the target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cbow;

impl WindowStrategy for Cbow {
    fn emit<T: TokenType>(
        &self,
        window: &[T],
        left: usize,
        batch: &mut Batch<T>,
    ) {
        let mut context = Vec::with_capacity(window.len() - 1);
        context.extend_from_slice(&window[..left]);
        context.extend_from_slice(&window[left + 1..]);
        batch.push(context, window[left]);
    }
}

/// Skip-gram: the target predicts each context id.
///
/// Each window emits ``left + right`` pairs, in window order; the row is
/// ``[target]``, the label is one context id. The batch size must be a
/// multiple of ``left + right``, so no window straddles two batches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipGram;

impl WindowStrategy for SkipGram {
    fn validate(
        &self,
        options: &WindowOptions,
    ) -> EmbedorResult<()> {
        options.validate()?;

        let pairs = options.context_size();
        if pairs == 0 {
            return Err(EmbedorError::InvalidConfiguration(
                "skip-gram requires left + right > 0".to_string(),
            ));
        }
        if options.batch_size % pairs != 0 {
            return Err(EmbedorError::InvalidConfiguration(format!(
                "skip-gram batch_size ({}) must be a multiple of left + right ({pairs})",
                options.batch_size
            )));
        }
        Ok(())
    }

    fn emit<T: TokenType>(
        &self,
        window: &[T],
        left: usize,
        batch: &mut Batch<T>,
    ) {
        let target = window[left];
        for (idx, &context) in window.iter().enumerate() {
            if idx != left {
                batch.push(vec![target], context);
            }
        }
    }
}
