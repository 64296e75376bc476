//! # Window Options

use core::borrow::Borrow;

use crate::{
    batching::{CbowBatcher, SkipGramBatcher, WindowBatcher},
    errors::{EmbedorError, EmbedorResult},
    vocab::VocabIndex,
};

/// The largest supported window, ``left + 1 + right``.
pub const MAX_WINDOW_SIZE: usize = 1 << 16;

/// Options for [`WindowBatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// How many ids before the target to use as context.
    pub left: usize,

    /// How many ids after the target to use as context.
    pub right: usize,

    /// How many pairs to produce per batch.
    pub batch_size: usize,

    /// Emit the trailing partial batch when the token stream ends.
    ///
    /// When false (the default), pending pairs are dropped at exhaustion.
    pub flush_partial: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            left: 2,
            right: 2,
            batch_size: 64,
            flush_partial: false,
        }
    }
}

impl WindowOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `batch_size` - pairs per batch; must be > 0.
    /// * `context` - the ``(left, right)`` context widths.
    pub fn new(
        batch_size: usize,
        context: (usize, usize),
    ) -> Self {
        let (left, right) = context;
        Self {
            left,
            right,
            batch_size,
            ..Default::default()
        }
    }

    /// Sets the batch size.
    pub fn with_batch_size(
        self,
        batch_size: usize,
    ) -> Self {
        Self { batch_size, ..self }
    }

    /// Sets the ``(left, right)`` context widths.
    pub fn with_context(
        self,
        left: usize,
        right: usize,
    ) -> Self {
        Self {
            left,
            right,
            ..self
        }
    }

    /// Sets whether the trailing partial batch is emitted.
    pub fn with_flush_partial(
        self,
        flush_partial: bool,
    ) -> Self {
        Self {
            flush_partial,
            ..self
        }
    }

    /// The full window size: ``left + 1 + right``.
    pub fn window_size(&self) -> usize {
        self.context_size().saturating_add(1)
    }

    /// The number of context ids in a window: ``left + right``.
    pub fn context_size(&self) -> usize {
        self.left.saturating_add(self.right)
    }

    /// Validate these options.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidConfiguration`] for a zero `batch_size`,
    /// or a window larger than [`MAX_WINDOW_SIZE`].
    pub fn validate(&self) -> EmbedorResult<()> {
        if self.batch_size == 0 {
            return Err(EmbedorError::InvalidConfiguration(
                "batch_size must be > 0".to_string(),
            ));
        }
        let window_size = self
            .left
            .checked_add(self.right)
            .and_then(|n| n.checked_add(1));
        if !window_size.is_some_and(|n| n <= MAX_WINDOW_SIZE) {
            return Err(EmbedorError::InvalidConfiguration(format!(
                "window ({}, {}) exceeds the max window size ({MAX_WINDOW_SIZE})",
                self.left, self.right
            )));
        }
        Ok(())
    }

    /// Initializes a [`CbowBatcher`] from these options.
    pub fn init_cbow<V, It>(
        self,
        vocab: V,
        tokens: It,
    ) -> EmbedorResult<CbowBatcher<V, It::IntoIter>>
    where
        V: VocabIndex,
        It: IntoIterator,
        It::Item: Borrow<V::Key>,
    {
        WindowBatcher::new(vocab, tokens, self)
    }

    /// Initializes a [`SkipGramBatcher`] from these options.
    pub fn init_skip_gram<V, It>(
        self,
        vocab: V,
        tokens: It,
    ) -> EmbedorResult<SkipGramBatcher<V, It::IntoIter>>
    where
        V: VocabIndex,
        It: IntoIterator,
        It::Item: Borrow<V::Key>,
    {
        WindowBatcher::new(vocab, tokens, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = WindowOptions::default();
        assert_eq!(options.left, 2);
        assert_eq!(options.right, 2);
        assert_eq!(options.batch_size, 64);
        assert!(!options.flush_partial);
        assert_eq!(options.window_size(), 5);
        assert_eq!(options.context_size(), 4);
    }

    #[test]
    fn test_builders() {
        let options = WindowOptions::new(8, (1, 3))
            .with_flush_partial(true)
            .with_batch_size(16);
        assert_eq!(options.left, 1);
        assert_eq!(options.right, 3);
        assert_eq!(options.batch_size, 16);
        assert!(options.flush_partial);

        let options = options.with_context(0, 0);
        assert_eq!(options.window_size(), 1);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(
            WindowOptions::new(0, (1, 1))
                .validate()
                .unwrap_err()
                .is_invalid_configuration()
        );
        for context in [
            (usize::MAX, 1),
            (usize::MAX / 2, usize::MAX / 2 - 1),
            (MAX_WINDOW_SIZE, 0),
        ] {
            assert!(
                WindowOptions::new(1, context)
                    .validate()
                    .unwrap_err()
                    .is_invalid_configuration()
            );
        }
        assert!(
            WindowOptions::new(1, (MAX_WINDOW_SIZE - 1, 0))
                .validate()
                .is_ok()
        );
        assert!(WindowOptions::new(usize::MAX, (1, 1)).validate().is_ok());
    }
}
