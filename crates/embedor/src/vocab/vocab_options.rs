//! # Vocabulary Options

use crate::{
    errors::{EmbedorError, EmbedorResult},
    types::{CountType, TokenKey, TokenType},
    vocab::{IndexVocab, OneHotVocab},
};

/// Options for [`IndexVocab`] and [`OneHotVocab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabOptions {
    /// How many times a token must be seen before it is admitted.
    pub min_count: usize,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self { min_count: 1 }
    }
}

impl VocabOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `min_count` - the admission threshold; must be > 0.
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }

    /// Sets the admission threshold.
    pub fn with_min_count(
        self,
        min_count: usize,
    ) -> Self {
        Self { min_count }
    }

    /// Validate these options, and convert `min_count` to the count type.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidConfiguration`] if `min_count` is zero,
    /// or does not fit in `C`.
    pub fn try_min_count<C: CountType>(&self) -> EmbedorResult<C> {
        if self.min_count == 0 {
            return Err(EmbedorError::InvalidConfiguration(
                "min_count must be > 0".to_string(),
            ));
        }
        C::from_usize(self.min_count).ok_or_else(|| {
            EmbedorError::InvalidConfiguration(format!(
                "min_count ({}) exceeds count type capacity",
                self.min_count
            ))
        })
    }

    /// Initializes an [`IndexVocab`] from these options.
    pub fn init_index_vocab<K, T, C>(self) -> EmbedorResult<IndexVocab<K, T, C>>
    where
        K: TokenKey,
        T: TokenType,
        C: CountType,
    {
        IndexVocab::new(self)
    }

    /// Initializes a [`OneHotVocab`] from these options.
    pub fn init_one_hot_vocab<K, T, C>(self) -> EmbedorResult<OneHotVocab<K, T, C>>
    where
        K: TokenKey,
        T: TokenType,
        C: CountType,
    {
        OneHotVocab::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = VocabOptions::default();
        assert_eq!(options.min_count, 1);
        assert_eq!(options.with_min_count(5), VocabOptions::new(5));
    }

    #[test]
    fn test_try_min_count() {
        assert_eq!(VocabOptions::new(3).try_min_count::<u32>().unwrap(), 3);
        assert!(
            VocabOptions::new(0)
                .try_min_count::<u32>()
                .unwrap_err()
                .is_invalid_configuration()
        );
        assert!(
            VocabOptions::new(300)
                .try_min_count::<u8>()
                .unwrap_err()
                .is_invalid_configuration()
        );
    }

    #[test]
    fn test_init() {
        let vocab: IndexVocab<String, u32, u64> =
            VocabOptions::new(2).init_index_vocab().unwrap();
        assert_eq!(vocab.min_count(), 2);

        let vocab: OneHotVocab<String, u32, u64> =
            VocabOptions::default().init_one_hot_vocab().unwrap();
        assert_eq!(vocab.len(), 1);

        assert!(
            VocabOptions::new(0)
                .init_index_vocab::<String, u32, u64>()
                .is_err()
        );
    }
}
