//! # Counting Index
//!
//! The admission state machine shared by [`crate::vocab::IndexVocab`] and
//! [`crate::vocab::OneHotVocab`].

use core::borrow::Borrow;

use crate::{
    errors::EmbedorResult,
    types::{CountType, TokenKey, TokenType},
    vocab::{TokenCounts, TokenIndex, TrimThreshold},
};

/// Counts paired with the index of admitted tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct CountingIndex<K: TokenKey, T: TokenType, C: CountType> {
    /// The running counts.
    pub counts: TokenCounts<K, C>,

    /// The admitted-token index.
    pub index: TokenIndex<K, T>,

    /// The number of completed scans.
    pub scans: usize,
}

impl<K: TokenKey, T: TokenType, C: CountType> CountingIndex<K, T, C> {
    /// Create an empty counting index.
    ///
    /// ## Errors
    /// [`crate::EmbedorError::InvalidConfiguration`] if `min_count` is zero.
    pub fn new(min_count: C) -> EmbedorResult<Self> {
        Ok(Self {
            counts: TokenCounts::new(min_count)?,
            index: TokenIndex::new(),
            scans: 0,
        })
    }

    /// Consume `tokens` once each, in order.
    ///
    /// Each token's count is incremented; a token whose count reaches
    /// `min_count` during this step is assigned the next free id.
    ///
    /// ## Returns
    /// The number of tokens admitted by this scan.
    ///
    /// ## Errors
    /// [`crate::EmbedorError::VocabSizeOverflow`] if `T` runs out of ids;
    /// tokens before the failing one remain counted.
    pub fn scan<I>(
        &mut self,
        tokens: I,
    ) -> EmbedorResult<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let mut admitted = 0;
        for token in tokens {
            let token: &K = token.borrow();
            if self.counts.observe(token) {
                self.index.admit(token.clone())?;
                admitted += 1;
            }
        }
        self.scans += 1;
        Ok(admitted)
    }

    /// Trim infrequent tokens from the counts, and drop them from the index.
    ///
    /// ## Returns
    /// The number of admitted tokens removed from the index.
    pub fn trim(
        &mut self,
        threshold: TrimThreshold<C>,
    ) -> EmbedorResult<usize> {
        let (min_count, trimmed) = self.counts.trim(threshold)?;

        let counts = &self.counts;
        let removed = self.index.retain(|k| counts.contains(k))?;

        log::debug!(
            "trimmed {trimmed} tokens below {min_count}; {removed} removed from the index"
        );
        Ok(removed)
    }
}
