//! # Token Counter

use core::{borrow::Borrow, hash::Hash};

use crate::{
    errors::{EmbedorError, EmbedorResult},
    types::{CountType, EHashMap, TokenKey, hash_map_new},
};

/// A trim threshold for [`TokenCounts::trim`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimThreshold<C: CountType> {
    /// Tokens seen fewer than this many times are trimmed.
    Count(C),

    /// Tokens whose share of the total count is below this fraction are trimmed.
    ///
    /// Must be in `(0, 1)`; resolved as `ceil(fraction * total)` at trim time.
    Fraction(f64),
}

impl<C: CountType> From<C> for TrimThreshold<C> {
    fn from(count: C) -> Self {
        Self::Count(count)
    }
}

impl<C: CountType> TrimThreshold<C> {
    /// Resolve this threshold to an absolute count.
    ///
    /// ## Arguments
    /// * `total` - the total observed count to resolve fractions against.
    pub fn resolve(
        &self,
        total: u64,
    ) -> EmbedorResult<C> {
        match *self {
            TrimThreshold::Count(count) => Ok(count),
            TrimThreshold::Fraction(fraction) => {
                if !(fraction > 0.0 && fraction < 1.0) {
                    return Err(EmbedorError::InvalidConfiguration(format!(
                        "trim fraction ({fraction}) must be in (0, 1)"
                    )));
                }
                let count = (fraction * total as f64).ceil();
                C::from_f64(count).ok_or_else(|| {
                    EmbedorError::InvalidConfiguration(format!(
                        "trim threshold ({count}) exceeds count type capacity"
                    ))
                })
            }
        }
    }
}

/// Running token occurrence counts, with the admission threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCounts<K: TokenKey, C: CountType> {
    /// Occurrences needed before a token is admitted.
    min_count: C,

    /// The per-token counts.
    counts: EHashMap<K, C>,

    /// Mass reassigned to the unknown token by trimming.
    unk_count: C,

    /// Every token observed, admitted or not.
    total_seen: u64,
}

impl<K: TokenKey, C: CountType> TokenCounts<K, C> {
    /// Create a new counter.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidConfiguration`] if `min_count` is zero.
    pub fn new(min_count: C) -> EmbedorResult<Self> {
        if min_count.is_zero() {
            return Err(EmbedorError::InvalidConfiguration(
                "min_count must be > 0".to_string(),
            ));
        }
        Ok(Self {
            min_count,
            counts: hash_map_new(),
            unk_count: C::zero(),
            total_seen: 0,
        })
    }

    /// The admission threshold.
    pub fn min_count(&self) -> C {
        self.min_count
    }

    /// Count one occurrence of `key`.
    ///
    /// Counts saturate at `C::max_value()`.
    ///
    /// ## Returns
    /// `true` iff this occurrence brought the count up to `min_count`;
    /// the one-time admission event.
    pub fn observe(
        &mut self,
        key: &K,
    ) -> bool {
        self.total_seen = self.total_seen.saturating_add(1);

        let (before, after) = match self.counts.get_mut(key) {
            Some(count) => {
                let before = *count;
                *count = before.saturating_add(C::one());
                (before, *count)
            }
            None => {
                self.counts.insert(key.clone(), C::one());
                (C::zero(), C::one())
            }
        };

        before < self.min_count && after >= self.min_count
    }

    /// The count for `key`; zero if never seen (or trimmed).
    pub fn count<Q>(
        &self,
        key: &Q,
    ) -> C
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or_else(C::zero)
    }

    /// Is `key` currently counted?
    pub fn contains<Q>(
        &self,
        key: &Q,
    ) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.contains_key(key)
    }

    /// The mass accumulated under the unknown token.
    pub fn unk_count(&self) -> C {
        self.unk_count
    }

    /// The number of tokens observed across all scans.
    pub fn total_seen(&self) -> u64 {
        self.total_seen
    }

    /// The sum of all counts, including the unknown token's.
    pub fn total_count(&self) -> u64 {
        self.counts
            .values()
            .chain(core::iter::once(&self.unk_count))
            .filter_map(|c| c.to_u64())
            .fold(0, u64::saturating_add)
    }

    /// The number of distinct tokens currently counted.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Move the counts of infrequent tokens to the unknown token.
    ///
    /// The unknown token's count saturates at `C::max_value()`.
    ///
    /// ## Returns
    /// The resolved absolute threshold, and the number of tokens trimmed.
    pub fn trim(
        &mut self,
        threshold: TrimThreshold<C>,
    ) -> EmbedorResult<(C, usize)> {
        let min_count = threshold.resolve(self.total_count())?;

        let before = self.counts.len();
        let mut moved = C::zero();
        self.counts.retain(|_, count| {
            if *count < min_count {
                moved = moved.saturating_add(*count);
                false
            } else {
                true
            }
        });
        self.unk_count = self.unk_count.saturating_add(moved);

        Ok((min_count, before - self.counts.len()))
    }
}
