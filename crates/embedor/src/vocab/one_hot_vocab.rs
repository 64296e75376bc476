//! # One-Hot Vocabulary
//!
//! A frequency-counting vocabulary for dense one-hot encodings.
//!
//! The lifecycle has two phases:
//! * building - [`OneHotVocab::scan`] and [`OneHotVocab::trim`] are allowed;
//!   slots are not yet fixed, so lookups fail with `InvalidState`;
//! * hardened - counts are dropped, the index is frozen, and only lookups remain.

use core::{borrow::Borrow, hash::Hash};
use std::borrow::Cow;

use crate::{
    errors::{EmbedorError, EmbedorResult},
    observe::{ObserverRef, VocabWarning, default_observer},
    types::{CountType, TokenKey, TokenType},
    vocab::{
        CountingIndex,
        TokenIndex,
        TrimThreshold,
        VocabIndex,
        VocabOptions,
        one_hot::{OneHotMatrix, one_hot_row},
        unk_id,
    },
};

#[derive(Debug, Clone)]
struct HardenedIndex<K: TokenKey, T: TokenType> {
    index: TokenIndex<K, T>,
    one_hots: Option<OneHotMatrix>,
    scans: usize,
}

#[derive(Debug, Clone)]
enum OneHotPhase<K: TokenKey, T: TokenType, C: CountType> {
    Building(CountingIndex<K, T, C>),
    Hardened(HardenedIndex<K, T>),
}

/// Vocabulary producing one-hot vectors for each admitted token.
///
/// Unknown tokens resolve to the `UNK` slot (`0`), exactly as in
/// [`crate::vocab::IndexVocab`].
///
/// [`OneHotVocab::trim`] re-packs slots, so slots are only handed out
/// once the vocab is hardened.
///
/// # Parameters
/// * `K` - the token key type.
/// * `T` - the token id (slot) type.
/// * `C` - the type used to store counts.
#[derive(Debug, Clone)]
pub struct OneHotVocab<K = String, T = u32, C = u64>
where
    K: TokenKey,
    T: TokenType,
    C: CountType,
{
    phase: OneHotPhase<K, T, C>,
    observer: ObserverRef,
}

fn slot<T: TokenType>(id: T) -> usize {
    id.to_usize().unwrap_or(0)
}

impl<K, T, C> OneHotVocab<K, T, C>
where
    K: TokenKey,
    T: TokenType,
    C: CountType,
{
    /// Create an empty vocabulary, holding only `UNK`.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidConfiguration`] for a bad `min_count`.
    pub fn new(options: VocabOptions) -> EmbedorResult<Self> {
        Ok(Self {
            phase: OneHotPhase::Building(CountingIndex::new(options.try_min_count()?)?),
            observer: default_observer(),
        })
    }

    /// Create a vocabulary and scan `tokens` into it.
    pub fn from_tokens<I>(
        tokens: I,
        options: VocabOptions,
    ) -> EmbedorResult<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let mut vocab = Self::new(options)?;
        vocab.scan(tokens)?;
        Ok(vocab)
    }

    /// Replace the advisory sink.
    pub fn with_observer(
        self,
        observer: ObserverRef,
    ) -> Self {
        Self { observer, ..self }
    }

    fn hardened_error(action: &str) -> EmbedorError {
        EmbedorError::InvalidState(format!(
            "this vocab has already been hardened and cannot {action}"
        ))
    }

    /// Process a token stream into the counts.
    ///
    /// May be called more than once. If a later scan changes the vocab size,
    /// a [`VocabWarning::ShapeChanged`] advisory is raised.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] if the vocab has been hardened.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens)))]
    pub fn scan<I>(
        &mut self,
        tokens: I,
    ) -> EmbedorResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let counting = match &mut self.phase {
            OneHotPhase::Building(counting) => counting,
            OneHotPhase::Hardened(_) => return Err(Self::hardened_error("scan any more data")),
        };

        let before = counting.index.len();
        counting.scan(tokens)?;
        let after = counting.index.len();

        if before > 1 && after != before {
            self.observer
                .warn(&VocabWarning::ShapeChanged { before, after });
        }

        Ok(self)
    }

    /// Trim the vocabulary by converting infrequent tokens to `UNK`.
    ///
    /// Trimmed tokens' counts are added to the `UNK` count, and the tokens
    /// are removed from the index; surviving slots are re-packed. Slots are
    /// not readable until [`OneHotVocab::harden`], so no caller sees them move.
    ///
    /// ## Arguments
    /// * `threshold` - an absolute count, or a fraction in `(0, 1)` of the total count.
    ///
    /// ## Errors
    /// * [`EmbedorError::InvalidState`] if the vocab has been hardened.
    /// * [`EmbedorError::InvalidConfiguration`] for a fraction outside `(0, 1)`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn trim(
        &mut self,
        threshold: TrimThreshold<C>,
    ) -> EmbedorResult<&mut Self> {
        match &mut self.phase {
            OneHotPhase::Building(counting) => {
                counting.trim(threshold)?;
            }
            OneHotPhase::Hardened(_) => return Err(Self::hardened_error("trim")),
        }
        Ok(self)
    }

    /// Drop the counts, freeze the index, and optionally precompute the one-hot matrix.
    ///
    /// ## Arguments
    /// * `precompute` - build the full ``N x N`` identity matrix; this trades
    ///   `O(N^2)` memory for allocation-free [`OneHotVocab::one_hot`] calls.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] if the vocab has already been hardened.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn harden(
        &mut self,
        precompute: bool,
    ) -> EmbedorResult<&mut Self> {
        let hardened = match &mut self.phase {
            OneHotPhase::Building(counting) => {
                let mut index = core::mem::take(&mut counting.index);
                index.shrink_to_fit();

                let one_hots = precompute.then(|| OneHotMatrix::identity(index.len()));

                HardenedIndex {
                    index,
                    one_hots,
                    scans: counting.scans,
                }
            }
            OneHotPhase::Hardened(_) => return Err(Self::hardened_error("be hardened again")),
        };

        log::debug!(
            "hardened vocab with {} slots (precomputed: {precompute})",
            hardened.index.len()
        );

        self.phase = OneHotPhase::Hardened(hardened);
        Ok(self)
    }

    /// Has this vocab been hardened?
    pub fn is_hardened(&self) -> bool {
        matches!(self.phase, OneHotPhase::Hardened(_))
    }

    /// Has the one-hot matrix been precomputed?
    pub fn is_precomputed(&self) -> bool {
        matches!(
            &self.phase,
            OneHotPhase::Hardened(HardenedIndex {
                one_hots: Some(_),
                ..
            })
        )
    }

    fn hardened(&self) -> EmbedorResult<&HardenedIndex<K, T>> {
        match &self.phase {
            OneHotPhase::Building(_) => Err(EmbedorError::InvalidState(
                "this vocab must be hardened before its slots can be read".to_string(),
            )),
            OneHotPhase::Hardened(hardened) => Ok(hardened),
        }
    }

    fn counting(&self) -> Option<&CountingIndex<K, T, C>> {
        match &self.phase {
            OneHotPhase::Building(counting) => Some(counting),
            OneHotPhase::Hardened(_) => None,
        }
    }

    /// The frozen id index.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] until the vocab is hardened.
    pub fn index(&self) -> EmbedorResult<&TokenIndex<K, T>> {
        Ok(&self.hardened()?.index)
    }

    /// Return the slot for `key`, or the `UNK` slot (`0`).
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] until the vocab is hardened.
    pub fn lookup<Q>(
        &self,
        key: &Q,
    ) -> EmbedorResult<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Ok(self.hardened()?.index.lookup(key))
    }

    /// Return the one-hot vector for `key`.
    ///
    /// If `key` is not in the vocabulary, returns the vector for `UNK`.
    /// Borrowed from the precomputed matrix if present; otherwise built on the fly.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] until the vocab is hardened.
    pub fn one_hot<Q>(
        &self,
        key: &Q,
    ) -> EmbedorResult<Cow<'_, [u8]>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hardened = self.hardened()?;
        let n = hardened.index.len();
        Ok(one_hot_row(
            hardened.one_hots.as_ref(),
            n,
            slot(hardened.index.lookup(key)),
        ))
    }

    /// Return the one-hot vector for slot `id`; `None` if out of range.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] until the vocab is hardened.
    pub fn one_hot_of_id(
        &self,
        id: T,
    ) -> EmbedorResult<Option<Cow<'_, [u8]>>> {
        let hardened = self.hardened()?;
        let n = hardened.index.len();
        Ok(id
            .to_usize()
            .filter(|&idx| idx < n)
            .map(|idx| one_hot_row(hardened.one_hots.as_ref(), n, idx)))
    }

    /// The number of words in the vocabulary (including `UNK`).
    ///
    /// Available in both phases; it is the one-hot vector width.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match &self.phase {
            OneHotPhase::Building(counting) => counting.index.len(),
            OneHotPhase::Hardened(hardened) => hardened.index.len(),
        }
    }

    /// The token held by slot `id`; `None` for `UNK` and unknown ids.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] until the vocab is hardened.
    pub fn token_of(
        &self,
        id: T,
    ) -> EmbedorResult<Option<&K>> {
        Ok(self.hardened()?.index.token_of(id))
    }

    /// The admitted tokens, in slot order (starting at slot `1`).
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidState`] until the vocab is hardened.
    pub fn tokens(&self) -> EmbedorResult<&[K]> {
        Ok(self.hardened()?.index.tokens())
    }

    /// The count for `key`; `None` once hardened.
    pub fn count<Q>(
        &self,
        key: &Q,
    ) -> Option<C>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counting().map(|c| c.counts.count(key))
    }

    /// Is `key` currently admitted? `None` once hardened.
    pub fn is_admitted<Q>(
        &self,
        key: &Q,
    ) -> Option<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counting().map(|c| c.index.contains(key))
    }

    /// The mass accumulated under `UNK` by trimming; `None` once hardened.
    pub fn unk_count(&self) -> Option<C> {
        self.counting().map(|c| c.counts.unk_count())
    }

    /// The number of tokens seen across all scans; `None` once hardened.
    pub fn total_seen(&self) -> Option<u64> {
        self.counting().map(|c| c.counts.total_seen())
    }

    /// The number of scans performed.
    pub fn scan_count(&self) -> usize {
        match &self.phase {
            OneHotPhase::Building(counting) => counting.scans,
            OneHotPhase::Hardened(hardened) => hardened.scans,
        }
    }
}

/// Batchers only accept hardened vocabs; until then every key resolves to `UNK`.
impl<K, T, C> VocabIndex for OneHotVocab<K, T, C>
where
    K: TokenKey,
    T: TokenType,
    C: CountType,
{
    type Key = K;
    type Token = T;

    fn lookup(
        &self,
        key: &K,
    ) -> T {
        match &self.phase {
            OneHotPhase::Building(_) => unk_id(),
            OneHotPhase::Hardened(hardened) => hardened.index.lookup(key),
        }
    }

    fn len(&self) -> usize {
        OneHotVocab::len(self)
    }

    fn is_populated(&self) -> bool {
        self.is_hardened()
    }
}
