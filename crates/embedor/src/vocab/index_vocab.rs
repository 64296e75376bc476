//! # Index Vocabulary ``{ K -> T }``

use core::{borrow::Borrow, hash::Hash};

use crate::{
    errors::EmbedorResult,
    observe::{ObserverRef, VocabWarning, default_observer},
    types::{CountType, TokenKey, TokenType},
    vocab::{CountingIndex, TokenIndex, VocabIndex, VocabOptions},
};

/// Vocabulary mapping tokens to stable integer ids.
///
/// Ids are append-only: a token is admitted once, at the scan step where its
/// count reaches `min_count`, and keeps its id for the life of the vocab.
/// Id `0` is the unknown token, returned for every token not admitted.
///
/// # Parameters
/// * `K` - the token key type.
/// * `T` - the token id type.
/// * `C` - the type used to store counts.
#[derive(Debug, Clone)]
pub struct IndexVocab<K = String, T = u32, C = u64>
where
    K: TokenKey,
    T: TokenType,
    C: CountType,
{
    counting: CountingIndex<K, T, C>,
    observer: ObserverRef,
}

impl<K, T, C> IndexVocab<K, T, C>
where
    K: TokenKey,
    T: TokenType,
    C: CountType,
{
    /// Create an empty vocabulary, holding only `UNK`.
    ///
    /// ## Errors
    /// [`crate::EmbedorError::InvalidConfiguration`] for a bad `min_count`.
    pub fn new(options: VocabOptions) -> EmbedorResult<Self> {
        Ok(Self {
            counting: CountingIndex::new(options.try_min_count()?)?,
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

    /// Process a token stream, admitting tokens as they reach `min_count`.
    ///
    /// May be called more than once; counts accumulate. Rescanning a vocab
    /// which already has admitted tokens raises a [`VocabWarning::Rescan`]
    /// advisory, since new ids widen any previously produced one-hot encodings.
    ///
    /// ## Arguments
    /// * `tokens` - the tokens, consumed once each, in order.
    ///
    /// ## Returns
    /// `&mut Self` (for composability).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens)))]
    pub fn scan<I>(
        &mut self,
        tokens: I,
    ) -> EmbedorResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let len = self.len();
        if len > 1 {
            self.observer.warn(&VocabWarning::Rescan { len });
        }

        let admitted = self.counting.scan(tokens)?;
        log::debug!(
            "scan #{} admitted {admitted} tokens; vocab size {}",
            self.counting.scans,
            self.len()
        );

        Ok(self)
    }

    /// Return the id for `key`, or the `UNK` id (`0`) if not admitted.
    pub fn lookup<Q>(
        &self,
        key: &Q,
    ) -> T
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counting.index.lookup(key)
    }

    /// Return the id for `key`, if admitted.
    pub fn get<Q>(
        &self,
        key: &Q,
    ) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counting.index.get(key)
    }

    /// The number of words in the vocabulary (including `UNK`).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.counting.index.len()
    }

    /// The token held by `id`; `None` for `UNK` and unknown ids.
    pub fn token_of(
        &self,
        id: T,
    ) -> Option<&K> {
        self.counting.index.token_of(id)
    }

    /// The admitted tokens, in id order (starting at id `1`).
    pub fn tokens(&self) -> &[K] {
        self.counting.index.tokens()
    }

    /// The underlying id index.
    pub fn index(&self) -> &TokenIndex<K, T> {
        &self.counting.index
    }

    /// The number of times `key` has been seen.
    pub fn count<Q>(
        &self,
        key: &Q,
    ) -> C
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counting.counts.count(key)
    }

    /// The number of tokens seen across all scans, admitted or not.
    pub fn total_seen(&self) -> u64 {
        self.counting.counts.total_seen()
    }

    /// The admission threshold.
    pub fn min_count(&self) -> C {
        self.counting.counts.min_count()
    }

    /// The number of scans performed.
    pub fn scan_count(&self) -> usize {
        self.counting.scans
    }
}

impl<K, T, C> VocabIndex for IndexVocab<K, T, C>
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
        self.counting.index.lookup(key)
    }

    fn len(&self) -> usize {
        self.counting.index.len()
    }

    fn is_populated(&self) -> bool {
        self.counting.scans > 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::observe::RecordingObserver;

    #[test]
    fn test_first_seen_ids() {
        let vocab: IndexVocab<&str> =
            IndexVocab::from_tokens(["a", "b", "a", "c", "a", "b"], VocabOptions::default())
                .unwrap();

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.lookup(&"a"), 1);
        assert_eq!(vocab.lookup(&"b"), 2);
        assert_eq!(vocab.lookup(&"c"), 3);
        assert_eq!(vocab.lookup(&"d"), 0);
        assert_eq!(vocab.tokens(), &["a", "b", "c"]);
        assert_eq!(vocab.token_of(2), Some(&"b"));
        assert_eq!(vocab.token_of(0), None);
        assert_eq!(vocab.count(&"a"), 3);
        assert_eq!(vocab.total_seen(), 6);
        assert_eq!(vocab.scan_count(), 1);
    }

    #[test]
    fn test_min_count_admission() {
        let vocab: IndexVocab<String> =
            IndexVocab::from_tokens(
                ["x", "y", "x"].map(String::from),
                VocabOptions::new(2),
            )
            .unwrap();

        assert_eq!(vocab.lookup("x"), 1);
        assert_eq!(vocab.get("x"), Some(1));
        assert_eq!(vocab.lookup("y"), 0);
        assert_eq!(vocab.get("y"), None);
        assert_eq!(vocab.count("y"), 1);
        assert_eq!(vocab.total_seen(), 3);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_rescan_is_cumulative_and_stable() {
        let observer = Arc::new(RecordingObserver::new());
        let mut vocab: IndexVocab<&str> = IndexVocab::new(VocabOptions::new(2))
            .unwrap()
            .with_observer(observer.clone());

        vocab.scan(["a", "b", "a"]).unwrap();
        assert!(observer.warnings().is_empty());
        assert_eq!(vocab.lookup(&"a"), 1);
        assert_eq!(vocab.lookup(&"b"), 0);

        // "b" crosses the threshold on the second scan.
        vocab.scan(["c", "b", "a"]).unwrap();
        assert_eq!(observer.warnings(), vec![VocabWarning::Rescan { len: 2 }]);

        assert_eq!(vocab.lookup(&"a"), 1);
        assert_eq!(vocab.lookup(&"b"), 2);
        assert_eq!(vocab.lookup(&"c"), 0);
        assert_eq!(vocab.count(&"a"), 3);
        assert_eq!(vocab.total_seen(), 6);
        assert_eq!(vocab.scan_count(), 2);
    }

    #[test]
    fn test_rescan_of_unk_only_vocab_does_not_warn() {
        let observer = Arc::new(RecordingObserver::new());
        let mut vocab: IndexVocab<&str> = IndexVocab::new(VocabOptions::new(5))
            .unwrap()
            .with_observer(observer.clone());

        vocab.scan(["a"]).unwrap().scan(["a"]).unwrap();
        assert!(observer.warnings().is_empty());
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_literal_unk_token() {
        let vocab: IndexVocab<&str> =
            IndexVocab::from_tokens(["UNK", "a"], VocabOptions::default()).unwrap();

        assert_eq!(vocab.lookup(&"UNK"), 1);
        assert_eq!(vocab.lookup(&"a"), 2);
        assert_eq!(vocab.lookup(&"never"), 0);
    }

    #[test]
    fn test_invalid_min_count() {
        let err = IndexVocab::<String>::new(VocabOptions::new(0)).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_populated() {
        let mut vocab: IndexVocab<&str> = IndexVocab::new(VocabOptions::default()).unwrap();
        assert!(!VocabIndex::is_populated(&vocab));

        vocab.scan(core::iter::empty::<&str>()).unwrap();
        assert!(VocabIndex::is_populated(&vocab));
        assert_eq!(VocabIndex::len(&vocab), 1);
    }

    #[test]
    fn test_overflow() {
        let mut vocab: IndexVocab<u32, u8, u32> = IndexVocab::new(VocabOptions::default()).unwrap();
        let err = vocab.scan(0..300_u32).unwrap_err();
        assert_eq!(err, crate::EmbedorError::VocabSizeOverflow { size: 257 });
        assert_eq!(vocab.len(), 256);
    }

    #[test]
    fn test_narrow_count_type() {
        let mut vocab: IndexVocab<&str, u32, u8> = IndexVocab::new(VocabOptions::default()).unwrap();
        vocab.scan(vec!["a"; 300]).unwrap();
        vocab.scan(["b"]).unwrap();

        assert_eq!(vocab.count(&"a"), u8::MAX);
        assert_eq!(vocab.total_seen(), 301);
        assert_eq!(vocab.tokens(), &["a", "b"]);
        assert_eq!(vocab.lookup(&"b"), 2);
    }
}
