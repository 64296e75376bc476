//! # Token Id Index
//!
//! The ``{ K <-> T }`` bijection between admitted tokens and dense ids.

use core::{borrow::Borrow, hash::Hash};

use crate::{
    errors::{EmbedorError, EmbedorResult},
    types::{EHashMap, TokenKey, TokenType, hash_map_new},
};

/// Display label for the reserved unknown-token slot.
pub const UNK_LABEL: &str = "UNK";

/// The reserved unknown-token id.
pub fn unk_id<T: TokenType>() -> T {
    T::zero()
}

/// Dense ``{ K <-> T }`` index.
///
/// Id `0` is reserved for the unknown token; it is a slot, not a key,
/// so no token value can collide with it. Admitted tokens hold ids
/// `1..len()` in admission order.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenIndex<K: TokenKey, T: TokenType> {
    /// Admitted tokens; `words[i]` holds id `i + 1`.
    words: Vec<K>,

    /// Map of ``{ K -> T }``.
    word_index: EHashMap<K, T>,
}

impl<K: TokenKey, T: TokenType> Default for TokenIndex<K, T> {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            word_index: hash_map_new(),
        }
    }
}

impl<K: TokenKey, T: TokenType> TokenIndex<K, T> {
    /// Create an index holding only the unknown token.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of slots in the index, including `UNK`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.words.len() + 1
    }

    /// Has `key` been admitted?
    pub fn contains<Q>(
        &self,
        key: &Q,
    ) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.word_index.contains_key(key)
    }

    /// Return the id of an admitted token, if any.
    pub fn get<Q>(
        &self,
        key: &Q,
    ) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.word_index.get(key).copied()
    }

    /// Return the id of `key`, falling back to the `UNK` id.
    pub fn lookup<Q>(
        &self,
        key: &Q,
    ) -> T
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or_else(unk_id)
    }

    /// Return the token held by `id`.
    ///
    /// ## Returns
    /// `None` for the `UNK` slot, and for ids outside the index.
    pub fn token_of(
        &self,
        id: T,
    ) -> Option<&K> {
        let idx = id.to_usize()?;
        if idx == 0 {
            None
        } else {
            self.words.get(idx - 1)
        }
    }

    /// The admitted tokens, in id order (starting at id `1`).
    pub fn tokens(&self) -> &[K] {
        &self.words
    }

    /// Iterate over ``(T, &K)`` for every admitted token.
    pub fn iter(&self) -> impl Iterator<Item = (T, &K)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(idx, k)| T::from_usize(idx + 1).map(|id| (id, k)))
    }

    /// Assign the next free id to `key`.
    ///
    /// ## Returns
    /// The assigned id; or the existing id if `key` was already admitted.
    ///
    /// ## Errors
    /// [`EmbedorError::VocabSizeOverflow`] if `T` cannot hold the new id.
    pub fn admit(
        &mut self,
        key: K,
    ) -> EmbedorResult<T> {
        if let Some(id) = self.get(&key) {
            return Ok(id);
        }

        let next = self.len();
        let id = T::from_usize(next).ok_or(EmbedorError::VocabSizeOverflow { size: next + 1 })?;

        self.word_index.insert(key.clone(), id);
        self.words.push(key);
        Ok(id)
    }

    /// Keep only the tokens for which `keep` is true, re-packing ids densely.
    ///
    /// Surviving tokens keep their relative order.
    ///
    /// ## Returns
    /// The number of tokens removed.
    pub fn retain<F>(
        &mut self,
        mut keep: F,
    ) -> EmbedorResult<usize>
    where
        F: FnMut(&K) -> bool,
    {
        let before = self.words.len();
        self.words.retain(|k| keep(k));

        self.word_index = self
            .words
            .iter()
            .enumerate()
            .map(|(idx, k)| {
                T::from_usize(idx + 1)
                    .map(|id| (k.clone(), id))
                    .ok_or(EmbedorError::VocabSizeOverflow { size: idx + 2 })
            })
            .collect::<EmbedorResult<_>>()?;

        Ok(before - self.words.len())
    }

    /// Reduce the capacity of the internal buffers to fit their contents.
    pub fn shrink_to_fit(&mut self) {
        self.words.shrink_to_fit();
        self.word_index.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index: TokenIndex<String, u32> = TokenIndex::new();
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("a"), 0);
        assert_eq!(index.token_of(0), None);
        assert!(index.tokens().is_empty());
    }

    #[test]
    fn test_admit_and_lookup() {
        let mut index: TokenIndex<String, u32> = TokenIndex::new();
        assert_eq!(index.admit("a".to_string()).unwrap(), 1);
        assert_eq!(index.admit("b".to_string()).unwrap(), 2);
        assert_eq!(index.admit("a".to_string()).unwrap(), 1);

        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("a"), 1);
        assert_eq!(index.lookup("b"), 2);
        assert_eq!(index.lookup("zzz"), 0);
        assert_eq!(index.get("zzz"), None);
        assert!(index.contains("b"));

        assert_eq!(index.token_of(1).map(String::as_str), Some("a"));
        assert_eq!(index.token_of(2).map(String::as_str), Some("b"));
        assert_eq!(index.token_of(3), None);

        assert_eq!(
            index.iter().collect::<Vec<_>>(),
            vec![(1, &"a".to_string()), (2, &"b".to_string())]
        );
    }

    #[test]
    fn test_unk_label_is_an_ordinary_key() {
        let mut index: TokenIndex<&str, u32> = TokenIndex::new();
        assert_eq!(index.admit(UNK_LABEL).unwrap(), 1);
        assert_eq!(index.lookup(&UNK_LABEL), 1);
        assert_eq!(index.lookup(&"other"), 0);
    }

    #[test]
    fn test_admit_overflow() {
        let mut index: TokenIndex<u32, u8> = TokenIndex::new();
        for k in 0..255 {
            index.admit(k).unwrap();
        }
        assert_eq!(index.len(), 256);
        assert_eq!(
            index.admit(1000),
            Err(EmbedorError::VocabSizeOverflow { size: 257 })
        );
        assert_eq!(index.len(), 256);
    }

    #[test]
    fn test_retain_repacks() {
        let mut index: TokenIndex<&str, u32> = TokenIndex::new();
        for k in ["a", "b", "c", "d"] {
            index.admit(k).unwrap();
        }

        let removed = index.retain(|k| *k != "b" && *k != "c").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(index.tokens(), &["a", "d"]);
        assert_eq!(index.lookup(&"a"), 1);
        assert_eq!(index.lookup(&"d"), 2);
        assert_eq!(index.lookup(&"b"), 0);

        index.shrink_to_fit();
        assert_eq!(index.len(), 3);
    }
}
