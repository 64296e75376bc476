//! # Vocabulary Lookup Trait

use crate::types::{TokenKey, TokenType};

/// The lookup capability consumed by batch generators.
///
/// A batch generator needs only ``{ K -> T }`` lookup with `UNK` fallback,
/// and the vocab size; it never scans or trims.
pub trait VocabIndex {
    /// The token key type.
    type Key: TokenKey;

    /// The token id type.
    type Token: TokenType;

    /// Return the id of `key`; or the `UNK` id if `key` is not admitted.
    fn lookup(
        &self,
        key: &Self::Key,
    ) -> Self::Token;

    /// The number of ids in the vocabulary, including `UNK`.
    fn len(&self) -> usize;

    /// Returns true if the vocabulary holds no ids at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Has this vocabulary been populated (scanned or built)?
    ///
    /// Batch generators refuse vocabularies for which this is false.
    fn is_populated(&self) -> bool {
        !self.is_empty()
    }
}

impl<V: VocabIndex + ?Sized> VocabIndex for &V {
    type Key = V::Key;
    type Token = V::Token;

    fn lookup(
        &self,
        key: &Self::Key,
    ) -> Self::Token {
        (**self).lookup(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_populated(&self) -> bool {
        (**self).is_populated()
    }
}
