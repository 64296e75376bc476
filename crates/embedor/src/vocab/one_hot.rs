//! # One-Hot Encodings

use std::borrow::Cow;

/// Build a length-`n` vector with a single `1` at `slot`.
///
/// ## Panics
/// If `slot >= n`.
pub(crate) fn one_hot_vector(
    n: usize,
    slot: usize,
) -> Vec<u8> {
    let mut one_hot = vec![0; n];
    one_hot[slot] = 1;
    one_hot
}

/// A precomputed ``N x N`` identity matrix; row `i` is the one-hot vector for slot `i`.
///
/// Trades `O(N^2)` memory for allocation-free lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneHotMatrix {
    n: usize,
    cells: Vec<u8>,
}

impl OneHotMatrix {
    /// Build the identity matrix for `n` slots.
    pub fn identity(n: usize) -> Self {
        let mut cells = vec![0; n * n];
        for i in 0..n {
            cells[i * n + i] = 1;
        }
        Self { n, cells }
    }

    /// The number of slots.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.n
    }

    /// The one-hot row for `slot`, if in range.
    pub fn row(
        &self,
        slot: usize,
    ) -> Option<&[u8]> {
        if slot < self.n {
            Some(&self.cells[slot * self.n..(slot + 1) * self.n])
        } else {
            None
        }
    }
}

/// One-hot vector source; either precomputed, or built on demand.
pub(crate) fn one_hot_row<'a>(
    matrix: Option<&'a OneHotMatrix>,
    n: usize,
    slot: usize,
) -> Cow<'a, [u8]> {
    match matrix.and_then(|m| m.row(slot)) {
        Some(row) => Cow::Borrowed(row),
        None => Cow::Owned(one_hot_vector(n, slot)),
    }
}
