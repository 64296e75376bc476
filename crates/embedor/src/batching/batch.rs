//! # Batch Value

use crate::types::TokenType;

/// One batch of ``(context, label)`` training pairs.
///
/// `contexts` and `labels` are parallel; row `i` of `contexts` is the
/// model input for `labels[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch<T: TokenType> {
    /// The context-id rows.
    pub contexts: Vec<Vec<T>>,

    /// The target-id column.
    pub labels: Vec<T>,
}

impl<T: TokenType> Batch<T> {
    /// Create an empty batch with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            contexts: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
        }
    }

    /// Append one pair.
    pub fn push(
        &mut self,
        context: Vec<T>,
        label: T,
    ) {
        self.contexts.push(context);
        self.labels.push(label);
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.contexts.len(), self.labels.len());
        self.labels.len()
    }

    /// Is this batch empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The width of the context rows; `None` for an empty batch.
    pub fn context_width(&self) -> Option<usize> {
        self.contexts.first().map(Vec::len)
    }

    /// The context rows flattened in row-major order.
    ///
    /// Suitable for a dense ``[len, context_width]`` tensor.
    pub fn flat_contexts(&self) -> Vec<T> {
        self.contexts.iter().flatten().copied().collect()
    }

    /// The labels as a ``[len, 1]`` column.
    pub fn label_column(&self) -> Vec<[T; 1]> {
        self.labels.iter().map(|&label| [label]).collect()
    }

    /// Split into ``(contexts, labels)``.
    pub fn into_parts(self) -> (Vec<Vec<T>>, Vec<T>) {
        (self.contexts, self.labels)
    }

    /// Convert every id using a conversion function.
    pub fn convert<F, U>(
        self,
        f: F,
    ) -> Batch<U>
    where
        F: Fn(T) -> U,
        U: TokenType,
    {
        Batch {
            contexts: self
                .contexts
                .into_iter()
                .map(|row| row.into_iter().map(&f).collect())
                .collect(),
            labels: self.labels.into_iter().map(&f).collect(),
        }
    }
}
