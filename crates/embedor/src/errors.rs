//! # Error Types

/// Errors from embedor operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedorError {
    /// A threshold, size, or pattern was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A required precondition did not hold; e.g. an unpopulated vocabulary.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The object is in a lifecycle phase which forbids the operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },
}

impl EmbedorError {
    /// Is this an [`EmbedorError::InvalidConfiguration`]?
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Is this an [`EmbedorError::Precondition`]?
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Is this an [`EmbedorError::InvalidState`]?
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

/// Result type for embedor operations.
pub type EmbedorResult<T> = core::result::Result<T, EmbedorError>;
