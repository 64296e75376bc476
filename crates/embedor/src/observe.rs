//! # Observability Sink
//!
//! Vocabularies never log advisory conditions through ambient global state;
//! each carries an injected [`VocabObserver`]. The default, [`LogObserver`],
//! forwards to the `log` facade.

use core::fmt;
use std::sync::Arc;

/// A non-fatal advisory raised while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabWarning {
    /// An index vocabulary was scanned again after tokens were admitted.
    ///
    /// New ids may be appended; previously produced encodings stay valid,
    /// but their width (the vocab size) may grow.
    Rescan {
        /// The vocab size before the scan, including `UNK`.
        len: usize,
    },

    /// A later scan changed the set of tokens in a one-hot vocabulary,
    /// which changes the width of every one-hot vector.
    ShapeChanged {
        /// The vocab size before the scan, including `UNK`.
        before: usize,

        /// The vocab size after the scan, including `UNK`.
        after: usize,
    },
}

impl fmt::Display for VocabWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            VocabWarning::Rescan { len } => write!(
                f,
                "scanning a second time may add to the total number of words in the vocab ({len}); \
                 be careful when indexing one-hot vectors"
            ),
            VocabWarning::ShapeChanged { before, after } => write!(
                f,
                "scanning again changed the shape of the one-hot vectors ({before} -> {after})"
            ),
        }
    }
}

/// Sink for vocabulary advisories.
pub trait VocabObserver: fmt::Debug + Send + Sync {
    /// Receive a warning; must not fail.
    fn warn(
        &self,
        warning: &VocabWarning,
    );
}

/// Forwards warnings to [`log::warn!`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl VocabObserver for LogObserver {
    fn warn(
        &self,
        warning: &VocabWarning,
    ) {
        log::warn!("{warning}");
    }
}

/// Drops all warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl VocabObserver for NullObserver {
    fn warn(
        &self,
        _warning: &VocabWarning,
    ) {
    }
}

/// Shared handle to an observer.
pub type ObserverRef = Arc<dyn VocabObserver>;

/// The default observer handle; a [`LogObserver`].
pub fn default_observer() -> ObserverRef {
    Arc::new(LogObserver)
}

/// Records warnings in memory.
///
/// Useful for callers which want to assert on, or re-route, advisories.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    warnings: std::sync::Mutex<Vec<VocabWarning>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the warnings received so far.
    pub fn warnings(&self) -> Vec<VocabWarning> {
        match self.warnings.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl VocabObserver for RecordingObserver {
    fn warn(
        &self,
        warning: &VocabWarning,
    ) {
        match self.warnings.lock() {
            Ok(mut guard) => guard.push(warning.clone()),
            Err(poisoned) => poisoned.into_inner().push(warning.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let observer = RecordingObserver::new();
        observer.warn(&VocabWarning::Rescan { len: 3 });
        observer.warn(&VocabWarning::ShapeChanged {
            before: 3,
            after: 5,
        });

        assert_eq!(
            observer.warnings(),
            vec![
                VocabWarning::Rescan { len: 3 },
                VocabWarning::ShapeChanged {
                    before: 3,
                    after: 5
                },
            ]
        );
    }

    #[test]
    fn test_warning_display() {
        let msg = VocabWarning::ShapeChanged {
            before: 2,
            after: 4,
        }
        .to_string();
        assert!(msg.contains("2 -> 4"));
    }

    #[test]
    fn test_log_and_null_observers() {
        let warning = VocabWarning::Rescan { len: 2 };
        default_observer().warn(&warning);
        NullObserver.warn(&warning);
    }
}
