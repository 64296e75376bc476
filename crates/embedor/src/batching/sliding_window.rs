//! # Sliding Window

use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::types::TokenType;

/// A bounded buffer of the most recent `window_size` ids.
///
/// The oldest id is evicted once the buffer is full.
pub(crate) struct SlidingWindow<T: TokenType> {
    buf: AllocRingBuffer<T>,
}

impl<T: TokenType> SlidingWindow<T> {
    /// Create an empty window.
    ///
    /// `window_size` comes from validated [`crate::batching::WindowOptions`],
    /// so it is in ``1..=MAX_WINDOW_SIZE``.
    pub(crate) fn new(window_size: usize) -> Self {
        debug_assert!(window_size > 0);
        Self {
            buf: AllocRingBuffer::new(window_size),
        }
    }

    /// Is the window complete (holding `window_size` ids)?
    pub(crate) fn is_complete(&self) -> bool {
        self.buf.is_full()
    }

    /// Push an id, evicting the oldest if full.
    ///
    /// ## Returns
    /// `true` if the window is complete after the push.
    pub(crate) fn push(
        &mut self,
        id: T,
    ) -> bool {
        let _ = self.buf.enqueue(id);
        self.is_complete()
    }

    /// Copy the window, oldest first, into `out`.
    pub(crate) fn copy_to(
        &self,
        out: &mut Vec<T>,
    ) {
        out.clear();
        out.extend(self.buf.iter().copied());
    }
}
