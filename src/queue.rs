//! # Frame Queue
//!
//! FIFO buffer between command producers and the transport writer.
//!
//! ## Sub-Packaging
//!
//! Links such as Bluetooth SPP drop data when a single write is larger than
//! the device's receive buffer. With `sub_package` set, [`FrameQueue::enqueue`]
//! splits a payload into frames of at most `chunk_len` bytes:
//!
//! ```text
//! payload (10 bytes), chunk_len = 4
//! ┌──────────────┬──────────────┬────────┐
//! │ frame 0 (4)  │ frame 1 (4)  │ 2 (2)  │
//! └──────────────┴──────────────┴────────┘
//! ```
//!
//! ## Concurrency
//!
//! Every operation takes the same lock for its whole duration, so the
//! frames of one payload are always contiguous in delivery order. Any
//! number of threads may enqueue. Ordering between producers is whatever
//! order their `enqueue` calls acquire the lock in; a producer that needs
//! its own payloads delivered in order must issue them from one thread.
//!
//! Nothing here blocks waiting for data. [`FrameQueue::dequeue`] returns
//! `None` right away on an empty queue; polling is up to the consumer
//! (see [`crate::transport::pump`]).

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::LineaError;
use crate::protocol::line::translate_line;

/// Thread-safe FIFO of byte frames.
///
/// Share it between threads with `Arc<FrameQueue>`.
///
/// ## Example
///
/// ```
/// use linea::queue::FrameQueue;
///
/// let queue = FrameQueue::new();
/// queue.enqueue(vec![1, 2, 3, 4, 5], true, 2)?;
///
/// assert_eq!(queue.len(), 3);
/// assert_eq!(queue.dequeue(), Some(vec![1, 2]));
/// assert_eq!(queue.dequeue(), Some(vec![3, 4]));
/// assert_eq!(queue.dequeue(), Some(vec![5]));
/// assert_eq!(queue.dequeue(), None);
/// # Ok::<(), linea::error::LineaError>(())
/// ```
#[derive(Debug, Default)]
pub struct FrameQueue {
    frames: Mutex<VecDeque<Vec<u8>>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the frame list.
    ///
    /// No operation leaves the deque half-modified, so a lock poisoned by a
    /// panicking holder still guards consistent data and is taken over.
    fn frames(&self) -> MutexGuard<'_, VecDeque<Vec<u8>>> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop every pending frame.
    pub fn clear(&self) {
        self.frames().clear();
    }

    /// Whether no frames are pending. Stale as soon as it returns if other
    /// threads are using the queue.
    pub fn is_empty(&self) -> bool {
        self.frames().is_empty()
    }

    /// Number of pending frames (snapshot).
    pub fn len(&self) -> usize {
        self.frames().len()
    }

    /// Total bytes across all pending frames (snapshot).
    pub fn byte_len(&self) -> usize {
        self.frames().iter().map(Vec::len).sum()
    }

    /// Append a payload.
    ///
    /// - `sub_package == false`: the payload becomes one frame, even when
    ///   empty. `chunk_len` is not looked at.
    /// - `sub_package == true`: the payload is cut into `chunk_len`-byte
    ///   frames plus a shorter trailing frame for any remainder. An empty
    ///   payload adds nothing.
    ///
    /// ## Errors
    ///
    /// [`LineaError::InvalidChunkLength`] if sub-packaging with
    /// `chunk_len == 0`. The queue is not modified.
    pub fn enqueue(
        &self,
        payload: Vec<u8>,
        sub_package: bool,
        chunk_len: usize,
    ) -> Result<(), LineaError> {
        if !sub_package {
            self.frames().push_back(payload);
            return Ok(());
        }

        if chunk_len == 0 {
            return Err(LineaError::InvalidChunkLength(chunk_len));
        }

        // Split before locking; the lock only covers the appends.
        let chunks: Vec<Vec<u8>> = payload.chunks(chunk_len).map(<[u8]>::to_vec).collect();
        self.frames().extend(chunks);
        Ok(())
    }

    /// Translate a command line and enqueue the resulting bytes.
    pub fn enqueue_line(
        &self,
        line: &str,
        sub_package: bool,
        chunk_len: usize,
    ) -> Result<(), LineaError> {
        self.enqueue(translate_line(line), sub_package, chunk_len)
    }

    /// Remove and return the oldest frame, or `None` if there is none.
    pub fn dequeue(&self) -> Option<Vec<u8>> {
        self.frames().pop_front()
    }

    /// Copy of the oldest frame, leaving it queued.
    ///
    /// ## Errors
    ///
    /// [`LineaError::EmptyQueue`] if nothing is pending.
    pub fn peek(&self) -> Result<Vec<u8>, LineaError> {
        self.frames().front().cloned().ok_or(LineaError::EmptyQueue)
    }

    /// Take every pending frame at once, oldest first.
    pub fn drain(&self) -> Vec<Vec<u8>> {
        self.frames().drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_queue_is_empty() {
        let queue = FrameQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.byte_len(), 0);
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_fifo_order() {
        let queue = FrameQueue::new();
        queue.enqueue(vec![1], false, 0).unwrap();
        queue.enqueue(vec![2, 2], false, 0).unwrap();
        queue.enqueue(vec![3, 3, 3], false, 0).unwrap();

        assert_eq!(queue.dequeue(), Some(vec![1]));
        assert_eq!(queue.dequeue(), Some(vec![2, 2]));
        assert_eq!(queue.dequeue(), Some(vec![3, 3, 3]));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_empty_payload_whole() {
        let queue = FrameQueue::new();
        queue.enqueue(Vec::new(), false, 0).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue(), Some(Vec::new()));
    }

    #[test]
    fn test_empty_payload_sub_packaged() {
        let queue = FrameQueue::new();
        queue.enqueue(Vec::new(), true, 4).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sub_package_with_remainder() {
        let queue = FrameQueue::new();
        let payload: Vec<u8> = (0..10).collect();
        queue.enqueue(payload, true, 4).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Some(vec![0, 1, 2, 3]));
        assert_eq!(queue.dequeue(), Some(vec![4, 5, 6, 7]));
        assert_eq!(queue.dequeue(), Some(vec![8, 9]));
    }

    #[test]
    fn test_sub_package_exact_multiple() {
        let queue = FrameQueue::new();
        queue.enqueue(vec![7; 8], true, 4).unwrap();
        assert_eq!(queue.len(), 2);
        assert!(queue.drain().iter().all(|f| f.len() == 4));
    }

    #[test]
    fn test_sub_package_shorter_than_chunk() {
        let queue = FrameQueue::new();
        queue.enqueue(vec![1, 2], true, 512).unwrap();
        assert_eq!(queue.drain(), vec![vec![1, 2]]);
    }

    #[test]
    fn test_zero_chunk_len_rejected() {
        let queue = FrameQueue::new();
        let result = queue.enqueue(vec![1, 2, 3], true, 0);
        assert!(matches!(result, Err(LineaError::InvalidChunkLength(0))));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_chunk_len_ignored_without_sub_package() {
        let queue = FrameQueue::new();
        queue.enqueue(vec![1, 2, 3], false, 0).unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_peek() {
        let queue = FrameQueue::new();
        assert!(matches!(queue.peek(), Err(LineaError::EmptyQueue)));

        queue.enqueue(vec![9, 8], false, 0).unwrap();
        queue.enqueue(vec![7], false, 0).unwrap();
        assert_eq!(queue.peek().unwrap(), vec![9, 8]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue(), Some(vec![9, 8]));
        assert_eq!(queue.peek().unwrap(), vec![7]);
    }

    #[test]
    fn test_clear() {
        let queue = FrameQueue::new();
        queue.enqueue(vec![0; 100], true, 10).unwrap();
        assert_eq!(queue.len(), 10);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
        assert!(matches!(queue.peek(), Err(LineaError::EmptyQueue)));
    }

    #[test]
    fn test_byte_len() {
        let queue = FrameQueue::new();
        queue.enqueue(vec![0; 10], true, 4).unwrap();
        queue.enqueue(vec![0; 3], false, 0).unwrap();
        assert_eq!(queue.byte_len(), 13);
    }

    #[test]
    fn test_enqueue_line() {
        let queue = FrameQueue::new();
        queue.enqueue_line("ESC 64d Hi LF", true, 2).unwrap();
        assert_eq!(
            queue.drain(),
            vec![vec![0x1B, 0x40], vec![b'H', b'i'], vec![0x0A]]
        );
    }

    #[test]
    fn test_survives_poisoned_lock() {
        use std::sync::Arc;
        use std::thread;

        let queue = Arc::new(FrameQueue::new());
        queue.enqueue(vec![1], false, 0).unwrap();

        let q = Arc::clone(&queue);
        let _ = thread::spawn(move || {
            let _guard = q.frames.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(queue.frames.is_poisoned());
        assert_eq!(queue.dequeue(), Some(vec![1]));
    }
}
