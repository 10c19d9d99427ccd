//! Bounded hand-off queue between producer and consumer threads.
//!
//! Fixed-capacity FIFO guarded by one mutex and two condition variables.
//! `push` waits while the queue is full and `pop` waits while it is empty, so
//! a fast producer is backpressured instead of growing memory without bound.
//! Closing the queue wakes every blocked thread; a closed queue rejects
//! further pushes and, once drained, reports exhaustion instead of blocking
//! forever.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard};

/// Returned by [`BoundedQueue::push`] once the queue has been closed; carries
/// the rejected item back to the caller.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PushError<T>(pub T);

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PushError(..)")
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("push on closed queue")
    }
}

impl<T> Error for PushError<T> {}

#[derive(Debug)]
struct Inner<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Thread-safe FIFO buffer with a fixed capacity. The queue itself is neither
/// `Clone` nor `Copy`; share it between threads behind an `Arc`.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    capacity: usize,
    inner: Mutex<Inner<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Creates a queue holding at most `capacity` items.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        Self {
            capacity,
            inner: Mutex::new(Inner {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().expect("queue lock poisoned")
    }

    /// Inserts an item, blocking while the queue is full. Fails only when the
    /// queue has been closed, handing the item back.
    pub fn push(&self, item: T) -> Result<(), PushError<T>> {
        let mut inner = self.lock();
        while inner.items.len() == self.capacity && !inner.closed {
            inner = self.not_full.wait(inner).expect("queue lock poisoned");
        }
        if inner.closed {
            return Err(PushError(item));
        }
        inner.items.push_back(item);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes and returns the oldest item, blocking while the queue is empty
    /// and still open. Returns `None` only after the queue has been closed
    /// and drained.
    pub fn pop(&self) -> Option<T> {
        let mut inner = self.lock();
        while inner.items.is_empty() && !inner.closed {
            inner = self.not_empty.wait(inner).expect("queue lock poisoned");
        }
        let item = inner.items.pop_front();
        drop(inner);
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Closes the queue and wakes all blocked threads. Buffered items remain
    /// poppable; further pushes fail. Idempotent.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        drop(inner);
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}
