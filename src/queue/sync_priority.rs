//! Thread-safe wrapper around [`PriorityQueue`]
//!
//! [`SyncPriorityQueue`] holds the heap behind a `parking_lot::Mutex` so every call
//! runs to completion under the lock. Use [`SyncPriorityQueue::with_lock`] to make
//! several heap calls atomic as a group.

use super::priority::PriorityQueue;
use crate::{Error, Result};
use core::cmp::Ordering;
use core::fmt;
use parking_lot::Mutex;

/// A [`PriorityQueue`] guarded by a mutex
///
/// # Examples
///
/// ```rust
/// use segmented_collections::SyncPriorityQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(SyncPriorityQueue::new(16, |a: &u64, b: &u64| a.cmp(b)));
///
/// let handles: Vec<_> = (0..4u64)
///     .map(|i| {
///         let queue = Arc::clone(&queue);
///         thread::spawn(move || queue.push(i))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(queue.head(), 0);
/// // Pop two elements without another thread interleaving
/// let pair = queue.with_lock(|heap| (heap.pop(), heap.pop()));
/// assert_eq!(pair, (0, 1));
/// ```
pub struct SyncPriorityQueue<T, F = fn(&T, &T) -> Ordering> {
    inner: Mutex<PriorityQueue<T, F>>,
}

impl<T, F> SyncPriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty shared priority queue
    pub fn new(capacity: usize, compare: F) -> Self {
        Self::from_queue(PriorityQueue::new(capacity, compare))
    }

    /// Wrap an existing priority queue
    pub fn from_queue(queue: PriorityQueue<T, F>) -> Self {
        Self {
            inner: Mutex::new(queue),
        }
    }

    /// Insert an element
    pub fn push(&self, value: T) {
        self.inner.lock().push(value);
    }

    /// Remove and return the least element
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn pop(&self) -> T {
        match self.try_pop() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Remove and return the least element
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue holds no elements.
    pub fn try_pop(&self) -> Result<T> {
        self.inner.lock().try_pop()
    }

    /// Return a copy of the least element
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn head(&self) -> T
    where
        T: Clone,
    {
        match self.peek() {
            Some(value) => value,
            None => panic!("{}", Error::EmptyQueue),
        }
    }

    /// Return a copy of the least element, or `None` if the queue is empty
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().peek().cloned()
    }

    /// Get the current number of elements
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with exclusive access to the heap
    ///
    /// Other threads cannot observe the heap between calls made inside `f`.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut PriorityQueue<T, F>) -> R) -> R {
        let mut queue = self.inner.lock();
        f(&mut *queue)
    }

    /// Unwrap the inner priority queue
    pub fn into_inner(self) -> PriorityQueue<T, F> {
        self.inner.into_inner()
    }
}

impl<T, F> fmt::Debug for SyncPriorityQueue<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(queue) => f
                .debug_struct("SyncPriorityQueue")
                .field("inner", &*queue)
                .finish(),
            None => f
                .debug_struct("SyncPriorityQueue")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let queue = SyncPriorityQueue::new(4, |a: &i32, b: &i32| a.cmp(b));
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.try_pop(), Err(Error::EmptyQueue));

        queue.push(5);
        queue.push(3);
        queue.push(8);
        queue.push(1);

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.head(), 1);
        assert_eq!(queue.pop(), 1);
        assert_eq!(queue.pop(), 3);

        let mut inner = queue.into_inner();
        assert_eq!(inner.pop(), 5);
        assert_eq!(inner.pop(), 8);
    }

    #[test]
    #[should_panic(expected = "Cannot access an element of an empty priority queue")]
    fn test_head_empty_panics() {
        let queue = SyncPriorityQueue::new(0, |a: &i32, b: &i32| a.cmp(b));
        queue.head();
    }

    #[test]
    fn test_with_lock_composes_operations() {
        let queue = SyncPriorityQueue::new(4, |a: &i32, b: &i32| a.cmp(b));
        queue.with_lock(|heap| {
            heap.push(2);
            heap.push(1);
        });
        let moved = queue.with_lock(|heap| {
            let least = heap.pop();
            heap.push(least + 10);
            least
        });
        assert_eq!(moved, 1);
        assert_eq!(queue.pop(), 2);
        assert_eq!(queue.pop(), 11);
    }

    #[test]
    fn test_debug_output() {
        let queue = SyncPriorityQueue::new(4, |a: &i32, b: &i32| a.cmp(b));
        queue.push(4);
        let debug = format!("{:?}", queue);
        assert!(debug.contains("SyncPriorityQueue"));
        assert!(debug.contains("head: Some(4)"));

        let held = queue.with_lock(|heap| format!("{:?}", heap.peek()));
        assert_eq!(held, "Some(4)");
    }
}
