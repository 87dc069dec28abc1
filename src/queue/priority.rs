//! Comparator-Driven Priority Queue
//!
//! An array-backed binary min-heap whose order comes from a comparator injected at
//! construction. The element that compares least is always at the root.
//!
//! ## Algorithm Details
//!
//! For the node at index `i`, its children live at `2i + 1` and `2i + 2` and its parent at
//! `(i - 1) / 2`.
//!
//! - **push** appends at the end and sifts the new leaf up while it compares less than
//!   its parent
//! - **pop** moves the last element into the root and sifts it down, swapping with the
//!   smaller child while that child compares less
//!
//! ## Comparator Contract
//!
//! `compare(a, b)` returns `Ordering::Less` when `a` must come out before `b`,
//! `Ordering::Equal` when they are equivalent and `Ordering::Greater` otherwise. The
//! comparator must be a total order. Pass a reversed comparator to get max-heap
//! behavior.
//!
//! ## Performance Characteristics
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | push      | O(log n) amortized |
//! | pop       | O(log n) |
//! | head/peek | O(1) |
//! | from_vec  | O(n) |
//!
//! ## Example
//!
//! ```rust
//! use segmented_collections::PriorityQueue;
//!
//! // Max-heap by inverting the comparator
//! let mut heap = PriorityQueue::new(8, |a: &u32, b: &u32| b.cmp(a));
//! heap.push(2);
//! heap.push(9);
//! heap.push(4);
//! assert_eq!(heap.pop(), 9);
//! assert_eq!(heap.pop(), 4);
//! ```

use crate::{Error, Result};
use core::cmp::Ordering;
use core::fmt;
use core::mem;
use tracing::trace;

/// A binary min-heap ordered by a caller-supplied comparator
///
/// The priority queue has no internal synchronization. Share it across threads through
/// [`SyncPriorityQueue`](crate::SyncPriorityQueue) or an external lock held for the
/// whole operation.
///
/// # Type Parameters
///
/// * `T` - The type of elements stored in the queue
/// * `F` - The comparator, `Fn(&T, &T) -> Ordering`
///
/// # Examples
///
/// ```rust
/// use segmented_collections::PriorityQueue;
///
/// let mut heap = PriorityQueue::new(4, |a: &i32, b: &i32| a.cmp(b));
/// for value in [5, 3, 8, 1] {
///     heap.push(value);
/// }
/// assert_eq!(*heap.head(), 1);
/// assert_eq!(heap.pop(), 1);
/// assert_eq!(heap.pop(), 3);
/// assert_eq!(heap.pop(), 5);
/// assert_eq!(heap.pop(), 8);
/// ```
pub struct PriorityQueue<T, F = fn(&T, &T) -> Ordering> {
    items: Vec<T>,
    compare: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty priority queue
    ///
    /// # Arguments
    ///
    /// * `capacity` - Initial capacity hint for the backing storage
    /// * `compare` - Comparator defining ascending order
    pub fn new(capacity: usize, compare: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Build a priority queue from existing elements in O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use segmented_collections::PriorityQueue;
    ///
    /// let mut heap = PriorityQueue::from_vec(vec![7, 2, 9, 4], |a: &i32, b: &i32| a.cmp(b));
    /// assert_eq!(heap.pop(), 2);
    /// assert_eq!(heap.len(), 3);
    /// ```
    pub fn from_vec(items: Vec<T>, compare: F) -> Self {
        let mut heap = Self { items, compare };
        for index in (0..heap.items.len() / 2).rev() {
            heap.sift_down(index);
        }
        heap
    }

    /// Insert an element
    pub fn push(&mut self, value: T) {
        if self.items.len() == self.items.capacity() {
            trace!(
                len = self.items.len(),
                capacity = self.items.capacity(),
                "growing priority queue storage"
            );
        }
        self.items.push(value);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the least element
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Use [`try_pop`](Self::try_pop) when emptiness is an
    /// expected condition.
    pub fn pop(&mut self) -> T {
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
    pub fn try_pop(&mut self) -> Result<T> {
        let last = self.items.pop().ok_or(Error::EmptyQueue)?;
        if self.items.is_empty() {
            return Ok(last);
        }
        let root = mem::replace(&mut self.items[0], last);
        self.sift_down(0);
        Ok(root)
    }

    /// Return the least element without removing it
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Use [`peek`](Self::peek) when emptiness is an
    /// expected condition.
    pub fn head(&self) -> &T {
        match self.peek() {
            Some(value) => value,
            None => panic!("{}", Error::EmptyQueue),
        }
    }

    /// Return the least element, or `None` if the queue is empty
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Get the current number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the backing storage holds without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Drop every element, keeping the backing storage
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.less(child, parent) {
                break;
            }
            self.items.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, parent) {
                break;
            }
            self.items.swap(child, parent);
            parent = child;
        }
    }

    /// Check the heap property over every parent/child pair.
    #[cfg(test)]
    pub(crate) fn is_heap(&self) -> bool {
        (1..self.items.len()).all(|child| !self.less(child, (child - 1) / 2))
    }
}

impl<T, F> fmt::Debug for PriorityQueue<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.items.len())
            .field("head", &self.items.first())
            .finish_non_exhaustive()
    }
}
