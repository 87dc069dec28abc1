//! Priority queue implementations
//!
//! This module provides a binary-heap priority queue whose order is defined by an
//! injected comparator, plus a mutex-guarded variant for shared use.
//!
//! ## Available Queues
//!
//! - [`PriorityQueue`]: Single-owner binary min-heap, no internal synchronization
//! - [`SyncPriorityQueue`]: `PriorityQueue` behind a mutex, safe to share across threads
//!
//! ## Ordering
//!
//! Both queues always yield the element that compares least first. For max-heap
//! behavior, invert the comparator:
//!
//! ```rust
//! use segmented_collections::queue::PriorityQueue;
//!
//! let mut min_heap = PriorityQueue::new(8, |a: &i32, b: &i32| a.cmp(b));
//! let mut max_heap = PriorityQueue::new(8, |a: &i32, b: &i32| b.cmp(a));
//! for value in [3, 1, 2] {
//!     min_heap.push(value);
//!     max_heap.push(value);
//! }
//! assert_eq!(min_heap.pop(), 1);
//! assert_eq!(max_heap.pop(), 3);
//! ```
pub mod priority;
pub mod sync_priority;

// Re-export main types for convenience
pub use priority::PriorityQueue;
pub use sync_priority::SyncPriorityQueue;


#[cfg(test)]
mod proptests;
