//! # Segmented Collections
//!
//! Two in-process container primitives built for predictable, amortized performance.
//!
//! ## Features
//!
//! - **Segmented Deque**: Unbounded double-ended queue made of fixed-capacity segments,
//!   safe to share across threads
//! - **Priority Queue**: Binary min-heap ordered by a caller-supplied comparator
//! - **Sync Priority Queue**: Mutex-guarded priority queue for shared use
//!
//! ## Quick Start
//!
//! ```rust
//! use segmented_collections::{PriorityQueue, SegmentedDeque};
//!
//! let deque = SegmentedDeque::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//! assert_eq!(deque.pop_front(), 0);
//! assert_eq!(deque.pop_back(), 2);
//! assert_eq!(deque.len(), 1);
//!
//! let mut heap = PriorityQueue::new(4, |a: &i32, b: &i32| a.cmp(b));
//! for value in [5, 3, 8, 1] {
//!     heap.push(value);
//! }
//! assert_eq!(*heap.head(), 1);
//! ```
//!
//! ## Error Handling
//!
//! Popping from an empty container is a programmer error and panics. Every panicking
//! operation has a `try_*` (or `peek*`) twin that reports the same condition as an
//! [`Error`] instead. Peeking the deque with [`SegmentedDeque::front`] or
//! [`SegmentedDeque::back`] never fails: an empty deque yields `T::default()`.
//!
//! ## Thread Safety
//!
//! [`SegmentedDeque`] serializes every structural operation on a single lock and can be
//! shared behind an `Arc`. [`PriorityQueue`] has no internal synchronization; wrap it in a
//! [`SyncPriorityQueue`] or an external lock to share it.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod config;
pub mod deque;
pub mod metrics;
pub mod queue;

pub use crate::config::DequeConfig;
pub use crate::deque::SegmentedDeque;
pub use crate::metrics::{MetricsCollector, PerformanceMetrics};
pub use crate::queue::{PriorityQueue, SyncPriorityQueue};

/// Common utilities and helper types
pub mod util {
    /// Cache line size for alignment purposes
    pub const CACHE_LINE_SIZE: usize = 64;

    /// Pad a value to cache line size
    #[repr(align(64))]
    pub struct CachePadded<T> {
        value: T,
    }

    impl<T> CachePadded<T> {
        /// Create a new cache-padded value
        #[inline]
        pub const fn new(value: T) -> Self {
            Self { value }
        }

        /// Get a reference to the inner value
        #[inline]
        pub const fn get(&self) -> &T {
            &self.value
        }

        /// Get a mutable reference to the inner value
        #[inline]
        pub fn get_mut(&mut self) -> &mut T {
            &mut self.value
        }

        /// Get the inner value
        #[inline]
        pub fn into_inner(self) -> T {
            self.value
        }
    }

    impl<T: Default> Default for CachePadded<T> {
        fn default() -> Self {
            Self::new(T::default())
        }
    }

    impl<T: core::fmt::Debug> core::fmt::Debug for CachePadded<T> {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            core::fmt::Debug::fmt(&self.value, f)
        }
    }
}

/// Error types for container operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Pop attempted on a deque holding no elements
    #[error("Cannot pop an element from an empty deque")]
    EmptyDeque,
    /// Pop or head attempted on a priority queue holding no elements
    #[error("Cannot access an element of an empty priority queue")]
    EmptyQueue,
    /// Segment capacity too small to hold a centered cursor pair
    #[error("Invalid segment capacity {0}: must be at least 2")]
    InvalidSegmentCapacity(usize),
}

/// Result type for container operations
pub type Result<T> = core::result::Result<T, Error>;
