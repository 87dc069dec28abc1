//! Segmented Deque Implementation
//!
//! An unbounded double-ended queue built as a doubly linked chain of fixed-capacity
//! segments. Pushes land in the head or tail segment; when that segment runs out of
//! room on the pushed side a new neighbor is linked in. Pops drain the head or tail
//! segment, and a drained end segment is unlinked lazily by the next pop that reaches
//! it.
//!
//! ## Design
//!
//! ```text
//!   first                                   last
//!     v                                       v
//!   [ . . a b ] <-> [ c d e f ] <-> [ g h . . ]
//! ```
//!
//! - Segments live in an arena and reference their neighbors by handle
//! - The chain always owns at least one segment, created centered at construction
//! - Drained segments go back to a small spare pool (see [`DequeConfig`])
//!
//! ## Synchronization
//!
//! Every operation that touches segments takes one `parking_lot::Mutex`. The element
//! count is mirrored into a cache-padded atomic that is only written while the lock is
//! held (`Release`), so [`SegmentedDeque::len`] and [`SegmentedDeque::is_empty`] read it
//! with `Acquire` without locking and always observe a count the deque actually had.
//! Nothing is atomic across calls: a caller composing `is_empty` with `pop_front` must
//! use [`SegmentedDeque::try_pop_front`] or its own lock.
//!
//! ## Performance Characteristics
//!
//! - **push_front / push_back**: O(1) amortized, one allocation per `capacity` pushes
//! - **pop_front / pop_back**: O(1)
//! - **front / back**: O(1)
//! - **len / is_empty**: O(1), lock-free
//!
//! ## Example
//!
//! ```rust
//! use segmented_collections::SegmentedDeque;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let deque = Arc::new(SegmentedDeque::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|i| {
//!         let deque = Arc::clone(&deque);
//!         thread::spawn(move || {
//!             for j in 0..1000 {
//!                 if j % 2 == 0 {
//!                     deque.push_back(i * 1000 + j);
//!                 } else {
//!                     deque.push_front(i * 1000 + j);
//!                 }
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(deque.len(), 4000);
//! ```

use super::segment::{SegmentArena, SegmentId};
use crate::config::DequeConfig;
use crate::metrics::{AtomicMetrics, MetricsCollector, PerformanceMetrics};
use crate::util::CachePadded;
use crate::{Error, Result};
use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace};

/// Forwards segment churn from the chain to the deque's metrics.
#[derive(Clone, Copy)]
pub(crate) struct Recorder<'a> {
    metrics: Option<&'a AtomicMetrics>,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(metrics: &'a AtomicMetrics) -> Self {
        Self {
            metrics: Some(metrics),
        }
    }

    pub(crate) fn disabled() -> Self {
        Self { metrics: None }
    }

    fn linked(&self, reused: bool, footprint: usize) {
        if let Some(metrics) = self.metrics {
            metrics.record_segment_linked(reused);
            metrics.update_memory_usage(footprint);
        }
    }

    fn released(&self, footprint: usize) {
        if let Some(metrics) = self.metrics {
            metrics.record_segment_released();
            metrics.update_memory_usage(footprint);
        }
    }
}

/// The unsynchronized segment chain behind a [`SegmentedDeque`].
///
/// Invariants: every segment other than `first` is full on its front side
/// (`front == -1`) and every segment other than `last` is full on its back side
/// (`back == capacity`). `len` is the sum of the live elements of linked segments.
pub(crate) struct Chain<T> {
    arena: SegmentArena<T>,
    first: SegmentId,
    last: SegmentId,
    len: usize,
}

impl<T> Chain<T> {
    pub(crate) fn new(config: &DequeConfig) -> Self {
        let mut arena = SegmentArena::new(config.segment_capacity, config.max_spare_segments);
        let (center, _) = arena.allocate_centered();
        Self {
            arena,
            first: center,
            last: center,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn segment_count(&self) -> usize {
        self.arena.live()
    }

    pub(crate) fn push_front(&mut self, value: T, recorder: Recorder<'_>) {
        if self.arena[self.first].front_exhausted() {
            let capacity = self.arena.segment_capacity();
            let (id, reused) = self.arena.allocate(capacity as isize - 1, capacity);
            self.arena[id].next = Some(self.first);
            self.arena[self.first].prev = Some(id);
            self.first = id;
            trace!(
                segment = id.index(),
                reused,
                segments = self.arena.live(),
                "linked new head segment"
            );
            recorder.linked(reused, self.arena.footprint_bytes());
        }
        self.arena[self.first].push_front(value);
        self.len += 1;
    }

    pub(crate) fn push_back(&mut self, value: T, recorder: Recorder<'_>) {
        if self.arena[self.last].back_exhausted() {
            let (id, reused) = self.arena.allocate(-1, 0);
            self.arena[id].prev = Some(self.last);
            self.arena[self.last].next = Some(id);
            self.last = id;
            trace!(
                segment = id.index(),
                reused,
                segments = self.arena.live(),
                "linked new tail segment"
            );
            recorder.linked(reused, self.arena.footprint_bytes());
        }
        self.arena[self.last].push_back(value);
        self.len += 1;
    }

    pub(crate) fn pop_front(&mut self, recorder: Recorder<'_>) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        if self.arena[self.first].front_drained() {
            let drained = self.first;
            let next = self.arena[drained].next?;
            self.arena[next].prev = None;
            self.first = next;
            let pooled = self.arena.release(drained);
            debug!(
                segment = drained.index(),
                pooled,
                segments = self.arena.live(),
                "unlinked drained head segment"
            );
            recorder.released(self.arena.footprint_bytes());
        }
        let value = self.arena[self.first].pop_front();
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    pub(crate) fn pop_back(&mut self, recorder: Recorder<'_>) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        if self.arena[self.last].back_drained() {
            let drained = self.last;
            let prev = self.arena[drained].prev?;
            self.arena[prev].next = None;
            self.last = prev;
            let pooled = self.arena.release(drained);
            debug!(
                segment = drained.index(),
                pooled,
                segments = self.arena.live(),
                "unlinked drained tail segment"
            );
            recorder.released(self.arena.footprint_bytes());
        }
        let value = self.arena[self.last].pop_back();
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    /// First element in logical order. Skips a drained head that has not been
    /// unlinked yet.
    pub(crate) fn front(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        let mut id = self.first;
        loop {
            let segment = &self.arena[id];
            if let Some(value) = segment.front_value() {
                return Some(value);
            }
            id = segment.next?;
        }
    }

    /// Last element in logical order. Skips a drained tail that has not been
    /// unlinked yet.
    pub(crate) fn back(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        let mut id = self.last;
        loop {
            let segment = &self.arena[id];
            if let Some(value) = segment.back_value() {
                return Some(value);
            }
            id = segment.prev?;
        }
    }

    pub(crate) fn clear(&mut self, recorder: Recorder<'_>) {
        let unlinked = self.arena.reset();
        for _ in 0..unlinked {
            recorder.released(self.arena.footprint_bytes());
        }
        let (center, reused) = self.arena.allocate_centered();
        self.first = center;
        self.last = center;
        self.len = 0;
        debug!(unlinked, reused, "cleared segment chain");
        recorder.linked(reused, self.arena.footprint_bytes());
    }

    /// Walk the chain and check the link and cursor invariants.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let capacity = self.arena.segment_capacity();
        let mut id = self.first;
        let mut prev = None;
        let mut total = 0;
        let mut linked = 0;
        loop {
            let segment = &self.arena[id];
            assert_eq!(segment.prev, prev, "broken prev link");
            assert_eq!(segment.capacity(), capacity);
            if id != self.first {
                assert!(segment.front_exhausted(), "interior segment open at front");
            }
            if id != self.last {
                assert!(segment.back_exhausted(), "interior segment open at back");
            }
            total += segment.len();
            linked += 1;
            match segment.next {
                Some(next) => {
                    prev = Some(id);
                    id = next;
                }
                None => break,
            }
        }
        assert_eq!(id, self.last, "chain does not end at last");
        assert_eq!(total, self.len, "len does not match live elements");
        assert_eq!(linked, self.arena.live(), "unlinked segments still live");
    }
}

/// An unbounded double-ended queue made of fixed-capacity segments
///
/// All methods take `&self`; share the deque across threads behind an `Arc`.
///
/// # Type Parameters
///
/// * `T` - The type of elements stored in the deque
///
/// # Examples
///
/// ```rust
/// use segmented_collections::SegmentedDeque;
///
/// let deque = SegmentedDeque::new();
/// deque.push_back(1);
/// deque.push_back(2);
/// deque.push_front(0);
///
/// assert_eq!(deque.front(), 0);
/// assert_eq!(deque.back(), 2);
/// assert_eq!(deque.pop_front(), 0);
/// assert_eq!(deque.pop_back(), 2);
/// assert_eq!(deque.len(), 1);
/// ```
pub struct SegmentedDeque<T> {
    chain: Mutex<Chain<T>>,
    len: CachePadded<AtomicUsize>,
    segment_capacity: usize,
    metrics: AtomicMetrics,
    metrics_enabled: AtomicBool,
}

impl<T> SegmentedDeque<T> {
    /// Create an empty deque with the default configuration
    ///
    /// One centered segment of [`DEFAULT_SEGMENT_CAPACITY`](crate::config::DEFAULT_SEGMENT_CAPACITY)
    /// slots is allocated up front.
    pub fn new() -> Self {
        Self::build(DequeConfig::default())
    }

    /// Create an empty deque with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSegmentCapacity`] if the configuration is rejected by
    /// [`DequeConfig::validate`].
    pub fn with_config(config: DequeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DequeConfig) -> Self {
        let chain = Chain::new(&config);
        let metrics = AtomicMetrics::default();
        metrics.record_segment_linked(false);
        metrics.update_memory_usage(chain.arena.footprint_bytes());

        Self {
            chain: Mutex::new(chain),
            len: CachePadded::new(AtomicUsize::new(0)),
            segment_capacity: config.segment_capacity,
            metrics,
            metrics_enabled: AtomicBool::new(true),
        }
    }

    /// Acquire the chain for a push or pop, reporting whether the lock was held.
    fn lock(&self) -> (MutexGuard<'_, Chain<T>>, bool) {
        match self.chain.try_lock() {
            Some(guard) => (guard, false),
            None => (self.chain.lock(), true),
        }
    }

    fn recorder(&self) -> Recorder<'_> {
        if self.is_metrics_enabled() {
            Recorder::new(&self.metrics)
        } else {
            Recorder::disabled()
        }
    }

    #[inline]
    fn publish_len(&self, chain: &Chain<T>) {
        self.len.get().store(chain.len(), Ordering::Release);
    }

    /// Contention is only counted alongside an outcome so it never exceeds
    /// `total_operations`.
    #[inline]
    fn record_outcome(&self, success: bool, contended: bool) {
        if !self.is_metrics_enabled() {
            return;
        }
        if contended {
            self.metrics.record_contention();
        }
        if success {
            self.metrics.record_success();
        } else {
            self.metrics.record_failure();
        }
    }

    /// Push an element onto the front of the deque
    pub fn push_front(&self, value: T) {
        let (mut chain, contended) = self.lock();
        chain.push_front(value, self.recorder());
        self.publish_len(&chain);
        drop(chain);
        self.record_outcome(true, contended);
    }

    /// Push an element onto the back of the deque
    pub fn push_back(&self, value: T) {
        let (mut chain, contended) = self.lock();
        chain.push_back(value, self.recorder());
        self.publish_len(&chain);
        drop(chain);
        self.record_outcome(true, contended);
    }

    /// Remove and return the front element
    ///
    /// # Panics
    ///
    /// Panics if the deque is empty. Use [`try_pop_front`](Self::try_pop_front) when
    /// emptiness is an expected condition.
    pub fn pop_front(&self) -> T {
        match self.try_pop_front() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Remove and return the back element
    ///
    /// # Panics
    ///
    /// Panics if the deque is empty. Use [`try_pop_back`](Self::try_pop_back) when
    /// emptiness is an expected condition.
    pub fn pop_back(&self) -> T {
        match self.try_pop_back() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Remove and return the front element
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDeque`] if the deque holds no elements.
    pub fn try_pop_front(&self) -> Result<T> {
        let (mut chain, contended) = self.lock();
        let value = chain.pop_front(self.recorder());
        self.publish_len(&chain);
        drop(chain);
        self.record_outcome(value.is_some(), contended);
        value.ok_or(Error::EmptyDeque)
    }

    /// Remove and return the back element
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDeque`] if the deque holds no elements.
    pub fn try_pop_back(&self) -> Result<T> {
        let (mut chain, contended) = self.lock();
        let value = chain.pop_back(self.recorder());
        self.publish_len(&chain);
        drop(chain);
        self.record_outcome(value.is_some(), contended);
        value.ok_or(Error::EmptyDeque)
    }

    /// Return a copy of the front element, or `T::default()` if the deque is empty
    ///
    /// # Examples
    ///
    /// ```rust
    /// use segmented_collections::SegmentedDeque;
    ///
    /// let deque: SegmentedDeque<i32> = SegmentedDeque::new();
    /// assert_eq!(deque.front(), 0);
    /// deque.push_back(7);
    /// assert_eq!(deque.front(), 7);
    /// ```
    pub fn front(&self) -> T
    where
        T: Clone + Default,
    {
        self.peek_front().unwrap_or_default()
    }

    /// Return a copy of the back element, or `T::default()` if the deque is empty
    pub fn back(&self) -> T
    where
        T: Clone + Default,
    {
        self.peek_back().unwrap_or_default()
    }

    /// Return a copy of the front element, or `None` if the deque is empty
    pub fn peek_front(&self) -> Option<T>
    where
        T: Clone,
    {
        self.chain.lock().front().cloned()
    }

    /// Return a copy of the back element, or `None` if the deque is empty
    pub fn peek_back(&self) -> Option<T>
    where
        T: Clone,
    {
        self.chain.lock().back().cloned()
    }

    /// Get the current number of elements in the deque
    #[inline]
    pub fn len(&self) -> usize {
        self.len.get().load(Ordering::Acquire)
    }

    /// Check if the deque is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push multiple elements onto the back under a single lock acquisition
    ///
    /// `values` is drained before the lock is taken, so the iterator may call back
    /// into this deque. Returns the number of elements pushed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use segmented_collections::SegmentedDeque;
    ///
    /// let deque = SegmentedDeque::new();
    /// assert_eq!(deque.push_back_batch(vec![1, 2, 3]), 3);
    /// assert_eq!(deque.pop_front_batch(2), vec![1, 2]);
    /// ```
    pub fn push_back_batch<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let pushed = values.len();
        if pushed == 0 {
            return 0;
        }

        let recorder = self.recorder();
        let (mut chain, contended) = self.lock();
        for value in values {
            chain.push_back(value, recorder);
        }
        self.publish_len(&chain);
        drop(chain);
        for i in 0..pushed {
            self.record_outcome(true, contended && i == 0);
        }
        pushed
    }

    /// Pop up to `max_values` elements from the front under a single lock acquisition
    ///
    /// The returned vector is in front-to-back order and may be empty.
    pub fn pop_front_batch(&self, max_values: usize) -> Vec<T> {
        let recorder = self.recorder();
        let (mut chain, contended) = self.lock();
        let mut values = Vec::with_capacity(max_values.min(chain.len()));
        while values.len() < max_values {
            match chain.pop_front(recorder) {
                Some(value) => values.push(value),
                None => break,
            }
        }
        self.publish_len(&chain);
        drop(chain);
        for i in 0..values.len() {
            self.record_outcome(true, contended && i == 0);
        }
        values
    }

    /// Drop every element and shrink back to a single centered segment
    pub fn clear(&self) {
        let recorder = self.recorder();
        let mut chain = self.chain.lock();
        chain.clear(recorder);
        self.publish_len(&chain);
    }

    /// Number of segments currently linked into the chain
    pub fn segment_count(&self) -> usize {
        self.chain.lock().segment_count()
    }

    /// Element slots per segment
    #[inline]
    pub fn segment_capacity(&self) -> usize {
        self.segment_capacity
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let chain = self.chain.lock();
        chain.assert_consistent();
        assert_eq!(chain.len(), self.len());
    }
}

impl<T> Default for SegmentedDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SegmentedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedDeque")
            .field("len", &self.len())
            .field("segment_capacity", &self.segment_capacity)
            .field("metrics_enabled", &self.is_metrics_enabled())
            .finish_non_exhaustive()
    }
}

impl<T> MetricsCollector for SegmentedDeque<T> {
    fn metrics(&self) -> PerformanceMetrics {
        self.metrics.snapshot()
    }

    fn reset_metrics(&self) {
        self.metrics.reset();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.metrics_enabled.store(enabled, Ordering::Relaxed);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.metrics_enabled.load(Ordering::Relaxed)
    }
}
