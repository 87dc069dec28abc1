//! Deque (double-ended queue) implementations
//!
//! This module provides an unbounded, thread-safe double-ended queue built from a chain
//! of fixed-capacity segments.
//!
//! ## Available Deques
//!
//! - [`SegmentedDeque`]: Lock-guarded segmented deque with amortized O(1) operations at
//!   both ends
//!
//! ## Choosing a Segment Capacity
//!
//! - Larger segments allocate less often but hold more idle memory at the ends
//! - Smaller segments release memory sooner when the deque shrinks
//! - The default of 1024 slots suits most element sizes

mod segment;
pub mod segmented;

pub use self::segmented::SegmentedDeque;


#[cfg(test)]
mod proptests;
