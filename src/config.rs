//! Deque configuration
//!
//! [`DequeConfig`] controls how the segmented deque sizes and recycles its segments.

use crate::{Error, Result};

/// Default number of element slots per segment
pub const DEFAULT_SEGMENT_CAPACITY: usize = 1024;

/// Default number of drained segments kept around for reuse
pub const DEFAULT_MAX_SPARE_SEGMENTS: usize = 1;

/// Sizing and recycling knobs for a [`SegmentedDeque`](crate::SegmentedDeque)
///
/// # Examples
///
/// ```rust
/// use segmented_collections::{DequeConfig, SegmentedDeque};
///
/// let config = DequeConfig::default()
///     .with_segment_capacity(64)
///     .with_max_spare_segments(4);
/// let deque: SegmentedDeque<u32> = SegmentedDeque::with_config(config)?;
/// assert_eq!(deque.segment_capacity(), 64);
/// # Ok::<(), segmented_collections::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DequeConfig {
    /// Element slots per segment. Must be at least 2.
    pub segment_capacity: usize,
    /// Drained segments pooled for reuse instead of being freed.
    /// Zero frees every segment as soon as it is unlinked.
    pub max_spare_segments: usize,
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self {
            segment_capacity: DEFAULT_SEGMENT_CAPACITY,
            max_spare_segments: DEFAULT_MAX_SPARE_SEGMENTS,
        }
    }
}

impl DequeConfig {
    /// Set the number of element slots per segment
    pub fn with_segment_capacity(mut self, segment_capacity: usize) -> Self {
        self.segment_capacity = segment_capacity;
        self
    }

    /// Set how many drained segments are pooled for reuse
    pub fn with_max_spare_segments(mut self, max_spare_segments: usize) -> Self {
        self.max_spare_segments = max_spare_segments;
        self
    }

    /// Check the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSegmentCapacity`] if `segment_capacity` is below 2 or too
    /// large to be addressed by a signed cursor.
    pub fn validate(&self) -> Result<()> {
        if self.segment_capacity < 2 || self.segment_capacity > isize::MAX as usize {
            return Err(Error::InvalidSegmentCapacity(self.segment_capacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DequeConfig::default();
        assert_eq!(config.segment_capacity, 1024);
        assert_eq!(config.max_spare_segments, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_segments() {
        for capacity in [0, 1] {
            let config = DequeConfig::default().with_segment_capacity(capacity);
            assert_eq!(
                config.validate(),
                Err(Error::InvalidSegmentCapacity(capacity))
            );
        }
        assert!(DequeConfig::default().with_segment_capacity(2).validate().is_ok());
        assert!(DequeConfig::default().with_segment_capacity(3).validate().is_ok());
    }
}
