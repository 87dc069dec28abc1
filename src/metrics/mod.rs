//! Performance Metrics Module
//!
//! This module provides operational metrics for the containers in this crate. It tracks
//! operation outcomes, lock contention and segment churn using relaxed atomic counters,
//! so recording never takes a lock.

use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Snapshot of a container's counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PerformanceMetrics {
    /// Total number of operations performed
    pub total_operations: u64,
    /// Number of successful operations
    pub successful_operations: u64,
    /// Number of failed operations (pops on an empty container)
    pub failed_operations: u64,
    /// Number of counted operations that found the lock held and had to wait
    pub contended_operations: u64,
    /// Segments created from fresh allocations
    pub segments_allocated: u64,
    /// Segments taken from the spare pool instead of allocating
    pub segments_reused: u64,
    /// Segments unlinked from the chain after being drained
    pub segments_released: u64,
    /// Current segment memory in bytes
    pub memory_usage_bytes: usize,
    /// Peak segment memory in bytes
    pub peak_memory_usage_bytes: usize,
}

impl PerformanceMetrics {
    /// Calculate success rate as percentage
    pub fn success_rate(&self) -> f64 {
        Self::percentage(self.successful_operations, self.total_operations)
    }

    /// Calculate contention rate as percentage
    pub fn contention_rate(&self) -> f64 {
        Self::percentage(self.contended_operations, self.total_operations)
    }

    /// Calculate failure rate as percentage
    pub fn failure_rate(&self) -> f64 {
        Self::percentage(self.failed_operations, self.total_operations)
    }

    fn percentage(part: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }
}

/// Internal atomic metrics collection
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    total_operations: AtomicU64,
    successful_operations: AtomicU64,
    failed_operations: AtomicU64,
    contended_operations: AtomicU64,
    segments_allocated: AtomicU64,
    segments_reused: AtomicU64,
    segments_released: AtomicU64,
    memory_usage: AtomicUsize,
    peak_memory_usage: AtomicUsize,
}

impl AtomicMetrics {
    /// Record a successful operation
    pub fn record_success(&self) {
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        self.successful_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed operation
    pub fn record_failure(&self) {
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        self.failed_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a contended operation
    pub fn record_contention(&self) {
        self.contended_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a segment linked into the chain, `reused` if it came from the spare pool
    pub fn record_segment_linked(&self, reused: bool) {
        if reused {
            self.segments_reused.fetch_add(1, Ordering::Relaxed);
        } else {
            self.segments_allocated.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a drained segment unlinked from the chain
    pub fn record_segment_released(&self) {
        self.segments_released.fetch_add(1, Ordering::Relaxed);
    }

    /// Update memory usage
    pub fn update_memory_usage(&self, usage: usize) {
        self.memory_usage.store(usage, Ordering::Relaxed);
        self.peak_memory_usage.fetch_max(usage, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            total_operations: self.total_operations.load(Ordering::Relaxed),
            successful_operations: self.successful_operations.load(Ordering::Relaxed),
            failed_operations: self.failed_operations.load(Ordering::Relaxed),
            contended_operations: self.contended_operations.load(Ordering::Relaxed),
            segments_allocated: self.segments_allocated.load(Ordering::Relaxed),
            segments_reused: self.segments_reused.load(Ordering::Relaxed),
            segments_released: self.segments_released.load(Ordering::Relaxed),
            memory_usage_bytes: self.memory_usage.load(Ordering::Relaxed),
            peak_memory_usage_bytes: self.peak_memory_usage.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.total_operations.store(0, Ordering::Relaxed);
        self.successful_operations.store(0, Ordering::Relaxed);
        self.failed_operations.store(0, Ordering::Relaxed);
        self.contended_operations.store(0, Ordering::Relaxed);
        self.segments_allocated.store(0, Ordering::Relaxed);
        self.segments_reused.store(0, Ordering::Relaxed);
        self.segments_released.store(0, Ordering::Relaxed);
        // Keep memory usage as is since it reflects current state
        let current = self.memory_usage.load(Ordering::Relaxed);
        self.peak_memory_usage.store(current, Ordering::Relaxed);
    }
}

/// Trait for data structures that support performance metrics
pub trait MetricsCollector {
    /// Get current performance metrics
    fn metrics(&self) -> PerformanceMetrics;

    /// Reset all metrics
    fn reset_metrics(&self);

    /// Enable or disable metrics collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Check if metrics collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}
