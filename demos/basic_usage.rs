//! Basic usage example for segmented-collections
//!
//! This example demonstrates the segmented deque at both ends, a shared deque fed by
//! several producers, and comparator-driven priority queues.

use segmented_collections::{
    DequeConfig, Error, MetricsCollector, PriorityQueue, SegmentedDeque, SyncPriorityQueue,
};
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=segmented_collections=trace shows segment link/unlink events
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Segmented Collections Usage Example");
    println!("===================================");

    // Small segments make link/unlink visible
    let deque = Arc::new(SegmentedDeque::with_config(
        DequeConfig::default()
            .with_segment_capacity(8)
            .with_max_spare_segments(2),
    )?);

    // Basic operations at both ends
    println!("\n1. Basic Deque Operations:");
    deque.push_back(42);
    deque.push_back(24);
    deque.push_front(7);

    println!("   Front: {}, Back: {}", deque.front(), deque.back());
    println!("   Popped front: {}", deque.pop_front());
    println!("   Popped back: {}", deque.pop_back());
    println!("   Remaining: {}", deque.len());

    // Multi-producer scenario
    println!("\n2. Multi-Producer:");
    let producer_handles: Vec<_> = (0..4)
        .map(|i| {
            let deque = Arc::clone(&deque);
            thread::spawn(move || {
                for j in 0..25 {
                    let value = i * 25 + j;
                    if j % 2 == 0 {
                        deque.push_front(value);
                    } else {
                        deque.push_back(value);
                    }
                }
                println!("   Producer {} finished with 25 items", i);
            })
        })
        .collect();

    for handle in producer_handles {
        handle
            .join()
            .map_err(|_| "producer thread panicked")?;
    }
    println!(
        "   Deque holds {} items across {} segments",
        deque.len(),
        deque.segment_count()
    );

    // Draining with recoverable errors
    println!("\n3. Draining:");
    let batch = deque.pop_front_batch(10);
    println!("   Batch of {} from the front: {:?}", batch.len(), batch);

    let mut drained = batch.len();
    loop {
        match deque.try_pop_back() {
            Ok(_) => drained += 1,
            Err(Error::EmptyDeque) => {
                println!("   Deque empty after draining {} items", drained);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    println!("   Soft front on empty deque: {}", deque.front());
    println!("   Peek on empty deque: {:?}", deque.peek_front());

    let metrics = deque.metrics();
    println!(
        "   Operations: {} ok, {} failed, {} contended",
        metrics.successful_operations, metrics.failed_operations, metrics.contended_operations
    );
    println!(
        "   Segments: {} allocated, {} reused, {} released",
        metrics.segments_allocated, metrics.segments_reused, metrics.segments_released
    );

    // Priority queue with a custom comparator
    println!("\n4. Priority Queue:");
    let mut jobs = PriorityQueue::new(8, |a: &(u8, &'static str), b: &(u8, &'static str)| {
        a.0.cmp(&b.0)
    });
    jobs.push((3, "flush buffers"));
    jobs.push((1, "accept connection"));
    jobs.push((2, "parse request"));

    println!("   Next job: {:?}", jobs.head());
    while let Ok((priority, name)) = jobs.try_pop() {
        println!("   Running [{}] {}", priority, name);
    }

    // Shared priority queue
    println!("\n5. Shared Priority Queue:");
    let deadlines = Arc::new(SyncPriorityQueue::new(16, |a: &u64, b: &u64| a.cmp(b)));
    let handles: Vec<_> = (0..3u64)
        .map(|i| {
            let deadlines = Arc::clone(&deadlines);
            thread::spawn(move || {
                for j in 0..3 {
                    deadlines.push(100 * (3 - j) + i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_| "timer thread panicked")?;
    }

    let earliest = deadlines.with_lock(|heap| (heap.pop(), heap.pop()));
    println!("   Two earliest deadlines: {:?}", earliest);
    println!("   Still pending: {}", deadlines.len());

    println!("\nExample completed successfully!");
    Ok(())
}
