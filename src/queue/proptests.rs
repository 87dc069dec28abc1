//! Property-based tests for priority queues using proptest
//!
//! These tests verify that the heap invariant holds after every operation and that
//! extraction order matches a sorted model under arbitrary push/pop sequences.

use super::PriorityQueue;
use proptest::prelude::*;
use std::cmp::Ordering;

fn ascending(a: &i32, b: &i32) -> Ordering {
    a.cmp(b)
}

fn descending(a: &i32, b: &i32) -> Ordering {
    b.cmp(a)
}

proptest! {
    #[test]
    fn test_head_is_minimum_after_every_operation(
        capacity in 0usize..16,
        operations in prop::collection::vec(prop::option::weighted(0.7, any::<i32>()), 1..300)
    ) {
        let mut heap = PriorityQueue::<i32, _>::new(capacity, ascending);
        let mut model: Vec<i32> = Vec::new();

        for op in operations {
            match op {
                Some(value) => {
                    heap.push(value);
                    model.push(value);
                }
                None => {
                    let expected = model.iter().copied().min();
                    prop_assert_eq!(heap.try_pop().ok(), expected);
                    if let Some(min) = expected {
                        let index = model.iter().position(|&v| v == min).unwrap();
                        model.swap_remove(index);
                    }
                }
            }

            prop_assert!(heap.is_heap());
            prop_assert_eq!(heap.len(), model.len());
            prop_assert_eq!(heap.peek().copied(), model.iter().copied().min());
        }
    }

    #[test]
    fn test_drain_is_non_decreasing(
        values in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        let mut heap = PriorityQueue::<i32, _>::new(values.len(), ascending);
        for &value in &values {
            heap.push(value);
        }

        let mut drained = Vec::with_capacity(values.len());
        while let Ok(value) = heap.try_pop() {
            drained.push(value);
        }

        prop_assert!(drained.windows(2).all(|pair| pair[0] <= pair[1]));
        let mut sorted = values;
        sorted.sort_unstable();
        prop_assert_eq!(drained, sorted);
    }

    #[test]
    fn test_inverted_comparator_drains_descending(
        values in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        let mut heap = PriorityQueue::<i32, _>::new(0, descending);
        for &value in &values {
            heap.push(value);
        }

        let drained: Vec<i32> = std::iter::from_fn(|| heap.try_pop().ok()).collect();
        let mut sorted = values;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(drained, sorted);
    }

    #[test]
    fn test_from_vec_matches_incremental_pushes(
        values in prop::collection::vec(-50i32..50, 0..150)
    ) {
        let mut heapified = PriorityQueue::from_vec(values.clone(), ascending);
        prop_assert!(heapified.is_heap());

        let mut pushed = PriorityQueue::<i32, _>::new(0, ascending);
        for &value in &values {
            pushed.push(value);
        }

        while let Ok(expected) = pushed.try_pop() {
            prop_assert_eq!(heapified.try_pop(), Ok(expected));
        }
        prop_assert!(heapified.is_empty());
    }
}
