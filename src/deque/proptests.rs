//! Property-based tests for the segmented deque using proptest
//!
//! Each test drives a [`SegmentedDeque`] and a `VecDeque` model with the same operation
//! sequence. Tiny segment capacities force frequent segment linking and unlinking.

use super::SegmentedDeque;
use crate::config::DequeConfig;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushFront),
        any::<i32>().prop_map(Op::PushBack),
        Just(Op::PopFront),
        Just(Op::PopBack),
    ]
}

fn deque_with(segment_capacity: usize, max_spare_segments: usize) -> SegmentedDeque<i32> {
    SegmentedDeque::with_config(
        DequeConfig::default()
            .with_segment_capacity(segment_capacity)
            .with_max_spare_segments(max_spare_segments),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn test_matches_vecdeque_model(
        segment_capacity in 2usize..9,
        max_spare_segments in 0usize..3,
        operations in prop::collection::vec(op_strategy(), 1..400)
    ) {
        let deque = deque_with(segment_capacity, max_spare_segments);
        let mut model = VecDeque::new();
        let mut pushes = 0usize;
        let mut pops = 0usize;

        for op in operations {
            match op {
                Op::PushFront(value) => {
                    deque.push_front(value);
                    model.push_front(value);
                    pushes += 1;
                }
                Op::PushBack(value) => {
                    deque.push_back(value);
                    model.push_back(value);
                    pushes += 1;
                }
                Op::PopFront => {
                    let expected = model.pop_front();
                    prop_assert_eq!(deque.try_pop_front().ok(), expected);
                    pops += usize::from(expected.is_some());
                }
                Op::PopBack => {
                    let expected = model.pop_back();
                    prop_assert_eq!(deque.try_pop_back().ok(), expected);
                    pops += usize::from(expected.is_some());
                }
            }

            prop_assert_eq!(deque.len(), model.len());
            prop_assert_eq!(deque.len(), pushes - pops);
            prop_assert_eq!(deque.is_empty(), model.is_empty());
            prop_assert_eq!(deque.peek_front(), model.front().copied());
            prop_assert_eq!(deque.peek_back(), model.back().copied());
        }

        deque.assert_consistent();
    }

    #[test]
    fn test_same_end_reverses_opposite_end_preserves(
        segment_capacity in 2usize..9,
        values in prop::collection::vec(any::<i32>(), 1..100),
        push_front in any::<bool>()
    ) {
        let deque = deque_with(segment_capacity, 1);
        for &value in &values {
            if push_front {
                deque.push_front(value);
            } else {
                deque.push_back(value);
            }
        }

        // Same end: reverse insertion order
        let pop_same = || if push_front { deque.try_pop_front() } else { deque.try_pop_back() };
        let mut reversed = Vec::with_capacity(values.len());
        while let Ok(value) = pop_same() {
            reversed.push(value);
        }
        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(reversed, expected);

        for &value in &values {
            if push_front {
                deque.push_front(value);
            } else {
                deque.push_back(value);
            }
        }

        // Opposite end: original insertion order
        let pop_opposite = || if push_front { deque.try_pop_back() } else { deque.try_pop_front() };
        let mut preserved = Vec::with_capacity(values.len());
        while let Ok(value) = pop_opposite() {
            preserved.push(value);
        }
        prop_assert_eq!(preserved, values);
        prop_assert!(deque.is_empty());
    }

    #[test]
    fn test_batches_match_single_operations(
        segment_capacity in 2usize..9,
        values in prop::collection::vec(any::<i32>(), 0..200),
        take in 0usize..250
    ) {
        let deque = deque_with(segment_capacity, 1);
        prop_assert_eq!(deque.push_back_batch(values.iter().copied()), values.len());

        let popped = deque.pop_front_batch(take);
        let expected: Vec<i32> = values.iter().copied().take(take).collect();
        prop_assert_eq!(&popped, &expected);
        prop_assert_eq!(deque.len(), values.len() - popped.len());
        deque.assert_consistent();
    }
}
