use nexus_heap::{HeapError, MetricsCollector, MetricsSnapshot, MinHeap};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;

fn drain<T: Ord>(heap: &mut MinHeap<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(heap.len());
    while let Ok(v) = heap.extract_min() {
        out.push(v);
    }
    out
}

fn sorted(mut v: Vec<i32>) -> Vec<i32> {
    v.sort();
    v
}

// ============================================================================
// Seeded randomized trials
// ============================================================================

#[test]
fn randomized_insert_then_drain_is_sorted() {
    let mut rng = SmallRng::seed_from_u64(123);
    for _ in 0..200 {
        let n = rng.random_range(0..300);
        let values: Vec<i32> = (0..n).map(|_| rng.random_range(0..1000)).collect();

        let mut heap = MinHeap::new();
        for &v in &values {
            heap.insert(v);
        }
        assert!(heap.is_heap());
        assert_eq!(drain(&mut heap), sorted(values));
        assert!(heap.is_empty());
    }
}

#[test]
fn randomized_mixed_operations_keep_invariant() {
    let mut rng = SmallRng::seed_from_u64(7);
    let metrics = Rc::new(MetricsCollector::new());
    let mut heap = MinHeap::with_config(1, true, Some(Rc::clone(&metrics)));
    let mut shadow: Vec<i32> = Vec::new();
    let mut last = metrics.snapshot();

    for _ in 0..5_000 {
        match rng.random_range(0..10) {
            0..=4 => {
                let v = rng.random_range(-500..500);
                heap.insert(v);
                shadow.push(v);
            }
            5..=6 => {
                let got = heap.extract_min();
                if shadow.is_empty() {
                    assert_eq!(got, Err(HeapError::EmptyStructure));
                } else {
                    let (pos, _) = shadow.iter().enumerate().min_by_key(|(_, v)| **v).unwrap();
                    assert_eq!(got, Ok(shadow.swap_remove(pos)));
                }
            }
            7..=8 => {
                if !heap.is_empty() {
                    let idx = rng.random_range(0..heap.len());
                    let current = heap.as_slice()[idx];
                    let new_value = current - rng.random_range(0..50);
                    heap.decrease_key(idx, new_value).unwrap();
                    let pos = shadow.iter().position(|&v| v == current).unwrap();
                    shadow[pos] = new_value;
                }
            }
            _ => {
                let extra: Vec<i32> = (0..rng.random_range(0..20))
                    .map(|_| rng.random_range(-500..500))
                    .collect();
                shadow.extend(&extra);
                heap.merge(MinHeap::build_heap(extra));
            }
        }

        assert!(heap.is_heap());
        assert_eq!(heap.len(), shadow.len());

        let now = metrics.snapshot();
        assert!(now.dominates(&last));
        last = now;
    }

    assert_eq!(drain(&mut heap), sorted(shadow));
}

// ============================================================================
// Scenario checks
// ============================================================================

#[test]
fn merge_then_drain() {
    let mut a = MinHeap::from_slice(&[1, 4, 7]);
    let b = MinHeap::from_slice(&[2, 3, 6]);
    a.merge(b);
    assert_eq!(drain(&mut a), vec![1, 2, 3, 4, 6, 7]);
}

#[test]
fn merge_reports_to_destination_only() {
    let dest = Rc::new(MetricsCollector::new());
    let src = Rc::new(MetricsCollector::new());

    let mut a = MinHeap::with_config(16, true, Some(Rc::clone(&dest)));
    a.insert(5);
    let mut b = MinHeap::with_config(16, true, Some(Rc::clone(&src)));
    b.insert(1);
    b.insert(2);

    let src_before = src.snapshot();
    let dest_before = dest.snapshot();
    a.merge(b);

    assert_eq!(src.snapshot(), src_before);
    let d = dest.snapshot().delta(&dest_before);
    assert!(d.array_accesses >= 2);
    assert!(d.comparisons >= 1);
    assert_eq!(a.peek(), Ok(&1));
}

#[test]
fn reset_between_phases() {
    let mut heap = MinHeap::build_heap((0..64).rev().collect::<Vec<i32>>());
    assert!(heap.metrics().comparisons() > 0);

    heap.metrics().reset();
    assert_eq!(heap.metrics().snapshot(), MetricsSnapshot::default());

    heap.extract_min().unwrap();
    assert!(heap.metrics().comparisons() > 0);
    assert_eq!(heap.metrics().allocations(), 0);
}

#[test]
fn failures_leave_heap_unchanged() {
    let mut heap = MinHeap::from_slice(&[3, 1, 2]);
    let storage = heap.as_slice().to_vec();

    assert!(heap.decrease_key(5, 0).is_err());
    assert!(heap.decrease_key(0, 100).is_err());
    assert_eq!(heap.as_slice(), storage.as_slice());
    assert_eq!(heap.len(), 3);
}

#[test]
fn errors_are_std_errors() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&HeapError::EmptyStructure);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn build_heap_drain_is_sorted(values in prop::collection::vec(any::<i32>(), 0..500)) {
        let mut heap = MinHeap::build_heap(values.clone());
        prop_assert!(heap.is_heap());
        prop_assert_eq!(drain(&mut heap), sorted(values));
    }

    #[test]
    fn insert_drain_matches_build_drain(values in prop::collection::vec(-1000i32..1000, 0..300)) {
        let mut inserted = MinHeap::new();
        inserted.extend(values.iter().copied());
        let mut built = MinHeap::from_slice(&values);
        prop_assert_eq!(drain(&mut inserted), drain(&mut built));
    }

    #[test]
    fn merge_is_union(
        left in prop::collection::vec(any::<i32>(), 0..200),
        right in prop::collection::vec(any::<i32>(), 0..200),
    ) {
        let mut a = MinHeap::build_heap(left.clone());
        a.merge(MinHeap::build_heap(right.clone()));
        prop_assert!(a.is_heap());

        let mut expected = left;
        expected.extend(right);
        prop_assert_eq!(drain(&mut a), sorted(expected));
    }

    #[test]
    fn peek_is_minimum(values in prop::collection::vec(any::<i32>(), 1..200)) {
        let heap = MinHeap::from_slice(&values);
        prop_assert_eq!(heap.peek(), Ok(values.iter().min().unwrap()));
    }

    #[test]
    fn capacity_never_shrinks(values in prop::collection::vec(any::<u16>(), 0..200)) {
        let mut heap = MinHeap::with_capacity(1);
        let mut cap = heap.capacity();
        for v in values {
            heap.insert(v);
            prop_assert!(heap.capacity() >= cap);
            prop_assert!(heap.capacity() >= heap.len());
            cap = heap.capacity();
        }
        heap.clear();
        prop_assert_eq!(heap.capacity(), cap);
    }
}
