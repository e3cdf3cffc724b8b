//! Stress tests that push the heap through large operation counts
//!
//! The smaller runs always execute. The large ones are gated behind the
//! `stress_tests` feature:
//!
//! ```bash
//! cargo test --release --features stress_tests --test stress_tests
//! ```

use fibonacci_queue::fibonacci::FibonacciHeap;
use fibonacci_queue::{DecreaseKeyHeap, Heap, MergeableHeap};

/// Inserts `n` ascending keys and pops them back in order.
fn massive_operations<H: Heap<i32, i32>>(n: i32) {
    let mut heap = H::new();
    for i in 0..n {
        heap.push(i, i);
    }
    assert_eq!(heap.len(), n as usize);

    for i in 0..n {
        assert_eq!(heap.pop(), Some((i, i)));
    }
    assert!(heap.is_empty());
}

/// Pushes high keys, then decreases every one of them below the rest.
fn many_decrease_keys<H: DecreaseKeyHeap<i32, i32>>(n: i32) {
    let mut heap = H::new();
    let handles: Vec<_> = (0..n).map(|i| heap.push_with_handle(10 * n + i, i)).collect();

    // one pop builds trees, so the decreases below exercise cuts
    assert_eq!(heap.pop(), Some((10 * n, 0)));
    for (i, handle) in handles.iter().enumerate().skip(1) {
        assert!(heap.decrease_key(handle, i as i32).is_ok());
    }

    for i in 1..n {
        assert_eq!(heap.pop(), Some((i, i)));
    }
}

/// Insert two, pop one, in a long alternating run.
fn alternating_ops<H: Heap<i32, i32>>(n: i32) {
    let mut heap = H::new();
    for i in 0..n {
        heap.push(i * 2, i);
        heap.push(i * 2 + 1, i + n);
        assert_eq!(heap.pop().map(|(key, _)| key), Some(i));
    }
    assert_eq!(heap.len(), n as usize);
}

/// Builds a heap out of many small merged heaps.
fn merge_cascade<H: MergeableHeap<(), i32>>(parts: i32, per_part: i32) {
    let mut total = H::new();
    for part in 0..parts {
        let mut piece = H::new();
        for i in 0..per_part {
            piece.push(i * parts + part, ());
        }
        total.merge(piece);
        if part % 7 == 0 {
            total.pop();
        }
    }

    let mut last = i32::MIN;
    while let Some((key, ())) = total.pop() {
        assert!(key >= last, "popped {key} after {last}");
        last = key;
    }
}

/// Decreases keys in reverse depth order to force long cascading cuts, and
/// checks the structure as it goes.
fn cascading_cut_storm(n: i32) {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..n).map(|i| heap.insert(i, i)).collect();
    heap.extract_min().unwrap();

    for (step, handle) in handles.iter().enumerate().skip(1).rev() {
        let (&key, _) = heap.get(handle).unwrap();
        heap.decrease_key(handle, key - n).unwrap();
        if step % 97 == 0 {
            assert_eq!(heap.verify_structure(), Ok(()));
        }
    }
    assert_eq!(heap.verify_structure(), Ok(()));

    let drained: Vec<_> = heap.into_iter().map(|(key, _)| key).collect();
    let expected: Vec<_> = (1..n).map(|i| i - n).collect();
    assert_eq!(drained, expected);
}

#[test]
fn test_massive_operations() {
    massive_operations::<FibonacciHeap<i32, i32>>(1_000);
}

#[test]
fn test_many_decrease_keys() {
    many_decrease_keys::<FibonacciHeap<i32, i32>>(500);
}

#[test]
fn test_alternating_ops() {
    alternating_ops::<FibonacciHeap<i32, i32>>(200);
}

#[test]
fn test_merge_cascade() {
    merge_cascade::<FibonacciHeap<(), i32>>(50, 20);
}

#[test]
fn test_cascading_cut_storm() {
    cascading_cut_storm(2_000);
}

#[cfg(feature = "stress_tests")]
mod large {
    use super::*;

    #[test]
    fn test_massive_operations_large() {
        massive_operations::<FibonacciHeap<i32, i32>>(1_000_000);
    }

    #[test]
    fn test_many_decrease_keys_large() {
        many_decrease_keys::<FibonacciHeap<i32, i32>>(200_000);
    }

    #[test]
    fn test_merge_cascade_large() {
        merge_cascade::<FibonacciHeap<(), i32>>(5_000, 100);
    }

    #[test]
    fn test_cascading_cut_storm_large() {
        cascading_cut_storm(100_000);
    }
}
