//! Key comparators
//!
//! A [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) always extracts the
//! key its comparator orders first. [`MinOrder`] (the default) gives a
//! min-queue over `Ord` keys, [`MaxOrder`] a max-queue, and [`FnOrder`] wraps
//! any closure.
//!
//! ```rust
//! use fibonacci_queue::compare::MaxOrder;
//! use fibonacci_queue::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::with_comparator(MaxOrder);
//! heap.insert(1, "low");
//! heap.insert(9, "high");
//! assert_eq!(heap.extract_min(), Ok((9, "high")));
//! ```

use std::cmp::Ordering;

/// Total order used by a heap to rank its keys.
///
/// `compare(a, b) == Less` means `a` is extracted before `b`.
pub trait Compare<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns true if `a` is strictly ahead of `b`.
    #[inline]
    fn precedes(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Natural ascending order: smallest key first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MinOrder;

impl<K: Ord + ?Sized> Compare<K> for MinOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reverse order: largest key first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaxOrder;

impl<K: Ord + ?Sized> Compare<K> for MaxOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Comparator backed by a closure.
///
/// ```rust
/// use fibonacci_queue::compare::FnOrder;
/// use fibonacci_queue::fibonacci::FibonacciHeap;
///
/// // shortest string first
/// let mut heap = FibonacciHeap::with_comparator(FnOrder(|a: &String, b: &String| {
///     a.len().cmp(&b.len())
/// }));
/// heap.insert("three".to_string(), 3);
/// heap.insert("one".to_string(), 1);
/// assert_eq!(heap.peek_min().map(|(_, item)| *item), Ok(1));
/// ```
#[derive(Clone, Copy)]
pub struct FnOrder<F>(pub F);

impl<K: ?Sized, F> Compare<K> for FnOrder<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for FnOrder<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnOrder(..)")
    }
}
