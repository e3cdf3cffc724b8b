//! Common traits for heap data structures
//!
//! This module provides a small trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait with the `BinaryHeap`-like surface (`push`, `peek`, `pop`)
//! - [`MergeableHeap`]: Adds consuming union of two heaps
//! - [`DecreaseKeyHeap`]: Adds handle-based `decrease_key` and `delete`
//!
//! Generic algorithms such as [`crate::pathfinding`] are written against these
//! traits rather than a concrete heap.

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `peek_min` or `extract_min` on a heap with no entries
    #[error("heap is empty")]
    EmptyHeap,
    /// `decrease_key` was given a key that orders after the current key
    #[error("new key orders after the current key")]
    InvalidKeyUpdate,
    /// The handle refers to an entry that was extracted or deleted, or that
    /// never belonged to this heap
    #[error("handle is stale (entry was removed or belongs to another heap)")]
    StaleHandle,
}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly, these heaps store
/// (key, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use fibonacci_queue::Heap;
/// use fibonacci_queue::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<&str, i32> = Heap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, K> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given key
    fn push(&mut self, key: K, item: T);

    /// Returns the minimum key and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps
    /// under their comparator.
    fn peek(&self) -> Option<(&K, &T)>;

    /// Removes and returns the minimum key and associated item
    fn pop(&mut self) -> Option<(K, T)>;
}

/// Heaps that support union with another heap of the same type
pub trait MergeableHeap<T, K>: Heap<T, K> {
    /// Merges another heap into this one, consuming the other heap
    ///
    /// # Time Complexity
    /// O(1) for Fibonacci heaps: the work is deferred to the next `pop`.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// This trait extends [`Heap`] with operations that require tracking element handles:
/// - `push_with_handle` returns a handle that can be used with `decrease_key`
/// - `decrease_key` efficiently updates an element's key
/// - `delete` removes an arbitrary element
///
/// These operations are essential for algorithms like Dijkstra's shortest path
/// that need to update keys of elements already in the heap.
///
/// # Example
///
/// ```rust
/// use fibonacci_queue::{DecreaseKeyHeap, Heap};
/// use fibonacci_queue::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<&str, i32> = Heap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, K>: Heap<T, K> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given key, returning a handle
    fn push_with_handle(&mut self, key: K, item: T) -> Self::Handle;

    /// Decreases the key of an element identified by the handle
    ///
    /// # Errors
    /// - `HeapError::InvalidKeyUpdate` if the new key orders after the current key
    /// - `HeapError::StaleHandle` if the element is no longer in the heap
    ///
    /// # Time Complexity
    /// O(1) amortized for Fibonacci heaps
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;

    /// Removes the element identified by the handle and returns it
    ///
    /// # Errors
    /// `HeapError::StaleHandle` if the element is no longer in the heap
    fn delete(&mut self, handle: &Self::Handle) -> Result<(K, T), HeapError>;
}
