//! Mergeable priority queues with efficient `decrease_key`
//!
//! This crate provides a Fibonacci heap: a forest of heap-ordered trees with
//! lazy consolidation, built for workloads dominated by key decreases such as
//! shortest-path relaxation.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert, decrease_key and merge;
//!   O(log n) amortized extract_min and delete
//! - **Stable handles**: generation-checked, `Copy`, and valid across merges
//! - **Configurable order**: min-queue, max-queue or any closure via
//!   [`compare::Compare`]
//! - **Pathfinding**: Dijkstra, A* and bounded reachability on top of
//!   [`DecreaseKeyHeap`]
//!
//! # Example
//!
//! ```rust
//! use fibonacci_queue::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek_min(), Ok((&1, &"item1")));
//!
//! let mut other = FibonacciHeap::new();
//! other.insert(2, "item3");
//! heap.merge(other);
//! assert_eq!(heap.len(), 3);
//! assert_eq!(heap.into_sorted_vec().len(), 3);
//! ```

pub mod compare;
pub mod degree;
pub mod fibonacci;
pub mod pathfinding;
pub mod traits;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError, MergeableHeap};
