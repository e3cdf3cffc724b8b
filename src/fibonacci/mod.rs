//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized extract_min and delete
//!
//! The structure is a collection of heap-ordered trees whose roots are linked
//! in a circular doubly linked list. The heap keeps a reference to the minimal
//! root. Work is deferred: insert and merge only splice rings, and the next
//! `extract_min` pays for it by consolidating trees of equal degree.
//! `decrease_key` cuts a node loose when it undercuts its parent; a parent
//! that loses a second child is cut as well (cascading cut), which keeps the
//! degree of every node logarithmic.
//!
//! # Storage
//!
//! Nodes live in a generational arena rather than behind raw pointers.
//! A [`FibonacciHandle`] stays valid until its entry is extracted or deleted;
//! after that every operation taking it returns [`HeapError::StaleHandle`].
//! Handles survive [`merge`](FibonacciHeap::merge): entries moved in from the
//! donor heap are reachable through the donor's handles.
//!
//! # Tie-breaking
//!
//! Equal keys are resolved deterministically. The current minimum is kept
//! when an inserted, cut or merged root ties with it. During consolidation the
//! root already in a degree bucket stays parent, and the new minimum is the
//! first minimal root in ascending degree order.

mod arena;
mod consolidate;
mod cut;
mod traverse;
mod verify;

use index_ring::RingOps;
use log::debug;

use crate::compare::{Compare, MinOrder};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError, MergeableHeap};
use arena::{Arena, NodeRef};

pub use traverse::{Iter, Siblings};
pub use verify::StructureError;

const RING: RingOps = RingOps::new();

/// Handle to an element in a Fibonacci heap
///
/// Handles are cheap to copy and carry a generation, so a handle whose entry
/// has left the heap is detected rather than aliasing a newer entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeRef,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// `T` is the item type, `K` the key type and `C` the [`Compare`] used to
/// order keys ([`MinOrder`] by default).
///
/// # Example
///
/// ```rust
/// use fibonacci_queue::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek_min(), Ok((&1, &"item")));
/// assert_eq!(heap.extract_min(), Ok((1, "item")));
/// ```
pub struct FibonacciHeap<T, K, C = MinOrder> {
    arena: Arena<T, K>,
    min: Option<NodeRef>,
    len: usize,
    compare: C,
}

impl<T, K: Ord> FibonacciHeap<T, K> {
    /// Creates an empty min-heap over `Ord` keys.
    pub fn new() -> Self {
        Self::with_comparator(MinOrder)
    }
}

impl<T, K, C: Compare<K>> FibonacciHeap<T, K, C> {
    /// Creates an empty heap ordered by `compare`.
    pub fn with_comparator(compare: C) -> Self {
        FibonacciHeap {
            arena: Arena::new(),
            min: None,
            len: 0,
            compare,
        }
    }

    /// Creates an empty heap with room for `capacity` entries before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self
    where
        C: Default,
    {
        FibonacciHeap {
            arena: Arena::with_capacity(capacity),
            min: None,
            len: 0,
            compare: C::default(),
        }
    }

    /// Returns the comparator ordering this heap.
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns the number of entries in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts an entry and returns its handle.
    ///
    /// The entry becomes a new single-node tree in the root list; no
    /// restructuring happens.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, key: K, item: T) -> FibonacciHandle {
        let node = self.arena.alloc(key, item);
        self.add_root(node);
        self.len += 1;
        self.debug_verify();
        FibonacciHandle { node }
    }

    /// Returns the minimal entry without removing it.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap has no entries.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn peek_min(&self) -> Result<(&K, &T), HeapError> {
        let node = &self.arena[self.min.ok_or(HeapError::EmptyHeap)?];
        Ok((&node.key, &node.item))
    }

    /// Returns the handle of the minimal entry.
    pub fn min_handle(&self) -> Option<FibonacciHandle> {
        self.min.map(|node| FibonacciHandle { node })
    }

    /// Removes and returns the minimal entry.
    ///
    /// The children of the removed node join the root list, then trees of
    /// equal degree are linked until every root has a distinct degree.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap has no entries.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<(K, T), HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;

        self.promote_children(min);
        let rest = RING.remove(&mut self.arena, min);
        let Some(node) = self.arena.free(min) else {
            unreachable!("min references a freed node");
        };
        self.len -= 1;

        match rest {
            Some(start) => self.consolidate(start),
            None => self.min = None,
        }

        self.debug_verify();
        Ok((node.key, node.item))
    }

    /// Moves the entry behind `handle` to a key that orders no later than its
    /// current one.
    ///
    /// An equal key is accepted and changes nothing structurally. If the new
    /// key undercuts the parent's, the node is cut into the root list and its
    /// marked ancestors follow (cascading cut).
    ///
    /// # Errors
    /// - `HeapError::StaleHandle` if the entry is no longer in this heap
    /// - `HeapError::InvalidKeyUpdate` if `new_key` orders after the current
    ///   key; the heap is left untouched
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let node = handle.node;
        let current = self.arena.get(node).ok_or(HeapError::StaleHandle)?;
        if self.compare.precedes(&current.key, &new_key) {
            return Err(HeapError::InvalidKeyUpdate);
        }
        let parent = current.parent;

        self.arena[node].key = new_key;

        match parent {
            Some(parent) => {
                if self.precedes(node, parent) {
                    self.cut(node, parent);
                    self.cascading_cut(parent);
                }
            }
            None => {
                if self.min.is_some_and(|min| self.precedes(node, min)) {
                    self.min = Some(node);
                }
            }
        }

        self.debug_verify();
        Ok(())
    }

    /// Removes the entry behind `handle` and returns it.
    ///
    /// Behaves like decreasing the key below every other key followed by
    /// `extract_min`: the node is cut from its parent (with cascading cuts),
    /// treated as the minimum and extracted, which consolidates the roots.
    ///
    /// # Errors
    /// `HeapError::StaleHandle` if the entry is no longer in this heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<(K, T), HeapError> {
        let node = handle.node;
        let parent = self.arena.get(node).ok_or(HeapError::StaleHandle)?.parent;

        if let Some(parent) = parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(node);

        self.extract_min()
    }

    /// Moves every entry of `other` into this heap.
    ///
    /// The two root lists are spliced and the smaller minimum kept; no
    /// consolidation happens until the next `extract_min`. Handles issued by
    /// `other` remain valid on `self`. `self`'s comparator is kept.
    ///
    /// # Time Complexity
    /// O(1) in the number of entries
    pub fn merge(&mut self, other: Self) {
        let FibonacciHeap {
            arena,
            min: other_min,
            len: other_len,
            ..
        } = other;
        let Some(other_min) = other_min else {
            return;
        };

        self.arena.absorb(arena);
        self.len += other_len;

        match self.min {
            None => self.min = Some(other_min),
            Some(min) => {
                RING.splice(&mut self.arena, Some(min), Some(other_min));
                if self.precedes(other_min, min) {
                    self.min = Some(other_min);
                }
            }
        }

        debug!("merged {} entries into heap, len is now {}", other_len, self.len);
        self.debug_verify();
    }

    /// Removes every entry. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.arena = Arena::new();
        self.min = None;
        self.len = 0;
    }

    /// Consumes the heap and returns its entries in extraction order.
    pub fn into_sorted_vec(self) -> Vec<(K, T)> {
        self.into_iter().collect()
    }

    /// Splices an isolated root into the root list, updating `min`.
    fn add_root(&mut self, node: NodeRef) {
        match self.min {
            None => self.min = Some(node),
            Some(min) => {
                RING.insert_before(&mut self.arena, min, node);
                if self.precedes(node, min) {
                    self.min = Some(node);
                }
            }
        }
    }

    /// Returns true if `a`'s key orders strictly before `b`'s.
    #[inline]
    fn precedes(&self, a: NodeRef, b: NodeRef) -> bool {
        self.compare.precedes(&self.arena[a].key, &self.arena[b].key)
    }

    #[inline]
    fn debug_verify(&self) {
        #[cfg(feature = "debug-invariants")]
        debug_assert_eq!(self.verify_structure(), Ok(()));
    }
}

impl<T, K, C: Compare<K> + Default> Default for FibonacciHeap<T, K, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, K: std::fmt::Debug, C> std::fmt::Debug for FibonacciHeap<T, K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.min.map(|min| &self.arena[min].key))
            .finish()
    }
}

impl<T, K, C: Compare<K>> Extend<(K, T)> for FibonacciHeap<T, K, C> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, item) in iter {
            self.insert(key, item);
        }
    }
}

impl<T, K, C: Compare<K> + Default> FromIterator<(K, T)> for FibonacciHeap<T, K, C> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

/// Consuming iterator that yields entries in extraction order.
///
/// Created by `FibonacciHeap::into_iter`.
pub struct IntoSorted<T, K, C> {
    heap: FibonacciHeap<T, K, C>,
}

impl<T, K, C: Compare<K>> Iterator for IntoSorted<T, K, C> {
    type Item = (K, T);

    fn next(&mut self) -> Option<(K, T)> {
        self.heap.extract_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T, K, C: Compare<K>> ExactSizeIterator for IntoSorted<T, K, C> {}

impl<T, K, C: Compare<K>> IntoIterator for FibonacciHeap<T, K, C> {
    type Item = (K, T);
    type IntoIter = IntoSorted<T, K, C>;

    fn into_iter(self) -> IntoSorted<T, K, C> {
        IntoSorted { heap: self }
    }
}

impl<T, K, C: Compare<K> + Default> Heap<T, K> for FibonacciHeap<T, K, C> {
    fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, key: K, item: T) {
        self.insert(key, item);
    }

    fn peek(&self) -> Option<(&K, &T)> {
        self.peek_min().ok()
    }

    fn pop(&mut self) -> Option<(K, T)> {
        self.extract_min().ok()
    }
}

impl<T, K, C: Compare<K> + Default> MergeableHeap<T, K> for FibonacciHeap<T, K, C> {
    fn merge(&mut self, other: Self) {
        FibonacciHeap::merge(self, other)
    }
}

impl<T, K, C: Compare<K> + Default> DecreaseKeyHeap<T, K> for FibonacciHeap<T, K, C> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, key: K, item: T) -> FibonacciHandle {
        self.insert(key, item)
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_key)
    }

    fn delete(&mut self, handle: &FibonacciHandle) -> Result<(K, T), HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}
