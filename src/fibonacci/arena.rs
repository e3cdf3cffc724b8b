//! Node storage for the Fibonacci heap.
//!
//! Nodes live in `slotmap` arenas. A slot's version acts as the generation
//! counter: once a node is freed, every reference to it stops resolving, even
//! if the slot is reused.
//!
//! A heap owns one *home* segment where new nodes are allocated. `merge`
//! absorbs the donor's segments wholesale instead of moving nodes, so merging
//! is independent of the donor's size and references into the donor stay
//! valid. Foreign segments are dropped once their last node is freed.

use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use index_ring::{RingLink, RingStorage};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::degree::Degree;

new_key_type! {
    /// Slot of a node inside one segment
    pub(crate) struct SlotKey;
}

/// Identifier of one arena segment, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SegmentId(u64);

impl SegmentId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SegmentId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Generation-checked reference to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef {
    segment: SegmentId,
    slot: SlotKey,
}

pub(crate) struct Node<T, K> {
    pub(crate) key: K,
    pub(crate) item: T,
    /// Parent node (None if root)
    pub(crate) parent: Option<NodeRef>,
    /// Any member of the child ring (None if leaf)
    pub(crate) child: Option<NodeRef>,
    /// Neighbours in the root ring or in the parent's child ring
    pub(crate) siblings: RingLink<NodeRef>,
    pub(crate) degree: Degree,
    /// Set when this non-root node has lost a child since it was last linked
    pub(crate) marked: bool,
}

type Segment<T, K> = SlotMap<SlotKey, Node<T, K>>;

pub(crate) struct Arena<T, K> {
    home: SegmentId,
    segments: FxHashMap<SegmentId, Segment<T, K>>,
}

impl<T, K> Arena<T, K> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let home = SegmentId::fresh();
        let mut segments = FxHashMap::default();
        segments.insert(home, SlotMap::with_capacity_and_key(capacity));
        Arena { home, segments }
    }

    /// Allocates an isolated, unmarked node of degree 0.
    pub(crate) fn alloc(&mut self, key: K, item: T) -> NodeRef {
        let segment = self.home;
        let slot = self
            .segments
            .entry(segment)
            .or_default()
            .insert_with_key(|slot| Node {
                key,
                item,
                parent: None,
                child: None,
                siblings: RingLink::isolated(NodeRef { segment, slot }),
                degree: 0,
                marked: false,
            });
        NodeRef { segment, slot }
    }

    pub(crate) fn get(&self, node: NodeRef) -> Option<&Node<T, K>> {
        self.segments.get(&node.segment)?.get(node.slot)
    }

    pub(crate) fn get_mut(&mut self, node: NodeRef) -> Option<&mut Node<T, K>> {
        self.segments.get_mut(&node.segment)?.get_mut(node.slot)
    }

    pub(crate) fn contains(&self, node: NodeRef) -> bool {
        self.get(node).is_some()
    }

    /// Removes a node, invalidating every reference to it.
    ///
    /// The caller must already have unlinked it from the structure.
    pub(crate) fn free(&mut self, node: NodeRef) -> Option<Node<T, K>> {
        let slots = self.segments.get_mut(&node.segment)?;
        let removed = slots.remove(node.slot)?;
        if slots.is_empty() && node.segment != self.home {
            self.segments.remove(&node.segment);
        }
        Some(removed)
    }

    /// Takes ownership of every node stored in `other`.
    ///
    /// Whichever side has more segments keeps its table; the other's
    /// non-empty segments are moved into it. Only home segments are ever
    /// empty, so dropping the donor's empty home keeps that true.
    pub(crate) fn absorb(&mut self, mut other: Self) {
        if other.segments.len() > self.segments.len() {
            std::mem::swap(&mut self.segments, &mut other.segments);
        }

        let home = self.home;
        self.segments.extend(
            other
                .segments
                .into_iter()
                .filter(|(id, slots)| !slots.is_empty() || *id == home),
        );

        if other.home != home
            && self
                .segments
                .get(&other.home)
                .is_some_and(SlotMap::is_empty)
        {
            self.segments.remove(&other.home);
        }
    }

    /// Total number of stored nodes.
    pub(crate) fn node_count(&self) -> usize {
        self.segments.values().map(SlotMap::len).sum()
    }

    #[cfg(test)]
    pub(crate) fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl<T, K> Index<NodeRef> for Arena<T, K> {
    type Output = Node<T, K>;

    fn index(&self, node: NodeRef) -> &Node<T, K> {
        &self.segments[&node.segment][node.slot]
    }
}

impl<T, K> IndexMut<NodeRef> for Arena<T, K> {
    fn index_mut(&mut self, node: NodeRef) -> &mut Node<T, K> {
        match self.segments.get_mut(&node.segment) {
            Some(slots) => &mut slots[node.slot],
            None => panic!("node {node:?} belongs to no segment of this arena"),
        }
    }
}

impl<T, K> RingStorage<NodeRef> for Arena<T, K> {
    fn link(&self, id: NodeRef) -> &RingLink<NodeRef> {
        &self[id].siblings
    }

    fn link_mut(&mut self, id: NodeRef) -> &mut RingLink<NodeRef> {
        &mut self[id].siblings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_creates_isolated_root() {
        let mut arena: Arena<&str, i32> = Arena::new();
        let node = arena.alloc(7, "seven");

        let stored = &arena[node];
        assert_eq!(stored.key, 7);
        assert_eq!(stored.siblings.next(), node);
        assert_eq!(stored.siblings.prev(), node);
        assert_eq!(stored.parent, None);
        assert_eq!(stored.degree, 0);
        assert!(!stored.marked);
    }

    #[test]
    fn test_free_invalidates_reference_even_after_slot_reuse() {
        let mut arena: Arena<(), i32> = Arena::new();
        let first = arena.alloc(1, ());
        assert!(arena.free(first).is_some());

        let second = arena.alloc(2, ());
        assert!(!arena.contains(first));
        assert!(arena.contains(second));
        assert!(arena.free(first).is_none());
    }

    #[test]
    fn test_absorb_keeps_foreign_references_valid() {
        let mut left: Arena<(), i32> = Arena::new();
        let mut right: Arena<(), i32> = Arena::new();
        let a = left.alloc(1, ());
        let b = right.alloc(2, ());

        left.absorb(right);

        assert_eq!(left.segment_count(), 2);
        assert_eq!(left[a].key, 1);
        assert_eq!(left[b].key, 2);
        assert_eq!(left.node_count(), 2);
    }

    #[test]
    fn test_emptied_foreign_segment_is_dropped() {
        let mut left: Arena<(), i32> = Arena::new();
        let mut right: Arena<(), i32> = Arena::new();
        let b = right.alloc(2, ());

        left.absorb(right);
        assert!(left.free(b).is_some());

        assert_eq!(left.segment_count(), 1);
        // the home segment survives even when empty
        let c = left.alloc(3, ());
        assert!(left.contains(c));
    }

    #[test]
    fn test_absorb_larger_table_keeps_home() {
        let mut left: Arena<(), i32> = Arena::new();
        let mut big: Arena<(), i32> = Arena::new();
        for _ in 0..3 {
            let mut other: Arena<(), i32> = Arena::new();
            other.alloc(0, ());
            big.absorb(other);
        }

        left.absorb(big);
        assert_eq!(left.segment_count(), 4);

        let fresh = left.alloc(9, ());
        assert_eq!(left[fresh].key, 9);
    }
}
