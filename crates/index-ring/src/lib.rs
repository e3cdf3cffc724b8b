//! Circular doubly-linked lists threaded through an index-addressed arena.
//!
//! Each element embeds a [`RingLink`] holding the indices of its neighbours.
//! The arena that owns the elements implements [`RingStorage`] so that
//! [`RingOps`] can reach those links by index. No pointers are involved, so
//! the lists are safe to build over `Vec`, `slotmap` or any other container
//! with stable keys.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single element is its own `next` and `prev`
//! - There is no head or tail - any element can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around, so it stops when it returns to its start
//!
//! This is the shape Fibonacci heaps need: the root list and every child list
//! are rings, and a node moves between them with O(1) splices.
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingLink, RingOps, RingStorage};
//!
//! struct Links(Vec<RingLink<usize>>);
//!
//! impl RingStorage<usize> for Links {
//!     fn link(&self, id: usize) -> &RingLink<usize> {
//!         &self.0[id]
//!     }
//!     fn link_mut(&mut self, id: usize) -> &mut RingLink<usize> {
//!         &mut self.0[id]
//!     }
//! }
//!
//! let mut links = Links((0..3).map(RingLink::isolated).collect());
//! let ops = RingOps::new();
//!
//! ops.insert_after(&mut links, 0, 1);
//! ops.insert_after(&mut links, 1, 2);
//! assert_eq!(ops.iter(&links, 0).collect::<Vec<_>>(), vec![0, 1, 2]);
//!
//! assert_eq!(ops.remove(&mut links, 1), Some(2));
//! assert_eq!(ops.count(&links, 0), 2);
//! assert!(ops.is_isolated(&links, 1));
//! ```

#![no_std]

use core::fmt;

// =============================================================================
// RingLink
// =============================================================================

/// Neighbour indices of one ring element.
///
/// There is no "unlinked" state: an element that belongs to no other ring is
/// a ring of one, with `next == prev == self`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RingLink<I> {
    next: I,
    prev: I,
}

impl<I: Copy> RingLink<I> {
    /// Creates the link of an element that forms a ring on its own.
    #[inline]
    pub const fn isolated(id: I) -> Self {
        RingLink { next: id, prev: id }
    }

    /// Index of the following element.
    #[inline]
    pub fn next(&self) -> I {
        self.next
    }

    /// Index of the preceding element.
    #[inline]
    pub fn prev(&self) -> I {
        self.prev
    }

    #[inline]
    fn set_next(&mut self, next: I) {
        self.next = next;
    }

    #[inline]
    fn set_prev(&mut self, prev: I) {
        self.prev = prev;
    }
}

impl<I: fmt::Debug> fmt::Debug for RingLink<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingLink")
            .field("prev", &self.prev)
            .field("next", &self.next)
            .finish()
    }
}

// =============================================================================
// RingStorage
// =============================================================================

/// Access to the [`RingLink`] embedded in each element of an arena.
///
/// Implementations may panic when handed an index they do not hold; the ring
/// operations only ever follow indices that were stored in links.
pub trait RingStorage<I> {
    /// Returns the link of element `id`.
    fn link(&self, id: I) -> &RingLink<I>;

    /// Returns the link of element `id` mutably.
    fn link_mut(&mut self, id: I) -> &mut RingLink<I>;
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations on circular doubly-linked lists stored in a [`RingStorage`].
///
/// All operations are O(1) except [`count`](RingOps::count) and iteration.
#[derive(Clone, Copy, Default, Debug)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Index of the element after `id`.
    #[inline]
    pub fn next<I: Copy, S: RingStorage<I> + ?Sized>(&self, storage: &S, id: I) -> I {
        storage.link(id).next()
    }

    /// Index of the element before `id`.
    #[inline]
    pub fn prev<I: Copy, S: RingStorage<I> + ?Sized>(&self, storage: &S, id: I) -> I {
        storage.link(id).prev()
    }

    /// Returns true if `id` is a ring of one.
    #[inline]
    pub fn is_isolated<I: Copy + Eq, S: RingStorage<I> + ?Sized>(&self, storage: &S, id: I) -> bool {
        storage.link(id).next() == id
    }

    /// Makes `id` a ring of one.
    ///
    /// Former neighbours are not touched: only use this when the ring `id`
    /// belonged to is being rebuilt as a whole.
    #[inline]
    pub fn isolate<I: Copy, S: RingStorage<I> + ?Sized>(&self, storage: &mut S, id: I) {
        *storage.link_mut(id) = RingLink::isolated(id);
    }

    /// Inserts the isolated element `new` after `at`.
    #[inline]
    pub fn insert_after<I, S>(&self, storage: &mut S, at: I, new: I)
    where
        I: Copy + Eq,
        S: RingStorage<I> + ?Sized,
    {
        debug_assert!(self.is_isolated(storage, new), "new is already in a ring");

        let next = storage.link(at).next();

        storage.link_mut(at).set_next(new);
        storage.link_mut(new).set_prev(at);
        storage.link_mut(new).set_next(next);
        storage.link_mut(next).set_prev(new);
    }

    /// Inserts the isolated element `new` before `at`.
    #[inline]
    pub fn insert_before<I, S>(&self, storage: &mut S, at: I, new: I)
    where
        I: Copy + Eq,
        S: RingStorage<I> + ?Sized,
    {
        debug_assert!(self.is_isolated(storage, new), "new is already in a ring");

        let prev = storage.link(at).prev();

        storage.link_mut(at).set_prev(new);
        storage.link_mut(new).set_next(at);
        storage.link_mut(new).set_prev(prev);
        storage.link_mut(prev).set_next(new);
    }

    /// Removes `id` from its ring, leaving it isolated.
    ///
    /// Returns the element that followed `id`, or `None` if `id` was alone
    /// (the ring is now empty).
    #[inline]
    pub fn remove<I, S>(&self, storage: &mut S, id: I) -> Option<I>
    where
        I: Copy + Eq,
        S: RingStorage<I> + ?Sized,
    {
        let RingLink { next, prev } = *storage.link(id);

        if next == id {
            return None;
        }

        storage.link_mut(prev).set_next(next);
        storage.link_mut(next).set_prev(prev);
        self.isolate(storage, id);
        Some(next)
    }

    /// Joins the rings containing `a` and `b` into one.
    ///
    /// Returns an entry point into the merged ring, or `None` if both were
    /// empty. If either is `None`, returns the other. `a` and `b` must belong
    /// to different rings.
    ///
    /// ```text
    /// before:  a_prev <-> a <-> ...      b_prev <-> b <-> ...
    /// after:   a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
    /// ```
    #[inline]
    pub fn splice<I, S>(&self, storage: &mut S, a: Option<I>, b: Option<I>) -> Option<I>
    where
        I: Copy + Eq,
        S: RingStorage<I> + ?Sized,
    {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                let a_prev = storage.link(a).prev();
                let b_prev = storage.link(b).prev();

                storage.link_mut(a_prev).set_next(b);
                storage.link_mut(b).set_prev(a_prev);

                storage.link_mut(b_prev).set_next(a);
                storage.link_mut(a).set_prev(b_prev);

                Some(a)
            }
        }
    }

    /// Counts the elements of the ring containing `start`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<I, S>(&self, storage: &S, start: I) -> usize
    where
        I: Copy + Eq,
        S: RingStorage<I> + ?Sized,
    {
        self.iter(storage, start).count()
    }

    /// Iterates over the ring once, starting at `start`.
    ///
    /// The iterator borrows the storage, so the ring cannot change underneath
    /// it. Clone the iterator to walk the same ring again.
    pub fn iter<'a, I, S>(&self, storage: &'a S, start: I) -> Iter<'a, I, S>
    where
        I: Copy + Eq,
        S: RingStorage<I> + ?Sized,
    {
        Iter {
            storage,
            start,
            next: Some(start),
        }
    }
}

// =============================================================================
// Iter
// =============================================================================

/// Iterator over one full turn of a ring. Created by [`RingOps::iter`].
pub struct Iter<'a, I, S: ?Sized> {
    storage: &'a S,
    start: I,
    next: Option<I>,
}

impl<I: Copy, S: ?Sized> Clone for Iter<'_, I, S> {
    fn clone(&self) -> Self {
        Iter {
            storage: self.storage,
            start: self.start,
            next: self.next,
        }
    }
}

impl<I, S> Iterator for Iter<'_, I, S>
where
    I: Copy + Eq,
    S: RingStorage<I> + ?Sized,
{
    type Item = I;

    fn next(&mut self) -> Option<I> {
        let current = self.next?;
        let following = self.storage.link(current).next();
        self.next = (following != self.start).then_some(following);
        Some(current)
    }
}

impl<I, S> core::iter::FusedIterator for Iter<'_, I, S>
where
    I: Copy + Eq,
    S: RingStorage<I> + ?Sized,
{
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec;
    use std::vec::Vec;

    struct Links(Vec<RingLink<usize>>);

    impl Links {
        fn new(n: usize) -> Self {
            Links((0..n).map(RingLink::isolated).collect())
        }

        fn ring(&self, start: usize) -> Vec<usize> {
            RingOps::new().iter(self, start).collect()
        }
    }

    impl RingStorage<usize> for Links {
        fn link(&self, id: usize) -> &RingLink<usize> {
            &self.0[id]
        }

        fn link_mut(&mut self, id: usize) -> &mut RingLink<usize> {
            &mut self.0[id]
        }
    }

    #[test]
    fn test_isolated_link_points_to_itself() {
        let links = Links::new(1);
        let ops = RingOps::new();

        assert!(ops.is_isolated(&links, 0));
        assert_eq!(ops.next(&links, 0), 0);
        assert_eq!(ops.prev(&links, 0), 0);
        assert_eq!(links.ring(0), vec![0]);
    }

    #[test]
    fn test_insert_after() {
        let mut links = Links::new(2);
        let ops = RingOps::new();

        ops.insert_after(&mut links, 0, 1);

        assert_eq!(ops.next(&links, 0), 1);
        assert_eq!(ops.next(&links, 1), 0);
        assert_eq!(ops.prev(&links, 0), 1);
        assert_eq!(ops.prev(&links, 1), 0);
    }

    #[test]
    fn test_insert_before_appends_to_the_tail() {
        let mut links = Links::new(3);
        let ops = RingOps::new();

        ops.insert_before(&mut links, 0, 1);
        ops.insert_before(&mut links, 0, 2);

        assert_eq!(links.ring(0), vec![0, 1, 2]);
        assert_eq!(ops.prev(&links, 0), 2);
    }

    #[test]
    fn test_remove_single() {
        let mut links = Links::new(1);
        let ops = RingOps::new();

        assert_eq!(ops.remove(&mut links, 0), None);
        assert!(ops.is_isolated(&links, 0));
    }

    #[test]
    fn test_remove_from_two() {
        let mut links = Links::new(2);
        let ops = RingOps::new();
        ops.insert_after(&mut links, 0, 1);

        assert_eq!(ops.remove(&mut links, 0), Some(1));
        assert!(ops.is_isolated(&links, 0));
        assert!(ops.is_isolated(&links, 1));
    }

    #[test]
    fn test_remove_middle() {
        let mut links = Links::new(3);
        let ops = RingOps::new();
        ops.insert_after(&mut links, 0, 1);
        ops.insert_after(&mut links, 1, 2);

        assert_eq!(ops.remove(&mut links, 1), Some(2));
        assert_eq!(links.ring(0), vec![0, 2]);
        assert_eq!(ops.prev(&links, 0), 2);
    }

    #[test]
    fn test_splice_with_empty_sides() {
        let mut links = Links::new(1);
        let ops = RingOps::new();

        assert_eq!(ops.splice(&mut links, None, None), None);
        assert_eq!(ops.splice(&mut links, Some(0), None), Some(0));
        assert_eq!(ops.splice(&mut links, None, Some(0)), Some(0));
        assert!(ops.is_isolated(&links, 0));
    }

    #[test]
    fn test_splice_two_pairs() {
        let mut links = Links::new(4);
        let ops = RingOps::new();
        ops.insert_after(&mut links, 0, 1);
        ops.insert_after(&mut links, 2, 3);

        assert_eq!(ops.splice(&mut links, Some(0), Some(2)), Some(0));

        // b's ring lands just before a
        assert_eq!(links.ring(0), vec![0, 1, 2, 3]);
        assert_eq!(ops.count(&links, 3), 4);
    }

    #[test]
    fn test_isolate_discards_old_neighbours() {
        let mut links = Links::new(3);
        let ops = RingOps::new();
        ops.insert_after(&mut links, 0, 1);
        ops.insert_after(&mut links, 1, 2);

        for id in 0..3 {
            ops.isolate(&mut links, id);
        }
        ops.insert_after(&mut links, 2, 0);

        assert_eq!(links.ring(2), vec![2, 0]);
        assert!(ops.is_isolated(&links, 1));
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut links = Links::new(5);
        let ops = RingOps::new();
        for i in 1..5 {
            ops.insert_after(&mut links, i - 1, i);
        }

        let iter = ops.iter(&links, 2);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();

        assert_eq!(first, vec![2, 3, 4, 0, 1]);
        assert_eq!(first, second);
    }
}
