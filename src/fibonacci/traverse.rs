//! Read-only access to the forest: ring traversal, node inspection and search.

use smallvec::SmallVec;

use super::arena::{Arena, NodeRef};
use super::{FibonacciHandle, FibonacciHeap, RING};
use crate::traits::HeapError;

type RingIter<'a, T, K> = index_ring::Iter<'a, NodeRef, Arena<T, K>>;

impl<T, K, C> FibonacciHeap<T, K, C> {
    /// Iterates over the roots, starting at the minimum.
    ///
    /// # Time Complexity
    /// O(number of roots)
    pub fn roots(&self) -> Siblings<'_, T, K> {
        Siblings {
            inner: self.min.map(|min| RING.iter(&self.arena, min)),
        }
    }

    /// Iterates over the direct children of the entry behind `handle`.
    ///
    /// # Errors
    /// `HeapError::StaleHandle` if the entry is no longer in this heap.
    pub fn children(&self, handle: &FibonacciHandle) -> Result<Siblings<'_, T, K>, HeapError> {
        let node = self.arena.get(handle.node).ok_or(HeapError::StaleHandle)?;
        Ok(Siblings {
            inner: node.child.map(|child| RING.iter(&self.arena, child)),
        })
    }

    /// Returns true if `handle` refers to an entry of this heap.
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.arena.contains(handle.node)
    }

    /// Returns the key and item behind `handle`.
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&K, &T)> {
        self.arena
            .get(handle.node)
            .map(|node| (&node.key, &node.item))
    }

    /// Returns the item behind `handle` mutably.
    ///
    /// Keys are not exposed mutably; use `decrease_key` to move an entry.
    pub fn get_item_mut(&mut self, handle: &FibonacciHandle) -> Option<&mut T> {
        self.arena.get_mut(handle.node).map(|node| &mut node.item)
    }

    /// Number of children of the entry behind `handle`.
    pub fn degree(&self, handle: &FibonacciHandle) -> Result<usize, HeapError> {
        self.arena
            .get(handle.node)
            .map(|node| usize::from(node.degree))
            .ok_or(HeapError::StaleHandle)
    }

    /// Whether the entry behind `handle` has lost a child since it was last
    /// linked under a parent. Roots are never marked.
    pub fn is_marked(&self, handle: &FibonacciHandle) -> Result<bool, HeapError> {
        self.arena
            .get(handle.node)
            .map(|node| node.marked)
            .ok_or(HeapError::StaleHandle)
    }

    /// Parent of the entry behind `handle`, or `None` for a root.
    pub fn parent(&self, handle: &FibonacciHandle) -> Result<Option<FibonacciHandle>, HeapError> {
        self.arena
            .get(handle.node)
            .map(|node| node.parent.map(|node| FibonacciHandle { node }))
            .ok_or(HeapError::StaleHandle)
    }

    /// Iterates over every entry, depth-first from the roots.
    ///
    /// The order reflects the current forest, not key order.
    pub fn iter(&self) -> Iter<'_, T, K> {
        let mut stack = SmallVec::new();
        if let Some(min) = self.min {
            stack.push(RING.iter(&self.arena, min));
        }
        Iter {
            arena: &self.arena,
            stack,
            remaining: self.len,
        }
    }

    /// Returns the first entry, in `iter` order, matching `predicate`.
    ///
    /// This walks the whole forest in the worst case: O(n). It is meant for
    /// diagnostics, not as a lookup structure.
    pub fn search<P>(&self, mut predicate: P) -> Option<FibonacciHandle>
    where
        P: FnMut(&K, &T) -> bool,
    {
        self.iter()
            .find(|(_, key, item)| predicate(key, item))
            .map(|(handle, _, _)| handle)
    }
}

/// Iterator over one sibling ring (the roots, or the children of a node).
///
/// Created by [`FibonacciHeap::roots`] and [`FibonacciHeap::children`].
pub struct Siblings<'a, T, K> {
    inner: Option<RingIter<'a, T, K>>,
}

impl<T, K> Clone for Siblings<'_, T, K> {
    fn clone(&self) -> Self {
        Siblings {
            inner: self.inner.clone(),
        }
    }
}

impl<T, K> Iterator for Siblings<'_, T, K> {
    type Item = FibonacciHandle;

    fn next(&mut self) -> Option<FibonacciHandle> {
        let node = self.inner.as_mut()?.next()?;
        Some(FibonacciHandle { node })
    }
}

impl<T, K> std::iter::FusedIterator for Siblings<'_, T, K> {}

/// Depth-first iterator over every entry. Created by [`FibonacciHeap::iter`].
pub struct Iter<'a, T, K> {
    arena: &'a Arena<T, K>,
    stack: SmallVec<[RingIter<'a, T, K>; 8]>,
    remaining: usize,
}

impl<'a, T, K> Iterator for Iter<'a, T, K> {
    type Item = (FibonacciHandle, &'a K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        loop {
            let Some(node) = self.stack.last_mut()?.next() else {
                self.stack.pop();
                continue;
            };

            let entry = &arena[node];
            if let Some(child) = entry.child {
                self.stack.push(RING.iter(arena, child));
            }
            self.remaining = self.remaining.saturating_sub(1);
            return Some((FibonacciHandle { node }, &entry.key, &entry.item));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, K> ExactSizeIterator for Iter<'_, T, K> {}

impl<'a, T, K, C> IntoIterator for &'a FibonacciHeap<T, K, C> {
    type Item = (FibonacciHandle, &'a K, &'a T);
    type IntoIter = Iter<'a, T, K>;

    fn into_iter(self) -> Iter<'a, T, K> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::fibonacci::FibonacciHeap;
    use crate::traits::HeapError;

    #[test]
    fn test_roots_start_at_min() {
        let mut heap = FibonacciHeap::new();
        heap.insert(4, 'd');
        let min = heap.insert(1, 'a');
        heap.insert(9, 'z');

        let roots: Vec<_> = heap.roots().collect();
        assert_eq!(roots.len(), 3);
        assert_eq!(roots[0], min);
    }

    #[test]
    fn test_empty_heap_has_no_roots() {
        let heap: FibonacciHeap<(), i32> = FibonacciHeap::new();
        assert_eq!(heap.roots().count(), 0);
        assert_eq!(heap.iter().count(), 0);
        assert_eq!(heap.search(|_, _| true), None);
    }

    #[test]
    fn test_children_of_linked_tree() {
        let mut heap = FibonacciHeap::new();
        let h: Vec<_> = (0..5).map(|key| heap.insert(key, ())).collect();
        heap.extract_min().unwrap();
        // 1 -> {2, 3 -> {4}}

        let children: Vec<_> = heap.children(&h[1]).unwrap().collect();
        assert_eq!(children, vec![h[2], h[3]]);
        assert_eq!(heap.children(&h[2]).unwrap().count(), 0);
        assert!(matches!(heap.children(&h[0]), Err(HeapError::StaleHandle)));
    }

    #[test]
    fn test_iter_visits_every_entry_once() {
        let mut heap = FibonacciHeap::new();
        for key in 0..20 {
            heap.insert(key, key * 10);
        }
        heap.extract_min().unwrap();

        let iter = heap.iter();
        assert_eq!(iter.len(), 19);
        let mut keys: Vec<_> = iter.map(|(_, key, _)| *key).collect();
        keys.sort_unstable();
        assert_eq!(keys, (1..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_iter_is_preorder() {
        let mut heap = FibonacciHeap::new();
        for key in 0..5 {
            heap.insert(key, ());
        }
        heap.extract_min().unwrap();

        let keys: Vec<_> = (&heap).into_iter().map(|(_, key, _)| *key).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_finds_nested_entry() {
        let mut heap = FibonacciHeap::new();
        for key in 0..9 {
            heap.insert(key, format!("n{key}"));
        }
        heap.extract_min().unwrap();

        let found = heap.search(|_, item| item == "n8").unwrap();
        assert_eq!(heap.get(&found), Some((&8, &"n8".to_string())));
        assert_eq!(heap.search(|key, _| *key == 0), None);
    }

    #[test]
    fn test_inspection_after_removal_is_stale() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(1, "one");
        heap.extract_min().unwrap();

        assert!(!heap.contains(&h));
        assert_eq!(heap.get(&h), None);
        assert_eq!(heap.degree(&h), Err(HeapError::StaleHandle));
        assert_eq!(heap.is_marked(&h), Err(HeapError::StaleHandle));
        assert_eq!(heap.parent(&h), Err(HeapError::StaleHandle));
    }

    #[test]
    fn test_get_item_mut_leaves_order_alone() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(3, vec![1]);
        heap.insert(5, vec![]);

        heap.get_item_mut(&h).unwrap().push(2);
        assert_eq!(heap.peek_min(), Ok((&3, &vec![1, 2])));
    }
}
