//! Post-extraction restructuring: promote children and link equal-degree trees.

use log::trace;
use smallvec::{smallvec, SmallVec};

use super::arena::NodeRef;
use super::{FibonacciHeap, RING};
use crate::compare::Compare;
use crate::degree::{checked_increment, max_degree};

impl<T, K, C: Compare<K>> FibonacciHeap<T, K, C> {
    /// Moves every child of `node` into the root list, clearing their parent
    /// links and marks.
    pub(super) fn promote_children(&mut self, node: NodeRef) {
        let Some(first) = self.arena[node].child.take() else {
            return;
        };

        let mut current = first;
        loop {
            let child = &mut self.arena[current];
            child.parent = None;
            child.marked = false;
            current = child.siblings.next();
            if current == first {
                break;
            }
        }

        self.arena[node].degree = 0;
        RING.splice(&mut self.arena, Some(node), Some(first));
    }

    /// Rebuilds the root list starting from `start` so that no two roots share
    /// a degree, and recomputes `min`.
    ///
    /// Roots are visited in ring order from `start`. When a root meets an
    /// occupied degree bucket the root with the larger key becomes the child;
    /// on equal keys the bucket occupant stays parent.
    pub(super) fn consolidate(&mut self, start: NodeRef) {
        let roots: SmallVec<[NodeRef; 64]> = RING.iter(&self.arena, start).collect();
        let mut buckets: SmallVec<[Option<NodeRef>; 64]> = smallvec![None; max_degree(self.len) + 1];

        // the ring is rebuilt from the buckets, so old root links can go
        for &root in &roots {
            RING.isolate(&mut self.arena, root);
        }

        for &root in &roots {
            let mut tree = root;
            let mut degree = usize::from(self.arena[tree].degree);

            loop {
                if degree >= buckets.len() {
                    buckets.resize(degree + 1, None);
                }
                let Some(occupant) = buckets[degree].take() else {
                    break;
                };

                let (parent, child) = if self.precedes(tree, occupant) {
                    (tree, occupant)
                } else {
                    (occupant, tree)
                };
                self.link(child, parent);

                tree = parent;
                degree += 1;
            }

            buckets[degree] = Some(tree);
        }

        self.min = None;
        for root in buckets.into_iter().flatten() {
            self.add_root(root);
        }

        trace!(
            "consolidated {} roots into {} over {} entries",
            roots.len(),
            self.roots().count(),
            self.len
        );
    }

    /// Makes the isolated root `child` a child of `parent`.
    fn link(&mut self, child: NodeRef, parent: NodeRef) {
        let node = &mut self.arena[child];
        node.parent = Some(parent);
        node.marked = false;

        let first_child = self.arena[parent].child;
        match first_child {
            Some(first) => RING.insert_before(&mut self.arena, first, child),
            None => self.arena[parent].child = Some(child),
        }

        let parent = &mut self.arena[parent];
        parent.degree = checked_increment(parent.degree);
    }
}
