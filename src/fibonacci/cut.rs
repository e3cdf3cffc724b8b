//! Post-decrease-key restructuring: cut and cascading cut.

use log::trace;

use super::arena::NodeRef;
use super::{FibonacciHeap, RING};
use crate::compare::Compare;
use crate::degree::saturating_decrement;

impl<T, K, C: Compare<K>> FibonacciHeap<T, K, C> {
    /// Detaches `node` from `parent` and makes it an unmarked root.
    pub(super) fn cut(&mut self, node: NodeRef, parent: NodeRef) {
        self.splice_out_child(node, parent);

        let cut = &mut self.arena[node];
        cut.parent = None;
        cut.marked = false;

        self.add_root(node);
    }

    /// Walks up from `node`, cutting marked ancestors until it reaches a root
    /// or an unmarked node, which it marks.
    pub(super) fn cascading_cut(&mut self, mut node: NodeRef) {
        let mut cuts = 0usize;

        loop {
            let Some(parent) = self.arena[node].parent else {
                break;
            };
            if !self.arena[node].marked {
                self.arena[node].marked = true;
                break;
            }
            self.cut(node, parent);
            cuts += 1;
            node = parent;
        }

        if cuts > 0 {
            trace!("cascading cut promoted {} marked ancestors", cuts);
        }
    }

    /// Removes `node` from the child ring of `parent`, repointing
    /// `parent.child` at a remaining sibling and decrementing its degree.
    /// `node` is left isolated.
    fn splice_out_child(&mut self, node: NodeRef, parent: NodeRef) {
        let rest = RING.remove(&mut self.arena, node);

        let parent = &mut self.arena[parent];
        if parent.child == Some(node) {
            parent.child = rest;
        }
        parent.degree = saturating_decrement(parent.degree);
    }
}
