//! Structural invariant checker.
//!
//! Walks the whole forest and reports the first violated invariant. Every
//! ring walk is bounded by the number of stored nodes, so a corrupted ring
//! is reported instead of looping forever.

use thiserror::Error;

use super::arena::{Arena, Node, NodeRef};
use super::{FibonacciHandle, FibonacciHeap};
use crate::compare::Compare;

/// An invariant violated by the heap's internal structure.
///
/// None of these can be produced through the public API; they exist so tests
/// can assert the structure after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("heap reports {len} entries but has_min is {has_min}")]
    MinLenMismatch { len: usize, has_min: bool },

    #[error("heap reports {len} entries but {reachable} are reachable from the roots")]
    LenMismatch { len: usize, reachable: usize },

    #[error("arena stores {stored} nodes but {reachable} are reachable from the roots")]
    Leak { stored: usize, reachable: usize },

    #[error("a link points at a node that is no longer stored")]
    DanglingLink,

    #[error("sibling ring around {node:?} is inconsistent")]
    BrokenRing { node: FibonacciHandle },

    #[error("root {node:?} has a parent")]
    RootHasParent { node: FibonacciHandle },

    #[error("root {node:?} is marked")]
    MarkedRoot { node: FibonacciHandle },

    #[error("root {node:?} orders before the recorded minimum")]
    MinNotMinimal { node: FibonacciHandle },

    #[error("child {node:?} does not point back at its parent")]
    ParentMismatch { node: FibonacciHandle },

    #[error("child {node:?} orders before its parent")]
    HeapOrder { node: FibonacciHandle },

    #[error("{node:?} records degree {recorded} but has {actual} children")]
    DegreeMismatch {
        node: FibonacciHandle,
        recorded: usize,
        actual: usize,
    },
}

impl<T, K, C: Compare<K>> FibonacciHeap<T, K, C> {
    /// Checks every structural invariant of the heap.
    ///
    /// - `min` is set exactly when the heap is non-empty, and no root orders
    ///   before it
    /// - roots have no parent and are unmarked
    /// - every child points back at its parent and does not order before it
    /// - each node's degree equals the length of its child ring
    /// - every ring is a consistent circular doubly linked list
    /// - `len` equals both the reachable and the stored node count
    ///
    /// # Time Complexity
    /// O(n)
    pub fn verify_structure(&self) -> Result<(), StructureError> {
        let Some(min) = self.min else {
            if self.len != 0 {
                return Err(StructureError::MinLenMismatch {
                    len: self.len,
                    has_min: false,
                });
            }
            return match self.arena.node_count() {
                0 => Ok(()),
                stored => Err(StructureError::Leak { stored, reachable: 0 }),
            };
        };
        if self.len == 0 {
            return Err(StructureError::MinLenMismatch {
                len: 0,
                has_min: true,
            });
        }

        let stored = self.arena.node_count();
        let min_key = &lookup(&self.arena, min)?.key;
        let mut reachable = 0usize;
        let mut pending: Vec<NodeRef> = Vec::new();

        for root in walk_ring(&self.arena, min, stored)? {
            let entry = lookup(&self.arena, root)?;
            let handle = FibonacciHandle { node: root };
            if entry.parent.is_some() {
                return Err(StructureError::RootHasParent { node: handle });
            }
            if entry.marked {
                return Err(StructureError::MarkedRoot { node: handle });
            }
            if self.compare.precedes(&entry.key, min_key) {
                return Err(StructureError::MinNotMinimal { node: handle });
            }
            pending.push(root);
        }

        while let Some(parent) = pending.pop() {
            reachable += 1;
            if reachable > stored {
                return Err(StructureError::Leak { stored, reachable });
            }

            let entry = lookup(&self.arena, parent)?;
            let children = match entry.child {
                Some(first) => walk_ring(&self.arena, first, stored)?,
                None => Vec::new(),
            };
            if children.len() != usize::from(entry.degree) {
                return Err(StructureError::DegreeMismatch {
                    node: FibonacciHandle { node: parent },
                    recorded: usize::from(entry.degree),
                    actual: children.len(),
                });
            }

            for child in children {
                let child_entry = lookup(&self.arena, child)?;
                let handle = FibonacciHandle { node: child };
                if child_entry.parent != Some(parent) {
                    return Err(StructureError::ParentMismatch { node: handle });
                }
                if self.compare.precedes(&child_entry.key, &entry.key) {
                    return Err(StructureError::HeapOrder { node: handle });
                }
                pending.push(child);
            }
        }

        if reachable != self.len {
            return Err(StructureError::LenMismatch {
                len: self.len,
                reachable,
            });
        }
        if reachable != stored {
            return Err(StructureError::Leak { stored, reachable });
        }
        Ok(())
    }
}

fn lookup<T, K>(arena: &Arena<T, K>, node: NodeRef) -> Result<&Node<T, K>, StructureError> {
    arena.get(node).ok_or(StructureError::DanglingLink)
}

/// Collects the ring through `start`, checking that each element's successor
/// points back at it. Fails if the ring does not close within `limit` steps.
fn walk_ring<T, K>(
    arena: &Arena<T, K>,
    start: NodeRef,
    limit: usize,
) -> Result<Vec<NodeRef>, StructureError> {
    let mut members = Vec::new();
    let mut current = start;

    loop {
        let entry = lookup(arena, current)?;
        let next = entry.siblings.next();
        if lookup(arena, next)?.siblings.prev() != current {
            return Err(StructureError::BrokenRing {
                node: FibonacciHandle { node: current },
            });
        }

        members.push(current);
        if members.len() > limit {
            return Err(StructureError::BrokenRing {
                node: FibonacciHandle { node: start },
            });
        }

        current = next;
        if current == start {
            return Ok(members);
        }
    }
}
