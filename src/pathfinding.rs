//! Dijkstra's and A* pathfinding driven by `decrease_key`
//!
//! Shortest-path relaxation is the workload Fibonacci heaps were designed
//! for: every improvement to a tentative distance is one O(1) amortized
//! `decrease_key` on the open-set entry instead of a duplicate push.
//!
//! # Design
//!
//! Only a lightweight index is stored in the heap. A fast hash map (FxHash)
//! maps node states to their index, and a dense table holds per-node search
//! state: best cost so far, the open-set handle and the predecessor.
//!
//! Dijkstra is A* with h(n) = 0, so both run the same loop. The node type
//! carries its own goal context and implements `is_goal()`.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_queue::pathfinding::{SearchNode, dijkstra};
//! use fibonacci_queue::fibonacci::FibonacciHeap;
//!
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, ..self.clone() }, 1),
//!             (GridPos { x: self.x - 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y + 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y - 1, ..self.clone() }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//!
//! let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

use log::debug;
use rustc_hash::FxHashMap;

use crate::traits::DecreaseKeyHeap;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// `Default` is the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate its successors and to
/// recognise a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// Edge weight type
    type Cost: Cost;

    /// Returns every neighbour along with the cost of the edge to it.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Nodes that can estimate their remaining cost for A* search.
pub trait AStarNode: SearchNode {
    /// Estimated cost from this node to the nearest goal.
    ///
    /// Must never overestimate the true cost for A* to return optimal paths.
    fn heuristic(&self) -> Self::Cost;
}

/// Heap key of an open-set entry. Orders by f-score only.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// g + h (h = 0 for Dijkstra)
    pub f_score: C,
    /// Cost from the start
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Index of a discovered node; this is what the heap stores as its item.
pub type NodeIndex = usize;

struct NodeEntry<N: SearchNode, H> {
    node: N,
    g_score: N::Cost,
    /// Open-set handle, cleared once the node is settled
    handle: Option<H>,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Limits applied to a search. `None` means unbounded.
#[derive(Clone, Copy)]
struct Limits<C> {
    max_cost: Option<C>,
    max_nodes: Option<usize>,
}

impl<C> Limits<C> {
    fn none() -> Self {
        Limits {
            max_cost: None,
            max_nodes: None,
        }
    }
}

/// Open set plus per-node bookkeeping for one search.
struct Search<N, H, F>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    heap: H,
    entries: Vec<NodeEntry<N, H::Handle>>,
    index_of: FxHashMap<N, NodeIndex>,
    heuristic: F,
    max_cost: Option<N::Cost>,
    settled: usize,
}

impl<N, H, F> Search<N, H, F>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    F: Fn(&N) -> N::Cost,
{
    fn new(start: &N, heuristic: F, max_cost: Option<N::Cost>) -> Self {
        let mut search = Search {
            heap: H::new(),
            entries: Vec::new(),
            index_of: FxHashMap::default(),
            heuristic,
            max_cost,
            settled: 0,
        };
        search.discover(start.clone(), N::Cost::default(), None);
        search
    }

    fn exceeds(&self, cost: N::Cost) -> bool {
        self.max_cost.is_some_and(|max| cost > max)
    }

    /// Adds a newly seen node to the open set.
    fn discover(&mut self, node: N, g_score: N::Cost, came_from: Option<NodeIndex>) {
        let index = self.entries.len();
        let priority = PriorityCost {
            f_score: g_score + (self.heuristic)(&node),
            g_score,
        };
        let handle = self.heap.push_with_handle(priority, index);
        self.index_of.insert(node.clone(), index);
        self.entries.push(NodeEntry {
            node,
            g_score,
            handle: Some(handle),
            came_from,
            closed: false,
        });
    }

    /// Pops the open node with the lowest f-score and closes it.
    fn settle_next(&mut self) -> Option<(NodeIndex, N::Cost)> {
        let (priority, index) = self.heap.pop()?;
        let entry = &mut self.entries[index];
        entry.closed = true;
        entry.handle = None;
        self.settled += 1;
        Some((index, priority.g_score))
    }

    /// Relaxes every edge leaving the settled node `from`.
    fn expand(&mut self, from: NodeIndex, g_score: N::Cost) {
        for (neighbour, edge_cost) in self.entries[from].node.successors() {
            let tentative = g_score + edge_cost;
            if self.exceeds(tentative) {
                continue;
            }

            let known = self.index_of.get(&neighbour).copied();
            let Some(index) = known else {
                self.discover(neighbour, tentative, Some(from));
                continue;
            };

            let entry = &mut self.entries[index];
            if entry.closed || tentative >= entry.g_score {
                continue;
            }
            entry.g_score = tentative;
            entry.came_from = Some(from);

            if let Some(handle) = &entry.handle {
                let priority = PriorityCost {
                    f_score: tentative + (self.heuristic)(&entry.node),
                    g_score: tentative,
                };
                // open entries are live and the key strictly improved
                if let Err(err) = self.heap.decrease_key(handle, priority) {
                    debug!("relaxation of node {} rejected: {}", index, err);
                }
            }
        }
    }

    fn path_to(&self, mut index: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[index].node.clone()];
        while let Some(previous) = self.entries[index].came_from {
            path.push(self.entries[previous].node.clone());
            index = previous;
        }
        path.reverse();
        path
    }

    /// Runs until a goal is settled or a limit is hit.
    fn find_goal(mut self, max_nodes: Option<usize>) -> Option<(Vec<N>, N::Cost)> {
        while let Some((index, g_score)) = self.settle_next() {
            if max_nodes.is_some_and(|max| self.settled > max) {
                debug!("search gave up after {} nodes", max_nodes.unwrap_or_default());
                return None;
            }
            if self.entries[index].node.is_goal() {
                debug!("search reached goal after settling {} nodes", self.settled);
                return Some((self.path_to(index), g_score));
            }
            self.expand(index, g_score);
        }

        debug!("search exhausted {} nodes without reaching a goal", self.settled);
        None
    }
}

fn run<N, H, F>(start: &N, heuristic: F, limits: Limits<N::Cost>) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    F: Fn(&N) -> N::Cost,
{
    Search::<N, H, F>::new(start, heuristic, limits.max_cost).find_goal(limits.max_nodes)
}

/// Runs Dijkstra's algorithm from `start` until a node's `is_goal()` holds.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` if no
/// goal is reachable.
///
/// # Example
/// ```rust
/// use fibonacci_queue::pathfinding::{SearchNode, dijkstra};
/// use fibonacci_queue::fibonacci::FibonacciHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct Node {
///     value: i32,
///     goal: i32,
/// }
///
/// impl SearchNode for Node {
///     type Cost = u32;
///
///     fn successors(&self) -> Vec<(Self, u32)> {
///         if self.value < 100 {
///             vec![(Node { value: self.value + 1, goal: self.goal }, 1)]
///         } else {
///             vec![]
///         }
///     }
///
///     fn is_goal(&self) -> bool {
///         self.value == self.goal
///     }
/// }
///
/// let (_, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&Node { value: 0, goal: 5 }).unwrap();
/// assert_eq!(cost, 5);
/// ```
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    run::<N, H, _>(start, |_| N::Cost::default(), Limits::none())
}

/// Runs A* search from `start`, guided by each node's `heuristic()`.
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    run::<N, H, _>(start, N::heuristic, Limits::none())
}

/// Returns every node reachable from `start` within `max_cost`, with its
/// shortest distance, in order of settlement (non-decreasing cost).
pub fn reachable_within<N, H>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut search = Search::<N, H, _>::new(start, |_: &N| N::Cost::default(), Some(max_cost));
    let mut reached = Vec::new();

    while let Some((index, g_score)) = search.settle_next() {
        if search.exceeds(g_score) {
            continue;
        }
        reached.push((search.entries[index].node.clone(), g_score));
        search.expand(index, g_score);
    }

    reached
}

/// Fluent configuration for bounded searches.
///
/// ```rust
/// use fibonacci_queue::pathfinding::{PathFinderBuilder, SearchNode};
/// use fibonacci_queue::fibonacci::FibonacciHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Step(u32);
///
/// impl SearchNode for Step {
///     type Cost = u32;
///     fn successors(&self) -> Vec<(Self, u32)> {
///         vec![(Step(self.0 + 1), 1)]
///     }
///     fn is_goal(&self) -> bool {
///         self.0 == 10
///     }
/// }
///
/// let result = PathFinderBuilder::new(Step(0))
///     .max_cost(3)
///     .dijkstra::<FibonacciHeap<_, _>>();
/// assert!(result.is_none());
/// ```
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    limits: Limits<N::Cost>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            limits: Limits::none(),
        }
    }

    /// Ignores paths costing more than `cost`.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Gives up after settling `count` nodes without reaching a goal.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        run::<N, H, _>(&self.start, |_| N::Cost::default(), self.limits)
    }

    /// Runs A* search with the configured limits.
    pub fn astar<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        run::<N, H, _>(&self.start, N::heuristic, self.limits)
    }
}
