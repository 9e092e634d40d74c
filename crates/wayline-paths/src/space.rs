use crate::traits::NodeId;

// ---------------------------------------------------------------------------
// Internal node for A* priority-queue searches
// ---------------------------------------------------------------------------

pub(crate) const NO_PARENT: NodeId = NodeId::MAX;

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: u32,
    pub(crate) f: u32,
    pub(crate) parent: NodeId,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered for use in `BinaryHeap`.
///
/// Pops the smallest `f` first; ties go to the largest `g` (the node deepest
/// along its path), then to the smallest node id. The order is total, so
/// equal inputs always expand nodes in the same sequence.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: NodeId,
    pub(crate) f: u32,
    pub(crate) g: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then(self.g.cmp(&other.g))
            .then(other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Reusable scratch memory for searches over a dense node set.
///
/// `SearchSpace` owns the node table, component labels and neighbour buffer
/// so that repeated queries incur no allocations after the first use. It
/// grows to the largest adapter it has served and never shrinks.
#[derive(Default)]
pub struct SearchSpace {
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    pub(crate) cc_labels: Vec<i64>,
    pub(crate) cc_stack: Vec<NodeId>,
    pub(crate) nbuf: Vec<NodeId>,
}

impl SearchSpace {
    /// Create a space pre-sized for `num_nodes` nodes.
    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            astar_nodes: vec![Node::default(); num_nodes],
            astar_generation: 0,
            cc_labels: Vec::new(),
            cc_stack: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Number of nodes the A* table can currently hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.astar_nodes.len()
    }

    /// Make room for `num_nodes` nodes and `max_neighbors` scratch entries.
    ///
    /// If the request fits within existing capacity nothing is reallocated;
    /// otherwise the node table is rebuilt and the generation restarts.
    pub(crate) fn reserve(&mut self, num_nodes: usize, max_neighbors: usize) {
        if num_nodes > self.astar_nodes.len() {
            log::trace!(
                "search space grows from {} to {} nodes",
                self.astar_nodes.len(),
                num_nodes
            );
            self.astar_nodes.clear();
            self.astar_nodes.resize(num_nodes, Node::default());
            self.astar_generation = 0;
        }
        if self.nbuf.capacity() < max_neighbors {
            self.nbuf.reserve(max_neighbors - self.nbuf.len());
        }
    }

    /// Start a new A* generation, lazily invalidating every node.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.astar_generation = self.astar_generation.wrapping_add(1);
        if self.astar_generation == 0 {
            // Wrapped: stale nodes could now match, so clear them for real.
            for n in self.astar_nodes.iter_mut() {
                n.generation = 0;
            }
            self.astar_generation = 1;
        }
        self.astar_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn reserve_smaller_preserves_capacity() {
        let mut space = SearchSpace::with_capacity(400);
        space.astar_generation = 7;
        space.reserve(25, 4);
        assert_eq!(space.capacity(), 400);
        assert_eq!(space.astar_generation, 7);
    }

    #[test]
    fn reserve_larger_reallocates() {
        let mut space = SearchSpace::with_capacity(25);
        space.astar_generation = 7;
        space.reserve(400, 8);
        assert_eq!(space.capacity(), 400);
        assert_eq!(space.astar_generation, 0);
        assert!(space.nbuf.capacity() >= 8);
    }

    #[test]
    fn generation_wrap_clears_nodes() {
        let mut space = SearchSpace::with_capacity(3);
        space.astar_nodes[1].generation = 1;
        space.astar_generation = u32::MAX;
        assert_eq!(space.next_generation(), 1);
        assert_eq!(space.astar_nodes[1].generation, 0);
    }

    #[test]
    fn heap_order_is_total() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 9, f: 5, g: 1 });
        heap.push(NodeRef { idx: 4, f: 5, g: 3 });
        heap.push(NodeRef { idx: 2, f: 5, g: 3 });
        heap.push(NodeRef { idx: 1, f: 6, g: 6 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![2, 4, 9, 1]);
    }
}
