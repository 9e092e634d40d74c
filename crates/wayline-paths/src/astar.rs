use std::collections::BinaryHeap;

use crate::space::{NO_PARENT, NodeRef, SearchSpace};
use crate::traits::{AstarPather, NodeId};

impl SearchSpace {
    /// Compute the shortest path from the closest of `sources` to `goal`
    /// using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists. Sources outside `0..num_nodes` are ignored; an out-of-range
    /// goal yields `None`. Priorities above
    /// [`max_priority`](AstarPather::max_priority) are never enqueued.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        sources: &[NodeId],
        goal: NodeId,
    ) -> Option<Vec<NodeId>> {
        let num_nodes = pather.num_nodes();
        if goal as usize >= num_nodes {
            return None;
        }
        if sources.contains(&goal) {
            return Some(vec![goal]);
        }

        self.reserve(num_nodes, pather.max_neighbors());
        let cur_gen = self.next_generation();
        let max_priority = pather.max_priority();

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        for &src in sources {
            if src as usize >= num_nodes {
                continue;
            }
            let node = &mut self.astar_nodes[src as usize];
            if node.generation == cur_gen {
                // Duplicate source.
                continue;
            }
            node.g = 0;
            node.f = pather.estimate(src, goal);
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
            open.push(NodeRef {
                idx: src,
                f: node.f,
                g: 0,
            });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;
            let cn = &self.astar_nodes[ci as usize];

            // Skip stale entries.
            if !cn.open || cn.g != current.g {
                continue;
            }

            if ci == goal {
                break 'search true;
            }

            self.astar_nodes[ci as usize].open = false;
            expanded += 1;
            let current_g = current.g;

            nbuf.clear();
            pather.neighbors(ci, &mut nbuf);

            for &ni in nbuf.iter() {
                if ni as usize >= num_nodes {
                    continue;
                }
                let tentative_g = current_g.saturating_add(pather.cost(ci, ni).max(1));

                let n = &mut self.astar_nodes[ni as usize];
                if n.generation == cur_gen && tentative_g >= n.g {
                    continue;
                }
                let f = tentative_g.saturating_add(pather.estimate(ni, goal));
                if f > max_priority {
                    continue;
                }

                n.generation = cur_gen;
                n.g = tentative_g;
                n.f = f;
                n.parent = ci;
                n.open = true;

                open.push(NodeRef {
                    idx: ni,
                    f,
                    g: tentative_g,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::trace!("astar: goal {goal} unreachable after {expanded} expansions");
            return None;
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            path.push(ci);
            ci = self.astar_nodes[ci as usize].parent;
        }
        path.reverse();
        log::trace!(
            "astar: {} -> {goal}, {} nodes, {expanded} expansions",
            path[0],
            path.len()
        );
        Some(path)
    }
}
