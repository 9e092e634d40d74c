use wayline_core::TileRef;

/// Dense node identifier used by the generic search. Grid adapters use
/// [`TileRef`]s directly; graph adapters number their own nodes.
pub type NodeId = u32;

/// Minimal search interface: node count and neighbour enumeration.
pub trait Pather {
    /// Number of nodes; valid ids are `0..num_nodes()`.
    fn num_nodes(&self) -> usize;

    /// Upper bound on neighbours per node, used to pre-size scratch buffers.
    fn max_neighbors(&self) -> usize {
        4
    }

    /// Append neighbours of `n` into `buf` in a fixed order. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 1.
    fn cost(&self, from: NodeId, to: NodeId) -> u32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: NodeId, to: NodeId) -> u32;

    /// Largest `g + h` priority worth enqueuing. Nodes above it are pruned.
    fn max_priority(&self) -> u32 {
        u32::MAX
    }
}

/// One-shot path query shared by adapters and every pipeline stage.
///
/// `from` may hold several candidate starts; the result starts at whichever
/// one is closest. `None` means no path, which is a routine outcome.
pub trait PathFinder {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>>;
}

impl<F: PathFinder + ?Sized> PathFinder for &mut F {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        (**self).find_path(from, to)
    }
}

impl<F: PathFinder + ?Sized> PathFinder for Box<F> {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        (**self).find_path(from, to)
    }
}
