use wayline_core::TileRef;

use crate::SearchSpace;
use crate::traits::{AstarPather, PathFinder};

/// [`PathFinder`] running A* over an adapter whose node ids are tile refs
/// (or any id space the caller speaks directly).
///
/// Owns its [`SearchSpace`], pre-sized from the adapter's capacity hints.
pub struct AstarFinder<A> {
    adapter: A,
    space: SearchSpace,
}

impl<A: AstarPather> AstarFinder<A> {
    pub fn new(adapter: A) -> Self {
        let space = SearchSpace::with_capacity(adapter.num_nodes());
        Self { adapter, space }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}

impl<A: AstarPather> PathFinder for AstarFinder<A> {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        self.space.astar_path(&self.adapter, from, to)
    }
}
