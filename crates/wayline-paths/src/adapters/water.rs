use wayline_core::GameMap;

use crate::traits::{AstarPather, NodeId, Pather, WeightedPather};

/// Open-water grid search: 4-way moves between water tiles.
///
/// Land nodes have no neighbours, so land endpoints must be coerced onto
/// water before searching (see [`ShoreCoercion`](crate::ShoreCoercion)).
/// Entering a water tile that touches land costs `1 + shore_penalty`, which
/// keeps routes off the coast where open water is available.
#[derive(Debug, Clone)]
pub struct WaterAdapter<M> {
    map: M,
    shore_penalty: u32,
}

impl<M: GameMap> WaterAdapter<M> {
    pub fn new(map: M, shore_penalty: u32) -> Self {
        Self { map, shore_penalty }
    }

    pub fn map(&self) -> &M {
        &self.map
    }
}

impl<M: GameMap> Pather for WaterAdapter<M> {
    fn num_nodes(&self) -> usize {
        self.map.num_tiles()
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        if !self.map.is_water(n) {
            return;
        }
        let start = buf.len();
        self.map.neighbors(n, buf);
        let mut keep = start;
        for i in start..buf.len() {
            if self.map.is_water(buf[i]) {
                buf[keep] = buf[i];
                keep += 1;
            }
        }
        buf.truncate(keep);
    }
}

impl<M: GameMap> WeightedPather for WaterAdapter<M> {
    fn cost(&self, _from: NodeId, to: NodeId) -> u32 {
        if self.shore_penalty > 0 && self.map.is_shoreline(to) {
            1 + self.shore_penalty
        } else {
            1
        }
    }
}

impl<M: GameMap> AstarPather for WaterAdapter<M> {
    fn estimate(&self, from: NodeId, to: NodeId) -> u32 {
        self.map.manhattan_dist(from, to)
    }

    fn max_priority(&self) -> u32 {
        let per_step = 1 + self.shore_penalty as u64;
        (self.map.num_tiles() as u64 * per_step).min(u32::MAX as u64) as u32
    }
}
