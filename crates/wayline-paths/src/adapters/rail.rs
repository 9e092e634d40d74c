use wayline_core::GameMap;

use crate::traits::{AstarPather, NodeId, Pather, WeightedPather};

/// Grid search restricted to tiles carrying rail.
#[derive(Debug, Clone)]
pub struct RailAdapter<M> {
    map: M,
}

impl<M: GameMap> RailAdapter<M> {
    pub fn new(map: M) -> Self {
        Self { map }
    }
}

impl<M: GameMap> Pather for RailAdapter<M> {
    fn num_nodes(&self) -> usize {
        self.map.num_tiles()
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        if !self.map.has_rail(n) {
            return;
        }
        let start = buf.len();
        self.map.neighbors(n, buf);
        let mut keep = start;
        for i in start..buf.len() {
            if self.map.has_rail(buf[i]) {
                buf[keep] = buf[i];
                keep += 1;
            }
        }
        buf.truncate(keep);
    }
}

impl<M: GameMap> WeightedPather for RailAdapter<M> {
    fn cost(&self, _from: NodeId, _to: NodeId) -> u32 {
        1
    }
}

impl<M: GameMap> AstarPather for RailAdapter<M> {
    fn estimate(&self, from: NodeId, to: NodeId) -> u32 {
        self.map.manhattan_dist(from, to)
    }

    fn max_priority(&self) -> u32 {
        self.map.num_tiles().min(u32::MAX as usize) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchSpace;
    use wayline_core::TerrainMap;

    #[test]
    fn follows_track_only() {
        let map = TerrainMap::from_ascii(
            "
            ===..
            ..=..
            ..===
            ",
        )
        .unwrap();
        let mut space = SearchSpace::default();
        let path = space.astar_path(&RailAdapter::new(&map), &[0], 14).unwrap();
        assert_eq!(path, vec![0, 1, 2, 7, 12, 13, 14]);
        assert_eq!(space.astar_path(&RailAdapter::new(&map), &[0], 4), None);
    }
}
