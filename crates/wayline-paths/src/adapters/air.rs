use wayline_core::{GameMap, Point};

use crate::traits::{AstarPather, NodeId, Pather, WeightedPather};

/// Unconstrained flight: 8-way unit-cost moves anywhere inside the map.
///
/// Chebyshev distance is exact for this move set, so the search walks
/// straight at the target without exploring sideways.
#[derive(Debug, Clone, Copy)]
pub struct AirAdapter {
    width: u32,
    height: u32,
}

impl AirAdapter {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Adapter covering every tile of `map`.
    pub fn for_map<M: GameMap>(map: &M) -> Self {
        Self::new(map.width(), map.height())
    }

    fn point(&self, n: NodeId) -> Point {
        Point::new((n % self.width) as i32, (n / self.width) as i32)
    }
}

impl Pather for AirAdapter {
    fn num_nodes(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn max_neighbors(&self) -> usize {
        8
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        for p in self.point(n).neighbors_8() {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height {
                buf.push(p.y as u32 * self.width + p.x as u32);
            }
        }
    }
}

impl WeightedPather for AirAdapter {
    fn cost(&self, _from: NodeId, _to: NodeId) -> u32 {
        1
    }
}

impl AstarPather for AirAdapter {
    fn estimate(&self, from: NodeId, to: NodeId) -> u32 {
        self.point(from).chebyshev(self.point(to))
    }

    fn max_priority(&self) -> u32 {
        self.width.max(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchSpace;

    #[test]
    fn diagonal_flight() {
        let air = AirAdapter::new(6, 6);
        let mut space = SearchSpace::default();
        let path = space.astar_path(&air, &[0], 35).unwrap();
        assert_eq!(path, vec![0, 7, 14, 21, 28, 35]);
    }

    #[test]
    fn corner_has_three_neighbours() {
        let air = AirAdapter::new(4, 4);
        let mut buf = Vec::new();
        air.neighbors(0, &mut buf);
        assert_eq!(buf, vec![1, 5, 4]);
    }
}
