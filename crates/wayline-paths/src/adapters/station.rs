use wayline_core::{Point, TileRef};

use crate::traits::{AstarPather, NodeId, Pather, WeightedPather};

/// Inter-station rail graph.
///
/// Nodes are stations numbered densely in insertion order; edges are the
/// declared rail connections. Edge cost and heuristic are Manhattan distance
/// between the stations' world positions, so the heuristic stays admissible.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    positions: Vec<Point>,
    tiles: Vec<TileRef>,
    edges: Vec<Vec<NodeId>>,
    max_degree: usize,
}

impl StationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station at `tile` (world position `pos`) and return its id.
    pub fn add_station(&mut self, tile: TileRef, pos: Point) -> NodeId {
        self.positions.push(pos);
        self.tiles.push(tile);
        self.edges.push(Vec::new());
        (self.positions.len() - 1) as NodeId
    }

    /// Connect two stations in both directions. Unknown ids and duplicate
    /// edges are ignored; returns whether an edge was added.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        let n = self.edges.len();
        if a == b || a as usize >= n || b as usize >= n || self.edges[a as usize].contains(&b) {
            return false;
        }
        self.edges[a as usize].push(b);
        self.edges[b as usize].push(a);
        self.max_degree = self
            .max_degree
            .max(self.edges[a as usize].len())
            .max(self.edges[b as usize].len());
        true
    }

    /// Tile of station `id`.
    pub fn tile(&self, id: NodeId) -> Option<TileRef> {
        self.tiles.get(id as usize).copied()
    }

    /// Station id located at `tile`, if any.
    pub fn station_at(&self, tile: TileRef) -> Option<NodeId> {
        self.tiles.iter().position(|&t| t == tile).map(|i| i as NodeId)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn distance(&self, a: NodeId, b: NodeId) -> u32 {
        self.positions[a as usize].manhattan(self.positions[b as usize])
    }
}

impl Pather for StationGraph {
    fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    fn max_neighbors(&self) -> usize {
        self.max_degree
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        if let Some(e) = self.edges.get(n as usize) {
            buf.extend_from_slice(e);
        }
    }
}

impl WeightedPather for StationGraph {
    fn cost(&self, from: NodeId, to: NodeId) -> u32 {
        self.distance(from, to).max(1)
    }
}

impl AstarPather for StationGraph {
    fn estimate(&self, from: NodeId, to: NodeId) -> u32 {
        self.distance(from, to)
    }
}
