use wayline_core::{GameMap, Point, Range, TileRef};

use crate::SearchSpace;
use crate::traits::{AstarPather, NodeId, PathFinder, Pather, WeightedPather};

/// Water search confined to a rectangular window of the map.
///
/// Node ids are window-local (`(y - min.y) * width + (x - min.x)`), so the
/// search table is sized by the window area rather than the whole map. Used
/// for local refinement where worst-case cost must stay bounded.
#[derive(Debug, Clone)]
pub struct BoundedWaterAdapter<M> {
    map: M,
    window: Range,
    shore_penalty: u32,
}

impl<M: GameMap> BoundedWaterAdapter<M> {
    /// The window is clipped to the map bounds.
    pub fn new(map: M, window: Range, shore_penalty: u32) -> Self {
        let bounds = Range::new(0, 0, map.width() as i32, map.height() as i32);
        Self {
            window: window.intersect(bounds),
            map,
            shore_penalty,
        }
    }

    pub fn window(&self) -> Range {
        self.window
    }

    /// Window-local id of a global tile, `None` outside the window.
    pub fn to_local(&self, t: TileRef) -> Option<NodeId> {
        if !self.map.is_valid(t) {
            return None;
        }
        let p = self.map.point(t);
        if !self.window.contains(p) {
            return None;
        }
        let rel = p - self.window.min;
        Some(rel.y as u32 * self.window.width() as u32 + rel.x as u32)
    }

    /// Global tile of a window-local id.
    pub fn to_global(&self, n: NodeId) -> Option<TileRef> {
        let w = self.window.width() as u32;
        if w == 0 || n as usize >= self.window.len() {
            return None;
        }
        let p = self.window.min + Point::new((n % w) as i32, (n / w) as i32);
        self.map.tile_at(p)
    }
}

impl<M: GameMap> Pather for BoundedWaterAdapter<M> {
    fn num_nodes(&self) -> usize {
        self.window.len()
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        let Some(t) = self.to_global(n) else {
            return;
        };
        if !self.map.is_water(t) {
            return;
        }
        for p in self.map.point(t).neighbors_4() {
            if !self.window.contains(p) {
                continue;
            }
            let Some(nt) = self.map.tile_at(p) else {
                continue;
            };
            if !self.map.is_water(nt) {
                continue;
            }
            if let Some(local) = self.to_local(nt) {
                buf.push(local);
            }
        }
    }
}

impl<M: GameMap> WeightedPather for BoundedWaterAdapter<M> {
    fn cost(&self, _from: NodeId, to: NodeId) -> u32 {
        match self.to_global(to) {
            Some(t) if self.shore_penalty > 0 && self.map.is_shoreline(t) => 1 + self.shore_penalty,
            _ => 1,
        }
    }
}

impl<M: GameMap> AstarPather for BoundedWaterAdapter<M> {
    fn estimate(&self, from: NodeId, to: NodeId) -> u32 {
        let w = self.window.width().max(1) as u32;
        let (fx, fy) = (from % w, from / w);
        let (tx, ty) = (to % w, to / w);
        fx.abs_diff(tx) + fy.abs_diff(ty)
    }

    fn max_priority(&self) -> u32 {
        let per_step = 1 + self.shore_penalty as u64;
        (self.window.len() as u64 * per_step).min(u32::MAX as u64) as u32
    }
}

/// [`PathFinder`] over a [`BoundedWaterAdapter`], speaking global tile ids.
///
/// Sources outside the window are dropped; a target outside it is not found.
pub struct BoundedWaterFinder<M> {
    adapter: BoundedWaterAdapter<M>,
    space: SearchSpace,
}

impl<M: GameMap> BoundedWaterFinder<M> {
    pub fn new(map: M, window: Range, shore_penalty: u32) -> Self {
        let adapter = BoundedWaterAdapter::new(map, window, shore_penalty);
        let space = SearchSpace::with_capacity(adapter.num_nodes());
        Self { adapter, space }
    }

    pub fn window(&self) -> Range {
        self.adapter.window()
    }
}

impl<M: GameMap> PathFinder for BoundedWaterFinder<M> {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        let goal = self.adapter.to_local(to)?;
        let sources: Vec<NodeId> = from
            .iter()
            .filter_map(|&t| self.adapter.to_local(t))
            .collect();
        if sources.is_empty() {
            return None;
        }
        let local = self.space.astar_path(&self.adapter, &sources, goal)?;
        local
            .into_iter()
            .map(|n| self.adapter.to_global(n))
            .collect()
    }
}
