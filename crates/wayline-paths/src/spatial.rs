//! Shore lookups used when launching ships.

use std::iter;

use wayline_core::{ComponentLookup, GameMap, PlayerId, Range, TileRef};

use crate::adapters::BoundedWaterFinder;
use crate::builder::{WaterPathFinder, water_path_finder};
use crate::config::SearchConfig;
use crate::traits::PathFinder;
use crate::transform::{ShoreCoercion, coerce_to_water};

/// Nearest shore tile owned by `owner` within `max_dist` (Manhattan) of
/// `tile`, ignoring terrain in between.
///
/// `owner == None` looks for unowned shore. Ties keep the tile reached first
/// by the breadth-first flood.
pub fn closest_shore<M: GameMap>(
    map: &M,
    owner: Option<PlayerId>,
    tile: TileRef,
    max_dist: u32,
) -> Option<TileRef> {
    map.bfs(tile, &mut |t| map.manhattan_dist(tile, t) <= max_dist)
        .into_iter()
        .filter(|&t| map.is_shore(t) && map.owner(t) == owner)
        .min_by_key(|&t| map.manhattan_dist(tile, t))
}

/// Closest-shore-by-water queries over a shared naval pipeline.
pub struct ShoreQuery<M, C> {
    map: M,
    components: C,
    finder: WaterPathFinder<M, C>,
    config: SearchConfig,
}

impl<M, C> ShoreQuery<M, C>
where
    M: GameMap + Clone,
    C: ComponentLookup + Clone,
{
    pub fn new(map: M, mini: M, components: C, config: SearchConfig) -> Self {
        let finder = water_path_finder(map.clone(), mini, components.clone(), &config);
        Self {
            map,
            components,
            finder,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Shore tiles on `owner`'s border touching water in the same component
    /// as `target`, in ascending tile order.
    pub fn candidates(&self, owner: PlayerId, target: TileRef) -> Vec<TileRef> {
        let Some(component) = coerce_to_water(&self.map, target).and_then(|w| self.components.component(w))
        else {
            return Vec::new();
        };
        let mut nbuf = Vec::with_capacity(4);
        self.map
            .border_tiles(owner)
            .into_iter()
            .filter(|&t| {
                if !self.map.is_shore(t) {
                    return false;
                }
                nbuf.clear();
                self.map.neighbors(t, &mut nbuf);
                nbuf.iter()
                    .any(|&n| self.map.is_water(n) && self.components.component(n) == Some(component))
            })
            .collect()
    }

    /// The shore tile of `owner` closest to `target` by water.
    ///
    /// `target` must be water or shoreline. A coarse search over the whole
    /// map picks a candidate, then a bounded search near the start of the
    /// coarse route refines the choice. The coarse answer stands whenever
    /// refinement is not possible.
    pub fn closest_shore_by_water(&mut self, owner: PlayerId, target: TileRef) -> Option<TileRef> {
        if !self.map.is_valid(target) || !(self.map.is_water(target) || self.map.is_shoreline(target)) {
            return None;
        }
        let candidates = self.candidates(owner, target);
        if candidates.is_empty() {
            log::debug!("player {} has no shore reaching tile {target}", owner.0);
            return None;
        }
        let path = self.finder.find_path(&candidates, target)?;
        let &coarse = path.first()?;
        Some(self.refine(&path, &candidates).unwrap_or(coarse))
    }

    /// Re-run the search inside a small window around the leading part of
    /// `path`, from the farthest waypoint whose window fits the area cap.
    fn refine(&self, path: &[TileRef], candidates: &[TileRef]) -> Option<TileRef> {
        let mut idx = self.config.refine_steps.min(path.len().saturating_sub(1));
        while idx > 0 {
            let waypoint = path[idx];
            let wp = self.map.point(waypoint);
            let near: Vec<TileRef> = candidates
                .iter()
                .copied()
                .filter(|&c| self.map.point(c).manhattan(wp) as usize <= idx)
                .collect();
            let window = Range::bounding(near.iter().map(|&c| self.map.point(c)).chain(iter::once(wp)))
                .pad(self.config.refine_padding);
            if !near.is_empty() && window.len() <= self.config.refine_max_area {
                log::debug!(
                    "refining shore search in {window} towards waypoint {waypoint} ({} candidates)",
                    near.len()
                );
                let bounded = BoundedWaterFinder::new(&self.map, window, self.config.shore_penalty);
                let mut finder = ShoreCoercion::new(bounded, &self.map);
                return finder.find_path(&near, waypoint)?.first().copied();
            }
            idx /= 2;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::WaterComponents;
    use wayline_core::TerrainMap;

    const COAST: &str = "
        00000000
        ~~~~~~~~
        ~~~~~~~~
        ~~~~~~~~
    ";

    fn query(ascii: &str, config: SearchConfig) -> ShoreQuery<Rc<TerrainMap>, Rc<WaterComponents>> {
        let map = Rc::new(TerrainMap::from_ascii(ascii).unwrap());
        let mini = Rc::new(map.mini_map());
        let cc = Rc::new(WaterComponents::compute(&*map));
        ShoreQuery::new(map, mini, cc, config)
    }

    #[test]
    fn closest_shore_within_distance() {
        let map = TerrainMap::from_ascii(
            "
            ~~~~
            ~11~
            ~11~
            ~~~~
            ",
        )
        .unwrap();
        let p1 = Some(PlayerId(1));
        assert_eq!(closest_shore(&map, p1, 0, 2), Some(5));
        assert_eq!(closest_shore(&map, p1, 15, 2), Some(10));
        assert_eq!(closest_shore(&map, p1, 0, 1), None);
        assert_eq!(closest_shore(&map, None, 0, 4), None);
    }

    #[test]
    fn by_water_finds_nearest_coast() {
        let mut q = query(COAST, SearchConfig::default());
        // (6,3) is closest to (6,0).
        assert_eq!(q.closest_shore_by_water(PlayerId(0), 30), Some(6));
    }

    #[test]
    fn rejects_inland_targets_and_missing_coast() {
        let mut q = query(
            "
            000~~
            000~~
            000~~
            ",
            SearchConfig::default(),
        );
        // (0,1) is land with no water neighbour.
        assert_eq!(q.closest_shore_by_water(PlayerId(0), 5), None);
        assert_eq!(q.closest_shore_by_water(PlayerId(7), 4), None);
        assert_eq!(q.closest_shore_by_water(PlayerId(0), 4), Some(2));
    }

    #[test]
    fn candidates_share_the_target_component() {
        let q = query(
            "
            0000
            ~0~~
            ~0~~
            ",
            SearchConfig::default(),
        );
        // The left strip is a separate component from the right basin.
        assert_eq!(q.candidates(PlayerId(0), 3), vec![2, 3, 5, 9]);
        assert_eq!(q.candidates(PlayerId(0), 4), vec![0, 5, 9]);
    }

    #[test]
    fn refinement_improves_coarse_choice() {
        let q = query(COAST, SearchConfig::default());
        let candidates: Vec<TileRef> = (0..8).collect();
        // A poor coarse route from (1,0) along row 1 then down column 6.
        let coarse = [1, 9, 10, 11, 12, 13, 14, 22, 30];
        assert_eq!(q.refine(&coarse, &candidates), Some(6));
    }

    #[test]
    fn refinement_window_follows_refine_steps() {
        let config = SearchConfig {
            refine_steps: 2,
            ..SearchConfig::default()
        };
        let q = query(COAST, config);
        let candidates: Vec<TileRef> = (0..8).collect();
        let coarse = [1, 9, 10, 11, 12, 13, 14, 22, 30];
        // Waypoint (2,1) sits right below (2,0).
        assert_eq!(q.refine(&coarse, &candidates), Some(2));
    }

    #[test]
    fn oversized_window_keeps_coarse_answer() {
        let config = SearchConfig {
            refine_max_area: 1,
            ..SearchConfig::default()
        };
        let q = query(COAST, config);
        let candidates: Vec<TileRef> = (0..8).collect();
        assert_eq!(q.refine(&[1, 9, 10, 18], &candidates), None);

        let mut q = query(COAST, config);
        assert_eq!(q.closest_shore_by_water(PlayerId(0), 30), Some(6));
    }
}
