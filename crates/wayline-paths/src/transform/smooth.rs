use wayline_core::raster::line;
use wayline_core::{GameMap, SegmentPlan, TileRef};

use crate::traits::PathFinder;

/// Default traversability for naval smoothing: water or any shoreline tile.
pub fn water_or_shoreline<M: GameMap>(map: &M, t: TileRef) -> bool {
    map.is_water(t) || map.is_shoreline(t)
}

/// Collapse a dense path into line-of-sight keypoints.
///
/// From each anchor the run is extended one path node at a time while every
/// cell strictly between the anchor and the candidate (Bresenham line)
/// satisfies `traversable`; the last node that passed becomes the next
/// keypoint. Each segment costs `max(1, manhattan(a, b))` steps between its
/// keypoints, the same count a client derives from the keypoints alone.
pub fn smooth_path<M, P>(map: &M, path: &[TileRef], traversable: P) -> SegmentPlan
where
    M: GameMap,
    P: Fn(&M, TileRef) -> bool,
{
    if path.len() < 2 {
        return SegmentPlan::new(path.to_vec(), Vec::new());
    }
    let clear = |a: TileRef, b: TileRef| {
        let cells = line(map.point(a), map.point(b));
        cells.len() <= 2
            || cells[1..cells.len() - 1]
                .iter()
                .all(|&p| map.tile_at(p).is_some_and(|t| traversable(map, t)))
    };

    let mut points = vec![path[0]];
    let mut steps = Vec::new();
    let mut anchor = 0;
    while anchor + 1 < path.len() {
        let mut j = anchor + 1;
        while j + 1 < path.len() && clear(path[anchor], path[j + 1]) {
            j += 1;
        }
        points.push(path[j]);
        steps.push(map.manhattan_dist(path[anchor], path[j]).max(1));
        anchor = j;
    }
    log::trace!("smoothed {} path nodes into {} keypoints", path.len(), points.len());
    SegmentPlan::new(points, steps)
}

/// Line-of-sight smoothing stage.
///
/// [`find_path`](PathFinder::find_path) returns only the keypoints;
/// [`plan_segments`](Self::plan_segments) also returns per-segment step
/// counts for motion replication.
pub struct Smoothed<F, M, P = fn(&M, TileRef) -> bool> {
    inner: F,
    map: M,
    traversable: P,
}

impl<F: PathFinder, M: GameMap> Smoothed<F, M> {
    /// Smoothing over water and shoreline tiles.
    pub fn naval(inner: F, map: M) -> Self {
        Self {
            inner,
            map,
            traversable: water_or_shoreline::<M>,
        }
    }
}

impl<F, M, P> Smoothed<F, M, P>
where
    F: PathFinder,
    M: GameMap,
    P: Fn(&M, TileRef) -> bool,
{
    pub fn new(inner: F, map: M, traversable: P) -> Self {
        Self {
            inner,
            map,
            traversable,
        }
    }

    /// Search with the wrapped finder and compress the result.
    pub fn plan_segments(&mut self, from: &[TileRef], to: TileRef) -> Option<SegmentPlan> {
        let dense = self.inner.find_path(from, to)?;
        Some(smooth_path(&self.map, &dense, &self.traversable))
    }
}

impl<F, M, P> PathFinder for Smoothed<F, M, P>
where
    F: PathFinder,
    M: GameMap,
    P: Fn(&M, TileRef) -> bool,
{
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        self.plan_segments(from, to)
            .map(|plan| plan.into_parts().0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstarFinder;
    use crate::adapters::WaterAdapter;
    use wayline_core::TerrainMap;

    #[test]
    fn collapses_open_water() {
        let map = TerrainMap::new(10, 3);
        let plan = smooth_path(&map, &[10, 11, 12, 22], water_or_shoreline);
        assert_eq!(plan.points(), &[10, 22]);
        assert_eq!(plan.segment_steps(), &[3]);
    }

    #[test]
    fn keeps_corner_around_land() {
        // Route around the island corner: (0,0) -> (3,0) -> (3,3).
        let map = TerrainMap::from_ascii(
            "
            ~~~~
            ...~
            ...~
            ...~
            ",
        )
        .unwrap();
        let path = [0, 1, 2, 3, 7, 11, 15];
        let plan = smooth_path(&map, &path, |m: &TerrainMap, t| m.is_water(t));
        assert_eq!(plan.points(), &[0, 3, 15]);
        assert_eq!(plan.segment_steps(), &[3, 3]);
        assert_eq!(plan.total_steps(), 6);
    }

    #[test]
    fn detour_costs_keypoint_distance() {
        // The dense route swings around the rock at (2,1); the straight
        // line from (0,1) to (4,1) only touches shoreline.
        let map = TerrainMap::from_ascii(
            "
            ~~~~~
            ~~.~~
            ~~~~~
            ",
        )
        .unwrap();
        let path = [5, 6, 1, 2, 3, 8, 9];
        let plan = smooth_path(&map, &path, water_or_shoreline);
        assert_eq!(plan.points(), &[5, 9]);
        assert_eq!(plan.segment_steps(), &[4]);
    }

    #[test]
    fn trivial_paths() {
        let map = TerrainMap::new(4, 4);
        let plan = smooth_path(&map, &[5], water_or_shoreline);
        assert_eq!(plan.points(), &[5]);
        assert!(plan.segment_steps().is_empty());
        let plan = smooth_path(&map, &[5, 6], water_or_shoreline);
        assert_eq!(plan.segment_steps(), &[1]);
    }

    #[test]
    fn stage_returns_keypoints() {
        let map = TerrainMap::new(6, 6);
        let mut stage = Smoothed::naval(AstarFinder::new(WaterAdapter::new(&map, 0)), &map);
        assert_eq!(stage.find_path(&[0], 35), Some(vec![0, 35]));
        let plan = stage.plan_segments(&[0], 35).unwrap();
        assert_eq!(plan.segment_steps(), &[10]);
    }
}
