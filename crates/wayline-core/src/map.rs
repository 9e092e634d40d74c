//! Read-only map interfaces consumed by the search and query layers.
//!
//! The production map lives outside this workspace; everything here only
//! needs [`GameMap`] and [`ComponentLookup`]. [`TerrainMap`](crate::TerrainMap)
//! is the in-memory implementation.

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::geom::Point;

/// Dense row-major tile index: `y * width + x`.
pub type TileRef = u32;

/// A concrete territory owner. "Unclaimed" is `Option::<PlayerId>::None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u16);

/// Grid map abstraction.
///
/// Implementors provide the raw layers; the derived queries have default
/// implementations in terms of them. Neighbour order is fixed
/// (up, right, down, left) and every caller relies on it for deterministic
/// results.
pub trait GameMap {
    /// Width in tiles.
    fn width(&self) -> u32;
    /// Height in tiles.
    fn height(&self) -> u32;
    /// Whether `t` is land. Callers must pass a valid tile.
    fn is_land(&self, t: TileRef) -> bool;
    /// Owner of `t`, `None` when unclaimed.
    fn owner(&self, t: TileRef) -> Option<PlayerId>;
    /// Whether `t` carries rail.
    fn has_rail(&self, t: TileRef) -> bool;

    /// Total number of tiles.
    #[inline]
    fn num_tiles(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Whether `t` addresses a tile of this map.
    #[inline]
    fn is_valid(&self, t: TileRef) -> bool {
        (t as usize) < self.num_tiles()
    }

    /// Column of `t`.
    #[inline]
    fn x(&self, t: TileRef) -> u32 {
        t % self.width()
    }

    /// Row of `t`.
    #[inline]
    fn y(&self, t: TileRef) -> u32 {
        t / self.width()
    }

    /// Coordinates of `t`.
    #[inline]
    fn point(&self, t: TileRef) -> Point {
        Point::new(self.x(t) as i32, self.y(t) as i32)
    }

    /// Tile at `p`, or `None` outside the map.
    #[inline]
    fn tile_at(&self, p: Point) -> Option<TileRef> {
        if p.x < 0 || p.y < 0 || p.x as u32 >= self.width() || p.y as u32 >= self.height() {
            return None;
        }
        Some(p.y as u32 * self.width() + p.x as u32)
    }

    #[inline]
    fn is_water(&self, t: TileRef) -> bool {
        !self.is_land(t)
    }

    /// Append the in-map 4-neighbours of `t` (up, right, down, left).
    fn neighbors(&self, t: TileRef, buf: &mut Vec<TileRef>) {
        for n in self.point(t).neighbors_4() {
            if let Some(nt) = self.tile_at(n) {
                buf.push(nt);
            }
        }
    }

    /// Number of water tiles among the 4-neighbours of `t`.
    fn water_neighbor_count(&self, t: TileRef) -> usize {
        let mut buf = Vec::with_capacity(4);
        self.neighbors(t, &mut buf);
        buf.into_iter().filter(|&n| self.is_water(n)).count()
    }

    /// Land tile touching water.
    fn is_shore(&self, t: TileRef) -> bool {
        self.is_land(t) && self.water_neighbor_count(t) > 0
    }

    /// Any tile touching a tile of the other terrain type.
    fn is_shoreline(&self, t: TileRef) -> bool {
        let land = self.is_land(t);
        let mut buf = Vec::with_capacity(4);
        self.neighbors(t, &mut buf);
        buf.into_iter().any(|n| self.is_land(n) != land)
    }

    #[inline]
    fn manhattan_dist(&self, a: TileRef, b: TileRef) -> u32 {
        self.point(a).manhattan(self.point(b))
    }

    /// Breadth-first flood from `start` over tiles accepted by `keep`.
    ///
    /// Returns the visited tiles in visiting order; `start` is included only
    /// if `keep` accepts it (otherwise nothing is visited).
    fn bfs(&self, start: TileRef, keep: &mut dyn FnMut(TileRef) -> bool) -> Vec<TileRef> {
        let mut out = Vec::new();
        if !self.is_valid(start) || !keep(start) {
            return out;
        }
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        let mut nbuf = Vec::with_capacity(4);
        seen.insert(start);
        queue.push_back(start);
        while let Some(t) = queue.pop_front() {
            out.push(t);
            nbuf.clear();
            self.neighbors(t, &mut nbuf);
            for &n in &nbuf {
                if seen.insert(n) && keep(n) {
                    queue.push_back(n);
                }
            }
        }
        out
    }

    /// Tiles owned by `owner` with at least one neighbour it does not own,
    /// in ascending tile order.
    fn border_tiles(&self, owner: PlayerId) -> Vec<TileRef> {
        let mut nbuf = Vec::with_capacity(4);
        (0..self.num_tiles() as TileRef)
            .filter(|&t| {
                if self.owner(t) != Some(owner) {
                    return false;
                }
                nbuf.clear();
                self.neighbors(t, &mut nbuf);
                nbuf.len() < 4 || nbuf.iter().any(|&n| self.owner(n) != Some(owner))
            })
            .collect()
    }
}

macro_rules! forward_game_map {
    ($($ty:ty),*) => {$(
        impl<M: GameMap + ?Sized> GameMap for $ty {
            fn width(&self) -> u32 { (**self).width() }
            fn height(&self) -> u32 { (**self).height() }
            fn is_land(&self, t: TileRef) -> bool { (**self).is_land(t) }
            fn owner(&self, t: TileRef) -> Option<PlayerId> { (**self).owner(t) }
            fn has_rail(&self, t: TileRef) -> bool { (**self).has_rail(t) }
            fn neighbors(&self, t: TileRef, buf: &mut Vec<TileRef>) { (**self).neighbors(t, buf) }
            fn border_tiles(&self, owner: PlayerId) -> Vec<TileRef> { (**self).border_tiles(owner) }
        }
    )*};
}

forward_game_map!(&M, Rc<M>);

/// Water-region labelling, computed outside the search layer.
pub trait ComponentLookup {
    /// Component id of `t`, `None` for tiles that belong to no water region.
    fn component(&self, t: TileRef) -> Option<u32>;
}

impl<C: ComponentLookup + ?Sized> ComponentLookup for &C {
    fn component(&self, t: TileRef) -> Option<u32> {
        (**self).component(t)
    }
}

impl<C: ComponentLookup + ?Sized> ComponentLookup for Rc<C> {
    fn component(&self, t: TileRef) -> Option<u32> {
        (**self).component(t)
    }
}
