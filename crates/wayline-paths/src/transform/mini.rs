use wayline_core::raster::walk_4;
use wayline_core::{GameMap, Point, Range, TileRef};

use crate::adapters::BoundedWaterFinder;
use crate::traits::PathFinder;

#[derive(Debug, Clone, Copy)]
struct Dims {
    width: u32,
    height: u32,
}

impl Dims {
    fn of<M: GameMap>(map: &M) -> Self {
        Self {
            width: map.width(),
            height: map.height(),
        }
    }

    fn point(self, t: TileRef) -> Option<Point> {
        if self.width == 0 || t as usize >= self.width as usize * self.height as usize {
            return None;
        }
        Some(Point::new((t % self.width) as i32, (t / self.width) as i32))
    }

    fn tile(self, p: Point) -> TileRef {
        let x = p.x.clamp(0, self.width as i32 - 1) as u32;
        let y = p.y.clamp(0, self.height as i32 - 1) as u32;
        y * self.width + x
    }
}

/// Full-resolution 2x2 block covered by the mini tile holding `p`.
fn block(p: Point) -> Range {
    let (x, y) = (p.x / 2 * 2, p.y / 2 * 2);
    Range::new(x, y, x + 2, y + 2)
}

/// Runs the wrapped search on the half-resolution mini-map.
///
/// Full tiles map to mini tile `(x / 2, y / 2)`. Each mini tile of the
/// result is scaled back up to a water tile of its 2x2 block, the
/// extremities are replaced by the caller's true start and target, and
/// consecutive tiles are joined by water-only 4-connected steps. When two
/// tiles have no water connection near their blocks the query is answered
/// by a full-resolution search instead.
///
/// Endpoints are expected on water, as [`ShoreCoercion`](crate::ShoreCoercion)
/// guarantees when stacked outside this stage.
pub struct MiniMapped<F, M> {
    inner: F,
    map: M,
    mini: Dims,
}

impl<F: PathFinder, M: GameMap> MiniMapped<F, M> {
    pub fn new<B: GameMap>(inner: F, map: M, mini: &B) -> Self {
        Self {
            inner,
            map,
            mini: Dims::of(mini),
        }
    }

    /// Mini tile covering full tile `t`.
    pub fn to_mini(&self, t: TileRef) -> Option<TileRef> {
        if !self.map.is_valid(t) {
            return None;
        }
        let p = self.map.point(t);
        Some(self.mini.tile(Point::new(p.x / 2, p.y / 2)))
    }

    /// First water tile of mini tile `m`'s block in row order, or the
    /// block's top-left corner (clamped into the map) when it has none.
    pub fn to_full(&self, m: TileRef) -> Option<TileRef> {
        let p = self.mini.point(m)?;
        let corner = Point::new(p.x * 2, p.y * 2);
        let water = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .into_iter()
            .filter_map(|(dx, dy)| self.map.tile_at(corner + Point::new(dx, dy)))
            .find(|&t| self.map.is_water(t));
        Some(water.unwrap_or_else(|| Dims::of(&self.map).tile(corner)))
    }

    /// Water-only steps from `a` to `b`, both included.
    ///
    /// Tries the straight walk first, then searches the union of both
    /// blocks and a padded copy of it.
    fn connect(&self, a: TileRef, b: TileRef) -> Option<Vec<TileRef>> {
        let (pa, pb) = (self.map.point(a), self.map.point(b));
        let straight: Vec<TileRef> = walk_4(pa, pb)
            .into_iter()
            .filter_map(|p| self.map.tile_at(p))
            .collect();
        if straight.iter().all(|&t| self.map.is_water(t)) {
            return Some(straight);
        }
        let (ra, rb) = (block(pa), block(pb));
        let union = Range::new(
            ra.min.x.min(rb.min.x),
            ra.min.y.min(rb.min.y),
            ra.max.x.max(rb.max.x),
            ra.max.y.max(rb.max.y),
        );
        [union, union.pad(2)]
            .into_iter()
            .find_map(|window| BoundedWaterFinder::new(&self.map, window, 0).find_path(&[a], b))
    }

    fn full_search(&self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        log::debug!("mini-map route to {to} leaves the water, searching at full resolution");
        let whole = Range::new(0, 0, self.map.width() as i32, self.map.height() as i32);
        BoundedWaterFinder::new(&self.map, whole, 0).find_path(from, to)
    }
}

impl<F: PathFinder, M: GameMap> PathFinder for MiniMapped<F, M> {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        let mini_to = self.to_mini(to)?;

        // (mini, original); the first original wins a shared mini tile.
        let mut sources: Vec<(TileRef, TileRef)> = Vec::with_capacity(from.len());
        for &orig in from {
            let Some(m) = self.to_mini(orig) else {
                continue;
            };
            if !sources.iter().any(|&(s, _)| s == m) {
                sources.push((m, orig));
            }
        }
        if sources.is_empty() {
            return None;
        }

        let mini_from: Vec<TileRef> = sources.iter().map(|&(m, _)| m).collect();
        let mini_path = self.inner.find_path(&mini_from, mini_to)?;
        let first = *mini_path.first()?;
        let start = sources
            .iter()
            .find(|&&(m, _)| m == first)
            .map_or_else(|| self.to_full(first), |&(_, orig)| Some(orig))?;

        let mut keys = Vec::with_capacity(mini_path.len() + 1);
        keys.push(start);
        if mini_path.len() > 2 {
            for &m in &mini_path[1..mini_path.len() - 1] {
                keys.push(self.to_full(m)?);
            }
        }
        keys.push(to);

        let mut path: Vec<TileRef> = Vec::with_capacity(keys.len() * 2);
        path.push(start);
        for w in keys.windows(2) {
            let Some(leg) = self.connect(w[0], w[1]) else {
                return self.full_search(from, to);
            };
            path.extend(leg.into_iter().skip(1));
        }
        Some(path)
    }
}
