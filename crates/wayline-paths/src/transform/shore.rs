use wayline_core::{GameMap, TileRef};

use crate::traits::PathFinder;

/// Snaps land endpoints onto adjacent water so the wrapped water search only
/// sees water nodes, then restores the original endpoints on the result.
pub struct ShoreCoercion<F, M> {
    inner: F,
    map: M,
}

impl<F: PathFinder, M: GameMap> ShoreCoercion<F, M> {
    pub fn new(inner: F, map: M) -> Self {
        Self { inner, map }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Water tile to search from in place of `t`.
    ///
    /// Water tiles map to themselves. A land tile maps to the neighbouring
    /// water tile with the most water neighbours of its own; ties keep the
    /// first in neighbour order. `None` if `t` is invalid or has no water
    /// neighbour.
    pub fn coerce(&self, t: TileRef) -> Option<TileRef> {
        coerce_to_water(&self.map, t)
    }
}

pub(crate) fn coerce_to_water<M: GameMap>(map: &M, t: TileRef) -> Option<TileRef> {
    if !map.is_valid(t) {
        return None;
    }
    if map.is_water(t) {
        return Some(t);
    }
    let mut nbuf = Vec::with_capacity(4);
    map.neighbors(t, &mut nbuf);
    let mut best: Option<(TileRef, usize)> = None;
    for n in nbuf {
        if !map.is_water(n) {
            continue;
        }
        let score = map.water_neighbor_count(n);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((n, score));
        }
    }
    best.map(|(n, _)| n)
}

impl<F: PathFinder, M: GameMap> PathFinder for ShoreCoercion<F, M> {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        let target = self.coerce(to)?;

        // (coerced, original); the first original wins a shared water tile.
        let mut sources: Vec<(TileRef, TileRef)> = Vec::with_capacity(from.len());
        for &orig in from {
            let Some(water) = self.coerce(orig) else {
                continue;
            };
            if !sources.iter().any(|&(w, _)| w == water) {
                sources.push((water, orig));
            }
        }
        if sources.is_empty() {
            return None;
        }

        let coerced: Vec<TileRef> = sources.iter().map(|&(w, _)| w).collect();
        let mut path = self.inner.find_path(&coerced, target)?;

        let first = *path.first()?;
        if let Some(&(_, orig)) = sources.iter().find(|&&(w, _)| w == first) {
            if orig != first {
                path.insert(0, orig);
            }
        }
        if target != to {
            path.push(to);
        }
        Some(path)
    }
}
