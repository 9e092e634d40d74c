//! In-memory terrain map.
//!
//! [`TerrainMap`] stores one terrain byte and one owner slot per tile in
//! row-major order and implements [`GameMap`]. It can derive the
//! half-resolution mini-map used for long-range water search.

use std::fmt;

use crate::geom::Point;
use crate::map::{GameMap, PlayerId, TileRef};

const LAND: u8 = 1 << 0;
const RAIL: u8 = 1 << 1;

/// A row-major land/water/rail map with per-tile ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainMap {
    width: u32,
    height: u32,
    terrain: Vec<u8>,
    owners: Vec<Option<PlayerId>>,
}

impl TerrainMap {
    /// Create an all-water map.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            terrain: vec![0; len],
            owners: vec![None; len],
        }
    }

    /// Parse an ASCII picture of a map, one line per row.
    ///
    /// | char | tile |
    /// |---|---|
    /// | `~` | water |
    /// | `.` | unowned land |
    /// | `=` | unowned land with rail |
    /// | `0`..`9` | land owned by that player |
    ///
    /// Leading and trailing blank lines are ignored.
    pub fn from_ascii(s: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let width = first.chars().count();
        let mut map = Self::new(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let t = (y * width + x) as TileRef;
                match ch {
                    '~' => {}
                    '.' => map.set_land(t, true),
                    '=' => {
                        map.set_land(t, true);
                        map.set_rail(t, true);
                    }
                    '0'..='9' => {
                        map.set_land(t, true);
                        map.set_owner(t, Some(PlayerId(ch as u16 - '0' as u16)));
                    }
                    _ => {
                        return Err(MapError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
            }
        }
        Ok(map)
    }

    /// Mark `t` as land or water. Out-of-range tiles are ignored.
    pub fn set_land(&mut self, t: TileRef, land: bool) {
        if let Some(b) = self.terrain.get_mut(t as usize) {
            if land {
                *b |= LAND;
            } else {
                *b &= !LAND;
            }
        }
    }

    /// Add or remove rail on `t`. Out-of-range tiles are ignored.
    pub fn set_rail(&mut self, t: TileRef, rail: bool) {
        if let Some(b) = self.terrain.get_mut(t as usize) {
            if rail {
                *b |= RAIL;
            } else {
                *b &= !RAIL;
            }
        }
    }

    /// Set the owner of `t`. Out-of-range tiles are ignored.
    pub fn set_owner(&mut self, t: TileRef, owner: Option<PlayerId>) {
        if let Some(o) = self.owners.get_mut(t as usize) {
            *o = owner;
        }
    }

    /// Derive the half-resolution mini-map.
    ///
    /// Mini tile `(x, y)` covers full tiles `(2x..2x+2, 2y..2y+2)` and is water
    /// when any covered tile is water, so one-tile straits stay navigable.
    /// Ownership and rail are not carried over.
    pub fn mini_map(&self) -> TerrainMap {
        let mw = self.width.div_ceil(2);
        let mh = self.height.div_ceil(2);
        let mut mini = TerrainMap::new(mw, mh);
        for my in 0..mh {
            for mx in 0..mw {
                let mut all_land = true;
                for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                    let p = Point::new((2 * mx + dx) as i32, (2 * my + dy) as i32);
                    if let Some(t) = self.tile_at(p) {
                        all_land &= self.is_land(t);
                    }
                }
                mini.set_land(my * mw + mx, all_land);
            }
        }
        log::debug!(
            "derived {}x{} mini-map from {}x{} map",
            mw,
            mh,
            self.width,
            self.height
        );
        mini
    }
}

impl GameMap for TerrainMap {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_land(&self, t: TileRef) -> bool {
        self.terrain[t as usize] & LAND != 0
    }

    #[inline]
    fn owner(&self, t: TileRef) -> Option<PlayerId> {
        self.owners[t as usize]
    }

    #[inline]
    fn has_rail(&self, t: TileRef) -> bool {
        self.terrain[t as usize] & RAIL != 0
    }
}

/// Errors that can occur when building a [`TerrainMap`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The picture contained no rows.
    Empty,
    /// A row's width differs from the first row's.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the accepted set.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no rows"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(f, "map: row {row} is {found} tiles wide, expected {expected}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid tile \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}
