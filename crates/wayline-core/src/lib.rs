//! **wayline-core**: shared types for grid pathfinding and motion replication.
//!
//! This crate provides geometry primitives, the read-only map interfaces the
//! search layer consumes ([`GameMap`], [`ComponentLookup`]), an in-memory
//! [`TerrainMap`], line rasterisation and the [`SegmentPlan`] path
//! compression used on both sides of the wire.

pub mod geom;
pub mod map;
pub mod raster;
pub mod segment;
pub mod terrain;

pub use geom::{Point, Range};
pub use map::{ComponentLookup, GameMap, PlayerId, TileRef};
pub use segment::SegmentPlan;
pub use terrain::{MapError, TerrainMap};
