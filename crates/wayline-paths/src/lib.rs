//! Composable pathfinding pipelines for tick-driven simulations.
//!
//! The crate is built around one contract, [`PathFinder`]: given one or more
//! source tiles and a target, return the node sequence from the chosen source
//! to the target, or `None`. Everything else either implements it or wraps
//! it:
//!
//! - **A\*** core search ([`SearchSpace::astar_path`], [`AstarFinder`]) over
//!   pluggable graph adapters ([`WaterAdapter`], [`RailAdapter`],
//!   [`StationGraph`], [`AirAdapter`], [`BoundedWaterAdapter`])
//! - **Transformers** stacked around a finder: [`MiniMapped`],
//!   [`ComponentGuard`], [`ShoreCoercion`], [`Smoothed`]
//! - **Stepping** for per-tick movement ([`Stepper`], [`SearchBudget`])
//! - **Connected components** of water ([`WaterComponents`])
//! - **Shore queries** ([`closest_shore`], [`ShoreQuery`])
//!
//! [`SearchSpace`] owns and reuses all scratch memory, so repeated queries
//! incur no allocations after warm-up. Searches are single-threaded and fully
//! deterministic: ties between equal-cost frontier nodes are broken by node
//! id, never by insertion order.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | connected components |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//! | [`PathFinder`] | pipelines and stepping |

mod adapters;
mod astar;
mod builder;
mod cc;
mod config;
mod finder;
mod space;
mod spatial;
mod stepper;
mod traits;
mod transform;

pub use adapters::{AirAdapter, BoundedWaterAdapter, BoundedWaterFinder, RailAdapter, StationGraph, WaterAdapter};
pub use builder::{
    PipelineBuilder, WaterPathFinder, air_path_finder, rail_path_finder, station_path_finder, water_path_finder,
};
pub use cc::WaterComponents;
pub use config::SearchConfig;
pub use finder::AstarFinder;
pub use space::SearchSpace;
pub use spatial::{ShoreQuery, closest_shore};
pub use stepper::{SearchBudget, Step, StepStatus, Stepper};
pub use traits::{AstarPather, NodeId, PathFinder, Pather, WeightedPather};
pub use transform::{ComponentGuard, MiniMapped, ShoreCoercion, Smoothed, smooth_path, water_or_shoreline};
