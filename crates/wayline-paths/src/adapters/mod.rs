//! Concrete search adapters: one generic A* serves every movement domain.

mod air;
mod bounded;
mod rail;
mod station;
mod water;

pub use air::AirAdapter;
pub use bounded::{BoundedWaterAdapter, BoundedWaterFinder};
pub use rail::RailAdapter;
pub use station::StationGraph;
pub use water::WaterAdapter;
