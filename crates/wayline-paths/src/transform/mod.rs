//! Pipeline transformers. Each wraps an inner [`PathFinder`](crate::PathFinder)
//! and exposes the same contract, so stages compose in any order.

mod guard;
mod mini;
mod shore;
mod smooth;

pub use guard::ComponentGuard;
pub use mini::MiniMapped;
pub use shore::ShoreCoercion;
pub(crate) use shore::coerce_to_water;
pub use smooth::{Smoothed, smooth_path, water_or_shoreline};
