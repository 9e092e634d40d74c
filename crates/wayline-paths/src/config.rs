//! Tuning knobs for the search pipelines and spatial queries.

/// Search configuration shared by the pipeline constructors and
/// [`ShoreQuery`](crate::ShoreQuery).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Extra cost for entering water that touches land.
    pub shore_penalty: u32,
    /// How many leading path steps the shore refinement pass examines.
    pub refine_steps: usize,
    /// Largest window area (in tiles) the refinement search may cover.
    pub refine_max_area: usize,
    /// Padding added around the refinement bounding box.
    pub refine_padding: i32,
    /// Full searches a stepper may start per tick; 0 means unlimited.
    pub searches_per_tick: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shore_penalty: 0,
            refine_steps: 300,
            refine_max_area: 128 * 128,
            refine_padding: 8,
            searches_per_tick: 0,
        }
    }
}
