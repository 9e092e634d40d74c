//! Keypoint + step-cost path compression shared by the smoothing stage and
//! the client-side sampler.

use crate::map::TileRef;

/// A lossily-compressed path: sparse keypoints plus the number of simulation
/// steps spent on the segment leading into each keypoint after the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentPlan {
    points: Vec<TileRef>,
    segment_steps: Vec<u32>,
}

impl SegmentPlan {
    /// Build a plan from keypoints and per-segment step counts.
    ///
    /// `segment_steps` is truncated or padded to `points.len() - 1` entries and
    /// every entry is raised to at least 1, so interpolation never divides by
    /// zero.
    pub fn new(points: Vec<TileRef>, mut segment_steps: Vec<u32>) -> Self {
        let segments = points.len().saturating_sub(1);
        segment_steps.resize(segments, 1);
        for s in &mut segment_steps {
            *s = (*s).max(1);
        }
        Self {
            points,
            segment_steps,
        }
    }

    /// A plan where every keypoint is one step from the previous one.
    pub fn unit_steps(points: Vec<TileRef>) -> Self {
        let segments = points.len().saturating_sub(1);
        Self::new(points, vec![1; segments])
    }

    #[inline]
    pub fn points(&self) -> &[TileRef] {
        &self.points
    }

    #[inline]
    pub fn segment_steps(&self) -> &[u32] {
        &self.segment_steps
    }

    /// Running sum of segment steps, one entry per keypoint, starting at 0.
    pub fn seg_cum_steps(&self) -> Vec<u64> {
        let mut cum = Vec::with_capacity(self.points.len());
        if self.points.is_empty() {
            return cum;
        }
        let mut acc = 0u64;
        cum.push(acc);
        for &s in &self.segment_steps {
            acc += u64::from(s);
            cum.push(acc);
        }
        cum
    }

    /// Total number of steps covered by the plan.
    pub fn total_steps(&self) -> u64 {
        self.segment_steps.iter().map(|&s| u64::from(s)).sum()
    }

    pub fn into_parts(self) -> (Vec<TileRef>, Vec<u32>) {
        (self.points, self.segment_steps)
    }
}
