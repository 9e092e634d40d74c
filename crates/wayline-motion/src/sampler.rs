//! Client-side reconstruction of positions from motion plan records.
//!
//! Sampling is a pure function of the record and a fractional tick, so a
//! renderer can call it every frame without any simulation state.

use wayline_core::{SegmentPlan, TileRef};

use crate::record::{GridPathPlan, TrainRailPathPlan};

/// Interpolated position at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub is_complete: bool,
    /// Keypoint the mover is leaving.
    pub tile0: TileRef,
    /// Keypoint the mover is heading to.
    pub tile1: TileRef,
}

/// A segment plan anchored in time.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMotion {
    plan: SegmentPlan,
    cum: Vec<u64>,
    width: u32,
    start_tick: f64,
    ticks_per_step: f64,
}

impl SegmentMotion {
    /// `width` is the map width used to turn tiles into coordinates.
    /// A `ticks_per_step` of 0 is treated as 1.
    pub fn new(plan: SegmentPlan, width: u32, start_tick: u32, ticks_per_step: u32) -> Self {
        let cum = plan.seg_cum_steps();
        Self {
            plan,
            cum,
            width: width.max(1),
            start_tick: f64::from(start_tick),
            ticks_per_step: f64::from(ticks_per_step.max(1)),
        }
    }

    /// Motion for a decoded grid record. Each segment costs its Manhattan
    /// length in steps (at least one).
    pub fn from_grid_plan(record: &GridPathPlan, width: u32) -> Self {
        let w = width.max(1);
        let steps = record
            .path
            .windows(2)
            .map(|s| {
                let (ax, ay) = (s[0] % w, s[0] / w);
                let (bx, by) = (s[1] % w, s[1] / w);
                (ax.abs_diff(bx) + ay.abs_diff(by)).max(1)
            })
            .collect();
        let plan = SegmentPlan::new(record.path.clone(), steps);
        Self::new(plan, width, record.start_tick, record.ticks_per_step)
    }

    pub fn plan(&self) -> &SegmentPlan {
        &self.plan
    }

    pub fn total_steps(&self) -> u64 {
        self.cum.last().copied().unwrap_or(0)
    }

    /// First tick at which the motion is complete.
    pub fn end_tick(&self) -> f64 {
        self.start_tick + self.total_steps() as f64 * self.ticks_per_step
    }

    /// Position at fractional tick `t`.
    pub fn sample(&self, t: f64) -> Sample {
        self.sample_step((t - self.start_tick) / self.ticks_per_step)
    }

    /// Position after `step` steps along the plan.
    pub fn sample_step(&self, step: f64) -> Sample {
        let points = self.plan.points();
        match points {
            [] => {
                return Sample {
                    is_complete: true,
                    ..Sample::default()
                };
            }
            [only] => return self.at(*only, true),
            _ => {}
        }
        if step <= 0.0 || step.is_nan() {
            return self.at(points[0], false);
        }
        if step >= self.total_steps() as f64 {
            return self.at(points[points.len() - 1], true);
        }

        // cum[0] == 0 < step < total, so the segment is in range.
        let seg = self.cum.partition_point(|&c| c as f64 <= step) - 1;
        let (c0, c1) = (self.cum[seg] as f64, self.cum[seg + 1] as f64);
        let u = ((step - c0) / (c1 - c0)).clamp(0.0, 1.0);
        let (a, b) = (points[seg], points[seg + 1]);
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        Sample {
            x: ax + (bx - ax) * u,
            y: ay + (by - ay) * u,
            is_complete: false,
            tile0: a,
            tile1: b,
        }
    }

    fn coords(&self, t: TileRef) -> (f64, f64) {
        (f64::from(t % self.width), f64::from(t / self.width))
    }

    fn at(&self, t: TileRef, is_complete: bool) -> Sample {
        let (x, y) = self.coords(t);
        Sample {
            x,
            y,
            is_complete,
            tile0: t,
            tile1: t,
        }
    }
}

/// Motion of a train: an engine and its cars sharing one rail path.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainMotion {
    record: TrainRailPathPlan,
    track: SegmentMotion,
}

impl TrainMotion {
    pub fn new(record: TrainRailPathPlan, width: u32) -> Self {
        let track = SegmentMotion::new(SegmentPlan::unit_steps(record.path.clone()), width, 0, 1);
        Self { record, track }
    }

    pub fn record(&self) -> &TrainRailPathPlan {
        &self.record
    }

    /// Steps travelled by the engine at tick `t`.
    pub fn engine_step(&self, t: f64) -> f64 {
        ((t - f64::from(self.record.start_tick)) * f64::from(self.record.speed)).max(0.0)
    }

    pub fn sample_engine(&self, t: f64) -> Sample {
        self.track.sample_step(self.engine_step(t))
    }

    /// Position of car `index`, `None` if the train has no such car.
    pub fn sample_car(&self, index: usize, t: f64) -> Option<Sample> {
        if index >= self.record.car_unit_ids.len() {
            return None;
        }
        let lag = f64::from(self.record.spacing) * (index + 1) as f64;
        Some(self.track.sample_step((self.engine_step(t) - lag).max(0.0)))
    }

    /// Engine then cars, each with its unit id.
    pub fn sample_all(&self, t: f64) -> Vec<(u32, Sample)> {
        let mut out = Vec::with_capacity(self.record.car_unit_ids.len() + 1);
        out.push((self.record.engine_unit_id, self.sample_engine(t)));
        for (i, &unit) in self.record.car_unit_ids.iter().enumerate() {
            if let Some(s) = self.sample_car(i, t) {
                out.push((unit, s));
            }
        }
        out
    }

    /// Whether the engine and every car have arrived.
    pub fn is_complete(&self, t: f64) -> bool {
        match self.record.car_unit_ids.len() {
            0 => self.sample_engine(t).is_complete,
            n => self.sample_car(n - 1, t).is_some_and(|s| s.is_complete),
        }
    }
}
