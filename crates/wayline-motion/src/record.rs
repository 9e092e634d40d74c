//! Motion plan records: the compact, immutable description of one mover's
//! route that the simulation emits and renderers replay.

use wayline_core::TileRef;

/// Record kind of [`GridPathPlan`] on the wire.
pub const KIND_GRID: u32 = 1;
/// Record kind of [`TrainRailPathPlan`] on the wire.
pub const KIND_TRAIN: u32 = 2;

/// A single mover following `path` at a constant `ticks_per_step`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPathPlan {
    pub unit_id: u32,
    pub plan_id: u32,
    pub start_tick: u32,
    pub ticks_per_step: u32,
    pub path: Vec<TileRef>,
}

impl GridPathPlan {
    /// Words after `[kind, word_count]`: five header fields, then the path.
    pub const FIXED_WORDS: usize = 5;

    pub fn word_count(&self) -> usize {
        Self::FIXED_WORDS + self.path.len()
    }
}

/// A rail path shared by an engine and the cars trailing it at `spacing`
/// steps apart.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainRailPathPlan {
    pub engine_unit_id: u32,
    pub car_unit_ids: Vec<u32>,
    pub plan_id: u32,
    pub start_tick: u32,
    /// Path steps per tick.
    pub speed: u32,
    pub spacing: u32,
    pub path: Vec<TileRef>,
}

impl TrainRailPathPlan {
    /// Words after `[kind, word_count]`: seven header fields, then the cars
    /// and the path.
    pub const FIXED_WORDS: usize = 7;

    pub fn word_count(&self) -> usize {
        Self::FIXED_WORDS + self.car_unit_ids.len() + self.path.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionPlanRecord {
    Grid(GridPathPlan),
    Train(TrainRailPathPlan),
}

impl MotionPlanRecord {
    pub fn kind(&self) -> u32 {
        match self {
            Self::Grid(_) => KIND_GRID,
            Self::Train(_) => KIND_TRAIN,
        }
    }

    /// Unit whose plan this is: the mover, or the engine of a train.
    pub fn mover(&self) -> u32 {
        match self {
            Self::Grid(p) => p.unit_id,
            Self::Train(p) => p.engine_unit_id,
        }
    }

    pub fn plan_id(&self) -> u32 {
        match self {
            Self::Grid(p) => p.plan_id,
            Self::Train(p) => p.plan_id,
        }
    }

    pub(crate) fn set_plan_id(&mut self, id: u32) {
        match self {
            Self::Grid(p) => p.plan_id = id,
            Self::Train(p) => p.plan_id = id,
        }
    }

    pub fn start_tick(&self) -> u32 {
        match self {
            Self::Grid(p) => p.start_tick,
            Self::Train(p) => p.start_tick,
        }
    }

    pub fn path(&self) -> &[TileRef] {
        match self {
            Self::Grid(p) => &p.path,
            Self::Train(p) => &p.path,
        }
    }

    /// Number of words following `[kind, word_count]` on the wire.
    pub fn word_count(&self) -> usize {
        match self {
            Self::Grid(p) => p.word_count(),
            Self::Train(p) => p.word_count(),
        }
    }
}

impl From<GridPathPlan> for MotionPlanRecord {
    fn from(p: GridPathPlan) -> Self {
        Self::Grid(p)
    }
}

impl From<TrainRailPathPlan> for MotionPlanRecord {
    fn from(p: TrainRailPathPlan) -> Self {
        Self::Train(p)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn record_json_round_trip() {
        let rec = MotionPlanRecord::Train(TrainRailPathPlan {
            engine_unit_id: 7,
            car_unit_ids: vec![8, 9],
            plan_id: 2,
            start_tick: 100,
            speed: 1,
            spacing: 2,
            path: vec![1, 2, 3],
        });
        let json = serde_json::to_string(&rec).unwrap();
        let back: MotionPlanRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}
