//! Both ends of plan replication: the simulation-side recorder that stamps
//! and batches records, and the client-side book that keeps the newest
//! record per mover.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::codec::{Unpacked, pack};
use crate::record::MotionPlanRecord;

/// Receiver of freshly computed motion plans.
pub trait MotionSink {
    fn record_motion_plan(&mut self, record: MotionPlanRecord);
}

impl<S: MotionSink + ?Sized> MotionSink for &mut S {
    fn record_motion_plan(&mut self, record: MotionPlanRecord) {
        (**self).record_motion_plan(record)
    }
}

/// Simulation-side sink.
///
/// Every recorded plan is stamped with the next `plan_id` of its mover
/// (starting at 1), overriding whatever the caller set, then queued until the
/// end of the tick.
#[derive(Debug, Default)]
pub struct PlanRecorder {
    last_ids: BTreeMap<u32, u32>,
    pending: Vec<MotionPlanRecord>,
}

impl PlanRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last `plan_id` issued to `mover`.
    pub fn last_plan_id(&self, mover: u32) -> Option<u32> {
        self.last_ids.get(&mover).copied()
    }

    /// Records queued since the last drain, in recording order.
    pub fn pending(&self) -> &[MotionPlanRecord] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<MotionPlanRecord> {
        std::mem::take(&mut self.pending)
    }

    /// Drain the queue into one packed buffer.
    pub fn pack_tick(&mut self) -> Vec<u32> {
        let records = self.drain();
        log::trace!("packing {} motion plans", records.len());
        pack(&records)
    }

    /// Forget a mover, e.g. once its unit is gone. Its ids restart at 1.
    pub fn forget(&mut self, mover: u32) {
        self.last_ids.remove(&mover);
    }
}

impl MotionSink for PlanRecorder {
    fn record_motion_plan(&mut self, mut record: MotionPlanRecord) {
        let id = self.last_ids.entry(record.mover()).or_insert(0);
        *id = id.wrapping_add(1);
        record.set_plan_id(*id);
        self.pending.push(record);
    }
}

/// Client-side store of the live plan of every mover.
#[derive(Debug, Default)]
pub struct PlanBook {
    plans: BTreeMap<u32, MotionPlanRecord>,
}

impl PlanBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `record` unless the mover already has a plan with an equal or
    /// newer `plan_id`. Returns whether the record was accepted.
    pub fn apply(&mut self, record: MotionPlanRecord) -> bool {
        match self.plans.entry(record.mover()) {
            Entry::Vacant(e) => {
                e.insert(record);
                true
            }
            Entry::Occupied(mut e) => {
                if record.plan_id() <= e.get().plan_id() {
                    log::debug!(
                        "discarding stale plan {} for mover {} (live plan {})",
                        record.plan_id(),
                        record.mover(),
                        e.get().plan_id()
                    );
                    return false;
                }
                e.insert(record);
                true
            }
        }
    }

    /// Apply every decoded record in order; returns how many were accepted.
    pub fn apply_unpacked(&mut self, unpacked: Unpacked) -> usize {
        unpacked.records.into_iter().fold(0, |n, r| n + usize::from(self.apply(r)))
    }

    pub fn get(&self, mover: u32) -> Option<&MotionPlanRecord> {
        self.plans.get(&mover)
    }

    pub fn remove(&mut self, mover: u32) -> Option<MotionPlanRecord> {
        self.plans.remove(&mover)
    }

    /// Live plans in ascending mover order.
    pub fn iter(&self) -> impl Iterator<Item = &MotionPlanRecord> {
        self.plans.values()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::unpack;
    use crate::record::{GridPathPlan, TrainRailPathPlan};

    fn grid(unit_id: u32, path: Vec<u32>) -> MotionPlanRecord {
        MotionPlanRecord::Grid(GridPathPlan {
            unit_id,
            plan_id: 0,
            start_tick: 0,
            ticks_per_step: 1,
            path,
        })
    }

    #[test]
    fn plan_ids_increase_per_mover() {
        let mut rec = PlanRecorder::new();
        rec.record_motion_plan(grid(1, vec![1, 2]));
        rec.record_motion_plan(grid(2, vec![3]));
        rec.record_motion_plan(grid(1, vec![2, 3]));
        let ids: Vec<(u32, u32)> = rec.pending().iter().map(|r| (r.mover(), r.plan_id())).collect();
        assert_eq!(ids, vec![(1, 1), (2, 1), (1, 2)]);
        assert_eq!(rec.last_plan_id(1), Some(2));
        rec.forget(1);
        assert_eq!(rec.last_plan_id(1), None);
    }

    #[test]
    fn pack_tick_drains() {
        let mut rec = PlanRecorder::new();
        rec.record_motion_plan(grid(4, vec![7]));
        let words = rec.pack_tick();
        assert!(rec.pending().is_empty());
        let out = unpack(&words);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].plan_id(), 1);
        assert_eq!(unpack(&rec.pack_tick()).records, vec![]);
    }

    #[test]
    fn book_discards_stale_plans() {
        fn emit(mut sink: impl MotionSink, path: Vec<u32>) {
            sink.record_motion_plan(grid(1, path));
        }

        let mut rec = PlanRecorder::new();
        emit(&mut rec, vec![1]);
        emit(&mut rec, vec![2]);
        let mut records = rec.drain();
        let newer = records.pop().unwrap();
        let older = records.pop().unwrap();

        let mut book = PlanBook::new();
        assert!(book.apply(newer.clone()));
        // Late arrival of the superseded plan.
        assert!(!book.apply(older));
        assert!(!book.apply(newer));
        assert_eq!(book.get(1).map(|r| r.path()), Some(&[2][..]));
    }

    #[test]
    fn book_tracks_trains_by_engine() {
        let mut rec = PlanRecorder::new();
        rec.record_motion_plan(grid(1, vec![1]));
        rec.record_motion_plan(MotionPlanRecord::Train(TrainRailPathPlan {
            engine_unit_id: 9,
            car_unit_ids: vec![10],
            plan_id: 0,
            start_tick: 0,
            speed: 1,
            spacing: 1,
            path: vec![5, 6],
        }));
        let mut book = PlanBook::new();
        assert_eq!(book.apply_unpacked(unpack(&rec.pack_tick())), 2);
        let movers: Vec<u32> = book.iter().map(|r| r.mover()).collect();
        assert_eq!(movers, vec![1, 9]);
        assert!(book.remove(9).is_some());
        assert_eq!(book.len(), 1);
    }
}
