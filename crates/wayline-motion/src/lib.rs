//! Motion plan replication.
//!
//! The simulation records one immutable [`MotionPlanRecord`] per path
//! (re)computation, packs a tick's worth of them into a versioned word
//! buffer ([`pack`]) and ships it to renderers, which decode it ([`unpack`]),
//! keep the newest plan per mover ([`PlanBook`]) and sample positions every
//! frame ([`SegmentMotion`], [`TrainMotion`]) from the record alone.
//!
//! The wire format is forward-compatible: each record carries its own word
//! count, so decoders step over record kinds they do not understand.

mod codec;
mod record;
mod recorder;
mod sampler;

pub use codec::{DecodeError, SCHEMA_VERSION, Unpacked, pack, pack_bytes, unpack, unpack_bytes};
pub use record::{GridPathPlan, KIND_GRID, KIND_TRAIN, MotionPlanRecord, TrainRailPathPlan};
pub use recorder::{MotionSink, PlanBook, PlanRecorder};
pub use sampler::{Sample, SegmentMotion, TrainMotion};
