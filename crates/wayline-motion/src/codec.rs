//! Versioned word codec for motion plan records.
//!
//! Layout, all words `u32`:
//!
//! ```text
//! [schema_version, record_count, record...]
//! record = [kind, word_count, fields...]
//! kind 1 (grid):  unit_id, plan_id, start_tick, ticks_per_step, path_len, path[path_len]
//! kind 2 (train): engine_unit_id, plan_id, start_tick, speed, spacing, car_count, path_len,
//!                 car_unit_ids[car_count], path[path_len]
//! ```
//!
//! `word_count` is the exact number of words after it, so a decoder can step
//! over kinds it does not know. Every read is bounds-checked; decoding stops
//! at the first malformed record and keeps what was decoded before it.

use std::fmt;

use crate::record::{GridPathPlan, KIND_GRID, KIND_TRAIN, MotionPlanRecord, TrainRailPathPlan};

/// Version word written at the head of every buffer.
pub const SCHEMA_VERSION: u32 = 1;

const HEADER_WORDS: usize = 2;

/// Encode `records` into a fresh word buffer.
pub fn pack(records: &[MotionPlanRecord]) -> Vec<u32> {
    let total = HEADER_WORDS + records.iter().map(|r| 2 + r.word_count()).sum::<usize>();
    let mut buf = Vec::with_capacity(total);
    buf.push(SCHEMA_VERSION);
    buf.push(records.len() as u32);
    for rec in records {
        buf.push(rec.kind());
        buf.push(rec.word_count() as u32);
        match rec {
            MotionPlanRecord::Grid(p) => {
                buf.extend([p.unit_id, p.plan_id, p.start_tick, p.ticks_per_step, p.path.len() as u32]);
                buf.extend_from_slice(&p.path);
            }
            MotionPlanRecord::Train(p) => {
                buf.extend([
                    p.engine_unit_id,
                    p.plan_id,
                    p.start_tick,
                    p.speed,
                    p.spacing,
                    p.car_unit_ids.len() as u32,
                    p.path.len() as u32,
                ]);
                buf.extend_from_slice(&p.car_unit_ids);
                buf.extend_from_slice(&p.path);
            }
        }
    }
    debug_assert_eq!(buf.len(), total);
    buf
}

/// [`pack`] followed by little-endian serialisation.
pub fn pack_bytes(records: &[MotionPlanRecord]) -> Vec<u8> {
    pack(records).into_iter().flat_map(u32::to_le_bytes).collect()
}

/// Result of decoding a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unpacked {
    /// The leading version word, `None` if the buffer had no header.
    pub schema_version: Option<u32>,
    /// Records decoded before the end of the buffer or the first error.
    pub records: Vec<MotionPlanRecord>,
    /// Records of unknown kind that were stepped over.
    pub skipped: usize,
    /// Why decoding ended early, if it did.
    pub stopped: Option<DecodeError>,
}

impl Unpacked {
    /// Whether every announced record was read.
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none()
    }
}

/// Reasons for stopping a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer than the two header words.
    MissingHeader { len: usize },
    /// A schema version no encoder writes.
    UnsupportedVersion(u32),
    /// Record `index` runs past the end of the buffer.
    Truncated { index: usize, needed: usize, len: usize },
    /// Record `index` declares a `word_count` that disagrees with its own
    /// array lengths.
    WordCountMismatch {
        index: usize,
        kind: u32,
        stored: usize,
        expected: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader { len } => write!(f, "motion buffer: {len} words is too short for a header"),
            Self::UnsupportedVersion(v) => write!(f, "motion buffer: unsupported schema version {v}"),
            Self::Truncated { index, needed, len } => {
                write!(f, "motion record {index}: needs {needed} words, buffer has {len}")
            }
            Self::WordCountMismatch {
                index,
                kind,
                stored,
                expected,
            } => write!(
                f,
                "motion record {index} (kind {kind}): word count {stored}, fields require {expected}"
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode a word buffer produced by [`pack`], possibly by a newer encoder.
pub fn unpack(words: &[u32]) -> Unpacked {
    let mut out = Unpacked::default();
    let &[version, count, ..] = words else {
        return out.stop(DecodeError::MissingHeader { len: words.len() });
    };
    out.schema_version = Some(version);
    if version == 0 {
        return out.stop(DecodeError::UnsupportedVersion(version));
    }
    if version > SCHEMA_VERSION {
        log::debug!("decoding schema version {version} with a version {SCHEMA_VERSION} reader");
    }

    let count = count as usize;
    // Every record takes at least two words.
    out.records.reserve(count.min((words.len() - HEADER_WORDS) / 2));
    let mut offset = HEADER_WORDS;
    for index in 0..count {
        let start = offset + 2;
        if start > words.len() {
            return out.stop(DecodeError::Truncated {
                index,
                needed: start,
                len: words.len(),
            });
        }
        let kind = words[offset];
        let word_count = words[offset + 1] as usize;
        let end = start.saturating_add(word_count);
        let Some(body) = words.get(start..end) else {
            return out.stop(DecodeError::Truncated {
                index,
                needed: end,
                len: words.len(),
            });
        };
        let decoded = match kind {
            KIND_GRID => decode_grid(index, body).map(MotionPlanRecord::Grid),
            KIND_TRAIN => decode_train(index, body).map(MotionPlanRecord::Train),
            _ => {
                log::trace!("skipping motion record {index} of unknown kind {kind}");
                out.skipped += 1;
                offset = end;
                continue;
            }
        };
        match decoded {
            Ok(rec) => out.records.push(rec),
            Err(e) => return out.stop(e),
        }
        offset = end;
    }
    out
}

/// Little-endian counterpart of [`unpack`]. A trailing partial word is
/// ignored.
pub fn unpack_bytes(bytes: &[u8]) -> Unpacked {
    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    unpack(&words)
}

impl Unpacked {
    fn stop(mut self, err: DecodeError) -> Self {
        log::warn!("{err}; keeping {} decoded records", self.records.len());
        self.stopped = Some(err);
        self
    }
}

fn mismatch(index: usize, kind: u32, body: &[u32], expected: usize) -> DecodeError {
    DecodeError::WordCountMismatch {
        index,
        kind,
        stored: body.len(),
        expected,
    }
}

fn decode_grid(index: usize, body: &[u32]) -> Result<GridPathPlan, DecodeError> {
    const FIXED: usize = GridPathPlan::FIXED_WORDS;
    if body.len() < FIXED {
        return Err(mismatch(index, KIND_GRID, body, FIXED));
    }
    let expected = FIXED.saturating_add(body[4] as usize);
    if expected != body.len() {
        return Err(mismatch(index, KIND_GRID, body, expected));
    }
    Ok(GridPathPlan {
        unit_id: body[0],
        plan_id: body[1],
        start_tick: body[2],
        ticks_per_step: body[3],
        path: body[FIXED..].to_vec(),
    })
}

fn decode_train(index: usize, body: &[u32]) -> Result<TrainRailPathPlan, DecodeError> {
    const FIXED: usize = TrainRailPathPlan::FIXED_WORDS;
    if body.len() < FIXED {
        return Err(mismatch(index, KIND_TRAIN, body, FIXED));
    }
    let cars = body[5] as usize;
    let expected = FIXED.saturating_add(cars).saturating_add(body[6] as usize);
    if expected != body.len() {
        return Err(mismatch(index, KIND_TRAIN, body, expected));
    }
    Ok(TrainRailPathPlan {
        engine_unit_id: body[0],
        plan_id: body[1],
        start_tick: body[2],
        speed: body[3],
        spacing: body[4],
        car_unit_ids: body[FIXED..FIXED + cars].to_vec(),
        path: body[FIXED + cars..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;

    fn grid(unit_id: u32, path: Vec<u32>) -> MotionPlanRecord {
        MotionPlanRecord::Grid(GridPathPlan {
            unit_id,
            plan_id: 1,
            start_tick: 40,
            ticks_per_step: 2,
            path,
        })
    }

    fn train(engine_unit_id: u32, car_unit_ids: Vec<u32>, path: Vec<u32>) -> MotionPlanRecord {
        MotionPlanRecord::Train(TrainRailPathPlan {
            engine_unit_id,
            car_unit_ids,
            plan_id: 5,
            start_tick: 12,
            speed: 1,
            spacing: 2,
            path,
        })
    }

    fn random_records(rng: &mut StdRng) -> Vec<MotionPlanRecord> {
        let n = rng.random_range(0..8);
        (0..n)
            .map(|_| {
                let path: Vec<u32> = (0..rng.random_range(0..20)).map(|_| rng.random()).collect();
                if rng.random_bool(0.5) {
                    MotionPlanRecord::Grid(GridPathPlan {
                        unit_id: rng.random(),
                        plan_id: rng.random(),
                        start_tick: rng.random(),
                        ticks_per_step: rng.random_range(1..10),
                        path,
                    })
                } else {
                    MotionPlanRecord::Train(TrainRailPathPlan {
                        engine_unit_id: rng.random(),
                        car_unit_ids: (0..rng.random_range(0..5)).map(|_| rng.random()).collect(),
                        plan_id: rng.random(),
                        start_tick: rng.random(),
                        speed: rng.random_range(1..4),
                        spacing: rng.random_range(0..4),
                        path,
                    })
                }
            })
            .collect()
    }

    #[test]
    fn layout() {
        let words = pack(&[grid(3, vec![10, 22]), train(4, vec![5], vec![7])]);
        assert_eq!(
            words,
            vec![
                SCHEMA_VERSION, 2, //
                KIND_GRID, 7, 3, 1, 40, 2, 2, 10, 22, //
                KIND_TRAIN, 9, 4, 5, 12, 1, 2, 1, 1, 5, 7,
            ]
        );
    }

    #[test]
    fn round_trip_edge_cases() {
        for records in [
            vec![],
            vec![grid(1, vec![])],
            vec![train(2, vec![], vec![])],
            vec![train(2, vec![], vec![3, 4]), grid(1, vec![9])],
        ] {
            let out = unpack(&pack(&records));
            assert_eq!(out.schema_version, Some(SCHEMA_VERSION));
            assert!(out.is_complete());
            assert_eq!(out.records, records);
        }
    }

    #[test]
    fn round_trip_random() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let records = random_records(&mut rng);
            let out = unpack_bytes(&pack_bytes(&records));
            assert_eq!(out.records, records);
            assert_eq!(out.schema_version, Some(SCHEMA_VERSION));
            assert_eq!(out.skipped, 0);
        }
    }

    #[test]
    fn unknown_kind_is_skipped() {
        let known = grid(8, vec![1, 2, 3]);
        let tail = pack(std::slice::from_ref(&known));
        let mut words = vec![SCHEMA_VERSION, 2, 99, 3, 0xdead, 0xbeef, 0xf00d];
        words.extend_from_slice(&tail[HEADER_WORDS..]);
        let out = unpack(&words);
        assert_eq!(out.records, vec![known]);
        assert_eq!(out.skipped, 1);
        assert!(out.is_complete());
    }

    #[test]
    fn newer_schema_still_decodes() {
        let mut words = pack(&[grid(1, vec![5])]);
        words[0] = SCHEMA_VERSION + 1;
        let out = unpack(&words);
        assert_eq!(out.schema_version, Some(SCHEMA_VERSION + 1));
        assert_eq!(out.records.len(), 1);
    }

    #[test]
    fn truncation_yields_prefix() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let records = random_records(&mut rng);
            let bytes = pack_bytes(&records);
            for n in 0..=bytes.len() {
                let out = unpack_bytes(&bytes[..n]);
                assert!(records.starts_with(&out.records), "cut at {n}");
                if n < bytes.len() - bytes.len() % 4 {
                    assert!(!out.is_complete(), "cut at {n}");
                }
            }
        }
    }

    #[test]
    fn word_count_mismatch_stops() {
        let mut words = pack(&[grid(1, vec![5, 6]), grid(2, vec![7])]);
        // Second record claims one path entry too many.
        let second = HEADER_WORDS + 2 + 7;
        words[second + 2 + 4] = 2;
        let out = unpack(&words);
        assert_eq!(out.records, vec![grid(1, vec![5, 6])]);
        assert_eq!(
            out.stopped,
            Some(DecodeError::WordCountMismatch {
                index: 1,
                kind: KIND_GRID,
                stored: 6,
                expected: 7,
            })
        );
    }

    #[test]
    fn bad_headers() {
        assert_eq!(unpack(&[1]).stopped, Some(DecodeError::MissingHeader { len: 1 }));
        assert_eq!(unpack(&[0, 0]).stopped, Some(DecodeError::UnsupportedVersion(0)));
        // Count larger than the buffer.
        let out = unpack(&[SCHEMA_VERSION, u32::MAX]);
        assert!(out.records.is_empty());
        assert!(matches!(out.stopped, Some(DecodeError::Truncated { index: 0, .. })));
    }

    #[test]
    fn short_train_body() {
        let out = unpack(&[SCHEMA_VERSION, 1, KIND_TRAIN, 3, 1, 2, 3]);
        assert!(matches!(
            out.stopped,
            Some(DecodeError::WordCountMismatch { stored: 3, expected: 7, .. })
        ));
        assert!(out.stopped.is_some_and(|e| e.to_string().contains("kind 2")));
    }
}
