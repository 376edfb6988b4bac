//! Tempo map and time-weighted tempo statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MPQ: u32 = 500_000;
pub const DEFAULT_BPM: f64 = 120.0;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoEntry {
    /// Microseconds per quarter note.
    pub mpq: u32,
    pub bpm: f64,
}

impl TempoEntry {
    pub fn from_mpq(mpq: u32) -> Self {
        Self {
            mpq,
            bpm: MICROS_PER_MINUTE / mpq as f64,
        }
    }
}

/// Tick-keyed tempo changes. Append-only during analysis; the default tempo
/// (120 BPM / 500000 µs) applies from tick 0 until the first entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TempoMap {
    entries: BTreeMap<u64, TempoEntry>,
}

impl TempoMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tempo change. A later message at the same tick wins, which
    /// matches last-writer semantics of a real sequencer.
    pub fn record(&mut self, tick: u64, mpq: u32) {
        self.entries.insert(tick, TempoEntry::from_mpq(mpq));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Tempo in effect at `tick` (default before the first entry).
    pub fn tempo_at(&self, tick: u64) -> TempoEntry {
        self.entries
            .range(..=tick)
            .next_back()
            .map(|(_, e)| *e)
            .unwrap_or_else(|| TempoEntry::from_mpq(DEFAULT_MPQ))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &TempoEntry)> {
        self.entries.iter().map(|(t, e)| (*t, e))
    }

    /// Time-weighted statistics over `[0, total_ticks)`.
    ///
    /// Segments are delimited by the map keys; the default tempo fills the
    /// gap before the first key so every tick is weighted exactly once.
    /// Min/max only track observed entries; with an empty map they equal the
    /// default.
    pub fn stats(&self, total_ticks: u64) -> TempoStats {
        let default = TempoEntry::from_mpq(DEFAULT_MPQ);

        if self.entries.is_empty() {
            return TempoStats {
                mean_bpm: default.bpm,
                mean_mpq: default.mpq as f64,
                min_bpm: default.bpm,
                max_bpm: default.bpm,
                changes: 0,
            };
        }

        let mut min_bpm = f64::INFINITY;
        let mut max_bpm = f64::NEG_INFINITY;
        for entry in self.entries.values() {
            min_bpm = min_bpm.min(entry.bpm);
            max_bpm = max_bpm.max(entry.bpm);
        }

        // Zero-length sequence: nothing to weight, report the last change.
        if total_ticks == 0 {
            let last = *self
                .entries
                .values()
                .next_back()
                .expect("map checked non-empty");
            return TempoStats {
                mean_bpm: last.bpm,
                mean_mpq: last.mpq as f64,
                min_bpm,
                max_bpm,
                changes: self.entries.len(),
            };
        }

        let mut weighted_bpm = 0.0;
        let mut weighted_mpq = 0.0;
        let mut segment_start = 0u64;
        let mut current = default;

        for (&tick, entry) in &self.entries {
            let boundary = tick.min(total_ticks);
            if boundary > segment_start {
                let span = (boundary - segment_start) as f64;
                weighted_bpm += span * current.bpm;
                weighted_mpq += span * current.mpq as f64;
                segment_start = boundary;
            }
            current = *entry;
        }
        if total_ticks > segment_start {
            let span = (total_ticks - segment_start) as f64;
            weighted_bpm += span * current.bpm;
            weighted_mpq += span * current.mpq as f64;
        }

        TempoStats {
            mean_bpm: weighted_bpm / total_ticks as f64,
            mean_mpq: weighted_mpq / total_ticks as f64,
            min_bpm,
            max_bpm,
            changes: self.entries.len(),
        }
    }
}

/// Aggregate tempo statistics for a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoStats {
    /// Time-weighted mean BPM over the whole sequence.
    pub mean_bpm: f64,
    /// Time-weighted mean microseconds per quarter note.
    pub mean_mpq: f64,
    pub min_bpm: f64,
    pub max_bpm: f64,
    /// Number of recorded tempo changes.
    pub changes: usize,
}
