//! Single streaming pass over a sequence: tempo map, per-channel note and
//! program usage, and the RPN/NRPN selection history.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::message::MessageKind;
use crate::params::{ChannelParamHistory, CHANNELS};
use crate::sequence::Sequence;
use crate::tempo::{TempoMap, TempoStats};

/// Note and program usage on one channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelUsage {
    /// Note number -> count of sounding note-ons (velocity > 0).
    pub notes: BTreeMap<u8, u64>,
    /// Distinct program numbers selected on this channel.
    pub programs: BTreeSet<u8>,
}

impl ChannelUsage {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.programs.is_empty()
    }
}

/// Everything the analysis pass produces. Read-only once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tempo_map: TempoMap,
    pub tempo_stats: TempoStats,
    pub channels: Vec<ChannelUsage>,
    pub params: ChannelParamHistory,
    pub total_ticks: u64,
}

impl AnalysisResult {
    pub fn channel(&self, channel: u8) -> &ChannelUsage {
        &self.channels[channel as usize]
    }
}

/// Fold the whole sequence once, in track order and ascending tick order
/// within each track. Malformed individual messages degrade (the derived
/// value is skipped) but never abort the pass.
pub fn analyze(sequence: &Sequence) -> Result<AnalysisResult> {
    let mut tempo_map = TempoMap::new();
    let mut channels = vec![ChannelUsage::default(); CHANNELS];
    let mut params = ChannelParamHistory::new();
    let mut total_ticks = 0u64;

    for msg in sequence.messages() {
        total_ticks = total_ticks.max(msg.tick);
        let kind = MessageKind::from_raw(msg);

        if let Some(program) = kind.program_change() {
            let channel = kind.channel().expect("program change carries a channel");
            channels[channel as usize].programs.insert(program);
        }

        if let Some((note, _velocity)) = kind.sounding_note_on() {
            let channel = kind.channel().expect("note on carries a channel");
            *channels[channel as usize].notes.entry(note).or_insert(0) += 1;
        }

        if let MessageKind::Meta {
            meta_type: 0x51,
            ref data,
        } = kind
        {
            match kind.tempo_mpq() {
                Some(mpq) => tempo_map.record(msg.tick, mpq),
                None => {
                    debug!(
                        tick = msg.tick,
                        len = data.len(),
                        "skipping malformed tempo message"
                    );
                }
            }
        }

        if let Some((controller, value)) = kind.control_change() {
            let channel = kind.channel().expect("control change carries a channel");
            params.observe(channel, msg.tick, controller, value)?;
        }
    }

    let tempo_stats = tempo_map.stats(total_ticks);
    debug!(
        messages = sequence.message_count(),
        tempo_changes = tempo_map.len(),
        total_ticks,
        "sequence analysis complete"
    );

    Ok(AnalysisResult {
        tempo_map,
        tempo_stats,
        channels,
        params,
        total_ticks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamKind;
    use crate::sequence::SequenceBuilder;

    #[test]
    fn test_note_histogram_and_programs() {
        let seq = SequenceBuilder::new(480)
            .track()
            .message(0, &[0xC0, 5])
            .message(0, &[0x90, 60, 100])
            .message(10, &[0x90, 60, 80])
            .message(20, &[0x90, 60, 0]) // vel 0: not a sounding note-on
            .message(30, &[0x91, 64, 90])
            .build();

        let result = analyze(&seq).unwrap();
        assert_eq!(result.channel(0).notes.get(&60), Some(&2));
        assert_eq!(result.channel(1).notes.get(&64), Some(&1));
        assert!(result.channel(0).programs.contains(&5));
        assert!(result.channel(2).is_empty());
        assert_eq!(result.total_ticks, 30);
    }

    #[test]
    fn test_tempo_map_built_and_malformed_skipped() {
        let seq = SequenceBuilder::new(480)
            .track()
            .message(0, &[0xFF, 0x51, 0x07, 0xA1, 0x20])
            .message(100, &[0xFF, 0x51, 0x07, 0xA1]) // short payload
            .message(200, &[0xFF, 0x51, 0x03, 0xD0, 0x90])
            .build();

        let result = analyze(&seq).unwrap();
        assert_eq!(result.tempo_map.len(), 2);
        assert_eq!(result.tempo_map.tempo_at(0).mpq, 500_000);
        assert_eq!(result.tempo_map.tempo_at(200).mpq, 250_000);
    }

    #[test]
    fn test_param_history_from_pass() {
        let seq = SequenceBuilder::new(480)
            .track()
            .message(0, &[0xB3, 0x65, 0x00])
            .message(0, &[0xB3, 0x64, 0x00])
            .message(50, &[0xB3, 0x06, 0x02]) // data entry: no new selection
            .build();

        let result = analyze(&seq).unwrap();
        assert_eq!(result.params.len(3), 2);
        let sel = result.params.selection_at(3, 50).unwrap().unwrap();
        assert_eq!(sel.kind, ParamKind::Rpn);
        assert_eq!((sel.msb, sel.lsb), (0, 0));
    }

    #[test]
    fn test_empty_sequence_defaults() {
        let result = analyze(&SequenceBuilder::new(96).build()).unwrap();
        assert_eq!(result.total_ticks, 0);
        assert!(result.tempo_map.is_empty());
        assert!((result.tempo_stats.mean_bpm - 120.0).abs() < 1e-9);
    }
}
