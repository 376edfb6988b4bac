//! Standard MIDI File ingestion via midly.
//!
//! Converts an SMF into the in-memory [`Sequence`] model: absolute ticks per
//! track, every event re-encoded to the raw-byte conventions of
//! [`RawMessage`](crate::sequence::RawMessage). SMPTE-timecode files are
//! rejected; the analysis core only speaks metrical ticks.

use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use tracing::debug;

use crate::error::{Error, Result};
use crate::sequence::{RawMessage, Sequence, Track};

impl Sequence {
    /// Load and convert an SMF from disk.
    pub fn from_smf_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_smf_bytes(&data)
    }

    /// Parse and convert an SMF from bytes.
    pub fn from_smf_bytes(data: &[u8]) -> Result<Self> {
        let smf = Smf::parse(data)?;

        let resolution = match smf.header.timing {
            Timing::Metrical(tpb) => tpb.as_int(),
            Timing::Timecode(_, _) => return Err(Error::UnsupportedTiming),
        };

        let mut tracks = Vec::with_capacity(smf.tracks.len());
        for (track_index, track) in smf.tracks.iter().enumerate() {
            let mut messages = Vec::new();
            let mut tick = 0u64;
            for event in track.iter() {
                tick += event.delta.as_int() as u64;
                let Some(bytes) = encode_event(&event.kind) else {
                    continue;
                };
                messages.push(RawMessage::new(
                    tick,
                    track_index as u32,
                    messages.len() as u32,
                    bytes,
                ));
            }
            tracks.push(Track::new(messages));
        }

        let sequence = Sequence::new(tracks, resolution);
        debug!(
            tracks = sequence.tracks.len(),
            messages = sequence.message_count(),
            resolution,
            "converted SMF to sequence"
        );
        Ok(sequence)
    }
}

/// Re-encode a midly track event as raw wire bytes. Escape packets (split
/// SysEx continuations) have no standalone message form and are skipped.
fn encode_event(kind: &TrackEventKind) -> Option<Vec<u8>> {
    match kind {
        TrackEventKind::Midi { channel, message } => {
            let ch = channel.as_int();
            Some(match message {
                MidiMessage::NoteOff { key, vel } => {
                    vec![0x80 | ch, key.as_int(), vel.as_int()]
                }
                MidiMessage::NoteOn { key, vel } => {
                    vec![0x90 | ch, key.as_int(), vel.as_int()]
                }
                MidiMessage::Aftertouch { key, vel } => {
                    vec![0xA0 | ch, key.as_int(), vel.as_int()]
                }
                MidiMessage::Controller { controller, value } => {
                    vec![0xB0 | ch, controller.as_int(), value.as_int()]
                }
                MidiMessage::ProgramChange { program } => vec![0xC0 | ch, program.as_int()],
                MidiMessage::ChannelAftertouch { vel } => vec![0xD0 | ch, vel.as_int()],
                MidiMessage::PitchBend { bend } => {
                    let raw = bend.0.as_int();
                    vec![0xE0 | ch, (raw & 0x7F) as u8, (raw >> 7) as u8]
                }
            })
        }
        TrackEventKind::SysEx(data) => {
            let mut bytes = Vec::with_capacity(data.len() + 1);
            bytes.push(0xF0);
            bytes.extend_from_slice(data);
            Some(bytes)
        }
        TrackEventKind::Escape(_) => None,
        TrackEventKind::Meta(meta) => encode_meta(meta),
    }
}

fn encode_meta(meta: &MetaMessage) -> Option<Vec<u8>> {
    let (meta_type, payload): (u8, Vec<u8>) = match meta {
        MetaMessage::TrackNumber(n) => (
            0x00,
            n.map(|n| n.to_be_bytes().to_vec()).unwrap_or_default(),
        ),
        MetaMessage::Text(t) => (0x01, t.to_vec()),
        MetaMessage::Copyright(t) => (0x02, t.to_vec()),
        MetaMessage::TrackName(t) => (0x03, t.to_vec()),
        MetaMessage::InstrumentName(t) => (0x04, t.to_vec()),
        MetaMessage::Lyric(t) => (0x05, t.to_vec()),
        MetaMessage::Marker(t) => (0x06, t.to_vec()),
        MetaMessage::CuePoint(t) => (0x07, t.to_vec()),
        MetaMessage::ProgramName(t) => (0x08, t.to_vec()),
        MetaMessage::DeviceName(t) => (0x09, t.to_vec()),
        MetaMessage::MidiChannel(ch) => (0x20, vec![ch.as_int()]),
        MetaMessage::MidiPort(port) => (0x21, vec![port.as_int()]),
        MetaMessage::EndOfTrack => (0x2F, Vec::new()),
        MetaMessage::Tempo(mpq) => {
            let mpq = mpq.as_int();
            (0x51, vec![(mpq >> 16) as u8, (mpq >> 8) as u8, mpq as u8])
        }
        MetaMessage::SmpteOffset(t) => (
            0x54,
            vec![t.hour(), t.minute(), t.second(), t.frame(), t.subframe()],
        ),
        MetaMessage::TimeSignature(num, den, clocks, thirty_seconds) => {
            (0x58, vec![*num, *den, *clocks, *thirty_seconds])
        }
        MetaMessage::KeySignature(sharps, minor) => {
            (0x59, vec![*sharps as u8, u8::from(*minor)])
        }
        MetaMessage::SequencerSpecific(data) => (0x7F, data.to_vec()),
        MetaMessage::Unknown(meta_type, data) => (*meta_type, data.to_vec()),
    };
    let mut bytes = Vec::with_capacity(payload.len() + 2);
    bytes.push(0xFF);
    bytes.push(meta_type);
    bytes.extend_from_slice(&payload);
    Some(bytes)
}
