//! In-memory sequence model: tracks of time-ordered raw MIDI messages.
//!
//! The sequence is assumed already materialized and validated by the
//! producer (an SMF loader or a host application). Messages carry absolute
//! ticks; the resolution gives ticks per quarter note.

use serde::{Deserialize, Serialize};

/// A single raw MIDI message at an absolute tick.
///
/// Byte conventions: voice/system messages are status + data bytes verbatim;
/// meta messages are `[0xFF, type, payload...]` without the SMF length field;
/// SysEx is `[0xF0, payload...]`, trailing `0xF7` optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Absolute time in ticks from the start of the sequence.
    pub tick: u64,
    /// Track this message came from.
    pub track: u32,
    /// Position within the track (0-based).
    pub index_in_track: u32,
    pub bytes: Vec<u8>,
}

impl RawMessage {
    pub fn new(tick: u64, track: u32, index_in_track: u32, bytes: Vec<u8>) -> Self {
        Self {
            tick,
            track,
            index_in_track,
            bytes,
        }
    }

    #[inline]
    pub fn status(&self) -> Option<u8> {
        self.bytes.first().copied()
    }
}

/// One track: messages in ascending tick order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub messages: Vec<RawMessage>,
}

impl Track {
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self { messages }
    }
}

/// An ordered collection of tracks plus the timing resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub tracks: Vec<Track>,
    /// Ticks per quarter note.
    pub resolution: u16,
}

impl Sequence {
    pub fn new(tracks: Vec<Track>, resolution: u16) -> Self {
        Self { tracks, resolution }
    }

    /// Total message count across all tracks.
    pub fn message_count(&self) -> usize {
        self.tracks.iter().map(|t| t.messages.len()).sum()
    }

    /// Greatest tick of any message, 0 for an empty sequence.
    pub fn last_tick(&self) -> u64 {
        self.tracks
            .iter()
            .flat_map(|t| t.messages.iter())
            .map(|m| m.tick)
            .max()
            .unwrap_or(0)
    }

    /// Iterate every message in track order.
    pub fn messages(&self) -> impl Iterator<Item = &RawMessage> {
        self.tracks.iter().flat_map(|t| t.messages.iter())
    }
}

/// Incremental sequence construction, mainly for tests and host apps that
/// synthesize sequences directly.
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    tracks: Vec<Track>,
    resolution: u16,
}

impl SequenceBuilder {
    pub fn new(resolution: u16) -> Self {
        Self {
            tracks: Vec::new(),
            resolution,
        }
    }

    /// Start a new track; subsequent `message` calls append to it.
    pub fn track(mut self) -> Self {
        self.tracks.push(Track::default());
        self
    }

    /// Append a message to the current track at the given tick.
    pub fn message(mut self, tick: u64, bytes: &[u8]) -> Self {
        if self.tracks.is_empty() {
            self.tracks.push(Track::default());
        }
        let track_index = self.tracks.len() - 1;
        let track = &mut self.tracks[track_index];
        let index = track.messages.len() as u32;
        track.messages.push(RawMessage::new(
            tick,
            track_index as u32,
            index,
            bytes.to_vec(),
        ));
        self
    }

    pub fn build(self) -> Sequence {
        Sequence::new(self.tracks, self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_tracks_and_indices() {
        let seq = SequenceBuilder::new(480)
            .track()
            .message(0, &[0x90, 60, 100])
            .message(120, &[0x80, 60, 0])
            .track()
            .message(0, &[0xC1, 5])
            .build();

        assert_eq!(seq.tracks.len(), 2);
        assert_eq!(seq.message_count(), 3);
        assert_eq!(seq.last_tick(), 120);
        assert_eq!(seq.tracks[0].messages[1].index_in_track, 1);
        assert_eq!(seq.tracks[1].messages[0].track, 1);
    }

    #[test]
    fn test_empty_sequence() {
        let seq = SequenceBuilder::new(96).build();
        assert_eq!(seq.message_count(), 0);
        assert_eq!(seq.last_tick(), 0);
    }
}
