//! One-shot decode of raw message bytes into a [`MessageKind`].
//!
//! Derived once per message and never mutated. Truncated voice messages keep
//! whatever data bytes were present (`None` for the missing ones) so the
//! classifier can degrade gracefully instead of panicking.

use serde::{Deserialize, Serialize};

use crate::sequence::RawMessage;

/// Channel voice command, from the top nibble of the status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceCommand {
    NoteOff,
    NoteOn,
    PolyPressure,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
}

impl VoiceCommand {
    pub fn from_status(status: u8) -> Option<Self> {
        match status & 0xF0 {
            0x80 => Some(VoiceCommand::NoteOff),
            0x90 => Some(VoiceCommand::NoteOn),
            0xA0 => Some(VoiceCommand::PolyPressure),
            0xB0 => Some(VoiceCommand::ControlChange),
            0xC0 => Some(VoiceCommand::ProgramChange),
            0xD0 => Some(VoiceCommand::ChannelPressure),
            0xE0 => Some(VoiceCommand::PitchBend),
            _ => None,
        }
    }

    /// Expected data bytes for this command (1 or 2).
    #[inline]
    pub fn data_len(self) -> usize {
        match self {
            VoiceCommand::ProgramChange | VoiceCommand::ChannelPressure => 1,
            _ => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VoiceCommand::NoteOff => "Note Off",
            VoiceCommand::NoteOn => "Note On",
            VoiceCommand::PolyPressure => "Polyphonic Key Pressure",
            VoiceCommand::ControlChange => "Control Change",
            VoiceCommand::ProgramChange => "Program Change",
            VoiceCommand::ChannelPressure => "Channel Pressure",
            VoiceCommand::PitchBend => "Pitch Bend",
        }
    }
}

/// Decoded shape of a raw message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Voice {
        command: VoiceCommand,
        channel: u8,
        data1: Option<u8>,
        data2: Option<u8>,
    },
    SystemCommon {
        status: u8,
    },
    SystemRealtime {
        status: u8,
    },
    Meta {
        meta_type: u8,
        data: Vec<u8>,
    },
    SysEx {
        data: Vec<u8>,
    },
    /// Empty message or status byte below 0x80 (running status is not
    /// supported at this layer; the producer resolves it).
    Invalid,
}

impl MessageKind {
    pub fn from_raw(msg: &RawMessage) -> Self {
        Self::from_bytes(&msg.bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let Some(&status) = bytes.first() else {
            return MessageKind::Invalid;
        };
        match status {
            0x00..=0x7F => MessageKind::Invalid,
            0x80..=0xEF => {
                // Every nibble 0x8-0xE is a voice command.
                let command = VoiceCommand::from_status(status)
                    .expect("status 0x80-0xEF is always a voice command");
                MessageKind::Voice {
                    command,
                    channel: status & 0x0F,
                    data1: bytes.get(1).copied(),
                    data2: bytes.get(2).copied(),
                }
            }
            0xF0 => MessageKind::SysEx {
                data: strip_sysex_end(&bytes[1..]).to_vec(),
            },
            0xF1..=0xF7 => MessageKind::SystemCommon { status },
            0xF8..=0xFE => MessageKind::SystemRealtime { status },
            0xFF => MessageKind::Meta {
                meta_type: bytes.get(1).copied().unwrap_or(0xFF),
                data: if bytes.len() > 2 {
                    bytes[2..].to_vec()
                } else {
                    Vec::new()
                },
            },
        }
    }

    #[inline]
    pub fn channel(&self) -> Option<u8> {
        match self {
            MessageKind::Voice { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// Controller and value for a complete control-change message.
    #[inline]
    pub fn control_change(&self) -> Option<(u8, u8)> {
        match self {
            MessageKind::Voice {
                command: VoiceCommand::ControlChange,
                data1: Some(controller),
                data2: Some(value),
                ..
            } => Some((*controller, *value)),
            _ => None,
        }
    }

    /// Program number for a complete program-change message.
    #[inline]
    pub fn program_change(&self) -> Option<u8> {
        match self {
            MessageKind::Voice {
                command: VoiceCommand::ProgramChange,
                data1: Some(program),
                ..
            } => Some(*program),
            _ => None,
        }
    }

    /// Note and velocity for a sounding note-on (velocity > 0).
    #[inline]
    pub fn sounding_note_on(&self) -> Option<(u8, u8)> {
        match self {
            MessageKind::Voice {
                command: VoiceCommand::NoteOn,
                data1: Some(note),
                data2: Some(velocity),
                ..
            } if *velocity > 0 => Some((*note, *velocity)),
            _ => None,
        }
    }

    /// Microseconds per quarter note from a well-formed Set Tempo meta
    /// message (exactly 3 payload bytes).
    pub fn tempo_mpq(&self) -> Option<u32> {
        match self {
            MessageKind::Meta {
                meta_type: 0x51,
                data,
            } if data.len() == 3 => {
                Some(u32::from_be_bytes([0, data[0], data[1], data[2]]))
            }
            _ => None,
        }
    }
}

/// Drop a trailing end-of-exclusive byte; producers differ on whether they
/// include it.
fn strip_sysex_end(data: &[u8]) -> &[u8] {
    match data.last() {
        Some(0xF7) => &data[..data.len() - 1],
        _ => data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_decode() {
        let kind = MessageKind::from_bytes(&[0x93, 60, 100]);
        assert_eq!(
            kind,
            MessageKind::Voice {
                command: VoiceCommand::NoteOn,
                channel: 3,
                data1: Some(60),
                data2: Some(100),
            }
        );
        assert_eq!(kind.channel(), Some(3));
        assert_eq!(kind.sounding_note_on(), Some((60, 100)));
    }

    #[test]
    fn test_note_on_zero_velocity_not_sounding() {
        let kind = MessageKind::from_bytes(&[0x90, 60, 0]);
        assert_eq!(kind.sounding_note_on(), None);
    }

    #[test]
    fn test_truncated_voice_keeps_present_bytes() {
        let kind = MessageKind::from_bytes(&[0xB0, 0x07]);
        assert_eq!(
            kind,
            MessageKind::Voice {
                command: VoiceCommand::ControlChange,
                channel: 0,
                data1: Some(0x07),
                data2: None,
            }
        );
        assert_eq!(kind.control_change(), None);
    }

    #[test]
    fn test_meta_tempo() {
        let kind = MessageKind::from_bytes(&[0xFF, 0x51, 0x07, 0xA1, 0x20]);
        assert_eq!(kind.tempo_mpq(), Some(500_000));

        // Wrong payload length is not a tempo value.
        let bad = MessageKind::from_bytes(&[0xFF, 0x51, 0x07, 0xA1]);
        assert_eq!(bad.tempo_mpq(), None);
    }

    #[test]
    fn test_sysex_strips_terminator() {
        let with_end = MessageKind::from_bytes(&[0xF0, 0x41, 0x10, 0xF7]);
        let without = MessageKind::from_bytes(&[0xF0, 0x41, 0x10]);
        assert_eq!(with_end, without);
    }

    #[test]
    fn test_system_status_ranges() {
        assert!(matches!(
            MessageKind::from_bytes(&[0xF2, 0x00, 0x10]),
            MessageKind::SystemCommon { status: 0xF2 }
        ));
        assert!(matches!(
            MessageKind::from_bytes(&[0xF8]),
            MessageKind::SystemRealtime { status: 0xF8 }
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(MessageKind::from_bytes(&[]), MessageKind::Invalid);
        assert_eq!(MessageKind::from_bytes(&[0x40, 0x01]), MessageKind::Invalid);
    }
}
