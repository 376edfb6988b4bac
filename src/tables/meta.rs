//! Meta event type names.

const META: &[(u8, &'static str)] = &[
    (0x00, "Sequence Number"),
    (0x01, "Text"),
    (0x02, "Copyright Notice"),
    (0x03, "Track Name"),
    (0x04, "Instrument Name"),
    (0x05, "Lyric"),
    (0x06, "Marker"),
    (0x07, "Cue Point"),
    (0x08, "Program Name"),
    (0x09, "Device Name"),
    (0x20, "MIDI Channel Prefix"),
    (0x21, "MIDI Port"),
    (0x2F, "End of Track"),
    (0x51, "Set Tempo"),
    (0x54, "SMPTE Offset"),
    (0x58, "Time Signature"),
    (0x59, "Key Signature"),
    (0x7F, "Sequencer Specific"),
];

pub fn meta_name(meta_type: u8) -> Option<&'static str> {
    META.iter()
        .find(|(t, _)| *t == meta_type)
        .map(|(_, name)| *name)
}

/// Meta types whose payload is human-readable text.
pub fn is_text(meta_type: u8) -> bool {
    (0x01..=0x09).contains(&meta_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(meta_name(0x51), Some("Set Tempo"));
        assert_eq!(meta_name(0x7F), Some("Sequencer Specific"));
        assert_eq!(meta_name(0x60), None);
    }

    #[test]
    fn test_text_range() {
        assert!(is_text(0x05));
        assert!(!is_text(0x00));
        assert!(!is_text(0x51));
    }
}
