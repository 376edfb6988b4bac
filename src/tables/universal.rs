//! Universal SysEx sub-protocol tables (Realtime 0x7F and Non-Realtime
//! 0x7E).
//!
//! Each sub-ID-1 entry names the main type and optionally carries a
//! sub-ID-2 table. Main types with no sub-table never produce a sub-type
//! node, even when a byte is present at that position.

/// One sub-ID-1 entry: `(sub_id_1, name, sub_id_2_table)`.
pub type MainType = (u8, &'static str, Option<&'static [(u8, &'static str)]>);

const MTC_NON_REALTIME: &[(u8, &'static str)] = &[
    (0x00, "Special"),
    (0x01, "Punch In Points"),
    (0x02, "Punch Out Points"),
    (0x03, "Delete Punch In Point"),
    (0x04, "Delete Punch Out Point"),
    (0x05, "Event Start Point"),
    (0x06, "Event Stop Point"),
    (0x07, "Event Start Points with Additional Info"),
    (0x08, "Event Stop Points with Additional Info"),
    (0x09, "Delete Event Start Point"),
    (0x0A, "Delete Event Stop Point"),
    (0x0B, "Cue Points"),
    (0x0C, "Cue Points with Additional Info"),
    (0x0D, "Delete Cue Point"),
    (0x0E, "Event Name in Additional Info"),
];

const SAMPLE_DUMP_EXT: &[(u8, &'static str)] = &[
    (0x01, "Loop Point Transmission"),
    (0x02, "Loop Point Request"),
    (0x03, "Sample Name Transmission"),
    (0x04, "Sample Name Request"),
    (0x05, "Extended Dump Header"),
    (0x06, "Extended Loop Point Transmission"),
    (0x07, "Extended Loop Point Request"),
];

const GENERAL_INFORMATION: &[(u8, &'static str)] = &[
    (0x01, "Identity Request"),
    (0x02, "Identity Reply"),
];

const FILE_DUMP: &[(u8, &'static str)] = &[
    (0x01, "Header"),
    (0x02, "Data Packet"),
    (0x03, "Request"),
];

const TUNING_NON_REALTIME: &[(u8, &'static str)] = &[
    (0x00, "Bulk Dump Request"),
    (0x01, "Bulk Dump Reply"),
    (0x03, "Tuning Dump Request"),
    (0x04, "Key-Based Tuning Dump"),
    (0x05, "Scale/Octave Tuning Dump (1 byte)"),
    (0x06, "Scale/Octave Tuning Dump (2 byte)"),
    (0x07, "Single Note Tuning Change with Bank"),
    (0x08, "Scale/Octave Tuning (1 byte)"),
    (0x09, "Scale/Octave Tuning (2 byte)"),
];

const GENERAL_MIDI: &[(u8, &'static str)] = &[
    (0x01, "General MIDI System On"),
    (0x02, "General MIDI System Off"),
    (0x03, "General MIDI 2 System On"),
];

const DOWNLOADABLE_SOUNDS: &[(u8, &'static str)] = &[
    (0x01, "Turn DLS On"),
    (0x02, "Turn DLS Off"),
    (0x03, "Turn DLS Voice Allocation Off"),
    (0x04, "Turn DLS Voice Allocation On"),
];

/// Non-Realtime (0x7E) sub-ID-1 table.
pub const NON_REALTIME: &[MainType] = &[
    (0x01, "Sample Dump Header", None),
    (0x02, "Sample Data Packet", None),
    (0x03, "Sample Dump Request", None),
    (0x04, "MIDI Time Code", Some(MTC_NON_REALTIME)),
    (0x05, "Sample Dump Extensions", Some(SAMPLE_DUMP_EXT)),
    (0x06, "General Information", Some(GENERAL_INFORMATION)),
    (0x07, "File Dump", Some(FILE_DUMP)),
    (0x08, "MIDI Tuning Standard", Some(TUNING_NON_REALTIME)),
    (0x09, "General MIDI", Some(GENERAL_MIDI)),
    (0x0A, "Downloadable Sounds", Some(DOWNLOADABLE_SOUNDS)),
    (0x7B, "End of File", None),
    (0x7C, "Wait", None),
    (0x7D, "Cancel", None),
    (0x7E, "NAK", None),
    (0x7F, "ACK", None),
];

const MTC_REALTIME: &[(u8, &'static str)] = &[
    (0x01, "Full Message"),
    (0x02, "User Bits"),
];

const SHOW_CONTROL: &[(u8, &'static str)] = &[
    (0x01, "Lighting"),
    (0x02, "Moving Lights"),
    (0x03, "Colour Changers"),
    (0x04, "Strobes"),
    (0x05, "Lasers"),
    (0x06, "Projection"),
    (0x10, "Sound"),
    (0x20, "Machinery"),
    (0x30, "Video"),
    (0x40, "Projection (Film)"),
    (0x50, "Process Control"),
    (0x60, "Pyrotechnics"),
    (0x7F, "All Types"),
];

const NOTATION: &[(u8, &'static str)] = &[
    (0x01, "Bar Number"),
    (0x02, "Time Signature (Immediate)"),
    (0x42, "Time Signature (Delayed)"),
];

const DEVICE_CONTROL: &[(u8, &'static str)] = &[
    (0x01, "Master Volume"),
    (0x02, "Master Balance"),
    (0x03, "Master Fine Tuning"),
    (0x04, "Master Coarse Tuning"),
    (0x05, "Global Parameter Control"),
];

const MTC_CUEING: &[(u8, &'static str)] = &[
    (0x00, "Special"),
    (0x01, "Punch In Points"),
    (0x02, "Punch Out Points"),
    (0x05, "Event Start Points"),
    (0x06, "Event Stop Points"),
    (0x07, "Event Start Points with Additional Info"),
    (0x08, "Event Stop Points with Additional Info"),
    (0x0B, "Cue Points"),
    (0x0C, "Cue Points with Additional Info"),
    (0x0E, "Event Name in Additional Info"),
];

const MMC_COMMANDS: &[(u8, &'static str)] = &[
    (0x01, "Stop"),
    (0x02, "Play"),
    (0x03, "Deferred Play"),
    (0x04, "Fast Forward"),
    (0x05, "Rewind"),
    (0x06, "Record Strobe"),
    (0x07, "Record Exit"),
    (0x08, "Record Pause"),
    (0x09, "Pause"),
    (0x0A, "Eject"),
    (0x0B, "Chase"),
    (0x0D, "MMC Reset"),
    (0x40, "Write"),
    (0x44, "Locate"),
    (0x47, "Shuttle"),
];

const MMC_RESPONSES: &[(u8, &'static str)] = &[
    (0x07, "Response Error"),
    (0x48, "Move"),
];

const TUNING_REALTIME: &[(u8, &'static str)] = &[
    (0x01, "Single Note Tuning Change"),
    (0x02, "Single Note Tuning Change with Bank"),
    (0x08, "Scale/Octave Tuning (1 byte)"),
    (0x09, "Scale/Octave Tuning (2 byte)"),
];

const CONTROLLER_DESTINATION: &[(u8, &'static str)] = &[
    (0x01, "Channel Pressure"),
    (0x02, "Polyphonic Key Pressure"),
    (0x03, "Controller"),
];

/// Realtime (0x7F) sub-ID-1 table.
pub const REALTIME: &[MainType] = &[
    (0x01, "MIDI Time Code", Some(MTC_REALTIME)),
    (0x02, "MIDI Show Control", Some(SHOW_CONTROL)),
    (0x03, "Notation Information", Some(NOTATION)),
    (0x04, "Device Control", Some(DEVICE_CONTROL)),
    (0x05, "Real Time MTC Cueing", Some(MTC_CUEING)),
    (0x06, "MIDI Machine Control Commands", Some(MMC_COMMANDS)),
    (0x07, "MIDI Machine Control Responses", Some(MMC_RESPONSES)),
    (0x08, "MIDI Tuning Standard", Some(TUNING_REALTIME)),
    (0x09, "Controller Destination Setting", Some(CONTROLLER_DESTINATION)),
];

/// Resolve a sub-ID-1 entry in the given table.
pub fn main_type(table: &'static [MainType], sub_id_1: u8) -> Option<&'static MainType> {
    table.iter().find(|(id, _, _)| *id == sub_id_1)
}

/// Resolve a sub-ID-2 name within a main type's sub-table.
pub fn sub_type(main: &MainType, sub_id_2: u8) -> Option<&'static str> {
    main.2?
        .iter()
        .find(|(id, _)| *id == sub_id_2)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_mtc_full_message() {
        let main = main_type(REALTIME, 0x01).unwrap();
        assert_eq!(main.1, "MIDI Time Code");
        assert_eq!(sub_type(main, 0x01), Some("Full Message"));
    }

    #[test]
    fn test_non_realtime_ack_has_no_sub_types() {
        let main = main_type(NON_REALTIME, 0x7F).unwrap();
        assert_eq!(main.1, "ACK");
        assert!(main.2.is_none());
        assert_eq!(sub_type(main, 0x01), None);
    }

    #[test]
    fn test_mmc_commands() {
        let main = main_type(REALTIME, 0x06).unwrap();
        assert_eq!(sub_type(main, 0x02), Some("Play"));
        assert_eq!(sub_type(main, 0x44), Some("Locate"));
    }

    #[test]
    fn test_unknown_ids() {
        assert!(main_type(REALTIME, 0x55).is_none());
        let main = main_type(NON_REALTIME, 0x09).unwrap();
        assert_eq!(sub_type(main, 0x55), None);
    }
}
