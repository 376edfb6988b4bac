//! Controller number tables: names, MSB/LSB pairing, and RPN parameter
//! names.
//!
//! Controllers 0x00-0x13 with defined names are 14-bit pairs; the LSB
//! partner is always `msb + 0x20`. Controllers 0x62-0x65 select the active
//! NRPN/RPN and 0x06/0x26/0x60/0x61 write to whatever is selected; both
//! groups are resolved by the classifier, not here.

/// Role of a controller within an MSB/LSB pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRole {
    Msb,
    Lsb,
}

/// Continuous controllers with a defined coarse/fine pair. The name is the
/// pair's name; the MSB number identifies the pair.
const PAIRED: &[(u8, &'static str)] = &[
    (0x00, "Bank Select"),
    (0x01, "Modulation Wheel"),
    (0x02, "Breath Controller"),
    (0x04, "Foot Controller"),
    (0x05, "Portamento Time"),
    (0x06, "Data Entry"),
    (0x07, "Channel Volume"),
    (0x08, "Balance"),
    (0x0A, "Pan"),
    (0x0B, "Expression Controller"),
    (0x0C, "Effect Control 1"),
    (0x0D, "Effect Control 2"),
    (0x10, "General Purpose Controller 1"),
    (0x11, "General Purpose Controller 2"),
    (0x12, "General Purpose Controller 3"),
    (0x13, "General Purpose Controller 4"),
];

/// Single-byte controllers (switches, sound controllers, channel mode).
const UNPAIRED: &[(u8, &'static str)] = &[
    (0x40, "Damper Pedal"),
    (0x41, "Portamento On/Off"),
    (0x42, "Sostenuto"),
    (0x43, "Soft Pedal"),
    (0x44, "Legato Footswitch"),
    (0x45, "Hold 2"),
    (0x46, "Sound Variation"),
    (0x47, "Timbre/Harmonic Intensity"),
    (0x48, "Release Time"),
    (0x49, "Attack Time"),
    (0x4A, "Brightness"),
    (0x4B, "Sound Controller 6"),
    (0x4C, "Sound Controller 7"),
    (0x4D, "Sound Controller 8"),
    (0x4E, "Sound Controller 9"),
    (0x4F, "Sound Controller 10"),
    (0x50, "General Purpose Controller 5"),
    (0x51, "General Purpose Controller 6"),
    (0x52, "General Purpose Controller 7"),
    (0x53, "General Purpose Controller 8"),
    (0x54, "Portamento Control"),
    (0x58, "High Resolution Velocity Prefix"),
    (0x5B, "Effects 1 Depth (Reverb)"),
    (0x5C, "Effects 2 Depth (Tremolo)"),
    (0x5D, "Effects 3 Depth (Chorus)"),
    (0x5E, "Effects 4 Depth (Celeste)"),
    (0x5F, "Effects 5 Depth (Phaser)"),
    (0x60, "Data Increment"),
    (0x61, "Data Decrement"),
    (0x78, "All Sound Off"),
    (0x79, "Reset All Controllers"),
    (0x7A, "Local Control"),
    (0x7B, "All Notes Off"),
    (0x7C, "Omni Mode Off"),
    (0x7D, "Omni Mode On"),
    (0x7E, "Mono Mode On"),
    (0x7F, "Poly Mode On"),
];

/// Name and pair role for a controller number. Unknown controllers return
/// `None`; the RPN/NRPN select group (0x62-0x65) is deliberately absent
/// since its identity is not a fixed controller.
pub fn controller(cc: u8) -> Option<(&'static str, Option<PairRole>)> {
    if let Some((_, name)) = PAIRED.iter().find(|(msb, _)| *msb == cc) {
        return Some((name, Some(PairRole::Msb)));
    }
    if cc >= 0x20 {
        if let Some((_, name)) = PAIRED.iter().find(|(msb, _)| *msb == cc - 0x20) {
            return Some((name, Some(PairRole::Lsb)));
        }
    }
    UNPAIRED
        .iter()
        .find(|(n, _)| *n == cc)
        .map(|(_, name)| (*name, None))
}

/// The sibling sort key for a controller node: the pair is grouped under its
/// MSB number so coarse and fine land on the same branch.
pub fn controller_sort_key(cc: u8) -> u8 {
    if (0x20..0x40).contains(&cc) && PAIRED.iter().any(|(msb, _)| *msb == cc - 0x20) {
        cc - 0x20
    } else {
        cc
    }
}

/// Registered parameter numbers (MSB, LSB) -> name. The 7F/7F null
/// selection is handled by the caller, not listed here.
const RPN: &[(u8, u8, &'static str)] = &[
    (0x00, 0x00, "Pitch Bend Sensitivity"),
    (0x00, 0x01, "Channel Fine Tuning"),
    (0x00, 0x02, "Channel Coarse Tuning"),
    (0x00, 0x03, "Tuning Program Select"),
    (0x00, 0x04, "Tuning Bank Select"),
    (0x00, 0x05, "MPE Configuration"),
];

pub fn rpn_name(msb: u8, lsb: u8) -> Option<&'static str> {
    RPN.iter()
        .find(|(m, l, _)| *m == msb && *l == lsb)
        .map(|(_, _, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_msb_and_lsb_share_name() {
        let (msb_name, msb_role) = controller(0x07).unwrap();
        let (lsb_name, lsb_role) = controller(0x27).unwrap();
        assert_eq!(msb_name, "Channel Volume");
        assert_eq!(msb_name, lsb_name);
        assert_eq!(msb_role, Some(PairRole::Msb));
        assert_eq!(lsb_role, Some(PairRole::Lsb));
        assert_eq!(controller_sort_key(0x27), 0x07);
        assert_eq!(controller_sort_key(0x07), 0x07);
    }

    #[test]
    fn test_unpaired_switch() {
        let (name, role) = controller(0x40).unwrap();
        assert_eq!(name, "Damper Pedal");
        assert_eq!(role, None);
        assert_eq!(controller_sort_key(0x40), 0x40);
    }

    #[test]
    fn test_rpn_select_group_is_not_a_fixed_controller() {
        for cc in 0x62..=0x65 {
            assert_eq!(controller(cc), None);
        }
    }

    #[test]
    fn test_unknown_controller() {
        assert_eq!(controller(0x03), None);
        assert_eq!(controller(0x66), None);
    }

    #[test]
    fn test_rpn_names() {
        assert_eq!(rpn_name(0, 0), Some("Pitch Bend Sensitivity"));
        assert_eq!(rpn_name(0, 2), Some("Channel Coarse Tuning"));
        assert_eq!(rpn_name(0x10, 0x20), None);
    }
}
