//! Manufacturer (vendor) ID resolution for SysEx and Sequencer Specific
//! meta messages.
//!
//! IDs come in two forms: a single byte 0x01-0x7C, or a three-byte form
//! introduced by a 0x00 escape byte. The two namespaces are disjoint and must
//! never collide (0x41 is Roland, 00 00 41 is Microsoft).

use serde::{Deserialize, Serialize};

/// A resolved or unresolved manufacturer ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorId {
    /// Single-byte ID (0x01-0x7C).
    Single(u8),
    /// Three-byte ID; the leading 0x00 escape is implicit.
    Triple(u8, u8),
}

impl VendorId {
    /// Extract a vendor ID from the leading bytes of a SysEx payload
    /// (status byte already stripped). `None` when the payload is too short
    /// for the form it announces.
    pub fn from_payload(data: &[u8]) -> Option<Self> {
        match data.first().copied()? {
            0x00 => {
                if data.len() >= 3 {
                    Some(VendorId::Triple(data[1], data[2]))
                } else {
                    None
                }
            }
            id => Some(VendorId::Single(id)),
        }
    }

    /// Manufacturer name, `None` for IDs missing from the table.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            VendorId::Single(id) => lookup(SINGLE_BYTE, *id),
            VendorId::Triple(b1, b2) => THREE_BYTE
                .iter()
                .find(|(e1, e2, _)| e1 == b1 && e2 == b2)
                .map(|(_, _, name)| *name),
        }
    }

    /// Stable sort key: 2 hex digits for single-byte IDs, `00xxxx` for
    /// three-byte IDs. Disjoint since single-byte IDs never start `00`.
    pub fn sort_key(&self) -> String {
        match self {
            VendorId::Single(id) => format!("{id:02x}"),
            VendorId::Triple(b1, b2) => format!("00{b1:02x}{b2:02x}"),
        }
    }

    /// Hex rendition of the wire bytes, for decoded-field display.
    pub fn display_id(&self) -> String {
        match self {
            VendorId::Single(id) => format!("{id:02X}"),
            VendorId::Triple(b1, b2) => format!("00 {b1:02X} {b2:02X}"),
        }
    }
}

fn lookup(table: &[(u8, &'static str)], id: u8) -> Option<&'static str> {
    table.iter().find(|(e, _)| *e == id).map(|(_, name)| *name)
}

/// Single-byte manufacturer IDs (American, European, Japanese groups).
const SINGLE_BYTE: &[(u8, &'static str)] = &[
    (0x01, "Sequential Circuits"),
    (0x02, "IDP"),
    (0x03, "Voyetra/Octave-Plateau"),
    (0x04, "Moog"),
    (0x05, "Passport Designs"),
    (0x06, "Lexicon"),
    (0x07, "Kurzweil"),
    (0x08, "Fender"),
    (0x09, "Gulbransen"),
    (0x0A, "AKG Acoustics"),
    (0x0B, "Voyce Music"),
    (0x0C, "Waveframe"),
    (0x0D, "ADA Signal Processors"),
    (0x0E, "Garfield Electronics"),
    (0x0F, "Ensoniq"),
    (0x10, "Oberheim"),
    (0x11, "Apple Computer"),
    (0x12, "Grey Matter Response"),
    (0x13, "Digidesign"),
    (0x14, "Palmtree Instruments"),
    (0x15, "JLCooper Electronics"),
    (0x16, "Lowrey"),
    (0x17, "Adams-Smith"),
    (0x18, "E-mu Systems"),
    (0x19, "Harmony Systems"),
    (0x1A, "ART"),
    (0x1B, "Baldwin"),
    (0x1C, "Eventide"),
    (0x1D, "Inventronics"),
    (0x1F, "Clarity"),
    (0x20, "Passac"),
    (0x21, "SIEL"),
    (0x22, "Synthaxe"),
    (0x24, "Hohner"),
    (0x25, "Twister"),
    (0x26, "Solton"),
    (0x27, "Jellinghaus MS"),
    (0x28, "Southworth Music Systems"),
    (0x29, "PPG"),
    (0x2A, "JEN"),
    (0x2B, "Solid State Logic"),
    (0x2C, "Audio Veritrieb"),
    (0x2F, "Elka"),
    (0x30, "Dynacord"),
    (0x31, "Viscount"),
    (0x33, "Clavia Digital Instruments"),
    (0x34, "Audio Architecture"),
    (0x35, "GeneralMusic"),
    (0x39, "Soundcraft Electronics"),
    (0x3B, "Wersi"),
    (0x3C, "Avab Niethammer"),
    (0x3D, "Digigram"),
    (0x3E, "Waldorf Electronics"),
    (0x3F, "Quasimidi"),
    (0x40, "Kawai"),
    (0x41, "Roland"),
    (0x42, "Korg"),
    (0x43, "Yamaha"),
    (0x44, "Casio"),
    (0x46, "Kamiya Studio"),
    (0x47, "Akai"),
    (0x48, "Victor"),
    (0x4B, "Fujitsu"),
    (0x4C, "Sony"),
    (0x4E, "Teac"),
    (0x50, "Matsushita Electric"),
    (0x51, "Fostex"),
    (0x52, "Zoom"),
    (0x54, "Matsushita Communication Industrial"),
    (0x55, "Suzuki Musical Instruments"),
    (0x56, "Fuji Sound"),
    (0x57, "Acoustic Technical Laboratory"),
];

/// Three-byte manufacturer IDs, stored without the 0x00 escape byte.
const THREE_BYTE: &[(u8, u8, &'static str)] = &[
    (0x00, 0x01, "Time/Warner Interactive"),
    (0x00, 0x07, "Digital Music"),
    (0x00, 0x0E, "Alesis"),
    (0x00, 0x15, "KAT"),
    (0x00, 0x16, "Opcode"),
    (0x00, 0x1A, "Allen & Heath Brenell"),
    (0x00, 0x1B, "Peavey Electronics"),
    (0x00, 0x1C, "360 Systems"),
    (0x00, 0x20, "Axxes"),
    (0x00, 0x3B, "Mark of the Unicorn"),
    (0x00, 0x41, "Microsoft"),
    (0x00, 0x4D, "Studio Electronics"),
    (0x00, 0x66, "Mackie Designs"),
    (0x00, 0x7E, "Midisoft"),
    (0x01, 0x05, "M-Audio"),
    (0x01, 0x21, "Cakewalk"),
    (0x20, 0x29, "Focusrite/Novation"),
    (0x20, 0x32, "Behringer"),
    (0x20, 0x33, "Access Music"),
    (0x20, 0x3C, "Elektron"),
    (0x20, 0x6B, "Arturia"),
    (0x21, 0x09, "Native Instruments"),
    (0x21, 0x10, "ROLI"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_roland() {
        let id = VendorId::from_payload(&[0x41, 0x10, 0x42]).unwrap();
        assert_eq!(id, VendorId::Single(0x41));
        assert_eq!(id.name(), Some("Roland"));
        assert_eq!(id.sort_key(), "41");
    }

    #[test]
    fn test_three_byte_is_distinct_namespace() {
        let id = VendorId::from_payload(&[0x00, 0x00, 0x41]).unwrap();
        assert_eq!(id, VendorId::Triple(0x00, 0x41));
        assert_eq!(id.name(), Some("Microsoft"));
        assert_ne!(id.sort_key(), VendorId::Single(0x41).sort_key());
    }

    #[test]
    fn test_unknown_id_resolves_to_none_not_panic() {
        let id = VendorId::from_payload(&[0x1E]).unwrap();
        assert_eq!(id.name(), None);
        assert_eq!(id.sort_key(), "1e");
    }

    #[test]
    fn test_truncated_three_byte_form() {
        assert_eq!(VendorId::from_payload(&[0x00, 0x20]), None);
        assert_eq!(VendorId::from_payload(&[]), None);
    }
}
