//! Pure, deterministic classification of a single message into a sorted
//! multi-level taxonomy plus a flat decoded-field record.
//!
//! `classify` has no shared state: the caller supplies the channel's
//! RPN/NRPN selection at the message's tick, queried from the finished
//! [`ChannelParamHistory`](crate::params::ChannelParamHistory). Identical
//! inputs always produce identical output, so results are cacheable and
//! diffable.
//!
//! Sort keys are fixed-width lowercase hex within each sibling set;
//! unresolved entries get a `zz` prefix so they sort after every known key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::message::{MessageKind, VoiceCommand};
use crate::params::ParamSelection;
use crate::sequence::RawMessage;
use crate::tables::{controllers, meta, universal, vendors};

/// One level of a classification path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    /// Lexicographic sort == display order among siblings.
    pub sort_key: String,
    pub label: String,
    /// Numeric rendition for column display, where one applies.
    pub value: Option<String>,
}

impl PathNode {
    pub fn new(sort_key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            sort_key: sort_key.into(),
            label: label.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Terminal placeholder for messages too short to decode further.
    fn invalid() -> Self {
        PathNode::new("zz", "Invalid message")
    }
}

/// Ordered taxonomy path, most significant level first (1-5 nodes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationPath {
    nodes: SmallVec<[PathNode; 5]>,
}

impl ClassificationPath {
    pub fn push(&mut self, node: PathNode) {
        self.nodes.push(node);
    }

    /// Insert a node at a fixed position, shifting later levels down.
    /// Clamped to append when the path is shorter than `index`.
    pub fn insert(&mut self, index: usize, node: PathNode) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.iter()
    }

    /// Labels joined for diagnostics and tests.
    pub fn labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }
}

/// Option kinds a message can decode into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FieldKind {
    Status,
    Length,
    Tick,
    Track,
    Channel,
    Note,
    Velocity,
    Pressure,
    Controller,
    Value,
    Program,
    PitchBend,
    Parameter,
    VendorId,
    VendorName,
    TempoMpq,
    TempoBpm,
    MetaType,
    SubId1,
    SubId2,
    Text,
}

/// Flat decoded-field record, one per message. Deterministic iteration
/// order (keyed by `FieldKind`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFields {
    fields: BTreeMap<FieldKind, String>,
}

impl DecodedFields {
    pub fn set(&mut self, kind: FieldKind, value: impl Into<String>) {
        self.fields.insert(kind, value.into());
    }

    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        self.fields.get(&kind).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Classification output: the taxonomy path and the decoded fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classified {
    pub path: ClassificationPath,
    pub fields: DecodedFields,
}

/// Classify one message. Pure function of `(msg, kind, selection)`.
pub fn classify(
    msg: &RawMessage,
    kind: &MessageKind,
    selection: Option<&ParamSelection>,
) -> Classified {
    let mut path = ClassificationPath::default();
    let mut fields = DecodedFields::default();

    fields.set(FieldKind::Tick, msg.tick.to_string());
    fields.set(FieldKind::Track, msg.track.to_string());
    fields.set(FieldKind::Length, msg.bytes.len().to_string());
    if let Some(status) = msg.status() {
        fields.set(FieldKind::Status, format!("{status:02X}"));
    }

    match kind {
        MessageKind::Voice {
            command,
            channel,
            data1,
            data2,
        } => {
            fields.set(FieldKind::Channel, channel.to_string());
            path.push(PathNode::new("01", "Channel Voice"));
            classify_voice(&mut path, &mut fields, *command, *data1, *data2, selection);
        }
        MessageKind::SystemCommon { status } => {
            path.push(PathNode::new("02", "System Common"));
            path.push(system_common_node(*status));
        }
        MessageKind::SystemRealtime { status } => {
            path.push(PathNode::new("03", "System Realtime"));
            path.push(system_realtime_node(*status));
        }
        MessageKind::SysEx { data } => {
            path.push(PathNode::new("04", "System Exclusive"));
            classify_sysex(&mut path, &mut fields, data);
        }
        MessageKind::Meta { meta_type, data } => {
            path.push(PathNode::new("05", "Meta"));
            classify_meta(&mut path, &mut fields, *meta_type, data);
        }
        MessageKind::Invalid => {
            path.push(PathNode::invalid());
        }
    }

    Classified { path, fields }
}

fn classify_voice(
    path: &mut ClassificationPath,
    fields: &mut DecodedFields,
    command: VoiceCommand,
    data1: Option<u8>,
    data2: Option<u8>,
    selection: Option<&ParamSelection>,
) {
    let nibble = match command {
        VoiceCommand::NoteOff => 0x80u8,
        VoiceCommand::NoteOn => 0x90,
        VoiceCommand::PolyPressure => 0xA0,
        VoiceCommand::ControlChange => 0xB0,
        VoiceCommand::ProgramChange => 0xC0,
        VoiceCommand::ChannelPressure => 0xD0,
        VoiceCommand::PitchBend => 0xE0,
    };
    path.push(PathNode::new(format!("{nibble:02x}"), command.name()));

    let Some(d1) = data1 else {
        path.push(PathNode::invalid());
        return;
    };

    match command {
        VoiceCommand::NoteOff | VoiceCommand::NoteOn => {
            fields.set(FieldKind::Note, d1.to_string());
            if let Some(d2) = data2 {
                fields.set(FieldKind::Velocity, d2.to_string());
            }
        }
        VoiceCommand::PolyPressure => {
            fields.set(FieldKind::Note, d1.to_string());
            if let Some(d2) = data2 {
                fields.set(FieldKind::Pressure, d2.to_string());
            }
        }
        VoiceCommand::ControlChange => {
            classify_control_change(path, fields, d1, data2, selection);
        }
        VoiceCommand::ProgramChange => {
            fields.set(FieldKind::Program, d1.to_string());
        }
        VoiceCommand::ChannelPressure => {
            fields.set(FieldKind::Pressure, d1.to_string());
        }
        VoiceCommand::PitchBend => {
            if let Some(d2) = data2 {
                let bend = ((d2 as i32) << 7 | d1 as i32) - 8192;
                fields.set(FieldKind::PitchBend, bend.to_string());
            }
        }
    }
}

fn classify_control_change(
    path: &mut ClassificationPath,
    fields: &mut DecodedFields,
    controller: u8,
    value: Option<u8>,
    selection: Option<&ParamSelection>,
) {
    fields.set(FieldKind::Controller, controller.to_string());
    if let Some(v) = value {
        fields.set(FieldKind::Value, v.to_string());
    }

    match controller {
        // (N)RPN selection: the controller is not a fixed parameter, it
        // picks which one subsequent data entry acts on.
        0x62..=0x65 => {
            let (group_key, group_label, is_msb) = match controller {
                0x65 => ("65", "RPN", true),
                0x64 => ("65", "RPN", false),
                0x63 => ("63", "NRPN", true),
                _ => ("63", "NRPN", false),
            };
            path.push(PathNode::new(group_key, group_label));
            path.push(msb_lsb_node(is_msb));
            if let Some(v) = value {
                path.push(
                    PathNode::new(format!("{v:02x}"), format!("Number {v}"))
                        .with_value(v.to_string()),
                );
            }
        }
        // Data entry / increment / decrement apply to whatever (N)RPN is
        // active on the channel; the parameter-name level is inserted at a
        // fixed index after the base path is built.
        0x06 | 0x26 | 0x60 | 0x61 => {
            match controller {
                0x06 | 0x26 => {
                    path.push(
                        PathNode::new("06", "Data Entry").with_value(controller.to_string()),
                    );
                    path.push(msb_lsb_node(controller == 0x06));
                }
                0x60 => {
                    path.push(
                        PathNode::new("60", "Data Increment").with_value("96".to_string()),
                    );
                }
                _ => {
                    path.push(
                        PathNode::new("61", "Data Decrement").with_value("97".to_string()),
                    );
                }
            }
            let param = insert_param_node(path, selection);
            fields.set(FieldKind::Parameter, param);
        }
        _ => match controllers::controller(controller) {
            Some((name, role)) => {
                // The pair shares one node, so its value is the pair's MSB
                // number regardless of which half arrived.
                let key = controllers::controller_sort_key(controller);
                path.push(PathNode::new(format!("{key:02x}"), name).with_value(key.to_string()));
                if let Some(role) = role {
                    path.push(msb_lsb_node(role == controllers::PairRole::Msb));
                }
            }
            None => {
                path.push(
                    PathNode::new(format!("zz{controller:02x}"), "Unknown Controller")
                        .with_value(controller.to_string()),
                );
            }
        },
    }
}

fn msb_lsb_node(is_msb: bool) -> PathNode {
    if is_msb {
        PathNode::new("00", "MSB")
    } else {
        PathNode::new("01", "LSB")
    }
}

/// The RPN/NRPN re-leveling transformation: insert the parameter-name node
/// at index 3 (after category / command / controller, before any MSB/LSB
/// node), shifting later levels down by one. Returns the label used, for
/// the decoded-field record.
fn insert_param_node(path: &mut ClassificationPath, selection: Option<&ParamSelection>) -> String {
    let node = match selection {
        None => PathNode::new("zz", "unset"),
        Some(sel) if sel.is_null() => PathNode::new("zz", "unset"),
        Some(sel) => {
            let label = sel.param_label();
            let key = match sel.kind {
                crate::params::ParamKind::Rpn => {
                    if controllers::rpn_name(sel.msb, sel.lsb).is_some() {
                        format!("{:02x}{:02x}", sel.msb, sel.lsb)
                    } else {
                        format!("zr{:02x}{:02x}", sel.msb, sel.lsb)
                    }
                }
                crate::params::ParamKind::Nrpn => {
                    format!("zn{:02x}{:02x}", sel.msb, sel.lsb)
                }
            };
            PathNode::new(key, label)
        }
    };
    let label = node.label.clone();
    path.insert(3, node);
    label
}

fn system_common_node(status: u8) -> PathNode {
    let label = match status {
        0xF1 => "MTC Quarter Frame",
        0xF2 => "Song Position Pointer",
        0xF3 => "Song Select",
        0xF6 => "Tune Request",
        0xF7 => "End of Exclusive",
        _ => {
            return PathNode::new(format!("zz{status:02x}"), "Undefined")
                .with_value(format!("{status:02X}"));
        }
    };
    PathNode::new(format!("{status:02x}"), label)
}

fn system_realtime_node(status: u8) -> PathNode {
    let label = match status {
        0xF8 => "Timing Clock",
        0xFA => "Start",
        0xFB => "Continue",
        0xFC => "Stop",
        0xFE => "Active Sensing",
        _ => {
            return PathNode::new(format!("zz{status:02x}"), "Undefined")
                .with_value(format!("{status:02X}"));
        }
    };
    PathNode::new(format!("{status:02x}"), label)
}

fn classify_sysex(path: &mut ClassificationPath, fields: &mut DecodedFields, data: &[u8]) {
    match data.first().copied() {
        None => path.push(PathNode::invalid()),
        Some(0x7E) => {
            path.push(PathNode::new("7e", "Universal Non-Realtime"));
            classify_universal(path, fields, universal::NON_REALTIME, &data[1..]);
        }
        Some(0x7F) => {
            path.push(PathNode::new("7f", "Universal Realtime"));
            classify_universal(path, fields, universal::REALTIME, &data[1..]);
        }
        Some(0x7D) => {
            path.push(PathNode::new("7d", "Educational Use"));
        }
        Some(_) => {
            push_vendor_node(path, fields, data);
        }
    }
}

/// Decode `[device, sub_id_1, sub_id_2, ...]` of a Universal SysEx payload.
/// Truncation stops the descent; it never fabricates deeper levels.
fn classify_universal(
    path: &mut ClassificationPath,
    fields: &mut DecodedFields,
    table: &'static [universal::MainType],
    rest: &[u8],
) {
    let Some(&device) = rest.first() else {
        return;
    };
    if device == 0x7F {
        path.push(PathNode::new("7f", "All Devices"));
    } else {
        path.push(
            PathNode::new(format!("{device:02x}"), format!("Device {device}"))
                .with_value(device.to_string()),
        );
    }

    let Some(&sub1) = rest.get(1) else {
        return;
    };
    let main = universal::main_type(table, sub1);
    match main {
        Some(main) => {
            path.push(
                PathNode::new(format!("{sub1:02x}"), main.1).with_value(sub1.to_string()),
            );
            fields.set(FieldKind::SubId1, main.1);

            // Main types without a sub-table carry no sub-type level, even
            // when more bytes follow.
            if main.2.is_some() {
                if let Some(&sub2) = rest.get(2) {
                    match universal::sub_type(main, sub2) {
                        Some(name) => {
                            path.push(
                                PathNode::new(format!("{sub2:02x}"), name)
                                    .with_value(sub2.to_string()),
                            );
                            fields.set(FieldKind::SubId2, name);
                        }
                        None => {
                            path.push(
                                PathNode::new(format!("zz{sub2:02x}"), "Unknown Sub-Type")
                                    .with_value(sub2.to_string()),
                            );
                        }
                    }
                }
            }
        }
        None => {
            path.push(
                PathNode::new(format!("zz{sub1:02x}"), "Unknown Sub-ID")
                    .with_value(sub1.to_string()),
            );
        }
    }
}

/// Vendor resolution shared by vendor SysEx and Sequencer Specific meta.
fn push_vendor_node(path: &mut ClassificationPath, fields: &mut DecodedFields, payload: &[u8]) {
    match vendors::VendorId::from_payload(payload) {
        Some(id) => {
            fields.set(FieldKind::VendorId, id.display_id());
            match id.name() {
                Some(name) => {
                    fields.set(FieldKind::VendorName, name);
                    path.push(PathNode::new(id.sort_key(), name));
                }
                None => {
                    path.push(PathNode::new(
                        format!("zz{}", id.sort_key()),
                        "Unknown Manufacturer",
                    ));
                }
            }
        }
        None => path.push(PathNode::invalid()),
    }
}

fn classify_meta(
    path: &mut ClassificationPath,
    fields: &mut DecodedFields,
    meta_type: u8,
    data: &[u8],
) {
    fields.set(FieldKind::MetaType, format!("{meta_type:02X}"));
    match meta::meta_name(meta_type) {
        Some(name) => {
            path.push(PathNode::new(format!("{meta_type:02x}"), name));
        }
        None => {
            path.push(PathNode::new(format!("zz{meta_type:02x}"), "Unknown Meta"));
            return;
        }
    }

    match meta_type {
        0x51 => {
            // Malformed tempo payload degrades to the bare type node.
            if data.len() == 3 {
                let mpq = u32::from_be_bytes([0, data[0], data[1], data[2]]);
                fields.set(FieldKind::TempoMpq, mpq.to_string());
                fields.set(
                    FieldKind::TempoBpm,
                    format!("{:.2}", 60_000_000.0 / mpq as f64),
                );
            }
        }
        0x7F => {
            push_vendor_node(path, fields, data);
        }
        t if meta::is_text(t) => {
            fields.set(FieldKind::Text, String::from_utf8_lossy(data).into_owned());
        }
        _ => {}
    }
}
