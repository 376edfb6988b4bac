//! Per-channel RPN/NRPN selection tracking.
//!
//! Controllers 0x62-0x65 select which parameter subsequent data-entry
//! messages act on. The analyzer records every selection change as a
//! tick-keyed history entry per channel; the classifier later asks "what was
//! selected on this channel at this tick" with predecessor semantics.
//! Write-once during analysis, read-only afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tables::controllers;

pub const CHANNELS: usize = 16;

/// RPN null selection bytes (0x7F/0x7F deselects any parameter).
const NULL_BYTE: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Rpn,
    Nrpn,
}

/// The (N)RPN selected on a channel at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSelection {
    pub kind: ParamKind,
    pub msb: u8,
    pub lsb: u8,
}

impl ParamSelection {
    /// The RPN 7F/7F pair deselects the active parameter.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.kind == ParamKind::Rpn && self.msb == NULL_BYTE && self.lsb == NULL_BYTE
    }

    /// Human-readable parameter name for data-entry classification: the RPN
    /// table name, a stable "unknown" for unlisted RPNs, the raw number for
    /// NRPNs, and "unset" for the null selection.
    pub fn param_label(&self) -> String {
        if self.is_null() {
            return "unset".to_string();
        }
        match self.kind {
            ParamKind::Rpn => match controllers::rpn_name(self.msb, self.lsb) {
                Some(name) => name.to_string(),
                None => format!("Unknown RPN {:02X} {:02X}", self.msb, self.lsb),
            },
            ParamKind::Nrpn => format!("NRPN {:02X} {:02X}", self.msb, self.lsb),
        }
    }
}

/// Tick-ordered selection history for all 16 channels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelParamHistory {
    channels: Vec<BTreeMap<u64, ParamSelection>>,
    /// Running (kind, msb, lsb) per channel, used while the analyzer feeds
    /// selection changes in.
    #[serde(skip)]
    running: Vec<Option<ParamSelection>>,
}

impl ChannelParamHistory {
    pub fn new() -> Self {
        Self {
            channels: vec![BTreeMap::new(); CHANNELS],
            running: vec![None; CHANNELS],
        }
    }

    /// Feed one control-change message. Only the four select controllers
    /// mutate the history; everything else is ignored. Channel range is a
    /// producer contract, checked here once.
    pub fn observe(&mut self, channel: u8, tick: u64, controller: u8, value: u8) -> Result<()> {
        if channel as usize >= CHANNELS {
            return Err(Error::InvalidChannel(channel));
        }
        // A deserialized history has an empty running vector.
        if self.running.len() < CHANNELS {
            self.running.resize(CHANNELS, None);
        }
        let (kind, is_msb) = match controller {
            0x65 => (ParamKind::Rpn, true),
            0x64 => (ParamKind::Rpn, false),
            0x63 => (ParamKind::Nrpn, true),
            0x62 => (ParamKind::Nrpn, false),
            _ => return Ok(()),
        };

        let slot = &mut self.running[channel as usize];
        let mut next = match *slot {
            // Switching kind keeps the other byte of the running pair.
            Some(prev) => ParamSelection { kind, ..prev },
            None => ParamSelection {
                kind,
                msb: NULL_BYTE,
                lsb: NULL_BYTE,
            },
        };
        if is_msb {
            next.msb = value;
        } else {
            next.lsb = value;
        }
        *slot = Some(next);
        self.channels[channel as usize].insert(tick, next);
        Ok(())
    }

    /// Selection in effect on `channel` at `tick`: the entry with the
    /// greatest key ≤ `tick`, or `None` before the first entry.
    pub fn selection_at(&self, channel: u8, tick: u64) -> Result<Option<&ParamSelection>> {
        let history = self
            .channels
            .get(channel as usize)
            .ok_or(Error::InvalidChannel(channel))?;
        Ok(history.range(..=tick).next_back().map(|(_, sel)| sel))
    }

    /// Number of recorded selection changes on a channel.
    pub fn len(&self, channel: u8) -> usize {
        self.channels
            .get(channel as usize)
            .map(|h| h.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(|h| h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predecessor_query() {
        let mut history = ChannelParamHistory::new();
        history.observe(2, 100, 0x65, 0x00).unwrap();
        history.observe(2, 100, 0x64, 0x00).unwrap();

        assert_eq!(history.selection_at(2, 99).unwrap(), None);
        let sel = history.selection_at(2, 100).unwrap().unwrap();
        assert_eq!(sel.kind, ParamKind::Rpn);
        assert_eq!((sel.msb, sel.lsb), (0, 0));
        // Same result anywhere after, until the next change.
        assert_eq!(history.selection_at(2, 10_000).unwrap(), Some(sel));
    }

    #[test]
    fn test_later_insert_does_not_alter_earlier_queries() {
        let mut history = ChannelParamHistory::new();
        history.observe(0, 10, 0x65, 0x00).unwrap();
        history.observe(0, 10, 0x64, 0x00).unwrap();
        let before = *history.selection_at(0, 50).unwrap().unwrap();

        history.observe(0, 200, 0x64, 0x05).unwrap();
        assert_eq!(history.selection_at(0, 50).unwrap(), Some(&before));
        let later = history.selection_at(0, 200).unwrap().unwrap();
        assert_eq!(later.lsb, 0x05);
    }

    #[test]
    fn test_null_reset_is_an_entry() {
        let mut history = ChannelParamHistory::new();
        history.observe(5, 0, 0x65, 0x00).unwrap();
        history.observe(5, 0, 0x64, 0x00).unwrap();
        history.observe(5, 40, 0x65, 0x7F).unwrap();
        history.observe(5, 40, 0x64, 0x7F).unwrap();

        assert!(!history.selection_at(5, 20).unwrap().unwrap().is_null());
        assert!(history.selection_at(5, 40).unwrap().unwrap().is_null());
        assert_eq!(history.len(5), 4);
    }

    #[test]
    fn test_kind_switch_keeps_other_byte() {
        let mut history = ChannelParamHistory::new();
        history.observe(0, 0, 0x63, 0x12).unwrap();
        history.observe(0, 1, 0x62, 0x34).unwrap();
        let sel = history.selection_at(0, 1).unwrap().unwrap();
        assert_eq!(sel.kind, ParamKind::Nrpn);
        assert_eq!((sel.msb, sel.lsb), (0x12, 0x34));
    }

    #[test]
    fn test_non_select_controllers_ignored() {
        let mut history = ChannelParamHistory::new();
        history.observe(0, 0, 0x07, 100).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_channel_out_of_range() {
        let mut history = ChannelParamHistory::new();
        assert!(history.observe(16, 0, 0x65, 0).is_err());
        assert!(history.selection_at(16, 0).is_err());
    }

    #[test]
    fn test_param_labels() {
        let pbs = ParamSelection {
            kind: ParamKind::Rpn,
            msb: 0,
            lsb: 0,
        };
        assert_eq!(pbs.param_label(), "Pitch Bend Sensitivity");

        let nrpn = ParamSelection {
            kind: ParamKind::Nrpn,
            msb: 0x01,
            lsb: 0x20,
        };
        assert_eq!(nrpn.param_label(), "NRPN 01 20");

        let null = ParamSelection {
            kind: ParamKind::Rpn,
            msb: 0x7F,
            lsb: 0x7F,
        };
        assert_eq!(null.param_label(), "unset");
    }
}
