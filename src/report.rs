//! Pipeline glue: analyze once, classify every message against the
//! finished channel state, and aggregate the display tree.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::{analyze, AnalysisResult};
use crate::classify::{classify, Classified, FieldKind};
use crate::error::Result;
use crate::message::MessageKind;
use crate::sequence::Sequence;
use crate::tree::MessageTreeNode;

/// Option kinds aggregated at every tree node.
const DISTINCT_OPTIONS: &[FieldKind] = &[FieldKind::Channel, FieldKind::Tick, FieldKind::Track];

/// One classified message in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub tick: u64,
    pub track: u32,
    pub index_in_track: u32,
    pub classified: Classified,
}

/// Full analysis output for a sequence: statistics, flat per-message
/// records, and the aggregated display tree. The same input sequence always
/// yields an identical tree shape and sort order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceReport {
    pub analysis: AnalysisResult,
    pub records: Vec<MessageRecord>,
    pub tree: MessageTreeNode,
}

impl SequenceReport {
    pub fn build(sequence: &Sequence) -> Result<Self> {
        let analysis = analyze(sequence)?;

        let mut records = Vec::with_capacity(sequence.message_count());
        let mut tree = MessageTreeNode::root();

        for msg in sequence.messages() {
            let kind = MessageKind::from_raw(msg);
            let selection = match kind.channel() {
                Some(channel) => analysis.params.selection_at(channel, msg.tick)?,
                None => None,
            };
            let classified = classify(msg, &kind, selection);
            tree.insert(&classified.path, &classified.fields, DISTINCT_OPTIONS);
            records.push(MessageRecord {
                tick: msg.tick,
                track: msg.track,
                index_in_track: msg.index_in_track,
                classified,
            });
        }

        debug!(
            records = records.len(),
            categories = tree.child_count(),
            "sequence report built"
        );

        Ok(Self {
            analysis,
            records,
            tree,
        })
    }
}
