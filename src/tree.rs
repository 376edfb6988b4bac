//! Hierarchical aggregation of classification paths.
//!
//! Each inserted path is merged into the tree by `sort_key`; identical
//! prefixes share nodes. Every node along the way collects the caller's
//! chosen "distinct option" field values, used purely for sorting and
//! column summaries at display time. Nodes hold no message payload and no
//! back-references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{ClassificationPath, DecodedFields, FieldKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageTreeNode {
    pub label: String,
    /// Numeric rendition from the path node, where one applies.
    pub value: Option<String>,
    /// Children keyed by sort key; BTreeMap iteration is the display order.
    children: BTreeMap<String, MessageTreeNode>,
    /// Option multisets, one per requested field kind, in insertion order.
    options: BTreeMap<FieldKind, Vec<String>>,
    /// Messages routed through this node.
    message_count: u64,
}

impl MessageTreeNode {
    /// An unlabeled root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Merge one classified message into the tree. `distinct` names the
    /// field kinds whose values are collected at every node along the path.
    pub fn insert(
        &mut self,
        path: &ClassificationPath,
        fields: &DecodedFields,
        distinct: &[FieldKind],
    ) {
        let mut node = self;
        node.record(fields, distinct);
        for path_node in path.iter() {
            node = node
                .children
                .entry(path_node.sort_key.clone())
                .or_insert_with(|| MessageTreeNode {
                    label: path_node.label.clone(),
                    value: path_node.value.clone(),
                    ..Default::default()
                });
            node.record(fields, distinct);
        }
    }

    fn record(&mut self, fields: &DecodedFields, distinct: &[FieldKind]) {
        self.message_count += 1;
        for &kind in distinct {
            if let Some(value) = fields.get(kind) {
                self.options.entry(kind).or_default().push(value.to_string());
            }
        }
    }

    /// Children in display (sort-key) order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &MessageTreeNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn child(&self, sort_key: &str) -> Option<&MessageTreeNode> {
        self.children.get(sort_key)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Collected values for one option kind.
    pub fn options(&self, kind: FieldKind) -> &[String] {
        self.options.get(&kind).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    /// Child sort keys, for shape comparisons.
    pub fn child_keys(&self) -> Vec<&str> {
        self.children.keys().map(|k| k.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PathNode;

    fn path(keys: &[(&str, &str)]) -> ClassificationPath {
        let mut p = ClassificationPath::default();
        for (key, label) in keys {
            p.push(PathNode::new(*key, *label));
        }
        p
    }

    fn fields_with_channel(channel: &str) -> DecodedFields {
        let mut f = DecodedFields::default();
        f.set(FieldKind::Channel, channel);
        f
    }

    #[test]
    fn test_shared_prefix_merges() {
        let mut root = MessageTreeNode::root();
        let f = DecodedFields::default();
        root.insert(&path(&[("01", "Voice"), ("90", "Note On")]), &f, &[]);
        root.insert(&path(&[("01", "Voice"), ("80", "Note Off")]), &f, &[]);

        assert_eq!(root.child_count(), 1);
        let voice = root.child("01").unwrap();
        assert_eq!(voice.child_keys(), ["80", "90"]);
        assert_eq!(voice.message_count(), 2);
    }

    #[test]
    fn test_idempotent_structure_and_monotonic_options() {
        let mut once = MessageTreeNode::root();
        let mut twice = MessageTreeNode::root();
        let p = path(&[("01", "Voice"), ("90", "Note On")]);
        let f = fields_with_channel("3");

        once.insert(&p, &f, &[FieldKind::Channel]);
        twice.insert(&p, &f, &[FieldKind::Channel]);
        twice.insert(&p, &f, &[FieldKind::Channel]);

        let leaf_once = once.child("01").unwrap().child("90").unwrap();
        let leaf_twice = twice.child("01").unwrap().child("90").unwrap();
        assert_eq!(once.child_keys(), twice.child_keys());
        assert_eq!(leaf_once.child_keys(), leaf_twice.child_keys());
        assert_eq!(leaf_once.options(FieldKind::Channel), ["3"]);
        assert_eq!(leaf_twice.options(FieldKind::Channel), ["3", "3"]);
    }

    #[test]
    fn test_options_collected_along_the_whole_path() {
        let mut root = MessageTreeNode::root();
        root.insert(
            &path(&[("01", "Voice"), ("90", "Note On")]),
            &fields_with_channel("0"),
            &[FieldKind::Channel],
        );
        root.insert(
            &path(&[("01", "Voice"), ("80", "Note Off")]),
            &fields_with_channel("5"),
            &[FieldKind::Channel],
        );

        let voice = root.child("01").unwrap();
        assert_eq!(voice.options(FieldKind::Channel), ["0", "5"]);
        assert_eq!(root.options(FieldKind::Channel), ["0", "5"]);
    }

    #[test]
    fn test_missing_distinct_field_is_skipped() {
        let mut root = MessageTreeNode::root();
        root.insert(
            &path(&[("05", "Meta")]),
            &DecodedFields::default(),
            &[FieldKind::Channel],
        );
        assert!(root.child("05").unwrap().options(FieldKind::Channel).is_empty());
    }

    #[test]
    fn test_children_iterate_in_sort_key_order() {
        let mut root = MessageTreeNode::root();
        let f = DecodedFields::default();
        root.insert(&path(&[("zz41", "Unknown")]), &f, &[]);
        root.insert(&path(&[("41", "Roland")]), &f, &[]);
        root.insert(&path(&[("000041", "Microsoft")]), &f, &[]);

        let keys = root.child_keys();
        assert_eq!(keys, ["000041", "41", "zz41"]);
    }
}
