//! Sequence statistics and deterministic message taxonomy for MIDI 1.0.
//!
//! midiscope ingests an already-materialized MIDI sequence (tracks of
//! time-ordered raw messages) and produces two query-able artifacts:
//!
//! - **Statistics**: tempo map and time-weighted tempo stats, per-channel
//!   note/program usage, and a per-channel history of RPN/NRPN selections.
//! - **Classification**: every message decoded into a sorted multi-level
//!   taxonomy path plus a flat decoded-field record, merged into a display
//!   tree. The same input always yields an identical tree shape and sort
//!   order, so the output is cacheable and diffable.
//!
//! # Example
//!
//! ```
//! use midiscope::{SequenceBuilder, SequenceReport};
//!
//! let seq = SequenceBuilder::new(480)
//!     .track()
//!     .message(0, &[0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]) // 120 BPM
//!     .message(0, &[0x90, 60, 100])
//!     .build();
//!
//! let report = SequenceReport::build(&seq).unwrap();
//! assert_eq!(report.records.len(), 2);
//! assert_eq!(report.analysis.channel(0).notes.get(&60), Some(&1));
//! ```
//!
//! Feature `smf` (default) adds Standard MIDI File ingestion via midly:
//! `Sequence::from_smf_bytes` / `Sequence::from_smf_file`.

pub mod error;
pub use error::{Error, Result};

mod sequence;
pub use sequence::{RawMessage, Sequence, SequenceBuilder, Track};

mod message;
pub use message::{MessageKind, VoiceCommand};

pub mod tables;
pub use tables::vendors::VendorId;

mod params;
pub use params::{ChannelParamHistory, ParamKind, ParamSelection, CHANNELS};

mod tempo;
pub use tempo::{TempoEntry, TempoMap, TempoStats, DEFAULT_BPM, DEFAULT_MPQ};

mod analyzer;
pub use analyzer::{analyze, AnalysisResult, ChannelUsage};

mod classify;
pub use classify::{classify, Classified, ClassificationPath, DecodedFields, FieldKind, PathNode};

mod tree;
pub use tree::MessageTreeNode;

mod report;
pub use report::{MessageRecord, SequenceReport};

#[cfg(feature = "smf")]
mod smf;
