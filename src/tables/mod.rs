//! Static lookup data for the MIDI 1.0 wire format.
//!
//! All tables are immutable process-wide constants, safe to share across
//! threads. Content follows the MIDI 1.0 detailed specification and the MMA
//! manufacturer ID list.

pub mod controllers;
pub mod meta;
pub mod universal;
pub mod vendors;
