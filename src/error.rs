//! Error types for sequence ingestion and analysis.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIDI file parse error: {0}")]
    SmfParse(String),

    #[error("Unsupported SMF timing format (SMPTE timecode)")]
    UnsupportedTiming,

    #[error("Channel {0} out of range (0-15)")]
    InvalidChannel(u8),
}

#[cfg(feature = "smf")]
impl From<midly::Error> for Error {
    fn from(e: midly::Error) -> Self {
        Error::SmfParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
