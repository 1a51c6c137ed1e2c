//! Error types for yantra-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{what} out of range: {value} (expected {lo}..={hi})")]
    InvalidRange {
        what: &'static str,
        value: i64,
        lo: i64,
        hi: i64,
    },

    #[error("seed decode failed: {0}")]
    SeedDecode(String),

    #[error("seed encode failed: {0}")]
    SeedEncode(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_range(what: &'static str, value: i64, lo: i64, hi: i64) -> Self {
        Self::InvalidRange {
            what,
            value,
            lo,
            hi,
        }
    }

    pub fn seed_decode(message: impl Into<String>) -> Self {
        Self::SeedDecode(message.into())
    }

    pub fn seed_encode(message: impl Into<String>) -> Self {
        Self::SeedEncode(message.into())
    }
}
