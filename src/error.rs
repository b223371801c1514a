// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Errors surfaced by the reader.
///
/// A missing vertex or edge is *not* an error: lookups return `Option`/bespoke
/// result types for that. This enum only covers the two remaining first-class
/// outcomes a caller can catch and recover from. Block/ordinal arithmetic that
/// the caller has violated (category 4 of the error taxonomy) is a programmer
/// bug and panics instead of returning here.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing stream could not be read, or the bytes read did not form a
    /// well-formed record.
    #[error("failed to deserialize {kind} at offset {offset}, length {length}: {source}")]
    Deserialize {
        kind: &'static str,
        offset: u64,
        length: u64,
        #[source]
        source: DeserializeCause,
    },

    /// The caller asked for an operation this read-only source does not
    /// support (mutation, vertex enumeration, vertex counting).
    #[error("operation not available on a read-only CH graph source: {0}")]
    Unsupported(&'static str),

    /// The `ReaderConfig` supplied at construction time was internally
    /// inconsistent.
    #[error("invalid reader configuration: {0}")]
    InvalidConfig(String),
}

/// The reason a deserialization attempt failed.
#[derive(Debug, Error)]
pub enum DeserializeCause {
    #[error("stream read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record was internally inconsistent: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
