// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Codec errors.

use mapstudio_core::FieldError;
use thiserror::Error;

/// Failure to encode or decode a record.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed or unexpected CBOR.
    #[error("malformed record data: {0}")]
    Decode(#[from] minicbor::decode::Error),
    /// The encoder failed.
    #[error("cannot encode record: {0}")]
    Encode(String),
    /// The family/subtype tag pair names no kind.
    #[error("unknown entry kind tags {family}/{subtype}")]
    UnknownKind {
        /// Family tag.
        family: u8,
        /// Subtype tag.
        subtype: u8,
    },
    /// The record does not match its kind's schema.
    #[error("record `{name}`: {source}")]
    Schema {
        /// Record name.
        name: String,
        /// First schema violation.
        source: FieldError,
    },
    /// The record set was written by an unsupported format version.
    #[error("unsupported record set version {found} (expected {expected})")]
    Version {
        /// Version on the wire.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}
