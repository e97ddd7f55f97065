// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Strict CBOR codec for mapstudio records.
//!
//! The layout of every record is driven by its kind's
//! [`RecordSchema`](mapstudio_core::RecordSchema): fields are written in
//! schema order without names, so a record that does not match its schema
//! can neither be encoded nor decoded.
#![forbid(unsafe_code)]

mod cbor;
mod error;

pub use cbor::{
    decode_record, decode_record_set, encode_record, encode_record_set, RecordSet,
    FORMAT_VERSION,
};
pub use error::CodecError;
