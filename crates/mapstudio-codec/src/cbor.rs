// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CBOR encoding and decoding for records and record sets.

use mapstudio_core::{schema_for, EntryKind, FieldType, FieldValue, Record};
use minicbor::data::Type;
use minicbor::{Decoder, Encoder};

use crate::error::CodecError;

/// Record-set format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// The records of one scope, as stored on disk.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordSet {
    /// Scope label, typically the map id.
    pub scope: String,
    /// Records in file order.
    pub records: Vec<Record>,
}

type EncodeResult<W> = Result<(), minicbor::encode::Error<<W as minicbor::encode::Write>::Error>>;

// ============================================================================
// Shared helpers
// ============================================================================

fn expect_array(
    d: &mut Decoder<'_>,
    what: &str,
    expected: Option<usize>,
) -> Result<usize, minicbor::decode::Error> {
    let len = d
        .array()?
        .ok_or_else(|| minicbor::decode::Error::message(format!("{what}: expected definite array")))?;
    let len = usize::try_from(len)
        .map_err(|_| minicbor::decode::Error::message(format!("{what}: array too long")))?;
    match expected {
        Some(n) if n != len => Err(minicbor::decode::Error::message(format!(
            "{what}: expected {n} elements, got {len}"
        ))),
        _ => Ok(len),
    }
}

fn decode_f32(d: &mut Decoder<'_>) -> Result<f32, minicbor::decode::Error> {
    match d.datatype()? {
        Type::F32 => d.f32(),
        t => Err(minicbor::decode::Error::message(format!(
            "expected f32, got {t:?}"
        ))),
    }
}

fn array_len<W: minicbor::encode::Write>(
    e: &mut Encoder<W>,
    len: usize,
) -> EncodeResult<W> {
    e.array(len as u64)?;
    Ok(())
}

// ============================================================================
// Field values
// ============================================================================

fn encode_field<W: minicbor::encode::Write>(
    e: &mut Encoder<W>,
    value: &FieldValue,
) -> EncodeResult<W> {
    match value {
        FieldValue::Bool(b) => {
            e.bool(*b)?;
        }
        FieldValue::Int(i) => {
            e.i64(*i)?;
        }
        FieldValue::Float(f) => {
            e.f32(*f)?;
        }
        FieldValue::Vec3(v) => {
            array_len(e, 3)?;
            for c in v {
                e.f32(*c)?;
            }
        }
        FieldValue::Str(s) | FieldValue::Name(s) => {
            e.str(s)?;
        }
        FieldValue::IntList(items) => {
            array_len(e, items.len())?;
            for i in items {
                e.i64(*i)?;
            }
        }
        FieldValue::Mask(words) => {
            array_len(e, words.len())?;
            for w in words {
                e.u32(*w)?;
            }
        }
        FieldValue::Names(names) => {
            array_len(e, names.len())?;
            for n in names {
                e.str(n)?;
            }
        }
    }
    Ok(())
}

fn decode_field(
    d: &mut Decoder<'_>,
    field: &str,
    ty: FieldType,
) -> Result<FieldValue, minicbor::decode::Error> {
    Ok(match ty {
        FieldType::Bool => FieldValue::Bool(d.bool()?),
        FieldType::Int => FieldValue::Int(d.i64()?),
        FieldType::Float => FieldValue::Float(decode_f32(d)?),
        FieldType::Vec3 => {
            expect_array(d, field, Some(3))?;
            FieldValue::Vec3([decode_f32(d)?, decode_f32(d)?, decode_f32(d)?])
        }
        FieldType::Str => FieldValue::Str(d.str()?.to_owned()),
        FieldType::Name => FieldValue::Name(d.str()?.to_owned()),
        FieldType::IntList(n) => {
            expect_array(d, field, Some(n))?;
            FieldValue::IntList((0..n).map(|_| d.i64()).collect::<Result<_, _>>()?)
        }
        FieldType::Mask(n) => {
            expect_array(d, field, Some(n))?;
            FieldValue::Mask((0..n).map(|_| d.u32()).collect::<Result<_, _>>()?)
        }
        FieldType::Names(n) => {
            expect_array(d, field, Some(n))?;
            FieldValue::Names(
                (0..n)
                    .map(|_| d.str().map(str::to_owned))
                    .collect::<Result<_, _>>()?,
            )
        }
    })
}

// ============================================================================
// Records
// ============================================================================

fn encode_record_inner<W: minicbor::encode::Write>(
    e: &mut Encoder<W>,
    record: &Record,
) -> Result<(), CodecError>
where
    W::Error: std::fmt::Display,
{
    let schema = schema_for(record.kind);
    schema.check(record).map_err(|source| CodecError::Schema {
        name: record.name.clone(),
        source,
    })?;
    let encode_err = |e: minicbor::encode::Error<W::Error>| CodecError::Encode(e.to_string());

    array_len(e, 4).map_err(encode_err)?;
    e.u8(record.kind.family().tag())
        .and_then(|e| e.u8(record.kind.subtype_tag()))
        .and_then(|e| e.str(&record.name))
        .map_err(encode_err)?;
    array_len(e, schema.fields.len()).map_err(encode_err)?;
    for spec in &schema.fields {
        let Some(value) = record.get(spec.name) else {
            return Err(CodecError::Encode(format!("field `{}` vanished", spec.name)));
        };
        encode_field(e, value).map_err(encode_err)?;
    }
    Ok(())
}

fn decode_record_inner(d: &mut Decoder<'_>) -> Result<Record, CodecError> {
    expect_array(d, "record", Some(4))?;
    let family = d.u8()?;
    let subtype = d.u8()?;
    let kind = EntryKind::from_tags(family, subtype)
        .ok_or(CodecError::UnknownKind { family, subtype })?;
    let mut record = Record::new(kind, d.str()?);

    let schema = schema_for(kind);
    expect_array(d, "record fields", Some(schema.fields.len()))?;
    for spec in &schema.fields {
        let value = decode_field(d, spec.name, spec.ty)?;
        record.fields.insert(spec.name.to_owned(), value);
    }
    Ok(record)
}

fn reject_trailing(d: &Decoder<'_>, bytes: &[u8], what: &str) -> Result<(), CodecError> {
    if d.position() < bytes.len() {
        return Err(minicbor::decode::Error::message(format!("trailing bytes in {what}")).into());
    }
    Ok(())
}

// ============================================================================
// Public encode/decode functions
// ============================================================================

/// Encode one record.
///
/// # Errors
/// [`CodecError::Schema`] if the record does not match its kind's schema.
pub fn encode_record(record: &Record) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    encode_record_inner(&mut Encoder::new(&mut buf), record)?;
    Ok(buf)
}

/// Decode one record; the input must hold exactly one.
///
/// # Errors
/// Malformed data, unknown kinds, schema mismatches and trailing bytes.
pub fn decode_record(bytes: &[u8]) -> Result<Record, CodecError> {
    let mut decoder = Decoder::new(bytes);
    let record = decode_record_inner(&mut decoder)?;
    reject_trailing(&decoder, bytes, "record")?;
    Ok(record)
}

/// Encode a whole scope with the format version header.
///
/// # Errors
/// The first record that fails [`encode_record`].
pub fn encode_record_set(set: &RecordSet) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    let mut e = Encoder::new(&mut buf);
    let encode_err = |e: minicbor::encode::Error<core::convert::Infallible>| {
        CodecError::Encode(e.to_string())
    };
    array_len(&mut e, 3).map_err(encode_err)?;
    e.u32(FORMAT_VERSION)
        .and_then(|e| e.str(&set.scope))
        .map_err(encode_err)?;
    array_len(&mut e, set.records.len()).map_err(encode_err)?;
    for record in &set.records {
        encode_record_inner(&mut e, record)?;
    }
    Ok(buf)
}

/// Decode a whole scope.
///
/// # Errors
/// [`CodecError::Version`] for other format versions, plus every
/// [`decode_record`] failure.
pub fn decode_record_set(bytes: &[u8]) -> Result<RecordSet, CodecError> {
    let mut d = Decoder::new(bytes);
    expect_array(&mut d, "record set", Some(3))?;
    let found = d.u32()?;
    if found != FORMAT_VERSION {
        return Err(CodecError::Version {
            found,
            expected: FORMAT_VERSION,
        });
    }
    let scope = d.str()?.to_owned();
    let count = expect_array(&mut d, "records", None)?;
    let mut records = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        records.push(decode_record_inner(&mut d)?);
    }
    reject_trailing(&d, bytes, "record set")?;
    Ok(RecordSet { scope, records })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mapstudio_core::{EventType, PartType};

    fn sound() -> Record {
        schema_for(EntryKind::Event(EventType::Sound))
            .default_record("Bell")
            .with("sound_id", FieldValue::Int(-7))
    }

    #[test]
    fn record_roundtrip() {
        let record = sound();
        let bytes = encode_record(&record).unwrap();
        assert_eq!(decode_record(&bytes).unwrap(), record);
    }

    #[test]
    fn header_is_family_subtype_name() {
        let bytes = encode_record(&sound()).unwrap();
        // [2, 1, "Bell", ...]
        assert_eq!(&bytes[..7], &[0x84, 0x02, 0x01, 0x64, b'B', b'e', b'l']);
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = encode_record(&sound()).unwrap();
        bytes.push(0x00);
        assert!(matches!(decode_record(&bytes), Err(CodecError::Decode(_))));
    }

    #[test]
    fn unknown_tags_rejected() {
        let mut bytes = encode_record(&sound()).unwrap();
        bytes[2] = 0x09;
        assert!(matches!(
            decode_record(&bytes),
            Err(CodecError::UnknownKind {
                family: 2,
                subtype: 9
            })
        ));
    }

    #[test]
    fn encode_refuses_records_off_schema() {
        let record = sound().with("radius", FieldValue::Float(1.0));
        assert!(matches!(encode_record(&record), Err(CodecError::Schema { .. })));
        let kind = EntryKind::Part(PartType::Collision);
        let short = schema_for(kind)
            .default_record("Gate")
            .with("vagrant_entity_ids", FieldValue::IntList(vec![1]));
        assert!(encode_record(&short).is_err());
    }

    #[test]
    fn doubles_are_not_floats() {
        let mut buf = Vec::new();
        Encoder::new(&mut buf).f64(1.5).unwrap();
        let mut d = Decoder::new(&buf);
        assert!(decode_f32(&mut d).is_err());
    }
}
