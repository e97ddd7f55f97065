// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bit-group adapter.
use crate::bitset::GroupBitSet;
use crate::error::FieldError;
use crate::record::Record;
use crate::schema::FieldType;
use crate::value::{FieldValue, PropertyValue};

/// Maps a packed `Mask` field to a [`GroupBitSet`] property.
///
/// Lossy on decode: bits at or beyond `width` are dropped. Strict on encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupAdapter {
    /// Record field name.
    pub record_field: &'static str,
    /// Node property name.
    pub property: &'static str,
    /// Group width in bits.
    pub width: u32,
}

impl GroupAdapter {
    /// Group adapter whose property shares the record field's name.
    pub const fn new(record_field: &'static str, width: u32) -> Self {
        Self {
            record_field,
            property: record_field,
            width,
        }
    }

    /// Record-side type: as many words as the width needs.
    pub const fn field_type(&self) -> FieldType {
        FieldType::Mask(self.width.div_ceil(32) as usize)
    }

    /// Decodes the group from `record`.
    pub fn to_node(&self, record: &Record) -> Result<PropertyValue, FieldError> {
        match record.get(self.record_field) {
            Some(FieldValue::Mask(words)) => {
                Ok(PropertyValue::Groups(GroupBitSet::decode(words, self.width)))
            }
            Some(other) => Err(FieldError::decode(
                self.record_field,
                format!("expected mask, found {}", other.type_name()),
            )),
            None => Err(FieldError::decode(self.record_field, "field is missing")),
        }
    }

    /// Encodes the group into `out`.
    pub fn to_record(&self, value: &PropertyValue, out: &mut Record) -> Result<(), FieldError> {
        let PropertyValue::Groups(set) = value else {
            return Err(FieldError::encode(
                self.property,
                format!("expected groups, found {}", value.type_name()),
            ));
        };
        let words = set
            .encode(self.width)
            .map_err(|e| FieldError::encode(self.property, e.to_string()))?;
        out.fields
            .insert(self.record_field.to_owned(), FieldValue::Mask(words));
        Ok(())
    }
}
