// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scalar field adapters: identity mapping and custom transforms.
use std::fmt;
use std::sync::Arc;

use super::PropertyType;
use crate::coords::{narrow, widen};
use crate::error::FieldError;
use crate::record::Record;
use crate::schema::FieldType;
use crate::value::{FieldValue, PropertyValue};

/// Record-to-node transform of a custom adapter.
pub type ReadFn = Arc<dyn Fn(&FieldValue) -> Result<PropertyValue, String> + Send + Sync>;
/// Node-to-record transform of a custom adapter.
pub type WriteFn = Arc<dyn Fn(&PropertyValue) -> Result<FieldValue, String> + Send + Sync>;

/// Value transform applied by a [`FieldAdapter`].
#[derive(Clone)]
pub enum Transform {
    /// Same value on both sides; floats widen to `f64` and narrow back.
    Identity,
    /// Caller-supplied pair of transforms.
    Custom {
        /// Record to node.
        read: ReadFn,
        /// Node to record.
        write: WriteFn,
    },
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Custom { .. } => f.write_str("Custom"),
        }
    }
}

/// Maps one record field to one node property.
///
/// Adapters see only the field they own; this independence is what lets a
/// descriptor compose them freely.
#[derive(Clone, Debug)]
pub struct FieldAdapter {
    /// Record field name.
    pub record_field: &'static str,
    /// Node property name.
    pub property: &'static str,
    /// Record-side type.
    pub field_type: FieldType,
    /// Node-side type.
    pub property_type: PropertyType,
    /// Value transform.
    pub transform: Transform,
}

impl FieldAdapter {
    /// Identity adapter; property type follows from the field type.
    ///
    /// Reference and group field types have no identity mapping and are
    /// reported as mismatched when the descriptor is validated.
    pub fn identity(record_field: &'static str, property: &'static str, field_type: FieldType) -> Self {
        Self {
            record_field,
            property,
            field_type,
            property_type: PropertyType::identity_of(field_type),
            transform: Transform::Identity,
        }
    }

    /// Identity adapter whose property shares the record field's name.
    pub fn same(record_field: &'static str, field_type: FieldType) -> Self {
        Self::identity(record_field, record_field, field_type)
    }

    /// Adapter with a custom transform pair.
    pub fn custom(
        record_field: &'static str,
        property: &'static str,
        field_type: FieldType,
        property_type: PropertyType,
        read: impl Fn(&FieldValue) -> Result<PropertyValue, String> + Send + Sync + 'static,
        write: impl Fn(&PropertyValue) -> Result<FieldValue, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            record_field,
            property,
            field_type,
            property_type,
            transform: Transform::Custom {
                read: Arc::new(read),
                write: Arc::new(write),
            },
        }
    }

    /// Integer enum stored by variant name on the node.
    ///
    /// Tables may be sparse; integers outside the table fail to decode and
    /// unknown names fail to encode.
    pub fn enumeration(
        record_field: &'static str,
        property: &'static str,
        table: &'static [(i64, &'static str)],
    ) -> Self {
        Self::custom(
            record_field,
            property,
            FieldType::Int,
            PropertyType::Str,
            move |value| match value {
                FieldValue::Int(raw) => table
                    .iter()
                    .find(|(v, _)| v == raw)
                    .map(|(_, name)| PropertyValue::Str((*name).to_owned()))
                    .ok_or_else(|| format!("{raw} is not a known value")),
                other => Err(format!("expected int, found {}", other.type_name())),
            },
            move |value| match value {
                PropertyValue::Str(name) => table
                    .iter()
                    .find(|(_, n)| n == name)
                    .map(|(v, _)| FieldValue::Int(*v))
                    .ok_or_else(|| format!("`{name}` is not a known variant")),
                other => Err(format!("expected str, found {}", other.type_name())),
            },
        )
    }

    /// Decodes this adapter's field from `record`.
    pub fn to_node(&self, record: &Record) -> Result<PropertyValue, FieldError> {
        let raw = record
            .get(self.record_field)
            .ok_or_else(|| FieldError::decode(self.record_field, "field is missing"))?;
        let value = match &self.transform {
            Transform::Identity => identity_read(raw),
            Transform::Custom { read, .. } => read(raw),
        }
        .map_err(|reason| FieldError::decode(self.record_field, reason))?;
        if !self.property_type.admits(&value) {
            return Err(FieldError::decode(
                self.record_field,
                format!("transform produced {}", value.type_name()),
            ));
        }
        Ok(value)
    }

    /// Encodes `value` into this adapter's field of `out`.
    pub fn to_record(&self, value: &PropertyValue, out: &mut Record) -> Result<(), FieldError> {
        let raw = match &self.transform {
            Transform::Identity => identity_write(value),
            Transform::Custom { write, .. } => write(value),
        }
        .map_err(|reason| FieldError::encode(self.property, reason))?;
        if !self.field_type.admits(&raw) {
            return Err(FieldError::encode(
                self.property,
                format!("expected {:?}, produced {}", self.field_type, raw.type_name()),
            ));
        }
        out.fields.insert(self.record_field.to_owned(), raw);
        Ok(())
    }
}

fn identity_read(raw: &FieldValue) -> Result<PropertyValue, String> {
    Ok(match raw {
        FieldValue::Bool(v) => PropertyValue::Bool(*v),
        FieldValue::Int(v) => PropertyValue::Int(*v),
        FieldValue::Float(v) => PropertyValue::Float(widen(*v)),
        FieldValue::Vec3(v) => PropertyValue::Vec3(v.map(widen)),
        FieldValue::Str(v) => PropertyValue::Str(v.clone()),
        FieldValue::IntList(v) => PropertyValue::IntList(v.clone()),
        other => return Err(format!("{} has no identity mapping", other.type_name())),
    })
}

fn identity_write(value: &PropertyValue) -> Result<FieldValue, String> {
    Ok(match value {
        PropertyValue::Bool(v) => FieldValue::Bool(*v),
        PropertyValue::Int(v) => FieldValue::Int(*v),
        PropertyValue::Float(v) => FieldValue::Float(narrow(*v)),
        PropertyValue::Vec3(v) => FieldValue::Vec3(v.map(narrow)),
        PropertyValue::Str(v) => FieldValue::Str(v.clone()),
        PropertyValue::IntList(v) => FieldValue::IntList(v.clone()),
        other => return Err(format!("{} has no identity mapping", other.type_name())),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kind::{EntryKind, PartType};

    const HIT_FILTER: &[(i64, &str)] = &[(0, "Off"), (8, "Normal"), (9, "Water")];

    fn record() -> Record {
        Record::new(EntryKind::Part(PartType::Collision), "h0000B0")
            .with("hit_filter", FieldValue::Int(8))
            .with("reflect_plane_height", FieldValue::Float(1.25))
    }

    #[test]
    fn identity_widens_and_narrows_floats() {
        let adapter = FieldAdapter::same("reflect_plane_height", FieldType::Float);
        let value = adapter.to_node(&record()).unwrap();
        assert_eq!(value, PropertyValue::Float(1.25));
        let mut out = Record::new(EntryKind::Part(PartType::Collision), "h0000B0");
        adapter.to_record(&value, &mut out).unwrap();
        assert_eq!(out.get("reflect_plane_height"), Some(&FieldValue::Float(1.25)));
    }

    #[test]
    fn enumeration_maps_sparse_table() {
        let adapter = FieldAdapter::enumeration("hit_filter", "hit_filter", HIT_FILTER);
        assert_eq!(
            adapter.to_node(&record()).unwrap(),
            PropertyValue::Str("Normal".into())
        );
        let out_of_range = record().with("hit_filter", FieldValue::Int(3));
        assert!(matches!(
            adapter.to_node(&out_of_range),
            Err(FieldError::Decode { .. })
        ));
    }

    #[test]
    fn enumeration_rejects_unknown_variant_on_encode() {
        let adapter = FieldAdapter::enumeration("hit_filter", "hit_filter", HIT_FILTER);
        let mut out = record();
        let err = adapter
            .to_record(&PropertyValue::Str("Lava".into()), &mut out)
            .unwrap_err();
        assert!(matches!(err, FieldError::Encode { property, .. } if property == "hit_filter"));
    }

    #[test]
    fn identity_rejects_wrong_property_type() {
        let adapter = FieldAdapter::same("reflect_plane_height", FieldType::Float);
        let mut out = record();
        assert!(adapter
            .to_record(&PropertyValue::Str("x".into()), &mut out)
            .is_err());
    }
}
