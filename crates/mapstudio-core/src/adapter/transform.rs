// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pose adapter over translate/rotate/scale record fields.
use crate::coords::{position_to_host, position_to_record, rotation_to_host, rotation_to_record};
use crate::error::FieldError;
use crate::record::Record;
use crate::value::{FieldValue, Pose, PropertyValue};

/// Maps the record's pose fields to one host-space [`Pose`] property.
///
/// The adapter itself only converts coordinates. Whether the local or the
/// world pose is written is an export-session decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformAdapter {
    /// Translation field.
    pub translate: &'static str,
    /// Euler-degrees rotation field.
    pub rotate: &'static str,
    /// Scale field; `None` for kinds without scale (unit scale on import).
    pub scale: Option<&'static str>,
    /// Node property name.
    pub property: &'static str,
}

impl TransformAdapter {
    /// Standard `translate`/`rotate`/`scale` to `pose` mapping.
    pub const fn scaled() -> Self {
        Self {
            translate: "translate",
            rotate: "rotate",
            scale: Some("scale"),
            property: "pose",
        }
    }

    /// Like [`Self::scaled`] but without a scale field.
    pub const fn unscaled() -> Self {
        Self {
            scale: None,
            ..Self::scaled()
        }
    }

    /// Record fields owned by this adapter.
    pub fn record_fields(&self) -> Vec<&'static str> {
        let mut fields = vec![self.translate, self.rotate];
        fields.extend(self.scale);
        fields
    }

    /// Decodes the pose from `record`.
    pub fn to_node(&self, record: &Record) -> Result<PropertyValue, FieldError> {
        let translation = position_to_host(vec3(record, self.translate)?);
        let rotation = rotation_to_host(vec3(record, self.rotate)?);
        let scale = match self.scale {
            Some(field) => position_to_host(vec3(record, field)?),
            None => [1.0; 3],
        };
        Ok(PropertyValue::Pose(Pose {
            translation,
            rotation,
            scale,
        }))
    }

    /// Encodes `value` (a pose) into `out`.
    ///
    /// Fails on non-finite components, and on a non-unit scale when the
    /// record has no scale field.
    pub fn to_record(&self, value: &PropertyValue, out: &mut Record) -> Result<(), FieldError> {
        let PropertyValue::Pose(pose) = value else {
            return Err(FieldError::encode(
                self.property,
                format!("expected pose, found {}", value.type_name()),
            ));
        };
        let finite = pose
            .translation
            .iter()
            .chain(&pose.rotation)
            .chain(&pose.scale)
            .all(|c| c.is_finite());
        if !finite {
            return Err(FieldError::encode(self.property, "pose has non-finite components"));
        }
        if self.scale.is_none() && pose.scale.iter().any(|s| (s - 1.0).abs() > 1e-6) {
            return Err(FieldError::encode(
                self.property,
                "record kind cannot store a non-unit scale",
            ));
        }
        let mut put = |field: &str, v: [f32; 3]| {
            out.fields.insert(field.to_owned(), FieldValue::Vec3(v));
        };
        put(self.translate, position_to_record(pose.translation));
        put(self.rotate, rotation_to_record(pose.rotation));
        if let Some(field) = self.scale {
            put(field, position_to_record(pose.scale));
        }
        Ok(())
    }
}

fn vec3(record: &Record, field: &str) -> Result<[f32; 3], FieldError> {
    match record.get(field) {
        Some(FieldValue::Vec3(v)) => Ok(*v),
        Some(other) => Err(FieldError::decode(
            field,
            format!("expected vec3, found {}", other.type_name()),
        )),
        None => Err(FieldError::decode(field, "field is missing")),
    }
}
