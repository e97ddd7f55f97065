// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Field adapters: bidirectional single-field conversion rules.
//!
//! [`Adapter`] is the closed set of adapter shapes a descriptor composes.
//! Local adapters (field, group, transform) convert during the creating and
//! writing phases; reference adapters only contribute empty slots there and
//! are bound in the linking phase.
mod field;
mod group;
mod reference;
mod transform;

pub use field::{FieldAdapter, ReadFn, Transform, WriteFn};
pub use group::GroupAdapter;
pub use reference::{Arity, ModelStrategy, ReferenceAdapter};
pub use transform::TransformAdapter;

use crate::error::FieldError;
use crate::record::Record;
use crate::schema::FieldType;
use crate::value::PropertyValue;

/// Declared node-side type of a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyType {
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// `f64`.
    Float,
    /// `[f64; 3]`.
    Vec3,
    /// String.
    Str,
    /// Integer list of fixed length.
    IntList(usize),
    /// Group bit-set.
    Groups,
    /// Pose.
    Pose,
    /// Single reference slot.
    Link,
    /// Reference array of fixed length.
    Links(usize),
    /// The field type has no identity mapping.
    Unmapped,
}

impl PropertyType {
    /// Node type an identity adapter produces for `field_type`.
    pub const fn identity_of(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Bool => Self::Bool,
            FieldType::Int => Self::Int,
            FieldType::Float => Self::Float,
            FieldType::Vec3 => Self::Vec3,
            FieldType::Str => Self::Str,
            FieldType::IntList(n) => Self::IntList(n),
            FieldType::Mask(_) | FieldType::Name | FieldType::Names(_) => Self::Unmapped,
        }
    }

    /// Returns `true` if `value` has this type and arity.
    pub fn admits(self, value: &PropertyValue) -> bool {
        match (self, value) {
            (Self::Bool, PropertyValue::Bool(_))
            | (Self::Int, PropertyValue::Int(_))
            | (Self::Float, PropertyValue::Float(_))
            | (Self::Vec3, PropertyValue::Vec3(_))
            | (Self::Str, PropertyValue::Str(_))
            | (Self::Groups, PropertyValue::Groups(_))
            | (Self::Pose, PropertyValue::Pose(_))
            | (Self::Link, PropertyValue::Link(_)) => true,
            (Self::IntList(n), PropertyValue::IntList(v)) => v.len() == n,
            (Self::Links(n), PropertyValue::Links(v)) => v.len() == n,
            _ => false,
        }
    }
}

/// One entry of a descriptor's adapter list.
#[derive(Clone, Debug)]
pub enum Adapter {
    /// Scalar field.
    Field(FieldAdapter),
    /// Bit-group field.
    Group(GroupAdapter),
    /// Pose fields.
    Transform(TransformAdapter),
    /// Reference field.
    Reference(ReferenceAdapter),
}

impl Adapter {
    /// Node property owned by this adapter.
    pub fn property(&self) -> &'static str {
        match self {
            Self::Field(a) => a.property,
            Self::Group(a) => a.property,
            Self::Transform(a) => a.property,
            Self::Reference(a) => a.property,
        }
    }

    /// Node-side type of the property.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Field(a) => a.property_type,
            Self::Group(_) => PropertyType::Groups,
            Self::Transform(_) => PropertyType::Pose,
            Self::Reference(a) => match a.arity {
                Arity::Single => PropertyType::Link,
                Arity::Array(n) => PropertyType::Links(n),
            },
        }
    }

    /// Record fields owned by this adapter, with their record-side types.
    pub fn record_fields(&self) -> Vec<(&'static str, FieldType)> {
        match self {
            Self::Field(a) => vec![(a.record_field, a.field_type)],
            Self::Group(a) => vec![(a.record_field, a.field_type())],
            Self::Transform(a) => a
                .record_fields()
                .into_iter()
                .map(|f| (f, FieldType::Vec3))
                .collect(),
            Self::Reference(a) => vec![(a.record_field, a.field_type())],
        }
    }

    /// The reference adapter, if this is one.
    pub const fn as_reference(&self) -> Option<&ReferenceAdapter> {
        match self {
            Self::Reference(a) => Some(a),
            _ => None,
        }
    }

    /// Creating-phase conversion. References yield all-empty slots.
    pub fn to_node(&self, record: &Record) -> Result<PropertyValue, FieldError> {
        match self {
            Self::Field(a) => a.to_node(record),
            Self::Group(a) => a.to_node(record),
            Self::Transform(a) => a.to_node(record),
            Self::Reference(a) => {
                a.read_names(record)?;
                Ok(a.empty_value())
            }
        }
    }

    /// Writing-phase conversion. References are left for the linking phase.
    pub fn to_record(&self, value: &PropertyValue, out: &mut Record) -> Result<(), FieldError> {
        match self {
            Self::Field(a) => a.to_record(value, out),
            Self::Group(a) => a.to_record(value, out),
            Self::Transform(a) => a.to_record(value, out),
            Self::Reference(_) => Ok(()),
        }
    }
}

impl From<FieldAdapter> for Adapter {
    fn from(a: FieldAdapter) -> Self {
        Self::Field(a)
    }
}

impl From<GroupAdapter> for Adapter {
    fn from(a: GroupAdapter) -> Self {
        Self::Group(a)
    }
}

impl From<TransformAdapter> for Adapter {
    fn from(a: TransformAdapter) -> Self {
        Self::Transform(a)
    }
}

impl From<ReferenceAdapter> for Adapter {
    fn from(a: ReferenceAdapter) -> Self {
        Self::Reference(a)
    }
}
