// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record-side field values and node-side property values.
use core::fmt;

use crate::bitset::GroupBitSet;
use crate::ident::NodeId;

/// Raw value of one record field, as the binary codec produces it.
///
/// Reference fields carry names; the empty string is the empty-slot sentinel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer (ids, enum discriminants).
    Int(i64),
    /// Single-precision float.
    Float(f32),
    /// Three-component vector (position, euler degrees, scale).
    Vec3([f32; 3]),
    /// Free-form string (resource paths).
    Str(String),
    /// Fixed-length integer list.
    IntList(Vec<i64>),
    /// Packed bit-group words, least significant word first.
    Mask(Vec<u32>),
    /// Single name reference.
    Name(String),
    /// Fixed-length name-reference array.
    Names(Vec<String>),
}

impl FieldValue {
    /// Short type tag used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Vec3(_) => "vec3",
            Self::Str(_) => "str",
            Self::IntList(_) => "int-list",
            Self::Mask(_) => "mask",
            Self::Name(_) => "name",
            Self::Names(_) => "names",
        }
    }
}

/// Non-owning link held by one reference slot of a graph node.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotLink {
    /// Empty slot.
    #[default]
    Empty,
    /// Link to a node in the same scope. The node may since have been deleted.
    Linked(NodeId),
    /// A name that could not be bound to exactly one node.
    Unresolved(String),
}

impl SlotLink {
    /// Returns `true` for the empty slot.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Linked node id, if any.
    pub const fn node(&self) -> Option<NodeId> {
        match self {
            Self::Linked(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for SlotLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("<empty>"),
            Self::Linked(id) => write!(f, "{id}"),
            Self::Unresolved(name) => write!(f, "?{name}"),
        }
    }
}

/// Host-space pose: translation, euler XYZ rotation in radians, scale.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// Translation in host units.
    pub translation: [f64; 3],
    /// Euler XYZ rotation in radians.
    pub rotation: [f64; 3],
    /// Per-axis scale.
    pub scale: [f64; 3],
}

impl Pose {
    /// Identity pose.
    pub const IDENTITY: Self = Self {
        translation: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Value of one graph-node property.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Float widened to double precision.
    Float(f64),
    /// Vector widened to double precision.
    Vec3([f64; 3]),
    /// Free-form string; custom enum adapters store the variant name here.
    Str(String),
    /// Fixed-length integer list.
    IntList(Vec<i64>),
    /// Decoded bit-group.
    Groups(GroupBitSet),
    /// Host-space pose.
    Pose(Pose),
    /// Single reference slot.
    Link(SlotLink),
    /// Fixed-length reference array.
    Links(Vec<SlotLink>),
}

impl PropertyValue {
    /// Short type tag used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Vec3(_) => "vec3",
            Self::Str(_) => "str",
            Self::IntList(_) => "int-list",
            Self::Groups(_) => "groups",
            Self::Pose(_) => "pose",
            Self::Link(_) => "link",
            Self::Links(_) => "links",
        }
    }

    /// Reference slots held by this value, in slot order.
    pub fn slots(&self) -> &[SlotLink] {
        match self {
            Self::Link(link) => core::slice::from_ref(link),
            Self::Links(links) => links,
            _ => &[],
        }
    }

    /// Mutable reference slots held by this value.
    pub fn slots_mut(&mut self) -> &mut [SlotLink] {
        match self {
            Self::Link(link) => core::slice::from_mut(link),
            Self::Links(links) => links,
            _ => &mut [],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_link_exposes_one_slot() {
        let mut value = PropertyValue::Link(SlotLink::Linked(NodeId(3)));
        assert_eq!(value.slots(), &[SlotLink::Linked(NodeId(3))]);
        value.slots_mut()[0] = SlotLink::Empty;
        assert_eq!(value, PropertyValue::Link(SlotLink::Empty));
    }

    #[test]
    fn scalar_values_have_no_slots() {
        assert!(PropertyValue::Int(4).slots().is_empty());
        assert!(PropertyValue::Pose(Pose::IDENTITY).slots().is_empty());
    }

    #[test]
    fn slot_display() {
        assert_eq!(SlotLink::Empty.to_string(), "<empty>");
        assert_eq!(SlotLink::Linked(NodeId(9)).to_string(), "#9");
        assert_eq!(SlotLink::Unresolved("Fog1".into()).to_string(), "?Fog1");
    }
}
