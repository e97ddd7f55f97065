// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record schemas: the field set the binary codec reads and writes per kind.
//!
//! Schemas list the family's base fields followed by the subtype's fields.
//! Descriptors are checked against these tables when a registry is built, so
//! a descriptor that forgets or double-maps a field never reaches real data.
use crate::error::FieldError;
use crate::kind::{EntryKind, EventType, PartType, RegionType};
use crate::record::Record;
use crate::value::FieldValue;

/// Declared type of one record field, including fixed arity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// `f32`.
    Float,
    /// `[f32; 3]`.
    Vec3,
    /// String.
    Str,
    /// Integer list of fixed length.
    IntList(usize),
    /// Bit-group of the given number of `u32` words.
    Mask(usize),
    /// Single name reference.
    Name,
    /// Name-reference array of fixed length.
    Names(usize),
}

impl FieldType {
    /// Zero value of this type.
    pub fn default_value(self) -> FieldValue {
        match self {
            Self::Bool => FieldValue::Bool(false),
            Self::Int => FieldValue::Int(0),
            Self::Float => FieldValue::Float(0.0),
            Self::Vec3 => FieldValue::Vec3([0.0; 3]),
            Self::Str => FieldValue::Str(String::new()),
            Self::IntList(n) => FieldValue::IntList(vec![0; n]),
            Self::Mask(n) => FieldValue::Mask(vec![0; n]),
            Self::Name => FieldValue::Name(String::new()),
            Self::Names(n) => FieldValue::Names(vec![String::new(); n]),
        }
    }

    /// Returns `true` if `value` has this type and arity.
    pub fn admits(self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::Bool, FieldValue::Bool(_))
            | (Self::Int, FieldValue::Int(_))
            | (Self::Float, FieldValue::Float(_))
            | (Self::Vec3, FieldValue::Vec3(_))
            | (Self::Str, FieldValue::Str(_))
            | (Self::Name, FieldValue::Name(_)) => true,
            (Self::IntList(n), FieldValue::IntList(v)) => v.len() == n,
            (Self::Mask(n), FieldValue::Mask(v)) => v.len() == n,
            (Self::Names(n), FieldValue::Names(v)) => v.len() == n,
            _ => false,
        }
    }

    /// Number of reference slots (0 for non-reference types).
    pub const fn reference_arity(self) -> usize {
        match self {
            Self::Name => 1,
            Self::Names(n) => n,
            _ => 0,
        }
    }
}

/// Name and type of one schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Record field name.
    pub name: &'static str,
    /// Declared type.
    pub ty: FieldType,
}

const fn f(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

/// Ordered field list for one kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    /// Kind described.
    pub kind: EntryKind,
    /// Base fields, then subtype fields.
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Checks that `record` carries exactly this schema's fields with the
    /// declared types.
    ///
    /// # Errors
    /// [`FieldError::Decode`] naming the first missing, unknown or ill-typed
    /// field.
    pub fn check(&self, record: &Record) -> Result<(), FieldError> {
        for spec in &self.fields {
            match record.get(spec.name) {
                None => return Err(FieldError::decode(spec.name, "field is missing")),
                Some(value) if !spec.ty.admits(value) => {
                    return Err(FieldError::decode(
                        spec.name,
                        format!("expected {:?}, found {}", spec.ty, value.type_name()),
                    ));
                }
                Some(_) => {}
            }
        }
        if let Some(extra) = record.fields.keys().find(|k| self.field(k).is_none()) {
            return Err(FieldError::decode(extra, "field is not part of the schema"));
        }
        Ok(())
    }

    /// Record of this kind with every field at its zero value (unit scale).
    pub fn default_record(&self, name: &str) -> Record {
        let mut record = Record::new(self.kind, name);
        for spec in &self.fields {
            let value = if spec.name == "scale" {
                FieldValue::Vec3([1.0; 3])
            } else {
                spec.ty.default_value()
            };
            record.fields.insert(spec.name.to_owned(), value);
        }
        record
    }
}

/// Number of `u32` words in a 128-bit group field.
pub const GROUP_WORDS: usize = 4;

const PART_BASE: &[FieldSpec] = &[
    f("model_name", FieldType::Name),
    f("sib_path", FieldType::Str),
    f("translate", FieldType::Vec3),
    f("rotate", FieldType::Vec3),
    f("scale", FieldType::Vec3),
    f("draw_groups", FieldType::Mask(GROUP_WORDS)),
    f("display_groups", FieldType::Mask(GROUP_WORDS)),
    f("entity_id", FieldType::Int),
    f("ambient_light_id", FieldType::Int),
    f("fog_id", FieldType::Int),
    f("lod_id", FieldType::Int),
    f("is_shadow_src", FieldType::Bool),
    f("is_shadow_dest", FieldType::Bool),
    f("draw_by_reflect_cam", FieldType::Bool),
];

const PART_OBJECT: &[FieldSpec] = &[
    f("draw_parent_name", FieldType::Name),
    f("break_term", FieldType::Int),
    f("net_sync_type", FieldType::Int),
    f("default_animation", FieldType::Int),
];

const PART_CHARACTER: &[FieldSpec] = &[
    f("draw_parent_name", FieldType::Name),
    f("ai_id", FieldType::Int),
    f("character_id", FieldType::Int),
    f("talk_id", FieldType::Int),
    f("patrol_type", FieldType::Int),
    f("platoon_id", FieldType::Int),
    f("player_id", FieldType::Int),
    f("default_animation", FieldType::Int),
    f("damage_animation", FieldType::Int),
    f("patrol_region_names", FieldType::Names(8)),
];

const PART_COLLISION: &[FieldSpec] = &[
    f("hit_filter", FieldType::Int),
    f("sound_space_type", FieldType::Int),
    f("env_light_map_spot_index", FieldType::Int),
    f("reflect_plane_height", FieldType::Float),
    f("navmesh_groups", FieldType::Mask(GROUP_WORDS)),
    f("vagrant_entity_ids", FieldType::IntList(3)),
    f("area_name_id", FieldType::Int),
    f("starts_disabled", FieldType::Bool),
    f("attached_bonfire", FieldType::Int),
    f("environment_event_name", FieldType::Name),
];

const PART_NAVMESH: &[FieldSpec] = &[f("navmesh_groups", FieldType::Mask(GROUP_WORDS))];

const PART_CONNECT_COLLISION: &[FieldSpec] = &[
    f("collision_name", FieldType::Name),
    f("connected_map_id", FieldType::IntList(4)),
];

const REGION_BASE: &[FieldSpec] = &[
    f("translate", FieldType::Vec3),
    f("rotate", FieldType::Vec3),
    f("entity_id", FieldType::Int),
];

const REGION_SPHERE: &[FieldSpec] = &[f("radius", FieldType::Float)];

const REGION_CYLINDER: &[FieldSpec] = &[
    f("radius", FieldType::Float),
    f("height", FieldType::Float),
];

const REGION_BOX: &[FieldSpec] = &[
    f("width", FieldType::Float),
    f("depth", FieldType::Float),
    f("height", FieldType::Float),
];

const EVENT_BASE: &[FieldSpec] = &[
    f("entity_id", FieldType::Int),
    f("attached_part_name", FieldType::Name),
    f("attached_region_name", FieldType::Name),
];

const EVENT_SOUND: &[FieldSpec] = &[
    f("sound_type", FieldType::Int),
    f("sound_id", FieldType::Int),
];

const EVENT_SFX: &[FieldSpec] = &[
    f("sfx_id", FieldType::Int),
    f("starts_disabled", FieldType::Bool),
];

const EVENT_TREASURE: &[FieldSpec] = &[
    f("treasure_part_name", FieldType::Name),
    f("item_lots", FieldType::IntList(5)),
    f("is_in_chest", FieldType::Bool),
    f("starts_disabled", FieldType::Bool),
];

const EVENT_SPAWNER: &[FieldSpec] = &[
    f("max_count", FieldType::Int),
    f("spawner_type", FieldType::Int),
    f("limit_count", FieldType::Int),
    f("min_spawner_count", FieldType::Int),
    f("max_spawner_count", FieldType::Int),
    f("min_interval", FieldType::Float),
    f("max_interval", FieldType::Float),
    f("initial_spawn_count", FieldType::Int),
    f("spawn_region_names", FieldType::Names(4)),
    f("spawn_part_names", FieldType::Names(32)),
];

const EVENT_OBJ_ACT: &[FieldSpec] = &[
    f("obj_act_entity_id", FieldType::Int),
    f("obj_act_part_name", FieldType::Name),
    f("obj_act_param_id", FieldType::Int),
    f("obj_act_state", FieldType::Int),
    f("obj_act_flag", FieldType::Int),
];

const EVENT_NAVIGATION: &[FieldSpec] = &[f("navigation_region_name", FieldType::Name)];

const EVENT_ENVIRONMENT: &[FieldSpec] = &[
    f("unk_x00", FieldType::Int),
    f("unk_x04", FieldType::Float),
    f("unk_x08", FieldType::Float),
    f("unk_x0c", FieldType::Float),
    f("unk_x10", FieldType::Float),
    f("unk_x14", FieldType::Float),
];

const EVENT_MAP_OFFSET: &[FieldSpec] = &[
    f("translate", FieldType::Vec3),
    f("rotate_y", FieldType::Float),
];

const MODEL_BASE: &[FieldSpec] = &[f("sib_path", FieldType::Str)];

/// Returns the record schema of `kind`.
pub fn schema_for(kind: EntryKind) -> RecordSchema {
    let (base, sub): (&[FieldSpec], &[FieldSpec]) = match kind {
        EntryKind::Part(t) => (
            PART_BASE,
            match t {
                PartType::MapPiece | PartType::PlayerStart => &[],
                PartType::Object => PART_OBJECT,
                PartType::Character => PART_CHARACTER,
                PartType::Collision => PART_COLLISION,
                PartType::Navmesh => PART_NAVMESH,
                PartType::ConnectCollision => PART_CONNECT_COLLISION,
            },
        ),
        EntryKind::Region(t) => (
            REGION_BASE,
            match t {
                RegionType::Point => &[],
                RegionType::Sphere => REGION_SPHERE,
                RegionType::Cylinder => REGION_CYLINDER,
                RegionType::Box => REGION_BOX,
            },
        ),
        EntryKind::Event(t) => (
            EVENT_BASE,
            match t {
                EventType::Sound => EVENT_SOUND,
                EventType::Sfx => EVENT_SFX,
                EventType::Treasure => EVENT_TREASURE,
                EventType::Spawner => EVENT_SPAWNER,
                EventType::ObjAct => EVENT_OBJ_ACT,
                EventType::Navigation => EVENT_NAVIGATION,
                EventType::Environment => EVENT_ENVIRONMENT,
                EventType::MapOffset => EVENT_MAP_OFFSET,
            },
        ),
        EntryKind::Model(_) => (MODEL_BASE, &[]),
    };
    RecordSchema {
        kind,
        fields: base.iter().chain(sub).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn schemas_have_unique_field_names() {
        for kind in EntryKind::all() {
            let schema = schema_for(kind);
            let names: BTreeSet<_> = schema.fields.iter().map(|s| s.name).collect();
            assert_eq!(names.len(), schema.fields.len(), "{kind}");
        }
    }

    #[test]
    fn default_record_passes_check() {
        for kind in EntryKind::all() {
            let schema = schema_for(kind);
            assert_eq!(schema.check(&schema.default_record("x")), Ok(()), "{kind}");
        }
    }

    #[test]
    fn check_reports_missing_unknown_and_mistyped_fields() {
        let schema = schema_for(EntryKind::Region(RegionType::Sphere));
        let good = schema.default_record("r");

        let mut missing = good.clone();
        missing.fields.remove("radius");
        assert!(matches!(
            schema.check(&missing),
            Err(FieldError::Decode { field, .. }) if field == "radius"
        ));

        let extra = good.clone().with("bogus", FieldValue::Int(1));
        assert!(matches!(
            schema.check(&extra),
            Err(FieldError::Decode { field, .. }) if field == "bogus"
        ));

        let mistyped = good.with("radius", FieldValue::Int(1));
        assert!(schema.check(&mistyped).is_err());
    }

    #[test]
    fn arity_is_part_of_the_type() {
        assert!(!FieldType::Names(4).admits(&FieldValue::Names(vec![String::new(); 3])));
        assert_eq!(FieldType::Names(32).reference_arity(), 32);
        assert_eq!(FieldType::Int.reference_arity(), 0);
    }
}
