// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Event descriptors.
use crate::adapter::{Adapter, FieldAdapter, PropertyType, ReferenceAdapter};
use crate::coords::{degrees_to_host, degrees_to_record, position_to_host, position_to_record};
use crate::descriptor::EntryTypeDescriptor;
use crate::kind::{EntryFamily, EntryKind, EventType, KindFilter, PartType};
use crate::schema::FieldType;
use crate::value::{FieldValue, PropertyValue};

/// Sound categories.
pub const SOUND_TYPES: &[(i64, &str)] = &[
    (0, "Environment"),
    (1, "Character"),
    (2, "Menu"),
    (3, "Object"),
    (4, "Cutscene"),
    (5, "Sfx"),
    (6, "Music"),
    (7, "Voice"),
    (8, "FloorMaterial"),
    (9, "ArmorMaterial"),
    (10, "Ghost"),
];

/// Object action state machines.
pub const OBJ_ACT_STATES: &[(i64, &str)] = &[
    (0, "OneState"),
    (1, "DoorState"),
    (2, "OneLoopState"),
    (3, "OneLoopState2"),
    (4, "DoorState2"),
];

fn same(name: &'static str, ty: FieldType) -> Adapter {
    FieldAdapter::same(name, ty).into()
}

fn part_ref(field: &'static str, property: &'static str, target: KindFilter) -> Adapter {
    ReferenceAdapter::single(field, property, target).into()
}

/// Map offset translation: axis swap without the pose machinery.
fn offset_translation() -> Adapter {
    FieldAdapter::custom(
        "translate",
        "translation",
        FieldType::Vec3,
        PropertyType::Vec3,
        |value| match value {
            FieldValue::Vec3(v) => Ok(PropertyValue::Vec3(position_to_host(*v))),
            other => Err(format!("expected vec3, found {}", other.type_name())),
        },
        |value| match value {
            PropertyValue::Vec3(v) => Ok(FieldValue::Vec3(position_to_record(*v))),
            other => Err(format!("expected vec3, found {}", other.type_name())),
        },
    )
    .into()
}

/// Map offset yaw: degrees in the record, radians on the node.
fn offset_heading() -> Adapter {
    FieldAdapter::custom(
        "rotate_y",
        "heading",
        FieldType::Float,
        PropertyType::Float,
        |value| match value {
            FieldValue::Float(deg) => Ok(PropertyValue::Float(degrees_to_host(*deg))),
            other => Err(format!("expected float, found {}", other.type_name())),
        },
        |value| match value {
            PropertyValue::Float(rad) if rad.is_finite() => {
                Ok(FieldValue::Float(degrees_to_record(*rad)))
            }
            PropertyValue::Float(_) => Err("heading is not finite".to_owned()),
            other => Err(format!("expected float, found {}", other.type_name())),
        },
    )
    .into()
}

fn subtype(event: EventType) -> Vec<Adapter> {
    match event {
        EventType::Sound => vec![
            FieldAdapter::enumeration("sound_type", "sound_type", SOUND_TYPES).into(),
            same("sound_id", FieldType::Int),
        ],
        EventType::Sfx => vec![
            same("sfx_id", FieldType::Int),
            same("starts_disabled", FieldType::Bool),
        ],
        EventType::Treasure => vec![
            part_ref(
                "treasure_part_name",
                "treasure_part",
                KindFilter::Family(EntryFamily::Part),
            ),
            same("item_lots", FieldType::IntList(5)),
            same("is_in_chest", FieldType::Bool),
            same("starts_disabled", FieldType::Bool),
        ],
        EventType::Spawner => vec![
            same("max_count", FieldType::Int),
            same("spawner_type", FieldType::Int),
            same("limit_count", FieldType::Int),
            same("min_spawner_count", FieldType::Int),
            same("max_spawner_count", FieldType::Int),
            same("min_interval", FieldType::Float),
            same("max_interval", FieldType::Float),
            same("initial_spawn_count", FieldType::Int),
            ReferenceAdapter::array(
                "spawn_region_names",
                "spawn_regions",
                KindFilter::Family(EntryFamily::Region),
                4,
            )
            .into(),
            ReferenceAdapter::array(
                "spawn_part_names",
                "spawn_parts",
                KindFilter::Exact(EntryKind::Part(PartType::Character)),
                32,
            )
            .into(),
        ],
        EventType::ObjAct => vec![
            same("obj_act_entity_id", FieldType::Int),
            part_ref(
                "obj_act_part_name",
                "obj_act_part",
                KindFilter::Exact(EntryKind::Part(PartType::Object)),
            ),
            same("obj_act_param_id", FieldType::Int),
            FieldAdapter::enumeration("obj_act_state", "obj_act_state", OBJ_ACT_STATES).into(),
            same("obj_act_flag", FieldType::Int),
        ],
        EventType::Navigation => vec![part_ref(
            "navigation_region_name",
            "navigation_region",
            KindFilter::Family(EntryFamily::Region),
        )],
        EventType::Environment => vec![
            same("unk_x00", FieldType::Int),
            same("unk_x04", FieldType::Float),
            same("unk_x08", FieldType::Float),
            same("unk_x0c", FieldType::Float),
            same("unk_x10", FieldType::Float),
            same("unk_x14", FieldType::Float),
        ],
        EventType::MapOffset => vec![offset_translation(), offset_heading()],
    }
}

/// Descriptor of an event type.
pub fn descriptor(event: EventType) -> EntryTypeDescriptor {
    let base = vec![
        same("entity_id", FieldType::Int),
        part_ref(
            "attached_part_name",
            "attached_part",
            KindFilter::Family(EntryFamily::Part),
        ),
        part_ref(
            "attached_region_name",
            "attached_region",
            KindFilter::Family(EntryFamily::Region),
        ),
    ];
    EntryTypeDescriptor::new(EntryKind::Event(event), base, subtype(event), None)
}
