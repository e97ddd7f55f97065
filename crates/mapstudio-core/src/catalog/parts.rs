// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Part descriptors.
use crate::adapter::{
    Adapter, FieldAdapter, GroupAdapter, ModelStrategy, ReferenceAdapter, TransformAdapter,
};
use crate::descriptor::EntryTypeDescriptor;
use crate::kind::{EntryFamily, EntryKind, EventType, KindFilter, ModelType, PartType};
use crate::name::StemRule;
use crate::schema::FieldType;

/// Width of draw, display and navmesh groups.
pub const GROUP_WIDTH: u32 = 128;

/// Collision hit filters. The table is sparse.
pub const HIT_FILTERS: &[(i64, &str)] = &[
    (0, "NoHiHitNoFeetIK"),
    (1, "NoHiHit"),
    (2, "FallDeathCam"),
    (8, "Normal"),
    (9, "Water"),
    (11, "Solid"),
    (13, "Ledge"),
    (15, "DeathCam"),
];

fn base() -> Vec<Adapter> {
    vec![
        FieldAdapter::same("sib_path", FieldType::Str).into(),
        TransformAdapter::scaled().into(),
        GroupAdapter::new("draw_groups", GROUP_WIDTH).into(),
        GroupAdapter::new("display_groups", GROUP_WIDTH).into(),
        FieldAdapter::same("entity_id", FieldType::Int).into(),
        FieldAdapter::same("ambient_light_id", FieldType::Int).into(),
        FieldAdapter::same("fog_id", FieldType::Int).into(),
        FieldAdapter::same("lod_id", FieldType::Int).into(),
        FieldAdapter::same("is_shadow_src", FieldType::Bool).into(),
        FieldAdapter::same("is_shadow_dest", FieldType::Bool).into(),
        FieldAdapter::same("draw_by_reflect_cam", FieldType::Bool).into(),
    ]
}

fn draw_parent() -> Adapter {
    ReferenceAdapter::single(
        "draw_parent_name",
        "draw_parent",
        KindFilter::Family(EntryFamily::Part),
    )
    .into()
}

fn ints(names: &'static [&'static str]) -> impl Iterator<Item = Adapter> {
    names
        .iter()
        .map(|&name| FieldAdapter::same(name, FieldType::Int).into())
}

fn subtype(part: PartType) -> Vec<Adapter> {
    match part {
        PartType::MapPiece | PartType::PlayerStart => Vec::new(),
        PartType::Object => std::iter::once(draw_parent())
            .chain(ints(&["break_term", "net_sync_type", "default_animation"]))
            .collect(),
        PartType::Character => std::iter::once(draw_parent())
            .chain(ints(&[
                "ai_id",
                "character_id",
                "talk_id",
                "patrol_type",
                "platoon_id",
                "player_id",
                "default_animation",
                "damage_animation",
            ]))
            .chain(std::iter::once(
                ReferenceAdapter::array(
                    "patrol_region_names",
                    "patrol_regions",
                    KindFilter::Family(EntryFamily::Region),
                    8,
                )
                .into(),
            ))
            .collect(),
        PartType::Collision => vec![
            FieldAdapter::enumeration("hit_filter", "hit_filter", HIT_FILTERS).into(),
            FieldAdapter::same("sound_space_type", FieldType::Int).into(),
            FieldAdapter::same("env_light_map_spot_index", FieldType::Int).into(),
            FieldAdapter::same("reflect_plane_height", FieldType::Float).into(),
            GroupAdapter::new("navmesh_groups", GROUP_WIDTH).into(),
            FieldAdapter::same("vagrant_entity_ids", FieldType::IntList(3)).into(),
            FieldAdapter::same("area_name_id", FieldType::Int).into(),
            FieldAdapter::same("starts_disabled", FieldType::Bool).into(),
            FieldAdapter::same("attached_bonfire", FieldType::Int).into(),
            ReferenceAdapter::single(
                "environment_event_name",
                "environment_event",
                KindFilter::Exact(EntryKind::Event(EventType::Environment)),
            )
            .into(),
        ],
        PartType::Navmesh => vec![GroupAdapter::new("navmesh_groups", GROUP_WIDTH).into()],
        PartType::ConnectCollision => vec![
            ReferenceAdapter::single(
                "collision_name",
                "collision",
                KindFilter::Exact(EntryKind::Part(PartType::Collision)),
            )
            .into(),
            FieldAdapter::same("connected_map_id", FieldType::IntList(4)).into(),
        ],
    }
}

/// Model kind and naming rule a part type instantiates.
pub const fn model_strategy(part: PartType) -> ModelStrategy {
    let separator = StemRule::BeforeSeparator('_');
    match part {
        PartType::MapPiece => ModelStrategy::new(ModelType::MapPiece, separator),
        PartType::Object => ModelStrategy::new(ModelType::Object, separator),
        PartType::Character => ModelStrategy::new(ModelType::Character, StemRule::Prefix(5)),
        PartType::PlayerStart => ModelStrategy::new(ModelType::Player, StemRule::Prefix(5)),
        PartType::Collision | PartType::ConnectCollision => {
            ModelStrategy::new(ModelType::Collision, separator)
        }
        PartType::Navmesh => ModelStrategy::new(ModelType::Navmesh, separator),
    }
}

/// Descriptor of a part type.
pub fn descriptor(part: PartType) -> EntryTypeDescriptor {
    EntryTypeDescriptor::new(
        EntryKind::Part(part),
        base(),
        subtype(part),
        Some(model_strategy(part)),
    )
}
