// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canned record sets.
//!
//! Each scenario is self-contained: every name it references is defined in
//! the same set, so a clean import produces no placeholders.

use mapstudio_core::{
    DescriptorRegistry, EventType, FieldValue, ModelType, PartType, Record, RegionType,
};

use crate::records::{event, model, part, region};

/// The built-in registry.
///
/// # Panics
/// If the built-in descriptors do not cover their schemas.
#[allow(clippy::expect_used)]
pub fn standard_registry() -> DescriptorRegistry {
    DescriptorRegistry::standard().expect("built-in descriptors should match their schemas")
}

/// A collision part linked to an environment event, plus its model.
///
/// `Gate.environment_event_name = "Fog1"`.
pub fn gate_and_fog() -> Vec<Record> {
    vec![
        part(PartType::Collision, "Gate", "h0010B0")
            .vec3("translate", [12.5, -3.0, 40.25])
            .vec3("rotate", [0.0, 90.0, 0.0])
            .int("entity_id", 1_000_100)
            .int("hit_filter", 8)
            .mask("draw_groups", 4, &[0, 33, 127])
            .mask("navmesh_groups", 4, &[5])
            .set("vagrant_entity_ids", FieldValue::IntList(vec![-1, -1, 7]))
            .float("reflect_plane_height", 1.5)
            .name_ref("environment_event_name", "Fog1")
            .build(),
        event(EventType::Environment, "Fog1")
            .int("unk_x00", 3)
            .float("unk_x04", 0.25)
            .float("unk_x10", 100.0)
            .build(),
        model(ModelType::Collision, "h0010B0"),
    ]
}

/// Characters, regions and a spawner with partially filled reference arrays.
pub fn spawner_scene() -> Vec<Record> {
    vec![
        part(PartType::Character, "c1234_0000", "c1234")
            .int("ai_id", 123_400)
            .names("patrol_region_names", 8, &["Patrol A", "", "Spawn B"])
            .build(),
        part(PartType::Character, "c1234_0001", "c1234")
            .int("ai_id", 123_401)
            .build(),
        model(ModelType::Character, "c1234"),
        region(RegionType::Point, "Patrol A")
            .vec3("translate", [1.0, 2.0, 3.0])
            .build(),
        region(RegionType::Sphere, "Spawn B")
            .float("radius", 4.0)
            .build(),
        event(EventType::Spawner, "Spawner")
            .int("max_count", 2)
            .names("spawn_region_names", 4, &["Spawn B"])
            .names("spawn_part_names", 32, &["c1234_0000", "", "c1234_0001"])
            .build(),
    ]
}

/// Two objects drawing under each other and one drawing under itself.
pub fn cycle_pair() -> Vec<Record> {
    vec![
        part(PartType::Object, "Lever", "o0001")
            .name_ref("draw_parent_name", "Door")
            .build(),
        part(PartType::Object, "Door", "o0001")
            .name_ref("draw_parent_name", "Lever")
            .build(),
        part(PartType::Object, "Mirror", "o0001")
            .name_ref("draw_parent_name", "Mirror")
            .build(),
        model(ModelType::Object, "o0001"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenarios_pass_their_schema_checks() {
        for record in gate_and_fog()
            .iter()
            .chain(&spawner_scene())
            .chain(&cycle_pair())
        {
            assert_eq!(
                mapstudio_core::schema_for(record.kind).check(record),
                Ok(()),
                "{}",
                record.name
            );
        }
    }
}
