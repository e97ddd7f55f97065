// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::panic)]
use proptest::prelude::*;

use mapstudio_core::{
    import_scope, materialize_placeholder, EntryFamily, EntryHost, EntryKind, EventType,
    KindFilter, ModelType, NodeId, NodeKind, PartType, PropertyValue, Scope, Severity, SlotLink,
    TranscodeConfig,
};
use mapstudio_dry_tests::{
    cycle_pair, event, gate_and_fog, model, part, shuffled, spawner_scene, standard_registry,
};

fn node_named(scope: &Scope, family: EntryFamily, name: &str) -> NodeId {
    let found = scope.find_candidates(family, name);
    assert_eq!(found.len(), 1, "expected one {family} named {name}");
    found[0]
}

fn link(scope: &Scope, id: NodeId, property: &str) -> SlotLink {
    match scope.get_property(id, property) {
        Some(PropertyValue::Link(link)) => link.clone(),
        other => panic!("{property} is not a link: {other:?}"),
    }
}

fn links(scope: &Scope, id: NodeId, property: &str) -> Vec<SlotLink> {
    match scope.get_property(id, property) {
        Some(PropertyValue::Links(links)) => links.clone(),
        other => panic!("{property} is not a link array: {other:?}"),
    }
}

#[test]
fn gate_links_to_fog_and_model() {
    let registry = standard_registry();
    let (scope, outcome) =
        import_scope(&registry, &TranscodeConfig::default(), "m10_00", &gate_and_fog());

    assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);
    assert!(outcome.placeholders.is_empty());
    assert_eq!(outcome.stats.created, 3);
    assert_eq!(scope.len(), 3);

    let gate = node_named(&scope, EntryFamily::Part, "Gate");
    let fog = node_named(&scope, EntryFamily::Event, "Fog1");
    let model = node_named(&scope, EntryFamily::Model, "h0010B0");
    assert_eq!(link(&scope, gate, "environment_event"), SlotLink::Linked(fog));
    assert_eq!(link(&scope, gate, "model"), SlotLink::Linked(model));
    assert_eq!(
        scope.get_property(gate, "hit_filter"),
        Some(&PropertyValue::Str("Normal".into()))
    );
}

#[test]
fn cycles_and_self_references_resolve() {
    let registry = standard_registry();
    let (scope, outcome) =
        import_scope(&registry, &TranscodeConfig::default(), "m10_01", &cycle_pair());
    assert!(outcome.diagnostics.is_empty());

    let lever = node_named(&scope, EntryFamily::Part, "Lever");
    let door = node_named(&scope, EntryFamily::Part, "Door");
    let mirror = node_named(&scope, EntryFamily::Part, "Mirror");
    assert_eq!(link(&scope, lever, "draw_parent"), SlotLink::Linked(door));
    assert_eq!(link(&scope, door, "draw_parent"), SlotLink::Linked(lever));
    assert_eq!(link(&scope, mirror, "draw_parent"), SlotLink::Linked(mirror));
}

#[test]
fn array_slots_resolve_independently() {
    let registry = standard_registry();
    let (scope, outcome) =
        import_scope(&registry, &TranscodeConfig::default(), "m10_02", &spawner_scene());
    assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);

    let spawner = node_named(&scope, EntryFamily::Event, "Spawner");
    let first = node_named(&scope, EntryFamily::Part, "c1234_0000");
    let second = node_named(&scope, EntryFamily::Part, "c1234_0001");
    let parts = links(&scope, spawner, "spawn_parts");
    assert_eq!(parts.len(), 32);
    assert_eq!(parts[0], SlotLink::Linked(first));
    assert_eq!(parts[1], SlotLink::Empty);
    assert_eq!(parts[2], SlotLink::Linked(second));
    assert!(parts[3..].iter().all(SlotLink::is_empty));

    let patrol = links(&scope, first, "patrol_regions");
    assert_eq!(patrol.len(), 8);
    assert!(patrol[0].node().is_some());
    assert_eq!(patrol[1], SlotLink::Empty);
    assert!(patrol[2].node().is_some());
    assert_ne!(patrol[0], patrol[2]);
}

#[test]
fn missing_referent_gets_one_placeholder_and_a_warning_per_slot() {
    let registry = standard_registry();
    let records = vec![
        part(PartType::Collision, "Gate", "h0010B0")
            .name_ref("environment_event_name", "Fog9")
            .build(),
        part(PartType::Collision, "Wall", "h0010B0")
            .name_ref("environment_event_name", "Fog9")
            .build(),
        model(ModelType::Collision, "h0010B0"),
    ];
    let (scope, outcome) = import_scope(&registry, &TranscodeConfig::default(), "m10", &records);

    assert_eq!(outcome.placeholders.len(), 1);
    assert_eq!(outcome.stats.placeholders, 1);
    let placeholder = outcome.placeholders[0];
    let node = scope.node(placeholder).unwrap();
    assert_eq!(
        node.kind,
        NodeKind::Placeholder(KindFilter::Exact(EntryKind::Event(EventType::Environment)))
    );
    assert_eq!(node.record_name(), "Fog9");
    assert!(node.stand_in.is_none());

    let warnings: Vec<_> = outcome
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings
        .iter()
        .all(|d| d.field.as_deref() == Some("environment_event_name")));
    assert!(!outcome.has_errors());

    let gate = node_named(&scope, EntryFamily::Part, "Gate");
    let wall = node_named(&scope, EntryFamily::Part, "Wall");
    assert_eq!(link(&scope, gate, "environment_event"), SlotLink::Linked(placeholder));
    assert_eq!(link(&scope, wall, "environment_event"), SlotLink::Linked(placeholder));
}

#[test]
fn missing_model_placeholder_carries_stand_in_unless_disabled() {
    let registry = standard_registry();
    let records = vec![part(PartType::MapPiece, "m0001_0000", "m0001").build()];

    let (scope, outcome) = import_scope(&registry, &TranscodeConfig::default(), "m10", &records);
    let placeholder = scope.node(outcome.placeholders[0]).unwrap();
    assert_eq!(placeholder.family(), EntryFamily::Model);
    assert!(placeholder.stand_in.is_some());

    let bare = TranscodeConfig {
        model_stand_ins: false,
        ..TranscodeConfig::default()
    };
    let (scope, outcome) = import_scope(&registry, &bare, "m10", &records);
    assert!(scope.node(outcome.placeholders[0]).unwrap().stand_in.is_none());
}

#[test]
fn empty_model_slot_falls_back_to_stemmed_name() {
    let registry = standard_registry();
    let records = vec![
        part(PartType::Character, "c5000_0003", "").build(),
        model(ModelType::Character, "c5000"),
    ];
    let (scope, outcome) = import_scope(&registry, &TranscodeConfig::default(), "m10", &records);
    assert!(outcome.diagnostics.is_empty());
    let character = node_named(&scope, EntryFamily::Part, "c5000_0003");
    let model = node_named(&scope, EntryFamily::Model, "c5000");
    assert_eq!(link(&scope, character, "model"), SlotLink::Linked(model));
}

#[test]
fn ambiguous_name_is_an_error_and_never_picked() {
    let registry = standard_registry();
    let records = vec![
        event(EventType::Environment, "Fog1").build(),
        event(EventType::Environment, "Fog1").build(),
        part(PartType::Collision, "Gate", "h0010B0")
            .name_ref("environment_event_name", "Fog1")
            .build(),
        model(ModelType::Collision, "h0010B0"),
    ];
    let (scope, outcome) = import_scope(&registry, &TranscodeConfig::default(), "m10", &records);

    assert!(outcome.has_errors());
    assert_eq!(outcome.stats.ambiguous, 1);
    assert!(outcome.placeholders.is_empty());
    let gate = node_named(&scope, EntryFamily::Part, "Gate");
    assert_eq!(
        link(&scope, gate, "environment_event"),
        SlotLink::Unresolved("Fog1".into())
    );
}

#[test]
fn wrong_subtype_links_with_a_warning() {
    let registry = standard_registry();
    let records = vec![
        event(EventType::Sound, "Fog1").build(),
        part(PartType::Collision, "Gate", "h0010B0")
            .name_ref("environment_event_name", "Fog1")
            .build(),
        model(ModelType::Collision, "h0010B0"),
    ];
    let (scope, outcome) = import_scope(&registry, &TranscodeConfig::default(), "m10", &records);

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
    let gate = node_named(&scope, EntryFamily::Part, "Gate");
    let sound = node_named(&scope, EntryFamily::Event, "Fog1");
    assert_eq!(link(&scope, gate, "environment_event"), SlotLink::Linked(sound));
}

#[test]
fn bad_local_field_skips_only_that_entry() {
    let registry = standard_registry();
    let mut records = gate_and_fog();
    records.push(
        part(PartType::Collision, "Broken", "h0010B0")
            .int("hit_filter", 3)
            .build(),
    );
    let (scope, outcome) = import_scope(&registry, &TranscodeConfig::default(), "m10", &records);

    assert_eq!(outcome.stats.skipped, 1);
    assert_eq!(outcome.stats.created, 3);
    assert!(outcome.has_errors());
    assert_eq!(outcome.diagnostics[0].referrer, "Broken");
    assert!(scope.find_candidates(EntryFamily::Part, "Broken").is_empty());
}

#[test]
fn materialized_placeholder_keeps_incoming_links() {
    let registry = standard_registry();
    let records = vec![part(PartType::Collision, "Gate", "h0010B0")
        .name_ref("environment_event_name", "Fog9")
        .build()];
    let (mut scope, outcome) =
        import_scope(&registry, &TranscodeConfig::default(), "m10", &records);
    let fog = scope
        .iter_nodes()
        .find(|(_, n)| n.family() == EntryFamily::Event)
        .map(|(id, _)| id)
        .unwrap();
    assert!(outcome.placeholders.contains(&fog));

    let sound = EntryKind::Event(EventType::Sound);
    assert!(materialize_placeholder(&mut scope, &registry, fog, sound).is_err());
    let env = EntryKind::Event(EventType::Environment);
    materialize_placeholder(&mut scope, &registry, fog, env).unwrap();

    let node = scope.node(fog).unwrap();
    assert_eq!(node.kind, NodeKind::Entry(env));
    assert!(node.property("unk_x00").is_some());
    let gate = node_named(&scope, EntryFamily::Part, "Gate");
    assert_eq!(link(&scope, gate, "environment_event"), SlotLink::Linked(fog));
    assert!(materialize_placeholder(&mut scope, &registry, fog, env).is_err());
}

fn resolved_names(scope: &Scope) -> Vec<(String, String, Vec<String>)> {
    let mut out: Vec<_> = scope
        .iter_nodes()
        .flat_map(|(_, node)| {
            node.properties.iter().filter_map(move |(property, value)| {
                let slots = value.slots();
                if slots.is_empty() {
                    return None;
                }
                let names = slots
                    .iter()
                    .map(|slot| {
                        slot.node()
                            .and_then(|id| scope.node(id))
                            .map_or_else(String::new, |n| n.record_name().to_owned())
                    })
                    .collect();
                Some((node.record_name().to_owned(), property.clone(), names))
            })
        })
        .collect();
    out.sort();
    out
}

proptest! {
    #[test]
    fn record_order_does_not_change_links(seed in any::<u64>()) {
        let registry = standard_registry();
        let config = TranscodeConfig::default();
        let mut records = gate_and_fog();
        records.extend(spawner_scene());
        records.extend(cycle_pair());

        let (baseline, _) = import_scope(&registry, &config, "m10", &records);
        let (scope, outcome) = import_scope(&registry, &config, "m10", &shuffled(&records, seed));
        prop_assert!(outcome.diagnostics.is_empty());
        prop_assert!(outcome.placeholders.is_empty());
        prop_assert_eq!(resolved_names(&scope), resolved_names(&baseline));
    }
}
