// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::cast_possible_truncation)]
use proptest::prelude::*;

use mapstudio_core::catalog::events::{OBJ_ACT_STATES, SOUND_TYPES};
use mapstudio_core::catalog::parts::{model_strategy, HIT_FILTERS};
use mapstudio_core::{
    export_scope, import_scope, schema_for, EntryKind, FieldType, FieldValue, Record,
    TranscodeConfig,
};
use mapstudio_dry_tests::{model, standard_registry, XorShift64};

fn finite(rng: &mut XorShift64) -> f32 {
    loop {
        let v = f32::from_bits(rng.next_u64() as u32);
        if v.is_finite() && v.abs() < 1.0e6 {
            return v;
        }
    }
}

fn enum_value(field: &str, rng: &mut XorShift64) -> Option<i64> {
    let table = match field {
        "hit_filter" => HIT_FILTERS,
        "sound_type" => SOUND_TYPES,
        "obj_act_state" => OBJ_ACT_STATES,
        _ => return None,
    };
    Some(table[rng.below(table.len())].0)
}

/// A record of `kind` with every local field randomized and every reference
/// empty, except the model reference of parts.
fn random_record(kind: EntryKind, seed: u64) -> Record {
    let mut rng = XorShift64::new(seed);
    let schema = schema_for(kind);
    let mut record = Record::new(kind, format!("e{:04}_{:04}", seed % 10_000, seed % 97));
    for spec in &schema.fields {
        let value = match spec.ty {
            FieldType::Bool => FieldValue::Bool(rng.next_u64() & 1 == 1),
            FieldType::Int => FieldValue::Int(
                enum_value(spec.name, &mut rng).unwrap_or_else(|| i64::from(rng.next_u64() as i32)),
            ),
            FieldType::Float => FieldValue::Float(finite(&mut rng)),
            FieldType::Vec3 => {
                FieldValue::Vec3([finite(&mut rng), finite(&mut rng), finite(&mut rng)])
            }
            FieldType::Str => FieldValue::Str(format!("N:\\map\\{:x}.sib", rng.next_u64())),
            FieldType::IntList(n) => {
                FieldValue::IntList((0..n).map(|_| i64::from(rng.next_u64() as i32)).collect())
            }
            FieldType::Mask(n) => FieldValue::Mask((0..n).map(|_| rng.next_u64() as u32).collect()),
            FieldType::Name => FieldValue::Name(String::new()),
            FieldType::Names(n) => FieldValue::Names(vec![String::new(); n]),
        };
        record.fields.insert(spec.name.to_owned(), value);
    }
    record
}

fn scene_for(kind: EntryKind, seed: u64) -> Vec<Record> {
    let mut record = random_record(kind, seed);
    let mut records = Vec::new();
    if let EntryKind::Part(part) = kind {
        record
            .fields
            .insert("model_name".into(), FieldValue::Name("mdl".into()));
        records.push(model(model_strategy(part).model_type, "mdl"));
    }
    records.insert(0, record);
    records
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_kind_survives_import_then_export(
        index in 0..EntryKind::all().count(),
        seed in 1..u64::MAX,
    ) {
        let kind = EntryKind::all().nth(index).unwrap();
        let records = scene_for(kind, seed);
        let registry = standard_registry();
        let config = TranscodeConfig::default();

        let (scope, outcome) = import_scope(&registry, &config, "m99_00", &records);
        prop_assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);
        let exported = export_scope(&registry, &config, &scope).unwrap();
        prop_assert_eq!(exported, records);
    }
}
