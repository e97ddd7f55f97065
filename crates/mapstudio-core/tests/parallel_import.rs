// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used)]
use mapstudio_core::{export_scope, import_scopes, ScopeBatch, TranscodeConfig};
use mapstudio_dry_tests::{cycle_pair, gate_and_fog, spawner_scene, standard_registry};

#[test]
fn scopes_resolve_names_independently() {
    let registry = standard_registry();
    let config = TranscodeConfig {
        workers: 3,
        ..TranscodeConfig::default()
    };
    // The same names in every scope; links must never cross scopes.
    let batches: Vec<ScopeBatch> = (0..6)
        .map(|i| {
            let records = match i % 3 {
                0 => gate_and_fog(),
                1 => spawner_scene(),
                _ => cycle_pair(),
            };
            (format!("m{i:02}_00"), records)
        })
        .collect();

    let results = import_scopes(&registry, &config, batches.clone());
    assert_eq!(results.len(), batches.len());
    for ((label, records), (scope, outcome)) in batches.iter().zip(&results) {
        assert_eq!(scope.label(), label);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(&export_scope(&registry, &config, scope).unwrap(), records);
    }
    assert_ne!(results[0].0.id(), results[3].0.id());
}
