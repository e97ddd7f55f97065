// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Multi-scope import on a worker pool.
//!
//! Scopes never reference each other, so each one is imported start to
//! finish by a single worker. Workers claim whole scopes from a shared
//! counter; results come back in batch order regardless of which worker ran
//! them.
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info_span};

use crate::config::TranscodeConfig;
use crate::record::Record;
use crate::registry::DescriptorRegistry;
use crate::scope::Scope;
use crate::session::{import_scope, ImportOutcome};

/// Records of one scope, tagged with its label.
pub type ScopeBatch = (String, Vec<Record>);

/// Imports every batch into its own scope using `config.workers` threads.
///
/// The output has one entry per batch, in input order.
pub fn import_scopes(
    registry: &DescriptorRegistry,
    config: &TranscodeConfig,
    batches: Vec<ScopeBatch>,
) -> Vec<(Scope, ImportOutcome)> {
    let workers = config.workers.clamp(1, batches.len().max(1));
    if workers == 1 {
        return batches
            .iter()
            .map(|(label, records)| import_scope(registry, config, label, records))
            .collect();
    }

    let next = AtomicUsize::new(0);
    let mut finished: Vec<(usize, (Scope, ImportOutcome))> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let batches = &batches;
                let next = &next;
                s.spawn(move || {
                    let _span = info_span!("import_worker", worker).entered();
                    let mut done = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some((label, records)) = batches.get(index) else {
                            break;
                        };
                        debug!(worker, scope = %label, "scope claimed");
                        done.push((index, import_scope(registry, config, label, records)));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(done) => done,
                Err(e) => std::panic::resume_unwind(e),
            })
            .collect()
    });

    finished.sort_by_key(|(index, _)| *index);
    finished.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kind::{EntryKind, RegionType};
    use crate::schema::schema_for;

    fn batch(label: &str, names: &[&str]) -> ScopeBatch {
        let kind = EntryKind::Region(RegionType::Point);
        let records = names
            .iter()
            .map(|name| schema_for(kind).default_record(name))
            .collect();
        (label.to_owned(), records)
    }

    #[test]
    fn results_follow_batch_order_for_any_worker_count() {
        let registry = DescriptorRegistry::standard().unwrap();
        let batches: Vec<ScopeBatch> = (0..7)
            .map(|i| batch(&format!("m{i:02}"), &["a", "b"][..=(i % 2)]))
            .collect();
        for workers in [1, 2, 3, 16] {
            let config = TranscodeConfig {
                workers,
                ..TranscodeConfig::default()
            };
            let results = import_scopes(&registry, &config, batches.clone());
            assert_eq!(results.len(), batches.len());
            for ((label, records), (scope, outcome)) in batches.iter().zip(&results) {
                assert_eq!(scope.label(), label);
                assert_eq!(scope.len(), records.len());
                assert!(!outcome.has_errors());
            }
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        let registry = DescriptorRegistry::standard().unwrap();
        let config = TranscodeConfig {
            workers: 4,
            ..TranscodeConfig::default()
        };
        assert!(import_scopes(&registry, &config, Vec::new()).is_empty());
    }
}
