// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Two-phase export: graph nodes to records.
//!
//! `WRITING` builds a fresh record per real entry with every local field.
//! `LINKING` then turns each reference slot into a name, accepting only
//! referents that were written in the same pass. Any failure in either phase
//! makes the whole scope fail; no partial record set is returned.
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, instrument, warn};

use crate::adapter::{Adapter, Arity, ReferenceAdapter};
use crate::config::{PoseSpace, TranscodeConfig};
use crate::error::{
    AmbiguousNameError, ExportFailure, FieldError, MissingReason, MissingReferenceError,
    ScopeFatalError,
};
use crate::host::{world_pose, EntryHost};
use crate::ident::NodeId;
use crate::kind::{EntryFamily, KindFilter, NodeKind};
use crate::record::Record;
use crate::registry::DescriptorRegistry;
use crate::value::{PropertyValue, SlotLink};

struct WrittenEntry {
    node: NodeId,
    record: Record,
}

/// Export in its `WRITING` phase.
pub struct ExportSession<'a, H: EntryHost> {
    registry: &'a DescriptorRegistry,
    config: &'a TranscodeConfig,
    host: &'a H,
}

impl<'a, H: EntryHost> ExportSession<'a, H> {
    /// Starts an export of `host`.
    pub const fn new(
        registry: &'a DescriptorRegistry,
        config: &'a TranscodeConfig,
        host: &'a H,
    ) -> Self {
        Self {
            registry,
            config,
            host,
        }
    }

    /// Runs the writing phase over every real entry, in creation order.
    ///
    /// Placeholders are never written. An entry with a failing field is left
    /// out and its failures are carried into the linker.
    #[instrument(skip_all, fields(scope = %self.host.scope_label()))]
    pub fn write(self) -> ExportLinker<'a, H> {
        let mut written = Vec::new();
        let mut failures = Vec::new();
        let mut names: BTreeMap<(EntryFamily, String), usize> = BTreeMap::new();

        for (id, node) in self.host.iter_nodes() {
            let NodeKind::Entry(kind) = node.kind else {
                continue;
            };
            let name = node.record_name();
            *names.entry((kind.family(), name.to_owned())).or_default() += 1;

            let Some(descriptor) = self.registry.get(kind) else {
                failures.push(ExportFailure::NoDescriptor {
                    referrer: name.to_owned(),
                    kind,
                });
                continue;
            };

            let mut record = Record::new(kind, name);
            let mut entry_failed = false;
            for adapter in descriptor.adapters() {
                if let Err(error) = self.write_field(id, adapter, &mut record) {
                    failures.push(ExportFailure::Field {
                        referrer: name.to_owned(),
                        error,
                    });
                    entry_failed = true;
                }
            }
            if entry_failed {
                continue;
            }
            debug!(node = %id, %kind, name, "record written");
            written.push(WrittenEntry { node: id, record });
        }

        for ((family, name), count) in names {
            if count > 1 {
                failures.push(ExportFailure::DuplicateName {
                    family,
                    name,
                    count,
                });
            }
        }
        info!(
            written = written.len(),
            failures = failures.len(),
            "writing phase done"
        );

        ExportLinker {
            registry: self.registry,
            host: self.host,
            written,
            failures,
        }
    }

    fn write_field(
        &self,
        id: NodeId,
        adapter: &Adapter,
        record: &mut Record,
    ) -> Result<(), FieldError> {
        if adapter.as_reference().is_some() {
            return Ok(());
        }
        let property = adapter.property();
        let world;
        let value = match (adapter, self.config.pose_space) {
            (Adapter::Transform(_), PoseSpace::World) => {
                let pose = world_pose(self.host, id)
                    .ok_or_else(|| FieldError::encode(property, "property is missing"))?;
                world = PropertyValue::Pose(pose);
                &world
            }
            _ => self
                .host
                .get_property(id, property)
                .ok_or_else(|| FieldError::encode(property, "property is missing"))?,
        };
        adapter.to_record(value, record)
    }
}

/// Export in its `LINKING` phase: every writable record exists, no reference
/// field is filled yet.
pub struct ExportLinker<'a, H: EntryHost> {
    registry: &'a DescriptorRegistry,
    host: &'a H,
    written: Vec<WrittenEntry>,
    failures: Vec<ExportFailure>,
}

impl<'a, H: EntryHost> ExportLinker<'a, H> {
    /// Records produced by the writing phase, without reference fields.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.written.iter().map(|w| &w.record)
    }

    /// Failures collected so far.
    pub fn failures(&self) -> &[ExportFailure] {
        &self.failures
    }

    /// Fills every reference field against the completed record set.
    ///
    /// # Errors
    /// [`ScopeFatalError`] listing every failure of both phases.
    #[instrument(skip_all, fields(scope = %self.host.scope_label(), records = self.written.len()))]
    pub fn link(mut self) -> Result<Vec<Record>, ScopeFatalError> {
        let exported: BTreeSet<NodeId> = self.written.iter().map(|w| w.node).collect();
        let mut index: BTreeMap<(EntryFamily, String), Vec<NodeId>> = BTreeMap::new();
        for (id, node) in self.host.iter_nodes() {
            index
                .entry((node.family(), node.record_name().to_owned()))
                .or_default()
                .push(id);
        }
        let resolver = Resolver {
            host: self.host,
            exported: &exported,
            index: &index,
        };

        let mut failures = Vec::new();
        for entry in &mut self.written {
            let Some(descriptor) = self.registry.get(entry.record.kind) else {
                continue;
            };
            for adapter in descriptor.reference_fields() {
                match resolver.names_for(entry, adapter) {
                    Ok(names) => adapter.write_names(names, &mut entry.record),
                    Err(mut found) => failures.append(&mut found),
                }
            }
        }
        self.failures.append(&mut failures);

        if self.failures.is_empty() {
            info!(records = self.written.len(), "linking phase done");
            return Ok(self.written.into_iter().map(|w| w.record).collect());
        }
        for failure in &self.failures {
            warn!(%failure, "export failure");
        }
        Err(ScopeFatalError {
            scope: self.host.scope_label().to_owned(),
            failures: self.failures,
        })
    }
}

struct Resolver<'r, H: EntryHost> {
    host: &'r H,
    exported: &'r BTreeSet<NodeId>,
    index: &'r BTreeMap<(EntryFamily, String), Vec<NodeId>>,
}

impl<H: EntryHost> Resolver<'_, H> {
    fn names_for(
        &self,
        entry: &WrittenEntry,
        adapter: &ReferenceAdapter,
    ) -> Result<Vec<String>, Vec<ExportFailure>> {
        let referrer = entry.record.name.as_str();
        let slots = match (adapter.arity, self.host.get_property(entry.node, adapter.property)) {
            (Arity::Single, Some(value @ PropertyValue::Link(_))) => value.slots(),
            (Arity::Array(n), Some(value @ PropertyValue::Links(links))) if links.len() == n => {
                value.slots()
            }
            (_, found) => {
                let reason = found.map_or_else(
                    || "property is missing".to_owned(),
                    |v| format!("expected {:?}, found {}", adapter.arity, v.type_name()),
                );
                return Err(vec![ExportFailure::Field {
                    referrer: referrer.to_owned(),
                    error: FieldError::encode(adapter.property, reason),
                }]);
            }
        };

        let mut names = Vec::with_capacity(slots.len());
        let mut failures = Vec::new();
        for (slot, link) in slots.iter().enumerate() {
            match self.slot_name(referrer, adapter, adapter.arity.slot_label(slot), link) {
                Ok(name) => names.push(name),
                Err(failure) => failures.push(failure),
            }
        }
        if failures.is_empty() {
            Ok(names)
        } else {
            Err(failures)
        }
    }

    fn slot_name(
        &self,
        referrer: &str,
        adapter: &ReferenceAdapter,
        slot: Option<usize>,
        link: &SlotLink,
    ) -> Result<String, ExportFailure> {
        let missing = |target: &str, reason| {
            ExportFailure::Missing(MissingReferenceError {
                referrer: referrer.to_owned(),
                field: adapter.record_field.to_owned(),
                slot,
                target: target.to_owned(),
                reason,
            })
        };
        match link {
            SlotLink::Empty => match adapter.stem {
                Some(rule) => {
                    let stem = rule.stem(referrer);
                    let id = self.lookup(referrer, adapter, slot, stem)?;
                    self.check(id, adapter.target).map_err(|r| missing(stem, r))
                }
                None => Ok(String::new()),
            },
            SlotLink::Linked(id) => {
                let shown = self
                    .host
                    .node(*id)
                    .map_or_else(|| id.to_string(), |n| n.record_name().to_owned());
                self.check(*id, adapter.target).map_err(|r| missing(&shown, r))
            }
            SlotLink::Unresolved(name) => {
                let id = self.lookup(referrer, adapter, slot, name)?;
                self.check(id, adapter.target).map_err(|r| missing(name, r))
            }
        }
    }

    /// The single node in the target family named `name`.
    fn lookup(
        &self,
        referrer: &str,
        adapter: &ReferenceAdapter,
        slot: Option<usize>,
        name: &str,
    ) -> Result<NodeId, ExportFailure> {
        let family = adapter.target.family();
        match self
            .index
            .get(&(family, name.to_owned()))
            .map_or(&[][..], Vec::as_slice)
        {
            [id] => Ok(*id),
            [] => Err(ExportFailure::Missing(MissingReferenceError {
                referrer: referrer.to_owned(),
                field: adapter.record_field.to_owned(),
                slot,
                target: name.to_owned(),
                reason: MissingReason::Unresolved,
            })),
            many => Err(ExportFailure::Ambiguous {
                referrer: referrer.to_owned(),
                field: adapter.record_field.to_owned(),
                slot,
                error: AmbiguousNameError {
                    family,
                    name: name.to_owned(),
                    count: many.len(),
                },
            }),
        }
    }

    /// Record name of `id`, if it is a real, admitted, exported entry.
    fn check(&self, id: NodeId, filter: KindFilter) -> Result<String, MissingReason> {
        let node = self.host.node(id).ok_or(MissingReason::Deleted)?;
        match node.kind {
            NodeKind::Placeholder(_) => Err(MissingReason::Placeholder),
            NodeKind::Entry(kind) if !filter.admits(kind) => Err(MissingReason::WrongKind),
            NodeKind::Entry(_) if !self.exported.contains(&id) => Err(MissingReason::NotExported),
            NodeKind::Entry(_) => Ok(node.record_name().to_owned()),
        }
    }
}
