// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Two-phase import: records to graph nodes.
//!
//! `CREATING` builds every node with its local properties and empty reference
//! slots. `LINKING` then binds slot names against the completed scope. The
//! phases are separate types, so no referrer can resolve against a partially
//! built scope.
use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use crate::adapter::ReferenceAdapter;
use crate::config::TranscodeConfig;
use crate::descriptor::PropertyBag;
use crate::diagnostic::Diagnostic;
use crate::error::FieldError;
use crate::host::EntryHost;
use crate::ident::NodeId;
use crate::kind::{EntryFamily, KindFilter, NodeKind};
use crate::node::StandIn;
use crate::record::Record;
use crate::registry::DescriptorRegistry;
use crate::schema::schema_for;
use crate::value::SlotLink;

/// Counters reported by an import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Records offered.
    pub records: usize,
    /// Nodes created from records.
    pub created: usize,
    /// Records skipped because a local field failed.
    pub skipped: usize,
    /// Slots bound to a node.
    pub linked: usize,
    /// Placeholders synthesized.
    pub placeholders: usize,
    /// Slots left unresolved because of ambiguity.
    pub ambiguous: usize,
}

/// Result of a finished import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Nodes created from records, in record order.
    pub created: Vec<NodeId>,
    /// Placeholders synthesized during linking.
    pub placeholders: Vec<NodeId>,
    /// Every warning and error, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
    /// Counters.
    pub stats: ImportStats,
}

impl ImportOutcome {
    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

struct PendingReference<'r> {
    adapter: &'r ReferenceAdapter,
    names: Vec<String>,
}

struct PendingEntry<'r> {
    node: NodeId,
    name: String,
    references: Vec<PendingReference<'r>>,
}

/// Import in its `CREATING` phase.
pub struct ImportSession<'a, H: EntryHost> {
    registry: &'a DescriptorRegistry,
    config: &'a TranscodeConfig,
    host: &'a mut H,
}

impl<'a, H: EntryHost> ImportSession<'a, H> {
    /// Starts an import into `host`.
    pub fn new(
        registry: &'a DescriptorRegistry,
        config: &'a TranscodeConfig,
        host: &'a mut H,
    ) -> Self {
        Self {
            registry,
            config,
            host,
        }
    }

    /// Runs the creating phase over `records`, in any order.
    ///
    /// Entries whose local fields fail to decode are skipped with an error
    /// diagnostic; the pass continues.
    #[instrument(skip_all, fields(scope = %self.host.scope_label(), records = records.len()))]
    pub fn create(self, records: &[Record]) -> ImportLinker<'a, H> {
        let Self {
            registry,
            config,
            host,
        } = self;
        let mut diagnostics = Vec::new();
        let mut pending = Vec::with_capacity(records.len());
        let mut stats = ImportStats {
            records: records.len(),
            ..ImportStats::default()
        };

        for record in records {
            match local_properties(registry, record) {
                Ok((properties, references)) => {
                    let node = host.create_node(NodeKind::Entry(record.kind), &record.name);
                    if let Some(n) = host.node_mut(node) {
                        n.properties = properties;
                        n.source_name = Some(record.name.clone());
                    }
                    debug!(%node, kind = %record.kind, name = %record.name, "entry created");
                    pending.push(PendingEntry {
                        node,
                        name: record.name.clone(),
                        references,
                    });
                }
                Err(diagnostic) => {
                    warn!(%diagnostic, "entry skipped");
                    diagnostics.push(diagnostic);
                    stats.skipped += 1;
                }
            }
        }
        stats.created = pending.len();
        info!(created = stats.created, skipped = stats.skipped, "creating phase done");

        ImportLinker {
            registry,
            config,
            host,
            pending,
            diagnostics,
            stats,
        }
    }
}

/// Local properties and pending references of one record. Nothing reaches
/// the host unless every field converts.
fn local_properties<'r>(
    registry: &'r DescriptorRegistry,
    record: &Record,
) -> Result<(PropertyBag, Vec<PendingReference<'r>>), Diagnostic> {
    let descriptor = registry.get(record.kind).ok_or_else(|| {
        Diagnostic::error(
            &record.name,
            format!("no descriptor registered for {}", record.kind),
        )
    })?;
    schema_for(record.kind)
        .check(record)
        .map_err(|e| field_diagnostic(&record.name, &e))?;

    let mut properties = PropertyBag::new();
    let mut references = Vec::new();
    for adapter in descriptor.adapters() {
        let value = adapter
            .to_node(record)
            .map_err(|e| field_diagnostic(&record.name, &e))?;
        if let Some(reference) = adapter.as_reference() {
            let names = reference
                .read_names(record)
                .map_err(|e| field_diagnostic(&record.name, &e))?;
            references.push(PendingReference {
                adapter: reference,
                names,
            });
        }
        properties.insert(adapter.property().to_owned(), value);
    }
    Ok((properties, references))
}

fn field_diagnostic(referrer: &str, error: &FieldError) -> Diagnostic {
    let field = match error {
        FieldError::Decode { field, .. } => field.as_str(),
        FieldError::Encode { property, .. } => property.as_str(),
    };
    Diagnostic::error(referrer, error.to_string()).at(field, None)
}

enum PlannedSlot {
    Empty,
    Existing(NodeId),
    Staged(usize),
    Unresolved(String),
}

struct StagedPlaceholder {
    filter: KindFilter,
    name: String,
}

struct PlannedProperty<'r> {
    node: NodeId,
    adapter: &'r ReferenceAdapter,
    slots: Vec<PlannedSlot>,
}

/// Import in its `LINKING` phase: every node exists, no slot is bound yet.
///
/// Dropping the linker aborts the import between phases; created nodes stay
/// in the host with empty reference slots.
pub struct ImportLinker<'a, H: EntryHost> {
    registry: &'a DescriptorRegistry,
    config: &'a TranscodeConfig,
    host: &'a mut H,
    pending: Vec<PendingEntry<'a>>,
    diagnostics: Vec<Diagnostic>,
    stats: ImportStats,
}

impl<'a, H: EntryHost> ImportLinker<'a, H> {
    /// Nodes created by the creating phase.
    pub fn created(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.pending.iter().map(|p| p.node)
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The registry the session was opened with.
    pub const fn registry(&self) -> &'a DescriptorRegistry {
        self.registry
    }

    /// Binds every pending slot, synthesizing placeholders for missing
    /// referents. All links are planned before any node is touched.
    ///
    /// A name matched by exactly one entry of a subtype the slot does not
    /// admit is still linked to that entry, with a warning; no placeholder is
    /// made for it. Export then rejects the link as wrong-kind until it is
    /// repointed.
    #[instrument(skip_all, fields(scope = %self.host.scope_label(), entries = self.pending.len()))]
    pub fn link(mut self) -> ImportOutcome {
        let mut planner = LinkPlanner {
            index: BTreeMap::new(),
            staged: Vec::new(),
            staged_index: BTreeMap::new(),
            diagnostics: Vec::new(),
            ambiguous: 0,
        };
        for (id, node) in self.host.iter_nodes() {
            planner
                .index
                .entry((node.family(), node.record_name().to_owned()))
                .or_default()
                .push((id, node.kind));
        }

        let mut plan = Vec::new();
        for entry in &self.pending {
            for reference in &entry.references {
                let slots = reference
                    .names
                    .iter()
                    .enumerate()
                    .map(|(slot, raw)| planner.plan_slot(&entry.name, reference.adapter, slot, raw))
                    .collect();
                plan.push(PlannedProperty {
                    node: entry.node,
                    adapter: reference.adapter,
                    slots,
                });
            }
        }
        self.diagnostics.append(&mut planner.diagnostics);
        self.stats.ambiguous = planner.ambiguous;

        // Commit: placeholders first, then every slot.
        let mut placeholders = Vec::with_capacity(planner.staged.len());
        for placeholder in &planner.staged {
            let id = self
                .host
                .create_node(NodeKind::Placeholder(placeholder.filter), &placeholder.name);
            let model = placeholder.filter.family() == EntryFamily::Model;
            if let Some(node) = self.host.node_mut(id) {
                node.source_name = Some(placeholder.name.clone());
                if model && self.config.model_stand_ins {
                    node.stand_in = Some(StandIn::tetrahedron());
                }
            }
            warn!(
                node = %id,
                filter = %placeholder.filter,
                name = %placeholder.name,
                "placeholder synthesized"
            );
            placeholders.push(id);
        }

        for property in plan {
            let links: Vec<SlotLink> = property
                .slots
                .into_iter()
                .map(|slot| match slot {
                    PlannedSlot::Empty => SlotLink::Empty,
                    PlannedSlot::Existing(id) => SlotLink::Linked(id),
                    PlannedSlot::Staged(idx) => SlotLink::Linked(placeholders[idx]),
                    PlannedSlot::Unresolved(name) => SlotLink::Unresolved(name),
                })
                .collect();
            self.stats.linked += links.iter().filter(|l| l.node().is_some()).count();
            let value = property.adapter.value_from_slots(links);
            if let Some(node) = self.host.node_mut(property.node) {
                node.properties
                    .insert(property.adapter.property.to_owned(), value);
            }
        }
        self.stats.placeholders = placeholders.len();
        info!(
            linked = self.stats.linked,
            placeholders = self.stats.placeholders,
            ambiguous = self.stats.ambiguous,
            "linking phase done"
        );

        ImportOutcome {
            created: self.pending.iter().map(|p| p.node).collect(),
            placeholders,
            diagnostics: self.diagnostics,
            stats: self.stats,
        }
    }
}

/// Linking-phase plan state. Owns a snapshot of the scope's names, so
/// planning never reads a half-linked host.
struct LinkPlanner {
    index: BTreeMap<(EntryFamily, String), Vec<(NodeId, NodeKind)>>,
    staged: Vec<StagedPlaceholder>,
    staged_index: BTreeMap<(EntryFamily, String), usize>,
    diagnostics: Vec<Diagnostic>,
    ambiguous: usize,
}

impl LinkPlanner {
    fn plan_slot(
        &mut self,
        referrer: &str,
        adapter: &ReferenceAdapter,
        slot: usize,
        raw: &str,
    ) -> PlannedSlot {
        let at = adapter.arity.slot_label(slot);
        let name = match (raw.is_empty(), adapter.stem) {
            (false, _) => raw,
            (true, Some(rule)) => rule.stem(referrer),
            (true, None) => "",
        };
        if name.is_empty() {
            return PlannedSlot::Empty;
        }
        let family = adapter.target.family();
        let key = (family, name.to_owned());
        match self.index.get(&key).map_or(&[][..], Vec::as_slice) {
            [] => {
                let staged = &mut self.staged;
                let idx = *self.staged_index.entry(key).or_insert_with(|| {
                    staged.push(StagedPlaceholder {
                        filter: adapter.target,
                        name: name.to_owned(),
                    });
                    staged.len() - 1
                });
                self.diagnostics.push(
                    Diagnostic::warning(
                        referrer,
                        format!("no {} named `{name}`; linked to a placeholder", adapter.target),
                    )
                    .at(adapter.record_field, at),
                );
                PlannedSlot::Staged(idx)
            }
            [(id, kind)] => {
                if let NodeKind::Entry(kind) = kind {
                    if !adapter.target.admits(*kind) {
                        self.diagnostics.push(
                            Diagnostic::warning(
                                referrer,
                                format!(
                                    "`{name}` is {kind}, expected {}; export will reject it",
                                    adapter.target
                                ),
                            )
                            .at(adapter.record_field, at),
                        );
                    }
                }
                PlannedSlot::Existing(*id)
            }
            many => {
                self.diagnostics.push(
                    Diagnostic::error(
                        referrer,
                        format!("{} {family} entries are named `{name}`", many.len()),
                    )
                    .at(adapter.record_field, at),
                );
                self.ambiguous += 1;
                PlannedSlot::Unresolved(name.to_owned())
            }
        }
    }
}
