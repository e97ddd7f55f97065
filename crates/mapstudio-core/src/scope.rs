// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory resolution scope.
use std::collections::BTreeMap;

use crate::error::HostError;
use crate::host::EntryHost;
use crate::ident::{make_scope_id, NodeId, ScopeId};
use crate::kind::NodeKind;
use crate::node::GraphNode;

/// One namespace of graph nodes (typically one map).
///
/// Nodes live in a `BTreeMap` keyed by monotonically assigned ids, so
/// iteration order is creation order and ids are never recycled.
#[derive(Clone, Debug)]
pub struct Scope {
    id: ScopeId,
    label: String,
    nodes: BTreeMap<NodeId, GraphNode>,
    next_id: u64,
}

impl Scope {
    /// Empty scope identified by `label`.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: make_scope_id(&label),
            label,
            nodes: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Stable scope id derived from the label.
    pub const fn id(&self) -> ScopeId {
        self.id
    }

    /// Scope label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the scope has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of live placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_placeholder()).count()
    }

    /// Re-parents `child`. `None` detaches it.
    ///
    /// # Errors
    /// [`HostError::UnknownNode`] for dead ids, [`HostError::ParentCycle`] if
    /// `parent` is `child` or one of its descendants.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), HostError> {
        if !self.nodes.contains_key(&child) {
            return Err(HostError::UnknownNode(child));
        }
        if let Some(parent) = parent {
            if !self.nodes.contains_key(&parent) {
                return Err(HostError::UnknownNode(parent));
            }
            let mut cursor = Some(parent);
            while let Some(id) = cursor {
                if id == child {
                    return Err(HostError::ParentCycle { child, parent });
                }
                cursor = self.nodes.get(&id).and_then(|n| n.parent);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }
        Ok(())
    }
}

impl EntryHost for Scope {
    fn scope_label(&self) -> &str {
        &self.label
    }

    fn create_node(&mut self, kind: NodeKind, name: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, GraphNode::new(kind, name));
        id
    }

    fn remove_node(&mut self, id: NodeId) -> Option<GraphNode> {
        let removed = self.nodes.remove(&id)?;
        for node in self.nodes.values_mut() {
            if node.parent == Some(id) {
                node.parent = None;
            }
        }
        Some(removed)
    }

    fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.get_mut(&id)
    }

    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kind::{EntryFamily, EntryKind, KindFilter, PartType, RegionType};

    fn part(scope: &mut Scope, name: &str) -> NodeId {
        scope.create_node(NodeKind::Entry(EntryKind::Part(PartType::MapPiece)), name)
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut scope = Scope::new("m10");
        let a = part(&mut scope, "a");
        scope.remove_node(a);
        let b = part(&mut scope, "b");
        assert_ne!(a, b);
        assert!(scope.node(a).is_none());
    }

    #[test]
    fn find_node_filters_by_family_and_disambiguator() {
        let mut scope = Scope::new("m10");
        let gate = part(&mut scope, "Gate.001");
        scope.create_node(NodeKind::Entry(EntryKind::Region(RegionType::Point)), "Gate");
        let found = scope
            .find_node(KindFilter::Family(EntryFamily::Part), "Gate")
            .unwrap();
        assert_eq!(found, Some(gate));
    }

    #[test]
    fn find_node_refuses_to_pick_between_duplicates() {
        let mut scope = Scope::new("m10");
        part(&mut scope, "Gate");
        part(&mut scope, "Gate.001");
        let err = scope
            .find_node(KindFilter::Family(EntryFamily::Part), "Gate")
            .unwrap_err();
        assert_eq!(err.count, 2);
    }

    #[test]
    fn set_parent_rejects_cycles() {
        let mut scope = Scope::new("m10");
        let a = part(&mut scope, "a");
        let b = part(&mut scope, "b");
        scope.set_parent(b, Some(a)).unwrap();
        assert_eq!(
            scope.set_parent(a, Some(b)),
            Err(HostError::ParentCycle {
                child: a,
                parent: b
            })
        );
        assert!(scope.set_parent(a, Some(a)).is_err());
    }

    #[test]
    fn removing_parent_detaches_children() {
        let mut scope = Scope::new("m10");
        let a = part(&mut scope, "a");
        let b = part(&mut scope, "b");
        scope.set_parent(b, Some(a)).unwrap();
        scope.remove_node(a);
        assert_eq!(scope.node(b).unwrap().parent, None);
    }
}
