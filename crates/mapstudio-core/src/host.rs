// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host graph port.
//!
//! Sessions talk to the editor's scene graph only through [`EntryHost`]. The
//! in-memory [`Scope`](crate::Scope) is the reference implementation.
use crate::descriptor::PropertyBag;
use crate::error::{AmbiguousNameError, HostError};
use crate::ident::NodeId;
use crate::kind::{EntryFamily, EntryKind, KindFilter, NodeKind};
use crate::math::Affine;
use crate::node::GraphNode;
use crate::registry::DescriptorRegistry;
use crate::value::{Pose, PropertyValue};

/// Graph container owning the nodes of one scope.
///
/// Node ids are never reused, so a link to a removed node stays detectably
/// dangling.
pub trait EntryHost {
    /// Human-readable scope label.
    fn scope_label(&self) -> &str;

    /// Creates an empty node and returns its id.
    fn create_node(&mut self, kind: NodeKind, name: &str) -> NodeId;

    /// Removes a node. Links to it are left dangling.
    fn remove_node(&mut self, id: NodeId) -> Option<GraphNode>;

    /// Live node by id.
    fn node(&self, id: NodeId) -> Option<&GraphNode>;

    /// Mutable live node by id.
    fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode>;

    /// Every live node in creation order. Restartable.
    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> + '_;

    /// Nodes in `family` whose record name is `name`, in creation order.
    fn find_candidates(&self, family: EntryFamily, name: &str) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, n)| n.family() == family && n.record_name() == name)
            .map(|(id, _)| id)
            .collect()
    }

    /// The single node named `name` that satisfies `filter`.
    ///
    /// Placeholders match when their own filter is the one asked for.
    ///
    /// # Errors
    /// [`AmbiguousNameError`] when more than one node matches.
    fn find_node(
        &self,
        filter: KindFilter,
        name: &str,
    ) -> Result<Option<NodeId>, AmbiguousNameError> {
        let matches: Vec<NodeId> = self
            .find_candidates(filter.family(), name)
            .into_iter()
            .filter(|id| {
                self.node(*id).is_some_and(|n| match n.kind {
                    NodeKind::Entry(kind) => filter.admits(kind),
                    NodeKind::Placeholder(p) => p == filter,
                })
            })
            .collect();
        match matches.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(AmbiguousNameError {
                family: filter.family(),
                name: name.to_owned(),
                count: matches.len(),
            }),
        }
    }

    /// Property of a live node.
    fn get_property(&self, id: NodeId, property: &str) -> Option<&PropertyValue> {
        self.node(id).and_then(|n| n.property(property))
    }

    /// Overwrites a property of a live node.
    ///
    /// # Errors
    /// [`HostError::UnknownNode`] if `id` is not live.
    fn set_property(
        &mut self,
        id: NodeId,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), HostError> {
        let node = self.node_mut(id).ok_or(HostError::UnknownNode(id))?;
        node.properties.insert(property.to_owned(), value);
        Ok(())
    }
}

/// Creates a real entry with the descriptor's default properties.
///
/// # Errors
/// [`HostError::NoDescriptor`] for unregistered kinds.
pub fn create_entry<H: EntryHost>(
    host: &mut H,
    registry: &DescriptorRegistry,
    kind: EntryKind,
    name: &str,
) -> Result<NodeId, HostError> {
    let properties = default_properties(registry, kind, name)?;
    let id = host.create_node(NodeKind::Entry(kind), name);
    if let Some(node) = host.node_mut(id) {
        node.properties = properties;
    }
    Ok(id)
}

/// Creates a real entry with caller-supplied properties, validated against
/// the kind's descriptor before anything is inserted.
///
/// # Errors
/// [`HostError::NoDescriptor`] or [`HostError::Properties`].
pub fn insert_entry<H: EntryHost>(
    host: &mut H,
    registry: &DescriptorRegistry,
    kind: EntryKind,
    name: &str,
    properties: PropertyBag,
) -> Result<NodeId, HostError> {
    let descriptor = registry.get(kind).ok_or(HostError::NoDescriptor(kind))?;
    descriptor.validate_properties(&properties)?;
    let id = host.create_node(NodeKind::Entry(kind), name);
    if let Some(node) = host.node_mut(id) {
        node.properties = properties;
    }
    Ok(id)
}

/// Turns a placeholder into a real entry of `kind`, filling in the
/// descriptor's default properties. Links to the node stay valid.
///
/// # Errors
/// [`HostError::UnknownNode`], [`HostError::NotPlaceholder`],
/// [`HostError::KindRejected`] when `kind` is outside the placeholder's
/// filter, or [`HostError::NoDescriptor`].
pub fn materialize_placeholder<H: EntryHost>(
    host: &mut H,
    registry: &DescriptorRegistry,
    id: NodeId,
    kind: EntryKind,
) -> Result<(), HostError> {
    let node = host.node(id).ok_or(HostError::UnknownNode(id))?;
    let NodeKind::Placeholder(filter) = node.kind else {
        return Err(HostError::NotPlaceholder(id));
    };
    if !filter.admits(kind) {
        return Err(HostError::KindRejected { node: id, kind });
    }
    let properties = default_properties(registry, kind, node.record_name())?;
    let node = host.node_mut(id).ok_or(HostError::UnknownNode(id))?;
    node.kind = NodeKind::Entry(kind);
    node.properties = properties;
    node.stand_in = None;
    tracing::debug!(node = %id, %kind, "placeholder materialized");
    Ok(())
}

fn default_properties(
    registry: &DescriptorRegistry,
    kind: EntryKind,
    name: &str,
) -> Result<PropertyBag, HostError> {
    let descriptor = registry.get(kind).ok_or(HostError::NoDescriptor(kind))?;
    Ok(descriptor.default_properties(name)?)
}

/// Pose of `id` composed with every ancestor's pose.
///
/// Ancestors without a pose (or already removed) contribute identity.
/// Returns `None` if the node itself has no pose.
pub fn world_pose<H: EntryHost>(host: &H, id: NodeId) -> Option<Pose> {
    let node = host.node(id)?;
    let local = *node.pose()?;
    let mut world = Affine::from_pose(&local);
    let mut composed = false;
    let mut cursor = node.parent;
    let mut hops = 0usize;
    while let Some(parent_id) = cursor {
        // Bounded: only `Scope::set_parent` guarantees an acyclic chain.
        hops += 1;
        if hops > 4096 {
            break;
        }
        let Some(parent) = host.node(parent_id) else {
            break;
        };
        if let Some(pose) = parent.pose() {
            world = Affine::from_pose(pose).compose(&world);
            composed = true;
        }
        cursor = parent.parent;
    }
    // Decomposition is lossy for mirrored scale and wrapped angles.
    Some(if composed { world.to_pose() } else { local })
}
