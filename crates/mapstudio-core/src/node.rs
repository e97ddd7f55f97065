// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graph nodes: the editable representation of entries.
use crate::descriptor::PropertyBag;
use crate::ident::NodeId;
use crate::kind::{EntryFamily, NodeKind};
use crate::name::strip_disambiguator;
use crate::value::{Pose, PropertyValue};

/// Property that holds a node's pose, when its kind has one.
pub const POSE_PROPERTY: &str = "pose";

/// Minimal visible geometry carried by synthesized model placeholders.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandIn {
    /// Vertex positions.
    pub vertices: Vec<[f64; 3]>,
    /// Triangles as vertex indices.
    pub faces: Vec<[u32; 3]>,
}

impl StandIn {
    /// Unit tetrahedron.
    pub fn tetrahedron() -> Self {
        Self {
            vertices: vec![
                [1.0, 1.0, 1.0],
                [1.0, -1.0, -1.0],
                [-1.0, 1.0, -1.0],
                [-1.0, -1.0, 1.0],
            ],
            faces: vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
        }
    }
}

/// One node of a scope's graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    /// Entry kind, or placeholder filter.
    pub kind: NodeKind,
    /// Editor name; may carry a duplicate disambiguator.
    pub display_name: String,
    /// Record name the node was imported or synthesized under. Taken
    /// verbatim while `display_name` still equals it, so a record that is
    /// really named `Fog.100` keeps its suffix.
    pub source_name: Option<String>,
    /// Properties keyed by adapter property name.
    pub properties: PropertyBag,
    /// Parent for pose composition.
    pub parent: Option<NodeId>,
    /// Stand-in geometry of a model placeholder.
    pub stand_in: Option<StandIn>,
}

impl GraphNode {
    /// Node with no properties and no parent.
    pub fn new(kind: NodeKind, display_name: impl Into<String>) -> Self {
        Self {
            kind,
            display_name: display_name.into(),
            source_name: None,
            properties: PropertyBag::new(),
            parent: None,
            stand_in: None,
        }
    }

    /// Name the node is exported and looked up under.
    ///
    /// The source name while the editor has not renamed the node; otherwise
    /// the display name without its duplicate disambiguator.
    pub fn record_name(&self) -> &str {
        match &self.source_name {
            Some(source) if *source == self.display_name => source,
            _ => strip_disambiguator(&self.display_name),
        }
    }

    /// Namespace of the node's name.
    pub const fn family(&self) -> EntryFamily {
        self.kind.family()
    }

    /// Returns `true` for synthesized placeholders.
    pub const fn is_placeholder(&self) -> bool {
        self.kind.is_placeholder()
    }

    /// Property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Local pose, if the node has one.
    pub fn pose(&self) -> Option<&Pose> {
        match self.properties.get(POSE_PROPERTY) {
            Some(PropertyValue::Pose(pose)) => Some(pose),
            _ => None,
        }
    }
}
