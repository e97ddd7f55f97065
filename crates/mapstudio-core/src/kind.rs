// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closed set of entry kinds, kind filters, and node kinds.
//!
//! Dispatch over kinds is a tagged union: adding a kind is a deliberate change
//! to the record format, so there is no open registration of new kinds.
use core::fmt;

/// Entry family. Each family is its own name namespace within a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryFamily {
    /// Structural scene parts (geometry instances, collisions, characters).
    Part,
    /// Spatial regions (points and volumes).
    Region,
    /// Logic events.
    Event,
    /// Shared geometry data referenced by parts.
    Model,
}

impl EntryFamily {
    /// All families in canonical order.
    pub const ALL: [Self; 4] = [Self::Part, Self::Region, Self::Event, Self::Model];

    /// Human-readable family name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Part => "Part",
            Self::Region => "Region",
            Self::Event => "Event",
            Self::Model => "Model",
        }
    }

    /// Wire tag used by record codecs.
    pub const fn tag(self) -> u8 {
        match self {
            Self::Part => 0,
            Self::Region => 1,
            Self::Event => 2,
            Self::Model => 3,
        }
    }
}

impl fmt::Display for EntryFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! subtype_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All subtypes in canonical (wire tag) order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Subtype name as shown in diagnostics.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            /// Wire tag used by record codecs.
            pub const fn tag(self) -> u8 {
                match self {
                    $(Self::$variant => $tag),+
                }
            }

            /// Inverse of [`Self::tag`].
            pub fn from_tag(tag: u8) -> Option<Self> {
                match tag {
                    $($tag => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

subtype_enum! {
    /// Concrete part subtypes.
    PartType {
        /// Static map geometry.
        MapPiece = 0,
        /// Interactive object.
        Object = 2,
        /// Character (enemy/NPC).
        Character = 4,
        /// Player spawn location.
        PlayerStart = 6,
        /// Collision (hit) mesh.
        Collision = 7,
        /// Navigation mesh.
        Navmesh = 8,
        /// Collision that loads an adjacent map.
        ConnectCollision = 11,
    }
}

subtype_enum! {
    /// Concrete region shapes.
    RegionType {
        /// Dimensionless point.
        Point = 0,
        /// Sphere volume.
        Sphere = 2,
        /// Vertical cylinder volume.
        Cylinder = 3,
        /// Box volume.
        Box = 5,
    }
}

subtype_enum! {
    /// Concrete event subtypes.
    EventType {
        /// Positional sound emitter.
        Sound = 1,
        /// Visual effect emitter.
        Sfx = 2,
        /// Item pickup.
        Treasure = 4,
        /// Character spawner.
        Spawner = 5,
        /// Object action (doors, levers).
        ObjAct = 7,
        /// Navmesh event region.
        Navigation = 10,
        /// Environment (fog/light) parameters.
        Environment = 11,
        /// Global map offset.
        MapOffset = 12,
    }
}

subtype_enum! {
    /// Concrete model subtypes.
    ModelType {
        /// Map piece geometry.
        MapPiece = 0,
        /// Object geometry.
        Object = 1,
        /// Character geometry.
        Character = 2,
        /// Player geometry.
        Player = 4,
        /// Collision geometry.
        Collision = 5,
        /// Navmesh geometry.
        Navmesh = 6,
    }
}

/// Concrete entry kind: a family plus its subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKind {
    /// A part.
    Part(PartType),
    /// A region.
    Region(RegionType),
    /// An event.
    Event(EventType),
    /// A model.
    Model(ModelType),
}

impl EntryKind {
    /// Family (name namespace) of this kind.
    pub const fn family(self) -> EntryFamily {
        match self {
            Self::Part(_) => EntryFamily::Part,
            Self::Region(_) => EntryFamily::Region,
            Self::Event(_) => EntryFamily::Event,
            Self::Model(_) => EntryFamily::Model,
        }
    }

    /// Subtype name without the family prefix.
    pub const fn subtype_name(self) -> &'static str {
        match self {
            Self::Part(t) => t.name(),
            Self::Region(t) => t.name(),
            Self::Event(t) => t.name(),
            Self::Model(t) => t.name(),
        }
    }

    /// Subtype wire tag.
    pub const fn subtype_tag(self) -> u8 {
        match self {
            Self::Part(t) => t.tag(),
            Self::Region(t) => t.tag(),
            Self::Event(t) => t.tag(),
            Self::Model(t) => t.tag(),
        }
    }

    /// Rebuilds a kind from its `(family, subtype)` wire tags.
    pub fn from_tags(family: u8, subtype: u8) -> Option<Self> {
        match family {
            0 => PartType::from_tag(subtype).map(Self::Part),
            1 => RegionType::from_tag(subtype).map(Self::Region),
            2 => EventType::from_tag(subtype).map(Self::Event),
            3 => ModelType::from_tag(subtype).map(Self::Model),
            _ => None,
        }
    }

    /// Every concrete kind, family by family.
    pub fn all() -> impl Iterator<Item = Self> {
        PartType::ALL
            .iter()
            .map(|t| Self::Part(*t))
            .chain(RegionType::ALL.iter().map(|t| Self::Region(*t)))
            .chain(EventType::ALL.iter().map(|t| Self::Event(*t)))
            .chain(ModelType::ALL.iter().map(|t| Self::Model(*t)))
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family(), self.subtype_name())
    }
}

/// Target filter of a reference: a whole family, or one exact kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KindFilter {
    /// Any kind within the family.
    Family(EntryFamily),
    /// Exactly this kind.
    Exact(EntryKind),
}

impl KindFilter {
    /// Namespace the filter looks names up in.
    pub const fn family(self) -> EntryFamily {
        match self {
            Self::Family(family) => family,
            Self::Exact(kind) => kind.family(),
        }
    }

    /// Returns `true` if an entry of `kind` satisfies this filter.
    pub fn admits(self, kind: EntryKind) -> bool {
        match self {
            Self::Family(family) => kind.family() == family,
            Self::Exact(expected) => kind == expected,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Family(family) => write!(f, "{family}/*"),
            Self::Exact(kind) => write!(f, "{kind}"),
        }
    }
}

/// Kind of a graph node: a materialized entry, or a placeholder synthesized
/// for a missing referent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Real entry of a concrete kind.
    Entry(EntryKind),
    /// Placeholder carrying the filter it was synthesized for.
    Placeholder(KindFilter),
}

impl NodeKind {
    /// Namespace this node's name lives in.
    pub const fn family(self) -> EntryFamily {
        match self {
            Self::Entry(kind) => kind.family(),
            Self::Placeholder(filter) => filter.family(),
        }
    }

    /// Concrete kind, if materialized.
    pub const fn entry_kind(self) -> Option<EntryKind> {
        match self {
            Self::Entry(kind) => Some(kind),
            Self::Placeholder(_) => None,
        }
    }

    /// Returns `true` for placeholders.
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(kind) => write!(f, "{kind}"),
            Self::Placeholder(filter) => write!(f, "placeholder({filter})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_round_trip_for_every_kind() {
        for kind in EntryKind::all() {
            let back = EntryKind::from_tags(kind.family().tag(), kind.subtype_tag());
            assert_eq!(back, Some(kind));
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert_eq!(EntryKind::from_tags(9, 0), None);
        assert_eq!(EntryKind::from_tags(0, 1), None);
    }

    #[test]
    fn family_filter_admits_every_subtype() {
        let filter = KindFilter::Family(EntryFamily::Part);
        assert!(filter.admits(EntryKind::Part(PartType::Collision)));
        assert!(!filter.admits(EntryKind::Region(RegionType::Point)));
    }

    #[test]
    fn exact_filter_rejects_sibling_subtypes() {
        let filter = KindFilter::Exact(EntryKind::Event(EventType::Environment));
        assert!(filter.admits(EntryKind::Event(EventType::Environment)));
        assert!(!filter.admits(EntryKind::Event(EventType::Sound)));
        assert_eq!(filter.family(), EntryFamily::Event);
    }

    #[test]
    fn display_is_family_slash_subtype() {
        assert_eq!(
            EntryKind::Part(PartType::ConnectCollision).to_string(),
            "Part/ConnectCollision"
        );
        assert_eq!(
            NodeKind::Placeholder(KindFilter::Family(EntryFamily::Region)).to_string(),
            "placeholder(Region/*)"
        );
    }
}
