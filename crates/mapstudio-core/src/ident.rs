// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types for graph nodes and resolution scopes.
use core::fmt;

use blake3::Hasher;

/// Canonical 256-bit hash used to address scopes.
pub type Hash = [u8; 32];

/// Scope-local identifier for a graph node.
///
/// Ids are handed out monotonically by the owning scope and are never reused,
/// so a link to a deleted node stays a well-defined "missing" state instead of
/// silently aliasing a newer node.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Strongly typed identifier for a resolution scope (typically one map).
///
/// Produced by [`make_scope_id`]; two scopes with the same label share an id,
/// which is what lets a re-import of a map land in a recognisable namespace.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScopeId(pub Hash);

impl ScopeId {
    /// Returns the canonical byte representation of this id.
    #[must_use]
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// Short hex prefix for logs and diagnostics.
    #[must_use]
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_hex())
    }
}

/// Produces a stable, domain‑separated scope identifier (prefix `b"scope:"`) using BLAKE3.
pub fn make_scope_id(label: &str) -> ScopeId {
    let mut hasher = Hasher::new();
    hasher.update(b"scope:");
    hasher.update(label.as_bytes());
    ScopeId(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_ids_are_label_stable() {
        assert_eq!(make_scope_id("m10_00_00_00"), make_scope_id("m10_00_00_00"));
        assert_ne!(make_scope_id("m10_00_00_00"), make_scope_id("m10_01_00_00"));
    }

    #[test]
    fn scope_id_is_domain_separated() {
        let raw: Hash = blake3::hash(b"m10_00_00_00").into();
        assert_ne!(make_scope_id("m10_00_00_00").0, raw);
    }

    #[test]
    fn node_id_display_is_hash_prefixed() {
        assert_eq!(NodeId(7).to_string(), "#7");
    }
}
