// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for field transcoding, reference resolution and export.
use core::fmt::Write as _;

use thiserror::Error;

use crate::ident::NodeId;
use crate::kind::{EntryFamily, EntryKind};

fn slot_suffix(slot: impl core::borrow::Borrow<Option<usize>>) -> String {
    slot.borrow().map_or_else(String::new, |i| format!("[{i}]"))
}

fn list(items: &[String]) -> String {
    items.join(", ")
}

fn bullets<T: core::fmt::Display>(items: &[T]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = write!(out, "\n  - {item}");
    }
    out
}

/// A single field could not be converted by its adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Record value did not fit the adapter's transform.
    #[error("cannot decode field `{field}`: {reason}")]
    Decode {
        /// Record field name.
        field: String,
        /// Human-readable cause.
        reason: String,
    },
    /// Node property did not fit the adapter's reverse transform.
    #[error("cannot encode property `{property}`: {reason}")]
    Encode {
        /// Node property name.
        property: String,
        /// Human-readable cause.
        reason: String,
    },
}

impl FieldError {
    /// Convenience constructor for [`FieldError::Decode`].
    pub fn decode(field: &str, reason: impl Into<String>) -> Self {
        Self::Decode {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`FieldError::Encode`].
    pub fn encode(property: &str, reason: impl Into<String>) -> Self {
        Self::Encode {
            property: property.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Why an export-time referent is not acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// The link points at a placeholder that was never materialized.
    Placeholder,
    /// The linked node has been deleted.
    Deleted,
    /// The referent's kind is outside the reference's filter.
    WrongKind,
    /// The referent produced no record in this export pass.
    NotExported,
    /// The slot holds a name that matches no entry in the scope.
    Unresolved,
}

impl core::fmt::Display for MissingReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Placeholder => "is still a placeholder",
            Self::Deleted => "has been deleted",
            Self::WrongKind => "has the wrong kind",
            Self::NotExported => "was not exported",
            Self::Unresolved => "does not exist in this scope",
        })
    }
}

/// A reference cannot be written because its referent is not a valid record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{referrer}`.{field}{}: referent `{target}` {reason}", slot_suffix(.slot))]
pub struct MissingReferenceError {
    /// Record name of the referring entry.
    pub referrer: String,
    /// Record field of the reference.
    pub field: String,
    /// Slot index for array references.
    pub slot: Option<usize>,
    /// Display name (or node id) of the referent.
    pub target: String,
    /// What is wrong with the referent.
    pub reason: MissingReason,
}

/// More than one entry in scope answers to a referenced name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{count} {family} entries are named `{name}`")]
pub struct AmbiguousNameError {
    /// Namespace searched.
    pub family: EntryFamily,
    /// Name looked up.
    pub name: String,
    /// Number of candidates found.
    pub count: usize,
}

/// An entry type descriptor does not cover its kind's record schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "descriptor for {kind} does not match its schema (missing: [{}], duplicated: [{}], unknown: [{}], mismatched: [{}])",
    list(.missing), list(.duplicated), list(.unknown), list(.mismatched)
)]
pub struct SchemaMismatchError {
    /// Kind whose descriptor is broken.
    pub kind: EntryKind,
    /// Schema fields no adapter maps.
    pub missing: Vec<String>,
    /// Fields mapped by more than one adapter.
    pub duplicated: Vec<String>,
    /// Adapter fields absent from the schema.
    pub unknown: Vec<String>,
    /// Fields whose adapter disagrees with the schema type or arity.
    pub mismatched: Vec<String>,
}

impl SchemaMismatchError {
    /// Returns `true` if no discrepancy was recorded.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
            && self.duplicated.is_empty()
            && self.unknown.is_empty()
            && self.mismatched.is_empty()
    }
}

/// A property bag does not satisfy the descriptor of its node's kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "properties for {kind} do not match its descriptor (missing: [{}], unknown: [{}], mismatched: [{}])",
    list(.missing), list(.unknown), list(.mismatched)
)]
pub struct PropertyMismatchError {
    /// Node kind.
    pub kind: EntryKind,
    /// Descriptor properties absent from the bag.
    pub missing: Vec<String>,
    /// Bag properties no adapter owns.
    pub unknown: Vec<String>,
    /// Properties of the wrong value type.
    pub mismatched: Vec<String>,
}

/// Failure of one host graph operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// No live node has this id.
    #[error("no node {0} in scope")]
    UnknownNode(NodeId),
    /// A by-name lookup matched more than one node.
    #[error(transparent)]
    Ambiguous(#[from] AmbiguousNameError),
    /// Properties do not satisfy the kind's descriptor.
    #[error(transparent)]
    Properties(#[from] PropertyMismatchError),
    /// The operation requires a placeholder node.
    #[error("node {0} is not a placeholder")]
    NotPlaceholder(NodeId),
    /// The requested kind is outside the placeholder's filter.
    #[error("node {node} cannot become {kind}")]
    KindRejected {
        /// Placeholder node.
        node: NodeId,
        /// Requested kind.
        kind: EntryKind,
    },
    /// No descriptor is registered for the kind.
    #[error("no descriptor registered for {0}")]
    NoDescriptor(EntryKind),
    /// Default properties could not be produced.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// Parenting would create a cycle.
    #[error("parenting {child} under {parent} would create a cycle")]
    ParentCycle {
        /// Node being re-parented.
        child: NodeId,
        /// Requested parent.
        parent: NodeId,
    },
}

/// One failure found during an export pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportFailure {
    /// A local field could not be written.
    #[error("`{referrer}`: {error}")]
    Field {
        /// Record name of the entry.
        referrer: String,
        /// Underlying field failure.
        error: FieldError,
    },
    /// A reference has no valid referent.
    #[error(transparent)]
    Missing(#[from] MissingReferenceError),
    /// An unresolved reference name matches several entries.
    #[error("`{referrer}`.{field}{}: {error}", slot_suffix(.slot))]
    Ambiguous {
        /// Record name of the referring entry.
        referrer: String,
        /// Record field of the reference.
        field: String,
        /// Slot index for array references.
        slot: Option<usize>,
        /// Underlying ambiguity.
        error: AmbiguousNameError,
    },
    /// Several exported entries share a record name within one family.
    #[error("{count} {family} entries would be exported as `{name}`")]
    DuplicateName {
        /// Namespace.
        family: EntryFamily,
        /// Shared record name.
        name: String,
        /// Number of entries sharing it.
        count: usize,
    },
    /// The node's kind has no registered descriptor.
    #[error("`{referrer}`: no descriptor registered for {kind}")]
    NoDescriptor {
        /// Record name of the entry.
        referrer: String,
        /// Unregistered kind.
        kind: EntryKind,
    },
}

/// Aggregated export failure: every problem found in the pass, not just the
/// first. No records are returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("export of scope `{scope}` failed with {} error(s):{}", .failures.len(), bullets(.failures))]
pub struct ScopeFatalError {
    /// Scope label.
    pub scope: String,
    /// Individual failures in discovery order.
    pub failures: Vec<ExportFailure>,
}

/// Descriptor registry construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two descriptors were registered for one kind.
    #[error("duplicate descriptor registration for {0}")]
    Duplicate(EntryKind),
    /// A descriptor does not cover its schema.
    #[error(transparent)]
    Schema(#[from] SchemaMismatchError),
}
