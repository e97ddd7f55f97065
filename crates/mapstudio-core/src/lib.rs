// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! mapstudio-core: map entry-graph transcoding with two-phase reference
//! resolution.
//!
//! A map is a flat set of named [`Record`]s (parts, regions, events and
//! models). Editing happens on a graph of [`GraphNode`]s held by an
//! [`EntryHost`], where name references become node links. Import builds
//! every node before binding any link and synthesizes placeholders for
//! missing referents. Export writes every record before naming any referent
//! and refuses to emit a scope with a dangling, ambiguous or wrong-kind
//! reference.
//!
//! Per-kind behavior lives in data: an [`EntryTypeDescriptor`] composes field
//! adapters, and the [`DescriptorRegistry`] checks every descriptor against
//! its [`RecordSchema`] when it is built.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

/// Field adapters: per-field conversion between records and nodes.
pub mod adapter;
mod bitset;
/// Built-in entry type descriptors.
pub mod catalog;
mod config;
/// Coordinate and unit conversion between record and host conventions.
pub mod coords;
mod descriptor;
mod diagnostic;
mod error;
mod host;
mod ident;
mod kind;
/// Pose composition and decomposition.
pub mod math;
mod name;
mod node;
mod parallel;
mod record;
mod registry;
mod schema;
mod scope;
/// Two-phase import and export sessions.
pub mod session;
mod value;

/// Group bit sets.
pub use bitset::{FlagOutOfRange, GroupBitSet};
/// Session configuration.
pub use config::{PoseSpace, TranscodeConfig};
/// Descriptors and node property bags.
pub use descriptor::{EntryTypeDescriptor, PropertyBag};
/// Import diagnostics.
pub use diagnostic::{Diagnostic, Severity};
/// Error taxonomy.
pub use error::{
    AmbiguousNameError, ExportFailure, FieldError, HostError, MissingReason,
    MissingReferenceError, PropertyMismatchError, RegistryError, SchemaMismatchError,
    ScopeFatalError,
};
/// Host graph port and entry helpers.
pub use host::{create_entry, insert_entry, materialize_placeholder, world_pose, EntryHost};
/// Identifiers.
pub use ident::{make_scope_id, Hash, NodeId, ScopeId};
/// Entry kinds and reference filters.
pub use kind::{
    EntryFamily, EntryKind, EventType, KindFilter, ModelType, NodeKind, PartType, RegionType,
};
/// Naming rules.
pub use name::{strip_disambiguator, StemRule};
/// Graph nodes.
pub use node::{GraphNode, StandIn, POSE_PROPERTY};
/// Multi-scope import.
pub use parallel::{import_scopes, ScopeBatch};
/// Records.
pub use record::Record;
/// Descriptor registry.
pub use registry::DescriptorRegistry;
/// Record schemas.
pub use schema::{schema_for, FieldSpec, FieldType, RecordSchema, GROUP_WORDS};
/// In-memory scope.
pub use scope::Scope;
/// Session entry points.
pub use session::{export_scope, import_scope, ImportOutcome, ImportStats};
/// Record and node values.
pub use value::{FieldValue, Pose, PropertyValue, SlotLink};
