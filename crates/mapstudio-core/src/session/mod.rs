// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Transcoding sessions.
//!
//! Both directions run as two typestate phases: import is
//! [`ImportSession`] then [`ImportLinker`], export is [`ExportSession`] then
//! [`ExportLinker`]. The second phase of either only exists once the first
//! has finished for the whole scope.
mod export;
mod import;

pub use export::{ExportLinker, ExportSession};
pub use import::{ImportLinker, ImportOutcome, ImportSession, ImportStats};

use crate::config::TranscodeConfig;
use crate::error::ScopeFatalError;
use crate::record::Record;
use crate::registry::DescriptorRegistry;
use crate::scope::Scope;

/// Imports `records` into a fresh scope labelled `label`.
pub fn import_scope(
    registry: &DescriptorRegistry,
    config: &TranscodeConfig,
    label: &str,
    records: &[Record],
) -> (Scope, ImportOutcome) {
    let mut scope = Scope::new(label);
    let outcome = ImportSession::new(registry, config, &mut scope)
        .create(records)
        .link();
    (scope, outcome)
}

/// Exports every real entry of `scope`.
///
/// # Errors
/// [`ScopeFatalError`] with every failure found; no records are returned.
pub fn export_scope(
    registry: &DescriptorRegistry,
    config: &TranscodeConfig,
    scope: &Scope,
) -> Result<Vec<Record>, ScopeFatalError> {
    ExportSession::new(registry, config, scope).write().link()
}
