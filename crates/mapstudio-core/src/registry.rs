// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Registry mapping entry kinds to their descriptors.
use std::collections::BTreeMap;

use crate::catalog::descriptor_for;
use crate::descriptor::EntryTypeDescriptor;
use crate::error::RegistryError;
use crate::kind::EntryKind;
use crate::schema::schema_for;

/// Immutable-after-construction lookup of descriptors by kind.
///
/// Every descriptor is validated against its kind's schema on registration,
/// so a structurally broken descriptor is a startup failure. Sessions share a
/// registry by reference; it holds no mutable state.
#[derive(Clone, Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: BTreeMap<EntryKind, EntryTypeDescriptor>,
}

impl DescriptorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in descriptor of every kind.
    ///
    /// # Errors
    /// Propagates the first schema mismatch among the built-in descriptors.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for kind in EntryKind::all() {
            registry.register(descriptor_for(kind))?;
        }
        tracing::debug!(kinds = registry.descriptors.len(), "descriptor registry built");
        Ok(registry)
    }

    /// Validates and registers `descriptor`.
    ///
    /// # Errors
    /// [`RegistryError::Duplicate`] if the kind is already registered,
    /// [`RegistryError::Schema`] if the descriptor does not cover its schema.
    pub fn register(&mut self, descriptor: EntryTypeDescriptor) -> Result<(), RegistryError> {
        let kind = descriptor.kind();
        if self.descriptors.contains_key(&kind) {
            return Err(RegistryError::Duplicate(kind));
        }
        descriptor.validate_against(&schema_for(kind))?;
        self.descriptors.insert(kind, descriptor);
        Ok(())
    }

    /// Descriptor registered for `kind`.
    pub fn get(&self, kind: EntryKind) -> Option<&EntryTypeDescriptor> {
        self.descriptors.get(&kind)
    }

    /// Registered kinds in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = EntryKind> + '_ {
        self.descriptors.keys().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapter::FieldAdapter;
    use crate::kind::{ModelType, RegionType};
    use crate::schema::FieldType;

    #[test]
    fn standard_registers_every_kind() {
        let registry = DescriptorRegistry::standard().unwrap();
        assert_eq!(registry.kinds().count(), EntryKind::all().count());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = DescriptorRegistry::new();
        let kind = EntryKind::Model(ModelType::Object);
        registry.register(descriptor_for(kind)).unwrap();
        assert_eq!(
            registry.register(descriptor_for(kind)),
            Err(RegistryError::Duplicate(kind))
        );
    }

    #[test]
    fn incomplete_descriptor_is_rejected() {
        let kind = EntryKind::Region(RegionType::Point);
        let broken = EntryTypeDescriptor::new(
            kind,
            vec![FieldAdapter::same("entity_id", FieldType::Int).into()],
            Vec::new(),
            None,
        );
        let err = DescriptorRegistry::new().register(broken).unwrap_err();
        let RegistryError::Schema(mismatch) = err else {
            panic!("expected schema error, got {err:?}");
        };
        assert_eq!(mismatch.missing, vec!["translate".to_owned(), "rotate".to_owned()]);
    }
}
