// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in descriptors for every entry kind.
pub mod events;
pub mod models;
pub mod parts;
pub mod regions;

use crate::descriptor::EntryTypeDescriptor;
use crate::kind::EntryKind;

/// Built-in descriptor of `kind`.
pub fn descriptor_for(kind: EntryKind) -> EntryTypeDescriptor {
    match kind {
        EntryKind::Part(t) => parts::descriptor(t),
        EntryKind::Region(t) => regions::descriptor(t),
        EntryKind::Event(t) => events::descriptor(t),
        EntryKind::Model(t) => models::descriptor(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema_for;

    #[test]
    fn every_builtin_descriptor_covers_its_schema() {
        for kind in EntryKind::all() {
            let descriptor = descriptor_for(kind);
            assert_eq!(descriptor.validate_against(&schema_for(kind)), Ok(()), "{kind}");
        }
    }

    #[test]
    fn every_builtin_descriptor_has_default_properties() {
        for kind in EntryKind::all() {
            let descriptor = descriptor_for(kind);
            let props = descriptor.default_properties("x");
            assert!(props.is_ok(), "{kind}: {props:?}");
        }
    }
}
