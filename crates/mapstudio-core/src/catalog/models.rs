// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Model descriptors.
use crate::adapter::FieldAdapter;
use crate::descriptor::EntryTypeDescriptor;
use crate::kind::{EntryKind, ModelType};
use crate::schema::FieldType;

/// Descriptor of a model type. Every model type shares one field layout.
pub fn descriptor(model: ModelType) -> EntryTypeDescriptor {
    EntryTypeDescriptor::new(
        EntryKind::Model(model),
        vec![FieldAdapter::same("sib_path", FieldType::Str).into()],
        Vec::new(),
        None,
    )
}
