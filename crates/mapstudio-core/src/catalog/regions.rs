// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Region descriptors.
use crate::adapter::{Adapter, FieldAdapter, TransformAdapter};
use crate::descriptor::EntryTypeDescriptor;
use crate::kind::{EntryKind, RegionType};
use crate::schema::FieldType;

fn floats(names: &[&'static str]) -> Vec<Adapter> {
    names
        .iter()
        .map(|&name| FieldAdapter::same(name, FieldType::Float).into())
        .collect()
}

/// Descriptor of a region shape. Regions carry no scale.
pub fn descriptor(shape: RegionType) -> EntryTypeDescriptor {
    let base = vec![
        TransformAdapter::unscaled().into(),
        FieldAdapter::same("entity_id", FieldType::Int).into(),
    ];
    let subtype = match shape {
        RegionType::Point => Vec::new(),
        RegionType::Sphere => floats(&["radius"]),
        RegionType::Cylinder => floats(&["radius", "height"]),
        RegionType::Box => floats(&["width", "depth", "height"]),
    };
    EntryTypeDescriptor::new(EntryKind::Region(shape), base, subtype, None)
}
