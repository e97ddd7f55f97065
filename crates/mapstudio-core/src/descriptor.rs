// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entry type descriptors: per-kind composition of field adapters.
use std::collections::BTreeMap;

use crate::adapter::{Adapter, ModelStrategy, PropertyType, ReferenceAdapter};
use crate::error::{FieldError, PropertyMismatchError, SchemaMismatchError};
use crate::kind::EntryKind;
use crate::schema::{schema_for, RecordSchema};
use crate::value::PropertyValue;

/// Node property bag, keyed by property name.
pub type PropertyBag = BTreeMap<String, PropertyValue>;

/// Describes how one concrete kind maps between records and nodes.
///
/// Subtype adapters are concatenated after the family's base adapters; the
/// model reference, when present, comes first.
#[derive(Clone, Debug)]
pub struct EntryTypeDescriptor {
    kind: EntryKind,
    model: Option<ModelStrategy>,
    adapters: Vec<Adapter>,
    base_len: usize,
}

impl EntryTypeDescriptor {
    /// Composes a descriptor from base and subtype adapters.
    pub fn new(
        kind: EntryKind,
        base: Vec<Adapter>,
        subtype: Vec<Adapter>,
        model: Option<ModelStrategy>,
    ) -> Self {
        let mut adapters: Vec<Adapter> = model.iter().map(|m| m.adapter().into()).collect();
        adapters.extend(base);
        let base_len = adapters.len();
        adapters.extend(subtype);
        Self {
            kind,
            model,
            adapters,
            base_len,
        }
    }

    /// Kind described.
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Model strategy, for kinds that instantiate a model.
    pub const fn model(&self) -> Option<&ModelStrategy> {
        self.model.as_ref()
    }

    /// Every adapter: model reference, base, then subtype.
    pub fn adapters(&self) -> &[Adapter] {
        &self.adapters
    }

    /// Adapters contributed by the subtype.
    pub fn subtype_adapters(&self) -> &[Adapter] {
        &self.adapters[self.base_len..]
    }

    /// Reference adapters in declaration order, model reference included.
    pub fn reference_fields(&self) -> impl Iterator<Item = &ReferenceAdapter> + '_ {
        self.adapters.iter().filter_map(Adapter::as_reference)
    }

    /// Checks that the adapters map exactly the schema's field set.
    pub fn validate_against(&self, schema: &RecordSchema) -> Result<(), SchemaMismatchError> {
        let mut err = SchemaMismatchError {
            kind: self.kind,
            missing: Vec::new(),
            duplicated: Vec::new(),
            unknown: Vec::new(),
            mismatched: Vec::new(),
        };
        if schema.kind != self.kind {
            err.mismatched.push(format!("schema kind {}", schema.kind));
        }

        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        let mut properties: BTreeMap<&str, usize> = BTreeMap::new();
        for adapter in &self.adapters {
            *properties.entry(adapter.property()).or_default() += 1;
            if adapter.property_type() == PropertyType::Unmapped {
                err.mismatched.push(adapter.property().to_owned());
            }
            for (field, ty) in adapter.record_fields() {
                *seen.entry(field).or_default() += 1;
                match schema.field(field) {
                    None => err.unknown.push(field.to_owned()),
                    Some(spec) if spec.ty != ty => err.mismatched.push(field.to_owned()),
                    Some(_) => {}
                }
            }
        }
        err.duplicated.extend(
            seen.iter()
                .filter(|(_, n)| **n > 1)
                .map(|(f, _)| (*f).to_owned()),
        );
        err.duplicated.extend(
            properties
                .iter()
                .filter(|(_, n)| **n > 1)
                .map(|(p, _)| format!("property {p}")),
        );
        err.missing.extend(
            schema
                .fields
                .iter()
                .filter(|spec| !seen.contains_key(spec.name))
                .map(|spec| spec.name.to_owned()),
        );

        if err.is_empty() {
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Checks that `properties` holds exactly this descriptor's properties
    /// with the declared types.
    pub fn validate_properties(&self, properties: &PropertyBag) -> Result<(), PropertyMismatchError> {
        let mut err = PropertyMismatchError {
            kind: self.kind,
            missing: Vec::new(),
            unknown: Vec::new(),
            mismatched: Vec::new(),
        };
        for adapter in &self.adapters {
            match properties.get(adapter.property()) {
                None => err.missing.push(adapter.property().to_owned()),
                Some(value) if !adapter.property_type().admits(value) => {
                    err.mismatched.push(adapter.property().to_owned());
                }
                Some(_) => {}
            }
        }
        err.unknown.extend(
            properties
                .keys()
                .filter(|k| !self.adapters.iter().any(|a| a.property() == k.as_str()))
                .cloned(),
        );
        if err.missing.is_empty() && err.unknown.is_empty() && err.mismatched.is_empty() {
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Properties of a freshly created entry: schema defaults, empty slots.
    pub fn default_properties(&self, name: &str) -> Result<PropertyBag, FieldError> {
        let record = schema_for(self.kind).default_record(name);
        self.adapters
            .iter()
            .map(|a| Ok((a.property().to_owned(), a.to_node(&record)?)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapter::{FieldAdapter, TransformAdapter};
    use crate::kind::RegionType;
    use crate::schema::FieldType;

    fn sphere(extra: Vec<Adapter>) -> EntryTypeDescriptor {
        EntryTypeDescriptor::new(
            EntryKind::Region(RegionType::Sphere),
            vec![
                TransformAdapter::unscaled().into(),
                FieldAdapter::same("entity_id", FieldType::Int).into(),
            ],
            extra,
            None,
        )
    }

    #[test]
    fn complete_descriptor_validates() {
        let d = sphere(vec![FieldAdapter::same("radius", FieldType::Float).into()]);
        let schema = schema_for(d.kind());
        assert_eq!(d.validate_against(&schema), Ok(()));
        assert_eq!(d.subtype_adapters().len(), 1);
    }

    #[test]
    fn missing_and_duplicated_fields_are_reported_together() {
        let d = sphere(vec![
            FieldAdapter::same("entity_id", FieldType::Int).into(),
            FieldAdapter::same("diameter", FieldType::Float).into(),
        ]);
        let err = d.validate_against(&schema_for(d.kind())).unwrap_err();
        assert_eq!(err.missing, vec!["radius".to_owned()]);
        assert!(err.duplicated.contains(&"entity_id".to_owned()));
        assert_eq!(err.unknown, vec!["diameter".to_owned()]);
    }

    #[test]
    fn type_disagreement_is_mismatched() {
        let d = sphere(vec![FieldAdapter::same("radius", FieldType::Int).into()]);
        let err = d.validate_against(&schema_for(d.kind())).unwrap_err();
        assert_eq!(err.mismatched, vec!["radius".to_owned()]);
    }

    #[test]
    fn default_properties_satisfy_validation() {
        let d = sphere(vec![FieldAdapter::same("radius", FieldType::Float).into()]);
        let props = d.default_properties("r").unwrap();
        assert_eq!(d.validate_properties(&props), Ok(()));

        let mut broken = props;
        broken.insert("radius".into(), PropertyValue::Int(1));
        broken.insert("colour".into(), PropertyValue::Int(1));
        let err = d.validate_properties(&broken).unwrap_err();
        assert_eq!(err.mismatched, vec!["radius".to_owned()]);
        assert_eq!(err.unknown, vec!["colour".to_owned()]);
    }
}
