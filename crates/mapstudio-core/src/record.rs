// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Immutable external representation of one entry.
use std::collections::BTreeMap;

use crate::kind::EntryKind;
use crate::value::FieldValue;

/// One decoded entry: kind, name, and its field map.
///
/// Records are built once and never mutated; export always produces fresh
/// records. Fields are keyed by name in a `BTreeMap` so iteration order is
/// deterministic; the authoritative field order lives in the kind's schema.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Concrete kind.
    pub kind: EntryKind,
    /// Name, unique within the kind's family in one scope.
    pub name: String,
    /// Field name to raw value.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion; replaces an existing value.
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// Returns the raw value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }
}
