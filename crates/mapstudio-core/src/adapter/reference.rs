// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reference adapters and the model identity strategy.
//!
//! A reference adapter never resolves anything by itself: it reads slot names
//! out of a record and writes slot names into one. Binding names to nodes is
//! deferred to the session's linking phase, once every referent exists.
use crate::error::FieldError;
use crate::kind::{EntryKind, KindFilter, ModelType};
use crate::name::StemRule;
use crate::record::Record;
use crate::schema::FieldType;
use crate::value::{FieldValue, PropertyValue, SlotLink};

/// Number of slots a reference holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// One slot, stored as a `Name`.
    Single,
    /// Fixed-size array of slots, stored as `Names`.
    Array(usize),
}

impl Arity {
    /// Slot count.
    pub const fn len(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Array(n) => n,
        }
    }

    /// Slot index reported in diagnostics (`None` for single references).
    pub const fn slot_label(self, slot: usize) -> Option<usize> {
        match self {
            Self::Single => None,
            Self::Array(_) => Some(slot),
        }
    }
}

/// Maps a by-name record reference to by-link node slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceAdapter {
    /// Record field name.
    pub record_field: &'static str,
    /// Node property name.
    pub property: &'static str,
    /// Accepted referent kinds.
    pub target: KindFilter,
    /// Slot count.
    pub arity: Arity,
    /// Canonical-name rule for empty slots (model references only).
    pub stem: Option<StemRule>,
}

impl ReferenceAdapter {
    /// Single-slot reference.
    pub const fn single(record_field: &'static str, property: &'static str, target: KindFilter) -> Self {
        Self {
            record_field,
            property,
            target,
            arity: Arity::Single,
            stem: None,
        }
    }

    /// Fixed-size reference array.
    pub const fn array(
        record_field: &'static str,
        property: &'static str,
        target: KindFilter,
        len: usize,
    ) -> Self {
        Self {
            record_field,
            property,
            target,
            arity: Arity::Array(len),
            stem: None,
        }
    }

    /// Record-side type.
    pub const fn field_type(&self) -> FieldType {
        match self.arity {
            Arity::Single => FieldType::Name,
            Arity::Array(n) => FieldType::Names(n),
        }
    }

    /// Node value with every slot empty; written during the creating phase.
    pub fn empty_value(&self) -> PropertyValue {
        self.value_from_slots(vec![SlotLink::Empty; self.arity.len()])
    }

    /// Wraps resolved slots in the property shape of this adapter.
    pub fn value_from_slots(&self, mut slots: Vec<SlotLink>) -> PropertyValue {
        match self.arity {
            Arity::Single => PropertyValue::Link(slots.pop().unwrap_or_default()),
            Arity::Array(_) => PropertyValue::Links(slots),
        }
    }

    /// Slot names in `record`; the empty string marks an empty slot.
    pub fn read_names(&self, record: &Record) -> Result<Vec<String>, FieldError> {
        match (self.arity, record.get(self.record_field)) {
            (Arity::Single, Some(FieldValue::Name(name))) => Ok(vec![name.clone()]),
            (Arity::Array(n), Some(FieldValue::Names(names))) if names.len() == n => {
                Ok(names.clone())
            }
            (_, Some(other)) => Err(FieldError::decode(
                self.record_field,
                format!("expected {:?}, found {}", self.field_type(), other.type_name()),
            )),
            (_, None) => Err(FieldError::decode(self.record_field, "field is missing")),
        }
    }

    /// Writes resolved slot names into `out`.
    pub fn write_names(&self, mut names: Vec<String>, out: &mut Record) {
        let value = match self.arity {
            Arity::Single => FieldValue::Name(names.pop().unwrap_or_default()),
            Arity::Array(_) => FieldValue::Names(names),
        };
        out.fields.insert(self.record_field.to_owned(), value);
    }
}

/// How a part finds its model: a model reference whose empty slot falls back
/// to a name stemmed from the part's own record name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelStrategy {
    /// Model subtype the part instantiates.
    pub model_type: ModelType,
    /// Stemming rule for the canonical model name.
    pub stem: StemRule,
}

impl ModelStrategy {
    /// Strategy for `model_type` with the given stem rule.
    pub const fn new(model_type: ModelType, stem: StemRule) -> Self {
        Self { model_type, stem }
    }

    /// The `model_name` reference this strategy contributes.
    pub const fn adapter(&self) -> ReferenceAdapter {
        ReferenceAdapter {
            record_field: "model_name",
            property: "model",
            target: KindFilter::Exact(EntryKind::Model(self.model_type)),
            arity: Arity::Single,
            stem: Some(self.stem),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kind::{EntryFamily, EventType, PartType};

    #[test]
    fn array_reads_every_slot_including_empty() {
        let adapter = ReferenceAdapter::array(
            "spawn_region_names",
            "spawn_regions",
            KindFilter::Family(EntryFamily::Region),
            4,
        );
        let names = vec!["a".to_owned(), String::new(), "b".to_owned(), String::new()];
        let record = Record::new(EntryKind::Event(EventType::Spawner), "sp")
            .with("spawn_region_names", FieldValue::Names(names.clone()));
        assert_eq!(adapter.read_names(&record).unwrap(), names);
    }

    #[test]
    fn array_rejects_wrong_length() {
        let adapter = ReferenceAdapter::array(
            "spawn_region_names",
            "spawn_regions",
            KindFilter::Family(EntryFamily::Region),
            4,
        );
        let record = Record::new(EntryKind::Event(EventType::Spawner), "sp")
            .with("spawn_region_names", FieldValue::Names(vec![String::new()]));
        assert!(adapter.read_names(&record).is_err());
    }

    #[test]
    fn single_round_trips_name() {
        let adapter = ReferenceAdapter::single(
            "collision_name",
            "collision",
            KindFilter::Exact(EntryKind::Part(PartType::Collision)),
        );
        let mut out = Record::new(EntryKind::Part(PartType::ConnectCollision), "cc");
        adapter.write_names(vec!["h0001B0".into()], &mut out);
        assert_eq!(adapter.read_names(&out).unwrap(), vec!["h0001B0".to_owned()]);
        assert_eq!(adapter.empty_value(), PropertyValue::Link(SlotLink::Empty));
    }

    #[test]
    fn model_strategy_targets_exact_model_kind() {
        let adapter = ModelStrategy::new(ModelType::Collision, StemRule::BeforeSeparator('_')).adapter();
        assert_eq!(adapter.record_field, "model_name");
        assert!(adapter.target.admits(EntryKind::Model(ModelType::Collision)));
        assert!(!adapter.target.admits(EntryKind::Model(ModelType::MapPiece)));
    }
}
