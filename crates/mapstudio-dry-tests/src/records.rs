// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Schema-complete record builders.

use mapstudio_core::{
    schema_for, EntryKind, EventType, FieldValue, ModelType, PartType, Record, RegionType,
};

/// Builds a record starting from every schema field at its default.
///
/// # Example
///
/// ```
/// use mapstudio_core::{EntryKind, EventType, FieldValue};
/// use mapstudio_dry_tests::RecordBuilder;
///
/// let record = RecordBuilder::new(EntryKind::Event(EventType::Sound), "Bell")
///     .int("sound_id", 42)
///     .build();
/// assert_eq!(record.get("sound_id"), Some(&FieldValue::Int(42)));
/// assert_eq!(record.get("attached_part_name"), Some(&FieldValue::Name(String::new())));
/// ```
#[derive(Clone, Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Record of `kind` named `name` with default field values.
    pub fn new(kind: EntryKind, name: &str) -> Self {
        Self {
            record: schema_for(kind).default_record(name),
        }
    }

    /// Overwrite any field.
    pub fn set(mut self, field: &str, value: FieldValue) -> Self {
        self.record.fields.insert(field.to_owned(), value);
        self
    }

    /// Integer field.
    pub fn int(self, field: &str, value: i64) -> Self {
        self.set(field, FieldValue::Int(value))
    }

    /// Float field.
    pub fn float(self, field: &str, value: f32) -> Self {
        self.set(field, FieldValue::Float(value))
    }

    /// Vector field.
    pub fn vec3(self, field: &str, value: [f32; 3]) -> Self {
        self.set(field, FieldValue::Vec3(value))
    }

    /// Single reference field.
    pub fn name_ref(self, field: &str, target: &str) -> Self {
        self.set(field, FieldValue::Name(target.to_owned()))
    }

    /// Array reference field of `len` slots; `slots` fills the front, the
    /// rest stay empty.
    pub fn names(self, field: &str, len: usize, slots: &[&str]) -> Self {
        let mut names: Vec<String> = slots.iter().map(|s| (*s).to_owned()).collect();
        names.resize(len, String::new());
        self.set(field, FieldValue::Names(names))
    }

    /// Bit-group field from set flags. Flags past `words` are dropped.
    pub fn mask(self, field: &str, words: usize, flags: &[u32]) -> Self {
        let mut mask = vec![0_u32; words];
        for &flag in flags {
            let Ok(index) = usize::try_from(flag / 32) else {
                continue;
            };
            if let Some(word) = mask.get_mut(index) {
                *word |= 1 << (flag % 32);
            }
        }
        self.set(field, FieldValue::Mask(mask))
    }

    /// Finished record.
    pub fn build(self) -> Record {
        self.record
    }
}

/// Part builder with `model_name` already set.
pub fn part(part: PartType, name: &str, model: &str) -> RecordBuilder {
    RecordBuilder::new(EntryKind::Part(part), name).name_ref("model_name", model)
}

/// Region builder.
pub fn region(region: RegionType, name: &str) -> RecordBuilder {
    RecordBuilder::new(EntryKind::Region(region), name)
}

/// Event builder.
pub fn event(event: EventType, name: &str) -> RecordBuilder {
    RecordBuilder::new(EntryKind::Event(event), name)
}

/// Model record.
pub fn model(model: ModelType, name: &str) -> Record {
    RecordBuilder::new(EntryKind::Model(model), name)
        .set("sib_path", FieldValue::Str(format!("N:\\model\\{name}.sib")))
        .build()
}
