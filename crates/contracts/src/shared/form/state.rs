//! Form state: the single source of truth for field values and the phase
//!
//! Values change field by field while editing. The phase is switched only by
//! the transition controller, which guarantees that `Phase::Review` is reached
//! with a value set the validator accepted.

use super::schema::FormSchema;
use super::validator::FieldLookup;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Step of the two-phase form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Editing,
    Review,
}

impl Phase {
    /// Labels of the stepper, indexed by `step_index`
    pub const STEPS: [&'static str; 2] = ["Fill form", "Check form"];

    pub fn step_index(&self) -> usize {
        match self {
            Self::Editing => 0,
            Self::Review => 1,
        }
    }
}

/// What happened to a `set_field` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Value was written
    Applied,
    /// Value equals the current one
    Unchanged,
    /// Keystroke rejected by the field's input filter; value kept
    Filtered,
    /// Form is in review; value kept
    Locked,
    /// No such field in the schema
    UnknownField,
}

impl FieldUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Read-only copy of the values, in schema order.
/// Serializes to a flat JSON object keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    entries: Vec<(&'static str, String)>,
}

impl FormSnapshot {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every value is the empty string
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|(_, value)| value.is_empty())
    }
}

impl FieldLookup for FormSnapshot {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Current values and phase of one form session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    schema: &'static FormSchema,
    values: Vec<String>,
    phase: Phase,
}

impl FormState {
    /// Blank form in the editing phase
    pub fn new(schema: &'static FormSchema) -> Self {
        Self {
            schema,
            values: vec![String::new(); schema.len()],
            phase: Phase::Editing,
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.schema
            .index_of(name)
            .map(|idx| self.values[idx].as_str())
    }

    /// Write one raw value.
    ///
    /// Refused while in review (the render layer disables inputs too, but the
    /// state does not rely on it) and when the field's input filter rejects
    /// the keystroke. A refused write leaves the value untouched.
    pub fn set_field(&mut self, name: &str, raw: &str) -> FieldUpdate {
        if self.phase == Phase::Review {
            log::debug!("{}: write to `{}` refused in review", self.schema.name, name);
            return FieldUpdate::Locked;
        }

        let Some(idx) = self.schema.index_of(name) else {
            log::warn!("{}: unknown field `{}`", self.schema.name, name);
            return FieldUpdate::UnknownField;
        };

        if !self.schema.fields[idx].filter.accepts(raw) {
            return FieldUpdate::Filtered;
        }

        if self.values[idx] == raw {
            return FieldUpdate::Unchanged;
        }

        self.values[idx] = raw.to_string();
        FieldUpdate::Applied
    }

    /// Blank every value and return to editing
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(String::clear);
        self.phase = Phase::Editing;
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            entries: self
                .schema
                .names()
                .zip(self.values.iter().cloned())
                .collect(),
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

impl FieldLookup for FormState {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.value(name)
    }
}
