//! Collected form data

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::inputs::{FieldInput, FieldInputs};
use super::schema::{FieldKind, FormSchema};
use super::section::Section;

/// A saved field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, choices and ratings (ratings are numeric strings)
    Text(String),
    /// Checkboxes
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            FieldValue::Flag(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Flag(checked) => write!(f, "{}", checked),
        }
    }
}

/// Section cursor plus everything saved so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub current_section: Section,
    #[serde(default)]
    pub data: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.data.get(name)
    }

    /// Saved text for a field, treating empty strings as absent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(FieldValue::as_text)
            .filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.data.insert(name.into(), value);
    }

    /// Capture the controls of one section.
    ///
    /// Radio groups are only written when an option is checked, checkboxes
    /// are written as booleans, everything else as trimmed text.
    pub fn save_section(&mut self, schema: &FormSchema, inputs: &FieldInputs, section: Section) {
        for spec in schema.section_fields(section) {
            let Some(input) = inputs.get(&spec.name) else {
                continue;
            };
            match (&spec.kind, input) {
                (FieldKind::Rating { .. } | FieldKind::Choice { .. }, FieldInput::Choice(choice)) => {
                    if let Some(value) = choice {
                        self.set(spec.name.clone(), FieldValue::Text(value.clone()));
                    }
                }
                (FieldKind::Checkbox, FieldInput::Flag(checked)) => {
                    self.set(spec.name.clone(), FieldValue::Flag(*checked));
                }
                (FieldKind::Text { .. } | FieldKind::Number { .. }, FieldInput::Text(value)) => {
                    self.set(spec.name.clone(), FieldValue::Text(value.trim().to_string()));
                }
                (kind, input) => {
                    tracing::warn!(field = %spec.name, ?kind, ?input, "Control value does not match field kind");
                }
            }
        }
        tracing::debug!(section = %section, fields = self.data.len(), "Saved section data");
    }

    /// Multipart field list mirroring `data`, booleans in their string form
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        self.data
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }
}
