//! Live control values, the equivalent of what the document currently holds

use std::collections::HashMap;

use super::schema::{FieldKind, FormSchema};

/// Current value of one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Text and number inputs
    Text(String),
    /// Radio group: the checked option, if any
    Choice(Option<String>),
    /// Checkbox state
    Flag(bool),
}

impl FieldInput {
    /// Empty value for a control of the given kind
    pub fn empty_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Rating { .. } | FieldKind::Choice { .. } => FieldInput::Choice(None),
            FieldKind::Text { .. } | FieldKind::Number { .. } => FieldInput::Text(String::new()),
            FieldKind::Checkbox => FieldInput::Flag(false),
        }
    }

    /// Whether the control holds nothing once whitespace is ignored
    pub fn is_blank(&self) -> bool {
        match self {
            FieldInput::Text(value) => value.trim().is_empty(),
            FieldInput::Choice(choice) => choice.as_deref().map_or(true, |c| c.trim().is_empty()),
            FieldInput::Flag(checked) => !checked,
        }
    }

    /// Raw text of a text control
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldInput::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Checked option of a radio group
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            FieldInput::Choice(choice) => choice.as_deref(),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldInput::Flag(checked) => Some(*checked),
            _ => None,
        }
    }
}

/// All control values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInputs {
    values: HashMap<String, FieldInput>,
}

impl FieldInputs {
    /// Empty controls for every field in the schema
    pub fn from_schema(schema: &FormSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.name.clone(), FieldInput::empty_for(&f.kind)))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldInput> {
        self.values.get(name)
    }

    /// Replace a control value; returns false for unknown fields and for
    /// values of a different control type than the field holds
    pub fn set(&mut self, name: &str, value: FieldInput) -> bool {
        match self.values.get_mut(name) {
            Some(slot) if std::mem::discriminant(slot) == std::mem::discriminant(&value) => {
                *slot = value;
                true
            }
            Some(slot) => {
                tracing::warn!(field = name, current = ?slot, rejected = ?value, "Control type mismatch");
                false
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
