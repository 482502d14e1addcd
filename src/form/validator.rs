//! Per-field and per-section validation

use serde::{Deserialize, Serialize};

use super::inputs::{FieldInput, FieldInputs};
use super::schema::{FieldKind, FieldSpec, FormSchema};
use super::section::Section;

/// Visual validity class applied to a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMark {
    Valid,
    Invalid,
    /// Neither class (empty control)
    Clear,
}

/// When a check runs, which decides how blank required fields are marked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Typing, blur and star changes
    Live,
    /// Gate before leaving a section or submitting
    Section,
}

/// Result of validating one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck {
    pub valid: bool,
    pub mark: FieldMark,
}

/// Pure validity of a control against its constraints
pub fn check_field(spec: &FieldSpec, input: &FieldInput) -> bool {
    if input.is_blank() {
        return !spec.required;
    }

    match (&spec.kind, input) {
        (FieldKind::Rating { min, max }, FieldInput::Choice(Some(value))) => {
            within(value, i64::from(*min), i64::from(*max))
        }
        (FieldKind::Choice { options }, FieldInput::Choice(Some(value))) => options.contains(value),
        (FieldKind::Number { min, max }, FieldInput::Text(value)) => within(value, *min, *max),
        (FieldKind::Text { max_length }, FieldInput::Text(value)) => {
            let length = value.trim().chars().count();
            match max_length {
                Some(max) => length > 0 && length <= *max,
                None => length > 0,
            }
        }
        (FieldKind::Checkbox, FieldInput::Flag(checked)) => *checked,
        _ => false,
    }
}

fn within(value: &str, min: i64, max: i64) -> bool {
    value
        .trim()
        .parse::<i64>()
        .map(|n| n >= min && n <= max)
        .unwrap_or(false)
}

/// Validate a field and decide its visual mark
pub fn validate_field(spec: &FieldSpec, input: &FieldInput, mode: ValidationMode) -> FieldCheck {
    let valid = check_field(spec, input);
    let mark = if input.is_blank() {
        if spec.required && mode == ValidationMode::Section {
            FieldMark::Invalid
        } else {
            FieldMark::Clear
        }
    } else if valid {
        FieldMark::Valid
    } else {
        FieldMark::Invalid
    };
    FieldCheck { valid, mark }
}

/// Outcome of gating a section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionCheck {
    /// Marks for every required field of the section, in order
    pub marks: Vec<(String, FieldMark)>,
    /// Names of the required fields that failed, in order
    pub invalid: Vec<String>,
}

impl SectionCheck {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// First failing field, the scroll target
    pub fn first_invalid(&self) -> Option<&str> {
        self.invalid.first().map(String::as_str)
    }
}

/// AND of field validation across the section's required fields
pub fn validate_section(schema: &FormSchema, inputs: &FieldInputs, section: Section) -> SectionCheck {
    let mut check = SectionCheck::default();
    for spec in schema.required_fields(section) {
        let Some(input) = inputs.get(&spec.name) else {
            check.invalid.push(spec.name.clone());
            check.marks.push((spec.name.clone(), FieldMark::Invalid));
            continue;
        };
        let result = validate_field(spec, input, ValidationMode::Section);
        if !result.valid {
            check.invalid.push(spec.name.clone());
        }
        check.marks.push((spec.name.clone(), result.mark));
    }
    check
}
