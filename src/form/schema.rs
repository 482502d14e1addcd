//! Field and section definitions for the feedback form.
//!
//! The schema plays the role of the markup: it names every control, the
//! section it lives in, and the constraint attributes validation reads.

use serde::{Deserialize, Serialize};

use super::section::Section;

/// Lowest star value when a rating group declares no `min`
pub const DEFAULT_RATING_MIN: u8 = 1;
/// Highest star value when a rating group declares no `max`
pub const DEFAULT_RATING_MAX: u8 = 5;

/// Kind of control backing a field, with its constraint attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Radio group rendered as stars
    Rating { min: u8, max: u8 },
    /// Plain radio group
    Choice { options: Vec<String> },
    /// Free text, optionally bounded by `max_length` characters
    Text { max_length: Option<usize> },
    /// Integer input bounded by `min`/`max`
    Number { min: i64, max: i64 },
    /// Single checkbox, saved as a boolean
    Checkbox,
}

impl FieldKind {
    /// Rating group with the default 1..=5 range
    pub fn stars() -> Self {
        FieldKind::Rating {
            min: DEFAULT_RATING_MIN,
            max: DEFAULT_RATING_MAX,
        }
    }

    /// Radio-backed kinds (rating or choice)
    pub fn is_radio_group(&self) -> bool {
        matches!(self, FieldKind::Rating { .. } | FieldKind::Choice { .. })
    }

    /// Maximum length for text fields that declare one
    pub fn max_length(&self) -> Option<usize> {
        match self {
            FieldKind::Text { max_length } => *max_length,
            _ => None,
        }
    }
}

/// A single named control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// FormState key (the control's `name`)
    pub name: String,
    /// Human-readable label
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    pub section: Section,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind, section: Section) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            section,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered collection of fields grouped by section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The session feedback form
    pub fn feedback() -> Self {
        let ratings = Section::FIRST;
        let thoughts = Section::new(2);
        let review = Section::LAST;

        Self::new(vec![
            FieldSpec::new("content_quality", "Content Quality", FieldKind::stars(), ratings)
                .required(),
            FieldSpec::new(
                "clarity",
                "Clarity of Explanations",
                FieldKind::stars(),
                ratings,
            )
            .required(),
            FieldSpec::new("engagement", "Engagement Level", FieldKind::stars(), ratings)
                .required(),
            FieldSpec::new(
                "satisfaction",
                "Overall Satisfaction",
                FieldKind::stars(),
                ratings,
            )
            .required(),
            FieldSpec::new(
                "apply_likelihood",
                "Apply Likelihood",
                FieldKind::stars(),
                ratings,
            )
            .required(),
            FieldSpec::new(
                "most_valuable",
                "What did you find most valuable?",
                FieldKind::Text {
                    max_length: Some(2000),
                },
                thoughts,
            )
            .required(),
            FieldSpec::new(
                "improvements",
                "What could be improved?",
                FieldKind::Text {
                    max_length: Some(2000),
                },
                thoughts,
            )
            .required(),
            FieldSpec::new(
                "recommend",
                "Would you recommend this session to others?",
                FieldKind::Choice {
                    options: vec!["Yes".to_string(), "No".to_string(), "Maybe".to_string()],
                },
                thoughts,
            )
            .required(),
            FieldSpec::new(
                "follow_up",
                "I'm happy to be contacted about this feedback",
                FieldKind::Checkbox,
                thoughts,
            ),
            FieldSpec::new(
                "confirm_accurate",
                "I confirm this feedback reflects my experience",
                FieldKind::Checkbox,
                review,
            )
            .required(),
        ])
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields of one section, in declaration order
    pub fn section_fields(&self, section: Section) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.section == section)
    }

    /// Required fields of one section, in declaration order
    pub fn required_fields(&self, section: Section) -> impl Iterator<Item = &FieldSpec> {
        self.section_fields(section).filter(|f| f.required)
    }

    /// Text fields that carry a character counter
    pub fn counted_fields(&self) -> impl Iterator<Item = (&FieldSpec, usize)> {
        self.fields
            .iter()
            .filter_map(|f| f.kind.max_length().map(|max| (f, max)))
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::feedback()
    }
}

/// Display title for each section of the feedback form
pub fn section_title(section: Section) -> &'static str {
    match section.number() {
        1 => "Session Ratings",
        2 => "Your Thoughts",
        _ => "Review & Submit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_schema_sections() {
        let schema = FormSchema::feedback();
        assert_eq!(schema.section_fields(Section::FIRST).count(), 5);
        assert_eq!(schema.section_fields(Section::new(2)).count(), 4);
        assert_eq!(schema.section_fields(Section::LAST).count(), 1);
    }

    #[test]
    fn test_optional_checkbox_not_required() {
        let schema = FormSchema::feedback();
        let required: Vec<_> = schema
            .required_fields(Section::new(2))
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(required, vec!["most_valuable", "improvements", "recommend"]);
    }

    #[test]
    fn test_counted_fields_have_max_length() {
        let schema = FormSchema::feedback();
        let counted: Vec<_> = schema
            .counted_fields()
            .map(|(f, max)| (f.name.as_str(), max))
            .collect();
        assert_eq!(counted, vec![("most_valuable", 2000), ("improvements", 2000)]);
    }

    #[test]
    fn test_field_lookup() {
        let schema = FormSchema::feedback();
        assert!(schema.field("clarity").unwrap().kind.is_radio_group());
        assert!(schema.field("missing").is_none());
    }
}
