//! Review summary built from collected form data.
//!
//! `summarize` is a pure function of [`FormState`]; the controller calls it
//! whenever the saved data changes and the surface renders the result.

use serde::Serialize;
use std::fmt;

use super::rating::{highlight, parse_rating};
use super::state::FormState;

/// Characters of free text shown before truncation
pub const REVIEW_TEXT_LIMIT: usize = 100;
/// Stars drawn per rating row
pub const REVIEW_STARS: u8 = 5;

pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

/// Rating fields in display order
pub const RATING_FIELDS: &[(&str, &str)] = &[
    ("content_quality", "Content Quality"),
    ("clarity", "Clarity of Explanations"),
    ("engagement", "Engagement Level"),
    ("satisfaction", "Overall Satisfaction"),
    ("apply_likelihood", "Apply Likelihood"),
];

/// Free-text fields in display order
pub const TEXT_FIELDS: &[(&str, &str)] = &[
    ("most_valuable", "Most Valuable"),
    ("improvements", "Improvements Suggested"),
];

pub const RECOMMEND_FIELD: &str = "recommend";
pub const RECOMMEND_LABEL: &str = "Recommend to Others";

const NOT_RATED: &str = "Not rated";
const NOT_ANSWERED: &str = "Not answered";
const NOT_PROVIDED: &str = "Not provided";

/// One star row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingLine {
    pub field: &'static str,
    pub label: &'static str,
    /// `None` when absent or not a positive number
    pub rating: Option<u8>,
}

impl RatingLine {
    /// Filled state per star, empty when not rated
    pub fn stars(&self) -> Vec<bool> {
        match self.rating {
            Some(_) => highlight(self.rating, REVIEW_STARS),
            None => Vec::new(),
        }
    }

    /// Star glyphs, or the fallback text
    pub fn glyphs(&self) -> String {
        if self.rating.is_none() {
            return NOT_RATED.to_string();
        }
        self.stars()
            .into_iter()
            .map(|filled| if filled { FILLED_STAR } else { EMPTY_STAR })
            .collect()
    }

    /// Numeric label such as "4/5"
    pub fn value_label(&self) -> String {
        match self.rating {
            Some(value) => format!("{}/{}", value, REVIEW_STARS),
            None => NOT_RATED.to_string(),
        }
    }
}

/// Badge colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStyle {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub style: BadgeStyle,
}

/// A truncated free-text answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextLine {
    pub field: &'static str,
    pub label: &'static str,
    pub text: String,
}

/// Everything the review panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub ratings: Vec<RatingLine>,
    pub recommend: Badge,
    pub texts: Vec<TextLine>,
}

/// Build the review summary for the given data
pub fn summarize(state: &FormState) -> ReviewSummary {
    let ratings = RATING_FIELDS
        .iter()
        .map(|&(field, label)| RatingLine {
            field,
            label,
            rating: state
                .text(field)
                .and_then(parse_rating)
                .filter(|value| *value >= 1),
        })
        .collect();

    let recommend = match state.text(RECOMMEND_FIELD) {
        Some(answer) => Badge {
            text: answer.to_string(),
            style: if answer == "Yes" {
                BadgeStyle::Positive
            } else {
                BadgeStyle::Negative
            },
        },
        None => Badge {
            text: NOT_ANSWERED.to_string(),
            style: BadgeStyle::Negative,
        },
    };

    let texts = TEXT_FIELDS
        .iter()
        .map(|&(field, label)| TextLine {
            field,
            label,
            text: truncate_text(state.text(field).unwrap_or(NOT_PROVIDED), REVIEW_TEXT_LIMIT),
        })
        .collect();

    ReviewSummary {
        ratings,
        recommend,
        texts,
    }
}

/// Cut `text` to `max` characters, appending "..." when anything was dropped
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max).collect();
    truncated.push_str("...");
    truncated
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ratings Summary")?;
        for line in &self.ratings {
            if line.rating.is_some() {
                writeln!(f, "  {:<26}{}  {}", line.label, line.glyphs(), line.value_label())?;
            } else {
                writeln!(f, "  {:<26}{}", line.label, NOT_RATED)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Feedback Summary")?;
        let marker = match self.recommend.style {
            BadgeStyle::Positive => "+",
            BadgeStyle::Negative => "-",
        };
        writeln!(f, "  {:<26}[{}] {}", RECOMMEND_LABEL, marker, self.recommend.text)?;
        for line in &self.texts {
            writeln!(f, "  {}:", line.label)?;
            writeln!(f, "    {}", line.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::state::FieldValue;

    fn state_with(pairs: &[(&str, &str)]) -> FormState {
        let mut state = FormState::new();
        for (name, value) in pairs {
            state.set(*name, FieldValue::Text((*value).to_string()));
        }
        state
    }

    #[test]
    fn test_summary_for_partial_state() {
        let long = "x".repeat(150);
        let state = state_with(&[
            ("content_quality", "4"),
            ("recommend", "Yes"),
            ("most_valuable", long.as_str()),
        ]);

        let summary = summarize(&state);

        let quality = &summary.ratings[0];
        assert_eq!(quality.stars().iter().filter(|s| **s).count(), 4);
        assert_eq!(quality.stars().iter().filter(|s| !**s).count(), 1);
        assert_eq!(quality.glyphs(), "★★★★☆");
        assert_eq!(quality.value_label(), "4/5");

        assert_eq!(summary.recommend.text, "Yes");
        assert_eq!(summary.recommend.style, BadgeStyle::Positive);

        let most_valuable = &summary.texts[0];
        assert_eq!(most_valuable.text, format!("{}...", "x".repeat(100)));
    }

    #[test]
    fn test_fallbacks_for_empty_state() {
        let summary = summarize(&FormState::new());

        assert!(summary.ratings.iter().all(|r| r.rating.is_none()));
        assert_eq!(summary.ratings[1].glyphs(), "Not rated");
        assert_eq!(summary.recommend.text, "Not answered");
        assert_eq!(summary.recommend.style, BadgeStyle::Negative);
        assert!(summary.texts.iter().all(|t| t.text == "Not provided"));
    }

    #[test]
    fn test_non_yes_answers_are_negative() {
        let summary = summarize(&state_with(&[("recommend", "Maybe")]));
        assert_eq!(summary.recommend.style, BadgeStyle::Negative);
        assert_eq!(summary.recommend.text, "Maybe");
    }

    #[test]
    fn test_summarize_is_pure() {
        let state = state_with(&[("clarity", "2"), ("improvements", "shorter breaks")]);
        assert_eq!(summarize(&state), summarize(&state));
    }

    #[test]
    fn test_truncate_text_boundaries() {
        assert_eq!(truncate_text("short", 100), "short");
        assert_eq!(truncate_text(&"y".repeat(100), 100), "y".repeat(100));
        assert_eq!(truncate_text("ünïcödé", 3), "ünï...");
    }

    #[test]
    fn test_display_lists_every_section() {
        let text = summarize(&state_with(&[("engagement", "5")])).to_string();
        assert!(text.contains("Ratings Summary"));
        assert!(text.contains("★★★★★  5/5"));
        assert!(text.contains("Recommend to Others"));
        assert!(text.contains("Not provided"));
    }
}
