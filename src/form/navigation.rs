//! Navigation button state and section transitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::section::Section;

/// State of the forward button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextButton {
    /// Plain "Next"
    Next,
    /// Last step before the review section
    ReviewAndSubmit,
    /// On the review section, where submit takes over
    Hidden,
}

impl NextButton {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            NextButton::Next => Some("Next"),
            NextButton::ReviewAndSubmit => Some("Review & Submit"),
            NextButton::Hidden => None,
        }
    }
}

/// Visibility and labels of the navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavButtons {
    pub prev_enabled: bool,
    pub next: NextButton,
    pub submit_visible: bool,
}

impl NavButtons {
    /// Buttons for a section, computed from the cursor alone
    pub fn for_section(section: Section) -> Self {
        let next = if section.is_last() {
            NextButton::Hidden
        } else if section.next().is_last() {
            NextButton::ReviewAndSubmit
        } else {
            NextButton::Next
        };
        Self {
            prev_enabled: !section.is_first(),
            next,
            submit_visible: section.is_last(),
        }
    }
}

/// Which way the cursor moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// Initial display, no animation
    None,
    Forward,
    Backward,
}

/// Presentational fade/slide between sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTransition {
    pub from: Option<Section>,
    pub direction: TransitionDirection,
    /// Outgoing section is hidden after this delay
    pub hide_after: Duration,
    /// Incoming section starts fading in this long after it is shown
    pub fade_in_after: Duration,
}

impl SectionTransition {
    /// Initial display without animation
    pub fn immediate() -> Self {
        Self {
            from: None,
            direction: TransitionDirection::None,
            hide_after: Duration::ZERO,
            fade_in_after: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_section_buttons() {
        let buttons = NavButtons::for_section(Section::FIRST);
        assert!(!buttons.prev_enabled);
        assert_eq!(buttons.next, NextButton::Next);
        assert!(!buttons.submit_visible);
    }

    #[test]
    fn test_second_section_relabels_next() {
        let buttons = NavButtons::for_section(Section::new(2));
        assert!(buttons.prev_enabled);
        assert_eq!(buttons.next.label(), Some("Review & Submit"));
    }

    #[test]
    fn test_last_section_hides_next() {
        let buttons = NavButtons::for_section(Section::LAST);
        assert_eq!(buttons.next, NextButton::Hidden);
        assert_eq!(buttons.next.label(), None);
        assert!(buttons.submit_visible);
    }

    #[test]
    fn test_buttons_restore_when_going_back() {
        // Same section yields the same buttons regardless of history
        let after_return = NavButtons::for_section(Section::LAST.prev());
        assert_eq!(after_return, NavButtons::for_section(Section::new(2)));
    }
}
