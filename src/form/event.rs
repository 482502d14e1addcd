//! Events fed into the controller

use super::effects::Timer;
use super::inputs::FieldInput;
use crate::submit::SubmissionOutcome;

/// Everything that can happen to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A control's value changed
    Input { field: String, value: FieldInput },
    /// A control lost focus
    Blur { field: String },
    Next,
    Prev,
    /// Pointer over a star
    StarHover { field: String, value: u8 },
    /// Pointer left a star group
    StarLeave { field: String },
    /// A star was checked
    RatingChanged { field: String, value: u8 },
    Submit,
    Retry,
    DismissError,
    DismissToast { id: u64 },
    SubmissionCompleted(SubmissionOutcome),
    TimerElapsed(Timer),
    /// Viewport changed size
    Resize,
}

impl FormEvent {
    pub fn input(field: &str, value: FieldInput) -> Self {
        FormEvent::Input {
            field: field.to_string(),
            value,
        }
    }

    pub fn text(field: &str, value: &str) -> Self {
        Self::input(field, FieldInput::Text(value.to_string()))
    }

    pub fn choice(field: &str, value: &str) -> Self {
        Self::input(field, FieldInput::Choice(Some(value.to_string())))
    }

    pub fn check(field: &str, checked: bool) -> Self {
        Self::input(field, FieldInput::Flag(checked))
    }

    pub fn rating(field: &str, value: u8) -> Self {
        FormEvent::RatingChanged {
            field: field.to_string(),
            value,
        }
    }
}
