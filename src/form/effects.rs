//! Effects emitted by the controller for the runtime and surface to execute

use std::time::Duration;

use super::counter::CharacterCount;
use super::navigation::{NavButtons, SectionTransition};
use super::review::ReviewSummary;
use super::section::Section;
use super::validator::FieldMark;
use crate::submit::SubmissionPayload;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// A transient notification; showing one replaces the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Where the view should scroll or move focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Section(Section),
    Field(String),
    Success,
    ErrorPanel,
}

/// Deferred work the runtime schedules and feeds back as an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timer {
    /// Follow the endpoint's redirect
    Redirect { url: String },
    /// End the shake animation on these fields
    ShakeEnd { fields: Vec<String> },
    /// Auto-dismiss a toast
    ToastExpiry { id: u64 },
}

/// One instruction produced by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowSection {
        section: Section,
        transition: SectionTransition,
    },
    UpdateProgress {
        percent: f64,
    },
    UpdateNavigation(NavButtons),
    MarkField {
        field: String,
        mark: FieldMark,
    },
    UpdateCounter {
        field: String,
        count: CharacterCount,
    },
    HighlightStars {
        field: String,
        stars: Vec<bool>,
    },
    Shake {
        fields: Vec<String>,
    },
    StopShake {
        fields: Vec<String>,
    },
    ScrollTo(ScrollTarget),
    ShowToast(Toast),
    DismissToast {
        id: u64,
    },
    RenderReview(ReviewSummary),
    /// Loading indicator on, interaction blocked (or the reverse)
    SetLoading(bool),
    ShowSuccess {
        message: Option<String>,
    },
    ShowError {
        message: String,
    },
    HideError,
    Navigate {
        url: String,
    },
    StartTimer {
        timer: Timer,
        after: Duration,
    },
    Submit(SubmissionPayload),
}

impl Effect {
    /// Whether the runtime, rather than the surface, executes this effect
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Effect::StartTimer { .. } | Effect::Submit(_))
    }
}
