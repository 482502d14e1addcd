//! Form controller: the `(state, event) -> effects` transition function.
//!
//! The controller owns every piece of mutable form state (the section
//! cursor, the collected FormState, live control values, star groups and the
//! submission phase). It performs no IO; timers and the network call are
//! requested through [`Effect::StartTimer`] and [`Effect::Submit`] and their
//! completions come back as events.

use std::collections::HashMap;

use super::counter::CharacterCount;
use super::effects::{Effect, ScrollTarget, Timer, Toast, ToastKind};
use super::event::FormEvent;
use super::inputs::{FieldInput, FieldInputs};
use super::navigation::{NavButtons, SectionTransition, TransitionDirection};
use super::rating::{parse_rating, RatingControl};
use super::review::summarize;
use super::schema::{FieldKind, FormSchema};
use super::section::Section;
use super::state::{FieldValue, FormState};
use super::timing::FormTimings;
use super::validator::{validate_field, validate_section, SectionCheck, ValidationMode};
use crate::error::FormError;
use crate::submit::{SubmissionOutcome, SubmissionPayload, SubmissionPhase};

/// Toast shown when a section fails validation
pub const VALIDATION_TOAST: &str = "Please fill in all required fields correctly.";
/// Loading indicator text while a submission is in flight
pub const LOADING_MESSAGE: &str = "Submitting your feedback...";

pub struct FormController {
    schema: FormSchema,
    inputs: FieldInputs,
    state: FormState,
    ratings: HashMap<String, RatingControl>,
    phase: SubmissionPhase,
    timings: FormTimings,
    next_toast_id: u64,
    active_toast: Option<u64>,
    last_error: Option<FormError>,
}

impl FormController {
    pub fn new(schema: FormSchema, timings: FormTimings) -> Self {
        let inputs = FieldInputs::from_schema(&schema);
        let ratings = schema
            .fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Rating { .. }))
            .map(|f| (f.name.clone(), RatingControl::for_kind(&f.kind)))
            .collect();

        Self {
            schema,
            inputs,
            state: FormState::new(),
            ratings,
            phase: SubmissionPhase::Idle,
            timings,
            next_toast_id: 1,
            active_toast: None,
            last_error: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn inputs(&self) -> &FieldInputs {
        &self.inputs
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn current_section(&self) -> Section {
        self.state.current_section
    }

    pub fn timings(&self) -> &FormTimings {
        &self.timings
    }

    /// Star group state for a rating field
    pub fn rating(&self, field: &str) -> Option<&RatingControl> {
        self.ratings.get(field)
    }

    /// Toast currently on screen
    pub fn active_toast(&self) -> Option<u64> {
        self.active_toast
    }

    /// Most recent validation or submission failure, cleared on success
    pub fn last_error(&self) -> Option<&FormError> {
        self.last_error.as_ref()
    }

    /// Initial render: first section, progress, buttons and counters
    pub fn start(&mut self) -> Vec<Effect> {
        tracing::debug!(fields = self.schema.fields.len(), "Starting form");
        let mut effects = self.snapshot(SectionTransition::immediate());
        effects.push(Effect::ScrollTo(ScrollTarget::Top));
        effects
    }

    /// Apply one event and return the effects to execute, in order
    pub fn handle(&mut self, event: FormEvent) -> Vec<Effect> {
        tracing::trace!(?event, phase = ?self.phase, "Handling form event");

        match event {
            FormEvent::DismissToast { id } => return self.dismiss_toast(id),
            FormEvent::TimerElapsed(timer) => return self.timer_elapsed(timer),
            FormEvent::SubmissionCompleted(outcome) => return self.submission_completed(outcome),
            FormEvent::Resize => return self.snapshot(SectionTransition::immediate()),
            _ => {}
        }

        if !self.phase.is_interactive() {
            tracing::debug!(?event, phase = ?self.phase, "Ignoring event while not interactive");
            return Vec::new();
        }

        match event {
            FormEvent::Input { field, value } => self.input(&field, value),
            FormEvent::Blur { field } => self.blur(&field),
            FormEvent::Next => self.next(),
            FormEvent::Prev => self.prev(),
            FormEvent::StarHover { field, value } => self
                .ratings
                .get_mut(&field)
                .map(|group| {
                    vec![Effect::HighlightStars {
                        stars: group.hover(value),
                        field,
                    }]
                })
                .unwrap_or_default(),
            FormEvent::StarLeave { field } => self
                .ratings
                .get_mut(&field)
                .map(|group| {
                    vec![Effect::HighlightStars {
                        stars: group.leave(),
                        field,
                    }]
                })
                .unwrap_or_default(),
            FormEvent::RatingChanged { field, value } => self.rating_changed(&field, value),
            FormEvent::Submit => self.submit(),
            FormEvent::Retry => self.retry(),
            FormEvent::DismissError => self.dismiss_error(),
            FormEvent::DismissToast { .. }
            | FormEvent::TimerElapsed(_)
            | FormEvent::SubmissionCompleted(_)
            | FormEvent::Resize => Vec::new(),
        }
    }

    // ─── Field events ───────────────────────────────────────────────────

    fn input(&mut self, field: &str, value: FieldInput) -> Vec<Effect> {
        let Some(spec) = self.schema.field(field) else {
            tracing::warn!(field, "Input for unknown field");
            return Vec::new();
        };

        // A star group's radio input changing is a rating commit
        if let (FieldKind::Rating { .. }, FieldInput::Choice(Some(choice))) = (&spec.kind, &value) {
            return match parse_rating(choice) {
                Some(rating) => self.rating_changed(field, rating),
                None => {
                    tracing::warn!(field, value = %choice, "Rating value is not a number");
                    Vec::new()
                }
            };
        }

        let max_length = spec.kind.max_length();
        if !self.inputs.set(field, value) {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if let (Some(max), Some(FieldInput::Text(text))) = (max_length, self.inputs.get(field)) {
            effects.push(Effect::UpdateCounter {
                field: field.to_string(),
                count: CharacterCount::measure(text, max),
            });
        }
        effects.extend(self.live_mark(field));
        effects
    }

    fn blur(&mut self, field: &str) -> Vec<Effect> {
        self.live_mark(field).into_iter().collect()
    }

    fn live_mark(&self, field: &str) -> Option<Effect> {
        let spec = self.schema.field(field)?;
        let input = self.inputs.get(field)?;
        let check = validate_field(spec, input, ValidationMode::Live);
        Some(Effect::MarkField {
            field: field.to_string(),
            mark: check.mark,
        })
    }

    fn rating_changed(&mut self, field: &str, value: u8) -> Vec<Effect> {
        let Some(spec) = self.schema.field(field) else {
            tracing::warn!(field, "Rating for unknown field");
            return Vec::new();
        };
        let FieldKind::Rating { min, max } = spec.kind else {
            tracing::warn!(field, "Rating for a field that is not a star group");
            return Vec::new();
        };
        if !(min..=max).contains(&value) {
            tracing::warn!(field, value, min, max, "Rating out of range");
            return Vec::new();
        }
        let Some(group) = self.ratings.get_mut(field) else {
            return Vec::new();
        };

        let stars = group.commit(value);
        let rating = value.to_string();
        self.inputs
            .set(field, FieldInput::Choice(Some(rating.clone())));
        self.state.set(field, FieldValue::Text(rating));
        tracing::debug!(field, value, "Rating committed");

        let mut effects = vec![Effect::HighlightStars {
            field: field.to_string(),
            stars,
        }];
        effects.extend(self.live_mark(field));
        effects.push(Effect::RenderReview(summarize(&self.state)));
        effects
    }

    // ─── Navigation ─────────────────────────────────────────────────────

    fn next(&mut self) -> Vec<Effect> {
        let current = self.current_section();
        if current.is_last() {
            tracing::debug!(section = %current, "Already on the last section");
            return Vec::new();
        }

        let check = validate_section(&self.schema, &self.inputs, current);
        if !check.is_valid() {
            tracing::info!(section = %current, invalid = ?check.invalid, "Section is incomplete");
            return self.reject_section(check);
        }

        self.move_to(current.next(), TransitionDirection::Forward, Some(check))
    }

    fn prev(&mut self) -> Vec<Effect> {
        let current = self.current_section();
        if current.is_first() {
            return Vec::new();
        }
        self.move_to(current.prev(), TransitionDirection::Backward, None)
    }

    /// Save the outgoing section and move the cursor
    fn move_to(
        &mut self,
        target: Section,
        direction: TransitionDirection,
        check: Option<SectionCheck>,
    ) -> Vec<Effect> {
        let from = self.current_section();
        self.state.save_section(&self.schema, &self.inputs, from);
        self.state.current_section = target;
        tracing::info!(from = %from, to = %target, "Section changed");

        let mut effects: Vec<Effect> = check
            .map(|c| {
                c.marks
                    .into_iter()
                    .map(|(field, mark)| Effect::MarkField { field, mark })
                    .collect()
            })
            .unwrap_or_default();

        effects.push(Effect::ShowSection {
            section: target,
            transition: SectionTransition {
                from: Some(from),
                direction,
                hide_after: self.timings.section_hide,
                fade_in_after: self.timings.section_fade_in,
            },
        });
        effects.push(Effect::UpdateProgress {
            percent: target.progress_percent(),
        });
        effects.push(Effect::UpdateNavigation(NavButtons::for_section(target)));
        effects.push(Effect::RenderReview(summarize(&self.state)));
        effects.push(Effect::ScrollTo(ScrollTarget::Section(target)));
        effects
    }

    /// Marks, toast, scroll and shake for a section that failed its gate
    fn reject_section(&mut self, check: SectionCheck) -> Vec<Effect> {
        let first = check.first_invalid().map(str::to_string);
        let invalid = check.invalid.clone();

        let mut effects: Vec<Effect> = check
            .marks
            .into_iter()
            .map(|(field, mark)| Effect::MarkField { field, mark })
            .collect();
        effects.extend(self.show_toast(VALIDATION_TOAST, ToastKind::Error));
        if let Some(field) = first {
            effects.push(Effect::ScrollTo(ScrollTarget::Field(field)));
        }
        effects.push(Effect::Shake {
            fields: invalid.clone(),
        });
        effects.push(Effect::StartTimer {
            timer: Timer::ShakeEnd {
                fields: invalid.clone(),
            },
            after: self.timings.shake_duration,
        });

        self.last_error = Some(FormError::Validation { fields: invalid });
        effects
    }

    // ─── Submission ─────────────────────────────────────────────────────

    fn submit(&mut self) -> Vec<Effect> {
        if !self.current_section().is_last() {
            tracing::debug!(section = %self.current_section(), "Submit outside the review section");
            return Vec::new();
        }
        let mut effects = Vec::new();
        if self.phase == SubmissionPhase::Failed {
            effects.push(Effect::HideError);
        }
        effects.extend(self.begin_submission());
        effects
    }

    fn retry(&mut self) -> Vec<Effect> {
        if self.phase != SubmissionPhase::Failed {
            return Vec::new();
        }
        if !self.current_section().is_last() {
            tracing::debug!(section = %self.current_section(), "Retry outside the review section");
            return Vec::new();
        }
        tracing::info!("Retrying submission");
        let mut effects = vec![Effect::HideError];
        effects.extend(self.begin_submission());
        effects
    }

    /// Validating -> Submitting, or back to Idle when the final section fails
    fn begin_submission(&mut self) -> Vec<Effect> {
        self.phase = SubmissionPhase::Validating;
        let section = Section::LAST;

        let check = validate_section(&self.schema, &self.inputs, section);
        if !check.is_valid() {
            self.phase = SubmissionPhase::Idle;
            tracing::info!(invalid = ?check.invalid, "Submission blocked by validation");
            return self.reject_section(check);
        }

        self.state.save_section(&self.schema, &self.inputs, section);
        let payload = SubmissionPayload::from_state(&self.state);
        self.phase = SubmissionPhase::Submitting;
        tracing::info!(attempt = %payload.attempt, fields = payload.fields.len(), "Submission started");

        let mut effects: Vec<Effect> = check
            .marks
            .into_iter()
            .map(|(field, mark)| Effect::MarkField { field, mark })
            .collect();
        effects.push(Effect::SetLoading(true));
        effects.push(Effect::Submit(payload));
        effects
    }

    fn submission_completed(&mut self, outcome: SubmissionOutcome) -> Vec<Effect> {
        if self.phase != SubmissionPhase::Submitting {
            tracing::warn!(phase = ?self.phase, "Submission outcome without a submission in flight");
            return Vec::new();
        }

        let mut effects = vec![Effect::SetLoading(false)];
        match FormError::from_outcome(&outcome) {
            None => {
                self.phase = SubmissionPhase::Succeeded;
                self.last_error = None;
                let SubmissionOutcome::Success { message, redirect } = outcome else {
                    return effects;
                };
                tracing::info!(redirect = ?redirect, "Submission succeeded");
                effects.push(Effect::ShowSuccess { message });
                effects.push(Effect::ScrollTo(ScrollTarget::Success));
                if let Some(url) = redirect {
                    effects.push(Effect::StartTimer {
                        timer: Timer::Redirect { url },
                        after: self.timings.redirect_delay,
                    });
                }
            }
            Some(err) => {
                self.phase = SubmissionPhase::Failed;
                if let SubmissionOutcome::TransportError { detail } = &outcome {
                    tracing::error!(detail = %detail, "Submission transport failure");
                } else {
                    tracing::warn!(error = %err, "Submission rejected");
                }
                effects.push(Effect::ShowError {
                    message: err.user_message(),
                });
                effects.push(Effect::ScrollTo(ScrollTarget::ErrorPanel));
                self.last_error = Some(err);
            }
        }
        effects
    }

    fn dismiss_error(&mut self) -> Vec<Effect> {
        if self.phase != SubmissionPhase::Failed {
            return Vec::new();
        }
        self.phase = SubmissionPhase::Idle;
        vec![Effect::HideError]
    }

    // ─── Toasts and timers ──────────────────────────────────────────────

    /// Show a toast, replacing any visible one, with its expiry timer
    fn show_toast(&mut self, message: &str, kind: ToastKind) -> Vec<Effect> {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.active_toast = Some(id);

        vec![
            Effect::ShowToast(Toast {
                id,
                message: message.to_string(),
                kind,
            }),
            Effect::StartTimer {
                timer: Timer::ToastExpiry { id },
                after: self.timings.toast_duration,
            },
        ]
    }

    fn dismiss_toast(&mut self, id: u64) -> Vec<Effect> {
        if self.active_toast != Some(id) {
            return Vec::new();
        }
        self.active_toast = None;
        vec![Effect::DismissToast { id }]
    }

    fn timer_elapsed(&mut self, timer: Timer) -> Vec<Effect> {
        match timer {
            Timer::Redirect { url } => {
                if self.phase != SubmissionPhase::Succeeded {
                    return Vec::new();
                }
                tracing::info!(url = %url, "Following redirect");
                vec![Effect::Navigate { url }]
            }
            Timer::ShakeEnd { fields } => vec![Effect::StopShake { fields }],
            Timer::ToastExpiry { id } => self.dismiss_toast(id),
        }
    }

    /// Everything needed to redraw the current section from scratch
    fn snapshot(&self, transition: SectionTransition) -> Vec<Effect> {
        let section = self.current_section();
        let mut effects = vec![
            Effect::ShowSection {
                section,
                transition,
            },
            Effect::UpdateProgress {
                percent: section.progress_percent(),
            },
            Effect::UpdateNavigation(NavButtons::for_section(section)),
        ];

        for spec in &self.schema.fields {
            if let Some(group) = self.ratings.get(&spec.name) {
                effects.push(Effect::HighlightStars {
                    field: spec.name.clone(),
                    stars: group.display(),
                });
            }
        }
        for (spec, max) in self.schema.counted_fields() {
            let text = self
                .inputs
                .get(&spec.name)
                .and_then(FieldInput::as_text)
                .unwrap_or_default();
            effects.push(Effect::UpdateCounter {
                field: spec.name.clone(),
                count: CharacterCount::measure(text, max),
            });
        }
        effects.push(Effect::RenderReview(summarize(&self.state)));
        effects
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(FormSchema::feedback(), FormTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validator::FieldMark;
    use crate::submit::{NETWORK_ERROR_MESSAGE, REJECTION_FALLBACK};
    use std::time::Duration;

    const RATINGS: [&str; 5] = [
        "content_quality",
        "clarity",
        "engagement",
        "satisfaction",
        "apply_likelihood",
    ];

    fn rate_all(controller: &mut FormController) {
        for field in RATINGS {
            controller.handle(FormEvent::rating(field, 4));
        }
    }

    fn fill_thoughts(controller: &mut FormController) {
        controller.handle(FormEvent::text("most_valuable", "  live coding  "));
        controller.handle(FormEvent::text("improvements", "longer Q&A"));
        controller.handle(FormEvent::choice("recommend", "Yes"));
    }

    /// Controller sitting on the review section with everything filled in
    fn at_review() -> FormController {
        let mut controller = FormController::default();
        controller.start();
        rate_all(&mut controller);
        controller.handle(FormEvent::Next);
        fill_thoughts(&mut controller);
        controller.handle(FormEvent::Next);
        controller.handle(FormEvent::check("confirm_accurate", true));
        controller
    }

    fn submitting() -> FormController {
        let mut controller = at_review();
        controller.handle(FormEvent::Submit);
        assert_eq!(controller.phase(), SubmissionPhase::Submitting);
        controller
    }

    fn toast_message(effects: &[Effect]) -> Option<&str> {
        effects.iter().find_map(|e| match e {
            Effect::ShowToast(toast) => Some(toast.message.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_start_shows_first_section() {
        let mut controller = FormController::default();
        let effects = controller.start();

        assert!(matches!(
            effects[0],
            Effect::ShowSection { section, .. } if section == Section::FIRST
        ));
        assert!(effects.contains(&Effect::UpdateNavigation(NavButtons::for_section(
            Section::FIRST
        ))));
        let counters = effects
            .iter()
            .filter(|e| matches!(e, Effect::UpdateCounter { .. }))
            .count();
        assert_eq!(counters, 2);
        assert_eq!(effects.last(), Some(&Effect::ScrollTo(ScrollTarget::Top)));
    }

    #[test]
    fn test_next_blocked_on_incomplete_section() {
        let mut controller = FormController::default();
        controller.start();
        controller.handle(FormEvent::rating("content_quality", 5));

        let effects = controller.handle(FormEvent::Next);

        assert_eq!(controller.current_section(), Section::FIRST);
        assert_eq!(toast_message(&effects), Some(VALIDATION_TOAST));
        assert!(effects.contains(&Effect::ScrollTo(ScrollTarget::Field("clarity".to_string()))));
        assert!(effects.contains(&Effect::MarkField {
            field: "clarity".to_string(),
            mark: FieldMark::Invalid,
        }));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::StartTimer { timer: Timer::ShakeEnd { fields }, after }
                if fields.len() == 4 && *after == Duration::from_millis(500)
        )));
        assert!(matches!(
            controller.last_error(),
            Some(FormError::Validation { fields }) if fields.len() == 4
        ));
    }

    #[test]
    fn test_next_advances_and_saves_section() {
        let mut controller = FormController::default();
        controller.start();
        rate_all(&mut controller);

        let effects = controller.handle(FormEvent::Next);

        assert_eq!(controller.current_section(), Section::new(2));
        assert!(effects.contains(&Effect::UpdateProgress {
            percent: Section::new(2).progress_percent()
        }));
        assert!(effects.contains(&Effect::UpdateNavigation(NavButtons::for_section(
            Section::new(2)
        ))));
        assert_eq!(controller.state().text("clarity"), Some("4"));
    }

    #[test]
    fn test_prev_saves_without_validation() {
        let mut controller = FormController::default();
        controller.start();
        rate_all(&mut controller);
        controller.handle(FormEvent::Next);
        controller.handle(FormEvent::text("most_valuable", "draft"));

        controller.handle(FormEvent::Prev);

        assert_eq!(controller.current_section(), Section::FIRST);
        assert_eq!(controller.state().text("most_valuable"), Some("draft"));
        assert!(controller.handle(FormEvent::Prev).is_empty());
    }

    #[test]
    fn test_back_from_review_restores_next_button() {
        let mut controller = at_review();
        let effects = controller.handle(FormEvent::Prev);
        assert!(effects.contains(&Effect::UpdateNavigation(NavButtons::for_section(
            Section::new(2)
        ))));
    }

    #[test]
    fn test_input_updates_counter_and_mark() {
        let mut controller = FormController::default();
        let text = "x".repeat(1900);

        let effects = controller.handle(FormEvent::text("improvements", &text));

        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::UpdateCounter { field, count } if field == "improvements" && count.count == 1900
        )));
        assert!(effects.contains(&Effect::MarkField {
            field: "improvements".to_string(),
            mark: FieldMark::Valid,
        }));
    }

    #[test]
    fn test_blur_on_empty_required_field_is_clear() {
        let mut controller = FormController::default();
        let effects = controller.handle(FormEvent::Blur {
            field: "most_valuable".to_string(),
        });
        assert_eq!(
            effects,
            vec![Effect::MarkField {
                field: "most_valuable".to_string(),
                mark: FieldMark::Clear,
            }]
        );
    }

    #[test]
    fn test_rating_commit_is_idempotent() {
        let mut controller = FormController::default();
        let first = controller.handle(FormEvent::rating("clarity", 3));
        let state_after_first = controller.state().clone();
        let second = controller.handle(FormEvent::rating("clarity", 3));

        assert_eq!(first, second);
        assert_eq!(controller.state(), &state_after_first);
        assert_eq!(controller.rating("clarity").and_then(|r| r.committed()), Some(3));
    }

    #[test]
    fn test_rating_out_of_range_ignored() {
        let mut controller = FormController::default();
        assert!(controller.handle(FormEvent::rating("clarity", 9)).is_empty());
        assert!(controller.state().get("clarity").is_none());
    }

    #[test]
    fn test_star_hover_and_leave() {
        let mut controller = FormController::default();
        controller.handle(FormEvent::rating("clarity", 2));

        let hover = controller.handle(FormEvent::StarHover {
            field: "clarity".to_string(),
            value: 4,
        });
        let leave = controller.handle(FormEvent::StarLeave {
            field: "clarity".to_string(),
        });

        assert_eq!(
            hover,
            vec![Effect::HighlightStars {
                field: "clarity".to_string(),
                stars: vec![true, true, true, true, false],
            }]
        );
        assert_eq!(
            leave,
            vec![Effect::HighlightStars {
                field: "clarity".to_string(),
                stars: vec![true, true, false, false, false],
            }]
        );
    }

    #[test]
    fn test_submit_ignored_before_review() {
        let mut controller = FormController::default();
        assert!(controller.handle(FormEvent::Submit).is_empty());
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_submit_requires_confirmation() {
        let mut controller = at_review();
        controller.handle(FormEvent::check("confirm_accurate", false));

        let effects = controller.handle(FormEvent::Submit);

        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert_eq!(toast_message(&effects), Some(VALIDATION_TOAST));
        assert!(!effects.iter().any(|e| matches!(e, Effect::Submit(_))));
    }

    #[test]
    fn test_submit_emits_payload_and_blocks_interaction() {
        let mut controller = at_review();
        let effects = controller.handle(FormEvent::Submit);

        assert!(effects.contains(&Effect::SetLoading(true)));
        let payload = effects
            .iter()
            .find_map(|e| match e {
                Effect::Submit(payload) => Some(payload),
                _ => None,
            })
            .expect("submit effect");
        assert_eq!(payload.value("most_valuable"), Some("live coding"));
        assert_eq!(payload.value("confirm_accurate"), Some("true"));
        assert_eq!(payload.value("follow_up"), Some("false"));

        assert!(controller.handle(FormEvent::Prev).is_empty());
        assert!(controller.handle(FormEvent::Submit).is_empty());
    }

    #[test]
    fn test_success_schedules_redirect() {
        let mut controller = submitting();
        let effects = controller.handle(FormEvent::SubmissionCompleted(SubmissionOutcome::Success {
            message: Some("Thanks!".to_string()),
            redirect: Some("/thanks".to_string()),
        }));

        assert_eq!(controller.phase(), SubmissionPhase::Succeeded);
        assert_eq!(effects[0], Effect::SetLoading(false));
        assert!(effects.contains(&Effect::StartTimer {
            timer: Timer::Redirect {
                url: "/thanks".to_string()
            },
            after: Duration::from_millis(3000),
        }));

        let navigate = controller.handle(FormEvent::TimerElapsed(Timer::Redirect {
            url: "/thanks".to_string(),
        }));
        assert_eq!(
            navigate,
            vec![Effect::Navigate {
                url: "/thanks".to_string()
            }]
        );
    }

    #[test]
    fn test_rejection_restores_interactivity() {
        let mut controller = submitting();
        let effects = controller.handle(FormEvent::SubmissionCompleted(
            SubmissionOutcome::ServerRejection { message: None },
        ));

        assert_eq!(controller.phase(), SubmissionPhase::Failed);
        assert!(effects.contains(&Effect::ShowError {
            message: REJECTION_FALLBACK.to_string()
        }));
        assert!(controller.phase().is_interactive());
    }

    #[test]
    fn test_transport_error_message() {
        let mut controller = submitting();
        let effects = controller.handle(FormEvent::SubmissionCompleted(
            SubmissionOutcome::TransportError {
                detail: "connection reset".to_string(),
            },
        ));
        assert!(effects.contains(&Effect::ShowError {
            message: NETWORK_ERROR_MESSAGE.to_string()
        }));
    }

    #[test]
    fn test_retry_revalidates() {
        let mut controller = submitting();
        controller.handle(FormEvent::SubmissionCompleted(
            SubmissionOutcome::ServerRejection { message: None },
        ));
        controller.handle(FormEvent::check("confirm_accurate", false));

        let effects = controller.handle(FormEvent::Retry);

        assert_eq!(effects[0], Effect::HideError);
        assert_eq!(toast_message(&effects), Some(VALIDATION_TOAST));
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_retry_only_from_review_section() {
        let mut controller = submitting();
        controller.handle(FormEvent::SubmissionCompleted(
            SubmissionOutcome::ServerRejection { message: None },
        ));
        controller.handle(FormEvent::check("confirm_accurate", false));
        controller.handle(FormEvent::Prev);
        assert_eq!(controller.current_section(), Section::new(2));

        let effects = controller.handle(FormEvent::Retry);
        assert!(effects.is_empty());
        assert_eq!(controller.phase(), SubmissionPhase::Failed);

        // Back on the review section the unchecked box blocks the retry
        controller.handle(FormEvent::Next);
        let effects = controller.handle(FormEvent::Retry);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Submit(_))));
        assert_eq!(toast_message(&effects), Some(VALIDATION_TOAST));
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_dismiss_error_returns_to_idle() {
        let mut controller = submitting();
        controller.handle(FormEvent::SubmissionCompleted(
            SubmissionOutcome::ServerRejection { message: None },
        ));
        assert_eq!(controller.handle(FormEvent::DismissError), vec![Effect::HideError]);
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert!(controller.handle(FormEvent::Retry).is_empty());
    }

    #[test]
    fn test_stale_toast_timer_keeps_newer_toast() {
        let mut controller = FormController::default();
        let first = controller.handle(FormEvent::Next);
        let second = controller.handle(FormEvent::Next);
        let id_of = |effects: &[Effect]| {
            effects.iter().find_map(|e| match e {
                Effect::ShowToast(toast) => Some(toast.id),
                _ => None,
            })
        };
        let (first_id, second_id) = (id_of(&first).unwrap(), id_of(&second).unwrap());
        assert_ne!(first_id, second_id);

        let stale = controller.handle(FormEvent::TimerElapsed(Timer::ToastExpiry { id: first_id }));
        assert!(stale.is_empty());
        assert_eq!(controller.active_toast(), Some(second_id));

        let current =
            controller.handle(FormEvent::TimerElapsed(Timer::ToastExpiry { id: second_id }));
        assert_eq!(current, vec![Effect::DismissToast { id: second_id }]);
    }

    #[test]
    fn test_progress_matches_cursor() {
        let mut controller = FormController::default();
        controller.start();
        rate_all(&mut controller);
        let effects = controller.handle(FormEvent::Next);
        let percent = effects.iter().find_map(|e| match e {
            Effect::UpdateProgress { percent } => Some(*percent),
            _ => None,
        });
        let expected = f64::from(controller.current_section().number()) / 3.0 * 100.0;
        assert!((percent.unwrap() - expected).abs() < f64::EPSILON);
    }
}
