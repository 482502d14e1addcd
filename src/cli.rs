//! Headless `submit` and `review` commands.
//!
//! Answers files are flat JSON objects keyed by field name. Ratings may be
//! numbers or numeric strings, checkboxes are booleans, everything else is a
//! string.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::FormError;
use crate::form::{
    summarize, Effect, FieldInput, FieldKind, FieldSpec, FieldValue, FormController, FormEvent,
    FormSchema, FormState, ReviewSummary, Section, ToastKind,
};
use crate::runtime::{FormRuntime, Surface};
use crate::submit::{SubmissionOutcome, SubmissionPhase, Submitter};

pub type Answers = BTreeMap<String, Value>;

pub fn load_answers(path: &Path) -> Result<Answers> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Answers file {} is not a JSON object", path.display()))
}

/// Event that sets a control from an answer value
fn answer_event(spec: &FieldSpec, value: &Value) -> Result<FormEvent> {
    let name = spec.name.as_str();
    let event = match (&spec.kind, value) {
        (FieldKind::Rating { .. }, Value::Number(n)) => {
            let rating = n
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .with_context(|| format!("Rating for '{name}' must be a small whole number"))?;
            FormEvent::rating(name, rating)
        }
        (FieldKind::Rating { .. } | FieldKind::Choice { .. }, Value::String(s)) => {
            FormEvent::input(name, FieldInput::Choice(Some(s.clone())))
        }
        (FieldKind::Text { .. } | FieldKind::Number { .. }, Value::String(s)) => {
            FormEvent::text(name, s)
        }
        (FieldKind::Number { .. }, Value::Number(n)) => FormEvent::text(name, &n.to_string()),
        (FieldKind::Checkbox, Value::Bool(b)) => FormEvent::check(name, *b),
        (kind, value) => bail!("Answer for '{name}' does not fit a {kind:?} field: {value}"),
    };
    Ok(event)
}

/// Prints what a browser would show, one line per visible change
pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %err, "Failed to write console output");
        }
    }
}

impl<W: Write> Surface for ConsoleSurface<W> {
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::ShowSection { section, .. } => {
                let title = crate::form::section_title(*section);
                self.line(&format!("── Section {section}: {title}"));
            }
            Effect::ShowToast(toast) => {
                let marker = match toast.kind {
                    ToastKind::Info => "i",
                    ToastKind::Error => "!",
                };
                self.line(&format!("[{marker}] {}", toast.message));
            }
            Effect::Shake { fields } => self.line(&format!("    check: {}", fields.join(", "))),
            Effect::SetLoading(true) => self.line(crate::form::LOADING_MESSAGE),
            Effect::ShowSuccess { message } => self.line(&format!(
                "✓ {}",
                message.as_deref().unwrap_or("Feedback submitted")
            )),
            Effect::ShowError { message } => self.line(&format!("✗ {message}")),
            Effect::Navigate { url } => self.line(&format!("→ {url}")),
            _ => {}
        }
    }
}

/// How a headless submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    Submitted {
        message: Option<String>,
        /// Redirect resolved against the endpoint base URL
        redirect: Option<String>,
    },
    Failed(FormError),
}

impl SubmitReport {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitReport::Submitted { .. })
    }
}

/// Fill the form from `answers`, walk every section and submit.
pub async fn submit_answers<W: Write>(
    config: &Config,
    answers: &Answers,
    submitter: Arc<dyn Submitter>,
    surface: &mut ConsoleSurface<W>,
) -> Result<SubmitReport> {
    let controller = FormController::new(FormSchema::feedback(), config.timing.to_timings());
    let schema = controller.schema().clone();

    for name in answers.keys() {
        if schema.field(name).is_none() {
            tracing::warn!(field = %name, "Ignoring answer for unknown field");
        }
    }

    let mut runtime = FormRuntime::new(controller, submitter);
    runtime.start(surface);

    for section in Section::all() {
        for spec in schema.section_fields(section) {
            if let Some(value) = answers.get(&spec.name) {
                runtime.dispatch(answer_event(spec, value)?, surface);
            }
        }

        if section.is_last() {
            break;
        }
        runtime.dispatch(FormEvent::Next, surface);
        if runtime.controller().current_section() == section {
            return Ok(SubmitReport::Failed(blocked(&runtime)));
        }
    }

    runtime.dispatch(FormEvent::Submit, surface);
    if runtime.controller().phase() != SubmissionPhase::Submitting {
        return Ok(SubmitReport::Failed(blocked(&runtime)));
    }

    while runtime.controller().phase() == SubmissionPhase::Submitting {
        let Some(event) = runtime.next_event().await else {
            bail!("Event channel closed while submitting");
        };
        let completed = match &event {
            FormEvent::SubmissionCompleted(outcome) => Some(outcome.clone()),
            _ => None,
        };
        runtime.dispatch(event, surface);

        match completed {
            Some(SubmissionOutcome::Success { message, redirect }) => {
                let redirect = redirect.map(|location| config.endpoint.redirect_target(&location));
                return Ok(SubmitReport::Submitted { message, redirect });
            }
            Some(outcome) => {
                let err = FormError::from_outcome(&outcome).unwrap_or(FormError::Transport {
                    message: crate::submit::NETWORK_ERROR_MESSAGE.to_string(),
                });
                return Ok(SubmitReport::Failed(err));
            }
            None => {}
        }
    }

    Ok(SubmitReport::Failed(blocked(&runtime)))
}

fn blocked(runtime: &FormRuntime) -> FormError {
    runtime
        .controller()
        .last_error()
        .cloned()
        .unwrap_or(FormError::Validation { fields: Vec::new() })
}

/// FormState built directly from stored answers
pub fn answers_to_state(answers: &Answers) -> Result<FormState> {
    let mut state = FormState::new();
    for (name, value) in answers {
        let value = match value {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => FieldValue::Text(n.to_string()),
            Value::Bool(b) => FieldValue::Flag(*b),
            Value::Null => continue,
            other => bail!("Unsupported value for '{name}': {other}"),
        };
        state.set(name.clone(), value);
    }
    Ok(state)
}

pub fn review_answers(answers: &Answers) -> Result<ReviewSummary> {
    Ok(summarize(&answers_to_state(answers)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answers(value: Value) -> Answers {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_answer_event_accepts_numeric_rating() {
        let schema = FormSchema::feedback();
        let event = answer_event(schema.field("clarity").unwrap(), &json!(4)).unwrap();
        assert_eq!(event, FormEvent::rating("clarity", 4));
    }

    #[test]
    fn test_answer_event_rejects_mismatched_type() {
        let schema = FormSchema::feedback();
        let err = answer_event(schema.field("confirm_accurate").unwrap(), &json!("yes"));
        assert!(err.is_err());
    }

    #[test]
    fn test_review_truncates_and_badges() {
        let summary = review_answers(&answers(json!({
            "content_quality": "4",
            "recommend": "Yes",
            "most_valuable": "x".repeat(150),
        })))
        .unwrap();

        assert_eq!(summary.ratings[0].glyphs(), "★★★★☆");
        assert_eq!(summary.recommend.text, "Yes");
        assert_eq!(summary.texts[0].text.chars().count(), 103);
        assert!(summary.texts[0].text.ends_with("..."));
    }

    #[test]
    fn test_console_surface_prints_toasts() {
        let mut surface = ConsoleSurface::new(Vec::new());
        surface.apply(&Effect::ShowError {
            message: "Duplicate".to_string(),
        });
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out, "✗ Duplicate\n");
    }

    #[tokio::test]
    async fn test_incomplete_answers_are_blocked() {
        struct Unused;

        #[async_trait::async_trait]
        impl Submitter for Unused {
            async fn submit(
                &self,
                _payload: &crate::submit::SubmissionPayload,
            ) -> SubmissionOutcome {
                panic!("must not submit incomplete answers");
            }
        }

        let mut surface = ConsoleSurface::new(Vec::new());
        let report = submit_answers(
            &Config::default(),
            &answers(json!({"content_quality": 5})),
            Arc::new(Unused),
            &mut surface,
        )
        .await
        .unwrap();

        assert!(matches!(
            report,
            SubmitReport::Failed(FormError::Validation { ref fields }) if fields.len() == 4
        ));
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.contains("Please fill in all required fields correctly."));
    }

    #[tokio::test]
    async fn test_unknown_option_is_blocked() {
        struct Unused;

        #[async_trait::async_trait]
        impl Submitter for Unused {
            async fn submit(
                &self,
                _payload: &crate::submit::SubmissionPayload,
            ) -> SubmissionOutcome {
                panic!("must not submit an unknown option");
            }
        }

        let mut surface = ConsoleSurface::new(Vec::new());
        let report = submit_answers(
            &Config::default(),
            &answers(json!({
                "content_quality": 5,
                "clarity": 4,
                "engagement": 4,
                "satisfaction": 5,
                "apply_likelihood": 3,
                "most_valuable": "Demos",
                "improvements": "Slides",
                "recommend": "Definitely",
                "confirm_accurate": true
            })),
            Arc::new(Unused),
            &mut surface,
        )
        .await
        .unwrap();

        assert_eq!(
            report,
            SubmitReport::Failed(FormError::Validation {
                fields: vec!["recommend".to_string()]
            })
        );
    }
}
