//! Event loop glue between the controller, a surface and async work.
//!
//! Transitions run synchronously on the caller's task. Timers and the
//! network call are spawned onto tokio and post their completion back into
//! the runtime's channel as a [`FormEvent`].

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::form::{Effect, FormController, FormEvent};
use crate::submit::Submitter;

/// Presentational adapter that executes effects
pub trait Surface {
    fn apply(&mut self, effect: &Effect);
}

/// Surface that drops every effect
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn apply(&mut self, _effect: &Effect) {}
}

/// Surface that records effects, for tests and headless runs
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub effects: Vec<Effect>,
}

impl Surface for RecordingSurface {
    fn apply(&mut self, effect: &Effect) {
        self.effects.push(effect.clone());
    }
}

pub struct FormRuntime {
    controller: FormController,
    submitter: Arc<dyn Submitter>,
    event_tx: mpsc::UnboundedSender<FormEvent>,
    event_rx: mpsc::UnboundedReceiver<FormEvent>,
}

impl FormRuntime {
    pub fn new(controller: FormController, submitter: Arc<dyn Submitter>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            submitter,
            event_tx,
            event_rx,
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Sender for events produced outside the runtime (input handlers)
    pub fn sender(&self) -> mpsc::UnboundedSender<FormEvent> {
        self.event_tx.clone()
    }

    /// Render the initial state
    pub fn start(&mut self, surface: &mut dyn Surface) -> Vec<Effect> {
        let effects = self.controller.start();
        self.execute(&effects, surface);
        effects
    }

    /// Run one transition and execute its effects
    pub fn dispatch(&mut self, event: FormEvent, surface: &mut dyn Surface) -> Vec<Effect> {
        let effects = self.controller.handle(event);
        self.execute(&effects, surface);
        effects
    }

    /// Wait for the next event posted by a timer or submission
    pub async fn next_event(&mut self) -> Option<FormEvent> {
        self.event_rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<FormEvent> {
        self.event_rx.try_recv().ok()
    }

    fn execute(&self, effects: &[Effect], surface: &mut dyn Surface) {
        for effect in effects {
            match effect {
                Effect::StartTimer { timer, after } => {
                    let tx = self.event_tx.clone();
                    let timer = timer.clone();
                    let after = *after;
                    tracing::trace!(?timer, ?after, "Scheduling timer");
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        // Receiver gone means the form was closed
                        let _ = tx.send(FormEvent::TimerElapsed(timer));
                    });
                }
                Effect::Submit(payload) => {
                    let tx = self.event_tx.clone();
                    let submitter = Arc::clone(&self.submitter);
                    let payload = payload.clone();
                    tokio::spawn(async move {
                        let outcome = submitter.submit(&payload).await;
                        let _ = tx.send(FormEvent::SubmissionCompleted(outcome));
                    });
                }
                other => surface.apply(other),
            }
        }
    }
}
