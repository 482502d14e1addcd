//! feedback-form - multi-step feedback form controller
//!
//! The [`form`] module holds the pure state machine; [`runtime`] drives it
//! with tokio timers and a [`submit::Submitter`]; [`app`] and [`ui`] host it
//! in a terminal, and [`cli`] runs it headless.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod runtime;
pub mod submit;
pub mod ui;

pub use error::FormError;
pub use form::{Effect, FormController, FormEvent, FormState};
pub use runtime::{FormRuntime, Surface};
