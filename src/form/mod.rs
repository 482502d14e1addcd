//! Multi-step feedback form core: schema, validation, review and the
//! controller state machine.

mod controller;
mod counter;
mod effects;
mod event;
mod inputs;
mod navigation;
mod rating;
pub mod review;
mod schema;
mod section;
mod state;
mod timing;
mod validator;

pub use controller::{FormController, LOADING_MESSAGE, VALIDATION_TOAST};
pub use counter::{CharacterCount, CounterLevel};
pub use effects::{Effect, ScrollTarget, Timer, Toast, ToastKind};
pub use event::FormEvent;
pub use inputs::{FieldInput, FieldInputs};
pub use navigation::{NavButtons, NextButton, SectionTransition, TransitionDirection};
pub use rating::{highlight, parse_rating, RatingControl};
pub use review::{summarize, Badge, BadgeStyle, ReviewSummary};
pub use schema::{section_title, FieldKind, FieldSpec, FormSchema};
pub use section::{Section, TOTAL_SECTIONS};
pub use state::{FieldValue, FormState};
pub use timing::FormTimings;
pub use validator::{check_field, validate_field, validate_section, FieldMark, ValidationMode};
