//! Submission pipeline types and the endpoint client abstraction
//!
//! The controller never talks to the network itself: it emits a payload and
//! later receives a [`SubmissionOutcome`] produced by a [`Submitter`].

mod http;

pub use http::HttpSubmitter;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::FormState;

/// Error panel text when the endpoint rejects without a message
pub const REJECTION_FALLBACK: &str = "Submission failed. Please try again.";
/// Error panel text for transport and parse failures
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Multipart body for one submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    /// Correlates log lines of one attempt
    pub attempt: Uuid,
    /// Field name/value pairs mirroring FormState
    pub fields: Vec<(String, String)>,
}

impl SubmissionPayload {
    pub fn from_state(state: &FormState) -> Self {
        Self {
            attempt: Uuid::new_v4(),
            fields: state.to_form_fields(),
        }
    }

    /// Value sent for a field
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// JSON body returned by the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

impl SubmitResponse {
    pub fn into_outcome(self) -> SubmissionOutcome {
        if self.success {
            SubmissionOutcome::Success {
                message: self.message.filter(|m| !m.is_empty()),
                redirect: self.redirect.filter(|r| !r.is_empty()),
            }
        } else {
            SubmissionOutcome::ServerRejection {
                message: self.message.filter(|m| !m.is_empty()),
            }
        }
    }
}

/// Typed result of the asynchronous submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        message: Option<String>,
        redirect: Option<String>,
    },
    ServerRejection {
        message: Option<String>,
    },
    TransportError {
        /// Diagnostic text for logs, never shown verbatim
        detail: String,
    },
}

/// Where the submission pipeline stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    /// Whether the form accepts edits and navigation
    pub fn is_interactive(&self) -> bool {
        matches!(self, SubmissionPhase::Idle | SubmissionPhase::Failed)
    }
}

/// Sends a payload to the submission endpoint
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Post the payload; failures are reported in the outcome, never raised
    async fn submit(&self, payload: &SubmissionPayload) -> SubmissionOutcome;
}
