//! Error taxonomy for the form.
//!
//! Every variant is recoverable: the controller turns them into visible
//! state (marks and toasts, or the error panel) and returns to an
//! interactive state. They surface as Rust errors only at the edges, for
//! example when the headless CLI reports why a run stopped.

use thiserror::Error;

use crate::submit::{SubmissionOutcome, NETWORK_ERROR_MESSAGE, REJECTION_FALLBACK};

/// Why a form run did not complete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required fields of a section failed validation
    #[error("invalid or missing fields: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    /// The endpoint answered `success: false`
    #[error("submission rejected: {message}")]
    ServerRejection { message: String },

    /// The request failed or the response was not the expected JSON
    #[error("submission failed: {message}")]
    Transport { message: String },
}

impl FormError {
    /// Error for a failed submission outcome; `None` on success
    pub fn from_outcome(outcome: &SubmissionOutcome) -> Option<Self> {
        match outcome {
            SubmissionOutcome::Success { .. } => None,
            SubmissionOutcome::ServerRejection { message } => Some(FormError::ServerRejection {
                message: message
                    .clone()
                    .unwrap_or_else(|| REJECTION_FALLBACK.to_string()),
            }),
            SubmissionOutcome::TransportError { .. } => Some(FormError::Transport {
                message: NETWORK_ERROR_MESSAGE.to_string(),
            }),
        }
    }

    /// Text shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation { .. } => crate::form::VALIDATION_TOAST.to_string(),
            FormError::ServerRejection { message } | FormError::Transport { message } => {
                message.clone()
            }
        }
    }
}

/// Low-level failure talking to the submission endpoint
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_uses_fallback_message() {
        let err = FormError::from_outcome(&SubmissionOutcome::ServerRejection { message: None });
        assert_eq!(
            err,
            Some(FormError::ServerRejection {
                message: REJECTION_FALLBACK.to_string()
            })
        );
    }

    #[test]
    fn test_transport_hides_detail() {
        let err = FormError::from_outcome(&SubmissionOutcome::TransportError {
            detail: "connection refused".to_string(),
        })
        .unwrap();
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_success_is_not_an_error() {
        let outcome = SubmissionOutcome::Success {
            message: None,
            redirect: None,
        };
        assert!(FormError::from_outcome(&outcome).is_none());
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = FormError::Validation {
            fields: vec!["clarity".to_string(), "engagement".to_string()],
        };
        assert_eq!(err.to_string(), "invalid or missing fields: clarity, engagement");
    }
}
