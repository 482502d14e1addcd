//! Multipart HTTP client for the submission endpoint

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{SubmissionOutcome, SubmissionPayload, SubmitResponse, Submitter};
use crate::config::EndpointConfig;
use crate::error::SubmitError;

/// Posts payloads as multipart form data and reads the JSON verdict
pub struct HttpSubmitter {
    client: reqwest::Client,
    url: String,
}

impl HttpSubmitter {
    /// Build a client for the configured endpoint
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(endpoint.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;
        let url = endpoint.submit_url()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL requests are sent to
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, SubmitError> {
        let form = payload
            .fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });

        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The endpoint answers with JSON for 4xx/5xx as well, so the body decides
        serde_json::from_str(&body).map_err(|source| SubmitError::Decode {
            status: status.as_u16(),
            source,
        })
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmissionOutcome {
        tracing::info!(
            attempt = %payload.attempt,
            url = %self.url,
            fields = payload.fields.len(),
            "Submitting feedback"
        );

        match self.post(payload).await {
            Ok(response) => {
                tracing::debug!(
                    attempt = %payload.attempt,
                    success = response.success,
                    "Submission response received"
                );
                response.into_outcome()
            }
            Err(err) => {
                tracing::warn!(attempt = %payload.attempt, error = %err, "Submission failed");
                SubmissionOutcome::TransportError {
                    detail: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_joins_base_and_path() {
        let endpoint = EndpointConfig {
            base_url: "http://localhost:5000/".to_string(),
            submit_path: "/submit-feedback".to_string(),
            user_agent: "feedback-form-test".to_string(),
        };
        let submitter = HttpSubmitter::new(&endpoint).unwrap();
        assert_eq!(submitter.url(), "http://localhost:5000/submit-feedback");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) is closed on test machines; connect fails fast
        let submitter =
            HttpSubmitter::with_client(reqwest::Client::new(), "http://127.0.0.1:9/submit-feedback");
        let payload = SubmissionPayload {
            attempt: uuid::Uuid::new_v4(),
            fields: vec![("clarity".to_string(), "4".to_string())],
        };

        let outcome = submitter.submit(&payload).await;

        assert!(matches!(outcome, SubmissionOutcome::TransportError { .. }));
    }
}
