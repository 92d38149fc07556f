//! Blocking JSON client for the application intake endpoint.

use std::time::Duration;

use kyc_core::{ApplicationPayload, IntakeGateway, IntakeResponse, SubmissionError};

/// HTTP client posting applications to a single endpoint.
pub struct HttpIntakeClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpIntakeClient {
    /// Builds a client whose requests give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("safari-kyc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| SubmissionError::Network(err.to_string()))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Reuses an existing [`reqwest::blocking::Client`].
    pub fn with_client(client: reqwest::blocking::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl IntakeGateway for HttpIntakeClient {
    fn submit(&self, payload: &ApplicationPayload) -> Result<IntakeResponse, SubmissionError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting application");
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|err| SubmissionError::Network(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| SubmissionError::Network(err.to_string()))?;
        interpret_response(status, &body)
    }
}

/// Turns a status and body into an intake outcome.
///
/// A well-formed `{ success, ... }` body is honoured whatever the status, so
/// a 409 carrying `{"success":false,"message":"Duplicate"}` surfaces the
/// server's message. Anything else is an invalid response.
pub fn interpret_response(status: u16, body: &str) -> Result<IntakeResponse, SubmissionError> {
    match serde_json::from_str::<IntakeResponse>(body) {
        Ok(response) => {
            if !(200..300).contains(&status) && response.success {
                return Err(SubmissionError::InvalidResponse(format!(
                    "status {status} with a success body"
                )));
            }
            Ok(response)
        }
        Err(err) => {
            tracing::warn!(status, error = %err, "Unreadable intake response");
            Err(SubmissionError::InvalidResponse(format!(
                "status {status}: {}",
                truncate(body, 200)
            )))
        }
    }
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_body_is_returned() {
        let response = interpret_response(200, r#"{"success":true,"applicationId":"abc123"}"#)
            .expect("valid response");
        assert_eq!(response, IntakeResponse::accepted("abc123"));
    }

    #[test]
    fn rejection_on_error_status_keeps_server_message() {
        let response = interpret_response(409, r#"{"success":false,"message":"Duplicate"}"#)
            .expect("valid response");
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Duplicate"));
    }

    #[test]
    fn html_error_page_is_invalid() {
        let err = interpret_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SubmissionError::InvalidResponse(msg) if msg.contains("502")));
    }

    #[test]
    fn success_body_with_error_status_is_invalid() {
        assert!(interpret_response(500, r#"{"success":true,"applicationId":"x"}"#).is_err());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
