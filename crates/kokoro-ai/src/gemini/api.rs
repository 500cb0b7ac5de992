//! ModelClient trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, Credentials, ModelClient, ProtocolError, Turn};

use super::client::{status_error, GeminiClient};

#[async_trait]
impl ModelClient for GeminiClient {
    async fn send(
        &self,
        history: &[Turn],
        new_user_text: &str,
        credentials: &Credentials,
    ) -> Result<String, AiError> {
        let body = self.build_request_body(history, new_user_text);
        let url = self.api_url();

        debug!(
            model = %self.config.model,
            turns = history.len() + 1,
            "Gemini API request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(credentials.token())
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        if !status.is_success() {
            debug!(%status, "Gemini API error response");
            return Err(status_error(status, &text).into());
        }

        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| ProtocolError::Malformed(e.to_string()))?;

        self.parse_response(&json)
    }
}
