//! Gemini API client struct, request building, and response parsing.

use crate::{AiError, ProtocolError, Turn};

use super::config::GeminiConfig;

const REPLY_PATH: &str = "candidates[0].content.parts[0].text";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    /// Build a client. Uses reqwest's default timeouts.
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("kokoro/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the JSON request body: every prior turn verbatim, then the new
    /// user text as the final `user` block.
    pub(crate) fn build_request_body(
        &self,
        history: &[Turn],
        new_user_text: &str,
    ) -> serde_json::Value {
        let mut contents: Vec<serde_json::Value> = history
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role().as_str(),
                    "parts": [{ "text": turn.content() }]
                })
            })
            .collect();

        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{ "text": new_user_text }]
        }));

        serde_json::json!({ "contents": contents })
    }

    /// Extract the first candidate's first text part.
    pub(crate) fn parse_response(&self, json: &serde_json::Value) -> Result<String, AiError> {
        let candidates = json["candidates"].as_array().filter(|c| !c.is_empty());

        let Some(first) = candidates.and_then(|c| c.first()) else {
            // Safety-blocked prompts come back with feedback and no candidates.
            if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
                return Err(ProtocolError::Blocked(reason.to_string()).into());
            }
            return Err(ProtocolError::MissingField(REPLY_PATH).into());
        };

        first["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProtocolError::MissingField(REPLY_PATH).into())
    }
}

/// Map a non-2xx status and its body to a protocol error.
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> ProtocolError {
    let message = error_message(body);
    let code = status.as_u16();

    let auth_rejected = status == reqwest::StatusCode::UNAUTHORIZED
        || status == reqwest::StatusCode::FORBIDDEN
        || (status == reqwest::StatusCode::BAD_REQUEST && body.contains("API_KEY_INVALID"));

    if auth_rejected {
        ProtocolError::Auth {
            status: code,
            body: message,
        }
    } else {
        ProtocolError::Status {
            status: code,
            body: message,
        }
    }
}

/// Pull `error.message` out of a Google API error body, falling back to the
/// raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
