//! HTTP chat completion adapter.
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint. Every model
//! tier goes through this one adapter — the model id in the request decides
//! which provider-side model answers.
//!
//! # Safety
//!
//! The shared `reqwest::Client` carries the only timeout this subsystem
//! applies; the pipeline itself never retries a model in place, it
//! escalates to the next one.

use async_trait::async_trait;
use canonica_application::ports::chat_completer::{
    ChatCompleter, CompletionError, CompletionOptions,
};
use canonica_domain::ModelId;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout for completion calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat completer backed by an OpenAI-compatible HTTP endpoint.
pub struct HttpChatCompleter {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl HttpChatCompleter {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

/// Build the request payload for one completion call.
fn request_body(
    model: &ModelId,
    system_prompt: &str,
    user_prompt: &str,
    options: CompletionOptions,
) -> serde_json::Value {
    serde_json::json!({
        "model": model.as_str(),
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_prompt },
        ],
        "temperature": options.temperature,
        "max_tokens": options.max_tokens,
    })
}

/// Extract the completion text from a response payload.
fn extract_content(body: &serde_json::Value) -> Option<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl ChatCompleter for HttpChatCompleter {
    async fn complete(
        &self,
        model: &ModelId,
        system_prompt: &str,
        user_prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, CompletionError> {
        debug!(model = %model, "sending completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body(model, system_prompt, user_prompt, options))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else if e.is_connect() {
                    CompletionError::Connection(e.to_string())
                } else {
                    CompletionError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CompletionError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            return Err(CompletionError::RequestFailed(format!(
                "completion endpoint returned {}",
                status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        extract_content(&body).ok_or_else(|| {
            CompletionError::RequestFailed("response carried no message content".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = request_body(
            &ModelId::new("gpt-5-mini"),
            "system",
            "user",
            CompletionOptions {
                temperature: 0.1,
                max_tokens: 512,
            },
        );
        assert_eq!(body["model"], "gpt-5-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "user");
        assert_eq!(body["max_tokens"], 512);
    }

    #[test]
    fn test_extract_content() {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "hello" } }]
        });
        assert_eq!(extract_content(&body), Some("hello".to_string()));

        let empty = serde_json::json!({ "choices": [] });
        assert_eq!(extract_content(&empty), None);
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let completer = HttpChatCompleter::new("https://api.example.com/v1/", "key");
        assert_eq!(
            completer.endpoint(),
            "https://api.example.com/v1/chat/completions"
        );
    }
}
