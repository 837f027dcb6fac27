use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::{http, parse_plan, Provider};
use crate::errors::{FailureKind, VibeError};
use crate::wire::Plan;

const NAME: &str = "groq";

/// Groq's OpenAI-compatible chat endpoint. The prompt goes out as a single
/// user message with no system scaffolding.
pub struct Groq {
    model: String,
    api_key: String,
    api_base: String,
    client: Client,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

fn request_body(model: &str, prompt: &str, json_mode: bool) -> Value {
    let mut body = json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": prompt
            }
        ]
    });
    if json_mode {
        body["response_format"] = json!({ "type": "json_object" });
    }
    body
}

fn extract_content(text: &str) -> Result<String, VibeError> {
    let parsed: ChatResponse = serde_json::from_str(text).map_err(|e| {
        VibeError::provider(NAME, FailureKind::Other, format!("failed to parse chat response: {e}"))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| VibeError::provider(NAME, FailureKind::Other, "response missing choices[0].message.content"))
}

impl Groq {
    pub fn new(
        model: String,
        api_key: String,
        api_base: String,
        timeout: Duration,
    ) -> Result<Self, VibeError> {
        Ok(Self {
            model,
            api_key,
            api_base,
            client: http::build_client(timeout)?,
        })
    }

    async fn chat(&self, prompt: &str, json_mode: bool) -> Result<String, VibeError> {
        let url = format!("{}/openai/v1/chat/completions", self.api_base.trim_end_matches('/'));
        debug!(provider = NAME, model = %self.model, json_mode, prompt_len = prompt.len(), "POST chat/completions");

        let req = self.client.post(&url).bearer_auth(&self.api_key);
        let text = http::post_json(NAME, req, &request_body(&self.model, prompt, json_mode)).await?;
        extract_content(&text)
    }
}

#[async_trait]
impl Provider for Groq {
    fn name(&self) -> &str {
        NAME
    }

    async fn produce_structured_plan(&self, prompt: &str) -> Result<Plan, VibeError> {
        let content = self.chat(prompt, true).await?;
        parse_plan(NAME, &content)
    }

    async fn produce_text(&self, prompt: &str) -> Result<String, VibeError> {
        self.chat(prompt, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_requests_a_json_object() {
        let body = request_body("llama-3.3-70b-versatile", "plan", true);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "plan");

        let body = request_body("llama-3.3-70b-versatile", "code", false);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn extracts_first_choice_content() {
        let text = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{\"layout\":[]}"}}]}"#;
        assert_eq!(extract_content(text).unwrap(), r#"{"layout":[]}"#);
    }

    #[test]
    fn empty_choices_is_an_error() {
        let err = extract_content(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, VibeError::Provider { kind: FailureKind::Other, .. }));
    }
}
