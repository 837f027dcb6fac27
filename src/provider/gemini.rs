use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{http, parse_plan, Provider};
use crate::errors::{FailureKind, VibeError};
use crate::wire::Plan;

const NAME: &str = "gemini";

pub struct Gemini {
    model: String,
    api_key: String,
    api_base: String,
    client: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Deserialize)]
struct PartOut {
    #[serde(default)]
    text: String,
}

fn request_body(prompt: &str, json_mode: bool) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: prompt }],
        }],
        generation_config: json_mode.then_some(GenerationConfig {
            response_mime_type: "application/json",
        }),
    }
}

/// Concatenated text of the first candidate.
fn extract_text(body: &str) -> Result<String, VibeError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        VibeError::provider(NAME, FailureKind::Other, format!("response parse error: {e}"))
    })?;

    let content = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| VibeError::provider(NAME, FailureKind::Other, "empty candidates"))?;

    Ok(content.parts.into_iter().map(|p| p.text).collect())
}

impl Gemini {
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

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String, VibeError> {
        let url = self.url();
        debug!(provider = NAME, model = %self.model, json_mode, prompt_len = prompt.len(), "POST generateContent");

        let req = self.client.post(&url).header("x-goog-api-key", &self.api_key);
        let body = http::post_json(NAME, req, &request_body(prompt, json_mode)).await?;
        extract_text(&body)
    }
}

#[async_trait]
impl Provider for Gemini {
    fn name(&self) -> &str {
        NAME
    }

    async fn produce_structured_plan(&self, prompt: &str) -> Result<Plan, VibeError> {
        let text = self.generate(prompt, true).await?;
        parse_plan(NAME, &text)
    }

    async fn produce_text(&self, prompt: &str) -> Result<String, VibeError> {
        self.generate(prompt, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_mode_sets_response_mime_type() {
        let v = serde_json::to_value(request_body("plan it", true)).unwrap();
        assert_eq!(
            v,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "plan it"}]}],
                "generationConfig": {"responseMimeType": "application/json"}
            })
        );

        let v = serde_json::to_value(request_body("explain", false)).unwrap();
        assert!(v.get("generationConfig").is_none());
    }

    #[test]
    fn url_joins_base_and_model() {
        let g = Gemini::new(
            "gemini-3-flash-preview".into(),
            "k".into(),
            "https://generativelanguage.googleapis.com/".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            g.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn extracts_and_joins_candidate_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"const App"},{"text":" = () => null;"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "const App = () => null;");
    }

    #[test]
    fn missing_candidates_is_a_non_quota_error() {
        let err = extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, VibeError::Provider { kind: FailureKind::Other, .. }));
        assert!(extract_text("<html>").is_err());
    }
}
