use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::ProviderKind;
use crate::config::{Config, Endpoint};
use crate::errors::VibeError;
use crate::wire::Plan;

pub mod gemini;
pub mod groq;
pub mod http;

/// Capability-uniform access to one generative backend.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Ask for JSON output and parse it. A body that is not JSON is `PlanParse`.
    async fn produce_structured_plan(&self, prompt: &str) -> Result<Plan, VibeError>;

    /// Ask for free-form text and return it untouched.
    async fn produce_text(&self, prompt: &str) -> Result<String, VibeError>;
}

pub type DynProvider = Arc<dyn Provider>;

/// Strict JSON parse of a structured-output body.
pub fn parse_plan(provider: &str, text: &str) -> Result<Plan, VibeError> {
    serde_json::from_str(text.trim()).map_err(|source| VibeError::PlanParse {
        provider: provider.to_string(),
        source,
    })
}

fn api_key(endpoint: &Endpoint) -> Result<String, VibeError> {
    match std::env::var(&endpoint.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(VibeError::Config(format!(
            "{} env var is not set",
            endpoint.api_key_env
        ))),
    }
}

pub fn make_provider(kind: ProviderKind, cfg: &Config) -> Result<DynProvider, VibeError> {
    let ep = cfg.endpoint(kind);
    let key = api_key(&ep)?;
    match kind {
        ProviderKind::Gemini => Ok(Arc::new(gemini::Gemini::new(
            ep.model,
            key,
            ep.base_url,
            ep.timeout,
        )?)),
        ProviderKind::Groq => Ok(Arc::new(groq::Groq::new(
            ep.model,
            key,
            ep.base_url,
            ep.timeout,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_plan_accepts_any_json_value() {
        assert_eq!(parse_plan("gemini", " {\"layout\":\"Row\"}\n").unwrap(), json!({"layout": "Row"}));
        assert_eq!(parse_plan("gemini", "[1,2]").unwrap(), json!([1, 2]));
        assert_eq!(parse_plan("gemini", "\"Card\"").unwrap(), json!("Card"));
    }

    #[test]
    fn parse_plan_rejects_fenced_or_prose_bodies() {
        let err = parse_plan("groq", "```json\n{}\n```").unwrap_err();
        assert!(matches!(err, VibeError::PlanParse { ref provider, .. } if provider == "groq"));
        assert!(!err.is_quota());
        assert!(parse_plan("groq", "Here is your plan").is_err());
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let mut cfg = Config::default();
        cfg.groq.api_key_env = Some("VIBE_UIGEN_TEST_UNSET_KEY".into());
        let err = make_provider(ProviderKind::Groq, &cfg).err().unwrap();
        assert!(matches!(err, VibeError::Config(ref m) if m.contains("VIBE_UIGEN_TEST_UNSET_KEY")));
    }
}
