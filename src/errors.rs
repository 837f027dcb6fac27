use std::fmt;

use thiserror::Error;

/// How a failed provider call is classified. Only `Quota` triggers fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network trouble, timeouts, 5xx.
    Transient,
    /// Rate limit or quota exhaustion (429, "quota", RESOURCE_EXHAUSTED).
    Quota,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transient => write!(f, "transient"),
            FailureKind::Quota => write!(f, "quota"),
            FailureKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Error, Debug)]
pub enum VibeError {
    #[error("provider error [{provider}/{kind}]: {message}")]
    Provider {
        provider: String,
        kind: FailureKind,
        message: String,
    },
    #[error("plan from {provider} is not valid JSON: {source}")]
    PlanParse {
        provider: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("configuration error: {0}")]
    Config(String),
}

impl VibeError {
    pub fn provider(provider: &str, kind: FailureKind, message: impl Into<String>) -> Self {
        VibeError::Provider {
            provider: provider.to_string(),
            kind,
            message: message.into(),
        }
    }

    pub fn is_quota(&self) -> bool {
        matches!(self, VibeError::Provider { kind: FailureKind::Quota, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_quota_provider_errors_are_quota() {
        assert!(VibeError::provider("gemini", FailureKind::Quota, "429").is_quota());
        assert!(!VibeError::provider("gemini", FailureKind::Transient, "503").is_quota());
        assert!(!VibeError::provider("gemini", FailureKind::Other, "401").is_quota());
        assert!(!VibeError::EmptyPrompt.is_quota());

        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let parse = VibeError::PlanParse { provider: "groq".into(), source };
        assert!(!parse.is_quota());
    }

    #[test]
    fn provider_error_message_names_provider_and_kind() {
        let e = VibeError::provider("groq", FailureKind::Quota, "rate limit reached");
        assert_eq!(e.to_string(), "provider error [groq/quota]: rate limit reached");
    }
}
