use serde::{Deserialize, Serialize};
use serde_json::Value;

/// ========================================
/// Generation request/result types
/// ========================================

/// Opaque, provider-authored layout plan. Forwarded as-is, never validated.
pub type Plan = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    New,
    Edit,
}

/// Which adapter produced a result. A result never mixes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub current_code: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, current_code: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            current_code: current_code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub plan: Plan,
    pub generated_code: String,
    pub explanation: String,
}

/// A result plus how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub mode: Mode,
    pub route: Route,
    pub provider: String,
    pub result: GenerationResult,
}
