use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::cli::ProviderKind;
use crate::errors::VibeError;
use crate::whitelist::ComponentWhitelist;

/// Per-backend overrides as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved connection settings for one backend. The key itself is read
/// from `api_key_env` only when the adapter is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
    pub timeout: Duration,
}

impl Endpoint {
    pub fn defaults(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Gemini => Self {
                model: "gemini-3-flash-preview".into(),
                base_url: "https://generativelanguage.googleapis.com".into(),
                api_key_env: "GEMINI_API_KEY".into(),
                timeout: Duration::from_secs(120),
            },
            ProviderKind::Groq => Self {
                model: "llama-3.3-70b-versatile".into(),
                base_url: "https://api.groq.com".into(),
                api_key_env: "GROQ_API_KEY".into(),
                timeout: Duration::from_secs(120),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: String,
    pub primary: ProviderKind,
    pub fallback: Option<ProviderKind>,
    pub gemini: ProviderSettings,
    pub groq: ProviderSettings,
    /// Trimmed length of current code above which a request is an edit.
    pub edit_threshold: usize,
    pub whitelist: ComponentWhitelist,
    pub artifacts_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: ".".into(),
            primary: ProviderKind::Gemini,
            fallback: Some(ProviderKind::Groq),
            gemini: ProviderSettings::default(),
            groq: ProviderSettings::default(),
            edit_threshold: 100,
            whitelist: ComponentWhitelist::default(),
            artifacts_dir: ".vibe".into(),
        }
    }
}

impl Config {
    /// Load a TOML or YAML file (by extension). Absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, VibeError> {
        let text = fs::read_to_string(path).map_err(|e| VibeError::Config(e.to_string()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&text, &ext)
            .map_err(|e| VibeError::Config(format!("{}: {e}", path.display())))
    }

    fn parse(text: &str, ext: &str) -> Result<Self, String> {
        match ext {
            "yaml" | "yml" => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            "toml" | "" => toml::from_str(text).map_err(|e| e.to_string()),
            other => Err(format!("unsupported config extension '.{other}'")),
        }
    }

    /// Overrides from the file win over the backend's defaults.
    pub fn endpoint(&self, kind: ProviderKind) -> Endpoint {
        let overrides = match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Groq => &self.groq,
        };
        let d = Endpoint::defaults(kind);
        Endpoint {
            model: overrides.model.clone().unwrap_or(d.model),
            base_url: overrides.base_url.clone().unwrap_or(d.base_url),
            api_key_env: overrides.api_key_env.clone().unwrap_or(d.api_key_env),
            timeout: overrides
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(d.timeout),
        }
    }
}
