use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "google")]
    Gemini,
    Groq,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Groq => write!(f, "groq"),
        }
    }
}

/// Fallback choice on the command line; `none` disables fail-over.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackArg {
    Gemini,
    Groq,
    #[value(name = "none")]
    Disabled,
}

impl FallbackArg {
    pub fn kind(self) -> Option<ProviderKind> {
        match self {
            FallbackArg::Gemini => Some(ProviderKind::Gemini),
            FallbackArg::Groq => Some(ProviderKind::Groq),
            FallbackArg::Disabled => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vibe_uigen", version, about = "Turn a UI instruction into a layout plan and React component code")]
pub struct Args {
    /// What to build or change.
    #[arg(long)]
    pub prompt: String,

    /// Existing component code to edit instead of starting fresh.
    #[arg(long)]
    pub current_code_file: Option<String>,

    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub root: Option<String>,

    #[arg(long, value_enum)]
    pub primary: Option<ProviderKind>,

    #[arg(long, value_enum)]
    pub fallback: Option<FallbackArg>,

    /// Write the generated code to this file.
    #[arg(long)]
    pub out: Option<String>,

    /// Print the outcome as JSON instead of the terminal view.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub save_request: bool,

    #[arg(long, default_value_t = false)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Spinner while waiting on providers; `--progress false` turns it off.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let args = Args::try_parse_from(["vibe_uigen", "--prompt", "create a login form"]).unwrap();
        assert_eq!(args.prompt, "create a login form");
        assert!(args.primary.is_none());
        assert!(args.fallback.is_none());
        assert!(args.progress);
        assert!(!args.json);
    }

    #[test]
    fn parses_provider_choices() {
        let args = Args::try_parse_from([
            "vibe_uigen", "--prompt", "x", "--primary", "groq", "--fallback", "none",
        ])
        .unwrap();
        assert_eq!(args.primary, Some(ProviderKind::Groq));
        assert_eq!(args.fallback.and_then(FallbackArg::kind), None);

        let args = Args::try_parse_from(["vibe_uigen", "--prompt", "x", "--primary", "google"]).unwrap();
        assert_eq!(args.primary, Some(ProviderKind::Gemini));
    }

    #[test]
    fn progress_can_be_switched_off() {
        let args = Args::try_parse_from(["vibe_uigen", "--prompt", "x", "--progress", "false"]).unwrap();
        assert!(!args.progress);
    }

    #[test]
    fn prompt_is_required() {
        assert!(Args::try_parse_from(["vibe_uigen"]).is_err());
    }
}
