//! Plan → code → explanation pipeline with a single quota-triggered fail-over.
//!
//! A run first goes through the primary provider. If any primary call fails with a
//! quota classification, the whole sequence restarts from the planning stage on the
//! fallback provider; nothing produced by the primary is reused. Every other error,
//! and any error from the fallback, is returned as-is.

use std::fmt;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::VibeError;
use crate::prompt;
use crate::provider::{self, DynProvider, Provider};
use crate::sanitize;
use crate::whitelist::ComponentWhitelist;
use crate::wire::{GenerationOutcome, GenerationRequest, GenerationResult, Mode, Route};

/// Default trimmed-length threshold above which current code counts as a prior UI.
pub const EDIT_THRESHOLD: usize = 100;

/// Stages of one run, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    PlanRequested,
    PlanReceived,
    CodeRequested,
    CodeReceived,
    ExplanationRequested,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::PlanRequested => "plan_requested",
            Stage::PlanReceived => "plan_received",
            Stage::CodeRequested => "code_requested",
            Stage::CodeReceived => "code_received",
            Stage::ExplanationRequested => "explanation_requested",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Heuristic only: long enough trimmed code is treated as a UI worth preserving.
pub fn detect_mode(current_code: &str, threshold: usize) -> Mode {
    if current_code.trim().chars().count() > threshold {
        Mode::Edit
    } else {
        Mode::New
    }
}

pub struct Orchestrator {
    primary: DynProvider,
    fallback: Option<DynProvider>,
    whitelist: ComponentWhitelist,
    edit_threshold: usize,
}

impl Orchestrator {
    pub fn new(
        primary: DynProvider,
        fallback: Option<DynProvider>,
        whitelist: ComponentWhitelist,
    ) -> Self {
        Self {
            primary,
            fallback,
            whitelist,
            edit_threshold: EDIT_THRESHOLD,
        }
    }

    pub fn with_edit_threshold(mut self, threshold: usize) -> Self {
        self.edit_threshold = threshold;
        self
    }

    /// Build both adapters from config. A fallback that cannot be constructed
    /// (e.g. missing key) is dropped with a warning; the primary must succeed.
    pub fn from_config(cfg: &Config) -> Result<Self, VibeError> {
        let primary = provider::make_provider(cfg.primary, cfg)?;
        let fallback = match cfg.fallback.filter(|k| *k != cfg.primary) {
            Some(kind) => match provider::make_provider(kind, cfg) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(fallback = %kind, error = %e, "fallback provider unavailable; running without fail-over");
                    None
                }
            },
            None => None,
        };
        Ok(Self::new(primary, fallback, cfg.whitelist.clone()).with_edit_threshold(cfg.edit_threshold))
    }

    pub async fn generate(
        &self,
        prompt: &str,
        current_code: &str,
    ) -> Result<GenerationResult, VibeError> {
        let req = GenerationRequest::new(prompt, current_code);
        Ok(self.generate_with_report(&req).await?.result)
    }

    pub async fn generate_with_report(
        &self,
        req: &GenerationRequest,
    ) -> Result<GenerationOutcome, VibeError> {
        if req.prompt.trim().is_empty() {
            return Err(VibeError::EmptyPrompt);
        }

        let mode = detect_mode(&req.current_code, self.edit_threshold);
        info!(?mode, primary = self.primary.name(), "generation started");

        let err = match self.run_flow(self.primary.as_ref(), Route::Primary, req, mode).await {
            Ok(result) => return Ok(self.outcome(mode, Route::Primary, self.primary.as_ref(), result)),
            Err(e) => e,
        };

        let fallback = match (&self.fallback, err.is_quota()) {
            (Some(fb), true) => fb,
            _ => return Err(err),
        };

        warn!(
            primary = self.primary.name(),
            fallback = fallback.name(),
            error = %err,
            "primary provider out of quota; retrying on fallback"
        );
        let result = self.run_flow(fallback.as_ref(), Route::Fallback, req, mode).await?;
        Ok(self.outcome(mode, Route::Fallback, fallback.as_ref(), result))
    }

    fn outcome(
        &self,
        mode: Mode,
        route: Route,
        provider: &dyn Provider,
        result: GenerationResult,
    ) -> GenerationOutcome {
        info!(?mode, ?route, provider = provider.name(), code_len = result.generated_code.len(), "generation finished");
        GenerationOutcome {
            mode,
            route,
            provider: provider.name().to_string(),
            result,
        }
    }

    async fn run_flow(
        &self,
        provider: &dyn Provider,
        route: Route,
        req: &GenerationRequest,
        mode: Mode,
    ) -> Result<GenerationResult, VibeError> {
        let name = provider.name();

        debug!(stage = %Stage::PlanRequested, provider = name, ?route);
        let planner = prompt::planner_prompt(&req.prompt, &req.current_code, mode, &self.whitelist);
        let plan = provider.produce_structured_plan(&planner).await?;
        debug!(stage = %Stage::PlanReceived, provider = name, ?route);

        debug!(stage = %Stage::CodeRequested, provider = name, ?route);
        let generator = prompt::generator_prompt(&plan, &req.current_code, mode, &self.whitelist);
        let raw = provider.produce_text(&generator).await?;
        let (generated_code, dropped) = sanitize::sanitize_with_report(&raw);
        for w in &dropped {
            debug!(provider = name, "sanitizer {w}");
        }
        debug!(stage = %Stage::CodeReceived, provider = name, ?route, dropped = dropped.len());

        debug!(stage = %Stage::ExplanationRequested, provider = name, ?route);
        let explanation = match route {
            Route::Primary => {
                provider
                    .produce_text(&prompt::explanation_prompt(&req.prompt))
                    .await?
            }
            Route::Fallback => prompt::fallback_explanation(&req.prompt),
        };
        debug!(stage = %Stage::Done, provider = name, ?route);

        Ok(GenerationResult {
            plan,
            generated_code,
            explanation,
        })
    }
}
