//! Instruction → layout plan → React component code, with quota fail-over
//! between two generative backends.
//!
//! The single entry point is [`Orchestrator::generate`]; everything else is
//! plumbing the orchestrator depends on.

pub mod cli;
pub mod config;
pub mod errors;
pub mod log;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod sanitize;
pub mod ux;
pub mod whitelist;
pub mod wire;

pub use errors::{FailureKind, VibeError};
pub use orchestrator::{detect_mode, Orchestrator};
pub use wire::{GenerationOutcome, GenerationRequest, GenerationResult, Mode, Plan, Route};
