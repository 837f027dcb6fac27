use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::wire::{GenerationOutcome, GenerationRequest};

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("vibe_uigen=debug,info")
            } else {
                EnvFilter::try_new("vibe_uigen=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .compact(),
        )
        .try_init()?;
    Ok(())
}

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

#[derive(Serialize)]
struct Saved<'a, T: Serialize> {
    tx: Uuid,
    saved_at: DateTime<Utc>,
    #[serde(flatten)]
    body: &'a T,
}

pub fn tx_dir(root: &Path, artifacts_dir: &str, tx: Uuid) -> PathBuf {
    root.join(artifacts_dir).join("tx").join(tx.to_string())
}

/// Write the request and/or outcome of one run under `<root>/<artifacts_dir>/tx/<tx>/`.
pub fn save_run(
    root: &Path,
    artifacts_dir: &str,
    tx: Uuid,
    req: &GenerationRequest,
    outcome: &GenerationOutcome,
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(root, artifacts_dir, tx);
    let mut request_path = None;
    let mut response_path = None;

    if save_request || save_response {
        fs::create_dir_all(&dir)?;
    }

    if save_request {
        let p = dir.join("request.json");
        fs::write(&p, to_string_pretty(&Saved { tx, saved_at: Utc::now(), body: req })?)?;
        request_path = Some(p);
    }

    if save_response {
        let p = dir.join("result.json");
        fs::write(&p, to_string_pretty(&Saved { tx, saved_at: Utc::now(), body: outcome })?)?;
        response_path = Some(p);
    }

    Ok(SavedPaths { dir, request: request_path, response: response_path })
}

pub fn print_saved_paths(saved: &SavedPaths) {
    eprintln!("debug: artifacts directory: {}", saved.dir.display());
    match &saved.request {
        Some(p) => eprintln!("debug: request saved at: {}", p.display()),
        None => eprintln!("debug: request not saved (flag off)"),
    }
    match &saved.response {
        Some(p) => eprintln!("debug: result saved at: {}", p.display()),
        None => eprintln!("debug: result not saved (flag off)"),
    }
}
