use anyhow::Context;
use clap::Parser;
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

use vibe_uigen::cli::Args;
use vibe_uigen::config::Config;
use vibe_uigen::{log, ux, GenerationRequest, Orchestrator};

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };
    if let Some(root) = &args.root {
        cfg.root = root.clone();
    }
    if let Some(primary) = args.primary {
        cfg.primary = primary;
    }
    if let Some(fallback) = args.fallback {
        cfg.fallback = fallback.kind();
    }
    Ok(cfg)
}

fn spinner(enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message("generating UI");
    pb.enable_steady_tick(Duration::from_millis(120));
    Some(pb)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log::init_tracing(args.debug)?;

    let cfg = load_config(&args)?;
    let current_code = match &args.current_code_file {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };

    let orchestrator = Orchestrator::from_config(&cfg)?;
    let req = GenerationRequest::new(args.prompt.clone(), current_code);

    // The spinner would garble JSON on a shared terminal.
    let pb = spinner(args.progress && !args.json);
    let outcome = orchestrator.generate_with_report(&req).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let outcome = outcome.context("generation failed")?;

    let tx = Uuid::new_v4();
    let saved = log::save_run(
        Path::new(&cfg.root),
        &cfg.artifacts_dir,
        tx,
        &req,
        &outcome,
        args.save_request,
        args.save_response,
    )?;
    if args.debug {
        log::print_saved_paths(&saved);
    }

    if let Some(out) = &args.out {
        fs::write(out, &outcome.result.generated_code)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        ux::show_outcome(&outcome);
    }

    Ok(())
}
