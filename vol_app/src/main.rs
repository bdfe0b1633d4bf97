//! Headless volume viewer
//!
//! Builds a viewer session, replays an interaction script and logs
//! what the views submit to the GPU.
//!
//! `cargo run --release --bin vol_app -- --script session.txt -v`

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod app;
mod args;
mod config;
mod upload_worker;

use app::{script::parse_script, Session};
use config::Config;
use upload_worker::UploadWorker;

fn init_logging(verbosity: u64) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "vol_app={default_level},volview_lib={default_level}"
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn main() -> Result<()> {
    let args = args::get_command().get_matches();
    let cfg = Config::from_args(&args)?;

    init_logging(cfg.verbosity);
    tracing::debug!(?cfg, "Configuration");

    let script_name = args::script_name(cfg.script.as_deref().map(|p| p.as_os_str()));
    let text = match &cfg.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read script {}", path.display()))?,
        None => app::defaults::DEMO_SCRIPT.to_string(),
    };
    let commands = parse_script(&text).with_context(|| format!("Script {script_name}"))?;
    tracing::info!(script = %script_name, commands = commands.len(), "Script parsed");

    let mut session = Session::new(&cfg)?;
    let worker = UploadWorker::start(session.snapshot_reader(), session.color_maps().clone());

    session.paint_dirty();
    session.run(&commands)?;

    let mut reports = worker.drain();
    tracing::debug!(reports = reports.len(), "Worker caught up");
    tracing::info!(
        plane = ?session.hub().clipping_plane().equation(),
        gradient = %session.hub().gradient().method(),
        "Final state"
    );

    // Dropping the session disconnects the worker
    let summary = session.finish();
    reports.extend(worker.join()?);

    if let Some(last) = reports.last() {
        tracing::info!(
            revision = last.revision,
            color_map = %last.color_map,
            visible = last.visible_entries,
            "Last lookup table"
        );
    }
    println!("{summary}");
    Ok(())
}
