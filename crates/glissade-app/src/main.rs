//! glissade scenario replay.
//!
//! Loads a TOML scenario (page geometry, configuration, timed input),
//! drives the scroll engine on a simulated clock, and prints every style
//! command it emits.
//!
//! Usage:
//!   cargo run -p glissade-app -- [scenario.toml] [--json] [--debug]
//!   GLISSADE_SCENARIO=demos/landing.toml cargo run -p glissade-app

mod printer;
mod replay;
mod scenario;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use printer::OutputFormat;
use scenario::Scenario;

const DEFAULT_SCENARIO: &str = "demos/landing.toml";

struct Args {
    /// Scenario file to replay.
    path: Option<PathBuf>,
    /// Print JSON instead of the command listing.
    json: bool,
    /// Force the engine's per-update diagnostics on.
    debug: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        path: None,
        json: false,
        debug: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => args.json = true,
            "--debug" => args.debug = true,
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: glissade-replay [scenario.toml] [--json] [--debug]");
                std::process::exit(1);
            },
            path => args.path = Some(PathBuf::from(path)),
        }
    }
    args
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let path = args
        .path
        .or_else(|| std::env::var("GLISSADE_SCENARIO").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENARIO));

    let mut scenario = Scenario::load(&path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;
    if args.debug {
        scenario.config.debug = true;
    }
    log::info!(
        "Replaying '{}' ({:?}, {} events)",
        scenario.name,
        scenario.mode,
        scenario.events.len()
    );

    let outcome = replay::run(&scenario).context("replay failed")?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    printer::print(&outcome, format, &mut out)?;

    Ok(())
}
