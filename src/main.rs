use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use highlight_overlay::cli::{format_report, CliArgs, RunSettings};
use highlight_overlay::{OverlayConfig, Scenario};

fn run_file(path: &std::path::Path, settings: RunSettings) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    let scenario = Scenario::from_yaml(&content)
        .with_context(|| format!("Invalid scenario {}", path.display()))?;
    let report = scenario
        .run(settings.policy)
        .with_context(|| format!("Failed to evaluate {}", path.display()))?;
    tracing::debug!(file = %path.display(), case = ?report.case, "Evaluated scenario");
    Ok(format_report(&report, settings.format)?)
}

fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();
    let _log_guard = highlight_overlay::tracing::init(args.log_level());

    let config = match &args.config {
        Some(path) => OverlayConfig::load_from(path),
        None => OverlayConfig::load(),
    };
    let settings = args.settings(&config);
    tracing::debug!(?settings, "Resolved settings");

    let mut failed = false;
    for path in &args.scenarios {
        match run_file(path, settings) {
            Ok(output) => print!("{}", output),
            Err(e) => {
                tracing::error!("{:#}", e);
                eprintln!("error: {:#}", e);
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
