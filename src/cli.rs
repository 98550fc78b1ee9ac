//! Command-line argument parsing and report formatting for `overlay`

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{OutputFormat, OverlayConfig};
use crate::error::HighlightError;
use crate::overlay::{HighlightDecoration, OverlapPolicy};
use crate::plan::PaintPlan;
use crate::scenario::ScenarioReport;

/// Compute highlight paint plans for text fragments
#[derive(Parser, Debug)]
#[command(
    name = "overlay",
    version,
    about = "Classify text fragments and compute their highlight overlay parts"
)]
pub struct CliArgs {
    /// Scenario YAML files to evaluate
    #[arg(value_name = "SCENARIOS", required = true)]
    pub scenarios: Vec<PathBuf>,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// How overlapping ranges within one layer are handled
    #[arg(long, value_enum)]
    pub policy: Option<OverlapPolicy>,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings after layering CLI flags over the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub format: OutputFormat,
    pub policy: OverlapPolicy,
}

impl CliArgs {
    pub fn settings(&self, config: &OverlayConfig) -> RunSettings {
        RunSettings {
            format: self.format.unwrap_or(config.output),
            policy: self.policy.unwrap_or_else(|| config.effective_policy()),
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

fn format_decorations(decorations: &[HighlightDecoration]) -> String {
    decorations
        .iter()
        .map(|d| format!("{} {}", d.layer, d.range))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_text(report: &ScenarioReport) -> String {
    let mut out = String::new();
    let title = report.name.as_deref().unwrap_or("fragment");
    let _ = writeln!(out, "{} {}: {:?}", title, report.fragment, report.case);

    match &report.plan {
        PaintPlan::PlainText { range } => {
            let _ = writeln!(out, "  text {}", range);
        }
        PaintPlan::SelectedTextOnly { selection } => {
            let _ = writeln!(out, "  selected {}", selection);
        }
        PaintPlan::FastSelection {
            selection,
            unselected,
        } => {
            for range in unselected {
                let _ = writeln!(out, "  text {}", range);
            }
            let _ = writeln!(out, "  selection {}", selection);
        }
        PaintPlan::FastSpellingGrammar { decorations } => {
            let _ = writeln!(out, "  text {}", report.fragment);
            for decoration in decorations {
                let _ = writeln!(out, "  {} {}", decoration.layer, decoration.range);
            }
        }
        PaintPlan::Overlay { layers, parts } => {
            let names: Vec<String> = layers.iter().map(|l| l.to_string()).collect();
            let _ = writeln!(out, "  layers: {}", names.join(" < "));
            for part in parts {
                let _ = writeln!(
                    out,
                    "  {} {} [{}]",
                    part.range,
                    part.layer,
                    format_decorations(&part.decorations)
                );
            }
        }
    }
    out
}

/// Render a report in the requested format
pub fn format_report(report: &ScenarioReport, format: OutputFormat) -> Result<String, HighlightError> {
    match format {
        OutputFormat::Text => Ok(format_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map(|json| json + "\n")
            .map_err(|e| HighlightError::Scenario(format!("Failed to serialize report: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(report)
            .map_err(|e| HighlightError::Scenario(format!("Failed to serialize report: {}", e))),
    }
}
