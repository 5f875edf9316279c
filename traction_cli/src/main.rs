//! # Traction CLI
//!
//! Runs a locomotive performance analysis from a JSON input file and prints
//! the adhesion summary, per-gear snapshot and speed-vs-slope table, or the
//! full result as JSON.
//!
//! ```bash
//! traction_cli shunter.json --settings fine.toml
//! traction_cli shunter.json --json > result.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};

use traction_core::calculations::{analyze, AnalysisInput, PerformanceAnalysis};
use traction_core::settings::SimulationSettings;
use traction_core::units::{KiloNewtons, Newtons};

#[derive(Parser)]
#[command(author, version, about = "Locomotive traction and performance analysis")]
struct Cli {
    /// Analysis input (JSON)
    input: PathBuf,

    /// Sweep settings (TOML), overriding any settings in the input
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log sweep details to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut input = load_input(&cli.input)?;
    if let Some(path) = &cli.settings {
        input.settings = load_settings(path)?;
        debug!(path = %path.display(), "settings override applied");
    }

    let analysis = match analyze(&input) {
        Ok(analysis) => analysis,
        Err(err) => {
            eprintln!("Error: {}", err);
            if let Ok(json) = serde_json::to_string_pretty(&err) {
                eprintln!("{}", json);
            }
            anyhow::bail!("analysis failed ({})", err.error_code());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_report(&analysis);
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to init logging. {}", e);
    }
}

fn load_input(path: &Path) -> Result<AnalysisInput> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse analysis input {}", path.display()))
}

fn load_settings(path: &Path) -> Result<SimulationSettings> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    SimulationSettings::from_toml_str(&text)
        .with_context(|| format!("invalid settings in {}", path.display()))
}

fn print_report(analysis: &PerformanceAnalysis) {
    let limit = &analysis.traction_limit;
    println!("Performance analysis: {}", display_label(&analysis.label));
    println!(
        "Track: max slope {:.2} %, max curve {:.2} deg",
        analysis.track.max_slope_percent, analysis.track.max_curve_degree
    );
    println!();
    println!("Traction limit");
    println!(
        "  Generated (peak torque, highest gear): {:>12.1} kN",
        kilonewtons(limit.max_traction_generated_n)
    );
    println!(
        "  Adhesion (slipping):                   {:>12.1} kN",
        kilonewtons(limit.max_traction_slipping_n)
    );
    println!(
        "  Limited by:                            {:>12}",
        if limit.limited_by_slip { "slipping" } else { "engine" }
    );
    println!();
    println!("Max speed per gear (km/h)");
    println!("  {:>8}  {:>10}  {:>10}  {:>10}", "gear", "level", "slope", "curve");
    for gear in &analysis.traction_snapshot {
        println!(
            "  {:>8.2}  {:>10.2}  {:>10.2}  {:>10.2}",
            gear.gear_ratio,
            gear.max_speed_level_kmh,
            gear.max_speed_slope_kmh,
            gear.max_speed_curve_kmh
        );
    }
    println!();
    println!("Speed vs slope with shunting load");
    println!("  {:>8}  {:>14}", "slope %", "max km/h");
    for row in &analysis.speed_vs_slope_table {
        println!("  {:>8.2}  {:>14.2}", row.slope_percent, row.max_speed_kmh);
    }
    println!();
    println!(
        "Curve datasets: {} tractive-effort rows, {} shunting-capability rows \
         (use --json for data)",
        analysis.tractive_effort_curve.len(),
        analysis.shunting_capability_curve.len()
    );
}

fn kilonewtons(force_n: f64) -> f64 {
    KiloNewtons::from(Newtons(force_n)).0
}

fn display_label(label: &str) -> &str {
    if label.is_empty() {
        "(unnamed)"
    } else {
        label
    }
}
