//! Orrery scenario CLI.
//!
//! Runs a built-in scenario and reports sensor access windows.

use clap::Parser;
use orrery_core::Simulator;
use orrery_env::Instant;
use orrery_sim::{scenarios, AccessReport, Runner, RunnerConfig, ScenarioError, ScenarioId};
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Orrery satellite mission simulator
#[derive(Parser, Debug)]
#[command(name = "orrery-sim")]
#[command(about = "Step a satellite scenario and report sensor access windows", long_about = None)]
struct Args {
    /// Scenario to run (loft_sat, constellation, off_nadir, all)
    #[arg(short = 'S', long, default_value = "loft_sat")]
    scenario: String,

    /// Simulated duration in seconds
    #[arg(short, long, default_value = "5700")]
    duration: f64,

    /// Sampling step in seconds
    #[arg(long, default_value = "30")]
    step: f64,

    /// Celestial target (repeatable)
    #[arg(short, long, default_values_t = vec!["Earth".to_string()])]
    target: Vec<String>,

    /// Start instant (RFC 3339)
    #[arg(short, long, default_value = "2020-01-01T00:00:00Z")]
    epoch: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output on stdout
    #[arg(long)]
    json: bool,

    /// Export the report of a single scenario to a JSON file
    #[arg(long)]
    export: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ScenarioError> {
    let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args.scenario.parse().map_err(ScenarioError::InvalidSetting)?]
    };
    if args.export.is_some() && scenarios.len() > 1 {
        return Err(ScenarioError::invalid_setting(
            "--export only supports a single scenario, not 'all'",
        ));
    }

    let epoch: Instant = args.epoch.parse()?;
    let runner = Runner::new(RunnerConfig {
        duration_secs: args.duration,
        step_secs: args.step,
        targets: args.target.clone(),
    });

    if !args.json {
        info!("Orrery Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        info!("Starting scenario: {} ({})", scenario.name(), scenario.description());

        let simulator = Simulator::configure(scenarios::build(scenario, epoch)?)?;
        let summary = runner.run(&simulator)?;
        let report = AccessReport::new(scenario, args.step, summary);

        if !args.json {
            for window in &report.windows {
                info!(
                    "  {} {}/{} -> {}: {} .. {} ({:.0} s)",
                    window.satellite,
                    window.component,
                    window.geometry,
                    window.target,
                    window.start,
                    window.end,
                    window.duration_secs()
                );
            }
            for target in &args.target {
                info!("  total access to {}: {:.0} s", target, report.access_time_secs(target));
            }
        }

        if let Some(path) = &args.export {
            report.write_to_file(path)?;
            info!("Exported {} to {}", scenario.name(), path);
        }

        reports.push(report);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&reports).map_err(std::io::Error::from)?;
        println!("{}", json);
    }

    Ok(())
}
