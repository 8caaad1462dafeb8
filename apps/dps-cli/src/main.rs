use clap::{Parser, Subcommand};
use dps_app::{
    AppResult, RunOptions, RunProgressEvent, RunStage, export, read_replay_file,
    run_service, scenario_service,
};
use dps_sim::{ParameterSet, discretize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "dps-cli")]
#[command(about = "Dynamic process simulator - FOPDT process and PID loop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Print the discrete recurrence coefficients for a parameter set
    Discretize {
        #[arg(long)]
        gain: f64,
        #[arg(long)]
        tau: f64,
        #[arg(long)]
        dead_time: f64,
        /// Sample period
        #[arg(long)]
        period: f64,
    },
    /// Run a scenario
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Override the scenario's tick count
        #[arg(long)]
        ticks: Option<usize>,
        /// Pace ticks at the scenario's wall-clock interval
        #[arg(long)]
        realtime: bool,
        /// Write the full trace as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the full trace as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Check that a replay file parses
    ReplayCheck {
        /// Path to the replay text file
        replay_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Discretize {
            gain,
            tau,
            dead_time,
            period,
        } => cmd_discretize(gain, tau, dead_time, period),
        Commands::Run {
            scenario_path,
            ticks,
            realtime,
            csv,
            json,
        } => cmd_run(
            &scenario_path,
            RunOptions { ticks, realtime },
            csv.as_deref(),
            json.as_deref(),
        ),
        Commands::ReplayCheck { replay_path } => cmd_replay_check(&replay_path),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    println!(
        "  {} ticks, {} scripted events",
        scenario.run.ticks,
        scenario.events.len()
    );
    Ok(())
}

fn cmd_discretize(gain: f64, tau: f64, dead_time: f64, period: f64) -> AppResult<()> {
    let params = ParameterSet::new(gain, tau, dead_time, period)?;
    let c = discretize(&params);
    println!("a1 = {:.6}", c.a1);
    println!("b1 = {:.6}", c.b1);
    println!("b2 = {:.6}", c.b2);
    println!("N  = {}", c.delay);
    println!("m  = {:.6}", c.m);
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    options: RunOptions,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> AppResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    let mut last_emit = Instant::now();
    let response = run_service::run_scenario_file(
        scenario_path,
        &options,
        Some(&mut |event| {
            if event.stage != RunStage::Running
                || options.realtime
                || last_emit.elapsed().as_millis() >= 100
            {
                render_cli_progress(&event);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    let summary = &response.summary;
    println!("✓ Run completed");
    println!("  Ticks attempted: {}", summary.attempted);
    println!("  Ticks accepted:  {}", summary.accepted);
    if summary.holds > 0 {
        println!("  Replay holds:    {}", summary.holds);
    }
    if !summary.blocked.is_empty() {
        println!("  Ticks blocked:   {}", summary.blocked_total());
        for (reason, count) in &summary.blocked {
            println!("    {count:>5}  {reason}");
        }
    }
    if summary.failed_actions > 0 {
        println!("  Failed actions:  {}", summary.failed_actions);
    }

    let frame = response.engine.frame(response.window);
    println!(
        "\nLast {} samples (t = {}..={}):",
        frame.output.len(),
        frame.start,
        frame.t
    );
    println!("  {:>6}  {:>12}  {:>12}  {:>12}", "t", "input", "noise", "output");
    for (i, ((u, n), y)) in frame
        .input
        .iter()
        .zip(frame.noise)
        .zip(frame.output)
        .enumerate()
    {
        println!("  {:>6}  {:>12.6}  {:>12.6}  {:>12.6}", frame.start + i, u, n, y);
    }

    if let Some(display) = response.engine.controller_display() {
        let q = display.coefficients;
        println!("\nController:");
        println!("  q0 = {:.6}  q1 = {:.6}  q2 = {:.6}", q.q0, q.q1, q.q2);
        println!("  set point = {:.6}  error = {:.6}", display.set_point, display.error);
        if let Some(m) = display.manipulated {
            println!("  next input = {m:.6}");
        }
    }

    let history = response.engine.history();
    if let Some(path) = csv {
        export::write_csv(path, history)?;
        println!("✓ Exported {} samples to {}", history.len(), path.display());
    }
    if let Some(path) = json {
        export::write_json(path, history)?;
        println!("✓ Exported {} samples to {}", history.len(), path.display());
    }

    Ok(())
}

fn cmd_replay_check(replay_path: &Path) -> AppResult<()> {
    let samples = read_replay_file(replay_path)?;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    println!("✓ {} samples in {}", samples.len(), replay_path.display());
    println!("  range: {min} .. {max}");
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match event.stage {
        RunStage::Running => {
            let width = 28usize;
            let filled = ((event.fraction_complete() * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            let mut line = format!(
                "\r[{}] {:>6.2}%  tick={}/{}  t={}  elapsed={:.1}s",
                bar,
                event.fraction_complete() * 100.0,
                event.tick,
                event.ticks_total,
                event.t,
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  blocked: {msg}"));
            }
            print!("{line}");
        }
        _ => {
            let mut line = format!(
                "\r{}  elapsed={:.2}s",
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {msg}"));
            }
            print!("{line}");
        }
    }
    let _ = io::stdout().flush();
}
