use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use fixed_wing_sim::config::{load_scenario, Scenario};
use fixed_wing_sim::control::ScriptedPilot;
use fixed_wing_sim::io::{csv, json, FlightSummary, Telemetry};
use fixed_wing_sim::physics::atmosphere;
use fixed_wing_sim::sim::{simulate_with, EventKind, Flight};

/// Point-mass fixed-wing flight simulator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario JSON (aircraft, sim settings, control limits, script)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Integration timestep override, s
    #[arg(long)]
    dt: Option<f64>,

    /// Simulated duration override, s
    #[arg(long)]
    duration: Option<f64>,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the flight summary and events as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder().filter_level(level).parse_default_env().init();

    let mut scenario = match &args.config {
        Some(path) => load_scenario(path).with_context(|| format!("loading {}", path.display()))?,
        None => Scenario::default(),
    };
    if let Some(dt) = args.dt {
        scenario.sim.dt = dt;
    }
    if let Some(duration) = args.duration {
        scenario.sim.max_time = duration;
    }
    scenario.validate().context("invalid command-line overrides")?;

    let mut pilot = ScriptedPilot::new(scenario.script_commands());
    info!("Script has {} commands", pilot.remaining());

    let flight = simulate_with(&scenario.aircraft, &scenario.sim, &scenario.limits, &mut pilot);
    let summary = FlightSummary::from_flight(&flight);

    print_report(&scenario, &flight, &summary);

    if let Some(path) = &args.csv {
        csv::write_trajectory_file(path, &flight.samples)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Trajectory written to {}", path.display());
    }
    if let Some(path) = &args.json {
        json::write_summary_file(path, &flight, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}

fn print_report(scenario: &Scenario, flight: &Flight, summary: &FlightSummary) {
    let ac = &scenario.aircraft;
    let rule = "─".repeat(66);

    println!();
    println!("====================================================================");
    println!("  FIXED-WING FLIGHT SIMULATION: {}", ac.name);
    println!("====================================================================");
    println!();
    println!("  Aircraft");
    println!("  {rule}");
    println!(
        "  Mass:          {:>8.0} kg    Weight:       {:>8.0} N",
        ac.mass,
        ac.weight()
    );
    println!(
        "  Wing area:     {:>8.1} m^2   Aspect ratio: {:>8.2}",
        ac.wing_area,
        ac.aspect_ratio()
    );
    println!(
        "  Engine:        {:>8.0} W     Prop dia:     {:>8.3} m",
        ac.engine_power, ac.prop_diameter
    );
    println!(
        "  Stall alpha:   {:>8.1} deg   Stall gap:    {:>8.4}",
        ac.alpha_cl_max,
        ac.stall_gap()
    );
    println!();

    println!("  Flight Events");
    println!("  {rule}");
    if flight.events.is_empty() {
        println!("  (none)");
    }
    for e in &flight.events {
        let label = match e.kind {
            EventKind::Liftoff => "LIFTOFF".to_string(),
            EventKind::Touchdown { sink_rate } => format!("TOUCHDOWN sink={sink_rate:.2}m/s"),
            EventKind::Stall => "STALL".to_string(),
            EventKind::StallRecovery => "RECOVERY".to_string(),
            EventKind::Crash { altitude } => format!("CRASH alt={altitude:.1}m"),
            EventKind::Reset => "RESET".to_string(),
        };
        println!(
            "  {:<24} t={:>6.1}s   alt={:>7.1}m   v={:>6.1}m/s",
            label,
            e.time,
            e.state.altitude(),
            e.state.airspeed()
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  {rule}");
    println!(
        "  Max altitude:  {:>8.1} m   at {:.1} s",
        summary.max_altitude, summary.max_altitude_time
    );
    println!("  Max airspeed:  {:>8.1} m/s", summary.max_airspeed);
    println!("  Max climb:     {:>8.2} m/s", summary.max_climb_rate);
    println!("  Max range:     {:>8.0} m", summary.max_range);
    println!(
        "  Density at max alt: {:.4} kg/m^3",
        atmosphere(summary.max_altitude).density
    );
    println!();

    println!("  Trajectory");
    println!("  {rule}");
    println!(
        "  {:>7}  {:>5}  {:>5}  {:>5}  {:>4}  {:>7}  {:>7}  {:>8}",
        "t (s)", "thr%", "alpha", "bank", "flap", "v (m/s)", "vz", "alt (m)"
    );
    println!("  {}", "─".repeat(62));

    let sample_interval = (flight.samples.len() / 30).max(1);
    let last = flight.samples.len().saturating_sub(1);
    for (i, s) in flight.samples.iter().enumerate() {
        if i % sample_interval != 0 && i != last {
            continue;
        }
        let t = Telemetry::from_state(&s.state);
        println!(
            "  {:>7.2}  {:>5.0}  {:>5.1}  {:>5.1}  {:>4.0}  {:>7.1}  {:>7.2}  {:>8.1}",
            s.elapsed, t.throttle_pct, t.alpha, t.bank, t.flap, t.airspeed, t.climb_rate, t.altitude
        );
    }

    println!();
    println!(
        "  Simulation: {} ticks, dt={} s",
        flight.samples.len().saturating_sub(1),
        scenario.sim.dt
    );
    println!("====================================================================");
    println!();
}
