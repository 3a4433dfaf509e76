//! `ncr` — voter turnout intention across National Capital Region cities.
//!
//! Loads `demographic.csv` and `turnout.csv` from the data directory,
//! allocates a turnout-weighted population, scatters it over the grid, and
//! prints how many agents intend to vote after every tick.
//!
//! Run with:
//!   cargo run -p ncr --release -- --agents 500 --ticks 50

mod cli;
mod log;
mod settings;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use vt_agent::AgentStoreBuilder;
use vt_behavior::TurnoutBehavior;
use vt_population::{allocate, load_tables};
use vt_sim::{Sim, SimBuilder, SimObserver, TickReport, TurnoutRecorder};

use cli::Cli;
use settings::Settings;

// ── Wandering ─────────────────────────────────────────────────────────────────

/// Tick loop that moves every agent one random step after each commit.
fn run_wandering<O: SimObserver>(sim: &mut Sim<TurnoutBehavior>, observer: &mut O) -> Result<()> {
    let stop = sim.stop_handle();
    observer.on_sim_start(&sim.report());
    while sim.current_tick < sim.config.end_tick() && !stop.is_stopped() {
        let now = sim.current_tick;
        observer.on_tick_start(now);
        let report = sim.step()?;
        let ids: Vec<_> = sim.agents.agent_ids().collect();
        for id in ids {
            sim.move_agent(id)?;
        }
        observer.on_tick_end(now, &report);
    }
    observer.on_sim_end(sim.current_tick);
    Ok(())
}

fn print_row(r: &TickReport) {
    println!(
        "{:>6}  {:>9}  {:>10}  {:>6}  {:>6.1}%",
        r.tick.0,
        r.will_vote,
        r.registered,
        r.total_agents,
        r.will_vote_share() * 100.0
    );
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply(&cli.run);
    log::init(settings.log_level.as_deref())?;

    let config = settings.sim.clone();
    config.validate()?;
    let behavior = settings.behavior.to_behavior()?;

    println!("=== ncr — voter turnout model ===");
    println!(
        "Agents: {}  |  Grid: {}x{} {}  |  Ticks: {}  |  Seed: {}",
        config.agent_count,
        config.grid_width,
        config.grid_height,
        config.topology,
        config.total_ticks,
        config.seed
    );
    println!();

    // 1. Load tables.
    let tables = load_tables(&settings.data_dir)
        .with_context(|| format!("Failed to load tables from {}", settings.data_dir.display()))?;
    println!(
        "Loaded {} demographic rows across {} cities, {} turnout rows",
        tables.demographic.len(),
        tables.cities().len(),
        tables.turnout.len()
    );

    // 2. Allocate and summarise.
    let allocation = allocate(&tables, config.agent_count)?;
    for (city, n) in allocation.agents_by_city() {
        println!("  {city:<16} {n:>6} agents");
    }
    if allocation.shortfall() > 0 {
        println!("  ({} agents lost to rounding)", allocation.shortfall());
    }
    println!();

    // 3. Build and run.
    let (agents, rngs) = AgentStoreBuilder::new(allocation.profiles(), config.seed).build();
    let mut sim = SimBuilder::new(config, agents, rngs, behavior).build()?;
    let mut recorder = TurnoutRecorder::default();

    println!("{:>6}  {:>9}  {:>10}  {:>6}  {:>7}", "tick", "will_vote", "registered", "total", "share");

    let t0 = Instant::now();
    if cli.run.wander {
        run_wandering(&mut sim, &mut recorder)?;
    } else {
        sim.run(&mut recorder)?;
    }
    let elapsed = t0.elapsed();

    for r in &recorder.reports {
        print_row(r);
    }
    println!();
    println!("Ran {} ticks in {:.3} s", sim.current_tick.0, elapsed.as_secs_f64());
    Ok(())
}
