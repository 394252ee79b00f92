//! Xenofall -- an alien invasion battle simulator.
//!
//! This binary loads a city map from a text file, drops N aliens onto
//! random cities, runs the battle to completion, and prints the
//! destruction announcements followed by the surviving map.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use xenofall::protocol::{format_map, parse_map};
use xenofall::{Simulation, SimulationReport, DEFAULT_MAX_ROUNDS};

/// Run a simulation of a battle of aliens.
#[derive(Debug, Parser)]
#[command(name = "xenofall", version, about)]
struct Args {
    /// Path to the text file containing the map.
    #[arg(short, long)]
    file: String,

    /// Number of aliens placed on the map.
    #[arg(short = 'n', long, default_value_t = 10)]
    aliens: u32,

    /// Seed for the RNG; omit for an entropy seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Round cap.
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: u32,

    /// Emit the report and surviving map as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// JSON output document: the run report plus the surviving map text.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a SimulationReport,
    surviving_map: String,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = fs::read_to_string(&args.file)?;
    let mut map = parse_map(&input)?;

    let mut sim = match args.seed {
        Some(seed) => Simulation::with_seed(seed),
        None => Simulation::new(),
    }
    .with_max_rounds(args.max_rounds);

    sim.place_aliens(&mut map, args.aliens)?;
    let report = sim.run(&mut map, args.aliens as usize)?;

    if args.json {
        let output = JsonOutput {
            report: &report,
            surviving_map: format_map(&map),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut last_round = None;
    for record in &report.records {
        if last_round != Some(record.round) {
            println!("----------- Round {} -----------", record.round);
            last_round = Some(record.round);
        }
        println!("{}", record);
    }

    if report.round_cap_reached {
        println!(
            "{} alien(s) survived {} rounds",
            report.aliens_left, report.rounds
        );
    } else {
        println!("All aliens were destroyed after {} rounds", report.rounds);
    }
    println!();
    print!("{}", format_map(&map));
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
