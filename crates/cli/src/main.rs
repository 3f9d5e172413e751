//! Scratchpad port model CLI.
//!
//! This binary drives the model from the command line. It provides:
//! 1. **Scenario run:** Execute a JSON scenario against the port and print responses and stats.
//! 2. **Describe:** Print the TileLink manager parameters a configuration advertises.
//! 3. **Reset waveform:** Show how the synchronizer releases reset for a given depth.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rvspad_core::config::Config;
use rvspad_core::reset::ResetSynchronizer;
use rvspad_core::sim::{Scenario, Testbench};
use rvspad_core::tilelink::ManagerParams;

#[derive(Parser, Debug)]
#[command(
    name = "spad",
    author,
    version,
    about = "Scratchpad slave port and reset synchronizer model",
    long_about = "Run TileLink scenarios against a cycle-level model of a core's scratchpad slave port.\n\nSet RUST_LOG (e.g. RUST_LOG=rvspad_core=debug) for state-transition logging.\n\nExamples:\n  spad run --scenario scenarios/nack.json\n  spad describe --config dtim.json\n  spad reset --depth 3 --hold 2 --cycles 8"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario and print the responses and statistics.
    Run {
        /// Model configuration (JSON). Built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scenario file (JSON).
        #[arg(short, long)]
        scenario: PathBuf,

        /// Print every cycle as a JSON line.
        #[arg(long)]
        trace: bool,
    },

    /// Print the manager parameters of a configuration as JSON.
    Describe {
        /// Model configuration (JSON). Built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the reset synchronizer waveform.
    Reset {
        /// Number of synchronizer flops.
        #[arg(long, default_value_t = 3)]
        depth: usize,

        /// Cycles the asynchronous reset is held.
        #[arg(long, default_value_t = 2)]
        hold: u64,

        /// Total cycles to show.
        #[arg(long, default_value_t = 8)]
        cycles: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            config,
            scenario,
            trace,
        } => cmd_run(config, &scenario, trace),
        Commands::Describe { config } => cmd_describe(config),
        Commands::Reset {
            depth,
            hold,
            cycles,
        } => cmd_reset(depth, hold, cycles),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Runs a scenario to completion and prints each response, then the stats report.
fn cmd_run(config: Option<PathBuf>, scenario: &Path, trace: bool) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(config)?;
    config.general.trace |= trace;
    let scenario = Scenario::from_file(scenario)?;
    info!(requests = scenario.requests.len(), "running scenario");

    let mut tb = Testbench::from_scenario(&config, &scenario)?;
    let outcome = tb.run().map(<[_]>::len);

    if config.general.trace {
        for record in tb.trace() {
            println!("{}", serde_json::to_string(record)?);
        }
    }

    println!();
    for c in tb.completions() {
        println!(
            "[{:>5} -> {:>5}] source={:<3} {:?} size={} data={:#018x}",
            c.accepted_at,
            c.completed_at,
            c.response.source,
            c.response.opcode,
            c.response.size,
            c.response.data
        );
    }
    tb.stats().print();

    let completed = outcome?;
    println!("\n[*] {completed} requests completed in {} cycles", tb.cycle());
    Ok(())
}

fn cmd_describe(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = load_config(config)?;
    let params = ManagerParams::scratchpad(&config.scratchpad);
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

/// Prints one line per cycle: async reset, flop contents (MSB first), synchronized reset.
fn cmd_reset(depth: usize, hold: u64, cycles: u64) -> Result<(), Box<dyn Error>> {
    let mut sync = ResetSynchronizer::new(depth)?;
    println!("cycle  async  flops{:>w$}  sync_reset", "", w = depth.saturating_sub(5));
    for cycle in 0..cycles {
        sync.set_async_reset(cycle < hold);
        println!(
            "{cycle:>5}  {:>5}  {:>w$}  {:>10}",
            u8::from(sync.async_reset()),
            format!("{:0depth$b}", sync.stages()),
            u8::from(sync.sync_reset()),
            w = depth.max(5)
        );
        sync.posedge();
    }
    Ok(())
}
