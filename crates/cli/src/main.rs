//! Trace-driven cache hierarchy simulator CLI.
//!
//! This binary replays a memory trace through the L1/L2 hierarchy. It performs:
//! 1. **Configuration:** Defaults, optionally overlaid by a JSON file, then by flags.
//! 2. **Replay:** Reads `<R|W> 0x<hex>` records from a file or stdin.
//! 3. **Report:** Prints the cache settings and the statistics (text or JSON).

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{Config, InsertionPolicy, PrefetchAlgorithm};
use cachesim_core::sim::{Simulator, TraceReader};
use cachesim_core::stats::{STATS_SECTIONS, SimStats};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Two-level cache hierarchy simulator",
    long_about = "Replay a memory trace through an L1/L2 cache hierarchy and report hit ratios and average access time.\n\nExamples:\n  cachesim -i traces/gcc.trace\n  cachesim -C 16 -S 4 -P mip -F markov -r 64 < traces/mcf.trace\n  cachesim --config sweep.json --json -i traces/perl.trace"
)]
struct Cli {
    /// L1 size is 2^C1 bytes.
    #[arg(short = 'c', value_name = "C1")]
    l1_c: Option<u64>,

    /// Block size of both levels is 2^B bytes.
    #[arg(short = 'b', value_name = "B")]
    block: Option<u64>,

    /// L1 holds 2^S1 blocks per set.
    #[arg(short = 's', value_name = "S1")]
    l1_s: Option<u64>,

    /// L2 size is 2^C2 bytes.
    #[arg(short = 'C', value_name = "C2")]
    l2_c: Option<u64>,

    /// L2 holds 2^S2 blocks per set.
    #[arg(short = 'S', value_name = "S2")]
    l2_s: Option<u64>,

    /// L2 insertion policy.
    #[arg(short = 'P', value_enum, ignore_case = true, value_name = "POLICY")]
    policy: Option<PolicyCli>,

    /// L2 prefetch algorithm.
    #[arg(short = 'F', value_enum, ignore_case = true, value_name = "ALGO")]
    prefetch: Option<PrefetchCli>,

    /// Rows in the Markov table (markov and hybrid only).
    #[arg(short = 'r', value_name = "ROWS")]
    markov_rows: Option<u64>,

    /// Disable the L2 cache.
    #[arg(short = 'D')]
    disable_l2: bool,

    /// JSON configuration applied before the flags above.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Trace file to replay (default: stdin).
    #[arg(short = 'i', long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Print only these statistics sections (summary, l1, l2, prefetch).
    #[arg(long, value_delimiter = ',', value_name = "SECTIONS")]
    sections: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyCli {
    Mip,
    Lip,
}

impl From<PolicyCli> for InsertionPolicy {
    fn from(value: PolicyCli) -> Self {
        match value {
            PolicyCli::Mip => Self::Mip,
            PolicyCli::Lip => Self::Lip,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PrefetchCli {
    None,
    #[value(name = "plus1", alias = "+1")]
    PlusOne,
    Markov,
    Hybrid,
}

impl From<PrefetchCli> for PrefetchAlgorithm {
    fn from(value: PrefetchCli) -> Self {
        match value {
            PrefetchCli::None => Self::None,
            PrefetchCli::PlusOne => Self::PlusOne,
            PrefetchCli::Markov => Self::Markov,
            PrefetchCli::Hybrid => Self::Hybrid,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(bad) = cli
        .sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        eprintln!(
            "error: unknown stats section '{bad}' (expected one of: {})",
            STATS_SECTIONS.join(", ")
        );
        process::exit(1);
    }

    let config = build_config(&cli);
    print!("{}", config.render_settings());
    println!();

    let mut sim = match Simulator::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            println!("Invalid configuration! {e}");
            process::exit(1);
        }
    };

    let stats = match &cli.trace {
        Some(path) => match File::open(path) {
            Ok(file) => replay(&mut sim, BufReader::new(file)),
            Err(e) => {
                eprintln!("error: cannot open trace {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => replay(&mut sim, io::stdin().lock()),
    };

    let stats = match stats {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("error: failed to read trace: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        stats.print_sections(&cli.sections);
    }
}

/// Builds the run configuration: defaults, then `--config`, then flags.
fn build_config(cli: &Cli) -> Config {
    let mut config = cli
        .config
        .as_deref()
        .map_or_else(Config::default, load_config);

    if let Some(c) = cli.l1_c {
        config.l1.c = c;
    }
    if let Some(b) = cli.block {
        config.l1.b = b;
        config.l2.b = b;
    }
    if let Some(s) = cli.l1_s {
        config.l1.s = s;
    }
    if let Some(c) = cli.l2_c {
        config.l2.c = c;
    }
    if let Some(s) = cli.l2_s {
        config.l2.s = s;
    }
    if let Some(policy) = cli.policy {
        config.l2.insertion_policy = policy.into();
    }
    if let Some(algo) = cli.prefetch {
        config.l2.prefetch_algorithm = algo.into();
    }
    if let Some(rows) = cli.markov_rows {
        config.l2.markov_rows = rows;
    }
    if cli.disable_l2 {
        config.l2.disabled = true;
    }
    config
}

/// Loads a JSON configuration file, exiting on failure.
fn load_config(path: &Path) -> Config {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read config {}: {e}", path.display());
            process::exit(1);
        }
    };
    match Config::from_json(&text) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded configuration file");
            config
        }
        Err(e) => {
            eprintln!("error: invalid config {}: {e}", path.display());
            process::exit(1);
        }
    }
}

/// Replays every well-formed record from `reader` and finishes the run.
fn replay<R: BufRead>(sim: &mut Simulator, reader: R) -> io::Result<SimStats> {
    let mut stats = SimStats::default();
    let mut records = TraceReader::new(reader);
    for record in records.by_ref() {
        let record = record?;
        sim.step(record.op, record.addr, &mut stats);
    }
    sim.finish(&mut stats);
    info!(
        references = stats.accesses_l1,
        skipped = records.skipped(),
        "trace replay complete"
    );
    Ok(stats)
}
