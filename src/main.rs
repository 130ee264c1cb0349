use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use evictsim::config::SimulationConfig;
use evictsim::policies::PolicyType;
use evictsim::simulator::Simulator;
use evictsim::trace::TraceKind;

#[derive(Parser, Debug)]
#[command(
    name = "evictsim",
    about = "Compare FIFO, LRU and LFU page replacement over synthetic traces"
)]
struct Args {
    /// JSON configuration file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of resident pages
    #[arg(long)]
    capacity: Option<usize>,

    /// Trace shape: sequential, cyclic, uniform or hotspot
    #[arg(long)]
    trace: Option<String>,

    /// Number of accesses in the trace
    #[arg(long)]
    length: Option<usize>,

    /// Seed for the trace generator
    #[arg(long)]
    seed: Option<u64>,

    /// Policy to run (repeatable); defaults to all
    #[arg(short, long = "policy")]
    policies: Vec<PolicyType>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// More log output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }

    fn build_config(&self) -> evictsim::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(name) = &self.trace {
            config.trace.kind = TraceKind::from_name(name)?;
        }
        if let Some(length) = self.length {
            config.trace.length = length;
        }
        if let Some(seed) = self.seed {
            config.trace.seed = seed;
        }
        if !self.policies.is_empty() {
            config.policies = self.policies.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// `EVICTSIM_LOG` > `RUST_LOG` > verbosity flag.
fn build_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(directives) = std::env::var("EVICTSIM_LOG")
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn init_subscriber(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(build_env_filter(default_level))
        .with(fmt_layer)
        .init();
}

fn run(args: &Args) -> evictsim::Result<()> {
    let config = args.build_config()?;
    let report = Simulator::new(config)?.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_subscriber(args.default_log_level());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
