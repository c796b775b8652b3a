// Desktop tooling crate — unwrap/expect acceptable in tests and CLI glue.
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod parse;
mod render;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parse::{parse_value, parse_write, ScheduledWrite};
use run::{OutputFormat, RunOptions};

#[derive(Parser)]
#[command(name = "segsim")]
#[command(about = "Seven-segment scan controller simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick the controller and print the pin levels
    Run {
        /// Controller clock frequency in Hz
        #[arg(long, default_value_t = segment_display::DEFAULT_CLOCK_HZ, conflicts_with = "period_ns")]
        clock_hz: f64,
        /// Controller clock period in ns (instead of --clock-hz)
        #[arg(long)]
        period_ns: Option<f64>,
        /// Time each digit stays selected, in ns
        #[arg(long, default_value_t = segment_display::DEFAULT_REFRESH_INTERVAL_NS)]
        refresh_ns: u64,
        /// Number of ticks to evaluate
        #[arg(long, default_value_t = 1_000_000)]
        ticks: u64,
        /// Initial register value (decimal or 0x-prefixed hex)
        #[arg(long, default_value = "0", value_parser = parse_value)]
        value: u32,
        /// Register write applied before tick TICK, as TICK=VALUE (repeatable)
        #[arg(long = "write", value_parser = parse_write)]
        writes: Vec<ScheduledWrite>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Print every tick instead of only ticks whose outputs changed
        #[arg(long)]
        all: bool,
    },
    /// Render what the display shows for a value
    Show {
        /// Register value (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_value)]
        value: u32,
    },
    /// Print the nibble to segment-pattern table
    Table,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Run {
            clock_hz,
            period_ns,
            refresh_ns,
            ticks,
            value,
            writes,
            format,
            all,
        } => {
            let options = RunOptions {
                config: run::build_config(clock_hz, period_ns, refresh_ns)?,
                ticks,
                value,
                writes,
                format,
                all,
            };
            run::run(&options, &mut out)
        }
        Commands::Show { value } => render::show(value, &mut out),
        Commands::Table => render::table(&mut out),
    }
}
