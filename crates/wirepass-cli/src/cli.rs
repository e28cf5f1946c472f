// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument parsing and dispatch.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wirepass::Endian;

use crate::{report, scenarios};

/// Command line of the `wirepass` binary.
#[derive(Parser, Debug)]
#[command(name = "wirepass", version)]
#[command(about = "Drive the wirepass codec through its count, write and read passes")]
pub struct Cli {
    /// Byte order for every pass
    #[arg(
        long,
        value_enum,
        default_value_t = EndianArg::Little,
        env = "WIREPASS_ENDIAN",
        global = true
    )]
    pub endian: EndianArg,
    /// Log filter (e.g. `debug`, `wirepass=trace`); falls back to RUST_LOG
    #[arg(long, env = "WIREPASS_LOG", global = true)]
    pub log_level: Option<String>,
    /// Emit reports as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    /// Scenario to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Scenarios.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack a two-item batch and unpack it into an empty one
    Dynsize,
    /// Walk a value through schema versions 1, 2 and 3 and back
    Evolve,
    /// Dump the per-field layout of a sample record
    Inspect,
    /// Read a sample record back from a prefix of its encoding
    Truncate {
        /// Bytes of the encoding to keep
        #[arg(long)]
        keep: usize,
    },
}

/// `--endian` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EndianArg {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl From<EndianArg> for Endian {
    fn from(arg: EndianArg) -> Self {
        match arg {
            EndianArg::Little => Self::Little,
            EndianArg::Big => Self::Big,
        }
    }
}

/// Log to stderr so reports on stdout stay machine-readable.
fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Parse `std::env::args` and run the selected scenario.
pub fn entrypoint() -> Result<()> {
    run(Cli::parse())
}

/// Run an already-parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_level.as_deref())?;
    let endian = Endian::from(cli.endian);
    debug!(?endian, command = ?cli.command, "dispatch");

    match cli.command {
        Commands::Dynsize => report::emit(&scenarios::dynsize(endian)?, cli.json),
        Commands::Evolve => report::emit(&scenarios::evolve(endian)?, cli.json),
        Commands::Inspect => report::emit(&scenarios::inspect(endian), cli.json),
        Commands::Truncate { keep } => report::emit(&scenarios::truncate(endian, keep), cli.json),
    }
}
