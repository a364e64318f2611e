//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use pricewatch_core::config::CliOverrides;

/// Poll retail sources for smartphone prices and keep a price history.
///
/// Each source is fetched, parsed into a model and price, checked for a price
/// drop against the stored history and then recorded in a local `SQLite`
/// database.
#[derive(Parser, Debug)]
#[command(name = "pricewatch")]
#[command(author, version, about)]
pub struct Args {
    /// Source URLs to poll, in order (overrides any sources file)
    pub sources: Vec<String>,

    /// File listing one source URL per line
    #[arg(long, value_name = "PATH")]
    pub sources_file: Option<PathBuf>,

    /// SQLite database file [default: data/prices.db]
    #[arg(long = "db", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Config file [default: $XDG_CONFIG_HOME/pricewatch/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Attempts per source including the first (1-10) [default: 3]
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_retries: Option<u32>,

    /// Per-request timeout in seconds (1-3600) [default: 10]
    #[arg(short = 't', long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    /// Seed for reproducible User-Agent and delay choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Settings that take precedence over the config file.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            sources: self.sources.clone(),
            sources_file: self.sources_file.clone(),
            db_path: self.db_path.clone(),
            max_retries: self.max_retries,
            timeout_secs: self.timeout,
            seed: self.seed,
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
