//! Command line interface.
//!
//! `serve` runs the HTTP service, `merge` works offline on a CIDR file, and
//! `add`/`check`/`list`/`reset` talk to a running service.

use crate::api::{start_server, SharedRangeSet};
use crate::client::RangeClient;
use crate::config::Config;
use crate::output::print_ranges;
use crate::processing::{load_cidr_file, RangeSet};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Track IPv4 CIDR ranges and check address membership", long_about = None)]
pub struct Args {
    /// Base URL of a running service, used by the client commands
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP service
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:8080
        #[arg(short, long)]
        bind: Option<String>,
        /// File of CIDR blocks to load at startup
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Merge a file of CIDR blocks and print the resulting ranges
    Merge {
        /// File with one CIDR block per line
        file: String,
    },
    /// Add a CIDR block to the running service
    Add { cidr: String },
    /// Check whether an address falls inside a stored range
    Check { ip: String },
    /// List the stored ranges
    List,
    /// Remove every stored range
    Reset,
}

impl Args {
    /// Only `serve` is long running; everything else logs warnings to stderr.
    pub fn is_service(&self) -> bool {
        matches!(self.command, Command::Serve { .. })
    }

    /// Layer command line flags over the environment configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(server) = &self.server {
            config.server_url = server.clone();
        }
        if let Command::Serve { bind, seed } = &self.command {
            if let Some(bind) = bind {
                config.bind_addr = bind.clone();
            }
            if let Some(seed) = seed {
                config.seed_file = Some(seed.clone());
            }
        }
        config
    }
}

pub async fn run(args: Args, config: Config) -> Result<ExitCode, Box<dyn Error>> {
    let config = args.apply(config);
    log::debug!("run({:?}) with {:?}", args.command, config);

    match args.command {
        Command::Serve { .. } => serve(&config).await,
        Command::Merge { file } => merge(&file),
        Command::Add { cidr } => {
            let snapshot = RangeClient::new(&config.server_url).add(&cidr).await?;
            println!("{} {cidr}", "Added".green());
            print_ranges(&snapshot);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { ip } => {
            let included = RangeClient::new(&config.server_url).check(&ip).await?;
            if included {
                println!("{ip} is {}", "included".green());
                Ok(ExitCode::SUCCESS)
            } else {
                println!("{ip} is {}", "not included".red());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::List => {
            let snapshot = RangeClient::new(&config.server_url).list().await?;
            print_ranges(&snapshot);
            Ok(ExitCode::SUCCESS)
        }
        Command::Reset => {
            RangeClient::new(&config.server_url).reset().await?;
            println!("{}", "All ranges removed".yellow());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(config: &Config) -> Result<ExitCode, Box<dyn Error>> {
    let addr = config.socket_addr()?;

    let mut ranges = RangeSet::new();
    if let Some(seed) = &config.seed_file {
        let report = load_cidr_file(&mut ranges, seed)?;
        log::info!(
            "Seeded {} ranges from {seed} ({} blocks, {} rejected)",
            ranges.len(),
            report.loaded,
            report.rejected.len()
        );
    }

    start_server(Arc::new(SharedRangeSet::with_ranges(ranges)), addr).await?;
    Ok(ExitCode::SUCCESS)
}

/// Offline merge; exits with failure when any line was rejected.
fn merge(file: &str) -> Result<ExitCode, Box<dyn Error>> {
    let mut ranges = RangeSet::new();
    let report = load_cidr_file(&mut ranges, file)?;

    print_ranges(&ranges.snapshot());

    if report.rejected.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    for (line, e) in &report.rejected {
        println!("{} line {line}: {e}", "rejected".on_red());
    }
    Ok(ExitCode::FAILURE)
}
