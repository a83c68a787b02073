//! Assembly line demo: a fixed pool of employees drains a shuffled queue of
//! items with different processing costs, then reports who did what.

mod config;
mod employee;
mod item;
mod line;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use trimwalk::{exit_codes, logging};

use crate::config::{DEFAULT_CONFIG_FILE, LineOverrides, apply_overrides, load_config};

#[derive(Parser)]
#[command(name = "assembly", version, about = "Worker pool demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the line once and print the summary.
    Run {
        #[arg(long)]
        workers: Option<usize>,

        #[arg(long)]
        items_per_kind: Option<usize>,

        /// Multiplier for item processing costs (1.0 = 100/150/200 ms, at most 1000).
        #[arg(long)]
        time_scale: Option<f64>,

        /// Shuffle seed for a reproducible order.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() {
    logging::init_with_default("assembly=info,warn");
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            workers,
            items_per_kind,
            time_scale,
            seed,
            json,
            config,
        } => {
            let overrides = LineOverrides {
                workers,
                items_per_kind,
                time_scale,
                seed,
            };
            let cfg = apply_overrides(load_config(&config)?, &overrides)?;
            let report = line::run_line(&cfg)?;
            if json {
                let payload = serde_json::to_string_pretty(&report).context("serialize report")?;
                println!("{payload}");
            } else {
                print!("{}", report.render_text());
            }
            Ok(())
        }
    }
}
