// ABOUTME: liftcycle CLI - inspect periodization tables, evaluate transitions, and plan sessions
// ABOUTME: Reads JSON inputs from files and prints JSON results to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors
//!
//! Usage:
//! ```bash
//! # Show the default landmark table
//! liftcycle-cli landmarks
//!
//! # Current week, block, RIR band, and volume targets of a mesocycle
//! liftcycle-cli week --mesocycle meso.json
//!
//! # Decide the lifecycle transition for a mesocycle
//! liftcycle-cli transition --mesocycle meso.json
//!
//! # Score a readiness check-in
//! liftcycle-cli fatigue --signal signal.json
//!
//! # Plan the next session
//! liftcycle-cli plan --mesocycle meso.json --pool pool.json --signal signal.json --seed 7
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use liftcycle::constants::DEFAULT_SELECTION_SEED;
use liftcycle::logging::LoggingConfig;
use liftcycle_engine::config::EngineConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "liftcycle-cli",
    about = "Resistance-training periodization and session planning",
    long_about = "Inspect volume and effort tables, evaluate mesocycle transitions, score readiness, and plan autoregulated sessions from JSON inputs."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print volume landmarks (MV/MEV/MAV/MRV) per muscle
    Landmarks {
        /// Single muscle or group (e.g. `chest`, `arms`)
        #[arg(long)]
        muscle: Option<String>,
    },

    /// Print the current week's block, RIR band, and volume targets
    Week {
        /// Mesocycle JSON file
        #[arg(long)]
        mesocycle: PathBuf,

        /// Week to show instead of the counter-derived current week
        #[arg(long)]
        week: Option<u32>,
    },

    /// Evaluate the lifecycle transition of a mesocycle
    Transition {
        /// Mesocycle JSON file
        #[arg(long)]
        mesocycle: PathBuf,
    },

    /// Compute the fatigue score of a readiness check-in
    Fatigue {
        /// Readiness signal JSON file
        #[arg(long)]
        signal: PathBuf,
    },

    /// Plan and autoregulate the next session
    Plan {
        /// Mesocycle JSON file
        #[arg(long)]
        mesocycle: PathBuf,

        /// Exercise pool JSON file
        #[arg(long)]
        pool: PathBuf,

        /// Readiness signal JSON file
        #[arg(long)]
        signal: Option<PathBuf>,

        /// Baseline loads JSON file (exercise id to load)
        #[arg(long)]
        baselines: Option<PathBuf>,

        /// Zero-based session index within the week
        #[arg(long, default_value = "0")]
        session_index: u32,

        /// Selection tie-break seed
        #[arg(long, default_value_t = DEFAULT_SELECTION_SEED)]
        seed: u64,

        /// Session intent overriding the split rotation
        #[arg(long)]
        intent: Option<String>,

        /// Comma-separated muscle groups
        #[arg(long, value_delimiter = ',')]
        targets: Vec<String>,

        /// Comma-separated available equipment
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        /// Planning instant (RFC 3339) instead of the wall clock
        #[arg(long)]
        now: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::for_cli(cli.verbose).init()?;

    let config = EngineConfig::load()?;
    debug!("Engine configuration loaded");

    match cli.command {
        Command::Landmarks { muscle } => commands::periodization::landmarks(muscle.as_deref()),
        Command::Week { mesocycle, week } => {
            commands::periodization::week(&mesocycle, week, &config)
        }
        Command::Transition { mesocycle } => {
            commands::periodization::transition(&mesocycle, &config)
        }
        Command::Fatigue { signal } => commands::readiness::fatigue(&signal, &config),
        Command::Plan {
            mesocycle,
            pool,
            signal,
            baselines,
            session_index,
            seed,
            intent,
            targets,
            equipment,
            now,
        } => {
            let args = commands::plan::PlanArgs {
                mesocycle,
                pool,
                signal,
                baselines,
                session_index,
                seed,
                intent,
                targets,
                equipment,
                now,
            };
            commands::plan::plan(args, config).await
        }
    }
}
