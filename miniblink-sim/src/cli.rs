// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use miniblink_common::{StartupMode, ZeroIntervalPolicy};

use crate::commands::{self, RunConfig};

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "miniblink-sim")]
#[command(about = "Simulate the miniblink tick handler on the host")]
pub struct Cli {
    /// Generator seed in hex (non-zero)
    #[arg(short, long, global = true, default_value = "0xACE1", value_parser = parse_hex_u16)]
    pub seed: u16,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the tick handler for a number of milliseconds
    Run {
        /// Number of 1 ms ticks to simulate
        #[arg(short, long, default_value = "10000")]
        ticks: u64,

        /// How to treat a tick whose interval scales to zero
        #[arg(short, long, value_enum, default_value = "skip")]
        policy: Policy,

        /// Initial millisecond counter value
        #[arg(long, default_value = "0")]
        start: u32,

        /// Print every toggle
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the first generator outputs and their intervals
    Sequence {
        /// Number of values to print
        #[arg(short = 'n', long, default_value = "16")]
        count: usize,
    },

    /// Measure the generator period for the seed
    Period,

    /// Print or write the startup configuration record
    BootConfig {
        /// Set the autorun flag
        #[arg(long)]
        autorun: bool,

        /// Write the raw record to this file instead of printing it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Zero-interval policy as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    Skip,
    Clamp,
    Fault,
}

impl From<Policy> for ZeroIntervalPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Skip => ZeroIntervalPolicy::Skip,
            Policy::Clamp => ZeroIntervalPolicy::Clamp,
            Policy::Fault => ZeroIntervalPolicy::Fault,
        }
    }
}

/// Parse a hex string (with or without 0x prefix) into a u16.
fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value: {e}"))
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let seed = cli.seed;

    match cli.command {
        Commands::Run {
            ticks,
            policy,
            start,
            verbose,
        } => commands::run(&RunConfig {
            seed,
            ticks,
            policy: policy.into(),
            start,
            verbose,
        }),
        Commands::Sequence { count } => commands::sequence(seed, count),
        Commands::Period => commands::period(seed),
        Commands::BootConfig { autorun, output } => {
            let mode = if autorun {
                StartupMode::Autorun
            } else {
                StartupMode::Manual
            };
            commands::boot_config(mode, output.as_deref())
        }
    }
}
