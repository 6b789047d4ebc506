// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations for the simulator.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use miniblink_common::blink::{Blinker, TickOutcome, ZeroIntervalPolicy, INTERVAL_SCALE};
use miniblink_common::boot_config::{BootConfig, StartupMode};
use miniblink_common::leds::LedPair;
use miniblink_common::lfsr::{self, Lfsr16};

use crate::sim_led::SimLed;

/// Runs shorter than this finish too fast to be worth a progress bar.
const PROGRESS_MIN_TICKS: u64 = 1_000_000;
const PROGRESS_STEP: u64 = 65_536;

/// Parameters for a simulation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub seed: u16,
    pub ticks: u64,
    pub policy: ZeroIntervalPolicy,
    pub start: u32,
    pub verbose: bool,
}

/// What happened over a simulation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub toggles: u64,
    pub zero_intervals: u64,
    pub final_millis: u32,
    pub red_on: bool,
    pub green_on: bool,
}

fn generator(seed: u16) -> Result<Lfsr16> {
    Lfsr16::with_seed(seed).ok_or_else(|| anyhow!("seed must be non-zero"))
}

/// Drive the tick handler `config.ticks` times, reporting each outcome to `on_tick`.
///
/// Stops with an error on the first fault when the policy is `Fault`.
pub fn simulate(config: &RunConfig, mut on_tick: impl FnMut(&TickOutcome)) -> Result<RunSummary> {
    let mut blinker = Blinker::new(generator(config.seed)?)
        .with_policy(config.policy)
        .starting_at(config.start);
    let mut leds = LedPair::new_complementary(SimLed::default(), SimLed::default());
    let mut summary = RunSummary::default();

    for tick in 1..=config.ticks {
        let outcome = blinker
            .tick(&mut leds)
            .with_context(|| format!("device fault on tick {}", tick))?;

        summary.ticks = tick;
        match outcome {
            TickOutcome::Toggled { .. } => summary.toggles += 1,
            TickOutcome::ZeroInterval { .. } => summary.zero_intervals += 1,
            TickOutcome::Held { .. } => {}
        }
        on_tick(&outcome);
    }

    summary.final_millis = blinker.millis();
    let (red, green) = leds.release();
    summary.red_on = red.is_on();
    summary.green_on = green.is_on();
    Ok(summary)
}

/// Simulate a run and print the results.
pub fn run(config: &RunConfig) -> Result<()> {
    println!(
        "Simulating {} ticks (seed 0x{:04x}, policy {:?}, start {} ms)",
        config.ticks, config.seed, config.policy, config.start
    );

    let pb = if config.ticks >= PROGRESS_MIN_TICKS && !config.verbose {
        let pb = ProgressBar::new(config.ticks);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ticks ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut red_on = true;
    let mut seen = 0u64;
    let result = simulate(config, |outcome| {
        seen += 1;
        if let TickOutcome::Toggled { millis, interval } = *outcome {
            red_on = !red_on;
            if config.verbose {
                println!(
                    "{:>10} ms  toggle  interval {:>3} ms  red {:<3} green {}",
                    millis,
                    interval,
                    if red_on { "on" } else { "off" },
                    if red_on { "off" } else { "on" }
                );
            }
        }
        if let Some(pb) = &pb {
            if seen % PROGRESS_STEP == 0 {
                pb.set_position(seen);
            }
        }
    });

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            if let Some(pb) = &pb {
                pb.abandon();
            }
            return Err(e);
        }
    };
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    println!("Summary:");
    println!("  Ticks:          {}", summary.ticks);
    println!("  Toggles:        {}", summary.toggles);
    println!("  Zero intervals: {}", summary.zero_intervals);
    println!("  Final counter:  {} ms", summary.final_millis);
    println!(
        "  LEDs:           red {}, green {}",
        if summary.red_on { "on" } else { "off" },
        if summary.green_on { "on" } else { "off" }
    );

    Ok(())
}

/// Print the first `count` generator outputs.
pub fn sequence(seed: u16, count: usize) -> Result<()> {
    let lfsr = generator(seed)?;

    println!("{:>6}  {:>6}  {:>18}  {:>8}", "step", "value", "bits", "interval");
    for (i, value) in lfsr.take(count).enumerate() {
        println!(
            "{:>6}  0x{:04x}  {:#018b}  {:>5} ms",
            i + 1,
            value,
            value,
            value / INTERVAL_SCALE
        );
    }

    Ok(())
}

/// Count generator steps from `seed` until it comes back around.
///
/// Returns the period and how many values scale to a zero interval.
pub fn measure_period(seed: u16) -> Result<(u32, u32)> {
    let period = lfsr::period(seed)
        .ok_or_else(|| anyhow!("seed 0x{:04x} is not revisited within 65535 steps", seed))?;

    let mut zero_intervals = 0;
    for value in generator(seed)?.take(period as usize) {
        if value == 0 {
            bail!("generator reached zero from seed 0x{:04x}", seed);
        }
        if value < INTERVAL_SCALE {
            zero_intervals += 1;
        }
    }

    Ok((period, zero_intervals))
}

/// Print the generator period for a seed.
pub fn period(seed: u16) -> Result<()> {
    let (period, zero_intervals) = measure_period(seed)?;

    println!("Seed:           0x{:04x}", seed);
    println!("Period:         {} steps", period);
    println!("Zero reached:   no");
    println!(
        "Zero intervals: {} per period (values below {})",
        zero_intervals, INTERVAL_SCALE
    );

    Ok(())
}

/// Print the startup configuration record, or write it to `output`.
pub fn boot_config(mode: StartupMode, output: Option<&Path>) -> Result<()> {
    let record = BootConfig::new(mode);
    let bytes = record.to_bytes();

    if let Some(path) = output {
        fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Boot config: {} ({} bytes, {:?})", path.display(), bytes.len(), mode);
        return Ok(());
    }

    println!("Boot config ({:?}):", mode);
    println!("  Magic:  0x{:08x}", record.magic);
    println!("  Start:  sector {}", record.start);
    println!("  Config: 0x{:02x}", record.config);
    let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    println!("  Bytes:  {}", hex.join(" "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u16, ticks: u64, policy: ZeroIntervalPolicy) -> RunConfig {
        RunConfig {
            seed,
            ticks,
            policy,
            start: 0,
            verbose: false,
        }
    }

    #[test]
    fn test_simulate_counts_ticks_and_toggles() {
        let mut toggled = 0u64;
        let summary = simulate(&config(0xACE1, 20_000, ZeroIntervalPolicy::Skip), |o| {
            if o.toggled() {
                toggled += 1;
            }
        })
        .unwrap();

        assert_eq!(summary.ticks, 20_000);
        assert_eq!(summary.final_millis, 20_000);
        assert_eq!(summary.toggles, toggled);
        assert!(summary.toggles > 0);
        // LEDs always end up at opposite levels
        assert_ne!(summary.red_on, summary.green_on);
        assert_eq!(summary.red_on, summary.toggles % 2 == 0);
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let cfg = config(0xACE1, 5_000, ZeroIntervalPolicy::Clamp);
        let a = simulate(&cfg, |_| {}).unwrap();
        let b = simulate(&cfg, |_| {}).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulate_rejects_zero_seed() {
        assert!(simulate(&config(0, 10, ZeroIntervalPolicy::Skip), |_| {}).is_err());
    }

    #[test]
    fn test_simulate_fault_policy_stops_on_zero_interval() {
        // A full period always contains values below the interval scale.
        let err = simulate(&config(0xACE1, 65_535, ZeroIntervalPolicy::Fault), |_| {}).unwrap_err();
        assert!(format!("{:#}", err).contains("device fault on tick"));
    }

    #[test]
    fn test_skip_and_clamp_agree_on_zero_interval_count() {
        let skip = simulate(&config(0xACE1, 65_535, ZeroIntervalPolicy::Skip), |_| {}).unwrap();
        let (_, zero_intervals) = measure_period(0xACE1).unwrap();
        assert_eq!(skip.zero_intervals, u64::from(zero_intervals));

        let clamp = simulate(&config(0xACE1, 65_535, ZeroIntervalPolicy::Clamp), |_| {}).unwrap();
        assert_eq!(clamp.zero_intervals, 0);
        assert!(clamp.toggles >= skip.toggles);
    }

    #[test]
    fn test_measure_period_default_seed() {
        let (period, zero_intervals) = measure_period(0xACE1).unwrap();
        assert_eq!(period, 65_535);
        // Every non-zero value below 100 appears exactly once per period.
        assert_eq!(zero_intervals, 99);
    }
}
