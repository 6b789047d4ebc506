// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Core logic and board support for the miniblink firmware.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for embedded targets
//! - `std` feature: Enables `std` support for host tools and simulation
//! - `embedded` feature: Enables RP2040 board bring-up (rp2040-hal)

#![cfg_attr(not(feature = "std"), no_std)]

pub mod blink;
pub mod boot_config;
pub mod leds;
pub mod lfsr;

// Board bring-up (requires embedded feature)
#[cfg(feature = "embedded")]
pub mod board;

// Re-export commonly used types
pub use blink::{Blinker, IntervalSource, TickError, TickOutcome, ZeroIntervalPolicy};
pub use blink::{INTERVAL_SCALE, TICK_HZ};
pub use boot_config::{BootConfig, StartupMode, BOOT_CONFIG_MAGIC};
pub use leds::LedPair;
pub use lfsr::{Lfsr16, LFSR_SEED};
