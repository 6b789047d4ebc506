// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use defmt_rtt as _;
use panic_probe as _;

use miniblink_common::board::{self, LedPin};
use miniblink_common::{
    Blinker, BootConfig, LedPair, Lfsr16, StartupMode, TickOutcome, ZeroIntervalPolicy, TICK_HZ,
};

defmt::timestamp!("{=u64:us}", { 0 });

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

const STARTUP_MODE: StartupMode = if cfg!(feature = "autorun") {
    StartupMode::Autorun
} else {
    StartupMode::Manual
};

#[unsafe(link_section = ".boot_config")]
#[used]
pub static BOOT_CONFIG: BootConfig = BootConfig::new(STARTUP_MODE);

const ZERO_INTERVAL_POLICY: ZeroIntervalPolicy = if cfg!(feature = "fault-on-zero-interval") {
    ZeroIntervalPolicy::Fault
} else if cfg!(feature = "clamp-zero-interval") {
    ZeroIntervalPolicy::Clamp
} else {
    ZeroIntervalPolicy::Skip
};

/// Everything the SysTick handler owns.
struct TickTask {
    blinker: Blinker<Lfsr16>,
    leds: LedPair<LedPin, LedPin>,
}

/// Handoff slot from `main` to the first SysTick; empty afterwards.
static TICK_TASK: Mutex<RefCell<Option<TickTask>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    defmt::println!("miniblink {} starting", env!("MINIBLINK_VERSION"));
    defmt::println!("Startup mode: {}", BOOT_CONFIG.startup_mode());

    let board::Board {
        leds,
        mut syst,
        core_clock_hz,
    } = board::init_board();

    let task = TickTask {
        blinker: Blinker::new(Lfsr16::new()).with_policy(ZERO_INTERVAL_POLICY),
        leds,
    };
    critical_section::with(|cs| TICK_TASK.borrow(cs).replace(Some(task)));

    board::start_tick(&mut syst, core_clock_hz, TICK_HZ);
    defmt::println!(
        "SysTick at {} Hz from {} Hz core clock, zero interval policy: {}",
        TICK_HZ,
        core_clock_hz,
        ZERO_INTERVAL_POLICY
    );

    // SysTick toggles the LEDs from here on
    loop {
        cortex_m::asm::nop();
    }
}

#[exception]
fn SysTick() {
    static mut TASK: Option<TickTask> = None;

    if TASK.is_none() {
        *TASK = critical_section::with(|cs| TICK_TASK.borrow(cs).take());
    }
    let Some(task) = TASK.as_mut() else {
        return;
    };

    match task.blinker.tick(&mut task.leds) {
        Ok(TickOutcome::Toggled { millis, interval }) => {
            defmt::trace!("Toggle at {} ms (interval {} ms)", millis, interval);
        }
        Ok(TickOutcome::ZeroInterval { millis }) => {
            defmt::trace!("Zero interval at {} ms, skipped", millis);
        }
        Ok(TickOutcome::Held { .. }) => {}
        Err(e) => defmt::panic!("SysTick: {}", e),
    }
}
