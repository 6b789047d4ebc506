// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! RP2040 board bring-up: clocks, LED outputs and the SysTick tick source.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use rp2040_hal::clocks::init_clocks_and_plls;
use rp2040_hal::gpio::{DynPinId, FunctionSioOutput, Pin, Pins, PullDown};
use rp2040_hal::{pac, Clock, Sio, Watchdog};

use crate::leds::LedPair;

/// Pico crystal frequency.
const XTAL_FREQ_HZ: u32 = 12_000_000;

/// LED output pin with its pin number erased.
pub type LedPin = Pin<DynPinId, FunctionSioOutput, PullDown>;

/// Peripherals handed back to the firmware after bring-up.
pub struct Board {
    /// GP15 (red, external) and GP25 (green, on-board).
    pub leds: LedPair<LedPin, LedPin>,
    pub syst: SYST,
    pub core_clock_hz: u32,
}

/// Bring up clocks and the LED pins. SysTick is left stopped.
pub fn init_board() -> Board {
    let Some(mut pac) = pac::Peripherals::take() else {
        panic!("device peripherals already taken");
    };
    let Some(core) = pac::CorePeripherals::take() else {
        panic!("core peripherals already taken");
    };

    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let Ok(clocks) = init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    ) else {
        panic!("clock initialization failed");
    };

    let sio = Sio::new(pac.SIO);
    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let red: LedPin = pins.gpio15.into_push_pull_output().into_dyn_pin();
    let green: LedPin = pins.gpio25.into_push_pull_output().into_dyn_pin();

    Board {
        leds: LedPair::new_complementary(red, green),
        syst: core.SYST,
        core_clock_hz: clocks.system_clock.freq().to_Hz(),
    }
}

/// Start SysTick at `tick_hz` from the core clock and enable its exception.
pub fn start_tick(syst: &mut SYST, core_clock_hz: u32, tick_hz: u32) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(core_clock_hz / tick_hz - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();
}
