// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Millisecond tick handler that toggles the LEDs at pseudo-random intervals.
//!
//! Every tick the counter advances by one and a fresh interval is drawn from
//! the generator (`value / INTERVAL_SCALE`, i.e. 0-655 ms). The LEDs toggle
//! when the counter is a multiple of that interval.

use core::fmt;
use embedded_hal::digital::StatefulOutputPin;

use crate::leds::LedPair;
use crate::lfsr::Lfsr16;

/// SysTick frequency the handler is designed for.
pub const TICK_HZ: u32 = 1_000;

/// Divisor turning a raw generator value into an interval in ticks.
pub const INTERVAL_SCALE: u16 = 100;

/// Source of raw interval values.
pub trait IntervalSource {
    fn next_value(&mut self) -> u16;
}

impl IntervalSource for Lfsr16 {
    fn next_value(&mut self) -> u16 {
        self.step()
    }
}

/// What to do when a drawn value scales down to a zero interval.
///
/// Happens whenever the generator yields a value below [`INTERVAL_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZeroIntervalPolicy {
    /// Leave the LEDs alone for this tick.
    #[default]
    Skip,
    /// Treat the interval as 1, which always toggles.
    Clamp,
    /// Report [`TickError::ZeroInterval`].
    Fault,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// The counter hit a multiple of the interval; LEDs toggled.
    Toggled { millis: u32, interval: u16 },
    /// LEDs left unchanged.
    Held { millis: u32, interval: u16 },
    /// Interval scaled to zero and was skipped.
    ZeroInterval { millis: u32 },
}

impl TickOutcome {
    pub fn millis(&self) -> u32 {
        match *self {
            Self::Toggled { millis, .. } | Self::Held { millis, .. } => millis,
            Self::ZeroInterval { millis } => millis,
        }
    }

    pub fn toggled(&self) -> bool {
        matches!(self, Self::Toggled { .. })
    }
}

/// Tick handler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// Interval scaled to zero under [`ZeroIntervalPolicy::Fault`].
    ZeroInterval { millis: u32, raw: u16 },
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval { millis, raw } => write!(
                f,
                "zero toggle interval at {} ms (raw value {} < {})",
                millis, raw, INTERVAL_SCALE
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TickError {}

/// Tick handler state: the millisecond counter and its interval generator.
///
/// Owned by whatever services the periodic tick; nothing else touches it.
#[derive(Debug, Clone)]
pub struct Blinker<R = Lfsr16> {
    millis: u32,
    source: R,
    policy: ZeroIntervalPolicy,
}

impl<R: IntervalSource> Blinker<R> {
    pub const fn new(source: R) -> Self {
        Self {
            millis: 0,
            source,
            policy: ZeroIntervalPolicy::Skip,
        }
    }

    pub fn with_policy(mut self, policy: ZeroIntervalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start the counter at `millis` instead of zero.
    pub fn starting_at(mut self, millis: u32) -> Self {
        self.millis = millis;
        self
    }

    pub fn millis(&self) -> u32 {
        self.millis
    }

    pub fn policy(&self) -> ZeroIntervalPolicy {
        self.policy
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Advance one tick and decide whether the LEDs should toggle.
    ///
    /// The counter advances even when an error is returned.
    pub fn advance(&mut self) -> Result<TickOutcome, TickError> {
        self.millis = self.millis.wrapping_add(1);
        let millis = self.millis;
        let raw = self.source.next_value();

        let interval = match raw / INTERVAL_SCALE {
            0 => match self.policy {
                ZeroIntervalPolicy::Skip => return Ok(TickOutcome::ZeroInterval { millis }),
                ZeroIntervalPolicy::Clamp => 1,
                ZeroIntervalPolicy::Fault => return Err(TickError::ZeroInterval { millis, raw }),
            },
            n => n,
        };

        if millis % u32::from(interval) == 0 {
            Ok(TickOutcome::Toggled { millis, interval })
        } else {
            Ok(TickOutcome::Held { millis, interval })
        }
    }

    /// Run one tick against a pair of LEDs.
    pub fn tick<A, B>(&mut self, leds: &mut LedPair<A, B>) -> Result<TickOutcome, TickError>
    where
        A: StatefulOutputPin,
        B: StatefulOutputPin,
    {
        let outcome = self.advance()?;
        if outcome.toggled() {
            leds.toggle();
        }
        Ok(outcome)
    }
}

impl Default for Blinker<Lfsr16> {
    fn default() -> Self {
        Self::new(Lfsr16::new())
    }
}
