// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! 16-bit Fibonacci LFSR used to pick toggle intervals.
//!
//! Taps are bits 0, 2, 3 and 5 (x^16 + x^14 + x^13 + x^11 + 1), which is a
//! maximal-length polynomial: any non-zero seed cycles through all 65535
//! non-zero states before repeating. Not suitable for anything that needs
//! real randomness.

/// Fixed power-on seed.
pub const LFSR_SEED: u16 = 0xACE1;

/// Longest possible period of a 16-bit LFSR.
pub const MAX_PERIOD: u32 = u16::MAX as u32;

/// Linear-feedback shift register state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lfsr16 {
    state: u16,
}

impl Lfsr16 {
    /// Create a register loaded with [`LFSR_SEED`].
    pub const fn new() -> Self {
        Self { state: LFSR_SEED }
    }

    /// Create a register loaded with `seed`.
    ///
    /// Returns `None` for zero, which would lock the register at zero forever.
    pub const fn with_seed(seed: u16) -> Option<Self> {
        if seed == 0 {
            None
        } else {
            Some(Self { state: seed })
        }
    }

    /// Current register value.
    pub const fn state(&self) -> u16 {
        self.state
    }

    /// Advance the register by one step and return the new value.
    pub fn step(&mut self) -> u16 {
        let s = self.state;
        let bit = (s ^ (s >> 2) ^ (s >> 3) ^ (s >> 5)) & 1;
        self.state = (s >> 1) | (bit << 15);
        self.state
    }
}

impl Default for Lfsr16 {
    fn default() -> Self {
        Self::new()
    }
}

/// Endless stream of register values, one step per item.
impl Iterator for Lfsr16 {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        Some(self.step())
    }
}

/// Number of steps until a register seeded with `seed` returns to `seed`.
///
/// Returns `None` for a zero seed, or if the seed is not revisited within
/// [`MAX_PERIOD`] steps.
pub fn period(seed: u16) -> Option<u32> {
    let mut lfsr = Lfsr16::with_seed(seed)?;
    (1..=MAX_PERIOD).find(|_| lfsr.step() == seed)
}
