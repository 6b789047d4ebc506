// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The two status LEDs, driven as a unit.

use embedded_hal::digital::StatefulOutputPin;

/// Red and green LED outputs.
///
/// Both are toggled together, so starting them at opposite levels makes them
/// alternate.
pub struct LedPair<A, B> {
    red: A,
    green: B,
}

impl<A, B> LedPair<A, B>
where
    A: StatefulOutputPin,
    B: StatefulOutputPin,
{
    /// Take ownership of both pins and drive red on, green off.
    pub fn new_complementary(mut red: A, mut green: B) -> Self {
        red.set_high().ok();
        green.set_low().ok();
        Self { red, green }
    }

    /// Toggle each LED.
    pub fn toggle(&mut self) {
        self.red.toggle().ok();
        self.green.toggle().ok();
    }

    pub fn release(self) -> (A, B) {
        (self.red, self.green)
    }
}
