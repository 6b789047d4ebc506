// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the 16-bit interval generator.

use miniblink_common::lfsr::{period, Lfsr16, LFSR_SEED, MAX_PERIOD};

#[test]
fn test_new_uses_fixed_seed() {
    assert_eq!(LFSR_SEED, 0xACE1);
    assert_eq!(Lfsr16::new().state(), LFSR_SEED);
    assert_eq!(Lfsr16::default(), Lfsr16::new());
}

#[test]
fn test_zero_seed_rejected() {
    assert!(Lfsr16::with_seed(0).is_none());
    assert_eq!(Lfsr16::with_seed(1).map(|l| l.state()), Some(1));
}

#[test]
fn test_first_step_from_seed() {
    let s = LFSR_SEED;
    let bit = ((s >> 0) ^ (s >> 2) ^ (s >> 3) ^ (s >> 5)) & 1;
    let expected = (s >> 1) | (bit << 15);

    let mut lfsr = Lfsr16::new();
    let value = lfsr.step();

    assert_eq!(value, expected);
    assert_eq!(value, 0x5670);
    assert_eq!(lfsr.state(), value);
}

#[test]
fn test_feedback_bit_enters_at_top() {
    // Bits 0 and 2 set, 3 and 5 clear: feedback is 0.
    let mut lfsr = Lfsr16::with_seed(0b0000_0101).unwrap();
    assert_eq!(lfsr.step(), 0b0000_0010);

    // Only bit 0 set: feedback is 1.
    let mut lfsr = Lfsr16::with_seed(0b0000_0001).unwrap();
    assert_eq!(lfsr.step(), 0x8000);
}

#[test]
fn test_sequence_is_deterministic() {
    let first: Vec<u16> = Lfsr16::new().take(1000).collect();
    let second: Vec<u16> = Lfsr16::new().take(1000).collect();
    assert_eq!(first, second);

    let mut stepped = Lfsr16::new();
    let nth = (0..1000).map(|_| stepped.step()).last();
    assert_eq!(nth, first.last().copied());
}

#[test]
fn test_never_zero_over_full_period() {
    let mut lfsr = Lfsr16::new();
    for i in 0..MAX_PERIOD {
        assert_ne!(lfsr.step(), 0, "register hit zero after {} steps", i + 1);
    }
}

#[test]
fn test_full_period_visits_every_nonzero_state() {
    let mut seen = vec![false; 1 << 16];
    for value in Lfsr16::new().take(MAX_PERIOD as usize) {
        assert!(!seen[value as usize], "state 0x{:04x} repeated early", value);
        seen[value as usize] = true;
    }
    assert!(!seen[0]);
    assert_eq!(seen.iter().filter(|&&v| v).count(), MAX_PERIOD as usize);
}

#[test]
fn test_period_is_maximal() {
    assert_eq!(period(LFSR_SEED), Some(MAX_PERIOD));
    assert_eq!(period(1), Some(MAX_PERIOD));
    assert_eq!(period(0), None);
}
