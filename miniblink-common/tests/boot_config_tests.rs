// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the BootConfig record.

use miniblink_common::boot_config::{
    BootConfig, StartupMode, APP_START_SECTOR, BOOT_CONFIG_MAGIC, BOOT_CONFIG_SIZE,
    CONFIG_FLAG_AUTORUN,
};

#[test]
fn test_boot_config_default_is_manual() {
    let bc = BootConfig::default();

    assert_eq!(bc.magic, BOOT_CONFIG_MAGIC);
    assert_eq!(bc.start, APP_START_SECTOR);
    assert_eq!(bc.config, 0);
    assert_eq!(bc.reserved_gen, 0);
    assert_eq!(bc.lock_entry, 0);
    assert_eq!(bc.erase_mask_lo, 0);
    assert_eq!(bc.erase_mask_hi, 0);
    assert_eq!(bc.reserved_hash, 0);
    assert_eq!(bc.startup_mode(), StartupMode::Manual);
}

#[test]
fn test_boot_config_autorun_flag() {
    let bc = BootConfig::new(StartupMode::Autorun);

    assert_eq!(bc.config, CONFIG_FLAG_AUTORUN);
    assert_eq!(bc.config, 0x02);
    assert_eq!(bc.startup_mode(), StartupMode::Autorun);
}

#[test]
fn test_boot_config_is_valid() {
    let mut bc = BootConfig::default();
    assert!(bc.is_valid());

    bc.magic = 0;
    assert!(!bc.is_valid());
}

#[test]
fn test_boot_config_size_matches_layout() {
    assert_eq!(std::mem::size_of::<BootConfig>(), BOOT_CONFIG_SIZE);
    assert_eq!(BootConfig::default().to_bytes().len(), 24);
}

#[test]
fn test_boot_config_bytes_layout() {
    let bytes = BootConfig::new(StartupMode::Autorun).to_bytes();

    // Magic is at the start, little-endian
    assert_eq!(&bytes[0..4], &[0xB2, 0x70, 0x70, 0x90]);
    assert_eq!(&bytes[4..6], &[0, 0]);
    assert_eq!(bytes[6], 16);
    assert_eq!(bytes[7], CONFIG_FLAG_AUTORUN);
    assert!(bytes[8..].iter().all(|&b| b == 0));
}

#[test]
fn test_boot_config_from_bytes() {
    let bc = BootConfig::new(StartupMode::Autorun);
    assert_eq!(BootConfig::from_bytes(&bc.to_bytes()), Some(bc));

    let mut padded = bc.to_bytes().to_vec();
    padded.extend_from_slice(&[0xFF; 8]);
    assert_eq!(BootConfig::from_bytes(&padded), Some(bc));
}

#[test]
fn test_boot_config_from_bytes_rejects_bad_input() {
    let bytes = BootConfig::default().to_bytes();
    assert_eq!(BootConfig::from_bytes(&bytes[..20]), None);

    let mut corrupt = bytes;
    corrupt[0] ^= 0xFF;
    assert_eq!(BootConfig::from_bytes(&corrupt), None);
}
