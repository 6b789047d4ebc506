// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Startup configuration record read by the bootloader.
//!
//! The firmware links one [`BootConfig`] into the `.boot_config` section. The
//! bootloader looks for [`BOOT_CONFIG_MAGIC`] and uses `config` to decide
//! whether to start the image on power-up or wait to be told to.

/// Magic number identifying a version 2 configuration record.
pub const BOOT_CONFIG_MAGIC: u32 = 0x9070_70B2;

/// First flash sector (1 KiB units) occupied by the application.
pub const APP_START_SECTOR: u8 = 16;

/// `config` flag: start the application immediately on power-up.
pub const CONFIG_FLAG_AUTORUN: u8 = 1 << 1;

/// Size of the serialized record.
pub const BOOT_CONFIG_SIZE: usize = 24;

/// How the bootloader should treat the image on power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupMode {
    /// Stay in the bootloader until explicitly asked to run the image.
    #[default]
    Manual,
    /// Run the image straight away.
    Autorun,
}

impl StartupMode {
    pub const fn flags(self) -> u8 {
        match self {
            Self::Manual => 0,
            Self::Autorun => CONFIG_FLAG_AUTORUN,
        }
    }
}

/// Configuration record layout shared with the bootloader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootConfig {
    pub magic: u32,
    pub reserved_gen: u16,
    pub start: u8,
    pub config: u8,
    pub lock_entry: u32,
    pub erase_mask_lo: u32,
    pub erase_mask_hi: u32,
    pub reserved_hash: u32,
}

impl BootConfig {
    pub const fn new(mode: StartupMode) -> Self {
        Self {
            magic: BOOT_CONFIG_MAGIC,
            reserved_gen: 0,
            start: APP_START_SECTOR,
            config: mode.flags(),
            lock_entry: 0,
            erase_mask_lo: 0,
            erase_mask_hi: 0,
            reserved_hash: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == BOOT_CONFIG_MAGIC
    }

    pub fn startup_mode(&self) -> StartupMode {
        if self.config & CONFIG_FLAG_AUTORUN != 0 {
            StartupMode::Autorun
        } else {
            StartupMode::Manual
        }
    }

    /// Serialize in the little-endian layout the bootloader reads from flash.
    pub fn to_bytes(&self) -> [u8; BOOT_CONFIG_SIZE] {
        let mut out = [0u8; BOOT_CONFIG_SIZE];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4..6].copy_from_slice(&self.reserved_gen.to_le_bytes());
        out[6] = self.start;
        out[7] = self.config;
        out[8..12].copy_from_slice(&self.lock_entry.to_le_bytes());
        out[12..16].copy_from_slice(&self.erase_mask_lo.to_le_bytes());
        out[16..20].copy_from_slice(&self.erase_mask_hi.to_le_bytes());
        out[20..24].copy_from_slice(&self.reserved_hash.to_le_bytes());
        out
    }

    /// Parse a record; `None` if the buffer is short or the magic is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; BOOT_CONFIG_SIZE] = bytes.get(..BOOT_CONFIG_SIZE)?.try_into().ok()?;
        let u32_at = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);

        let config = Self {
            magic: u32_at(0),
            reserved_gen: u16::from_le_bytes([bytes[4], bytes[5]]),
            start: bytes[6],
            config: bytes[7],
            lock_entry: u32_at(8),
            erase_mask_lo: u32_at(12),
            erase_mask_hi: u32_at(16),
            reserved_hash: u32_at(20),
        };
        config.is_valid().then_some(config)
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self::new(StartupMode::Manual)
    }
}
